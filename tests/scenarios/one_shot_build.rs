//! One-shot builds: clean projects, type errors, failures

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::tempdir;
use tshost::{build, BuildRequest, CompilerOptions, FileSystem, HostError, LocalFs, MemoryFs};

use crate::common::*;

fn project(index: &str) -> MemoryFs {
    MemoryFs::with_files([
        (
            "/proj/tsconfig.json",
            r#"{ "compilerOptions": { "target": "es2015", "outDir": "dist" } }"#,
        ),
        ("/proj/src/index.ts", index),
        ("/proj/src/greet.ts", GREET),
    ])
}

#[test]
fn clean_entry_emits_without_diagnostics() {
    let fs = project(CLEAN_INDEX);
    let request = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap();

    let result = build(&request, Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert!(!result.emit_skipped);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.emitted, vec![PathBuf::from("/proj/dist/index.js")]);
    assert_eq!(fs.read(Path::new("/proj/dist/index.js")).unwrap(), CLEAN_INDEX);
}

#[test]
fn type_error_is_reported_but_still_emits() {
    let fs = project(TYPE_ERROR_INDEX);
    let request = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap();

    let result = build(&request, Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert!(!result.emit_skipped);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].to_string(),
        "/proj/src/index.ts(1,23): error TS2322: Type 'string' is not assignable to type 'number'."
    );
    assert!(fs.exists(Path::new("/proj/dist/index.js")));
}

#[test]
fn fatal_input_skips_emission() {
    let fs = project("@@fatal\n");
    let request = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap();

    let result = build(&request, Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert!(result.emit_skipped);
    assert!(!result.is_success());
    assert!(!fs.exists(Path::new("/proj/dist/index.js")));
}

#[test]
fn rebuilding_unchanged_tree_is_idempotent() {
    let fs = project(TYPE_ERROR_INDEX);
    let request = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap();
    let front_end = Arc::new(ScriptedFrontEnd::new());

    let first = build(&request, Arc::new(fs.clone()), front_end.clone()).unwrap();
    let first_output = fs.read(Path::new("/proj/dist/index.js")).unwrap();
    let second = build(&request, Arc::new(fs.clone()), front_end).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs.read(Path::new("/proj/dist/index.js")).unwrap(), first_output);
}

#[test]
fn missing_entry_file_surfaces_as_locationless_diagnostic() {
    let fs = MemoryFs::with_files([("/proj/src/other.ts", "")]);
    let request = BuildRequest::new(
        CompilerOptions::default(),
        "/proj",
        vec![PathBuf::from("/proj/src/index.ts")],
    );

    let result = build(&request, Arc::new(fs), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert_eq!(result.error_count(), 1);
    assert!(result.diagnostics[0].file().is_none());
    assert!(result.emitted.is_empty());
}

#[test]
fn project_without_entry_is_configuration_error() {
    let fs = MemoryFs::with_files([("/proj/tsconfig.json", "{}"), ("/proj/lib/util.ts", "")]);

    let err = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap_err();

    assert!(matches!(err, HostError::Configuration { .. }));
}

#[test]
fn failed_output_write_is_fatal() {
    let fs = ProbeFs::new(project(CLEAN_INDEX)).failing_writes();
    let request = BuildRequest::from_project(&fs, Path::new("/proj")).unwrap();

    let err = build(&request, Arc::new(fs), Arc::new(ScriptedFrontEnd::new())).unwrap_err();

    match err {
        HostError::Write { path, .. } => assert_eq!(path, PathBuf::from("/proj/dist/index.js")),
        other => panic!("expected write error, got {other}"),
    }
}

#[test]
fn builds_a_project_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let fs = LocalFs::new();
    fs.write(
        &root.join("tsconfig.json"),
        r#"{ "compilerOptions": { "outDir": "out" }, "files": ["app.ts"] }"#,
    )
    .unwrap();
    fs.write(&root.join("app.ts"), "console.log(1);\n").unwrap();

    let request = BuildRequest::from_project(&fs, root).unwrap();
    let result = build(&request, Arc::new(fs), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert!(result.is_success());
    assert_eq!(
        std::fs::read_to_string(root.join("out").join("app.js")).unwrap(),
        "console.log(1);\n"
    );
}
