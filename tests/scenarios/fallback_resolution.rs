//! Module resolution through fallback search directories

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tshost::domain::value_objects::ResolutionOrigin;
use tshost::{
    build, BuildRequest, CompilerOptions, FallbackSearchPath, FileSystem, MemoryFs,
    ModuleResolver, ResolvedModule,
};

use crate::common::*;

const USES_PKG: &str = "import { thing } from \"pkg\";\nthing();\n";

fn resolver(fs: &ProbeFs, fallback: &[&str]) -> ModuleResolver {
    ModuleResolver::new(
        Arc::new(ScriptedFrontEnd::new()),
        Arc::new(fs.clone()),
        Arc::new(CompilerOptions::default()),
        FallbackSearchPath::new(fallback.iter().copied()),
    )
}

#[test]
fn bare_specifier_resolves_from_fallback_index() {
    let fs = ProbeFs::new(MemoryFs::with_files([
        ("/proj/src/index.ts", USES_PKG),
        ("/proj/fallback/pkg/index.d.ts", "export declare function thing(): void;"),
    ]));

    let resolved =
        resolver(&fs, &["/proj/fallback"]).resolve("pkg", Path::new("/proj/src/index.ts"));

    assert_eq!(
        resolved,
        Some(ResolvedModule::fallback("/proj/fallback/pkg/index.d.ts"))
    );
}

#[test]
fn fallback_declaration_satisfies_the_build() {
    let fs = MemoryFs::with_files([
        ("/proj/src/index.ts", USES_PKG),
        ("/proj/fallback/pkg/index.d.ts", "export declare function thing(): void;"),
    ]);
    let request = BuildRequest::new(
        CompilerOptions::default().with_out_dir("/proj/dist"),
        "/proj",
        vec![PathBuf::from("/proj/src/index.ts")],
    )
    .with_fallback(FallbackSearchPath::new(["/proj/fallback"]));

    let result = build(&request, Arc::new(fs), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert!(result.diagnostics.is_empty());
}

#[test]
fn unresolved_module_is_a_diagnostic_not_an_error() {
    let fs = MemoryFs::with_files([("/proj/src/index.ts", USES_PKG)]);
    let request = BuildRequest::new(
        CompilerOptions::default().with_out_dir("/proj/dist"),
        "/proj",
        vec![PathBuf::from("/proj/src/index.ts")],
    )
    .with_fallback(FallbackSearchPath::new(["/proj/fallback"]));

    let result = build(&request, Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new())).unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, Some(2307));
    assert!(!result.emit_skipped);
    assert!(fs.exists(Path::new("/proj/dist/index.js")));
}

#[test]
fn native_hit_never_probes_fallback_directories() {
    let fs = ProbeFs::new(MemoryFs::with_files([
        ("/proj/src/index.ts", ""),
        ("/proj/src/greet.ts", GREET),
        ("/proj/fallback/greet/index.d.ts", ""),
    ]));

    let resolved = resolver(&fs, &["/proj/fallback"])
        .resolve("./greet", Path::new("/proj/src/index.ts"))
        .unwrap();

    assert_eq!(resolved.origin(), ResolutionOrigin::Native);
    assert!(fs.probes_under(Path::new("/proj/fallback")).is_empty());
}

#[test]
fn fallback_probes_only_the_two_conventional_paths() {
    let fs = ProbeFs::new(MemoryFs::with_files([
        ("/a/pkg/readme.d.ts", ""),
        ("/b/other.d.ts", ""),
    ]));

    assert!(resolver(&fs, &["/a", "/b"])
        .resolve("pkg", Path::new("/proj/src/index.ts"))
        .is_none());

    assert_eq!(
        fs.probes_under(Path::new("/a"))
            .into_iter()
            .chain(fs.probes_under(Path::new("/b")))
            .collect::<Vec<_>>(),
        vec![
            PathBuf::from("/a/pkg/index.d.ts"),
            PathBuf::from("/a/pkg.d.ts"),
            PathBuf::from("/b/pkg/index.d.ts"),
            PathBuf::from("/b/pkg.d.ts"),
        ]
    );
}
