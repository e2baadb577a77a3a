//! Watch sessions: selective re-emission, resilience, event stream

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::tempdir;
use tshost::{
    CompilerOptions, FileSystem, HostConfig, LocalFs, MemoryFs, WatchEvent, WatchOptions,
    WatchOrchestrator,
};

use crate::common::*;

const INTERVAL: Duration = Duration::from_millis(100);

fn project() -> MemoryFs {
    MemoryFs::with_files([
        ("/proj/src/index.ts", CLEAN_INDEX),
        ("/proj/src/greet.ts", GREET),
        ("/proj/src/util/math.ts", "export const two = 2;\n"),
    ])
}

fn config() -> HostConfig {
    HostConfig::new(CompilerOptions::default().with_out_dir("/proj/dist"), "/proj")
}

fn start(
    fs: Arc<dyn FileSystem>,
    front_end: Arc<ScriptedFrontEnd>,
    log: &EventLog,
) -> WatchOrchestrator {
    WatchOrchestrator::start(
        config(),
        fs,
        front_end,
        WatchOptions::default().with_interval(INTERVAL),
        log.sink(),
    )
    .unwrap()
}

fn version(session: &WatchOrchestrator, path: &str) -> u64 {
    session.version(Path::new(path)).unwrap().get()
}

#[test]
fn editing_one_file_re_emits_only_that_file() {
    let fs = project();
    let log = EventLog::default();
    let mut session = start(Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new()), &log);
    log.clear();

    fs.insert("/proj/src/greet.ts", "export function greet() { return 1; }\n");
    let emitted = session.tick(Instant::now() + INTERVAL);

    assert_eq!(emitted, 1);
    assert_eq!(log.emitted(), vec![PathBuf::from("/proj/src/greet.ts")]);
    assert_eq!(version(&session, "/proj/src/greet.ts"), 1);
    assert_eq!(version(&session, "/proj/src/index.ts"), 0);
    assert_eq!(version(&session, "/proj/src/util/math.ts"), 0);
    assert_eq!(
        fs.read(Path::new("/proj/dist/greet.js")).unwrap(),
        "export function greet() { return 1; }\n"
    );
}

#[test]
fn analysis_service_is_reused_across_changes() {
    let fs = project();
    let front_end = Arc::new(ScriptedFrontEnd::new());
    let log = EventLog::default();
    let mut session = start(Arc::new(fs.clone()), Arc::clone(&front_end), &log);

    // One analysis per file for the initial emission
    assert_eq!(front_end.analyses(), 3);

    let now = Instant::now();
    session.tick(now + INTERVAL);
    assert_eq!(front_end.analyses(), 3);

    fs.insert("/proj/src/util/math.ts", "export const two = 1 + 1;\n");
    session.tick(now + INTERVAL * 2);
    assert_eq!(front_end.analyses(), 4);
}

#[test]
fn type_errors_are_logged_and_the_loop_continues() {
    let fs = project();
    let log = EventLog::default();
    let mut session = start(Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new()), &log);
    log.clear();

    let now = Instant::now();
    fs.insert("/proj/src/index.ts", TYPE_ERROR_INDEX);
    session.tick(now + INTERVAL);
    fs.insert("/proj/src/index.ts", CLEAN_INDEX);
    session.tick(now + INTERVAL * 2);

    let diagnostics = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, WatchEvent::Diagnostic { .. }))
        .count();
    assert_eq!(diagnostics, 1);
    assert_eq!(version(&session, "/proj/src/index.ts"), 2);
    assert_eq!(fs.read(Path::new("/proj/dist/index.js")).unwrap(), CLEAN_INDEX);
}

#[test]
fn adapter_errors_during_emission_keep_the_session_alive() {
    let memory = project();
    let fs = ProbeFs::new(memory.clone()).failing_writes();
    let log = EventLog::default();
    let mut session = start(Arc::new(fs), Arc::new(ScriptedFrontEnd::new()), &log);
    log.clear();

    let now = Instant::now();
    memory.insert("/proj/src/greet.ts", "export {}\n");
    session.tick(now + INTERVAL);
    memory.insert("/proj/src/greet.ts", "export { x }\n");
    session.tick(now + INTERVAL * 2);

    let errors: Vec<_> = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, WatchEvent::Error { .. }))
        .collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(version(&session, "/proj/src/greet.ts"), 2);
    assert!(!session.is_stopped());
}

#[test]
fn event_stream_is_ndjson() {
    let fs = MemoryFs::with_files([("/proj/src/a.ts", "export const a = 1;\n")]);
    let log = EventLog::default();
    let mut session = start(Arc::new(fs.clone()), Arc::new(ScriptedFrontEnd::new()), &log);

    fs.insert("/proj/src/a.ts", "export const a: number = \"1\";\n");
    session.tick(Instant::now() + INTERVAL);
    session.shutdown();

    insta::assert_snapshot!(log.ndjson(), @r#"
    {"command":"watch","event":"watch_started","files":1,"root":"/proj"}
    {"artifacts":["/proj/dist/a.js"],"command":"watch","emit_skipped":false,"event":"emitted","path":"/proj/src/a.ts"}
    {"command":"watch","event":"file_changed","path":"/proj/src/a.ts","version":1}
    {"command":"watch","event":"diagnostic","message":"/proj/src/a.ts(1,26): error TS2322: Type 'string' is not assignable to type 'number'."}
    {"artifacts":["/proj/dist/a.js"],"command":"watch","emit_skipped":false,"event":"emitted","path":"/proj/src/a.ts"}
    {"command":"watch","event":"shutdown"}
    "#);
}

#[test]
fn background_session_on_disk_follows_edits() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let fs = LocalFs::new();
    fs.write(&root.join("src").join("main.ts"), "let v = 1;\n").unwrap();

    let log = EventLog::default();
    let session = WatchOrchestrator::start(
        HostConfig::new(CompilerOptions::default().with_out_dir(root.join("out")), &root),
        Arc::new(fs),
        Arc::new(ScriptedFrontEnd::new()),
        WatchOptions::default()
            .with_interval(Duration::from_millis(20))
            .with_native_events(true),
        log.sink(),
    )
    .unwrap();
    let handle = session.spawn().unwrap();

    // Timestamps on some file systems have one-second granularity
    std::thread::sleep(Duration::from_millis(1100));
    fs.write(&root.join("src").join("main.ts"), "let v = 2;\n").unwrap();

    let out = root.join("out").join("main.js");
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline
        && std::fs::read_to_string(&out).ok().as_deref() != Some("let v = 2;\n")
    {
        std::thread::sleep(Duration::from_millis(20));
    }
    handle.stop();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "let v = 2;\n");
    assert!(log
        .events()
        .iter()
        .any(|e| matches!(e, WatchEvent::FileChanged { version: 1, .. })));
    assert!(matches!(log.events().last(), Some(WatchEvent::Shutdown)));
}
