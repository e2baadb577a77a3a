//! Property tests for per-file version counting.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use tshost::application::VersionTable;
use tshost::{CompilerOptions, HostConfig, MemoryFs, WatchOptions, WatchOrchestrator};

use crate::common::*;

const FILES: [&str; 3] = ["/proj/a.ts", "/proj/b.ts", "/proj/c.ts"];

/// One poll interval: which files get edited (and how often) before the poll
fn round() -> impl Strategy<Value = Vec<(usize, u8)>> {
    proptest::collection::vec((0..FILES.len(), 1u8..3), 0..4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Versions never decrease, and each poll raises a file's
    /// version by exactly one if it was edited at least once since the last
    /// poll, otherwise not at all.
    #[test]
    fn property_one_increment_per_changed_poll(
        rounds in proptest::collection::vec(round(), 1..8)
    ) {
        let fs = MemoryFs::with_files(FILES.iter().map(|f| (*f, "")));
        let interval = Duration::from_millis(100);
        let mut session = WatchOrchestrator::start(
            HostConfig::new(CompilerOptions::default(), "/proj"),
            Arc::new(fs.clone()),
            Arc::new(ScriptedFrontEnd::new()),
            WatchOptions::default().with_interval(interval),
            |_| {},
        )
        .unwrap();

        let start = Instant::now();
        let mut expected = [0u64; FILES.len()];
        for (n, edits) in rounds.iter().enumerate() {
            let mut touched = [false; FILES.len()];
            for (file, times) in edits {
                for i in 0..*times {
                    fs.insert(FILES[*file], format!("edit {n} {i}"));
                }
                touched[*file] = true;
            }

            let before: Vec<u64> = FILES
                .iter()
                .map(|f| session.version(Path::new(f)).unwrap().get())
                .collect();
            session.tick(start + interval * (n as u32 + 1));

            for (i, file) in FILES.iter().enumerate() {
                if touched[i] {
                    expected[i] += 1;
                }
                let now = session.version(Path::new(file)).unwrap().get();
                prop_assert!(now >= before[i]);
                prop_assert_eq!(now, expected[i]);
            }
        }
    }

    /// PROPERTY: A table fed arbitrary timestamps only counts strictly newer
    /// readings.
    #[test]
    fn property_table_counts_strictly_newer_readings(
        readings in proptest::collection::vec(0u64..20, 0..32)
    ) {
        let path = PathBuf::from("/proj/a.ts");
        let mut table = VersionTable::new();
        table.track(path.clone(), Some(std::time::UNIX_EPOCH));

        let mut newest = 0u64;
        let mut expected = 0u64;
        for secs in readings {
            let bumped = table.observe(&path, std::time::UNIX_EPOCH + Duration::from_secs(secs));
            if secs > newest {
                newest = secs;
                expected += 1;
                prop_assert_eq!(bumped.map(|v| v.get()), Some(expected));
            } else {
                prop_assert!(bumped.is_none());
            }
        }
        prop_assert_eq!(table.version(&path).unwrap().get(), expected);
    }
}
