//! Project configuration loading

mod tsconfig;

pub use tsconfig::{load_tsconfig, parse_tsconfig, ConfigWarning, LoadedConfig, TSCONFIG_FILE};
