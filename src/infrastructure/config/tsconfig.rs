//! `tsconfig.json` loading
//!
//! Reads the project configuration through the `FileSystem` port and turns
//! its `compilerOptions` block into a `CompilerOptions` record. The file is
//! JSON with comments and trailing commas, as `tsc --init` writes it. Keys this
//! host does not model, and `target`/`module` values it does not know, are
//! collected as warnings instead of failing the load.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{CompilerOptions, ModuleKind, ScriptTarget};
use crate::error::{HostError, HostResult};

pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Non-fatal configuration warning (an ignored key or value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the key, e.g. `compilerOptions.esModuleInterop`
    pub key: String,
    pub file: PathBuf,
    /// Rejected value when the key itself is known
    pub value: Option<String>,
    pub suggestion: Option<String>,
}

/// Resolved project configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub options: CompilerOptions,
    /// Explicit `files` entries, absolute
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsconfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
    #[serde(default)]
    files: Vec<PathBuf>,
}

/// Load `<project_root>/tsconfig.json`
pub fn load_tsconfig(fs: &dyn FileSystem, project_root: &Path) -> HostResult<LoadedConfig> {
    let config_path = project_root.join(TSCONFIG_FILE);
    if !fs.exists(&config_path) {
        return Err(HostError::configuration(format!(
            "no {} found in {}",
            TSCONFIG_FILE,
            project_root.display()
        )));
    }
    let content = fs.read(&config_path)?;
    parse_tsconfig(&content, &config_path, project_root)
}

/// Parse tsconfig text; relative paths resolve against `project_root`
pub fn parse_tsconfig(
    content: &str,
    config_path: &Path,
    project_root: &Path,
) -> HostResult<LoadedConfig> {
    let invalid = |e: &dyn std::fmt::Display| {
        HostError::configuration(format!("invalid {}: {}", config_path.display(), e))
    };

    let mut document: Value = json5::from_str(content).map_err(|e| invalid(&e))?;
    let mut warnings = drop_unsupported_values(&mut document, config_path);

    let mut ignored: Vec<String> = Vec::new();
    let raw: TsconfigFile = serde_ignored::deserialize(document, |p| {
        ignored.push(p.to_string());
    })
    .map_err(|e| invalid(&e))?;

    let mut options = raw.compiler_options;
    options.out_dir = options.out_dir.map(|d| project_root.join(d));
    options.root_dir = options.root_dir.map(|d| project_root.join(d));
    options.config_file_path = Some(config_path.to_path_buf());

    warnings.extend(ignored.into_iter().map(|key| {
        let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
        ConfigWarning {
            suggestion: suggest_key(&leaf),
            key,
            file: config_path.to_path_buf(),
            value: None,
        }
    }));

    for w in &warnings {
        match &w.value {
            Some(value) => warn!(
                key = %w.key,
                %value,
                file = %w.file.display(),
                "ignoring unsupported config value"
            ),
            None => warn!(
                key = %w.key,
                file = %w.file.display(),
                "ignoring unsupported config key"
            ),
        }
    }
    debug!(path = %config_path.display(), ?options, "loaded project configuration");

    Ok(LoadedConfig {
        options,
        files: raw.files.into_iter().map(|f| project_root.join(f)).collect(),
        warnings,
    })
}

/// Remove `target`/`module` strings no known variant matches, so the rest of
/// the file still loads with the default for that key
fn drop_unsupported_values(document: &mut Value, config_path: &Path) -> Vec<ConfigWarning> {
    let Some(options) = document
        .get_mut("compilerOptions")
        .and_then(Value::as_object_mut)
    else {
        return Vec::new();
    };

    let checks: [(&str, fn(&str) -> bool); 2] = [
        ("target", |v| v.parse::<ScriptTarget>().is_ok()),
        ("module", |v| v.parse::<ModuleKind>().is_ok()),
    ];

    let mut warnings = Vec::new();
    for (key, known) in checks {
        let rejected = match options.get(key) {
            Some(Value::String(value)) if !known(value) => value.clone(),
            _ => continue,
        };
        options.remove(key);
        warnings.push(ConfigWarning {
            key: format!("compilerOptions.{key}"),
            file: config_path.to_path_buf(),
            value: Some(rejected),
            suggestion: None,
        });
    }
    warnings
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "compilerOptions",
        "files",
        "target",
        "module",
        "outDir",
        "rootDir",
        "strict",
        "noImplicitAny",
        "declaration",
        "sourceMap",
        "noEmitOnError",
        "newLine",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist > 0 && dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
