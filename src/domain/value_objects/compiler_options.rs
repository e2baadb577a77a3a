//! CompilerOptions value object - the resolved compiler configuration
//!
//! Read once per build session and never mutated while the session is live.
//! Keys follow the `compilerOptions` block of a `tsconfig.json`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A `target` or `module` value this host does not know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {option} value `{value}`")]
pub struct UnknownOptionValue {
    pub option: &'static str,
    pub value: String,
}

/// Language level the front-end parses and emits for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScriptTarget {
    Es3,
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
    EsNext,
}

impl ScriptTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptTarget::Es3 => "ES3",
            ScriptTarget::Es5 => "ES5",
            ScriptTarget::Es2015 => "ES2015",
            ScriptTarget::Es2016 => "ES2016",
            ScriptTarget::Es2017 => "ES2017",
            ScriptTarget::Es2018 => "ES2018",
            ScriptTarget::Es2019 => "ES2019",
            ScriptTarget::Es2020 => "ES2020",
            ScriptTarget::Es2021 => "ES2021",
            ScriptTarget::Es2022 => "ES2022",
            ScriptTarget::Es2023 => "ES2023",
            ScriptTarget::Es2024 => "ES2024",
            ScriptTarget::EsNext => "ESNext",
        }
    }
}

impl FromStr for ScriptTarget {
    type Err = UnknownOptionValue;

    /// Case-insensitive, `es6` is an alias of `es2015`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let target = match s.to_ascii_lowercase().as_str() {
            "es3" => ScriptTarget::Es3,
            "es5" => ScriptTarget::Es5,
            "es6" | "es2015" => ScriptTarget::Es2015,
            "es2016" => ScriptTarget::Es2016,
            "es2017" => ScriptTarget::Es2017,
            "es2018" => ScriptTarget::Es2018,
            "es2019" => ScriptTarget::Es2019,
            "es2020" => ScriptTarget::Es2020,
            "es2021" => ScriptTarget::Es2021,
            "es2022" => ScriptTarget::Es2022,
            "es2023" => ScriptTarget::Es2023,
            "es2024" => ScriptTarget::Es2024,
            "esnext" => ScriptTarget::EsNext,
            _ => {
                return Err(UnknownOptionValue {
                    option: "target",
                    value: s.to_string(),
                })
            }
        };
        Ok(target)
    }
}

/// Module system of emitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleKind {
    None,
    #[default]
    CommonJs,
    Amd,
    Umd,
    System,
    Es2015,
    Es2020,
    Es2022,
    EsNext,
    Node16,
    Node18,
    NodeNext,
    Preserve,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::None => "None",
            ModuleKind::CommonJs => "CommonJS",
            ModuleKind::Amd => "AMD",
            ModuleKind::Umd => "UMD",
            ModuleKind::System => "System",
            ModuleKind::Es2015 => "ES2015",
            ModuleKind::Es2020 => "ES2020",
            ModuleKind::Es2022 => "ES2022",
            ModuleKind::EsNext => "ESNext",
            ModuleKind::Node16 => "Node16",
            ModuleKind::Node18 => "Node18",
            ModuleKind::NodeNext => "NodeNext",
            ModuleKind::Preserve => "Preserve",
        }
    }
}

impl FromStr for ModuleKind {
    type Err = UnknownOptionValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let module = match s.to_ascii_lowercase().as_str() {
            "none" => ModuleKind::None,
            "commonjs" => ModuleKind::CommonJs,
            "amd" => ModuleKind::Amd,
            "umd" => ModuleKind::Umd,
            "system" => ModuleKind::System,
            "es6" | "es2015" => ModuleKind::Es2015,
            "es2020" => ModuleKind::Es2020,
            "es2022" => ModuleKind::Es2022,
            "esnext" => ModuleKind::EsNext,
            "node16" => ModuleKind::Node16,
            "node18" => ModuleKind::Node18,
            "nodenext" => ModuleKind::NodeNext,
            "preserve" => ModuleKind::Preserve,
            _ => {
                return Err(UnknownOptionValue {
                    option: "module",
                    value: s.to_string(),
                })
            }
        };
        Ok(module)
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScriptTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScriptTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ModuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModuleKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Line terminator for emitted files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLine {
    Lf,
    Crlf,
}

impl NewLine {
    /// Line terminator of the running platform
    pub fn platform() -> Self {
        if cfg!(windows) {
            NewLine::Crlf
        } else {
            NewLine::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::Crlf => "\r\n",
        }
    }
}

/// Compiler options record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub target: ScriptTarget,
    pub module: ModuleKind,
    pub out_dir: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
    pub strict: bool,
    pub no_implicit_any: bool,
    pub declaration: bool,
    pub source_map: bool,
    pub no_emit_on_error: bool,
    pub new_line: Option<NewLine>,
    /// Path of the config file these options were read from
    pub config_file_path: Option<PathBuf>,
}

impl CompilerOptions {
    pub fn with_target(mut self, target: ScriptTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }
}
