//! Emit entities - compiled output and build results

use std::path::{Path, PathBuf};

use super::Diagnostic;

/// A compiled output file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    path: PathBuf,
    content: String,
}

impl OutputArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Output of emitting one file or one program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOutput {
    pub artifacts: Vec<OutputArtifact>,
    /// Set only when the front-end refuses to emit (fatally invalid input),
    /// not merely because diagnostics exist.
    pub emit_skipped: bool,
}

impl EmitOutput {
    pub fn skipped() -> Self {
        Self {
            artifacts: Vec::new(),
            emit_skipped: true,
        }
    }
}

/// What the front-end reports after a whole-program emit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramOutput {
    pub diagnostics: Vec<Diagnostic>,
    pub emit_skipped: bool,
    /// Paths written through the host during emit
    pub emitted: Vec<PathBuf>,
}

/// Result of a one-shot build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildResult {
    pub diagnostics: Vec<Diagnostic>,
    pub emit_skipped: bool,
    pub emitted: Vec<PathBuf>,
}

impl BuildResult {
    /// Whether the build produced no error diagnostics and emitted output
    pub fn is_success(&self) -> bool {
        !self.emit_skipped && !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

impl From<ProgramOutput> for BuildResult {
    fn from(output: ProgramOutput) -> Self {
        Self {
            diagnostics: output.diagnostics,
            emit_skipped: output.emit_skipped,
            emitted: output.emitted,
        }
    }
}
