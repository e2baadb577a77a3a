//! Source entities - parsed units and immutable text snapshots

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::value_objects::ScriptTarget;

/// Immutable view of a file's text at one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Snapshot {
    fn from(text: String) -> Self {
        Snapshot(Arc::from(text))
    }
}

impl From<&str> for Snapshot {
    fn from(text: &str) -> Self {
        Snapshot(Arc::from(text))
    }
}

/// A source file handed to the front-end's parser.
///
/// The parse tree itself is owned by the front-end; the host only carries
/// what it read and the language level it was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    file_name: PathBuf,
    text: Snapshot,
    target: ScriptTarget,
}

impl SourceUnit {
    pub fn new(
        file_name: impl Into<PathBuf>,
        text: impl Into<Snapshot>,
        target: ScriptTarget,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            target,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.text
    }

    pub fn target(&self) -> ScriptTarget {
        self.target
    }
}
