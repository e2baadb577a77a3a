//! Domain Entities
//!
//! Values the compiler front-end hands back to the host: diagnostics,
//! emitted artifacts and the source units it reads.

mod diagnostic;
mod emit;
mod source;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use emit::{BuildResult, EmitOutput, OutputArtifact, ProgramOutput};
pub use source::{Snapshot, SourceUnit};
