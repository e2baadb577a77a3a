//! Domain Layer
//!
//! The host's core vocabulary, independent of any concrete storage or compiler.
//!
//! ## Structure
//!
//! - `entities/` - Diagnostics, emitted artifacts, source units
//! - `value_objects/` - Compiler options, fallback search path, resolved modules, versions
//! - `services/` - Module resolution
//! - `ports/` - File system and compiler front-end interfaces

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
