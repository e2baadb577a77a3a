//! Domain Services
//!
//! Stateless logic that works through ports only.

pub mod module_resolver;

pub use module_resolver::ModuleResolver;
