#![deny(clippy::all)]

//! Razor Compiler CLI
//!
//! Batch front end: reads chunk tree files, generates C# in parallel and
//! writes the results with their line mappings.

// Re-export compiler for convenience
pub use razor_compiler as compiler;

pub mod compile;
pub mod config;
pub mod perform_compile;
pub mod tracing_config;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
