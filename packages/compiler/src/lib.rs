#![deny(clippy::all)]

//! Razor code generator.
//!
//! Turns a parsed Razor template (a chunk tree) into the C# source of a
//! class whose execute method renders the page, together with a table
//! mapping every piece of user code back to its place in the template.

pub mod chunks;
pub mod codegen;
pub mod config;
pub mod error;
pub mod output;
pub mod parse_util;

// Re-exports
pub use chunks::{Chunk, ChunkTreeBuilder, CodeTree};
pub use codegen::{GeneratorResults, LineMapping, MappingLocation, RazorCodeGenerator};
pub use config::{GeneratedClassContext, GeneratedTagHelperContext, GeneratorFlags, RazorEngineHost};
pub use error::{GeneratorError, Result};
pub use parse_util::{LocationTagged, SourceLocation, SourceSpan};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generates C# for `tree` with the given host settings.
pub fn generate(
    tree: &CodeTree,
    host: RazorEngineHost,
    class_name: &str,
    root_namespace: &str,
    source_file: Option<&str>,
) -> Result<GeneratorResults> {
    RazorCodeGenerator::new(host, class_name, root_namespace, source_file).generate(tree)
}
