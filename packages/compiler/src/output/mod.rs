//! Output formats derived from generated code.

pub mod source_map;

pub use source_map::{SourceMap, SourceMapBuilder};
