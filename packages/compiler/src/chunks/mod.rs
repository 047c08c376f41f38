//! Chunk tree model: the parsed template handed to the code generator.

pub mod ast;
pub mod tag_helpers;
pub mod tree_builder;

pub use ast::*;
pub use tag_helpers::{ContentBehavior, TagHelperAttributeDescriptor, TagHelperDescriptor};
pub use tree_builder::ChunkTreeBuilder;
