//! C# code generation from chunk trees.

pub mod attribute_value_renderer;
pub mod chunk_visitor;
pub mod code_builder;
pub mod code_writer;
pub mod context;
pub mod csharp_code_writer;
pub mod expression_helper;
pub mod generator;
pub mod line_mapping;
pub mod line_mapping_writer;
pub mod tag_helper_renderer;
pub mod visitors;
pub mod writing_scope;

pub use attribute_value_renderer::{
    DefaultAttributeValueRenderer, ModelExpressionAttributeValueRenderer, TagHelperAttributeValueRenderer,
};
pub use chunk_visitor::{visit_all, visit_chunk, ChunkVisitor};
pub use code_builder::{CSharpCodeBuilder, CodeBuilderResult};
pub use code_writer::CodeWriter;
pub use context::{CodeGeneratorContext, ExpressionRenderingMode, UNKNOWN_SOURCE_FILE};
pub use csharp_code_writer::CSharpCodeWriter;
pub use generator::{GeneratorResults, RazorCodeGenerator};
pub use line_mapping::{LineMapping, LineMappingManager, MappingLocation};
pub use line_mapping_writer::LineMappingWriter;
pub use writing_scope::{CodeWritingScope, DisableWarningScope};
