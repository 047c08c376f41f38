//! Copies `@functions` blocks into the class body at their template column.

use crate::chunks::{Chunk, TypeMemberChunk};
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::error::Result;

pub struct TypeMemberVisitor<'a> {
    context: &'a CodeGeneratorContext,
}

impl<'a> TypeMemberVisitor<'a> {
    pub fn new(context: &'a CodeGeneratorContext) -> Self {
        TypeMemberVisitor { context }
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)
    }
}

impl ChunkVisitor for TypeMemberVisitor<'_> {
    fn visit_type_member(&mut self, chunk: &TypeMemberChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        if chunk.code.is_empty() {
            return Ok(());
        }
        let padding = self.context.padding(&chunk.span, 0);
        let mut mapping = writer.build_line_mapping(
            chunk.span.start,
            Some(chunk.code.chars().count()),
            self.context.source_file_name(),
        );
        mapping.write(&padding);
        mapping.mark_line_mapping_start();
        mapping.write(&chunk.code);
        mapping.mark_line_mapping_end();
        Ok(())
    }
}
