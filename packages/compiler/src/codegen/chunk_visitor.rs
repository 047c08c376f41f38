//! Chunk Visitor
//!
//! Double dispatch over [`Chunk`] kinds. Every method defaults to doing
//! nothing, except that container kinds walk their children, so a pass only
//! overrides the kinds it cares about and silently skips the rest.

use crate::chunks::*;
use crate::error::Result;

use super::csharp_code_writer::CSharpCodeWriter;

pub trait ChunkVisitor {
    fn visit_literal(&mut self, _chunk: &LiteralChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_expression(&mut self, _chunk: &ExpressionChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_expression_block(&mut self, chunk: &ExpressionBlockChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_statement(&mut self, _chunk: &StatementChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_using(&mut self, _chunk: &UsingChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_type_member(&mut self, _chunk: &TypeMemberChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_set_base_type(&mut self, _chunk: &SetBaseTypeChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_set_layout(&mut self, _chunk: &SetLayoutChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_add_tag_helper(&mut self, _chunk: &AddTagHelperChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_remove_tag_helper(&mut self, _chunk: &RemoveTagHelperChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_helper(&mut self, chunk: &HelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_section(&mut self, chunk: &SectionChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_template(&mut self, chunk: &TemplateChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_code_attribute(&mut self, chunk: &CodeAttributeChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_literal_code_attribute(
        &mut self,
        chunk: &LiteralCodeAttributeChunk,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_dynamic_code_attribute(
        &mut self,
        chunk: &DynamicCodeAttributeChunk,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_tag_helper(&mut self, chunk: &TagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }

    fn visit_block(&mut self, chunk: &ChunkBlock, writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, &chunk.children, writer)
    }
}

/// Dispatches one chunk to the matching visitor method.
pub fn visit_chunk<V: ChunkVisitor + ?Sized>(
    visitor: &mut V,
    chunk: &Chunk,
    writer: &mut CSharpCodeWriter,
) -> Result<()> {
    match chunk {
        Chunk::Literal(c) => visitor.visit_literal(c, writer),
        Chunk::Expression(c) => visitor.visit_expression(c, writer),
        Chunk::ExpressionBlock(c) => visitor.visit_expression_block(c, writer),
        Chunk::Statement(c) => visitor.visit_statement(c, writer),
        Chunk::Using(c) => visitor.visit_using(c, writer),
        Chunk::TypeMember(c) => visitor.visit_type_member(c, writer),
        Chunk::SetBaseType(c) => visitor.visit_set_base_type(c, writer),
        Chunk::SetLayout(c) => visitor.visit_set_layout(c, writer),
        Chunk::AddTagHelper(c) => visitor.visit_add_tag_helper(c, writer),
        Chunk::RemoveTagHelper(c) => visitor.visit_remove_tag_helper(c, writer),
        Chunk::Helper(c) => visitor.visit_helper(c, writer),
        Chunk::Section(c) => visitor.visit_section(c, writer),
        Chunk::Template(c) => visitor.visit_template(c, writer),
        Chunk::CodeAttribute(c) => visitor.visit_code_attribute(c, writer),
        Chunk::LiteralCodeAttribute(c) => visitor.visit_literal_code_attribute(c, writer),
        Chunk::DynamicCodeAttribute(c) => visitor.visit_dynamic_code_attribute(c, writer),
        Chunk::TagHelper(c) => visitor.visit_tag_helper(c, writer),
        Chunk::Block(c) => visitor.visit_block(c, writer),
    }
}

/// Visits `chunks` in order, stopping at the first error.
pub fn visit_all<V: ChunkVisitor + ?Sized>(
    visitor: &mut V,
    chunks: &[Chunk],
    writer: &mut CSharpCodeWriter,
) -> Result<()> {
    for chunk in chunks {
        visit_chunk(visitor, chunk, writer)?;
    }
    Ok(())
}
