//! Renders `@helper` declarations as members returning a template result.

use crate::chunks::{Chunk, HelperChunk};
use crate::codegen::attribute_value_renderer::TagHelperAttributeValueRenderer;
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::error::Result;

use super::code_visitor::CodeVisitor;

pub struct HelperVisitor<'a> {
    context: &'a mut CodeGeneratorContext,
    attribute_value_renderer: &'a dyn TagHelperAttributeValueRenderer,
}

impl<'a> HelperVisitor<'a> {
    pub fn new(
        context: &'a mut CodeGeneratorContext,
        attribute_value_renderer: &'a dyn TagHelperAttributeValueRenderer,
    ) -> Self {
        HelperVisitor {
            context,
            attribute_value_renderer,
        }
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)
    }
}

impl ChunkVisitor for HelperVisitor<'_> {
    fn visit_helper(&mut self, chunk: &HelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let accessibility = if self.context.host.static_helpers {
            "public static"
        } else {
            "public"
        };
        let template_type = self.context.class_context().template_type_name.clone();
        writer
            .write(accessibility)
            .write(" ")
            .write(&template_type)
            .write(" ");
        {
            let mut mapping = writer.build_line_mapping(
                chunk.signature.location,
                Some(chunk.signature.value.chars().count()),
                self.context.source_file_name(),
            );
            mapping.write(&chunk.signature.value);
        }

        if chunk.header_complete {
            writer.write_start_return().write_start_new_object(&template_type);
            let mut body = CodeVisitor::new(self.context, self.attribute_value_renderer);
            body.render_helper_body(chunk, writer)?;
            writer.write_end_method_invocation(true);
        }

        if !chunk.footer.value.is_empty() {
            let mut mapping = writer.build_line_mapping(
                chunk.footer.location,
                Some(chunk.footer.value.chars().count()),
                self.context.source_file_name(),
            );
            mapping.write(&chunk.footer.value);
        }
        writer.end_line();
        Ok(())
    }
}
