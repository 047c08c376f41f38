//! Design-time only: a never-called method holding mapped snippets for
//! directives that produce no runtime code, so the editor still resolves them.

use crate::chunks::{AddTagHelperChunk, Chunk, RemoveTagHelperChunk, SetBaseTypeChunk};
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::error::Result;
use crate::parse_util::SourceSpan;

const HELPERS_METHOD_NAME: &str = "@__RazorDesignTimeHelpers__";
const INHERITS_HELPER_NAME: &str = "__inheritsHelper";
const TAG_HELPER_DIRECTIVE_SYNTAX_HELPER: &str = "__tagHelperDirectiveSyntaxHelper";
/// CS0219: variable assigned but never used.
const UNUSED_VARIABLE_WARNING: u32 = 219;

pub struct DesignTimeHelpersVisitor<'a> {
    context: &'a CodeGeneratorContext,
    directive_helper_declared: bool,
}

impl<'a> DesignTimeHelpersVisitor<'a> {
    pub fn new(context: &'a CodeGeneratorContext) -> Self {
        DesignTimeHelpersVisitor {
            context,
            directive_helper_declared: false,
        }
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        if !self.context.design_time_mode() {
            return Ok(());
        }
        let mut method = writer.build_method_declaration("private", "void", HELPERS_METHOD_NAME, &[]);
        let mut pragma = method.build_disable_warning_scope(UNUSED_VARIABLE_WARNING);
        visit_all(self, chunks, &mut pragma)
    }

    fn render_tag_helper_directive(
        &mut self,
        span: &SourceSpan,
        lookup_text: &str,
        writer: &mut CSharpCodeWriter,
    ) {
        if !self.directive_helper_declared {
            self.directive_helper_declared = true;
            writer.write_variable_declaration("string", TAG_HELPER_DIRECTIVE_SYNTAX_HELPER, Some("null"));
        }

        let quoted = format!("\"{}\"", lookup_text);
        writer.write_start_assignment(TAG_HELPER_DIRECTIVE_SYNTAX_HELPER);
        {
            let mut mapping = writer.build_line_mapping(
                span.start,
                Some(quoted.chars().count()),
                self.context.source_file_name(),
            );
            mapping.indent(span.start.character_index);
            mapping.mark_line_mapping_start();
            mapping.write(&quoted);
            mapping.mark_line_mapping_end();
        }
        writer.write_line(";");
    }
}

impl ChunkVisitor for DesignTimeHelpersVisitor<'_> {
    fn visit_set_base_type(&mut self, chunk: &SetBaseTypeChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let mut mapping = writer.build_line_mapping(
            chunk.span.start,
            Some(chunk.type_name.chars().count()),
            self.context.source_file_name(),
        );
        mapping.indent(chunk.span.start.character_index);
        mapping.mark_line_mapping_start();
        mapping.write(&chunk.type_name);
        mapping.mark_line_mapping_end();
        mapping.write(" ").write(INHERITS_HELPER_NAME).write(" = null;");
        Ok(())
    }

    fn visit_add_tag_helper(&mut self, chunk: &AddTagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        self.render_tag_helper_directive(&chunk.span, &chunk.lookup_text, writer);
        Ok(())
    }

    fn visit_remove_tag_helper(&mut self, chunk: &RemoveTagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        self.render_tag_helper_directive(&chunk.span, &chunk.lookup_text, writer);
        Ok(())
    }
}
