//! Code Visitor
//!
//! Renders the body of the execute method: markup literals, expressions,
//! statements, sections, templates, attribute values and tag helpers.

use crate::chunks::*;
use crate::codegen::attribute_value_renderer::TagHelperAttributeValueRenderer;
use crate::codegen::chunk_visitor::{visit_all, visit_chunk, ChunkVisitor};
use crate::codegen::context::{CodeGeneratorContext, ExpressionRenderingMode};
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::codegen::tag_helper_renderer::TagHelperCodeRenderer;
use crate::error::Result;
use crate::parse_util::SourceSpan;

pub const TEMPLATE_WRITER_NAME: &str = "__razor_template_writer";
pub const SECTION_WRITER_NAME: &str = "__razor_section_writer";
pub const HELPER_WRITER_NAME: &str = "__razor_helper_writer";
pub const ATTRIBUTE_VALUE_WRITER_NAME: &str = "__razor_attribute_value_writer";
/// Design-time sink that expressions are assigned to so the editor type-checks them.
pub const DESIGN_TIME_VALUE_NAME: &str = "__o";

const ITEM_PARAMETER_NAME: &str = "item";
const TUPLE_CREATE: &str = "Tuple.Create";
const ATTRIBUTE_VALUE_GENERICS: [&str; 2] = ["System.Object", "System.Int32"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LambdaKind {
    Sync,
    Async,
}

pub struct CodeVisitor<'a> {
    pub(crate) context: &'a mut CodeGeneratorContext,
    attribute_value_renderer: &'a dyn TagHelperAttributeValueRenderer,
}

impl<'a> CodeVisitor<'a> {
    pub fn new(
        context: &'a mut CodeGeneratorContext,
        attribute_value_renderer: &'a dyn TagHelperAttributeValueRenderer,
    ) -> Self {
        CodeVisitor {
            context,
            attribute_value_renderer,
        }
    }

    pub fn context(&self) -> &CodeGeneratorContext {
        self.context
    }

    pub(crate) fn attribute_value_renderer(&self) -> &'a dyn TagHelperAttributeValueRenderer {
        self.attribute_value_renderer
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)
    }

    /// Runs `render` with write calls redirected to `name`, restoring the
    /// previous target afterwards.
    pub fn with_target_writer<R>(
        &mut self,
        name: Option<&str>,
        render: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = std::mem::replace(
            &mut self.context.target_writer_name,
            name.map(str::to_string),
        );
        let result = render(self);
        self.context.target_writer_name = previous;
        result
    }

    pub fn with_rendering_mode<R>(
        &mut self,
        mode: ExpressionRenderingMode,
        render: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let previous = std::mem::replace(&mut self.context.expression_rendering_mode, mode);
        let result = render(self);
        self.context.expression_rendering_mode = previous;
        result
    }

    /// `Method(` or `MethodTo(target, ` depending on the current target writer.
    fn write_call_prefix(&self, method: &str, method_to: &str) -> String {
        match &self.context.target_writer_name {
            Some(target) => format!("{}({}, ", method_to, target),
            None => format!("{}(", method),
        }
    }

    pub(crate) fn write_start_literal_call(&self, writer: &mut CSharpCodeWriter) {
        let class_context = self.context.class_context();
        let prefix = self.write_call_prefix(
            &class_context.write_literal_method_name,
            &class_context.write_literal_to_method_name,
        );
        writer.write(&prefix);
    }

    fn write_begin_context(&self, span: &SourceSpan, is_literal: bool, writer: &mut CSharpCodeWriter) {
        writer.write_start_instrumentation_context(
            &self.context.class_context().begin_context_method_name,
            span.start.absolute_index,
            span.length,
            is_literal,
        );
    }

    fn write_end_context(&self, writer: &mut CSharpCodeWriter) {
        writer.write_end_instrumentation_context(&self.context.class_context().end_context_method_name);
    }

    /// Mapped code spliced into the surrounding generated expression.
    pub(crate) fn render_inline_code(&self, span: &SourceSpan, code: &str, writer: &mut CSharpCodeWriter) {
        let padding = self.context.padding(span, 0);
        let mut mapping = writer.build_line_mapping(
            span.start,
            Some(code.chars().count()),
            self.context.source_file_name(),
        );
        mapping.write(&padding);
        mapping.mark_line_mapping_start();
        mapping.write(code);
        mapping.mark_line_mapping_end();
    }

    fn render_design_time_expression(&self, chunk: &ExpressionChunk, writer: &mut CSharpCodeWriter) {
        let prefix = format!("{} = ", DESIGN_TIME_VALUE_NAME);
        let padding = self.context.padding(&chunk.span, prefix.chars().count());
        let mut mapping = writer.build_line_mapping(
            chunk.span.start,
            Some(chunk.code.chars().count()),
            self.context.source_file_name(),
        );
        mapping.write(&padding).write(&prefix);
        mapping.mark_line_mapping_start();
        mapping.write(&chunk.code);
        mapping.mark_line_mapping_end();
        mapping.write_line(";");
    }

    fn render_runtime_expression(&self, chunk: &ExpressionChunk, writer: &mut CSharpCodeWriter) {
        let instrumented = self.context.instrumentation_enabled();
        if instrumented {
            self.write_begin_context(&chunk.span, false, writer);
        }

        let class_context = self.context.class_context();
        let prefix = self.write_call_prefix(
            &class_context.write_method_name,
            &class_context.write_to_method_name,
        );
        let padding = self.context.padding(&chunk.span, prefix.chars().count());
        {
            let mut mapping = writer.build_line_mapping(
                chunk.span.start,
                Some(chunk.code.chars().count()),
                self.context.source_file_name(),
            );
            mapping.write(&padding).write(&prefix);
            mapping.mark_line_mapping_start();
            mapping.write(&chunk.code);
            mapping.mark_line_mapping_end();
            mapping.write_end_method_invocation(true);
        }

        if instrumented {
            self.write_end_context(writer);
        }
    }

    /// Writes `children` inside a `(name) => { ... }` lambda whose write calls target `name`.
    fn render_writer_lambda(
        &mut self,
        writer_name: &str,
        kind: LambdaKind,
        children: &[Chunk],
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        self.with_target_writer(Some(writer_name), |visitor| {
            visitor.with_rendering_mode(ExpressionRenderingMode::WriteToOutput, |visitor| {
                let mut lambda = match kind {
                    LambdaKind::Sync => writer.build_lambda(false, &[writer_name]),
                    LambdaKind::Async => writer.build_async_lambda(false, &[writer_name]),
                };
                visit_all(visitor, children, &mut lambda)
            })
        })
    }

    /// `Tuple.Create<System.Object, System.Int32>(new HelperResult(async(w) => {...}), index), false)`
    fn render_buffered_attribute_value(
        &mut self,
        children: &[Chunk],
        value_index: usize,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        let template_type = self.context.class_context().template_type_name.clone();
        writer
            .write_start_generic_method_invocation(TUPLE_CREATE, &ATTRIBUTE_VALUE_GENERICS)
            .write_start_new_object(&template_type);
        self.render_writer_lambda(ATTRIBUTE_VALUE_WRITER_NAME, LambdaKind::Async, children, writer)?;
        writer
            .write_end_method_invocation(false)
            .write_parameter_separator()
            .write(&value_index.to_string())
            .write_end_method_invocation(false)
            .write_parameter_separator()
            .write_boolean_literal(false)
            .write_end_method_invocation(false);
        Ok(())
    }

    pub(crate) fn render_helper_body(&mut self, chunk: &HelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        self.render_writer_lambda(HELPER_WRITER_NAME, LambdaKind::Sync, &chunk.children, writer)
    }
}

impl ChunkVisitor for CodeVisitor<'_> {
    fn visit_literal(&mut self, chunk: &LiteralChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        if self.context.design_time_mode() || chunk.text.is_empty() {
            return Ok(());
        }

        let instrumented = self.context.instrumentation_enabled();
        if instrumented {
            self.write_begin_context(&chunk.span, true, writer);
        }
        self.write_start_literal_call(writer);
        writer
            .write_string_literal(&chunk.text)
            .write_end_method_invocation(true);
        if instrumented {
            self.write_end_context(writer);
        }
        Ok(())
    }

    fn visit_expression(&mut self, chunk: &ExpressionChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        match self.context.expression_rendering_mode {
            ExpressionRenderingMode::InjectCode => {
                self.render_inline_code(&chunk.span, &chunk.code, writer)
            }
            ExpressionRenderingMode::WriteToOutput if self.context.design_time_mode() => {
                self.render_design_time_expression(chunk, writer)
            }
            ExpressionRenderingMode::WriteToOutput => self.render_runtime_expression(chunk, writer),
        }
        Ok(())
    }

    fn visit_expression_block(&mut self, chunk: &ExpressionBlockChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        if self.context.expression_rendering_mode == ExpressionRenderingMode::InjectCode {
            return visit_all(self, &chunk.children, writer);
        }

        if self.context.design_time_mode() {
            writer.write_start_assignment(DESIGN_TIME_VALUE_NAME);
            self.with_rendering_mode(ExpressionRenderingMode::InjectCode, |visitor| {
                visit_all(visitor, &chunk.children, writer)
            })?;
            writer.write_line(";");
            return Ok(());
        }

        let instrumented = self.context.instrumentation_enabled();
        if instrumented {
            self.write_begin_context(&chunk.span, false, writer);
        }
        let class_context = self.context.class_context();
        let prefix = self.write_call_prefix(
            &class_context.write_method_name,
            &class_context.write_to_method_name,
        );
        writer.write(&prefix);
        self.with_rendering_mode(ExpressionRenderingMode::InjectCode, |visitor| {
            visit_all(visitor, &chunk.children, writer)
        })?;
        writer.write_end_method_invocation(true);
        if instrumented {
            self.write_end_context(writer);
        }
        Ok(())
    }

    fn visit_statement(&mut self, chunk: &StatementChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
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

    fn visit_set_layout(&mut self, chunk: &SetLayoutChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let layout_property = &self.context.class_context().layout_property_name;
        if self.context.design_time_mode() || layout_property.is_empty() {
            return Ok(());
        }
        writer
            .write_start_assignment(layout_property)
            .write_string_literal(&chunk.layout_path)
            .write_line(";");
        Ok(())
    }

    // Helpers are class members, rendered by the member pass.
    fn visit_helper(&mut self, _chunk: &HelperChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        Ok(())
    }

    fn visit_section(&mut self, chunk: &SectionChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let define_section = self.context.class_context().define_section_method_name.clone();
        writer
            .write_start_method_invocation(&define_section)
            .write_string_literal(&chunk.name)
            .write_parameter_separator();
        self.render_writer_lambda(SECTION_WRITER_NAME, LambdaKind::Async, &chunk.children, writer)?;
        writer.write_end_method_invocation(true);
        Ok(())
    }

    fn visit_template(&mut self, chunk: &TemplateChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let template_type = self.context.class_context().template_type_name.clone();
        writer
            .write(ITEM_PARAMETER_NAME)
            .write(" => ")
            .write_start_new_object(&template_type);
        self.render_writer_lambda(TEMPLATE_WRITER_NAME, LambdaKind::Async, &chunk.children, writer)?;
        writer.write_end_method_invocation(false).end_line();
        Ok(())
    }

    fn visit_code_attribute(&mut self, chunk: &CodeAttributeChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        if self.context.design_time_mode() {
            return visit_all(self, &chunk.children, writer);
        }

        let class_context = self.context.class_context();
        match &self.context.target_writer_name {
            Some(target) => {
                writer
                    .write_start_method_invocation(&class_context.write_attribute_to_method_name)
                    .write(target)
                    .write_parameter_separator();
            }
            None => {
                writer.write_start_method_invocation(&class_context.write_attribute_method_name);
            }
        }
        writer
            .write_string_literal(&chunk.attribute)
            .write_parameter_separator()
            .write_location_tagged_string(&chunk.prefix)
            .write_parameter_separator()
            .write_location_tagged_string(&chunk.suffix);

        visit_all(self, &chunk.children, writer)?;
        writer.write_end_method_invocation(true);
        Ok(())
    }

    fn visit_literal_code_attribute(
        &mut self,
        chunk: &LiteralCodeAttributeChunk,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        if self.context.design_time_mode() {
            if chunk.value.is_none() {
                visit_all(self, &chunk.children, writer)?;
            }
            return Ok(());
        }

        writer
            .write_parameter_separator()
            .write_start_method_invocation(TUPLE_CREATE)
            .write_location_tagged_string(&chunk.prefix)
            .write_parameter_separator();

        match &chunk.value {
            Some(value) => {
                writer
                    .write_location_tagged_string(value)
                    .write_parameter_separator()
                    .write_boolean_literal(true)
                    .write_end_method_invocation(false);
            }
            None => {
                self.render_buffered_attribute_value(
                    &chunk.children,
                    chunk.value_location.absolute_index,
                    writer,
                )?;
            }
        }
        Ok(())
    }

    fn visit_dynamic_code_attribute(
        &mut self,
        chunk: &DynamicCodeAttributeChunk,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        if self.context.design_time_mode() {
            return visit_all(self, &chunk.children, writer);
        }
        let Some(code) = chunk.children.first() else {
            return Ok(());
        };

        writer.write_parameter_separator().end_line();
        writer
            .write_start_method_invocation(TUPLE_CREATE)
            .write_location_tagged_string(&chunk.prefix)
            .write_parameter_separator();

        if matches!(code, Chunk::Expression(_) | Chunk::ExpressionBlock(_)) {
            writer.write_start_generic_method_invocation(TUPLE_CREATE, &ATTRIBUTE_VALUE_GENERICS);
            self.with_rendering_mode(ExpressionRenderingMode::InjectCode, |visitor| {
                visit_chunk(visitor, code, writer)
            })?;
            writer
                .write_parameter_separator()
                .write(&chunk.value_location.absolute_index.to_string())
                .write_end_method_invocation(false)
                .write_parameter_separator()
                .write_boolean_literal(false)
                .write_end_method_invocation(false);
            Ok(())
        } else {
            self.render_buffered_attribute_value(
                &chunk.children,
                chunk.value_location.absolute_index,
                writer,
            )
        }
    }

    fn visit_tag_helper(&mut self, chunk: &TagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        TagHelperCodeRenderer::new(self).render(chunk, writer)
    }
}
