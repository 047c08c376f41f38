//! Tag Helper Code Renderer
//!
//! Emits the runtime glue for one element bound to tag helpers:
//!
//! 1. open an execution scope for the tag
//! 2. create every helper and register it with the scope
//! 3. bind attributes to helper properties, or record them as plain HTML attributes
//! 4. run the helpers and write start tag, content, body and end tag in the
//!    order the content behavior asks for
//! 5. close the scope
//!
//! In design time only the creation and binding steps are written, with
//! mappings, so the editor sees the property assignments.

use std::collections::HashMap;
use std::slice;

use crate::chunks::{
    Chunk, ContentBehavior, TagHelperAttributeDescriptor, TagHelperChunk, TagHelperDescriptor,
};
use crate::error::Result;

use super::chunk_visitor::visit_all;
use super::csharp_code_writer::CSharpCodeWriter;
use super::visitors::code_visitor::CodeVisitor;

pub const EXECUTION_CONTEXT_VARIABLE_NAME: &str = "__tagHelperExecutionContext";
pub const RUNNER_VARIABLE_NAME: &str = "__tagHelperRunner";
pub const SCOPE_MANAGER_VARIABLE_NAME: &str = "__tagHelperScopeManager";
pub const STRING_VALUE_BUFFER_VARIABLE_NAME: &str = "__tagHelperStringValueBuffer";

pub(crate) struct TagHelperCodeRenderer<'v, 'a> {
    body: &'v mut CodeVisitor<'a>,
    /// Property accessor that already holds the value of an attribute,
    /// keyed by lower-cased attribute name.
    bound_attribute_accessors: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagOutput {
    StartTag,
    Content,
    EndTag,
}

impl<'v, 'a> TagHelperCodeRenderer<'v, 'a> {
    pub(crate) fn new(body: &'v mut CodeVisitor<'a>) -> Self {
        TagHelperCodeRenderer {
            body,
            bound_attribute_accessors: HashMap::new(),
        }
    }

    fn design_time(&self) -> bool {
        self.body.context.design_time_mode()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(tag = %chunk.tag_name, helpers = chunk.descriptors.len()))]
    pub(crate) fn render(&mut self, chunk: &TagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let behavior = ContentBehavior::resolve(&chunk.descriptors);
        tracing::debug!(?behavior, "rendering tag helper");

        self.render_begin_scope(&chunk.tag_name, writer);
        self.render_creation(&chunk.descriptors, writer);
        self.render_attributes(chunk, writer)?;

        if self.design_time() {
            visit_all(&mut *self.body, &chunk.children, writer)?;
        } else {
            match behavior {
                ContentBehavior::None => {
                    self.render_run(false, writer);
                    self.render_output(TagOutput::StartTag, writer);
                    visit_all(&mut *self.body, &chunk.children, writer)?;
                    self.render_output(TagOutput::EndTag, writer);
                }
                ContentBehavior::Append => {
                    self.render_run(false, writer);
                    self.render_output(TagOutput::StartTag, writer);
                    visit_all(&mut *self.body, &chunk.children, writer)?;
                    self.render_output(TagOutput::Content, writer);
                    self.render_output(TagOutput::EndTag, writer);
                }
                ContentBehavior::Prepend => {
                    self.render_run(false, writer);
                    self.render_output(TagOutput::StartTag, writer);
                    self.render_output(TagOutput::Content, writer);
                    visit_all(&mut *self.body, &chunk.children, writer)?;
                    self.render_output(TagOutput::EndTag, writer);
                }
                // The body still runs for its side effects; its output is dropped.
                ContentBehavior::Replace => {
                    self.render_buffered(&chunk.children, writer)?;
                    self.render_run(false, writer);
                    self.render_output(TagOutput::StartTag, writer);
                    self.render_output(TagOutput::Content, writer);
                    self.render_output(TagOutput::EndTag, writer);
                }
                ContentBehavior::Modify => {
                    self.render_buffered(&chunk.children, writer)?;
                    self.render_run(true, writer);
                    self.render_output(TagOutput::StartTag, writer);
                    self.render_output(TagOutput::Content, writer);
                    self.render_output(TagOutput::EndTag, writer);
                }
            }
        }

        self.render_end_scope(writer);
        Ok(())
    }

    fn render_begin_scope(&self, tag_name: &str, writer: &mut CSharpCodeWriter) {
        if self.design_time() {
            return;
        }
        let names = &self.body.context.class_context().tag_helper_context;
        writer
            .write_start_assignment(EXECUTION_CONTEXT_VARIABLE_NAME)
            .write_start_instance_method_invocation(
                SCOPE_MANAGER_VARIABLE_NAME,
                &names.scope_manager_begin_method_name,
            )
            .write_string_literal(tag_name)
            .write_end_method_invocation(true);
    }

    fn render_end_scope(&self, writer: &mut CSharpCodeWriter) {
        if self.design_time() {
            return;
        }
        let names = &self.body.context.class_context().tag_helper_context;
        writer
            .write_start_assignment(EXECUTION_CONTEXT_VARIABLE_NAME)
            .write_instance_method_invocation(
                SCOPE_MANAGER_VARIABLE_NAME,
                &names.scope_manager_end_method_name,
                &[],
            );
    }

    fn render_creation(&self, descriptors: &[TagHelperDescriptor], writer: &mut CSharpCodeWriter) {
        let names = &self.body.context.class_context().tag_helper_context;
        for descriptor in descriptors {
            let variable = descriptor.variable_name();
            let type_name = format!("global::{}", descriptor.type_name);
            writer
                .write_start_assignment(&variable)
                .write_start_generic_method_invocation(
                    &names.create_tag_helper_method_name,
                    &[type_name.as_str()],
                )
                .write_end_method_invocation(true);

            if !self.design_time() {
                writer.write_instance_method_invocation(
                    EXECUTION_CONTEXT_VARIABLE_NAME,
                    &names.execution_context_add_method_name,
                    &[variable.as_str()],
                );
            }
        }
    }

    /// Attributes in document order; each is offered to every helper in descriptor order.
    fn render_attributes(&mut self, chunk: &TagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        for (name, value) in &chunk.attributes {
            let mut bound = false;
            for descriptor in &chunk.descriptors {
                for attribute in descriptor.attributes.iter().filter(|a| a.matches(name)) {
                    bound = true;
                    self.render_bound_attribute(descriptor, attribute, value, writer)?;
                }
            }
            if !bound {
                self.render_unbound_attribute(name, value, writer)?;
            }
        }
        Ok(())
    }

    fn render_bound_attribute(
        &mut self,
        descriptor: &TagHelperDescriptor,
        attribute: &TagHelperAttributeDescriptor,
        value: &Chunk,
        writer: &mut CSharpCodeWriter,
    ) -> Result<()> {
        let accessor = format!("{}.{}", descriptor.variable_name(), attribute.property_name);
        let key = attribute.name.to_ascii_lowercase();

        // The value was already computed for another helper on this element.
        if let Some(previous) = self.bound_attribute_accessors.get(&key) {
            writer
                .write_start_assignment(&accessor)
                .write(previous)
                .write_line(";");
            return Ok(());
        }

        let design_time = self.design_time();
        let plain_text = value.plain_text();
        let is_string = attribute.is_string_property();

        if is_string && plain_text.is_none() {
            self.render_buffered(slice::from_ref(value), writer)?;
        }

        writer.write_start_assignment(&accessor);
        let renderer = self.body.attribute_value_renderer();
        let text = plain_text.map(|literal| literal.text.as_str());
        let body = &mut *self.body;
        renderer.render_attribute_value(attribute, writer, text, &mut |writer| {
            match (is_string, plain_text) {
                (true, Some(literal)) => {
                    writer.write_string_literal(&literal.text);
                }
                (true, None) => {
                    writer
                        .write(STRING_VALUE_BUFFER_VARIABLE_NAME)
                        .write(".ToString()");
                }
                (false, Some(literal)) if design_time => {
                    let mut mapping = writer.build_line_mapping_without_pragmas(
                        literal.span.start,
                        Some(literal.text.chars().count()),
                    );
                    mapping.write(&literal.text);
                }
                (false, Some(literal)) => {
                    writer.write(&literal.text);
                }
                (false, None) => render_code_value(body, value, writer),
            }
            Ok(())
        })?;
        writer.write_line(";");

        if !design_time {
            let names = &self.body.context.class_context().tag_helper_context;
            writer
                .write_start_instance_method_invocation(
                    EXECUTION_CONTEXT_VARIABLE_NAME,
                    &names.execution_context_add_tag_helper_attribute_method_name,
                )
                .write_string_literal(&attribute.name)
                .write_parameter_separator()
                .write(&accessor)
                .write_end_method_invocation(true);
        }

        self.bound_attribute_accessors.insert(key, accessor);
        Ok(())
    }

    fn render_unbound_attribute(&mut self, name: &str, value: &Chunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        let plain_text = value.plain_text();
        if self.design_time() {
            if plain_text.is_none() {
                visit_all(&mut *self.body, slice::from_ref(value), writer)?;
            }
            return Ok(());
        }

        if plain_text.is_none() {
            self.render_buffered(slice::from_ref(value), writer)?;
        }

        let names = &self.body.context.class_context().tag_helper_context;
        writer
            .write_start_instance_method_invocation(
                EXECUTION_CONTEXT_VARIABLE_NAME,
                &names.execution_context_add_html_attribute_method_name,
            )
            .write_string_literal(name)
            .write_parameter_separator();
        match plain_text {
            Some(literal) => {
                writer.write_string_literal(&literal.text);
            }
            None => {
                writer
                    .write(STRING_VALUE_BUFFER_VARIABLE_NAME)
                    .write(".ToString()");
            }
        }
        writer.write_end_method_invocation(true);
        Ok(())
    }

    /// Renders `chunks` into a fresh writing scope and stores the result in the string buffer.
    fn render_buffered(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        if self.design_time() {
            return self
                .body
                .with_target_writer(None, |visitor| visit_all(visitor, chunks, writer));
        }

        let names = self.body.context.class_context().tag_helper_context.clone();
        writer.write_method_invocation(&names.start_writing_scope_method_name, &[]);
        self.body
            .with_target_writer(None, |visitor| visit_all(visitor, chunks, writer))?;
        writer
            .write_start_assignment(STRING_VALUE_BUFFER_VARIABLE_NAME)
            .write_method_invocation(&names.end_writing_scope_method_name, &[]);
        Ok(())
    }

    fn render_run(&self, pass_body_buffer: bool, writer: &mut CSharpCodeWriter) {
        let names = &self.body.context.class_context().tag_helper_context;
        let output = format!(
            "{}.{}",
            EXECUTION_CONTEXT_VARIABLE_NAME, names.execution_context_output_property_name
        );
        writer
            .write_start_assignment(&output)
            .write("await ")
            .write_start_instance_method_invocation(RUNNER_VARIABLE_NAME, &names.run_method_name)
            .write(EXECUTION_CONTEXT_VARIABLE_NAME);
        if pass_body_buffer {
            writer
                .write_parameter_separator()
                .write(STRING_VALUE_BUFFER_VARIABLE_NAME);
        }
        writer.write_end_method_invocation(true);
    }

    fn render_output(&self, output: TagOutput, writer: &mut CSharpCodeWriter) {
        let names = &self.body.context.class_context().tag_helper_context;
        let method = match output {
            TagOutput::StartTag => &names.output_generate_start_tag_method_name,
            TagOutput::Content => &names.output_generate_content_method_name,
            TagOutput::EndTag => &names.output_generate_end_tag_method_name,
        };
        self.body.write_start_literal_call(writer);
        writer
            .write(EXECUTION_CONTEXT_VARIABLE_NAME)
            .write(".")
            .write(&names.execution_context_output_property_name)
            .write(".")
            .write_start_method_invocation(method)
            .write_end_method_invocation(false)
            .write_end_method_invocation(true);
    }
}

/// A non-string property value containing code: markup is written raw and
/// expressions are spliced in with mappings.
fn render_code_value(body: &mut CodeVisitor<'_>, value: &Chunk, writer: &mut CSharpCodeWriter) {
    match value {
        Chunk::Literal(literal) => {
            writer.write(&literal.text);
        }
        Chunk::Expression(expression) => {
            body.render_inline_code(&expression.span, &expression.code, writer);
        }
        other => {
            for child in other.children() {
                render_code_value(body, child, writer);
            }
        }
    }
}
