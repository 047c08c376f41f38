//! C# Code Builder
//!
//! Lays out the generated file and runs the passes in order:
//!
//! ```text
//! namespace Ns
//! {
//!     usings                    (UsingVisitor)
//!     [attributes]              (ClassAttributeVisitor)
//!     public class Name : Base  (BaseTypeVisitor)
//!     {
//!         helpers, members, tag helper fields
//!         design-time helpers
//!         constructor
//!         execute method        (CodeVisitor)
//!     }
//! }
//! ```

use crate::chunks::CodeTree;
use crate::error::Result;

use super::attribute_value_renderer::TagHelperAttributeValueRenderer;
use super::context::CodeGeneratorContext;
use super::csharp_code_writer::CSharpCodeWriter;
use super::line_mapping::LineMapping;
use super::visitors::code_visitor::DESIGN_TIME_VALUE_NAME;
use super::visitors::*;

/// CS1998: async method without await, common for static templates.
const ASYNC_WITHOUT_AWAIT_WARNING: u32 = 1998;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuilderResult {
    pub code: String,
    pub line_mappings: Vec<LineMapping>,
}

pub struct CSharpCodeBuilder<'r> {
    context: CodeGeneratorContext,
    attribute_value_renderer: &'r dyn TagHelperAttributeValueRenderer,
}

impl<'r> CSharpCodeBuilder<'r> {
    pub fn new(
        context: CodeGeneratorContext,
        attribute_value_renderer: &'r dyn TagHelperAttributeValueRenderer,
    ) -> Self {
        CSharpCodeBuilder {
            context,
            attribute_value_renderer,
        }
    }

    pub fn build(mut self, tree: &CodeTree) -> Result<CodeBuilderResult> {
        let mut writer = CSharpCodeWriter::new(&self.context.host.new_line, self.context.host.tab_size);

        if self.context.root_namespace.is_empty() {
            self.write_namespace_body(tree, &mut writer)?;
        } else {
            let namespace = self.context.root_namespace.clone();
            let mut scope = writer.build_namespace(&namespace);
            self.write_namespace_body(tree, &mut scope)?;
        }

        let (code, line_mappings) = writer.finish();
        tracing::debug!(
            chars = code.chars().count(),
            mappings = line_mappings.len(),
            "generated class {}",
            self.context.class_name
        );
        Ok(CodeBuilderResult {
            code,
            line_mappings,
        })
    }

    fn write_namespace_body(&mut self, tree: &CodeTree, writer: &mut CSharpCodeWriter) -> Result<()> {
        UsingVisitor::new(&self.context).accept(&tree.chunks, writer)?;
        writer.end_line();

        let mut base_type_visitor = BaseTypeVisitor::new();
        base_type_visitor.accept(&tree.chunks, writer)?;
        let base_types: Vec<String> = base_type_visitor
            .current_base_type()
            .map(str::to_string)
            .or_else(|| self.context.host.default_base_class.clone())
            .into_iter()
            .filter(|base_type| !base_type.is_empty())
            .collect();
        tracing::debug!(?base_types, "resolved base type");

        ClassAttributeVisitor::new(&self.context).accept(writer);

        let class_name = self.context.class_name.clone();
        let mut class = writer.build_class_declaration("public", &class_name, &base_types);
        if self.context.design_time_mode() {
            class.write_line(&format!("private static object @{};", DESIGN_TIME_VALUE_NAME));
        }

        HelperVisitor::new(&mut self.context, self.attribute_value_renderer)
            .accept(&tree.chunks, &mut class)?;
        TypeMemberVisitor::new(&self.context).accept(&tree.chunks, &mut class)?;
        TagHelperFieldDeclarationVisitor::new(&self.context).accept(&tree.chunks, &mut class)?;
        DesignTimeHelpersVisitor::new(&self.context).accept(&tree.chunks, &mut class)?;

        class.write_line_hidden_directive();
        drop(class.build_constructor("public", &class_name));
        class.end_line();

        let execute_method = self.context.class_context().execute_method_name.clone();
        tracing::debug!(method = %execute_method, "rendering execute method");
        let mut pragma = class.build_disable_warning_scope(ASYNC_WITHOUT_AWAIT_WARNING);
        let mut method = pragma.build_method_declaration("public override async", "Task", &execute_method, &[]);
        let mut body = CodeVisitor::new(&mut self.context, self.attribute_value_renderer);
        body.accept(&tree.chunks, &mut method)
    }
}
