//! Tag Helper Attribute Value Renderers
//!
//! Hook that lets a host wrap the value assigned to a tag helper property.

use crate::chunks::TagHelperAttributeDescriptor;
use crate::error::Result;

use super::csharp_code_writer::CSharpCodeWriter;
use super::expression_helper;

/// Writes the value of a bound tag helper property.
///
/// `render_value` writes the value as the generator would by default; an
/// implementation may surround it or replace it. `plain_text` is the
/// attribute's text when the value has no code in it.
pub trait TagHelperAttributeValueRenderer {
    fn render_attribute_value(
        &self,
        attribute: &TagHelperAttributeDescriptor,
        writer: &mut CSharpCodeWriter,
        plain_text: Option<&str>,
        render_value: &mut dyn FnMut(&mut CSharpCodeWriter) -> Result<()>,
    ) -> Result<()>;
}

/// Writes values unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAttributeValueRenderer;

impl TagHelperAttributeValueRenderer for DefaultAttributeValueRenderer {
    fn render_attribute_value(
        &self,
        _attribute: &TagHelperAttributeDescriptor,
        writer: &mut CSharpCodeWriter,
        _plain_text: Option<&str>,
        render_value: &mut dyn FnMut(&mut CSharpCodeWriter) -> Result<()>,
    ) -> Result<()> {
        render_value(writer)
    }
}

pub const MODEL_EXPRESSION_TYPE_NAME: &str = "Microsoft.AspNet.Mvc.Rendering.ModelExpression";
const CREATE_MODEL_EXPRESSION_METHOD_NAME: &str = "CreateModelExpression";
const MODEL_LAMBDA_VARIABLE_NAME: &str = "__model";

/// Turns values of model-expression properties into
/// `CreateModelExpression(__model => __model.Path)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelExpressionAttributeValueRenderer;

impl TagHelperAttributeValueRenderer for ModelExpressionAttributeValueRenderer {
    fn render_attribute_value(
        &self,
        attribute: &TagHelperAttributeDescriptor,
        writer: &mut CSharpCodeWriter,
        plain_text: Option<&str>,
        render_value: &mut dyn FnMut(&mut CSharpCodeWriter) -> Result<()>,
    ) -> Result<()> {
        if attribute.type_name != MODEL_EXPRESSION_TYPE_NAME {
            return render_value(writer);
        }

        if let Some(text) = plain_text {
            let lambda = format!(
                "{0} => {0}.{1}",
                MODEL_LAMBDA_VARIABLE_NAME,
                text.trim()
            );
            expression_helper::get_expression_text(&lambda)?;
        }

        let prefix = format!("{0} => {0}.", MODEL_LAMBDA_VARIABLE_NAME);
        writer
            .write_start_method_invocation(CREATE_MODEL_EXPRESSION_METHOD_NAME)
            .write(&prefix);
        render_value(writer)?;
        writer.write_end_method_invocation(false);
        Ok(())
    }
}
