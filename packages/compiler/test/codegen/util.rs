//! Chunk construction and rendering helpers shared by the generator tests.

#![allow(dead_code)]

use razor_compiler::chunks::*;
use razor_compiler::codegen::visitors::CodeVisitor;
use razor_compiler::codegen::{
    CSharpCodeWriter, CodeGeneratorContext, DefaultAttributeValueRenderer, LineMapping,
    TagHelperAttributeValueRenderer,
};
use razor_compiler::config::RazorEngineHost;
use razor_compiler::parse_util::{LocationTagged, SourceLocation, SourceSpan};
use razor_compiler::Result;

pub const TEST_FILE: &str = "test.cshtml";

pub fn loc(absolute_index: usize, line_index: usize, character_index: usize) -> SourceLocation {
    SourceLocation::new(absolute_index, line_index, character_index)
}

pub fn tagged(value: &str, location: SourceLocation) -> LocationTagged<String> {
    LocationTagged::new(value.to_string(), location)
}

pub fn literal(text: &str, start: SourceLocation) -> Chunk {
    Chunk::Literal(LiteralChunk {
        span: SourceSpan::of_text(start, text),
        text: text.to_string(),
    })
}

pub fn expression(code: &str, start: SourceLocation) -> Chunk {
    Chunk::Expression(ExpressionChunk {
        span: SourceSpan::of_text(start, code),
        code: code.to_string(),
    })
}

pub fn statement(code: &str, start: SourceLocation) -> Chunk {
    Chunk::Statement(StatementChunk {
        span: SourceSpan::of_text(start, code),
        code: code.to_string(),
    })
}

pub fn block(children: Vec<Chunk>) -> Chunk {
    Chunk::Block(ChunkBlock {
        span: SourceSpan::default(),
        children,
    })
}

pub fn tag_helper(
    tag_name: &str,
    attributes: Vec<(&str, Chunk)>,
    descriptors: Vec<TagHelperDescriptor>,
    children: Vec<Chunk>,
) -> Chunk {
    Chunk::TagHelper(TagHelperChunk {
        span: SourceSpan::default(),
        tag_name: tag_name.to_string(),
        attributes: attributes
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        descriptors,
        children,
    })
}

pub fn p_tag_helper() -> TagHelperDescriptor {
    TagHelperDescriptor::new("p", "PTagHelper")
        .with_attribute(TagHelperAttributeDescriptor::new("age", "Age", "System.Int32"))
}

pub fn input_tag_helper() -> TagHelperDescriptor {
    TagHelperDescriptor::new("input", "InputTagHelper")
        .with_attribute(TagHelperAttributeDescriptor::new("type", "Type", "System.String"))
}

pub fn input_tag_helper2() -> TagHelperDescriptor {
    TagHelperDescriptor::new("input", "InputTagHelper2")
        .with_attribute(TagHelperAttributeDescriptor::new("type", "Type", "System.String"))
        .with_attribute(TagHelperAttributeDescriptor::new("checked", "Checked", "System.Boolean"))
}

pub fn runtime_host() -> RazorEngineHost {
    RazorEngineHost::default()
}

pub fn design_time_host() -> RazorEngineHost {
    RazorEngineHost {
        design_time_mode: true,
        ..RazorEngineHost::default()
    }
}

/// Renders `chunks` the way the execute method body is rendered, on an
/// unindented writer.
pub fn try_render_body_with(
    chunks: &[Chunk],
    host: RazorEngineHost,
    source_file: Option<&str>,
    renderer: &dyn TagHelperAttributeValueRenderer,
) -> Result<(String, Vec<LineMapping>)> {
    let mut context = CodeGeneratorContext::new(host, "Test", "Razor", source_file);
    let mut writer = CSharpCodeWriter::new("\n", 4);
    {
        let mut visitor = CodeVisitor::new(&mut context, renderer);
        visitor.accept(chunks, &mut writer)?;
    }
    Ok(writer.finish())
}

pub fn render_body(chunks: &[Chunk], host: RazorEngineHost) -> (String, Vec<LineMapping>) {
    try_render_body_with(chunks, host, Some(TEST_FILE), &DefaultAttributeValueRenderer).unwrap()
}

pub fn render_body_code(chunks: &[Chunk], host: RazorEngineHost) -> String {
    render_body(chunks, host).0
}

/// `#line N "test.cshtml"` as written before a mapped span.
pub fn line_directive(line_number: usize) -> String {
    format!("#line {} \"{}\"\n", line_number, TEST_FILE)
}

pub const PRAGMA_END: &str = "\n#line default\n#line hidden\n";
