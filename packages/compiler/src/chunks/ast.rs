//! Chunk Tree
//!
//! The parsed-template tree the code generator consumes. Chunks arrive as
//! JSON, internally tagged by `kind`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tag_helpers::TagHelperDescriptor;
use crate::parse_util::{LocationTagged, SourceLocation, SourceSpan};

/// A single node of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Chunk {
    Literal(LiteralChunk),
    Expression(ExpressionChunk),
    ExpressionBlock(ExpressionBlockChunk),
    Statement(StatementChunk),
    Using(UsingChunk),
    TypeMember(TypeMemberChunk),
    SetBaseType(SetBaseTypeChunk),
    SetLayout(SetLayoutChunk),
    AddTagHelper(AddTagHelperChunk),
    RemoveTagHelper(RemoveTagHelperChunk),
    Helper(HelperChunk),
    Section(SectionChunk),
    Template(TemplateChunk),
    CodeAttribute(CodeAttributeChunk),
    LiteralCodeAttribute(LiteralCodeAttributeChunk),
    DynamicCodeAttribute(DynamicCodeAttributeChunk),
    TagHelper(TagHelperChunk),
    Block(ChunkBlock),
}

impl Chunk {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Chunk::Literal(c) => &c.span,
            Chunk::Expression(c) => &c.span,
            Chunk::ExpressionBlock(c) => &c.span,
            Chunk::Statement(c) => &c.span,
            Chunk::Using(c) => &c.span,
            Chunk::TypeMember(c) => &c.span,
            Chunk::SetBaseType(c) => &c.span,
            Chunk::SetLayout(c) => &c.span,
            Chunk::AddTagHelper(c) => &c.span,
            Chunk::RemoveTagHelper(c) => &c.span,
            Chunk::Helper(c) => &c.span,
            Chunk::Section(c) => &c.span,
            Chunk::Template(c) => &c.span,
            Chunk::CodeAttribute(c) => &c.span,
            Chunk::LiteralCodeAttribute(c) => &c.span,
            Chunk::DynamicCodeAttribute(c) => &c.span,
            Chunk::TagHelper(c) => &c.span,
            Chunk::Block(c) => &c.span,
        }
    }

    /// Children of container chunks; leaves have none.
    pub fn children(&self) -> &[Chunk] {
        match self.children_ref() {
            Some(children) => children,
            None => &[],
        }
    }

    pub fn is_container(&self) -> bool {
        self.children_ref().is_some()
    }

    fn children_ref(&self) -> Option<&Vec<Chunk>> {
        match self {
            Chunk::ExpressionBlock(c) => Some(&c.children),
            Chunk::Helper(c) => Some(&c.children),
            Chunk::Section(c) => Some(&c.children),
            Chunk::Template(c) => Some(&c.children),
            Chunk::CodeAttribute(c) => Some(&c.children),
            Chunk::LiteralCodeAttribute(c) => Some(&c.children),
            Chunk::DynamicCodeAttribute(c) => Some(&c.children),
            Chunk::TagHelper(c) => Some(&c.children),
            Chunk::Block(c) => Some(&c.children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Chunk>> {
        match self {
            Chunk::ExpressionBlock(c) => Some(&mut c.children),
            Chunk::Helper(c) => Some(&mut c.children),
            Chunk::Section(c) => Some(&mut c.children),
            Chunk::Template(c) => Some(&mut c.children),
            Chunk::CodeAttribute(c) => Some(&mut c.children),
            Chunk::LiteralCodeAttribute(c) => Some(&mut c.children),
            Chunk::DynamicCodeAttribute(c) => Some(&mut c.children),
            Chunk::TagHelper(c) => Some(&mut c.children),
            Chunk::Block(c) => Some(&mut c.children),
            _ => None,
        }
    }

    /// The text of a value that is nothing but markup: a bare literal, or a
    /// block whose only child is a literal.
    pub fn plain_text(&self) -> Option<&LiteralChunk> {
        match self {
            Chunk::Literal(literal) => Some(literal),
            Chunk::Block(block) => match block.children.as_slice() {
                [Chunk::Literal(literal)] => Some(literal),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Raw markup text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralChunk {
    pub span: SourceSpan,
    pub text: String,
}

/// `@expr`: code whose value is written to the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionChunk {
    pub span: SourceSpan,
    pub code: String,
}

/// `@(...)`: an explicit expression made of several chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionBlockChunk {
    pub span: SourceSpan,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// `@{ ... }`: statements copied verbatim into the execute method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementChunk {
    pub span: SourceSpan,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsingChunk {
    pub span: SourceSpan,
    pub namespace: String,
}

/// `@functions { ... }`: members copied into the class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMemberChunk {
    pub span: SourceSpan,
    pub code: String,
}

/// `@inherits Type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBaseTypeChunk {
    pub span: SourceSpan,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLayoutChunk {
    pub span: SourceSpan,
    pub layout_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTagHelperChunk {
    pub span: SourceSpan,
    pub lookup_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTagHelperChunk {
    pub span: SourceSpan,
    pub lookup_text: String,
}

/// `@helper Name(args) { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperChunk {
    pub span: SourceSpan,
    pub signature: LocationTagged<String>,
    #[serde(default)]
    pub footer: LocationTagged<String>,
    /// False when the parser could not read a full header; the body lambda is omitted.
    pub header_complete: bool,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChunk {
    pub span: SourceSpan,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// Inline `@<tag>...</tag>` template passed as an `item => ...` lambda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateChunk {
    pub span: SourceSpan,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// An HTML attribute whose value contains code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAttributeChunk {
    pub span: SourceSpan,
    pub attribute: String,
    pub prefix: LocationTagged<String>,
    pub suffix: LocationTagged<String>,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// A literal piece of an attribute value. When `value` is absent the
/// children are rendered through a buffered writer instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralCodeAttributeChunk {
    pub span: SourceSpan,
    pub prefix: LocationTagged<String>,
    #[serde(default)]
    pub value: Option<LocationTagged<String>>,
    #[serde(default)]
    pub value_location: SourceLocation,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// A code piece of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicCodeAttributeChunk {
    pub span: SourceSpan,
    pub prefix: LocationTagged<String>,
    pub value_location: SourceLocation,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// An element bound to one or more tag helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHelperChunk {
    pub span: SourceSpan,
    pub tag_name: String,
    /// Attribute values in document order.
    #[serde(default)]
    pub attributes: IndexMap<String, Chunk>,
    #[serde(default)]
    pub descriptors: Vec<TagHelperDescriptor>,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// Generic grouping node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkBlock {
    pub span: SourceSpan,
    #[serde(default)]
    pub children: Vec<Chunk>,
}

/// A whole parsed template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeTree {
    pub chunks: Vec<Chunk>,
}

impl CodeTree {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        CodeTree { chunks }
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
