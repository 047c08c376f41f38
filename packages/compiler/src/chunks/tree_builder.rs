//! Chunk Tree Builder
//!
//! Incremental construction of a [`CodeTree`], used by parsers and tests.
//! Consecutive literals at the same nesting level are merged into one chunk.

use super::ast::*;
use crate::error::{GeneratorError, Result};
use crate::parse_util::{SourceLocation, SourceSpan};

#[derive(Debug, Default)]
pub struct ChunkTreeBuilder {
    root: Vec<Chunk>,
    open_parents: Vec<Chunk>,
}

impl ChunkTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_children(&mut self) -> &mut Vec<Chunk> {
        match self.open_parents.last_mut().and_then(Chunk::children_mut) {
            Some(children) => children,
            None => &mut self.root,
        }
    }

    pub fn add_chunk(&mut self, chunk: Chunk) -> &mut Self {
        self.current_children().push(chunk);
        self
    }

    /// Appends markup text, extending the previous literal when adjacent.
    pub fn add_literal_chunk(&mut self, text: &str, start: SourceLocation) -> &mut Self {
        let children = self.current_children();
        if let Some(Chunk::Literal(previous)) = children.last_mut() {
            previous.text.push_str(text);
            previous.span.length += text.chars().count();
            return self;
        }
        children.push(Chunk::Literal(LiteralChunk {
            span: SourceSpan::of_text(start, text),
            text: text.to_string(),
        }));
        self
    }

    pub fn add_expression_chunk(&mut self, code: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::Expression(ExpressionChunk {
            span: SourceSpan::of_text(start, code),
            code: code.to_string(),
        }))
    }

    pub fn add_statement_chunk(&mut self, code: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::Statement(StatementChunk {
            span: SourceSpan::of_text(start, code),
            code: code.to_string(),
        }))
    }

    pub fn add_type_member_chunk(&mut self, code: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::TypeMember(TypeMemberChunk {
            span: SourceSpan::of_text(start, code),
            code: code.to_string(),
        }))
    }

    /// `span` covers the whole `using X` directive text.
    pub fn add_using_chunk(&mut self, namespace: &str, span: SourceSpan) -> &mut Self {
        self.add_chunk(Chunk::Using(UsingChunk {
            span,
            namespace: namespace.to_string(),
        }))
    }

    pub fn add_set_base_type_chunk(&mut self, type_name: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::SetBaseType(SetBaseTypeChunk {
            span: SourceSpan::of_text(start, type_name),
            type_name: type_name.to_string(),
        }))
    }

    pub fn add_set_layout_chunk(&mut self, layout_path: &str, span: SourceSpan) -> &mut Self {
        self.add_chunk(Chunk::SetLayout(SetLayoutChunk {
            span,
            layout_path: layout_path.to_string(),
        }))
    }

    pub fn add_add_tag_helper_chunk(&mut self, lookup_text: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::AddTagHelper(AddTagHelperChunk {
            span: SourceSpan::of_text(start, lookup_text),
            lookup_text: lookup_text.to_string(),
        }))
    }

    pub fn add_remove_tag_helper_chunk(&mut self, lookup_text: &str, start: SourceLocation) -> &mut Self {
        self.add_chunk(Chunk::RemoveTagHelper(RemoveTagHelperChunk {
            span: SourceSpan::of_text(start, lookup_text),
            lookup_text: lookup_text.to_string(),
        }))
    }

    /// Opens a container; following chunks become its children until
    /// [`end_parent_chunk`](Self::end_parent_chunk).
    pub fn start_parent_chunk(&mut self, parent: Chunk) -> Result<&mut Self> {
        if !parent.is_container() {
            return Err(GeneratorError::InvalidChunkTree(format!(
                "chunk at {} cannot hold children",
                parent.span()
            )));
        }
        self.open_parents.push(parent);
        Ok(self)
    }

    pub fn end_parent_chunk(&mut self) -> Result<&mut Self> {
        let parent = self.open_parents.pop().ok_or_else(|| {
            GeneratorError::InvalidChunkTree("no parent chunk is open".to_string())
        })?;
        Ok(self.add_chunk(parent))
    }

    pub fn build(self) -> Result<CodeTree> {
        if let Some(open) = self.open_parents.last() {
            return Err(GeneratorError::InvalidChunkTree(format!(
                "{} parent chunk(s) left open, innermost at {}",
                self.open_parents.len(),
                open.span()
            )));
        }
        Ok(CodeTree::new(self.root))
    }
}
