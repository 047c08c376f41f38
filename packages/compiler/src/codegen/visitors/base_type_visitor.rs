//! Finds the class's base type. The last `@inherits` in the template wins.

use crate::chunks::{Chunk, SetBaseTypeChunk};
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct BaseTypeVisitor {
    current_base_type: Option<String>,
}

impl BaseTypeVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)
    }

    pub fn current_base_type(&self) -> Option<&str> {
        self.current_base_type.as_deref()
    }
}

impl ChunkVisitor for BaseTypeVisitor {
    fn visit_set_base_type(&mut self, chunk: &SetBaseTypeChunk, _writer: &mut CSharpCodeWriter) -> Result<()> {
        if let Some(previous) = self.current_base_type.as_deref() {
            if previous != chunk.type_name {
                tracing::debug!(
                    previous,
                    replacement = %chunk.type_name,
                    "base type declared more than once; keeping the last"
                );
            }
        }
        self.current_base_type = Some(chunk.type_name.clone());
        Ok(())
    }
}
