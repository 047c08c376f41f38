//! Emits the template's `using` directives, each mapped back to the template,
//! then any host default imports the template did not already bring in.

use indexmap::IndexSet;

use crate::chunks::{Chunk, UsingChunk};
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::error::Result;

/// Always imported; the execute method is async.
const TASKS_NAMESPACE: &str = "System.Threading.Tasks";

pub struct UsingVisitor<'a> {
    context: &'a CodeGeneratorContext,
    imported_namespaces: IndexSet<String>,
}

impl<'a> UsingVisitor<'a> {
    pub fn new(context: &'a CodeGeneratorContext) -> Self {
        UsingVisitor {
            context,
            imported_namespaces: IndexSet::new(),
        }
    }

    pub fn imported_namespaces(&self) -> &IndexSet<String> {
        &self.imported_namespaces
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)?;

        let defaults = self
            .context
            .host
            .namespace_imports
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(TASKS_NAMESPACE));
        for namespace in defaults {
            if self.imported_namespaces.insert(namespace.to_string()) {
                writer.write_using(namespace, true);
            }
        }
        Ok(())
    }
}

impl ChunkVisitor for UsingVisitor<'_> {
    fn visit_using(&mut self, chunk: &UsingChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        self.imported_namespaces.insert(chunk.namespace.clone());
        {
            let mut mapping = writer.build_line_mapping(
                chunk.span.start,
                Some(chunk.span.length),
                self.context.source_file_name(),
            );
            mapping.write_using(&chunk.namespace, false);
        }
        writer.write_line(";");
        Ok(())
    }
}
