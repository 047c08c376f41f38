//! Declares the class fields tag helper rendering relies on: the shared
//! runtime objects once, then one field per distinct helper type.

use std::collections::HashSet;

use crate::chunks::{Chunk, TagHelperChunk};
use crate::codegen::chunk_visitor::{visit_all, ChunkVisitor};
use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;
use crate::codegen::tag_helper_renderer::{
    EXECUTION_CONTEXT_VARIABLE_NAME, RUNNER_VARIABLE_NAME, SCOPE_MANAGER_VARIABLE_NAME,
    STRING_VALUE_BUFFER_VARIABLE_NAME,
};
use crate::error::Result;

const TEXT_WRITER_TYPE_NAME: &str = "System.IO.TextWriter";

pub struct TagHelperFieldDeclarationVisitor<'a> {
    context: &'a CodeGeneratorContext,
    declared_types: HashSet<String>,
    runtime_fields_declared: bool,
}

impl<'a> TagHelperFieldDeclarationVisitor<'a> {
    pub fn new(context: &'a CodeGeneratorContext) -> Self {
        TagHelperFieldDeclarationVisitor {
            context,
            declared_types: HashSet::new(),
            runtime_fields_declared: false,
        }
    }

    pub fn accept(&mut self, chunks: &[Chunk], writer: &mut CSharpCodeWriter) -> Result<()> {
        visit_all(self, chunks, writer)
    }

    fn declare_runtime_fields(&mut self, writer: &mut CSharpCodeWriter) {
        if self.runtime_fields_declared {
            return;
        }
        self.runtime_fields_declared = true;

        writer.write_line_hidden_directive();
        writer
            .write("private ")
            .write_variable_declaration(TEXT_WRITER_TYPE_NAME, STRING_VALUE_BUFFER_VARIABLE_NAME, None);

        if self.context.design_time_mode() {
            return;
        }
        let names = &self.context.class_context().tag_helper_context;
        let execution_context_type = format!("global::{}", names.execution_context_type_name);
        let runner_type = format!("global::{}", names.runner_type_name);
        let scope_manager_type = format!("global::{}", names.scope_manager_type_name);
        writer
            .write("private ")
            .write_variable_declaration(&execution_context_type, EXECUTION_CONTEXT_VARIABLE_NAME, None);
        writer.write("private ").write_variable_declaration(
            &runner_type,
            RUNNER_VARIABLE_NAME,
            Some(&format!("new {}()", runner_type)),
        );
        writer.write("private ").write_variable_declaration(
            &scope_manager_type,
            SCOPE_MANAGER_VARIABLE_NAME,
            Some(&format!("new {}()", scope_manager_type)),
        );
    }
}

impl ChunkVisitor for TagHelperFieldDeclarationVisitor<'_> {
    fn visit_tag_helper(&mut self, chunk: &TagHelperChunk, writer: &mut CSharpCodeWriter) -> Result<()> {
        self.declare_runtime_fields(writer);

        for descriptor in &chunk.descriptors {
            if self.declared_types.insert(descriptor.type_name.clone()) {
                let type_name = format!("global::{}", descriptor.type_name);
                writer
                    .write("private ")
                    .write_variable_declaration(&type_name, &descriptor.variable_name(), None);
            }
        }

        visit_all(self, &chunk.children, writer)
    }
}
