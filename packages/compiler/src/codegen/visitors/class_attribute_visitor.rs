//! Writes the host's class-level attributes above the class declaration.

use crate::codegen::context::CodeGeneratorContext;
use crate::codegen::csharp_code_writer::CSharpCodeWriter;

pub struct ClassAttributeVisitor<'a> {
    context: &'a CodeGeneratorContext,
}

impl<'a> ClassAttributeVisitor<'a> {
    pub fn new(context: &'a CodeGeneratorContext) -> Self {
        ClassAttributeVisitor { context }
    }

    pub fn accept(&self, writer: &mut CSharpCodeWriter) {
        for attribute in &self.context.host.class_attributes {
            let attribute = attribute.trim().trim_start_matches('[').trim_end_matches(']');
            if attribute.is_empty() {
                continue;
            }
            writer.write("[").write(attribute).write_line("]");
        }
    }
}
