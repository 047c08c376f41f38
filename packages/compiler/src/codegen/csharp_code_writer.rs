//! C# Code Writer
//!
//! [`CodeWriter`] plus the C# constructs the generator emits: string
//! literals, `#line` pragmas, method calls, declarations and braced scopes.
//! Also owns the line mapping table filled in by [`LineMappingWriter`]s.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use super::code_writer::CodeWriter;
use super::line_mapping::{LineMapping, LineMappingManager};
use super::line_mapping_writer::LineMappingWriter;
use super::writing_scope::{CodeWritingScope, DisableWarningScope};
use crate::parse_util::{LocationTagged, SourceLocation};

/// Literals within this UTF-16 length range are written as `@"..."`.
const VERBATIM_MIN_LENGTH: usize = 256;
const VERBATIM_MAX_LENGTH: usize = 1500;
/// C-style literals are split into `"..." +` continuations every this many UTF-16 units.
const LITERAL_LINE_LENGTH: usize = 80;

lazy_static! {
    static ref C_STYLE_ESCAPES: HashMap<char, &'static str> = {
        let mut escapes = HashMap::new();
        escapes.insert('\r', "\\r");
        escapes.insert('\t', "\\t");
        escapes.insert('"', "\\\"");
        escapes.insert('\'', "\\'");
        escapes.insert('\\', "\\\\");
        escapes.insert('\0', "\\0");
        escapes.insert('\n', "\\n");
        escapes.insert('\u{2028}', "\\u2028");
        escapes.insert('\u{2029}', "\\u2029");
        escapes
    };
}

#[derive(Debug, Clone)]
pub struct CSharpCodeWriter {
    writer: CodeWriter,
    line_mapping_manager: LineMappingManager,
    tab_size: usize,
}

impl Default for CSharpCodeWriter {
    fn default() -> Self {
        CSharpCodeWriter::new("\n", 4)
    }
}

impl Deref for CSharpCodeWriter {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        &self.writer
    }
}

impl DerefMut for CSharpCodeWriter {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        &mut self.writer
    }
}

impl CSharpCodeWriter {
    pub fn new(new_line: &str, tab_size: usize) -> Self {
        CSharpCodeWriter {
            writer: CodeWriter::new(new_line),
            line_mapping_manager: LineMappingManager::new(),
            tab_size,
        }
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn line_mapping_manager(&self) -> &LineMappingManager {
        &self.line_mapping_manager
    }

    pub(crate) fn line_mapping_manager_mut(&mut self) -> &mut LineMappingManager {
        &mut self.line_mapping_manager
    }

    /// Splits the writer into generated code and recorded mappings.
    pub fn finish(self) -> (String, Vec<LineMapping>) {
        (
            self.writer.into_code(),
            self.line_mapping_manager.into_mappings(),
        )
    }

    // Chaining variants of the underlying writer's primitives.

    pub fn write(&mut self, data: &str) -> &mut Self {
        self.writer.write(data);
        self
    }

    pub fn write_line(&mut self, data: &str) -> &mut Self {
        self.writer.write_line(data);
        self
    }

    pub fn end_line(&mut self) -> &mut Self {
        self.writer.end_line();
        self
    }

    pub fn indent(&mut self, size: usize) -> &mut Self {
        self.writer.indent(size);
        self
    }

    pub fn write_string_literal(&mut self, literal: &str) -> &mut Self {
        let length = literal.encode_utf16().count();
        let rendered = if (VERBATIM_MIN_LENGTH..=VERBATIM_MAX_LENGTH).contains(&length)
            && !literal.contains('\0')
        {
            verbatim_string_literal(literal)
        } else {
            c_style_string_literal(literal, self.writer.new_line())
        };
        self.write(&rendered)
    }

    pub fn write_boolean_literal(&mut self, value: bool) -> &mut Self {
        self.write(if value { "true" } else { "false" })
    }

    /// `#line N "file"`, preceded by a line break if the output is mid-line.
    pub fn write_line_number_directive(&mut self, line_number: usize, file: &str) -> &mut Self {
        if !self.writer.is_empty() && !self.writer.ends_with_new_line() {
            self.end_line();
        }
        let directive = format!("#line {} \"{}\"", line_number, file);
        self.write_line(&directive)
    }

    pub fn write_line_default_directive(&mut self) -> &mut Self {
        self.write_line("#line default")
    }

    pub fn write_line_hidden_directive(&mut self) -> &mut Self {
        self.write_line("#line hidden")
    }

    pub fn write_pragma(&mut self, value: &str) -> &mut Self {
        self.write("#pragma ").write_line(value)
    }

    pub fn write_using(&mut self, name: &str, end_line: bool) -> &mut Self {
        self.write("using ").write(name);
        if end_line {
            self.write_line(";");
        }
        self
    }

    pub fn write_parameter_separator(&mut self) -> &mut Self {
        self.write(", ")
    }

    pub fn write_start_assignment(&mut self, name: &str) -> &mut Self {
        self.write(name).write(" = ")
    }

    pub fn write_start_return(&mut self) -> &mut Self {
        self.write("return ")
    }

    pub fn write_start_new_object(&mut self, type_name: &str) -> &mut Self {
        self.write("new ").write(type_name).write("(")
    }

    pub fn write_start_method_invocation(&mut self, method_name: &str) -> &mut Self {
        self.write(method_name).write("(")
    }

    /// `Name<A, B>(`
    pub fn write_start_generic_method_invocation(
        &mut self,
        method_name: &str,
        generic_arguments: &[&str],
    ) -> &mut Self {
        let generics = generic_arguments.join(", ");
        self.write(method_name).write("<").write(&generics).write(">(")
    }

    pub fn write_start_instance_method_invocation(
        &mut self,
        instance_name: &str,
        method_name: &str,
    ) -> &mut Self {
        self.write(instance_name).write(".").write_start_method_invocation(method_name)
    }

    /// `)` or, when `end_line` is set, `);` and a line break.
    pub fn write_end_method_invocation(&mut self, end_line: bool) -> &mut Self {
        self.write(")");
        if end_line {
            self.write_line(";");
        }
        self
    }

    /// `Name(a, b);` on its own line.
    pub fn write_method_invocation(&mut self, method_name: &str, arguments: &[&str]) -> &mut Self {
        let arguments = arguments.join(", ");
        self.write_start_method_invocation(method_name)
            .write(&arguments)
            .write_end_method_invocation(true)
    }

    pub fn write_instance_method_invocation(
        &mut self,
        instance_name: &str,
        method_name: &str,
        arguments: &[&str],
    ) -> &mut Self {
        self.write(instance_name).write(".").write_method_invocation(method_name, arguments)
    }

    /// `Type name = value;` or `Type name;` on its own line.
    pub fn write_variable_declaration(
        &mut self,
        type_name: &str,
        name: &str,
        value: Option<&str>,
    ) -> &mut Self {
        self.write(type_name).write(" ").write(name);
        if let Some(value) = value {
            self.write(" = ").write(value);
        }
        self.write_line(";")
    }

    /// `Tuple.Create("value", index)`
    pub fn write_location_tagged_string(&mut self, value: &LocationTagged<String>) -> &mut Self {
        let index = value.location.absolute_index.to_string();
        self.write_start_method_invocation("Tuple.Create")
            .write_string_literal(&value.value)
            .write_parameter_separator()
            .write(&index)
            .write_end_method_invocation(false)
    }

    /// `BeginContext(index, length, isLiteral);`
    pub fn write_start_instrumentation_context(
        &mut self,
        method_name: &str,
        absolute_index: usize,
        length: usize,
        is_literal: bool,
    ) -> &mut Self {
        let index = absolute_index.to_string();
        let length = length.to_string();
        self.write_start_method_invocation(method_name)
            .write(&index)
            .write_parameter_separator()
            .write(&length)
            .write_parameter_separator()
            .write_boolean_literal(is_literal)
            .write_end_method_invocation(true)
    }

    pub fn write_end_instrumentation_context(&mut self, method_name: &str) -> &mut Self {
        self.write_method_invocation(method_name, &[])
    }

    pub fn build_scope(&mut self) -> CodeWritingScope<'_> {
        CodeWritingScope::new(self, None)
    }

    pub fn build_namespace(&mut self, name: &str) -> CodeWritingScope<'_> {
        self.write("namespace ").write(name).end_line();
        self.build_scope()
    }

    /// `access class Name : Base, IFace` followed by a braced body.
    pub fn build_class_declaration(
        &mut self,
        accessibility: &str,
        name: &str,
        base_types: &[String],
    ) -> CodeWritingScope<'_> {
        self.write(accessibility).write(" class ").write(name);
        if !base_types.is_empty() {
            let bases = base_types.join(", ");
            self.write(" : ").write(&bases);
        }
        self.end_line();
        self.build_scope()
    }

    pub fn build_constructor(&mut self, accessibility: &str, name: &str) -> CodeWritingScope<'_> {
        self.write(accessibility).write(" ").write(name).write("()").end_line();
        self.build_scope()
    }

    /// `access ReturnType Name(Type a, Type b)` followed by a braced body.
    pub fn build_method_declaration(
        &mut self,
        accessibility: &str,
        return_type: &str,
        name: &str,
        parameters: &[(&str, &str)],
    ) -> CodeWritingScope<'_> {
        let parameters = parameters
            .iter()
            .map(|(type_name, parameter)| format!("{} {}", type_name, parameter))
            .collect::<Vec<_>>()
            .join(", ");
        self.write(accessibility)
            .write(" ")
            .write(return_type)
            .write(" ")
            .write(name)
            .write("(")
            .write(&parameters)
            .write(")")
            .end_line();
        self.build_scope()
    }

    /// `(a, b) => {`; with `end_line` the closing brace is followed by `;`.
    pub fn build_lambda(&mut self, end_line: bool, parameter_names: &[&str]) -> CodeWritingScope<'_> {
        self.write_lambda_header(false, parameter_names);
        CodeWritingScope::new(self, lambda_terminator(end_line))
    }

    /// `async(a) => {`
    pub fn build_async_lambda(
        &mut self,
        end_line: bool,
        parameter_names: &[&str],
    ) -> CodeWritingScope<'_> {
        self.write_lambda_header(true, parameter_names);
        CodeWritingScope::new(self, lambda_terminator(end_line))
    }

    fn write_lambda_header(&mut self, is_async: bool, parameter_names: &[&str]) {
        if is_async {
            self.write("async");
        }
        let parameters = parameter_names.join(", ");
        self.write("(").write(&parameters).write(") => ");
    }

    pub fn build_disable_warning_scope(&mut self, warning: u32) -> DisableWarningScope<'_> {
        DisableWarningScope::new(self, warning)
    }

    /// Mapping wrapped in `#line` pragmas pointing back at `source_file`.
    pub fn build_line_mapping(
        &mut self,
        document_location: SourceLocation,
        content_length: Option<usize>,
        source_file: &str,
    ) -> LineMappingWriter<'_> {
        LineMappingWriter::new(self, Some(document_location), content_length, Some(source_file))
    }

    /// Mapping recorded in the table only; the output gets no pragmas.
    pub fn build_line_mapping_without_pragmas(
        &mut self,
        document_location: SourceLocation,
        content_length: Option<usize>,
    ) -> LineMappingWriter<'_> {
        LineMappingWriter::new(self, Some(document_location), content_length, None)
    }

    /// `#line` pragmas around content that is not recorded as a mapping.
    pub fn build_line_pragma(
        &mut self,
        document_location: SourceLocation,
        source_file: &str,
    ) -> LineMappingWriter<'_> {
        LineMappingWriter::pragma_only(self, document_location, source_file)
    }
}

fn lambda_terminator(end_line: bool) -> Option<Box<dyn FnOnce(&mut CSharpCodeWriter)>> {
    if end_line {
        Some(Box::new(|writer: &mut CSharpCodeWriter| {
            writer.write_line(";");
        }))
    } else {
        None
    }
}

fn verbatim_string_literal(literal: &str) -> String {
    let mut rendered = String::with_capacity(literal.len() + 3);
    rendered.push_str("@\"");
    for ch in literal.chars() {
        if ch == '"' {
            rendered.push_str("\"\"");
        } else {
            rendered.push(ch);
        }
    }
    rendered.push('"');
    rendered
}

fn c_style_string_literal(literal: &str, new_line: &str) -> String {
    let mut rendered = String::with_capacity(literal.len() + 2);
    rendered.push('"');
    // `index` counts UTF-16 code units, matching the length the runtime sees.
    let mut index = 0usize;
    for ch in literal.chars() {
        match C_STYLE_ESCAPES.get(&ch) {
            Some(escaped) => rendered.push_str(escaped),
            None => rendered.push(ch),
        }

        let width = ch.len_utf16();
        // A surrogate pair is never split; a break due inside it moves after it.
        let break_due = (index > 0 && index % LITERAL_LINE_LENGTH == 0)
            || (width == 2 && (index + 1) % LITERAL_LINE_LENGTH == 0);
        if break_due {
            rendered.push_str("\" +");
            rendered.push_str(new_line);
            rendered.push('"');
        }
        index += width;
    }
    rendered.push('"');
    rendered
}
