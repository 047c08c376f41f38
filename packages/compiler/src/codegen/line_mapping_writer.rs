//! Line Mapping Writer
//!
//! Guard recording one template-to-generated mapping, optionally fenced by
//! `#line N "file"` / `#line default` / `#line hidden` pragmas. Indentation
//! is suspended while the guard is alive so mapped code lands at its
//! template column.

use std::ops::{Deref, DerefMut};

use super::csharp_code_writer::CSharpCodeWriter;
use super::line_mapping::PendingLineMapping;
use crate::parse_util::SourceLocation;

pub struct LineMappingWriter<'w> {
    writer: &'w mut CSharpCodeWriter,
    pending: Option<PendingLineMapping>,
    write_pragmas: bool,
    start_indent: usize,
}

impl<'w> LineMappingWriter<'w> {
    pub(crate) fn new(
        writer: &'w mut CSharpCodeWriter,
        document_location: Option<SourceLocation>,
        content_length: Option<usize>,
        source_file: Option<&str>,
    ) -> Self {
        let start_indent = writer.current_indent();
        writer.reset_indent();

        if let (Some(file), Some(location)) = (source_file, document_location) {
            writer.write_line_number_directive(location.line_index + 1, file);
        }

        let generated_start = writer.location();
        let pending = document_location
            .map(|location| PendingLineMapping::new(location, content_length, generated_start));

        LineMappingWriter {
            writer,
            pending,
            write_pragmas: source_file.is_some(),
            start_indent,
        }
    }

    pub(crate) fn pragma_only(
        writer: &'w mut CSharpCodeWriter,
        document_location: SourceLocation,
        source_file: &str,
    ) -> Self {
        let mut pragma = LineMappingWriter::new(
            writer,
            Some(document_location),
            None,
            Some(source_file),
        );
        pragma.pending = None;
        pragma
    }

    /// Moves the generated start of the mapping to the current position.
    pub fn mark_line_mapping_start(&mut self) -> &mut Self {
        let location = self.writer.location();
        if let Some(pending) = self.pending.as_mut() {
            pending.mark_start(location);
        }
        self
    }

    /// Fixes the generated length at the current position.
    pub fn mark_line_mapping_end(&mut self) -> &mut Self {
        let location = self.writer.location();
        if let Some(pending) = self.pending.as_mut() {
            pending.mark_end(location);
        }
        self
    }
}

impl Deref for LineMappingWriter<'_> {
    type Target = CSharpCodeWriter;

    fn deref(&self) -> &CSharpCodeWriter {
        self.writer
    }
}

impl DerefMut for LineMappingWriter<'_> {
    fn deref_mut(&mut self) -> &mut CSharpCodeWriter {
        self.writer
    }
}

impl Drop for LineMappingWriter<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let mapping = pending.finish(self.writer.location());
            self.writer.line_mapping_manager_mut().push(mapping);
        }

        if self.write_pragmas {
            let ended_with_line_break = self.writer.code().ends_with('\n');
            self.writer.end_line();
            if !ended_with_line_break {
                self.writer.end_line();
            }
            self.writer.write_line_default_directive();
            self.writer.write_line_hidden_directive();
        }

        self.writer.set_indent(self.start_indent);
    }
}
