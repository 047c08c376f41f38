//! Writing Scopes
//!
//! Guards that open a construct on creation and close it when dropped, so
//! nested generated blocks always balance. Each guard borrows the writer and
//! derefs to it, letting callers keep writing through the guard.

use std::ops::{Deref, DerefMut};

use super::csharp_code_writer::CSharpCodeWriter;

type OnClose = Box<dyn FnOnce(&mut CSharpCodeWriter)>;

/// A `{ ... }` block, indented one tab stop.
pub struct CodeWritingScope<'w> {
    writer: &'w mut CSharpCodeWriter,
    tab_size: usize,
    start_indent: usize,
    on_close: Option<OnClose>,
}

impl<'w> CodeWritingScope<'w> {
    pub fn new(writer: &'w mut CSharpCodeWriter, on_close: Option<OnClose>) -> Self {
        let tab_size = writer.tab_size();
        if !writer.is_empty() && !writer.last_char_is_whitespace() {
            writer.write(" ");
        }
        writer.write_line("{");
        writer.increase_indent(tab_size);
        let start_indent = writer.current_indent();
        CodeWritingScope {
            writer,
            tab_size,
            start_indent,
            on_close,
        }
    }
}

impl Deref for CodeWritingScope<'_> {
    type Target = CSharpCodeWriter;

    fn deref(&self) -> &CSharpCodeWriter {
        self.writer
    }
}

impl DerefMut for CodeWritingScope<'_> {
    fn deref_mut(&mut self) -> &mut CSharpCodeWriter {
        self.writer
    }
}

impl Drop for CodeWritingScope<'_> {
    fn drop(&mut self) {
        if !self.writer.last_char_is_whitespace() {
            self.writer.end_line();
        }
        // Someone else changed the indent inside the block; leave it alone.
        if self.writer.current_indent() == self.start_indent {
            self.writer.decrease_indent(self.tab_size);
        }
        self.writer.write_line("}");
        if let Some(on_close) = self.on_close.take() {
            on_close(self.writer);
        }
    }
}

/// `#pragma warning disable N` ... `#pragma warning restore N`.
pub struct DisableWarningScope<'w> {
    writer: &'w mut CSharpCodeWriter,
    warning: u32,
}

impl<'w> DisableWarningScope<'w> {
    pub fn new(writer: &'w mut CSharpCodeWriter, warning: u32) -> Self {
        writer.write_pragma(&format!("warning disable {}", warning));
        DisableWarningScope { writer, warning }
    }
}

impl Deref for DisableWarningScope<'_> {
    type Target = CSharpCodeWriter;

    fn deref(&self) -> &CSharpCodeWriter {
        self.writer
    }
}

impl DerefMut for DisableWarningScope<'_> {
    fn deref_mut(&mut self) -> &mut CSharpCodeWriter {
        self.writer
    }
}

impl Drop for DisableWarningScope<'_> {
    fn drop(&mut self) {
        let value = format!("warning restore {}", self.warning);
        self.writer.write_pragma(&value);
    }
}
