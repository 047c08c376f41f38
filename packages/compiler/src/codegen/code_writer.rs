//! Code Writer
//!
//! Line-aware text buffer. Tracks the absolute, line and column position of
//! everything written so far and applies pending indentation lazily, the
//! first time something is written on a fresh line.

use std::fmt;

use crate::parse_util::SourceLocation;

#[derive(Debug, Clone)]
pub struct CodeWriter {
    buffer: String,
    new_line: String,
    at_line_start: bool,
    current_indent: usize,
    location: SourceLocation,
}

impl Default for CodeWriter {
    fn default() -> Self {
        CodeWriter::new("\n")
    }
}

impl CodeWriter {
    pub fn new(new_line: &str) -> Self {
        CodeWriter {
            buffer: String::new(),
            new_line: new_line.to_string(),
            at_line_start: true,
            current_indent: 0,
            location: SourceLocation::ZERO,
        }
    }

    pub fn new_line(&self) -> &str {
        &self.new_line
    }

    pub fn current_indent(&self) -> usize {
        self.current_indent
    }

    pub fn reset_indent(&mut self) -> &mut Self {
        self.set_indent(0)
    }

    pub fn set_indent(&mut self, size: usize) -> &mut Self {
        self.current_indent = size;
        self
    }

    pub fn increase_indent(&mut self, size: usize) -> &mut Self {
        self.current_indent += size;
        self
    }

    pub fn decrease_indent(&mut self, size: usize) -> &mut Self {
        self.current_indent = self.current_indent.saturating_sub(size);
        self
    }

    /// Writes `size` spaces, but only at the start of a line.
    pub fn indent(&mut self, size: usize) -> &mut Self {
        if self.at_line_start {
            let padding = " ".repeat(size);
            self.append(&padding);
            self.at_line_start = false;
        }
        self
    }

    /// Writes `data`, first applying the current indent if a line was just ended.
    ///
    /// Line breaks embedded in `data` advance the location but do not re-arm
    /// indentation; only [`write_line`](Self::write_line) and
    /// [`end_line`](Self::end_line) do.
    pub fn write(&mut self, data: &str) -> &mut Self {
        let indent = self.current_indent;
        self.indent(indent);
        self.append(data);
        self
    }

    pub fn write_line(&mut self, data: &str) -> &mut Self {
        self.write(data).end_line()
    }

    /// Ends the current line without writing anything else.
    pub fn end_line(&mut self) -> &mut Self {
        let new_line = std::mem::take(&mut self.new_line);
        self.append(&new_line);
        self.new_line = new_line;
        self.at_line_start = true;
        self
    }

    fn append(&mut self, data: &str) {
        self.buffer.push_str(data);
        self.location = self.location.advance(data);
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Number of characters written.
    pub fn len(&self) -> usize {
        self.location.absolute_index
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn last_char(&self) -> Option<char> {
        self.buffer.chars().next_back()
    }

    pub fn last_char_is_whitespace(&self) -> bool {
        self.last_char().map_or(false, char::is_whitespace)
    }

    pub fn ends_with_new_line(&self) -> bool {
        self.buffer.ends_with(self.new_line.as_str())
    }

    pub fn code(&self) -> &str {
        &self.buffer
    }

    pub fn into_code(self) -> String {
        self.buffer
    }
}

impl fmt::Display for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
