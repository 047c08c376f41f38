//! Parse Util
//!
//! Source positions shared by the chunk tree and the generated-code writer.
//! All indices count characters, never bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position inside a text buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Offset from the start of the buffer.
    pub absolute_index: usize,
    /// Zero-based line.
    pub line_index: usize,
    /// Zero-based column within the line.
    pub character_index: usize,
}

impl SourceLocation {
    pub const ZERO: SourceLocation = SourceLocation {
        absolute_index: 0,
        line_index: 0,
        character_index: 0,
    };

    pub fn new(absolute_index: usize, line_index: usize, character_index: usize) -> Self {
        SourceLocation {
            absolute_index,
            line_index,
            character_index,
        }
    }

    /// Location reached after `text` is written starting at `self`.
    ///
    /// `"\r\n"` is a single line break; a lone `'\r'` or `'\n'` also breaks the line.
    pub fn advance(self, text: &str) -> SourceLocation {
        let mut location = self;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            location.absolute_index += 1;
            match ch {
                '\r' if chars.peek() == Some(&'\n') => location.character_index += 1,
                '\r' | '\n' => {
                    location.line_index += 1;
                    location.character_index = 0;
                }
                _ => location.character_index += 1,
            }
        }
        location
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}:{},{})",
            self.absolute_index, self.line_index, self.character_index
        )
    }
}

/// A run of template text: where it starts and how many characters it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub length: usize,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, length: usize) -> Self {
        SourceSpan { start, length }
    }

    /// Span covering `text` starting at `start`.
    pub fn of_text(start: SourceLocation, text: &str) -> Self {
        SourceSpan {
            start,
            length: text.chars().count(),
        }
    }

    /// Absolute index one past the last covered character.
    pub fn end_index(&self) -> usize {
        self.start.absolute_index + self.length
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.start, self.length)
    }
}

/// A value paired with the template location it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationTagged<T> {
    pub value: T,
    pub location: SourceLocation,
}

impl<T> LocationTagged<T> {
    pub fn new(value: T, location: SourceLocation) -> Self {
        LocationTagged { value, location }
    }
}

impl LocationTagged<String> {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}
