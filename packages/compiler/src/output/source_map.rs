//! Source Map Export
//!
//! Serializes a line mapping table as a version 3 source map so tools that
//! do not understand `#line` pragmas can still navigate from generated C#
//! back to the template.

use serde::{Deserialize, Serialize};

use crate::codegen::line_mapping::LineMapping;
use crate::error::{GeneratorError, Result};

const VERSION: u32 = 3;
const BASE64_DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub source_root: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<Option<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One position in the generated file, optionally pointing into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    generated_line: usize,
    generated_column: usize,
    /// `(line, column)` in the template.
    source: (usize, usize),
}

/// Builds a source map for one generated file produced from one template.
#[derive(Debug, Clone)]
pub struct SourceMapBuilder {
    file: Option<String>,
    source: String,
    source_content: Option<String>,
    segments: Vec<Segment>,
}

impl SourceMapBuilder {
    pub fn new(file: Option<&str>, source: &str, source_content: Option<&str>) -> Self {
        SourceMapBuilder {
            file: file.map(str::to_string),
            source: source.to_string(),
            source_content: source_content.map(str::to_string),
            segments: Vec::new(),
        }
    }

    /// Adds a segment at the generated start of `mapping`.
    pub fn add_line_mapping(&mut self, mapping: &LineMapping) -> &mut Self {
        let generated = mapping.generated_location;
        let document = mapping.document_location;
        self.segments.push(Segment {
            generated_line: generated.line_index,
            generated_column: generated.character_index,
            source: (document.line_index, document.character_index),
        });
        self
    }

    pub fn add_line_mappings<'m>(&mut self, mappings: impl IntoIterator<Item = &'m LineMapping>) -> &mut Self {
        for mapping in mappings {
            self.add_line_mapping(mapping);
        }
        self
    }

    pub fn build(&self) -> Result<SourceMap> {
        if self.source.is_empty() {
            return Err(GeneratorError::SourceMap(
                "a source file name is required".to_string(),
            ));
        }

        // The mapping table is in recording order; the format wants output order.
        // The first mapping recorded at a position wins.
        let mut segments = self.segments.clone();
        segments.sort_by_key(|s| (s.generated_line, s.generated_column));
        segments.dedup_by(|later, earlier| {
            later.generated_line == earlier.generated_line
                && later.generated_column == earlier.generated_column
        });

        Ok(SourceMap {
            version: VERSION,
            file: self.file.clone(),
            source_root: String::new(),
            sources: vec![self.source.clone()],
            sources_content: vec![self.source_content.clone()],
            names: Vec::new(),
            mappings: encode_mappings(&segments),
        })
    }
}

fn encode_mappings(segments: &[Segment]) -> String {
    let mut mappings = String::new();
    let mut line = 0usize;
    let mut previous_column = 0i64;
    let mut previous_source_line = 0i64;
    let mut previous_source_column = 0i64;
    let mut first_on_line = true;

    for segment in segments {
        while line < segment.generated_line {
            mappings.push(';');
            line += 1;
            previous_column = 0;
            first_on_line = true;
        }
        if !first_on_line {
            mappings.push(',');
        }
        first_on_line = false;

        let column = segment.generated_column as i64;
        encode_vlq(column - previous_column, &mut mappings);
        previous_column = column;

        let source_line = segment.source.0 as i64;
        let source_column = segment.source.1 as i64;
        // Single source, so the source index delta is always zero.
        encode_vlq(0, &mut mappings);
        encode_vlq(source_line - previous_source_line, &mut mappings);
        encode_vlq(source_column - previous_source_column, &mut mappings);
        previous_source_line = source_line;
        previous_source_column = source_column;
    }
    mappings
}

fn encode_vlq(value: i64, out: &mut String) {
    let mut remaining = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = remaining & 0b1_1111;
        remaining >>= 5;
        if remaining > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_DIGITS[digit as usize] as char);
        if remaining == 0 {
            break;
        }
    }
}
