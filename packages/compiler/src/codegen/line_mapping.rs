//! Line Mappings
//!
//! Correspondences between template spans and generated-code spans, kept in
//! the order they were recorded.

use serde::{Deserialize, Serialize};

use crate::parse_util::SourceLocation;

/// A location plus the number of characters mapped from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingLocation {
    pub absolute_index: usize,
    pub line_index: usize,
    pub character_index: usize,
    pub content_length: usize,
}

impl MappingLocation {
    pub fn new(location: SourceLocation, content_length: usize) -> Self {
        MappingLocation {
            absolute_index: location.absolute_index,
            line_index: location.line_index,
            character_index: location.character_index,
            content_length,
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.absolute_index, self.line_index, self.character_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMapping {
    pub document_location: MappingLocation,
    pub generated_location: MappingLocation,
}

/// A mapping whose generated side is still being written.
///
/// The generated start defaults to where the mapping was opened and can be
/// moved with [`mark_start`](Self::mark_start); the generated length is
/// either marked explicitly or measured when the mapping is finished.
#[derive(Debug, Clone, Copy)]
pub struct PendingLineMapping {
    document: SourceLocation,
    document_length: Option<usize>,
    generated_start: SourceLocation,
    generated_length: Option<usize>,
}

impl PendingLineMapping {
    /// `document_length` of `None` adopts the generated length.
    pub fn new(
        document: SourceLocation,
        document_length: Option<usize>,
        generated_start: SourceLocation,
    ) -> Self {
        PendingLineMapping {
            document,
            document_length,
            generated_start,
            generated_length: None,
        }
    }

    pub fn mark_start(&mut self, location: SourceLocation) {
        self.generated_start = location;
    }

    pub fn mark_end(&mut self, location: SourceLocation) {
        self.generated_length = Some(
            location
                .absolute_index
                .saturating_sub(self.generated_start.absolute_index),
        );
    }

    pub fn finish(self, end: SourceLocation) -> LineMapping {
        let generated_length = self.generated_length.unwrap_or_else(|| {
            end.absolute_index
                .saturating_sub(self.generated_start.absolute_index)
        });
        let document_length = self.document_length.unwrap_or(generated_length);
        LineMapping {
            document_location: MappingLocation::new(self.document, document_length),
            generated_location: MappingLocation::new(self.generated_start, generated_length),
        }
    }
}

/// Append-only table of recorded mappings.
#[derive(Debug, Clone, Default)]
pub struct LineMappingManager {
    mappings: Vec<LineMapping>,
}

impl LineMappingManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mapping(&mut self, document_location: MappingLocation, generated_location: MappingLocation) {
        self.push(LineMapping {
            document_location,
            generated_location,
        });
    }

    pub fn push(&mut self, mapping: LineMapping) {
        tracing::trace!(
            document = %mapping.document_location.location(),
            generated = %mapping.generated_location.location(),
            length = mapping.generated_location.content_length,
            "line mapping"
        );
        self.mappings.push(mapping);
    }

    pub fn mappings(&self) -> &[LineMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn into_mappings(self) -> Vec<LineMapping> {
        self.mappings
    }
}
