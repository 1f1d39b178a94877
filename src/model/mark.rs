//! Mark elements and per-element match outcomes.

use super::TextRange;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A mark element whose text was located in the plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    /// Position of the element in document order (0-based)
    pub index: usize,

    /// Ordinal attribute, if present and numeric
    pub ordinal: Option<u32>,

    /// Text content of the element
    pub text: String,

    /// Location in the plain text, in the extraction's code units
    pub range: TextRange,

    /// Byte offset of the text in the plain text
    pub byte_start: usize,

    /// Exclusive byte end of the text in the plain text
    pub byte_end: usize,
}

impl Mark {
    /// Byte span of the mark in the plain text.
    pub fn byte_span(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }
}

/// Why a mark element produced no range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// The element has no text content
    Empty,
    /// The text content has no unclaimed occurrence in the plain text
    NotFound,
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissReason::Empty => f.write_str("empty text content"),
            MissReason::NotFound => f.write_str("text not found in plain text"),
        }
    }
}

/// A mark element that was dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMiss {
    /// Position of the element in document order (0-based)
    pub index: usize,

    /// Ordinal attribute, if present and numeric
    pub ordinal: Option<u32>,

    /// Text content of the element
    pub text: String,

    /// Why no range was produced
    pub reason: MissReason,
}

impl std::fmt::Display for MatchMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mark #{} {:?}: {}", self.index, self.text, self.reason)
    }
}
