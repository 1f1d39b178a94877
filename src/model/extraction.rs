//! The result of extracting marks from a markup string.

use super::{CodeUnit, Mark, MatchMiss, TextRange};
use serde::{Deserialize, Serialize};

/// Plain text plus the ranges of every located mark element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Markup with all element delimiters removed
    pub plain_text: String,

    /// Located marks, in element order
    pub marks: Vec<Mark>,

    /// Elements that produced no range, in element order
    pub misses: Vec<MatchMiss>,

    /// Unit the mark ranges are measured in
    pub unit: CodeUnit,

    /// Whether element order follows the ordinal attribute
    pub ordered_by_ordinal: bool,
}

impl Extraction {
    /// Create an extraction with no marks.
    pub fn plain(text: impl Into<String>, unit: CodeUnit) -> Self {
        Self {
            plain_text: text.into(),
            marks: Vec::new(),
            misses: Vec::new(),
            unit,
            ordered_by_ordinal: false,
        }
    }

    /// Ranges of all located marks, in element order.
    pub fn ranges(&self) -> Vec<TextRange> {
        self.marks.iter().map(|m| m.range).collect()
    }

    /// Range of the first located mark.
    pub fn first_range(&self) -> Option<TextRange> {
        self.marks.first().map(|m| m.range)
    }

    /// Number of mark elements found in the markup, located or not.
    pub fn element_count(&self) -> usize {
        self.marks.len() + self.misses.len()
    }

    /// Check if every mark element was located.
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }

    /// Check if the markup contained no mark elements.
    pub fn has_marks(&self) -> bool {
        !self.marks.is_empty()
    }

    /// Slice the plain text at a range measured in this extraction's unit.
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        let span = self.unit.byte_span(&self.plain_text, range)?;
        self.plain_text.get(span)
    }

    /// Texts of the located marks, in element order.
    pub fn mark_texts(&self) -> Vec<&str> {
        self.marks.iter().map(|m| m.text.as_str()).collect()
    }
}
