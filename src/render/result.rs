//! Extraction statistics.

use crate::model::Extraction;
use serde::{Deserialize, Serialize};

/// Statistics collected from one or more extractions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of extractions aggregated
    pub document_count: u32,

    /// Mark elements found in the markup
    pub element_count: u32,

    /// Elements that produced a range
    pub matched_count: u32,

    /// Elements dropped without a range
    pub miss_count: u32,

    /// Length of the plain text in the extraction's code units
    pub text_length: u32,

    /// Extractions whose order came from ordinal attributes
    pub ordinal_ordered_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a single extraction.
    pub fn from_extraction(extraction: &Extraction) -> Self {
        Self {
            document_count: 1,
            element_count: extraction.element_count() as u32,
            matched_count: extraction.marks.len() as u32,
            miss_count: extraction.misses.len() as u32,
            text_length: extraction.unit.measure(&extraction.plain_text) as u32,
            ordinal_ordered_count: u32::from(extraction.ordered_by_ordinal),
        }
    }

    /// Fraction of elements that produced a range (1.0 when there are none).
    pub fn match_rate(&self) -> f64 {
        if self.element_count == 0 {
            1.0
        } else {
            f64::from(self.matched_count) / f64::from(self.element_count)
        }
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.document_count += other.document_count;
        self.element_count += other.element_count;
        self.matched_count += other.matched_count;
        self.miss_count += other.miss_count;
        self.text_length += other.text_length;
        self.ordinal_ordered_count += other.ordinal_ordered_count;
    }
}
