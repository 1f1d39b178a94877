//! Text ranges and the code-unit space they are measured in.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Unit in which range offsets and lengths are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeUnit {
    /// UTF-16 code units (NSString, JavaScript, Java indexing)
    #[default]
    Utf16,
    /// UTF-8 bytes (Rust `str` indexing)
    Utf8,
    /// Unicode scalar values (`char`)
    Char,
}

impl CodeUnit {
    /// Length of `text` in this unit.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            CodeUnit::Utf16 => text.encode_utf16().count(),
            CodeUnit::Utf8 => text.len(),
            CodeUnit::Char => text.chars().count(),
        }
    }

    /// Convert a byte span of `text` into a range in this unit.
    ///
    /// The span must lie on char boundaries.
    pub fn range_of(&self, text: &str, span: Range<usize>) -> TextRange {
        let start = self.measure(&text[..span.start]);
        let length = self.measure(&text[span.start..span.end]);
        TextRange::new(start, length)
    }

    /// Convert a range in this unit back into a byte span of `text`.
    ///
    /// Returns `None` if the range falls outside the text or splits a
    /// character (e.g. half of a UTF-16 surrogate pair).
    pub fn byte_span(&self, text: &str, range: TextRange) -> Option<Range<usize>> {
        let start = self.byte_offset(text, range.start)?;
        let end = self.byte_offset(text, range.end())?;
        Some(start..end)
    }

    fn byte_offset(&self, text: &str, offset: usize) -> Option<usize> {
        match self {
            CodeUnit::Utf8 => (offset <= text.len() && text.is_char_boundary(offset)).then_some(offset),
            CodeUnit::Char | CodeUnit::Utf16 => {
                let mut counted = 0;
                for (byte, ch) in text.char_indices() {
                    if counted == offset {
                        return Some(byte);
                    }
                    if counted > offset {
                        return None;
                    }
                    counted += match self {
                        CodeUnit::Utf16 => ch.len_utf16(),
                        _ => 1,
                    };
                }
                (counted == offset).then_some(text.len())
            }
        }
    }
}

impl std::fmt::Display for CodeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CodeUnit::Utf16 => "utf16",
            CodeUnit::Utf8 => "utf8",
            CodeUnit::Char => "char",
        };
        f.write_str(name)
    }
}

/// A half-open interval `[start, start + length)` over plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// Offset of the first unit
    pub start: usize,
    /// Number of units covered
    pub length: usize,
}

impl TextRange {
    /// Create a range from a start offset and a length.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if the range contains the given offset.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Check if two ranges share at least one unit.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl From<TextRange> for Range<usize> {
    fn from(range: TextRange) -> Self {
        range.start..range.end()
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.length)
    }
}
