//! # markspan
//!
//! Extract plain text and highlight ranges from localized strings that mark
//! their tappable words with inline tags.
//!
//! A translator writes `Please read <a id="1">Terms</a> and <a id="2">Privacy</a>.`
//! and the UI needs `Please read Terms and Privacy.` together with the ranges
//! of "Terms" and "Privacy" so it can color them and attach tap handlers.
//!
//! ## Quick Start
//!
//! ```
//! use markspan::{extract, TextRange};
//!
//! fn main() -> markspan::Result<()> {
//!     let extraction = extract(r#"Please read <a id="1">Terms</a> and <a id="2">Privacy</a>."#)?;
//!
//!     assert_eq!(extraction.plain_text, "Please read Terms and Privacy.");
//!     assert_eq!(
//!         extraction.ranges(),
//!         vec![TextRange::new(12, 5), TextRange::new(22, 7)]
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Single pass**: ranges come from offsets recorded while stripping tags
//! - **Ordinals**: `id` attributes reorder marks (ASCII, full-width or Chinese numerals)
//! - **Platform coordinates**: ranges in UTF-16 units by default, or bytes/chars
//! - **Tolerant**: elements that cannot be located are dropped, never fatal
//! - **Localization**: string catalogs with an explicit language and a stored preference

pub mod detect;
pub mod error;
pub mod localize;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use detect::{decode_bytes, detect_encoding, TextEncoding};
pub use error::{Error, Result};
pub use localize::{Catalog, FileLanguageStore, Language, LanguageStore, MemoryLanguageStore};
pub use model::{CodeUnit, Extraction, Mark, MatchMiss, MissReason, TextRange};
pub use parser::{ErrorMode, MarkupParser, MatchStrategy, ParseOptions, WhitespaceMode};
pub use render::{ExtractionStats, JsonFormat};

use std::path::Path;

/// Extract plain text and mark ranges from markup.
///
/// # Example
///
/// ```
/// let extraction = markspan::extract("No marks at all.").unwrap();
/// assert_eq!(extraction.plain_text, "No marks at all.");
/// assert!(extraction.ranges().is_empty());
/// ```
pub fn extract(markup: &str) -> Result<Extraction> {
    MarkupParser::new().parse(markup)
}

/// Extract with custom options.
///
/// # Example
///
/// ```
/// use markspan::{extract_with_options, CodeUnit, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_unit(CodeUnit::Char);
/// let extraction = extract_with_options("Read <a>Terms", options).unwrap();
/// assert_eq!(extraction.mark_texts(), vec!["Terms"]);
/// ```
pub fn extract_with_options(markup: &str, options: ParseOptions) -> Result<Extraction> {
    MarkupParser::with_options(options).parse(markup)
}

/// Extract only the first mark, for single-highlight labels.
///
/// Returns the plain text and the range of the first located mark.
///
/// # Example
///
/// ```
/// let (text, range) = markspan::extract_first("阅读<a>用户指南</a>").unwrap();
/// assert_eq!(text, "阅读用户指南");
/// assert_eq!(range, Some(markspan::TextRange::new(2, 4)));
/// ```
pub fn extract_first(markup: &str) -> Result<(String, Option<TextRange>)> {
    let extraction = extract(markup)?;
    let first = extraction.first_range();
    Ok((extraction.plain_text, first))
}

/// Decode raw bytes (UTF-8 or UTF-16 with BOM) and extract.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    MarkupParser::new().parse_bytes(data)
}

/// Read, decode and extract a markup file.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    MarkupParser::new().parse_file(path)
}

/// Builder for extracting marks with non-default settings.
///
/// # Example
///
/// ```
/// use markspan::{Markspan, MatchStrategy};
///
/// let extraction = Markspan::new()
///     .lenient()
///     .collapse_whitespace()
///     .with_strategy(MatchStrategy::Search)
///     .extract("Read  the <a>Terms</a>")?;
/// assert_eq!(extraction.plain_text, "Read the Terms");
/// # Ok::<(), markspan::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Markspan {
    options: ParseOptions,
}

impl Markspan {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recover from malformed markup instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Collapse whitespace like an HTML renderer.
    pub fn collapse_whitespace(mut self) -> Self {
        self.options = self.options.collapse_whitespace();
        self
    }

    /// Set the match strategy.
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Set the unit ranges are reported in.
    pub fn with_unit(mut self, unit: CodeUnit) -> Self {
        self.options = self.options.with_unit(unit);
        self
    }

    /// Set the mark element tag name.
    pub fn with_mark_tag(mut self, tag: impl Into<String>) -> Self {
        self.options = self.options.with_mark_tag(tag);
        self
    }

    /// Set the ordinal attribute name.
    pub fn with_ordinal_attr(mut self, attr: impl Into<String>) -> Self {
        self.options = self.options.with_ordinal_attr(attr);
        self
    }

    /// Normalize input to Unicode NFC first.
    pub fn normalize_unicode(mut self) -> Self {
        self.options = self.options.with_unicode_normalization(true);
        self
    }

    /// Get the accumulated options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Build a reusable parser.
    pub fn parser(&self) -> MarkupParser {
        MarkupParser::with_options(self.options.clone())
    }

    /// Extract from a markup string.
    pub fn extract(&self, markup: &str) -> Result<Extraction> {
        self.parser().parse(markup)
    }

    /// Extract from raw bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Extraction> {
        self.parser().parse_bytes(data)
    }

    /// Extract the localized string for `key` in `lang`.
    pub fn extract_localized(
        &self,
        catalog: &Catalog,
        key: &str,
        lang: Option<Language>,
    ) -> Result<Extraction> {
        catalog.extract(key, lang, &self.options)
    }
}
