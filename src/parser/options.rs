//! Parsing options and configuration.

use crate::model::CodeUnit;

/// Default tag name of a mark element.
pub const DEFAULT_MARK_TAG: &str = "a";

/// Default attribute carrying the ordinal of a mark element.
pub const DEFAULT_ORDINAL_ATTR: &str = "id";

/// Options for extracting marks from markup.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for malformed markup
    pub error_mode: ErrorMode,

    /// How mark ranges are located in the plain text
    pub strategy: MatchStrategy,

    /// Whitespace handling in text content
    pub whitespace: WhitespaceMode,

    /// Unit in which ranges are reported
    pub unit: CodeUnit,

    /// Tag name of mark elements (matched case-insensitively)
    pub mark_tag: String,

    /// Attribute holding the ordinal of a mark element
    pub ordinal_attr: String,

    /// Normalize input to Unicode NFC before parsing
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (recover from malformed markup).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the match strategy.
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set whitespace handling.
    pub fn with_whitespace(mut self, mode: WhitespaceMode) -> Self {
        self.whitespace = mode;
        self
    }

    /// Collapse whitespace runs the way an HTML renderer does.
    pub fn collapse_whitespace(mut self) -> Self {
        self.whitespace = WhitespaceMode::Collapse;
        self
    }

    /// Set the unit ranges are reported in.
    pub fn with_unit(mut self, unit: CodeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the mark element tag name.
    pub fn with_mark_tag(mut self, tag: impl Into<String>) -> Self {
        self.mark_tag = tag.into();
        self
    }

    /// Set the ordinal attribute name.
    pub fn with_ordinal_attr(mut self, attr: impl Into<String>) -> Self {
        self.ordinal_attr = attr.into();
        self
    }

    /// Enable or disable NFC normalization of the input.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            strategy: MatchStrategy::Tracked,
            whitespace: WhitespaceMode::Preserve,
            unit: CodeUnit::Utf16,
            mark_tag: DEFAULT_MARK_TAG.to_string(),
            ordinal_attr: DEFAULT_ORDINAL_ATTR.to_string(),
            normalize_unicode: false,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on malformed markup
    #[default]
    Strict,
    /// Recover from malformed markup and continue
    Lenient,
}

/// How each mark element's range is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Use offsets recorded while stripping tags
    #[default]
    Tracked,
    /// Re-locate each element's text in the plain text, claiming the first
    /// occurrence that does not overlap an earlier claim
    Search,
}

/// Whitespace handling in text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Keep whitespace and newlines as written
    #[default]
    Preserve,
    /// Collapse whitespace runs into one space; only `<br>` breaks lines
    Collapse,
}
