//! Markup parsing module.
//!
//! [`MarkupParser`] strips markup in a single pass, recording where each mark
//! element's text lands in the plain text.

pub mod entity;
pub mod lexer;
mod locate;
mod markup_parser;
mod options;
mod ordinal;

pub use locate::{order_elements, ClaimSet, Element};
pub use markup_parser::MarkupParser;
pub use options::{
    ErrorMode, MatchStrategy, ParseOptions, WhitespaceMode, DEFAULT_MARK_TAG, DEFAULT_ORDINAL_ATTR,
};
pub use ordinal::parse_ordinal;
