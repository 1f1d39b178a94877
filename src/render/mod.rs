//! Rendering module for presenting extractions.

mod json;
mod result;
mod text;
pub mod visitor;

pub use json::{to_json, JsonFormat};
pub use result::ExtractionStats;
pub use text::{to_annotated, to_text};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DelimiterVisitor, MarkVisitor, NumberedVisitor,
    OrdinalOnlyVisitor, VisitorAction,
};
