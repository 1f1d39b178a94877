//! Visitor pattern for customizing how marks are annotated.
//!
//! A visitor decides, per located mark, how the mark's text appears in
//! annotated output. The CLI uses one to colorize highlights; callers can
//! use one to emit their own markup.
//!
//! # Example
//!
//! ```
//! use markspan::model::Mark;
//! use markspan::render::visitor::{MarkVisitor, VisitorAction};
//!
//! struct Shout;
//!
//! impl MarkVisitor for Shout {
//!     fn visit_mark(&mut self, mark: &Mark, _position: usize) -> VisitorAction {
//!         VisitorAction::Replace(mark.text.to_uppercase())
//!     }
//! }
//! ```

use crate::model::Mark;

/// Action returned by visitor methods to control annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Wrap the mark in the visitor's prefix and suffix.
    #[default]
    Continue,

    /// Replace the mark's text with custom output.
    Replace(String),

    /// Leave the mark's text as plain text.
    Skip,
}

impl VisitorAction {
    /// Check if this action leaves the mark unannotated.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting marks during annotated rendering.
///
/// `position` is the mark's place in element order, the same index a caller
/// uses to pick the tap action for that range.
pub trait MarkVisitor: Send + Sync {
    /// Called before a mark is written.
    fn visit_mark(&mut self, mark: &Mark, position: usize) -> VisitorAction {
        let _ = (mark, position);
        VisitorAction::Continue
    }

    /// Text written before a mark on [`VisitorAction::Continue`].
    fn prefix(&self, mark: &Mark, position: usize) -> String {
        let _ = (mark, position);
        "[".to_string()
    }

    /// Text written after a mark on [`VisitorAction::Continue`].
    fn suffix(&self, mark: &Mark, position: usize) -> String {
        let _ = (mark, position);
        "]".to_string()
    }
}

/// Visitor that wraps every mark in square brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl MarkVisitor for DefaultVisitor {}

/// Visitor that wraps marks in custom delimiters.
#[derive(Debug, Clone)]
pub struct DelimiterVisitor {
    open: String,
    close: String,
}

impl DelimiterVisitor {
    /// Create a visitor with the given delimiters.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl MarkVisitor for DelimiterVisitor {
    fn prefix(&self, _mark: &Mark, _position: usize) -> String {
        self.open.clone()
    }

    fn suffix(&self, _mark: &Mark, _position: usize) -> String {
        self.close.clone()
    }
}

/// Visitor that prefixes each mark with its 1-based position: `[1:Terms]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedVisitor;

impl MarkVisitor for NumberedVisitor {
    fn prefix(&self, _mark: &Mark, position: usize) -> String {
        format!("[{}:", position + 1)
    }
}

/// Visitor that leaves marks without an ordinal unannotated.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalOnlyVisitor;

impl MarkVisitor for OrdinalOnlyVisitor {
    fn visit_mark(&mut self, mark: &Mark, _position: usize) -> VisitorAction {
        if mark.ordinal.is_some() {
            VisitorAction::Continue
        } else {
            VisitorAction::Skip
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are consulted in order; the first non-`Continue` action wins.
/// Delimiters come from the first visitor.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn MarkVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: MarkVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if no visitors are chained.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkVisitor for CompositeVisitor {
    fn visit_mark(&mut self, mark: &Mark, position: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_mark(mark, position);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn prefix(&self, mark: &Mark, position: usize) -> String {
        match self.visitors.first() {
            Some(v) => v.prefix(mark, position),
            None => DefaultVisitor.prefix(mark, position),
        }
    }

    fn suffix(&self, mark: &Mark, position: usize) -> String {
        match self.visitors.first() {
            Some(v) => v.suffix(mark, position),
            None => DefaultVisitor.suffix(mark, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRange;

    fn mark(text: &str, ordinal: Option<u32>) -> Mark {
        Mark {
            index: 0,
            ordinal,
            text: text.to_string(),
            range: TextRange::new(0, text.len()),
            byte_start: 0,
            byte_end: text.len(),
        }
    }

    #[test]
    fn test_visitor_action_helpers() {
        assert!(VisitorAction::Skip.should_skip());
        assert!(VisitorAction::Replace("x".into()).is_replace());
        assert_eq!(VisitorAction::Replace("x".into()).replacement(), Some("x"));
        assert_eq!(VisitorAction::Continue.replacement(), None);
    }

    #[test]
    fn test_default_delimiters() {
        let m = mark("Terms", None);
        let v = DefaultVisitor::new();
        assert_eq!(v.prefix(&m, 0), "[");
        assert_eq!(v.suffix(&m, 0), "]");
    }

    #[test]
    fn test_numbered_prefix() {
        let m = mark("Terms", None);
        assert_eq!(NumberedVisitor.prefix(&m, 1), "[2:");
        assert_eq!(NumberedVisitor.suffix(&m, 1), "]");
    }

    #[test]
    fn test_composite_first_non_continue_wins() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(DelimiterVisitor::new("<", ">"))
            .with_visitor(OrdinalOnlyVisitor);
        assert_eq!(composite.len(), 2);

        assert_eq!(composite.visit_mark(&mark("a", None), 0), VisitorAction::Skip);
        assert_eq!(
            composite.visit_mark(&mark("a", Some(1)), 0),
            VisitorAction::Continue
        );
        assert_eq!(composite.prefix(&mark("a", Some(1)), 0), "<");
    }
}
