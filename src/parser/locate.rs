//! Element ordering and substring claiming.

use std::ops::Range;

/// A mark element as found by the scanner, before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Position in document order
    pub index: usize,
    /// Parsed ordinal attribute
    pub ordinal: Option<u32>,
    /// Byte offset of the element's text in the plain text
    pub start: usize,
    /// Exclusive byte end of the element's text in the plain text
    pub end: usize,
}

impl Element {
    /// Byte span of the element's text.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Put elements in output order.
///
/// Elements are sorted by ascending ordinal only when every element carries
/// one; otherwise document order is kept. Equal ordinals keep document order.
/// Returns whether the ordinal order was applied.
pub fn order_elements(elements: &mut [Element]) -> bool {
    if elements.is_empty() {
        return false;
    }

    let with_ordinal = elements.iter().filter(|e| e.ordinal.is_some()).count();
    if with_ordinal < elements.len() {
        if with_ordinal > 0 {
            log::debug!(
                "{} of {} mark elements have an ordinal, keeping document order",
                with_ordinal,
                elements.len()
            );
        }
        return false;
    }

    elements.sort_by_key(|e| e.ordinal);
    true
}

/// Occurrences already handed out by substring search.
#[derive(Debug, Default)]
pub struct ClaimSet {
    claimed: Vec<Range<usize>>,
}

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the first occurrence of `needle` in `haystack` that does not
    /// overlap an earlier claim.
    ///
    /// Returns the byte span of the claimed occurrence.
    pub fn claim(&mut self, haystack: &str, needle: &str) -> Option<Range<usize>> {
        if needle.is_empty() {
            return None;
        }

        let mut from = 0;
        while let Some(found) = haystack[from..].find(needle) {
            let start = from + found;
            let span = start..start + needle.len();

            if !self.overlaps(&span) {
                self.claimed.push(span.clone());
                return Some(span);
            }

            // Retry from the next char so overlapping occurrences are seen
            from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// Number of claimed occurrences.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Check if nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    fn overlaps(&self, span: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|c| c.start < span.end && span.start < c.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(index: usize, ordinal: Option<u32>) -> Element {
        Element {
            index,
            ordinal,
            start: index,
            end: index + 1,
        }
    }

    #[test]
    fn test_order_by_ordinal_when_all_present() {
        let mut elements = vec![element(0, Some(2)), element(1, Some(1)), element(2, Some(3))];
        assert!(order_elements(&mut elements));
        let order: Vec<usize> = elements.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_partial_ordinals_keep_document_order() {
        let mut elements = vec![element(0, Some(2)), element(1, None), element(2, Some(1))];
        assert!(!order_elements(&mut elements));
        let order: Vec<usize> = elements.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_ordinals_are_stable() {
        let mut elements = vec![element(0, Some(1)), element(1, Some(0)), element(2, Some(1))];
        assert!(order_elements(&mut elements));
        let order: Vec<usize> = elements.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_empty_elements() {
        let mut elements: Vec<Element> = Vec::new();
        assert!(!order_elements(&mut elements));
    }

    #[test]
    fn test_claim_non_overlapping() {
        let text = "Terms and Terms";
        let mut claims = ClaimSet::new();
        assert_eq!(claims.claim(text, "Terms"), Some(0..5));
        assert_eq!(claims.claim(text, "Terms"), Some(10..15));
        assert_eq!(claims.claim(text, "Terms"), None);
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn test_claim_skips_overlapping_occurrence() {
        let mut claims = ClaimSet::new();
        assert_eq!(claims.claim("aaa", "aa"), Some(0..2));
        assert_eq!(claims.claim("aaa", "a"), Some(2..3));
        assert_eq!(claims.claim("aaa", "a"), None);
    }

    #[test]
    fn test_claim_cjk() {
        let mut claims = ClaimSet::new();
        assert_eq!(claims.claim("条款和条款", "条款"), Some(0..6));
        assert_eq!(claims.claim("条款和条款", "条款"), Some(9..15));
    }

    #[test]
    fn test_claim_empty_needle() {
        let mut claims = ClaimSet::new();
        assert_eq!(claims.claim("abc", ""), None);
        assert!(claims.is_empty());
    }
}
