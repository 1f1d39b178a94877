//! Plain text and annotated text rendering.

use crate::model::{Extraction, Mark};

use super::visitor::{MarkVisitor, VisitorAction};

/// Convert an extraction to its plain text.
pub fn to_text(extraction: &Extraction) -> String {
    extraction.plain_text.clone()
}

/// Render the plain text with every located mark rewritten by `visitor`.
///
/// Marks are visited with their position in element order but written in
/// text order, so ordinal-sorted extractions annotate correctly.
pub fn to_annotated(extraction: &Extraction, visitor: &mut dyn MarkVisitor) -> String {
    let plain = &extraction.plain_text;
    let mut by_offset: Vec<(usize, &Mark)> = extraction.marks.iter().enumerate().collect();
    by_offset.sort_by_key(|(_, mark)| mark.byte_start);

    let mut output = String::with_capacity(plain.len() + extraction.marks.len() * 4);
    let mut cursor = 0;

    for (position, mark) in by_offset {
        let valid = mark.byte_start >= cursor
            && mark.byte_start <= mark.byte_end
            && plain.is_char_boundary(mark.byte_start)
            && plain.is_char_boundary(mark.byte_end);
        if !valid {
            log::warn!(
                "Skipping mark #{} with an overlapping or invalid span during annotation",
                mark.index
            );
            continue;
        }

        output.push_str(&plain[cursor..mark.byte_start]);
        let text = &plain[mark.byte_span()];

        match visitor.visit_mark(mark, position) {
            VisitorAction::Continue => {
                output.push_str(&visitor.prefix(mark, position));
                output.push_str(text);
                output.push_str(&visitor.suffix(mark, position));
            }
            VisitorAction::Replace(replacement) => output.push_str(&replacement),
            VisitorAction::Skip => output.push_str(text),
        }

        cursor = mark.byte_end;
    }

    output.push_str(&plain[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkupParser;
    use crate::render::visitor::{DefaultVisitor, NumberedVisitor};

    #[test]
    fn test_to_text() {
        let extraction = MarkupParser::new()
            .parse("Read <a>Terms</a> now.")
            .unwrap();
        assert_eq!(to_text(&extraction), "Read Terms now.");
    }

    #[test]
    fn test_annotated_brackets() {
        let extraction = MarkupParser::new()
            .parse("Read <a>Terms</a> and <a>Privacy</a>.")
            .unwrap();
        let output = to_annotated(&extraction, &mut DefaultVisitor);
        assert_eq!(output, "Read [Terms] and [Privacy].");
    }

    #[test]
    fn test_annotated_follows_text_order_with_element_positions() {
        let extraction = MarkupParser::new()
            .parse(r#"<a id="2">B</a> <a id="1">A</a>"#)
            .unwrap();
        let output = to_annotated(&extraction, &mut NumberedVisitor);
        assert_eq!(output, "[2:B] [1:A]");
    }

    #[test]
    fn test_annotated_skips_invalid_spans() {
        let mut extraction = MarkupParser::new().parse("<a>条款</a>").unwrap();

        extraction.marks[0].byte_start = 1;
        assert_eq!(to_annotated(&extraction, &mut DefaultVisitor), "条款");

        extraction.marks[0].byte_start = 6;
        extraction.marks[0].byte_end = 3;
        assert_eq!(to_annotated(&extraction, &mut DefaultVisitor), "条款");

        extraction.marks[0].byte_start = 0;
        extraction.marks[0].byte_end = 42;
        assert_eq!(to_annotated(&extraction, &mut DefaultVisitor), "条款");
    }
}
