//! Single-pass markup parser producing plain text and mark ranges.

use std::borrow::Cow;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::detect::{decode_bytes, decode_file};
use crate::error::{Error, Result};
use crate::model::{Extraction, Mark, MatchMiss, MissReason};

use super::entity;
use super::lexer::{attribute, Lexer, Token};
use super::locate::{order_elements, ClaimSet, Element};
use super::options::{ErrorMode, MatchStrategy, ParseOptions, WhitespaceMode};
use super::ordinal::parse_ordinal;

/// Markup parser for the mark-element convention.
///
/// The parser holds only options and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    options: ParseOptions,
}

impl MarkupParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parser options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse markup into plain text and ordered mark ranges.
    pub fn parse(&self, markup: &str) -> Result<Extraction> {
        let source = self.normalize(markup);
        let (plain, elements) = self.scan(&source)?;
        Ok(self.locate(plain, elements))
    }

    /// Decode raw bytes and parse them.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Extraction> {
        let markup = decode_bytes(data)?;
        self.parse(&markup)
    }

    /// Read a file, decode it and parse it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let markup = decode_file(path)?;
        self.parse(&markup)
    }

    fn normalize<'a>(&self, markup: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(markup);

        if text.contains('\r') {
            text = Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"));
        }
        if self.options.normalize_unicode {
            text = Cow::Owned(text.nfc().collect());
        }

        text
    }

    fn scan(&self, source: &str) -> Result<(String, Vec<Element>)> {
        let mut scanner = Scanner::new(&self.options, source.len());

        for token in Lexer::new(source) {
            match token {
                Token::Text(text) => scanner.push_text(text),
                Token::StartTag {
                    name,
                    attrs,
                    self_closing,
                    offset,
                } => {
                    if name.eq_ignore_ascii_case(&self.options.mark_tag) {
                        let ordinal = attribute(attrs, &self.options.ordinal_attr)
                            .and_then(parse_ordinal);
                        scanner.open_mark(ordinal, offset)?;
                        if self_closing {
                            scanner.close_mark(offset)?;
                        }
                    } else if name.eq_ignore_ascii_case("br") {
                        scanner.push_break();
                    }
                }
                Token::EndTag { name, offset } => {
                    if name.eq_ignore_ascii_case(&self.options.mark_tag) {
                        scanner.close_mark(offset)?;
                    }
                }
                Token::Comment => {}
                Token::Unterminated { rest, offset } => {
                    let is_mark = opens_tag_named(rest, &self.options.mark_tag);
                    if is_mark && self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::markup(offset, "mark tag is never closed with '>'"));
                    }
                    if is_mark {
                        log::warn!("Unterminated mark tag at byte {}, keeping it as text", offset);
                    } else {
                        log::debug!("Unterminated tag at byte {}, keeping it as text", offset);
                    }
                    scanner.push_literal(rest);
                }
            }
        }

        scanner.finish(source.len())
    }

    fn locate(&self, plain: String, mut elements: Vec<Element>) -> Extraction {
        let ordered_by_ordinal = order_elements(&mut elements);
        let mut claims = ClaimSet::new();
        let mut marks = Vec::with_capacity(elements.len());
        let mut misses = Vec::new();

        for element in elements {
            let text = plain[element.span()].to_string();

            let span = if text.is_empty() {
                None
            } else {
                match self.options.strategy {
                    MatchStrategy::Tracked => Some(element.span()),
                    MatchStrategy::Search => claims.claim(&plain, &text),
                }
            };

            match span {
                Some(span) => marks.push(Mark {
                    index: element.index,
                    ordinal: element.ordinal,
                    range: self.options.unit.range_of(&plain, span.clone()),
                    byte_start: span.start,
                    byte_end: span.end,
                    text,
                }),
                None => {
                    let reason = if text.is_empty() {
                        MissReason::Empty
                    } else {
                        MissReason::NotFound
                    };
                    let miss = MatchMiss {
                        index: element.index,
                        ordinal: element.ordinal,
                        text,
                        reason,
                    };
                    log::debug!("Dropping {}", miss);
                    misses.push(miss);
                }
            }
        }

        Extraction {
            plain_text: plain,
            marks,
            misses,
            unit: self.options.unit,
            ordered_by_ordinal,
        }
    }
}

/// Whether `raw` starts with `<name` or `</name` followed by a non-name character.
fn opens_tag_named(raw: &str, name: &str) -> bool {
    let body = raw.strip_prefix('<').unwrap_or(raw);
    let body = body.strip_prefix('/').unwrap_or(body);
    match body.get(..name.len()) {
        Some(head) if head.eq_ignore_ascii_case(name) => !body[name.len()..]
            .starts_with(|c: char| c.is_alphanumeric() || c == '-' || c == '_' || c == ':'),
        _ => false,
    }
}

/// A mark element whose end tag has not been seen yet.
struct OpenMark {
    index: usize,
    ordinal: Option<u32>,
    start: usize,
}

/// Accumulates plain text and element spans while tokens stream by.
struct Scanner<'o> {
    options: &'o ParseOptions,
    plain: String,
    elements: Vec<Element>,
    open: Option<OpenMark>,
    next_index: usize,
    after_space: bool,
}

impl<'o> Scanner<'o> {
    fn new(options: &'o ParseOptions, capacity: usize) -> Self {
        Self {
            options,
            plain: String::with_capacity(capacity),
            elements: Vec::new(),
            open: None,
            next_index: 0,
            // Leading whitespace is dropped when collapsing
            after_space: true,
        }
    }

    fn strict(&self) -> bool {
        self.options.error_mode == ErrorMode::Strict
    }

    fn push_text(&mut self, raw: &str) {
        match self.options.whitespace {
            WhitespaceMode::Preserve => entity::decode_into(&mut self.plain, raw),
            WhitespaceMode::Collapse => {
                let decoded = entity::decode(raw);
                self.push_collapsed(&decoded);
            }
        }
    }

    fn push_literal(&mut self, raw: &str) {
        match self.options.whitespace {
            WhitespaceMode::Preserve => self.plain.push_str(raw),
            WhitespaceMode::Collapse => self.push_collapsed(raw),
        }
    }

    fn push_collapsed(&mut self, text: &str) {
        for ch in text.chars() {
            // NBSP is never collapsed
            if ch.is_whitespace() && ch != '\u{A0}' {
                if !self.after_space {
                    self.plain.push(' ');
                    self.after_space = true;
                }
            } else {
                self.plain.push(ch);
                self.after_space = false;
            }
        }
    }

    fn push_break(&mut self) {
        self.plain.push('\n');
        self.after_space = true;
    }

    fn open_mark(&mut self, ordinal: Option<u32>, offset: usize) -> Result<()> {
        if self.open.is_some() {
            if self.strict() {
                return Err(Error::markup(offset, "nested mark elements are not supported"));
            }
            log::warn!("Ignoring nested mark start tag at byte {}", offset);
            return Ok(());
        }

        self.open = Some(OpenMark {
            index: self.next_index,
            ordinal,
            start: self.plain.len(),
        });
        self.next_index += 1;
        Ok(())
    }

    fn close_mark(&mut self, offset: usize) -> Result<()> {
        match self.open.take() {
            Some(open) => {
                self.elements.push(Element {
                    index: open.index,
                    ordinal: open.ordinal,
                    start: open.start,
                    end: self.plain.len(),
                });
                Ok(())
            }
            None if self.strict() => Err(Error::markup(
                offset,
                "end tag without a matching mark start tag",
            )),
            None => {
                log::warn!("Ignoring stray mark end tag at byte {}", offset);
                Ok(())
            }
        }
    }

    fn finish(mut self, source_len: usize) -> Result<(String, Vec<Element>)> {
        if self.open.is_some() {
            if self.strict() {
                return Err(Error::markup(source_len, "mark element is never closed"));
            }
            log::warn!("Closing unterminated mark element at end of input");
            self.close_mark(source_len)?;
        }

        if self.options.whitespace == WhitespaceMode::Collapse {
            let trimmed = self.plain.trim_end_matches(' ').len();
            self.plain.truncate(trimmed);
            for element in &mut self.elements {
                element.start = element.start.min(trimmed);
                element.end = element.end.min(trimmed);
            }
        }

        Ok((self.plain, self.elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeUnit, TextRange};

    fn parse(markup: &str) -> Extraction {
        MarkupParser::new().parse(markup).unwrap()
    }

    fn parse_with(markup: &str, options: ParseOptions) -> Result<Extraction> {
        MarkupParser::with_options(options).parse(markup)
    }

    #[test]
    fn test_two_ordered_marks() {
        let result = parse(r#"Please read <a id="1">Terms</a> and <a id="2">Privacy</a>."#);
        assert_eq!(result.plain_text, "Please read Terms and Privacy.");
        assert_eq!(
            result.ranges(),
            vec![TextRange::new(12, 5), TextRange::new(22, 7)]
        );
        assert!(result.ordered_by_ordinal);
    }

    #[test]
    fn test_no_marks() {
        let result = parse("Just a sentence.");
        assert_eq!(result.plain_text, "Just a sentence.");
        assert!(result.ranges().is_empty());
        assert!(!result.ordered_by_ordinal);
    }

    #[test]
    fn test_reordered_by_ordinal() {
        let result = parse(r#"<a id="2">second</a> then <a id="1">first</a>"#);
        assert_eq!(result.mark_texts(), vec!["first", "second"]);
        assert_eq!(result.marks[0].index, 1);
        assert_eq!(result.marks[1].index, 0);
    }

    #[test]
    fn test_without_ordinals_document_order() {
        let result = parse("<a>one</a> <a>two</a> <a>three</a>");
        assert_eq!(result.mark_texts(), vec!["one", "two", "three"]);
        assert!(!result.ordered_by_ordinal);
    }

    #[test]
    fn test_chinese_ordinals() {
        let result = parse(r#"请阅读<a id="二">免责声明</a>和<a id="一">隐私协议</a>"#);
        assert_eq!(result.plain_text, "请阅读免责声明和隐私协议");
        assert_eq!(result.mark_texts(), vec!["隐私协议", "免责声明"]);
        assert_eq!(
            result.ranges(),
            vec![TextRange::new(8, 4), TextRange::new(3, 4)]
        );
    }

    #[test]
    fn test_other_tags_stripped() {
        let result = parse("<b>Bold</b> <a>link <i>text</i></a><br>next");
        assert_eq!(result.plain_text, "Bold link text\nnext");
        assert_eq!(result.mark_texts(), vec!["link text"]);
    }

    #[test]
    fn test_entities_decoded() {
        let result = parse("Q&amp;A: <a>Terms &amp; Conditions</a>");
        assert_eq!(result.plain_text, "Q&A: Terms & Conditions");
        assert_eq!(result.marks[0].range, TextRange::new(5, 18));
    }

    #[test]
    fn test_crlf_normalized() {
        let result = parse("Line one\r\n<a>Line two</a>\rthree");
        assert_eq!(result.plain_text, "Line one\nLine two\nthree");
        assert_eq!(result.first_range(), Some(TextRange::new(9, 8)));
    }

    #[test]
    fn test_collapse_whitespace() {
        let options = ParseOptions::new().collapse_whitespace();
        let result = parse_with("  Read\n   the <a>  Terms\tnow</a>  ", options).unwrap();
        assert_eq!(result.plain_text, "Read the Terms now");
        assert_eq!(result.mark_texts(), vec!["Terms now"]);
    }

    #[test]
    fn test_empty_mark_is_missed() {
        let result = parse("Read <a></a> and <a/> and <a>this</a>");
        assert_eq!(result.mark_texts(), vec!["this"]);
        assert_eq!(result.misses.len(), 2);
        assert!(result.misses.iter().all(|m| m.reason == MissReason::Empty));
        assert_eq!(result.element_count(), 3);
    }

    #[test]
    fn test_tracked_duplicate_text() {
        let result = parse("<a>Terms</a> and <a>Terms</a>");
        assert_eq!(
            result.ranges(),
            vec![TextRange::new(0, 5), TextRange::new(10, 5)]
        );
    }

    #[test]
    fn test_search_duplicate_text_non_overlapping() {
        let options = ParseOptions::new().with_strategy(MatchStrategy::Search);
        let result = parse_with("<a>Terms</a> and <a>Terms</a>", options).unwrap();
        let ranges = result.ranges();
        assert_eq!(ranges.len(), 2);
        assert!(ranges[1].start >= ranges[0].end());
    }

    #[test]
    fn test_search_reports_ambiguous_miss() {
        // Ordinal order searches "b" first, which claims the "b" inside "ab"
        let markup = r#"<a id="2">ab</a><a id="1">b</a>"#;

        let search = ParseOptions::new().with_strategy(MatchStrategy::Search);
        let result = parse_with(markup, search).unwrap();
        assert_eq!(result.plain_text, "abb");
        assert_eq!(result.mark_texts(), vec!["b"]);
        assert_eq!(result.first_range(), Some(TextRange::new(1, 1)));
        assert_eq!(result.misses.len(), 1);
        assert_eq!(result.misses[0].reason, MissReason::NotFound);
        assert_eq!(result.misses[0].text, "ab");

        let tracked = parse(markup);
        assert_eq!(
            tracked.ranges(),
            vec![TextRange::new(2, 1), TextRange::new(0, 2)]
        );
    }

    #[test]
    fn test_utf16_ranges_after_emoji() {
        let result = parse("😀 <a>条款</a>");
        assert_eq!(result.first_range(), Some(TextRange::new(3, 2)));
        assert_eq!(result.slice(TextRange::new(3, 2)), Some("条款"));
    }

    #[test]
    fn test_char_and_byte_units() {
        let markup = "😀 <a>条款</a>";
        let chars = parse_with(markup, ParseOptions::new().with_unit(CodeUnit::Char)).unwrap();
        assert_eq!(chars.first_range(), Some(TextRange::new(2, 2)));
        let bytes = parse_with(markup, ParseOptions::new().with_unit(CodeUnit::Utf8)).unwrap();
        assert_eq!(bytes.first_range(), Some(TextRange::new(5, 6)));
    }

    #[test]
    fn test_custom_tag_and_attribute() {
        let options = ParseOptions::new()
            .with_mark_tag("mark")
            .with_ordinal_attr("data-order");
        let markup = r#"<MARK data-order="2">B</MARK> <a>x</a> <mark data-order="1">A</mark>"#;
        let result = parse_with(markup, options).unwrap();
        assert_eq!(result.plain_text, "B x A");
        assert_eq!(result.mark_texts(), vec!["A", "B"]);
    }

    #[test]
    fn test_strict_errors() {
        let cases = [
            "Read <a>Terms",
            "Read Terms</a>",
            "<a>outer <a>inner</a></a>",
            "Read <a id=\"1\" Terms",
        ];
        for markup in cases {
            let result = parse_with(markup, ParseOptions::new());
            assert!(
                matches!(result, Err(Error::Markup { .. })),
                "expected markup error for {:?}",
                markup
            );
        }
    }

    #[test]
    fn test_lenient_recovery() {
        let lenient = ParseOptions::new().lenient();

        let result = parse_with("Read <a>Terms", lenient.clone()).unwrap();
        assert_eq!(result.mark_texts(), vec!["Terms"]);

        let result = parse_with("Read Terms</a>", lenient.clone()).unwrap();
        assert_eq!(result.plain_text, "Read Terms");
        assert!(result.marks.is_empty());

        let result = parse_with("<a>outer <a>inner</a> tail</a>", lenient.clone()).unwrap();
        assert_eq!(result.plain_text, "outer inner tail");
        assert_eq!(result.mark_texts(), vec!["outer inner"]);

        let result = parse_with("Read <a id=\"1\" Terms", lenient).unwrap();
        assert_eq!(result.plain_text, "Read <a id=\"1\" Terms");
        assert!(result.marks.is_empty());
    }

    #[test]
    fn test_unterminated_other_tag_kept_in_strict_mode() {
        let result = parse("x<y <a>T</a>");
        assert_eq!(result.plain_text, "x<y T");
        assert_eq!(result.first_range(), Some(TextRange::new(4, 1)));

        let result = parse("1<abbr 2 <a>T</a>");
        assert_eq!(result.plain_text, "1<abbr 2 T");
        assert_eq!(result.mark_texts(), vec!["T"]);

        assert!(matches!(
            parse_with("<a>T</a x", ParseOptions::new()),
            Err(Error::Markup { offset: 4, .. })
        ));
    }

    #[test]
    fn test_opens_tag_named() {
        assert!(opens_tag_named("<a id=\"1\" ", "a"));
        assert!(opens_tag_named("</A", "a"));
        assert!(opens_tag_named("<a", "a"));
        assert!(!opens_tag_named("<abbr ", "a"));
        assert!(!opens_tag_named("<y ", "a"));
        assert!(!opens_tag_named("<条", "a"));
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" + combining acute accent
        let markup = "Caf\u{65}\u{301} <a>menu</a>";
        let result = parse_with(markup, ParseOptions::new().with_unicode_normalization(true))
            .unwrap();
        assert_eq!(result.plain_text, "Café menu");
        assert_eq!(result.first_range(), Some(TextRange::new(5, 4)));
    }

    #[test]
    fn test_parse_bytes_decode_failure() {
        let result = MarkupParser::new().parse_bytes(&[b'<', b'a', b'>', 0xFF, b'<']);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_idempotent() {
        let markup = r#"Read <a id="1">Terms</a> and <a id="2">Privacy</a>."#;
        assert_eq!(parse(markup), parse(markup));
    }
}
