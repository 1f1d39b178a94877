//! Tokenizer for the mark-element markup dialect.
//!
//! The lexer only knows tags, comments and text. Deciding what a tag means
//! (mark element, line break, ignorable formatting) is left to the parser.

use regex::Regex;
use std::sync::OnceLock;

/// A lexical unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw text between tags (character references still encoded)
    Text(&'a str),

    /// Start tag such as `<a id="1">` or `<br/>`
    StartTag {
        /// Tag name as written
        name: &'a str,
        /// Everything between the name and `>` (or `/>`)
        attrs: &'a str,
        /// Whether the tag ends with `/>`
        self_closing: bool,
        /// Byte offset of `<`
        offset: usize,
    },

    /// End tag such as `</a>`
    EndTag {
        /// Tag name as written
        name: &'a str,
        /// Byte offset of `<`
        offset: usize,
    },

    /// Comment or declaration (`<!-- -->`, `<!DOCTYPE>`), dropped from output
    Comment,

    /// A tag that never closes; carries the input up to the next `<`
    Unterminated {
        /// Input from `<` up to the next `<` or the end
        rest: &'a str,
        /// Byte offset of `<`
        offset: usize,
    },
}

/// Iterator over the tokens of a markup string.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn lex_tag(&mut self, start: usize) -> Token<'a> {
        let rest = &self.input[start..];

        if rest.starts_with("<!--") {
            return match rest[4..].find("-->") {
                Some(end) => {
                    self.pos = start + 4 + end + 3;
                    Token::Comment
                }
                None => self.unterminated(start),
            };
        }

        let Some(close) = find_tag_end(rest) else {
            return self.unterminated(start);
        };
        self.pos = start + close + 1;
        let inner = &rest[1..close];

        if inner.starts_with('!') || inner.starts_with('?') {
            return Token::Comment;
        }

        if let Some(body) = inner.strip_prefix('/') {
            let name = body.trim();
            let name = name.split(char::is_whitespace).next().unwrap_or(name);
            return Token::EndTag {
                name,
                offset: start,
            };
        }

        let (inner, self_closing) = match inner.trim_end().strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (inner, false),
        };
        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());

        Token::StartTag {
            name: &inner[..name_end],
            attrs: inner[name_end..].trim(),
            self_closing,
            offset: start,
        }
    }

    fn unterminated(&mut self, start: usize) -> Token<'a> {
        let end = self.input[start + 1..]
            .find('<')
            .map_or(self.input.len(), |i| start + 1 + i);
        self.pos = end;
        Token::Unterminated {
            rest: &self.input[start..end],
            offset: start,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = self.input.get(self.pos..).filter(|r| !r.is_empty())?;
        let start = self.pos;

        if starts_tag(rest) {
            return Some(self.lex_tag(start));
        }

        // A literal `<` is consumed as text together with what follows
        let skip = usize::from(rest.starts_with('<'));
        let len = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        self.pos = start + len;
        Some(Token::Text(&rest[..len]))
    }
}

/// `<` followed by a letter, `/` and a letter, `!` or `?` opens a tag.
fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '!' || c == '?' => true,
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Find the `>` closing a tag, skipping quoted attribute values.
fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tag.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE_RE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_RE.get_or_init(|| {
        Regex::new(r#"([^\s=/"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("attribute pattern is valid")
    })
}

/// Look up an attribute value (case-insensitive name) in a tag's attribute text.
///
/// Attributes without a value yield an empty string.
pub fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attribute_regex().captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        Some(value)
    })
}
