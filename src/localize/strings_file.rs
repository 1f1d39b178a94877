//! Parser for `.strings` localization tables.
//!
//! Supports the key/value form `"key" = "value";` with `/* */` and `//`
//! comments and the escapes `\" \\ \n \t \r` and `\Uxxxx`.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::str::CharIndices;

/// Parse the contents of a `.strings` file into a key/value table.
pub fn parse_strings(source: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::new(source);
    let mut table = HashMap::new();

    loop {
        reader.skip_trivia()?;
        if reader.at_end() {
            break;
        }

        let key = reader.quoted()?;
        reader.skip_trivia()?;
        reader.expect('=')?;
        reader.skip_trivia()?;
        let value = reader.quoted()?;
        reader.skip_trivia()?;
        reader.expect(';')?;

        if table.insert(key.clone(), value).is_some() {
            log::warn!("Duplicate key {:?} in strings table, keeping the last value", key);
        }
    }

    Ok(table)
}

struct Reader<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        // A BOM may survive decoding of .strings files
        let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn line(&self) -> usize {
        self.source[..self.pos].matches('\n').count() + 1
    }

    fn error(&self, message: &str) -> Error {
        Error::Catalog(format!("line {}: {}", self.line(), message))
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if trimmed.starts_with("/*") {
                let end = trimmed
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += end + 2;
            } else {
                return Ok(());
            }
        }
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.rest().starts_with(ch) {
            self.pos += ch.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", ch)))
        }
    }

    fn quoted(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();

        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let (_, escaped) = chars
                        .next()
                        .ok_or_else(|| self.error("unterminated escape"))?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'U' | 'u' => {
                            let unit = hex_unit(&mut chars)
                                .ok_or_else(|| self.error("invalid unicode escape"))?;
                            let mut units = vec![unit];
                            // Characters outside the BMP are written as a surrogate pair
                            if (0xD800..=0xDBFF).contains(&unit) {
                                let low = match (chars.next(), chars.next()) {
                                    (Some((_, '\\')), Some((_, 'U' | 'u'))) => hex_unit(&mut chars),
                                    _ => None,
                                };
                                units.extend(low);
                            }
                            for decoded in char::decode_utf16(units) {
                                let decoded = decoded
                                    .map_err(|_| self.error("unpaired surrogate in unicode escape"))?;
                                out.push(decoded);
                            }
                        }
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }

        Err(self.error("unterminated string"))
    }
}

/// Read the four hex digits of a `\Uxxxx` escape.
fn hex_unit(chars: &mut CharIndices<'_>) -> Option<u16> {
    let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(&hex, 16).ok()
}
