//! Character reference decoding (`&amp;`, `&#39;`, `&#x6761;`).

/// Longest reference body we try to decode, excluding `&` and `;`.
const MAX_REFERENCE_LEN: usize = 10;

/// Decode character references in `text`, appending the result to `out`.
///
/// Unknown or malformed references are copied verbatim.
pub fn decode_into(out: &mut String, text: &str) {
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match reference_at(after) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
}

/// Decode character references into a new string.
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    decode_into(&mut out, text);
    out
}

/// Parse a reference body at the start of `s` (just after `&`).
///
/// Returns the decoded char and the number of bytes consumed, `;` included.
fn reference_at(s: &str) -> Option<(char, usize)> {
    let semi = s.char_indices().take(MAX_REFERENCE_LEN + 1).find(|&(_, c)| c == ';')?.0;
    let body = &s[..semi];

    let ch = if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        char::from_u32(code).filter(|&c| c != '\0')?
    } else {
        named(body)?
    };

    Some((ch, semi + 1))
}

fn named(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{A0}',
        "ensp" => '\u{2002}',
        "emsp" => '\u{2003}',
        "thinsp" => '\u{2009}',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "middot" => '·',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_references() {
        assert_eq!(decode("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode("&lt;a&gt;"), "<a>");
        assert_eq!(decode("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
        assert_eq!(decode("a&nbsp;b"), "a\u{A0}b");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("it&#39;s"), "it's");
        assert_eq!(decode("&#x6761;&#X6B3E;"), "条款");
        assert_eq!(decode("&#128512;"), "😀");
    }

    #[test]
    fn test_unknown_references_kept() {
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("&bogus;"), "&bogus;");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode("&#0;"), "&#0;");
        assert_eq!(decode("&&amp;"), "&&");
        assert_eq!(decode("trailing &"), "trailing &");
    }

    #[test]
    fn test_semicolon_too_far_away() {
        assert_eq!(decode("& this is not a reference;"), "& this is not a reference;");
    }
}
