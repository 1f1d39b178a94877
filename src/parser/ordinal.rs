//! Ordinal attribute parsing.
//!
//! Ordinals are written in ASCII digits (`id="2"`), full-width digits
//! (`id="２"`) or Chinese numerals (`id="二"`, `id="十三"`).

/// Parse an ordinal attribute value.
///
/// Returns `None` for values that are not a recognizable number; such an
/// element is treated as having no ordinal.
pub fn parse_ordinal(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    parse_digits(value).or_else(|| parse_chinese(value))
}

fn parse_digits(value: &str) -> Option<u32> {
    let mut result: u32 = 0;
    for ch in value.chars() {
        let digit = match ch {
            '0'..='9' => ch as u32 - '0' as u32,
            '０'..='９' => ch as u32 - '０' as u32,
            _ => return None,
        };
        result = result.checked_mul(10)?.checked_add(digit)?;
    }
    Some(result)
}

fn chinese_digit(ch: char) -> Option<u32> {
    let digit = match ch {
        '〇' | '零' => 0,
        '一' => 1,
        '二' | '两' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(digit)
}

/// Chinese numerals below one hundred, either positional (`十三`, `二十`)
/// or digit-by-digit (`一二`).
fn parse_chinese(value: &str) -> Option<u32> {
    if let Some((tens, ones)) = value.split_once('十') {
        let tens = match tens {
            "" => 1,
            t => single_chinese_digit(t)?,
        };
        let ones = match ones {
            "" => 0,
            o => single_chinese_digit(o)?,
        };
        return Some(tens * 10 + ones);
    }

    let mut result: u32 = 0;
    for ch in value.chars() {
        result = result.checked_mul(10)?.checked_add(chinese_digit(ch)?)?;
    }
    Some(result)
}

fn single_chinese_digit(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let digit = chinese_digit(chars.next()?)?;
    chars.next().is_none().then_some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_digits() {
        assert_eq!(parse_ordinal("1"), Some(1));
        assert_eq!(parse_ordinal(" 42 "), Some(42));
        assert_eq!(parse_ordinal("007"), Some(7));
    }

    #[test]
    fn test_fullwidth_digits() {
        assert_eq!(parse_ordinal("２"), Some(2));
        assert_eq!(parse_ordinal("１０"), Some(10));
    }

    #[test]
    fn test_chinese_numerals() {
        assert_eq!(parse_ordinal("一"), Some(1));
        assert_eq!(parse_ordinal("两"), Some(2));
        assert_eq!(parse_ordinal("十"), Some(10));
        assert_eq!(parse_ordinal("十三"), Some(13));
        assert_eq!(parse_ordinal("二十"), Some(20));
        assert_eq!(parse_ordinal("九十九"), Some(99));
        assert_eq!(parse_ordinal("一二"), Some(12));
    }

    #[test]
    fn test_not_ordinals() {
        assert_eq!(parse_ordinal(""), None);
        assert_eq!(parse_ordinal("terms"), None);
        assert_eq!(parse_ordinal("-1"), None);
        assert_eq!(parse_ordinal("1a"), None);
        assert_eq!(parse_ordinal("十十"), None);
        assert_eq!(parse_ordinal("99999999999"), None);
    }
}
