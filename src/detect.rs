//! Text encoding detection and decoding of raw markup bytes.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Encoding of a markup byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 without byte order mark
    Utf8,
    /// UTF-8 with a leading byte order mark
    Utf8Bom,
    /// UTF-16 little endian (BOM `FF FE`)
    Utf16Le,
    /// UTF-16 big endian (BOM `FE FF`)
    Utf16Be,
}

impl TextEncoding {
    /// Length of the byte order mark for this encoding.
    pub fn bom_len(&self) -> usize {
        match self {
            TextEncoding::Utf8 => 0,
            TextEncoding::Utf8Bom => 3,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf8Bom => "UTF-8 (BOM)",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        };
        f.write_str(name)
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Detect the encoding of a byte buffer from its byte order mark.
///
/// Buffers without a BOM are assumed to be UTF-8.
pub fn detect_encoding(data: &[u8]) -> TextEncoding {
    if data.starts_with(UTF8_BOM) {
        TextEncoding::Utf8Bom
    } else if data.starts_with(UTF16_LE_BOM) {
        TextEncoding::Utf16Le
    } else if data.starts_with(UTF16_BE_BOM) {
        TextEncoding::Utf16Be
    } else {
        TextEncoding::Utf8
    }
}

/// Decode raw bytes into a markup string.
///
/// # Returns
/// * `Ok(String)` with the byte order mark removed
/// * `Err(Error::Decode)` if the bytes are not valid in the detected encoding
pub fn decode_bytes(data: &[u8]) -> Result<String> {
    let encoding = detect_encoding(data);
    let body = &data[encoding.bom_len()..];

    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => Ok(String::from_utf8(body.to_vec())?),
        TextEncoding::Utf16Le => decode_utf16(body, u16::from_le_bytes),
        TextEncoding::Utf16Be => decode_utf16(body, u16::from_be_bytes),
    }
}

/// Read a file and decode it as markup.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = fs::read(path)?;
    decode_bytes(&data)
}

fn decode_utf16(body: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    if body.len() % 2 != 0 {
        return Err(Error::Decode(format!(
            "UTF-16 input has odd length ({} bytes)",
            body.len()
        )));
    }

    let units = body.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Decode(format!("invalid UTF-16: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str) -> Vec<u8> {
        let mut out = UTF16_LE_BOM.to_vec();
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_detect_plain_utf8() {
        assert_eq!(detect_encoding(b"<a>x</a>"), TextEncoding::Utf8);
        assert_eq!(detect_encoding(b""), TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_utf8_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice("阅读<a>条款</a>".as_bytes());
        assert_eq!(detect_encoding(&data), TextEncoding::Utf8Bom);
        assert_eq!(decode_bytes(&data).unwrap(), "阅读<a>条款</a>");
    }

    #[test]
    fn test_decode_utf16le() {
        let data = utf16le("Read <a>Terms</a> 😀");
        assert_eq!(decode_bytes(&data).unwrap(), "Read <a>Terms</a> 😀");
    }

    #[test]
    fn test_decode_utf16be() {
        let mut data = UTF16_BE_BOM.to_vec();
        for unit in "条款".encode_utf16() {
            data.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_bytes(&data).unwrap(), "条款");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let result = decode_bytes(&[b'a', 0xC3, 0x28]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_odd_utf16() {
        let result = decode_bytes(&[0xFF, 0xFE, 0x41]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_unpaired_surrogate() {
        // 0xD800 alone is an unpaired high surrogate
        let result = decode_bytes(&[0xFF, 0xFE, 0x00, 0xD8, 0x41, 0x00]);
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
