//! C-ABI FFI bindings for native UI layers.
//!
//! Ranges are reported in UTF-16 code units, the coordinate space of
//! NSString/NSAttributedString, so a host app can apply them directly.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::parser::{MarkupParser, MatchStrategy, ParseOptions};
use crate::render::{self, JsonFormat};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct MarkspanResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `markspan_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `markspan_free_result`.
    pub error: *mut c_char,
}

impl MarkspanResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

/// Options for extraction via FFI.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MarkspanOptions {
    /// Recover from malformed markup.
    pub lenient: bool,
    /// Collapse whitespace like an HTML renderer.
    pub collapse_whitespace: bool,
    /// Re-locate marks by substring search instead of tracked offsets.
    pub search: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for MarkspanOptions {
    fn default() -> Self {
        Self {
            lenient: true,
            collapse_whitespace: false,
            search: false,
            pretty: false,
        }
    }
}

impl From<MarkspanOptions> for ParseOptions {
    fn from(options: MarkspanOptions) -> Self {
        let mut parse = ParseOptions::new();
        if options.lenient {
            parse = parse.lenient();
        }
        if options.collapse_whitespace {
            parse = parse.collapse_whitespace();
        }
        if options.search {
            parse = parse.with_strategy(MatchStrategy::Search);
        }
        parse
    }
}

unsafe fn markup_arg<'a>(markup: *const c_char) -> Result<&'a str, String> {
    if markup.is_null() {
        return Err("Markup cannot be null".to_string());
    }
    CStr::from_ptr(markup)
        .to_str()
        .map_err(|_| "Invalid UTF-8 markup".to_string())
}

/// Extract marks and return the extraction as JSON.
///
/// # Safety
///
/// The `markup` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `markspan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn markspan_extract_json(markup: *const c_char, pretty: bool) -> MarkspanResult {
    let options = MarkspanOptions {
        pretty,
        ..MarkspanOptions::default()
    };
    markspan_extract_with_options(markup, options)
}

/// Extract marks with options and return the extraction as JSON.
///
/// # Safety
///
/// The `markup` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `markspan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn markspan_extract_with_options(
    markup: *const c_char,
    options: MarkspanOptions,
) -> MarkspanResult {
    let markup = match markup_arg(markup) {
        Ok(s) => s,
        Err(message) => return MarkspanResult::error(message),
    };

    let format = if options.pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let result = MarkupParser::with_options(options.into())
        .parse(markup)
        .and_then(|extraction| render::to_json(&extraction, format));

    match result {
        Ok(json) => MarkspanResult::success(json),
        Err(e) => MarkspanResult::error(e.to_string()),
    }
}

/// Return the plain text of the markup.
///
/// # Safety
///
/// The `markup` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `markspan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn markspan_plain_text(markup: *const c_char) -> MarkspanResult {
    let markup = match markup_arg(markup) {
        Ok(s) => s,
        Err(message) => return MarkspanResult::error(message),
    };

    let parser = MarkupParser::with_options(MarkspanOptions::default().into());
    match parser.parse(markup) {
        Ok(extraction) => MarkspanResult::success(render::to_text(&extraction)),
        Err(e) => MarkspanResult::error(e.to_string()),
    }
}

/// Write the UTF-16 range of the first mark into `start` and `length`.
///
/// Returns `false` if the markup fails to parse or has no located mark; the
/// outputs are left untouched in that case.
///
/// # Safety
///
/// The `markup` must be a valid null-terminated UTF-8 string.
/// `start` and `length` must be valid pointers.
#[no_mangle]
pub unsafe extern "C" fn markspan_first_range(
    markup: *const c_char,
    start: *mut usize,
    length: *mut usize,
) -> bool {
    if start.is_null() || length.is_null() {
        return false;
    }
    let Ok(markup) = markup_arg(markup) else {
        return false;
    };

    let parser = MarkupParser::with_options(MarkspanOptions::default().into());
    match parser.parse(markup).map(|e| e.first_range()) {
        Ok(Some(range)) => {
            *start = range.start;
            *length = range.length;
            true
        }
        _ => false,
    }
}

/// Count the located marks in the markup.
///
/// # Safety
///
/// The `markup` must be a valid null-terminated UTF-8 string.
/// Returns -1 on error.
#[no_mangle]
pub unsafe extern "C" fn markspan_mark_count(markup: *const c_char) -> i32 {
    let Ok(markup) = markup_arg(markup) else {
        return -1;
    };

    let parser = MarkupParser::with_options(MarkspanOptions::default().into());
    match parser.parse(markup) {
        Ok(extraction) => extraction.marks.len() as i32,
        Err(_) => -1,
    }
}

/// Free a result returned by any markspan function.
///
/// # Safety
///
/// The `result` must have been returned by a markspan function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn markspan_free_result(result: MarkspanResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by markspan.
///
/// # Safety
///
/// The `ptr` must have been allocated by markspan.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn markspan_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the markspan library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn markspan_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let version = markspan_version();
        assert!(!version.is_null());
    }

    #[test]
    fn test_null_markup() {
        unsafe {
            let result = markspan_extract_json(ptr::null(), false);
            assert!(!result.success);
            assert!(!result.error.is_null());
            markspan_free_result(result);

            assert_eq!(markspan_mark_count(ptr::null()), -1);
        }
    }

    #[test]
    fn test_first_range() {
        let markup = CString::new("😀 <a>条款</a>").unwrap();
        let mut start = 0usize;
        let mut length = 0usize;
        unsafe {
            assert!(markspan_first_range(markup.as_ptr(), &mut start, &mut length));
        }
        assert_eq!((start, length), (3, 2));
    }

    #[test]
    fn test_extract_json() {
        let markup = CString::new("Read <a>Terms</a>").unwrap();
        unsafe {
            let result = markspan_extract_json(markup.as_ptr(), false);
            assert!(result.success);
            let json = CStr::from_ptr(result.data).to_str().unwrap().to_string();
            assert!(json.contains("\"plain_text\":\"Read Terms\""));
            markspan_free_result(result);

            assert_eq!(markspan_mark_count(markup.as_ptr()), 1);
        }
    }
}
