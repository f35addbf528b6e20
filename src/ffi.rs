//! FFI interface for C/C++ hosts
//!
//! The survey goes out as JSON; the optional parser config comes in as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::config::ParserConfig;
use crate::error::SurveyError;
use crate::parser::parse_survey_with;
use crate::render::{JsonRenderer, TextRenderer};

/// Result struct returned to the host.
/// Both pointers are owned by Rust and must be freed via `survey_free_result`.
#[repr(C)]
pub struct SurveyResultFFI {
    /// JSON-serialized survey (null-terminated), or null on failure
    pub json_ptr: *mut c_char,
    /// Error message (null-terminated), or null on success
    pub error_ptr: *mut c_char,
    /// 0 on success, otherwise the error class code
    pub error_code: i32,
}

/// Parse survey HTML into JSON.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `locator` - Source link recorded in the survey (null-terminated), may be null
/// * `config_json` - JSON-serialized ParserConfig (null-terminated), may be null
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `locator` and `config_json` must be null or valid null-terminated C strings
/// - Caller must free the result via `survey_free_result`
#[no_mangle]
pub unsafe extern "C" fn survey_parse_html(
    html_ptr: *const c_char,
    html_len: usize,
    locator: *const c_char,
    config_json: *const c_char,
) -> SurveyResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        String::new()
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s.to_string(),
            Err(_) => return make_error_result(1, "Invalid UTF-8 in HTML content"),
        }
    };

    let locator = match optional_str(locator) {
        Ok(s) => s.unwrap_or_default(),
        Err(msg) => return make_error_result(1, msg),
    };

    let config = match optional_str(config_json) {
        Ok(Some(json)) => match ParserConfig::from_json(json) {
            Ok(c) => c,
            Err(e) => return error_from(&e),
        },
        Ok(None) => ParserConfig::default(),
        Err(msg) => return make_error_result(5, msg),
    };

    let rendered = parse_survey_with(&html, locator, &config)
        .and_then(|survey| JsonRenderer.render(&survey));

    match rendered {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => SurveyResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
                error_code: 0,
            },
            Err(_) => make_error_result(4, "Result JSON contains null bytes"),
        },
        Err(e) => error_from(&e),
    }
}

/// Free a SurveyResultFFI returned by `survey_parse_html`
///
/// # Safety
/// - `result` must have been returned by `survey_parse_html`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn survey_free_result(result: SurveyResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn optional_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, &'static str> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(Some)
        .map_err(|_| "Invalid UTF-8 in string argument")
}

fn error_from(err: &SurveyError) -> SurveyResultFFI {
    tracing::debug!(code = err.code(), error = %err, "survey parse failed across FFI");
    make_error_result(err.code(), &err.to_string())
}

// Helper to create error result
fn make_error_result(code: i32, msg: &str) -> SurveyResultFFI {
    let error_ptr = CString::new(msg)
        .or_else(|_| CString::new("Unknown error"))
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut());
    SurveyResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr,
        error_code: code,
    }
}
