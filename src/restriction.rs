//! Gated-page detection
//!
//! Runs over the raw markup before any DOM is built. A restricted page is
//! never structurally parsed.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Why a page was classified as restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionReason {
    Captcha,
    SliderVerification,
    AccessPassword,
    LoginRequired,
    RateLimited,
}

impl fmt::Display for RestrictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RestrictionReason::Captcha => "captcha challenge detected, captcha pages are not supported",
            RestrictionReason::SliderVerification => {
                "slider verification detected, risk-control pages are not supported"
            }
            RestrictionReason::AccessPassword => {
                "access password prompt detected, password-protected surveys are not supported"
            }
            RestrictionReason::LoginRequired => {
                "login wall detected, surveys requiring a session are not supported"
            }
            RestrictionReason::RateLimited => "rate limit page detected, retry later",
        };
        f.write_str(message)
    }
}

/// Markers checked in order; the first hit wins.
const KEYWORD_MARKERS: &[(&str, RestrictionReason)] = &[
    ("验证码", RestrictionReason::Captcha),
    ("滑块验证", RestrictionReason::SliderVerification),
    ("请输入访问密码", RestrictionReason::AccessPassword),
    ("请先登录", RestrictionReason::LoginRequired),
    ("访问过于频繁", RestrictionReason::RateLimited),
];

fn password_input_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)<input[^>]+type\s*=\s*['"]password['"]"#)
            .expect("password input pattern is valid")
    })
}

/// Scan raw markup for gating markers.
pub fn detect_restriction(html: &str) -> Option<RestrictionReason> {
    let lower_html = html.to_lowercase();

    for (marker, reason) in KEYWORD_MARKERS {
        if lower_html.contains(&marker.to_lowercase()) {
            return Some(*reason);
        }
    }

    if password_input_pattern().is_match(html) {
        return Some(RestrictionReason::AccessPassword);
    }

    None
}
