//! Survey link validation, run by callers before fetching.

use url::Url;

use crate::error::{Result, SurveyError};

/// Host suffixes served by the survey platform.
pub const ALLOWED_HOSTS: &[&str] = &["wjx.cn", "wjx.top", "sojump.com", "sojump.cn"];

/// Parse and check a survey link.
///
/// # Errors
///
/// [`SurveyError::InvalidInput`] for non-http(s) schemes, missing hosts and
/// hosts outside [`ALLOWED_HOSTS`].
pub fn validate_locator(locator: &str) -> Result<Url> {
    let url = Url::parse(locator.trim())
        .map_err(|e| SurveyError::InvalidInput(format!("malformed link {}: {}", locator, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SurveyError::InvalidInput(format!(
            "unsupported scheme {} in {}",
            url.scheme(),
            locator
        )));
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SurveyError::InvalidInput(format!("missing host in {}", locator)))?
        .to_lowercase();

    if !ALLOWED_HOSTS.iter().any(|allowed| host.contains(allowed)) {
        return Err(SurveyError::InvalidInput(format!(
            "host {} is not a supported survey domain",
            host
        )));
    }

    Ok(url)
}
