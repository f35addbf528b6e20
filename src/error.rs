//! Error types for survey extraction.
//!
//! Every failure is classified so a batch caller can log it, skip the
//! offending document and keep going.

use crate::restriction::RestrictionReason;

/// Errors raised while validating, fetching, parsing or rendering a survey.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The survey locator is malformed or not on an allowed host.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fetching the survey page failed after all retries.
    #[error("network error: {0}")]
    Network(String),

    /// The page is gated and was not parsed.
    #[error("restricted page: {0}")]
    Restricted(RestrictionReason),

    /// The page has no question container or no recognizable questions.
    #[error("parse error: {0}")]
    StructuralParse(String),

    /// Writing a rendered artifact failed.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid parser or fetch configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SurveyError {
    /// Stable numeric class of the error, used as a process exit code and
    /// across the FFI boundary.
    pub fn code(&self) -> i32 {
        match self {
            SurveyError::InvalidInput(_) => 1,
            SurveyError::Network(_) => 2,
            SurveyError::Restricted(_) | SurveyError::StructuralParse(_) => 3,
            SurveyError::Render(_) => 4,
            SurveyError::Config(_) => 5,
        }
    }
}

/// Convenience alias for survey results.
pub type Result<T> = std::result::Result<T, SurveyError>;
