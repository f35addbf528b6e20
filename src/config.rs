//! Parser and fetch configuration
//!
//! Both configs deserialize from JSON with every field optional, so the FFI
//! host can pass `{}` or override a single knob.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};

/// Knobs for the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Section assigned to questions that precede any divider.
    pub default_section: String,
    /// Title used when neither the heading nor `<title>` has text.
    pub fallback_title: String,
    /// Max characters kept per global logic signal value.
    pub signal_snippet_chars: usize,
    /// Max characters per topic-specific signal quoted in logic notes.
    pub topic_signal_chars: usize,
    /// Max entries in a question's logic notes.
    pub max_logic_notes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_section: "Questions".to_string(),
            fallback_title: "Survey Export".to_string(),
            signal_snippet_chars: 140,
            topic_signal_chars: 70,
            max_logic_notes: 8,
        }
    }
}

impl ParserConfig {
    /// Parse a JSON config, applying defaults for missing fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ParserConfig = serde_json::from_str(json)
            .map_err(|e| SurveyError::Config(format!("invalid parser config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_section.trim().is_empty() {
            return Err(SurveyError::Config("default_section must not be empty".into()));
        }
        if self.fallback_title.trim().is_empty() {
            return Err(SurveyError::Config("fallback_title must not be empty".into()));
        }
        // Truncation keeps N-3 chars plus an ellipsis.
        if self.signal_snippet_chars < 4 || self.topic_signal_chars < 4 {
            return Err(SurveyError::Config(
                "signal snippet limits must be at least 4 characters".into(),
            ));
        }
        if self.max_logic_notes == 0 {
            return Err(SurveyError::Config("max_logic_notes must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Settings for the blocking page fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Retries after the first attempt; backoff doubles from one second.
    pub retries: u32,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            retries: 2,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(SurveyError::Config("timeout_secs must be greater than 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SurveyError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}
