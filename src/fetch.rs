//! Blocking page fetcher with retry and backoff (ureq)

use std::thread;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::{Result, SurveyError};

/// Source of raw survey HTML.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// ureq-backed fetcher.
pub struct HttpFetcher {
    agent: ureq::Agent,
    retries: u32,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        config.validate()?;
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .user_agent(config.user_agent.as_str())
                .build(),
        );
        Ok(Self {
            agent,
            retries: config.retries,
        })
    }

    fn fetch_once(&self, url: &str) -> std::result::Result<String, String> {
        // 4xx/5xx surface as errors from `call`.
        let response = self.agent.get(url).call().map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }
        response
            .into_body()
            .read_to_string()
            .map_err(|e| format!("failed to read body: {}", e))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 0..=self.retries {
            match self.fetch_once(url) {
                Ok(html) => {
                    tracing::trace!(url, bytes = html.len(), "survey page received");
                    return Ok(html);
                }
                Err(e) => {
                    last_error = e;
                    if attempt < self.retries {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            url,
                            attempt = attempt + 1,
                            retries = self.retries,
                            error = %last_error,
                            "fetch failed, retrying in {}s",
                            delay.as_secs()
                        );
                        thread::sleep(delay);
                    }
                }
            }
        }

        Err(SurveyError::Network(format!(
            "request to {} failed: {}",
            url, last_error
        )))
    }
}

/// One-shot fetch with a fresh agent built from `config`.
pub fn fetch_html(url: &str, config: &FetchConfig) -> Result<String> {
    HttpFetcher::new(config)?.fetch(url)
}

/// 1s, 2s, 4s, ... capped at 64s.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(30), Duration::from_secs(64));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FetchConfig {
            user_agent: String::new(),
            ..Default::default()
        };
        assert!(HttpFetcher::new(&config).is_err());
        assert!(HttpFetcher::new(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_fetch_html_validates_config_first() {
        let config = FetchConfig {
            user_agent: String::new(),
            ..Default::default()
        };
        let err = fetch_html("https://v.wjx.cn/vm/abc.aspx", &config).unwrap_err();
        assert!(matches!(err, SurveyError::Config(_)));
    }
}
