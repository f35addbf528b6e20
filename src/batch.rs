//! Multi-survey export
//!
//! Each link is validated, fetched and parsed on its own. A failure is
//! logged and recorded, and the batch moves on.

use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::locator::validate_locator;
use crate::model::Survey;
use crate::parser::parse_survey_with;
use crate::text::unique_keep_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Success,
    Failed,
}

/// Result of one link in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub url: String,
    pub status: ExportStatus,
    pub title: String,
    pub message: String,
    /// 0 on success, otherwise the error class code.
    pub error_code: i32,
    #[serde(skip)]
    pub survey: Option<Survey>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ExportOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ExportStatus::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed links with their messages, one per line.
    pub fn failed_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.status == ExportStatus::Failed)
            .map(|o| format!("{}\t{}", o.url, o.message))
            .collect()
    }
}

fn export_one(url: &str, fetcher: &dyn Fetcher, config: &ParserConfig) -> Result<Survey> {
    let url = validate_locator(url)?;
    let html = fetcher.fetch(url.as_str())?;
    parse_survey_with(&html, url.as_str(), config)
}

/// Export every distinct link, in input order.
pub fn export_many<I, S>(locators: I, fetcher: &dyn Fetcher, config: &ParserConfig) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let urls = unique_keep_order(
        locators
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty()),
    );

    let mut report = BatchReport::default();
    for url in urls {
        let outcome = match export_one(&url, fetcher, config) {
            Ok(survey) => ExportOutcome {
                message: format!("{} questions", survey.questions.len()),
                title: survey.title.clone(),
                url,
                status: ExportStatus::Success,
                error_code: 0,
                survey: Some(survey),
            },
            Err(e) => {
                tracing::warn!(url = %url, code = e.code(), error = %e, "survey export failed");
                ExportOutcome {
                    url,
                    status: ExportStatus::Failed,
                    title: String::new(),
                    message: e.to_string(),
                    error_code: e.code(),
                    survey: None,
                }
            }
        };
        report.outcomes.push(outcome);
    }

    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch export finished"
    );
    report
}
