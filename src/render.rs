//! Renderers over the survey model
//!
//! Renderers only read the model. Writing the output anywhere is the
//! caller's concern.

use serde::Serialize;

use crate::error::{Result, SurveyError};
use crate::model::{Question, Survey};

mod docx;

pub use docx::DocxRenderer;

pub const SCHEMA_VERSION: &str = "1.0";

pub trait SurveyRenderer {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Artifact bytes, ready to be written as-is.
    fn render_bytes(&self, survey: &Survey) -> Result<Vec<u8>>;
}

/// Renderers whose artifact is UTF-8 text.
pub trait TextRenderer: SurveyRenderer {
    fn render(&self, survey: &Survey) -> Result<String>;
}

#[derive(Serialize)]
struct SectionPayload<'a> {
    name: &'a str,
    start_topic: Option<u64>,
    end_topic: Option<u64>,
    question_count: usize,
    questions: Vec<&'a Question>,
}

#[derive(Serialize)]
struct SurveyPayload<'a> {
    schema_version: &'static str,
    title: &'a str,
    description: &'a str,
    source_url: &'a str,
    crawl_time: &'a str,
    question_count: usize,
    sections: Vec<SectionPayload<'a>>,
    questions: &'a [Question],
}

/// Pretty-printed JSON with per-section question lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl SurveyRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render_bytes(&self, survey: &Survey) -> Result<Vec<u8>> {
        self.render(survey).map(String::into_bytes)
    }
}

impl TextRenderer for JsonRenderer {
    fn render(&self, survey: &Survey) -> Result<String> {
        let sections = survey
            .sections
            .iter()
            .map(|section| {
                let questions: Vec<&Question> = survey.questions_in(&section.name).collect();
                SectionPayload {
                    name: &section.name,
                    start_topic: section.start_topic,
                    end_topic: section.end_topic,
                    question_count: questions.len(),
                    questions,
                }
            })
            .collect();

        let payload = SurveyPayload {
            schema_version: SCHEMA_VERSION,
            title: &survey.title,
            description: &survey.description,
            source_url: &survey.source_url,
            crawl_time: &survey.crawl_time,
            question_count: survey.questions.len(),
            sections,
            questions: &survey.questions,
        };

        serde_json::to_string_pretty(&payload)
            .map_err(|e| SurveyError::Render(format!("JSON serialization failed: {}", e)))
    }
}

/// Markdown document, one heading per populated section.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

pub(crate) fn or_na(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl SurveyRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render_bytes(&self, survey: &Survey) -> Result<Vec<u8>> {
        self.render(survey).map(String::into_bytes)
    }
}

impl TextRenderer for MarkdownRenderer {
    fn render(&self, survey: &Survey) -> Result<String> {
        let mut lines = vec![
            format!("# {}", survey.title),
            String::new(),
            "## Metadata".to_string(),
            format!("- source: {}", survey.source_url),
            format!("- crawl time: {}", survey.crawl_time),
            format!("- questions: {}", survey.questions.len()),
        ];
        if !survey.description.is_empty() {
            lines.push(format!("- description: {}", survey.description));
        }
        lines.push(String::new());

        for section in &survey.sections {
            let questions: Vec<&Question> = survey.questions_in(&section.name).collect();
            if questions.is_empty() {
                continue;
            }
            lines.push(format!("## Section: {}", section.name));
            lines.push(format!("- first topic: {}", or_na(section.start_topic)));
            lines.push(format!("- last topic: {}", or_na(section.end_topic)));
            lines.push(format!("- questions: {}", questions.len()));
            lines.push(String::new());

            for q in questions {
                lines.push(format!("### Q{}", q.display_no));
                lines.push(format!("- index: {}", q.index));
                lines.push(format!("- topic_id: {}", or_na(q.topic_id)));
                lines.push(format!("- type: {}", q.qtype));
                lines.push(format!("- required: {}", yes_no(q.required)));
                lines.push(format!("- stem: {}", q.stem));
                lines.push("- options:".to_string());
                lines.push("```text".to_string());
                lines.push(q.options.clone());
                lines.push("```".to_string());
                lines.push("- logic_notes:".to_string());
                lines.push("```text".to_string());
                lines.push(q.logic_notes.clone());
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }

        Ok(format!("{}\n", lines.join("\n").trim_end()))
    }
}
