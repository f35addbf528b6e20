//! Survey parse pipeline
//!
//! Restriction check, DOM indexing, one document-order traversal over the
//! question container, section post-processing, then assembly.

use chrono::Local;
use scraper::ElementRef;

use crate::config::ParserConfig;
use crate::error::{Result, SurveyError};
use crate::extractors::{
    divider_name, extract_logic_signals, extract_question, is_divider, is_question, LogicSignals,
    SurveyDocument, SurveyNode,
};
use crate::model::{Question, Section, Survey};
use crate::restriction::detect_restriction;
use crate::sections::{build_sections, SectionTracker};

pub const CRAWL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a survey page with the default configuration.
///
/// # Errors
///
/// [`SurveyError::Restricted`] for gated pages, [`SurveyError::StructuralParse`]
/// when the container is missing or holds no questions.
pub fn parse_survey(html: &str, source_url: &str) -> Result<Survey> {
    parse_survey_with(html, source_url, &ParserConfig::default())
}

pub fn parse_survey_with(html: &str, source_url: &str, config: &ParserConfig) -> Result<Survey> {
    config.validate()?;

    if let Some(reason) = detect_restriction(html) {
        tracing::warn!(source_url, %reason, "restricted page, skipping parse");
        return Err(SurveyError::Restricted(reason));
    }

    let document = SurveyDocument::parse(html);
    let container = document.container()?;
    tracing::debug!(source_url, "question container found");

    let signals = extract_logic_signals(html, config.signal_snippet_chars);
    if signals.is_empty() {
        tracing::debug!("no logic signals in page scripts");
    } else {
        tracing::debug!(count = signals.len(), "logic signals collected");
    }

    let (questions, section_names) = traverse(container, &signals, config);
    if questions.is_empty() {
        return Err(SurveyError::StructuralParse(
            "page parsed but no questions were recognized".into(),
        ));
    }

    let sections = build_sections(&questions, &section_names, &config.default_section);
    tracing::debug!(
        questions = questions.len(),
        sections = sections.len(),
        "survey parsed"
    );

    Ok(assemble(
        document.title(&config.fallback_title),
        document.description(),
        source_url,
        Local::now().format(CRAWL_TIME_FORMAT).to_string(),
        sections,
        questions,
    ))
}

/// Walk every `div` under the container in document order, switching
/// sections at dividers and extracting each question node.
fn traverse(
    container: ElementRef<'_>,
    signals: &LogicSignals,
    config: &ParserConfig,
) -> (Vec<Question>, Vec<String>) {
    let mut tracker = SectionTracker::new(&config.default_section);
    let mut questions = Vec::new();
    let mut display_index = 0;

    for node in container.select_all("div") {
        if is_divider(&node) {
            let name = divider_name(&node);
            tracing::trace!(section = %name, "divider");
            tracker.enter(&name);
            continue;
        }

        if is_question(&node) {
            display_index += 1;
            questions.push(extract_question(
                &node,
                display_index,
                tracker.current(),
                signals,
                config,
            ));
        }
    }

    (questions, tracker.into_names())
}

/// Compose the final model. No extraction happens here.
pub fn assemble(
    title: String,
    description: String,
    source_url: &str,
    crawl_time: String,
    sections: Vec<Section>,
    questions: Vec<Question>,
) -> Survey {
    Survey {
        title,
        description,
        source_url: source_url.to_string(),
        crawl_time,
        sections,
        questions,
    }
}
