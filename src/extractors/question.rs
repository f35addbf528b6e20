//! Per-question metadata extraction

use regex::Regex;
use std::sync::OnceLock;

use super::logic::{extract_logic_notes, LogicSignals};
use super::node::{node_text, SurveyNode};
use super::options::extract_options;
use crate::config::ParserConfig;
use crate::model::{Question, QuestionType};

pub const DIVIDER_CLASS: &str = "cutfield";
pub const FIELD_CLASS: &str = "field";
pub const CONTAINED_FIELD_CLASS: &str = "ui-field-contain";

const TOPIC_ATTR: &str = "topic";
const TYPE_ATTR: &str = "type";
const REQUIRED_ATTR: &str = "req";
const REQUIRED_MARKER: &str = ".field-label .req";
const STEM_SELECTOR: &str = ".topichtml";

pub const STEM_PLACEHOLDER: &str = "(stem not recognized)";

fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digits pattern is valid"))
}

pub fn is_divider<N: SurveyNode>(node: &N) -> bool {
    node.has_class(DIVIDER_CLASS)
}

pub fn is_question<N: SurveyNode>(node: &N) -> bool {
    node.has_class(FIELD_CLASS) && node.has_class(CONTAINED_FIELD_CLASS)
}

/// Section name carried by a divider: its first nested `div`, else its own text.
pub fn divider_name<N: SurveyNode>(node: &N) -> String {
    let inner = node_text(node.select_first("div").as_ref());
    if inner.is_empty() {
        node.text_content()
    } else {
        inner
    }
}

/// First run of ASCII digits in `raw`, if it fits a `u64`.
pub fn parse_topic_id(raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    digits_pattern().find(raw)?.as_str().parse().ok()
}

pub fn is_required<N: SurveyNode>(node: &N) -> bool {
    node.attr_text(REQUIRED_ATTR) == "1" || node.select_first(REQUIRED_MARKER).is_some()
}

pub fn question_stem<N: SurveyNode>(node: &N) -> String {
    let stem = node_text(node.select_first(STEM_SELECTOR).as_ref());
    if stem.is_empty() {
        STEM_PLACEHOLDER.to_string()
    } else {
        stem
    }
}

/// Build a [`Question`] from a recognized question node.
pub fn extract_question<N: SurveyNode>(
    node: &N,
    display_index: usize,
    section: &str,
    signals: &LogicSignals,
    config: &ParserConfig,
) -> Question {
    let topic_id = parse_topic_id(node.attr(TOPIC_ATTR));
    let qtype = QuestionType::from_code(&node.attr_text(TYPE_ATTR));

    let options = extract_options(node, &qtype);
    let logic_notes = extract_logic_notes(node, topic_id, signals, config);

    tracing::trace!(display_index, ?topic_id, %qtype, "question extracted");

    Question {
        index: display_index,
        topic_id,
        display_no: display_index.to_string(),
        required: is_required(node),
        stem: question_stem(node),
        qtype,
        options,
        logic_notes,
        section: section.to_string(),
    }
}
