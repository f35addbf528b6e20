//! Branching-logic hints
//!
//! The platform's skip-logic engine is not decoded. Two heuristics produce
//! readable hints instead:
//! - a document-wide scan of script variable declarations whose name or
//!   value mentions logic keywords ([`extract_logic_signals`]);
//! - a per-question scan of logic attributes, hidden-by-default styles and
//!   option jump/relation markers, cross-referenced with the global signals
//!   by topic id ([`extract_logic_notes`]).

use regex::Regex;
use std::sync::OnceLock;

use super::node::SurveyNode;
use crate::config::ParserConfig;
use crate::text::{truncate, unique_keep_order};

pub const NO_LOGIC_SENTINEL: &str = "no explicit logic detected";

/// Attributes on a question node that carry display or jump conditions.
const QUESTION_LOGIC_ATTRS: &[&str] = &[
    "relation",
    "jumpto",
    "skipto",
    "rely",
    "cond",
    "condition",
    "showcond",
    "hidecond",
    "display",
];

const NOTE_SEPARATOR: &str = "; ";
const MAX_ATTACHED_SIGNALS: usize = 3;
const MAX_UNRESOLVED_SIGNALS: usize = 4;

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(?:var|let|const)\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*([^;]{1,800});")
            .expect("assignment pattern is valid")
    })
}

fn name_keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(rel|jump|logic|skip|display|cond)")
            .expect("name keyword pattern is valid")
    })
}

/// Values need the full `condition`; a bare `cond` hits words like "seconds".
fn value_keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(rel|jump|logic|skip|display|condition)")
            .expect("value keyword pattern is valid")
    })
}

fn question_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)q(\d+)").expect("question ref pattern is valid"))
}

/// A script variable believed to encode branching logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicSignal {
    pub name: String,
    /// Truncated value text.
    pub snippet: String,
}

/// Variable name to snippet lookup, in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicSignals {
    entries: Vec<LogicSignal>,
}

impl LogicSignals {
    /// Insert or overwrite; an overwritten name keeps its original position.
    pub fn insert(&mut self, name: String, snippet: String) {
        match self.entries.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.snippet = snippet,
            None => self.entries.push(LogicSignal { name, snippet }),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.snippet.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogicSignal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan raw document text for logic-looking variable declarations.
pub fn extract_logic_signals(text: &str, snippet_chars: usize) -> LogicSignals {
    let mut signals = LogicSignals::default();

    for cap in assignment_pattern().captures_iter(text) {
        let (Some(name), Some(value)) = (cap.get(1), cap.get(2)) else {
            continue;
        };
        if name_keyword_pattern().is_match(name.as_str())
            || value_keyword_pattern().is_match(value.as_str())
        {
            signals.insert(
                name.as_str().to_string(),
                truncate(value.as_str(), snippet_chars),
            );
        }
    }

    signals
}

/// Global signals whose value mentions `q{topic_id}` or `_{topic_id}`.
fn topic_signals(topic_id: u64, signals: &LogicSignals, max_chars: usize) -> Vec<String> {
    let q_key = format!("q{}", topic_id);
    let underscore_key = format!("_{}", topic_id);

    signals
        .iter()
        .filter(|signal| {
            let lower = signal.snippet.to_lowercase();
            lower.contains(&q_key) || lower.contains(&underscore_key)
        })
        .map(|signal| format!("{}={}", signal.name, truncate(&signal.snippet, max_chars)))
        .collect()
}

/// Notes read directly off the question node and its inputs.
fn explicit_notes<N: SurveyNode>(node: &N) -> Vec<String> {
    let mut notes = Vec::new();

    for attr in QUESTION_LOGIC_ATTRS {
        let value = node.attr_text(attr);
        if !value.is_empty() {
            notes.push(format!("attribute {}={}", attr, value));
        }
    }

    let style = node.attr_text("style").to_lowercase().replace(' ', "");
    if style.contains("display:none") {
        notes.push("hidden by default (style=display:none)".to_string());
    }

    for input in node.select_all("input, option") {
        let option_id = ["id", "name", "value"]
            .iter()
            .map(|attr| input.attr_text(attr))
            .find(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown option".to_string());

        let jumpto = input.attr_text("jumpto");
        if !jumpto.is_empty() {
            notes.push(format!("option {} jumps to {}", option_id, jumpto));
        }

        let rel = input.attr_text("rel");
        if !rel.is_empty() {
            let guess = question_ref_pattern()
                .captures(&rel)
                .and_then(|cap| cap.get(1))
                .map(|m| format!(" (possibly linked to question {})", m.as_str()))
                .unwrap_or_default();
            notes.push(format!("option {} triggers related field {}{}", option_id, rel, guess));
        }
    }

    notes
}

/// Logic notes for one question. Never empty.
pub fn extract_logic_notes<N: SurveyNode>(
    node: &N,
    topic_id: Option<u64>,
    signals: &LogicSignals,
    config: &ParserConfig,
) -> String {
    let candidates = topic_id
        .map(|id| topic_signals(id, signals, config.topic_signal_chars))
        .unwrap_or_default();

    let mut notes = unique_keep_order(explicit_notes(node));
    if !notes.is_empty() {
        if !candidates.is_empty() {
            let attached =
                unique_keep_order(candidates.into_iter().take(MAX_ATTACHED_SIGNALS));
            notes.push(format!(
                "candidate script markers: {}",
                attached.join(NOTE_SEPARATOR)
            ));
        }
        notes.truncate(config.max_logic_notes);
        return notes.join(NOTE_SEPARATOR);
    }

    if !candidates.is_empty() {
        let merged = unique_keep_order(candidates.into_iter().take(MAX_UNRESOLVED_SIGNALS));
        return format!(
            "candidate logic markers present: {} (no resolvable jump rule)",
            merged.join(NOTE_SEPARATOR)
        );
    }

    NO_LOGIC_SENTINEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::node::mock::MockNode;

    const SCRIPT: &str = r#"
        <script>
            var relationQ = "q3,1|q5";
            var jumpMap = {"q2": 5};
            var pageTitle = "Welcome";
            var hideRules = "display_7";
            let totalPage = 3;
            var cfg = {condition: 'q9'};
        </script>
    "#;

    #[test]
    fn test_signals_by_name_or_value() {
        let signals = extract_logic_signals(SCRIPT, 140);

        assert_eq!(signals.get("relationQ"), Some(r#""q3,1|q5""#));
        assert_eq!(signals.get("jumpMap"), Some(r#"{"q2": 5}"#));
        assert_eq!(signals.get("hideRules"), Some(r#""display_7""#));
        assert_eq!(signals.get("cfg"), Some("{condition: 'q9'}"));
        assert_eq!(signals.get("pageTitle"), None);
        assert_eq!(signals.get("totalPage"), None);
        assert_eq!(signals.len(), 4);
    }

    #[test]
    fn test_value_keyword_needs_full_condition() {
        let signals = extract_logic_signals(r#"var waitHint = "5 seconds";"#, 140);
        assert!(signals.is_empty());

        let signals = extract_logic_signals(r#"var condTimer = "5 seconds";"#, 140);
        assert_eq!(signals.get("condTimer"), Some(r#""5 seconds""#));
    }

    #[test]
    fn test_signal_values_truncated() {
        let long = format!("var skipLogic = \"{}\";", "x".repeat(300));
        let signals = extract_logic_signals(&long, 140);
        let snippet = signals.get("skipLogic").unwrap();
        assert_eq!(snippet.chars().count(), 140);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_redeclared_signal_keeps_position() {
        let text = "var jumpA = 1; var jumpB = 2; var jumpA = 3;";
        let signals = extract_logic_signals(text, 140);
        let names: Vec<&str> = signals.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["jumpA", "jumpB"]);
        assert_eq!(signals.get("jumpA"), Some("3"));
    }

    #[test]
    fn test_no_logic_sentinel() {
        let node = MockNode::new();
        let notes = extract_logic_notes(&node, Some(1), &LogicSignals::default(), &ParserConfig::default());
        assert_eq!(notes, NO_LOGIC_SENTINEL);
    }

    #[test]
    fn test_attribute_and_style_notes() {
        let node = MockNode::new()
            .with_attr("relation", " 2,1 ")
            .with_attr("style", "DISPLAY: none; color: red");
        let notes = extract_logic_notes(&node, None, &LogicSignals::default(), &ParserConfig::default());
        assert_eq!(
            notes,
            "attribute relation=2,1; hidden by default (style=display:none)"
        );
    }

    #[test]
    fn test_option_jump_and_relation() {
        let node = MockNode::new().with_query(
            "input, option",
            vec![
                MockNode::new().with_attr("id", "q1_1").with_attr("jumpto", "5"),
                MockNode::new().with_attr("value", "2").with_attr("rel", "q7_2"),
                MockNode::new().with_attr("rel", "extra"),
            ],
        );
        let notes = extract_logic_notes(&node, None, &LogicSignals::default(), &ParserConfig::default());
        assert_eq!(
            notes,
            "option q1_1 jumps to 5; \
             option 2 triggers related field q7_2 (possibly linked to question 7); \
             option unknown option triggers related field extra"
        );
    }

    #[test]
    fn test_topic_candidates_attached_to_explicit_notes() {
        let signals = extract_logic_signals(SCRIPT, 140);
        let node = MockNode::new().with_attr("jumpto", "4");
        let notes = extract_logic_notes(&node, Some(3), &signals, &ParserConfig::default());
        assert_eq!(
            notes,
            r#"attribute jumpto=4; candidate script markers: relationQ="q3,1|q5""#
        );
    }

    #[test]
    fn test_topic_candidates_without_explicit_notes() {
        let signals = extract_logic_signals(SCRIPT, 140);
        let notes = extract_logic_notes(&MockNode::new(), Some(7), &signals, &ParserConfig::default());
        assert_eq!(
            notes,
            r#"candidate logic markers present: hideRules="display_7" (no resolvable jump rule)"#
        );

        // Without a topic id there is nothing to cross-reference.
        let notes = extract_logic_notes(&MockNode::new(), None, &signals, &ParserConfig::default());
        assert_eq!(notes, NO_LOGIC_SENTINEL);
    }

    #[test]
    fn test_candidate_counts_capped() {
        let script: String = (1..=5)
            .map(|i| format!(r#"var jump{} = "q4";"#, i))
            .collect();
        let signals = extract_logic_signals(&script, 140);
        assert_eq!(signals.len(), 5);
        let config = ParserConfig::default();

        let node = MockNode::new().with_attr("jumpto", "6");
        let notes = extract_logic_notes(&node, Some(4), &signals, &config);
        assert!(notes.starts_with("attribute jumpto=6; candidate script markers: jump1="));
        assert_eq!(notes.matches(r#"="q4""#).count(), 3);

        let notes = extract_logic_notes(&MockNode::new(), Some(4), &signals, &config);
        assert!(notes.starts_with("candidate logic markers present: jump1="));
        assert!(notes.ends_with(r#"jump4="q4" (no resolvable jump rule)"#));
        assert_eq!(notes.matches(r#"="q4""#).count(), 4);
    }

    #[test]
    fn test_notes_capped() {
        let inputs = (0..12)
            .map(|i| MockNode::new().with_attr("id", &format!("o{}", i)).with_attr("jumpto", "9"))
            .collect();
        let node = MockNode::new().with_query("input, option", inputs);
        let notes = extract_logic_notes(&node, None, &LogicSignals::default(), &ParserConfig::default());
        assert_eq!(notes.split(NOTE_SEPARATOR).count(), 8);
    }
}
