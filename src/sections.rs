//! Section tracking during traversal and post-processing afterwards

use crate::model::{Question, Section};

/// Traversal-local section state: the active section and the names seen so
/// far, in first-occurrence order.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    current: String,
    ordered: Vec<String>,
}

impl SectionTracker {
    /// Start in the implicit default section.
    pub fn new(default_section: &str) -> Self {
        Self {
            current: default_section.to_string(),
            ordered: vec![default_section.to_string()],
        }
    }

    /// Switch to the section named by a divider. Blank names are ignored.
    pub fn enter(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.current = name.to_string();
        if !self.ordered.iter().any(|n| n == name) {
            self.ordered.push(name.to_string());
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn into_names(self) -> Vec<String> {
        self.ordered
    }
}

/// Compute topic ranges per section and drop empty sections.
///
/// A section without questions survives only when it is the sole section.
/// The result is never empty.
pub fn build_sections(
    questions: &[Question],
    ordered_names: &[String],
    default_section: &str,
) -> Vec<Section> {
    let sole = ordered_names.len() == 1;
    let mut sections = Vec::new();

    for name in ordered_names {
        let members: Vec<&Question> = questions.iter().filter(|q| &q.section == name).collect();
        if members.is_empty() && !sole {
            continue;
        }
        let topics = members.iter().filter_map(|q| q.topic_id);
        sections.push(Section {
            name: name.clone(),
            start_topic: topics.clone().min(),
            end_topic: topics.max(),
        });
    }

    if sections.is_empty() {
        sections.push(Section {
            name: default_section.to_string(),
            start_topic: None,
            end_topic: None,
        });
    }
    sections
}
