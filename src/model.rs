//! Survey data model handed to renderers

use serde::{Serialize, Serializer};
use std::fmt;

/// Question kind, mapped from the platform's numeric type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionType {
    FreeText,
    SingleChoice,
    MultiChoice,
    Scale,
    Matrix,
    /// Unmapped code, kept verbatim (empty when the attribute was missing).
    Unknown(String),
}

impl QuestionType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => QuestionType::FreeText,
            "3" => QuestionType::SingleChoice,
            "4" => QuestionType::MultiChoice,
            "5" => QuestionType::Scale,
            "6" => QuestionType::Matrix,
            other => QuestionType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::FreeText => f.write_str("free-text"),
            QuestionType::SingleChoice => f.write_str("single-choice"),
            QuestionType::MultiChoice => f.write_str("multi-choice"),
            QuestionType::Scale => f.write_str("scale"),
            QuestionType::Matrix => f.write_str("matrix"),
            QuestionType::Unknown(code) if code.is_empty() => f.write_str("unknown(N/A)"),
            QuestionType::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub start_topic: Option<u64>,
    pub end_topic: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// 1-based position among recognized question nodes.
    pub index: usize,
    pub topic_id: Option<u64>,
    pub display_no: String,
    pub qtype: QuestionType,
    pub required: bool,
    pub stem: String,
    pub options: String,
    pub logic_notes: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Survey {
    pub title: String,
    pub description: String,
    pub source_url: String,
    pub crawl_time: String,
    pub sections: Vec<Section>,
    pub questions: Vec<Question>,
}

impl Survey {
    /// Questions belonging to `section`, in display order.
    pub fn questions_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.section == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_mapping() {
        assert_eq!(QuestionType::from_code("1"), QuestionType::FreeText);
        assert_eq!(QuestionType::from_code("3"), QuestionType::SingleChoice);
        assert_eq!(QuestionType::from_code("4"), QuestionType::MultiChoice);
        assert_eq!(QuestionType::from_code("5"), QuestionType::Scale);
        assert_eq!(QuestionType::from_code("6"), QuestionType::Matrix);
        assert_eq!(
            QuestionType::from_code("8"),
            QuestionType::Unknown("8".to_string())
        );
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(QuestionType::Matrix.to_string(), "matrix");
        assert_eq!(QuestionType::from_code("8").to_string(), "unknown(8)");
        assert_eq!(QuestionType::from_code("").to_string(), "unknown(N/A)");
        assert_eq!(
            serde_json::to_string(&QuestionType::SingleChoice).unwrap(),
            r#""single-choice""#
        );
    }
}
