//! Document indexing: parse the page, locate the question container and
//! read page-level metadata.

use scraper::{ElementRef, Html, Selector};

use super::node::{node_text, SurveyNode};
use crate::error::{Result, SurveyError};

/// Id of the node holding every question on the page.
pub const CONTAINER_SELECTOR: &str = "#divQuestion";

const TITLE_SELECTOR: &str = "#htitle";

/// Tried in order; the first with non-empty text wins.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "#divDesc",
    "#desc",
    ".desc_begin",
    ".description",
    ".survey-desc",
];

const META_DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[property="og:description"]"#,
    r#"meta[name="description"]"#,
];

/// A parsed survey page.
pub struct SurveyDocument {
    document: Html,
}

impl SurveyDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn first(&self, selector_str: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector_str).ok()?;
        self.document.select(&selector).next()
    }

    /// The question container.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::StructuralParse`] when the page has none.
    pub fn container(&self) -> Result<ElementRef<'_>> {
        self.first(CONTAINER_SELECTOR).ok_or_else(|| {
            SurveyError::StructuralParse(format!(
                "question container {} not found",
                CONTAINER_SELECTOR
            ))
        })
    }

    /// Heading text, then `<title>`, then `fallback`.
    pub fn title(&self, fallback: &str) -> String {
        [TITLE_SELECTOR, "title"]
            .iter()
            .map(|selector| node_text(self.first(selector).as_ref()))
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Survey introduction, empty when the page has none.
    pub fn description(&self) -> String {
        for selector in DESCRIPTION_SELECTORS {
            let text = node_text(self.first(selector).as_ref());
            if !text.is_empty() {
                return text;
            }
        }

        META_DESCRIPTION_SELECTORS
            .iter()
            .filter_map(|selector| self.first(selector))
            .map(|meta| meta.attr_text("content"))
            .find(|content| !content.is_empty())
            .unwrap_or_default()
    }
}
