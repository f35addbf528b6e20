//! Narrow node capability used by the question extractors
//!
//! Extraction code only needs attribute lookup, class checks, normalized
//! text and selector queries, so it is written against [`SurveyNode`]
//! instead of a concrete DOM.

use scraper::{ElementRef, Selector};

use crate::text::normalize_text;

pub trait SurveyNode: Sized {
    /// Raw attribute value, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    fn has_class(&self, class: &str) -> bool;

    /// Whitespace-normalized text of the node and its descendants.
    fn text_content(&self) -> String;

    /// Descendants matching a CSS selector, in document order. The node
    /// itself is never included.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }

    /// Normalized attribute value, empty when missing.
    fn attr_text(&self, name: &str) -> String {
        self.attr(name).map(normalize_text).unwrap_or_default()
    }
}

impl<'a> SurveyNode for ElementRef<'a> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn text_content(&self) -> String {
        normalize_text(&self.text().collect::<Vec<_>>().join(" "))
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        self.select(&selector).filter(|el| el != self).collect()
    }
}

/// Normalized text of an optional node, empty when absent.
pub fn node_text<N: SurveyNode>(node: Option<&N>) -> String {
    node.map(|n| n.text_content()).unwrap_or_default()
}
