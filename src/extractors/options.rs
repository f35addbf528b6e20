//! Option extraction, one strategy per question type.

use super::node::{node_text, SurveyNode};
use crate::model::QuestionType;
use crate::text::unique_keep_order;

const SINGLE_CHOICE_LABELS: &str = ".ui-radio .label";
const MULTI_CHOICE_LABELS: &str = ".ui-checkbox .label";
const GENERIC_LABELS: &str = ".label";

const SCALE_LEFT: &str = ".scaleTitle_frist";
const SCALE_RIGHT: &str = ".scaleTitle_last";
const SCALE_ANCHORS: &str = ".scale-rating a[val], .scale-div a[val]";

const MATRIX_TABLE: &str = "table.matrix-rating, table.matrixtable";

pub const FREE_TEXT_PLACEHOLDER: &str = "(text input)";
pub const SINGLE_CHOICE_EMPTY: &str = "(single-choice, no options found)";
pub const MULTI_CHOICE_EMPTY: &str = "(multi-choice, no options found)";
pub const SCALE_EMPTY: &str = "(scale, no scale labels found)";
pub const MATRIX_NO_TABLE: &str = "(matrix, no table structure found)";
pub const MATRIX_NO_ROWS: &str = "(matrix, table is empty)";
pub const MATRIX_NO_LABELS: &str = "(matrix, no row or column labels found)";
pub const UNKNOWN_EMPTY: &str = "(no options or open-ended)";

const LABEL_SEPARATOR: &str = "; ";

/// Options text for a question node. Never empty.
pub fn extract_options<N: SurveyNode>(node: &N, qtype: &QuestionType) -> String {
    match qtype {
        QuestionType::FreeText => FREE_TEXT_PLACEHOLDER.to_string(),
        QuestionType::SingleChoice => choice_options(node, SINGLE_CHOICE_LABELS, SINGLE_CHOICE_EMPTY),
        QuestionType::MultiChoice => choice_options(node, MULTI_CHOICE_LABELS, MULTI_CHOICE_EMPTY),
        QuestionType::Scale => scale_options(node),
        QuestionType::Matrix => matrix_options(node),
        QuestionType::Unknown(_) => choice_options(node, GENERIC_LABELS, UNKNOWN_EMPTY),
    }
}

/// De-duplicated, non-empty label texts under `selector`.
fn option_labels<N: SurveyNode>(node: &N, selector: &str) -> Vec<String> {
    unique_keep_order(
        node.select_all(selector)
            .iter()
            .map(|label| label.text_content())
            .filter(|text| !text.is_empty()),
    )
}

fn choice_options<N: SurveyNode>(node: &N, selector: &str, placeholder: &str) -> String {
    let labels = option_labels(node, selector);
    if labels.is_empty() {
        placeholder.to_string()
    } else {
        labels.join(LABEL_SEPARATOR)
    }
}

fn scale_options<N: SurveyNode>(node: &N) -> String {
    let left = node_text(node.select_first(SCALE_LEFT).as_ref());
    let right = node_text(node.select_first(SCALE_RIGHT).as_ref());

    let anchors = unique_keep_order(node.select_all(SCALE_ANCHORS).iter().filter_map(|anchor| {
        let value = anchor.attr_text("val");
        if value.is_empty() {
            return None;
        }
        let title = Some(anchor.attr_text("title"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| anchor.attr_text("htitle"));
        Some(if title.is_empty() {
            value
        } else {
            format!("{}({})", value, title)
        })
    }));

    let mut lines = Vec::new();
    if !left.is_empty() || !right.is_empty() {
        lines.push(format!("range: {} -> {}", or_dash(&left), or_dash(&right)));
    }
    if !anchors.is_empty() {
        lines.push(format!("scale: {}", anchors.join(", ")));
    }

    if lines.is_empty() {
        SCALE_EMPTY.to_string()
    } else {
        lines.join("\n")
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn matrix_options<N: SurveyNode>(node: &N) -> String {
    let Some(table) = node.select_first(MATRIX_TABLE) else {
        return MATRIX_NO_TABLE.to_string();
    };

    let rows = table.select_all("tr");
    let Some((header, body)) = rows.split_first() else {
        return MATRIX_NO_ROWS.to_string();
    };

    let mut columns: Vec<String> = header
        .select_all("th, td")
        .iter()
        .map(|cell| cell.text_content())
        .collect();
    // Leading corner cell above the row labels.
    if columns.first().is_some_and(|c| c.is_empty()) {
        columns.remove(0);
    }
    columns.retain(|c| !c.is_empty());

    let row_labels: Vec<String> = body
        .iter()
        .filter_map(|row| row.select_first("th, td"))
        .map(|cell| cell.text_content())
        .filter(|text| !text.is_empty())
        .collect();

    let mut lines = Vec::new();
    if !columns.is_empty() {
        lines.push(format!("columns: {}", columns.join(" | ")));
    }
    if !row_labels.is_empty() {
        lines.push(format!("rows: {}", row_labels.join(LABEL_SEPARATOR)));
    }

    if lines.is_empty() {
        MATRIX_NO_LABELS.to_string()
    } else {
        lines.join("\n")
    }
}
