//! Word document output (docx-rs)
//!
//! Title and metadata paragraphs, then per populated section a heading, a
//! topic-range line and a six-column question table.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow, WidthType};

use super::{or_na, yes_no, SurveyRenderer};
use crate::error::{Result, SurveyError};
use crate::model::{Question, Survey};

const COLUMN_HEADERS: [&str; 6] = ["No.", "Type", "Required", "Stem", "Options", "Logic"];

/// Column widths in twips (567 per centimetre).
const COLUMN_WIDTHS: [usize; 6] = [680, 1021, 567, 2552, 2268, 1701];

/// Run sizes are in half-points.
const TITLE_SIZE: usize = 36;
const SECTION_SIZE: usize = 28;

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn heading(text: &str, size: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(size))
}

/// One paragraph per line. A cell always holds at least one paragraph.
fn cell(text: &str, width: usize) -> TableCell {
    let mut lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        lines.push("");
    }
    lines.into_iter().fold(
        TableCell::new().width(width, WidthType::Dxa),
        |cell, line| cell.add_paragraph(paragraph(line)),
    )
}

fn row(values: [&str; 6]) -> TableRow {
    TableRow::new(
        values
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(value, width)| cell(value, width))
            .collect(),
    )
}

fn question_table(questions: &[&Question]) -> Table {
    let mut rows = vec![row(COLUMN_HEADERS)];
    for q in questions {
        let qtype = q.qtype.to_string();
        rows.push(row([
            q.display_no.as_str(),
            qtype.as_str(),
            yes_no(q.required),
            q.stem.as_str(),
            q.options.as_str(),
            q.logic_notes.as_str(),
        ]));
    }
    Table::new(rows).set_grid(COLUMN_WIDTHS.to_vec())
}

impl SurveyRenderer for DocxRenderer {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render_bytes(&self, survey: &Survey) -> Result<Vec<u8>> {
        let mut doc = Docx::new().add_paragraph(heading(&survey.title, TITLE_SIZE));
        if !survey.description.is_empty() {
            doc = doc.add_paragraph(paragraph(&format!("Description: {}", survey.description)));
        }
        doc = doc
            .add_paragraph(paragraph(&format!("Source: {}", survey.source_url)))
            .add_paragraph(paragraph(&format!("Crawl time: {}", survey.crawl_time)))
            .add_paragraph(paragraph(&format!("Questions: {}", survey.questions.len())));

        for section in &survey.sections {
            let questions: Vec<&Question> = survey.questions_in(&section.name).collect();
            if questions.is_empty() {
                continue;
            }
            doc = doc
                .add_paragraph(heading(&section.name, SECTION_SIZE))
                .add_paragraph(paragraph(&format!(
                    "Topics {} to {}",
                    or_na(section.start_topic),
                    or_na(section.end_topic)
                )))
                .add_table(question_table(&questions))
                .add_paragraph(paragraph(""));
        }

        let mut buffer = Cursor::new(Vec::new());
        doc.build()
            .pack(&mut buffer)
            .map_err(|e| SurveyError::Render(format!("docx packaging failed: {}", e)))?;

        tracing::debug!(bytes = buffer.get_ref().len(), "docx rendered");
        Ok(buffer.into_inner())
    }
}
