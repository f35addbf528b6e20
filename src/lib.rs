//! Survey page parser
//!
//! Turns a public survey page into a structured [`Survey`]:
//! - gated-page detection (captcha, password, login, rate limit)
//! - section and question extraction from the question container
//! - type-specific option text (choice, scale, matrix, free text)
//! - best-effort branching hints from attributes and script variables
//!
//! Fetching, rendering, batch export and a C FFI surface sit around the core.

pub mod batch;
pub mod config;
pub mod error;
pub mod extractors;
pub mod ffi;
pub mod fetch;
pub mod locator;
pub mod model;
pub mod parser;
pub mod render;
pub mod restriction;
pub mod sections;
pub mod text;

pub use batch::{export_many, BatchReport, ExportOutcome, ExportStatus};
pub use config::{FetchConfig, ParserConfig};
pub use error::{Result, SurveyError};
pub use fetch::{fetch_html, Fetcher, HttpFetcher};
pub use locator::validate_locator;
pub use model::{Question, QuestionType, Section, Survey};
pub use parser::{parse_survey, parse_survey_with};
pub use render::{DocxRenderer, JsonRenderer, MarkdownRenderer, SurveyRenderer, TextRenderer};
pub use restriction::{detect_restriction, RestrictionReason};
