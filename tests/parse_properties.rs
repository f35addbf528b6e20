use survey_parser::extractors::NO_LOGIC_SENTINEL;
use survey_parser::{parse_survey, QuestionType, RestrictionReason, Survey, SurveyError};

fn page(body: &str) -> String {
    format!(
        r#"<html><head><title>Survey</title></head><body><div id="divQuestion">{}</div></body></html>"#,
        body
    )
}

fn question(topic: u32, qtype: &str, stem: &str) -> String {
    format!(
        r#"<div class="field ui-field-contain" topic="{}" type="{}">
             <div class="field-label"><div class="topichtml">{}</div></div>
           </div>"#,
        topic, qtype, stem
    )
}

fn without_time(mut survey: Survey) -> Survey {
    survey.crawl_time.clear();
    survey
}

#[test]
fn test_display_indices_contiguous() {
    let body: String = (1..=6).map(|i| question(i * 10, "1", "Q")).collect();
    let survey = parse_survey(&page(&body), "u").unwrap();

    let indices: Vec<usize> = survey.questions.iter().map(|q| q.index).collect();
    assert_eq!(indices, (1..=6).collect::<Vec<_>>());
    let display: Vec<&str> = survey.questions.iter().map(|q| q.display_no.as_str()).collect();
    assert_eq!(display, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn test_sections_without_default_members() {
    let body = format!(
        r#"<div class="cutfield"><div>Part A</div></div>{}{}
           <div class="cutfield"><div>Part B</div></div>{}{}"#,
        question(1, "1", "a1"),
        question(2, "1", "a2"),
        question(3, "1", "b1"),
        question(4, "1", "b2"),
    );
    let survey = parse_survey(&page(&body), "u").unwrap();

    let names: Vec<&str> = survey.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Part A", "Part B"]);
    assert_eq!(survey.questions.len(), 4);
    assert_eq!(survey.sections[0].start_topic, Some(1));
    assert_eq!(survey.sections[0].end_topic, Some(2));
    assert_eq!(survey.sections[1].start_topic, Some(3));
    assert_eq!(survey.sections[1].end_topic, Some(4));

    for q in &survey.questions {
        assert!(survey.sections.iter().any(|s| s.name == q.section));
    }
}

#[test]
fn test_section_count_bounded_by_dividers() {
    let body = format!(
        r#"{}<div class="cutfield">X</div><div class="cutfield">Y</div>{}"#,
        question(1, "1", "q"),
        question(2, "1", "q"),
    );
    let survey = parse_survey(&page(&body), "u").unwrap();

    let names: Vec<&str> = survey.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Questions", "Y"]);
    assert!(survey.sections.len() <= 3);
}

#[test]
fn test_parse_is_deterministic() {
    let body = format!(
        r#"{}<div class="cutfield"><div>Tail</div></div>{}"#,
        question(5, "3", "pick"),
        question(6, "5", "rate"),
    );
    let html = page(&body);
    let first = without_time(parse_survey(&html, "u").unwrap());
    let second = without_time(parse_survey(&html, "u").unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_matrix_columns_and_rows() {
    let body = r#"
    <div class="field ui-field-contain" topic="1" type="6">
      <div class="field-label"><div class="topichtml">Rate each</div></div>
      <table class="matrixtable">
        <tr><td></td><td>Yes</td><td>No</td></tr>
        <tr><td>Row 1</td><td></td><td></td></tr>
        <tr><td>Row 2</td><td></td><td></td></tr>
        <tr><td>Row 3</td><td></td><td></td></tr>
        <tr><td>Row 4</td><td></td><td></td></tr>
      </table>
    </div>"#;
    let survey = parse_survey(&page(body), "u").unwrap();
    let options = &survey.questions[0].options;

    let columns = options.lines().find(|l| l.starts_with("columns: ")).unwrap();
    let rows = options.lines().find(|l| l.starts_with("rows: ")).unwrap();
    assert_eq!(columns.trim_start_matches("columns: ").split(" | ").count(), 2);
    assert_eq!(rows.trim_start_matches("rows: ").split("; ").count(), 4);
    assert_eq!(survey.questions[0].qtype, QuestionType::Matrix);
}

#[test]
fn test_password_field_rejected_without_container() {
    let html = r#"<html><body><form><input type="password" name="pwd"></form></body></html>"#;
    match parse_survey(html, "u") {
        Err(SurveyError::Restricted(reason)) => {
            assert_eq!(reason, RestrictionReason::AccessPassword)
        }
        other => panic!("expected restricted page, got {:?}", other),
    }
}

#[test]
fn test_missing_topic_attribute() {
    let body = format!(
        r#"{}<div class="field ui-field-contain" type="1"><div class="topichtml">No topic</div></div>"#,
        question(1, "1", "first")
    );
    let survey = parse_survey(&page(&body), "u").unwrap();

    assert_eq!(survey.questions[1].topic_id, None);
    assert_eq!(survey.questions[1].index, 2);
    assert_eq!(survey.questions[1].stem, "No topic");
}

#[test]
fn test_placeholders_never_empty() {
    let body = format!(
        "{}{}{}{}{}",
        question(1, "3", "single"),
        question(2, "4", "multi"),
        question(3, "5", "scale"),
        question(4, "6", "matrix"),
        question(5, "9", "other"),
    );
    let survey = parse_survey(&page(&body), "u").unwrap();
    let options: Vec<&str> = survey.questions.iter().map(|q| q.options.as_str()).collect();

    assert_eq!(
        options,
        vec![
            "(single-choice, no options found)",
            "(multi-choice, no options found)",
            "(scale, no scale labels found)",
            "(matrix, no table structure found)",
            "(no options or open-ended)",
        ]
    );
    assert_eq!(survey.questions[4].qtype.to_string(), "unknown(9)");
    assert!(survey.questions.iter().all(|q| q.logic_notes == NO_LOGIC_SENTINEL));
}
