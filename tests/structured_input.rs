use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use ieltsprep::parser::{parse_txt, ParseOptions};
use ieltsprep::source::{kind_for_path, load_test, structured_to_test, DocumentKind};
use ieltsprep::template::{example_document, ExampleFormat};
use ieltsprep::validate::{structure_issues, validate_structure};

#[test]
fn test_validator_accepts_fixture() {
    let content = fs::read_to_string("fixtures/sample_test.json").expect("Cannot read fixture");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert!(validate_structure(&value));
    assert!(structure_issues(&value).is_empty());
}

#[test]
fn test_load_json_assigns_missing_ids() {
    let test = load_test(
        Path::new("fixtures/sample_test.json"),
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(test.title, "Academic Reading Practice 2");
    assert_eq!(test.passages.len(), 2);

    // Questions without ids get sequential document-wide ids; explicit ids
    // are kept verbatim.
    assert_eq!(test.passages[0].questions[0].id, "q1");
    assert_eq!(test.passages[0].questions[1].id, "q2");
    assert_eq!(test.passages[1].questions[0].id, "q9");

    assert_eq!(test.passages[0].questions[1].word_limit, Some(1));
    let options = test.passages[1].questions[0].options.as_ref().unwrap();
    assert_eq!(options.len(), 4);
}

#[test]
fn test_load_yaml_document() {
    let test = load_test(
        Path::new("fixtures/sample_test.yaml"),
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(test.title, "Academic Reading Practice 3");
    assert_eq!(test.level, "5.5");
    assert_eq!(test.passages.len(), 1);
    assert_eq!(test.passages[0].questions.len(), 2);
    assert_eq!(test.passages[0].questions[0].kind.as_str(), "tfng");
    assert_eq!(test.passages[0].questions[1].id, "q2");
}

#[test]
fn test_validator_rejects_missing_passages() {
    assert!(!validate_structure(&json!({ "title": "No passages" })));
}

#[test]
fn test_validator_rejects_non_list_passages() {
    assert!(!validate_structure(&json!({ "passages": "nope" })));
}

#[test]
fn test_validator_rejects_empty_passages() {
    assert!(!validate_structure(&json!({ "passages": [] })));
}

#[test]
fn test_validator_rejects_passage_missing_fields() {
    let value = json!({
        "passages": [
            { "title": "T", "questions": [] }
        ]
    });
    assert!(!validate_structure(&value));
    let issues = structure_issues(&value);
    assert!(issues.iter().any(|i| i.contains("text is missing")), "{:?}", issues);
}

#[test]
fn test_validator_rejects_non_list_questions() {
    let value = json!({
        "passages": [
            { "title": "T", "text": "body", "questions": "nope" }
        ]
    });
    assert!(!validate_structure(&value));
}

#[test]
fn test_validator_rejects_question_missing_answer() {
    let value = json!({
        "passages": [
            {
                "title": "T",
                "text": "body",
                "questions": [
                    { "type": "tfng", "text": "Statement." }
                ]
            }
        ]
    });
    assert!(!validate_structure(&value));
}

#[test]
fn test_validator_rejects_empty_question_fields() {
    let value = json!({
        "passages": [
            {
                "title": "T",
                "text": "body",
                "questions": [
                    { "type": "", "text": "Statement.", "answer": "True" }
                ]
            }
        ]
    });
    let issues = structure_issues(&value);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("type"));
}

#[test]
fn test_validator_accepts_empty_passage_title() {
    // Passage fields must be present, not non-empty.
    let value = json!({
        "passages": [
            {
                "title": "",
                "text": "body",
                "questions": [
                    { "type": "tfng", "text": "Statement.", "answer": "True" }
                ]
            }
        ]
    });
    assert!(validate_structure(&value));
}

#[test]
fn test_structured_rejects_invalid_with_issue_list() {
    let err = structured_to_test(json!({ "passages": [] })).unwrap_err();
    assert!(err.contains("Invalid test structure"), "{}", err);
    assert!(err.contains("passages is empty"), "{}", err);
}

#[test]
fn test_unsupported_extension_fails_fast() {
    let err = kind_for_path(Path::new("test.docx")).unwrap_err();
    assert!(err.contains("Unsupported format"), "{}", err);
    assert!(err.contains("docx"), "{}", err);

    let err = kind_for_path(Path::new("noextension")).unwrap_err();
    assert!(err.contains("no file extension"), "{}", err);
}

#[test]
fn test_kind_detection() {
    assert_eq!(kind_for_path(Path::new("a.txt")).unwrap(), DocumentKind::Txt);
    assert_eq!(kind_for_path(Path::new("a.json")).unwrap(), DocumentKind::Json);
    assert_eq!(kind_for_path(Path::new("a.yaml")).unwrap(), DocumentKind::Yaml);
    assert_eq!(kind_for_path(Path::new("a.YML")).unwrap(), DocumentKind::Yaml);
}

#[test]
fn test_example_json_round_trips_through_validator() {
    let document = example_document(ExampleFormat::Json).unwrap();
    let value: Value = serde_json::from_str(&document).unwrap();
    assert!(validate_structure(&value), "{:?}", structure_issues(&value));
}

#[test]
fn test_example_txt_round_trips_through_parser() {
    let document = example_document(ExampleFormat::Txt).unwrap();
    let test = parse_txt(&document, &ParseOptions::default()).unwrap();

    assert_eq!(test.title, "Sample Reading Test");
    assert_eq!(test.passages.len(), 2);
    assert_eq!(test.question_count(), 4);
    assert_eq!(test.passages[0].questions[1].kind.as_str(), "multiple-choice");
    let options = test.passages[0].questions[1].options.as_ref().unwrap();
    assert_eq!(options.len(), 4);
}

#[test]
fn test_example_format_parsing() {
    assert!("txt".parse::<ExampleFormat>().is_ok());
    assert!("JSON".parse::<ExampleFormat>().is_ok());
    assert!("pdf".parse::<ExampleFormat>().is_err());
}
