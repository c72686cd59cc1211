use std::fs;
use std::path::PathBuf;

use ieltsprep::parser::{parse_txt, ParseOptions};
use ieltsprep::store::{
    compute_str_hash, list_tests, load_test, remove_test, save_test, test_id,
};

fn temp_store(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ieltsprep_test_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_save_load_list_remove() {
    let content = fs::read_to_string("fixtures/sample_test.txt").expect("Cannot read fixture");
    let test = parse_txt(&content, &ParseOptions::default()).unwrap();

    let dir = temp_store("roundtrip");

    let id = save_test(&dir, &test, &content).unwrap();
    assert!(id.starts_with("academic-reading-practice-1-"));
    assert!(dir.join(format!("{}.json", id)).exists());

    let stored = load_test(&dir, &id).unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.test, test);
    assert_eq!(stored.source_hash, compute_str_hash(&content));

    let summaries = list_tests(&dir).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, id);
    assert_eq!(summaries[0].title, "Academic Reading Practice 1");
    assert_eq!(summaries[0].passages, 2);
    assert_eq!(summaries[0].questions, 5);

    remove_test(&dir, &id).unwrap();
    assert!(list_tests(&dir).unwrap().is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_id_fails() {
    let dir = temp_store("missing");
    let err = load_test(&dir, "nope-12345678").unwrap_err();
    assert!(err.contains("nope-12345678"), "{}", err);
}

#[test]
fn test_saving_same_source_is_idempotent() {
    let content = fs::read_to_string("fixtures/sample_test.txt").expect("Cannot read fixture");
    let test = parse_txt(&content, &ParseOptions::default()).unwrap();

    let dir = temp_store("idempotent");
    let first = save_test(&dir, &test, &content).unwrap();
    let second = save_test(&dir, &test, &content).unwrap();
    assert_eq!(first, second);
    assert_eq!(list_tests(&dir).unwrap().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_untitled_test_gets_fallback_slug() {
    let content = "=== PASSAGE ===\nText.\n=== QUESTIONS ===\nQ1: A?\nA1: Yes\n";
    let test = parse_txt(content, &ParseOptions::default()).unwrap();
    let id = test_id(&test, &compute_str_hash(content));
    assert!(id.starts_with("untitled-"), "{}", id);
}
