use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Question, TestDefinition};

// User responses keyed by question id, read from a YAML file with a single
// top-level `answers` mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

pub fn load_answer_sheet(path: &Path) -> Result<AnswerSheet, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read answers file {}: {}", path.display(), e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid answers file {}: {}", path.display(), e))
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub id: String,
    pub kind: String,
    pub expected: String,
    pub given: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub title: String,
    pub level: String,
    pub total: usize,
    pub correct: usize,
    pub band: String,
    pub scored_at: String,
    pub results: Vec<QuestionResult>,
}

pub fn normalize_answer(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// Fold accepted shorthand into the canonical form for the closed-answer
// question types.
fn canonical_answer(kind: &str, normalized: &str) -> String {
    match kind {
        "tfng" => match normalized {
            "t" => "true".to_string(),
            "f" => "false".to_string(),
            "ng" | "notgiven" => "not given".to_string(),
            other => other.to_string(),
        },
        "ynng" => match normalized {
            "y" => "yes".to_string(),
            "n" => "no".to_string(),
            "ng" | "notgiven" => "not given".to_string(),
            other => other.to_string(),
        },
        _ => normalized.to_string(),
    }
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// A question with an empty expected answer is unanswerable and never
/// scores; a response over the word limit is wrong regardless of content.
pub fn is_correct(question: &Question, given: &str) -> bool {
    if question.answer.is_empty() {
        return false;
    }

    let given = normalize_answer(given);
    if given.is_empty() {
        return false;
    }

    if let Some(limit) = question.word_limit {
        if word_count(&given) > limit as usize {
            return false;
        }
    }

    let kind = question.kind.as_str();
    let expected = canonical_answer(kind, &normalize_answer(&question.answer));
    let given = canonical_answer(kind, &given);

    if expected == given {
        return true;
    }

    // A bare option letter also accepts the full option text ("b" matches
    // "b. portuguese traders").
    if kind == "multiple-choice" && expected.len() == 1 {
        return given.chars().next() == expected.chars().next();
    }

    false
}

/// IELTS Academic Reading raw-score-to-band table for a 40-question paper.
/// Shorter tests are scaled to the 40-question scale before lookup.
pub fn band_for_raw(correct: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }

    let scaled = if total == 40 {
        correct
    } else {
        (correct * 40 + total / 2) / total
    };

    let band = match scaled {
        39..=40 => "9.0",
        37..=38 => "8.5",
        35..=36 => "8.0",
        33..=34 => "7.5",
        30..=32 => "7.0",
        27..=29 => "6.5",
        23..=26 => "6.0",
        19..=22 => "5.5",
        15..=18 => "5.0",
        13..=14 => "4.5",
        10..=12 => "4.0",
        8..=9 => "3.5",
        6..=7 => "3.0",
        4..=5 => "2.5",
        3 => "2.0",
        2 => "1.5",
        _ => "1.0",
    };
    band.to_string()
}

pub fn score_test(test: &TestDefinition, sheet: &AnswerSheet) -> ScoreReport {
    let mut results = Vec::new();
    let mut correct = 0;

    for question in test.questions() {
        let given = sheet
            .answers
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or("");
        let ok = is_correct(question, given);
        if ok {
            correct += 1;
        }
        results.push(QuestionResult {
            id: question.id.clone(),
            kind: question.kind.as_str().to_string(),
            expected: question.answer.clone(),
            given: given.to_string(),
            correct: ok,
        });
    }

    let total = results.len();
    ScoreReport {
        title: test.title.clone(),
        level: test.level.clone(),
        total,
        correct,
        band: band_for_raw(correct, total),
        scored_at: chrono::Utc::now().to_rfc3339(),
        results,
    }
}

pub fn build_report_yaml(report: &ScoreReport) -> String {
    let mut out = String::new();

    out.push_str("test:\n");
    out.push_str(&format!("  title: {:?}\n", report.title));
    out.push_str(&format!("  level: {:?}\n", report.level));
    out.push_str(&format!("  scored_at: {:?}\n", report.scored_at));

    out.push_str("\nscore:\n");
    out.push_str(&format!("  correct: {}\n", report.correct));
    out.push_str(&format!("  total: {}\n", report.total));
    out.push_str(&format!("  band: {:?}\n", report.band));

    out.push_str("\nquestions:\n");
    for r in &report.results {
        out.push_str(&format!("  - id: {}\n", r.id));
        out.push_str(&format!("    type: {}\n", r.kind));
        out.push_str(&format!("    expected: {:?}\n", r.expected));
        out.push_str(&format!("    given: {:?}\n", r.given));
        out.push_str(&format!("    correct: {}\n", r.correct));
    }

    out
}
