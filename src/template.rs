use std::str::FromStr;

use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExampleFormat {
    Txt,
    Json,
}

impl FromStr for ExampleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(ExampleFormat::Txt),
            "json" => Ok(ExampleFormat::Json),
            other => Err(format!("Unsupported example format: {}", other)),
        }
    }
}

/// Canonical example document for documentation or download.
pub fn example_document(format: ExampleFormat) -> Result<String, String> {
    let test = example_test();
    match format {
        ExampleFormat::Txt => Ok(render_txt(&test)),
        ExampleFormat::Json => serde_json::to_string_pretty(&test)
            .map_err(|e| format!("Cannot render example JSON: {}", e)),
    }
}

/// Render a test definition in the line-oriented text format. A `TYPE:`
/// directive is emitted whenever the type changes from the carried one,
/// mirroring how the parser reads it back.
pub fn render_txt(test: &TestDefinition) -> String {
    let mut out = String::new();
    let mut carried = QuestionType::default();
    let mut fallback_number = 0u32;

    if !test.title.is_empty() {
        out.push_str(&format!("TITLE: {}\n", test.title));
    }
    out.push_str(&format!("LEVEL: {}\n", test.level));

    for (pi, passage) in test.passages.iter().enumerate() {
        out.push_str(&format!("\n=== PASSAGE {} ===\n", pi + 1));
        if !passage.title.is_empty() {
            out.push_str(&format!("[{}]\n", passage.title));
        }
        for paragraph in passage.text.split("\n\n").filter(|p| !p.is_empty()) {
            out.push_str(paragraph);
            out.push('\n');
        }

        out.push_str("\n=== QUESTIONS ===\n");
        for question in &passage.questions {
            fallback_number += 1;
            let number = question
                .id
                .strip_prefix('q')
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(fallback_number);

            if question.kind != carried {
                out.push_str(&format!("TYPE: {}\n", question.kind));
                carried = question.kind.clone();
            }
            out.push_str(&format!("Q{}: {}\n", number, question.text));
            if !question.answer.is_empty() {
                out.push_str(&format!("A{}: {}\n", number, question.answer));
            }
            if !question.explanation.is_empty() {
                out.push_str(&format!("E{}: {}\n", number, question.explanation));
            }
            if let Some(options) = &question.options {
                out.push_str(&format!("OPTIONS: {}\n", options.join("|")));
            }
            out.push('\n');
        }
    }

    out
}

pub fn example_test() -> TestDefinition {
    TestDefinition {
        title: "Sample Reading Test".to_string(),
        level: "6.5".to_string(),
        passages: vec![
            Passage {
                title: "The History of Tea".to_string(),
                text: "Tea was first cultivated in the Yunnan region of China, where \
                       it was drunk as a medicinal brew long before it became a daily \
                       beverage.\n\nPortuguese traders carried the leaf to Europe in \
                       the sixteenth century, but it was the Dutch who turned it into \
                       a commercial cargo."
                    .to_string(),
                questions: vec![
                    Question {
                        id: "q1".to_string(),
                        kind: QuestionType::new("tfng"),
                        text: "Tea was originally consumed as a medicine.".to_string(),
                        answer: "True".to_string(),
                        explanation: "The passage says it was drunk as a medicinal brew."
                            .to_string(),
                        options: None,
                        word_limit: None,
                    },
                    Question {
                        id: "q2".to_string(),
                        kind: QuestionType::new("multiple-choice"),
                        text: "Who first shipped tea to Europe?".to_string(),
                        answer: "B".to_string(),
                        explanation: "Portuguese traders carried the leaf to Europe."
                            .to_string(),
                        options: Some(vec![
                            "A. Dutch merchants".to_string(),
                            "B. Portuguese traders".to_string(),
                            "C. Chinese farmers".to_string(),
                            "D. British sailors".to_string(),
                        ]),
                        word_limit: None,
                    },
                ],
            },
            Passage {
                title: "Urban Beekeeping".to_string(),
                text: "City rooftops have become an unlikely refuge for honeybees. \
                       Urban hives often outproduce their rural counterparts because \
                       parks and gardens flower across a longer season.\n\nCritics \
                       warn that too many hives can crowd out wild pollinators."
                    .to_string(),
                questions: vec![
                    Question {
                        id: "q3".to_string(),
                        kind: QuestionType::new("ynng"),
                        text: "Does the writer believe urban hives harm wild bees?"
                            .to_string(),
                        answer: "Not Given".to_string(),
                        explanation: "Critics are quoted, but the writer takes no side."
                            .to_string(),
                        options: None,
                        word_limit: None,
                    },
                    Question {
                        id: "q4".to_string(),
                        kind: QuestionType::new("summary"),
                        text: "Urban hives produce more honey because flowers bloom \
                               across a longer ___."
                            .to_string(),
                        answer: "season".to_string(),
                        explanation: String::new(),
                        options: None,
                        word_limit: Some(1),
                    },
                ],
            },
        ],
    }
}
