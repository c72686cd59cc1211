use serde_json::Value;

/// Minimal shape check for an already-object-shaped test definition.
/// All-or-nothing: any failure rejects the whole document.
pub fn validate_structure(value: &Value) -> bool {
    structure_issues(value).is_empty()
}

/// Same checks, one message per failure with passage/question indices.
pub fn structure_issues(value: &Value) -> Vec<String> {
    let mut issues = Vec::new();

    let passages = match value.get("passages") {
        Some(Value::Array(passages)) => passages,
        Some(_) => {
            issues.push("passages is not a list".to_string());
            return issues;
        }
        None => {
            issues.push("passages is missing".to_string());
            return issues;
        }
    };

    if passages.is_empty() {
        issues.push("passages is empty".to_string());
        return issues;
    }

    for (pi, passage) in passages.iter().enumerate() {
        for field in ["title", "text", "questions"] {
            if passage.get(field).is_none() {
                issues.push(format!("passage {}: {} is missing", pi + 1, field));
            }
        }

        let questions = match passage.get("questions") {
            Some(Value::Array(questions)) => questions,
            Some(_) => {
                issues.push(format!("passage {}: questions is not a list", pi + 1));
                continue;
            }
            None => continue,
        };

        for (qi, question) in questions.iter().enumerate() {
            for field in ["type", "text", "answer"] {
                let present = question
                    .get(field)
                    .and_then(Value::as_str)
                    .map(|s| !s.is_empty())
                    .unwrap_or(false);
                if !present {
                    issues.push(format!(
                        "passage {}, question {}: {} is missing or empty",
                        pi + 1,
                        qi + 1,
                        field
                    ));
                }
            }
        }
    }

    issues
}
