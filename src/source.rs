use std::path::Path;

use serde_json::Value;

use crate::model::TestDefinition;
use crate::parser::{parse_txt, ParseOptions};
use crate::validate::structure_issues;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentKind {
    Txt,
    Json,
    Yaml,
}

/// Detect the document kind from the file extension; anything outside the
/// supported set fails before any content is read.
pub fn kind_for_path(path: &Path) -> Result<DocumentKind, String> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok(DocumentKind::Txt),
        "json" => Ok(DocumentKind::Json),
        "yaml" | "yml" => Ok(DocumentKind::Yaml),
        "" => Err(format!(
            "Cannot tell the format of {} (no file extension)",
            path.display()
        )),
        other => Err(format!("Unsupported format: .{}", other)),
    }
}

/// Read and parse a test document, dispatching on the file extension.
pub fn load_test(path: &Path, opts: &ParseOptions) -> Result<TestDefinition, String> {
    let kind = kind_for_path(path)?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;

    match kind {
        DocumentKind::Txt => parse_txt(&content, opts),
        DocumentKind::Json => {
            let value: Value = serde_json::from_str(&content)
                .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
            structured_to_test(value)
        }
        DocumentKind::Yaml => {
            let value: Value = serde_yaml::from_str(&content)
                .map_err(|e| format!("Invalid YAML in {}: {}", path.display(), e))?;
            structured_to_test(value)
        }
    }
}

/// Validate an object-shaped document and deserialize it into the typed
/// model. Questions without explicit ids get sequential document-wide ids.
pub fn structured_to_test(value: Value) -> Result<TestDefinition, String> {
    let issues = structure_issues(&value);
    if !issues.is_empty() {
        return Err(format!("Invalid test structure: {}", issues.join("; ")));
    }

    let mut test: TestDefinition = serde_json::from_value(value)
        .map_err(|e| format!("Cannot read test structure: {}", e))?;

    let mut number = 0u32;
    for passage in &mut test.passages {
        for question in &mut passage.questions {
            number += 1;
            if question.id.is_empty() {
                question.id = format!("q{}", number);
            }
        }
    }

    Ok(test)
}
