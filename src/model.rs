use serde::{Deserialize, Serialize};

/// Question type tags the presentation layer knows how to render. The set
/// is open: documents may introduce new tags.
pub const KNOWN_TYPES: &[&str] = &[
    "tfng",
    "ynng",
    "multiple-choice",
    "summary",
    "sentence",
    "matching-headings",
    "matching-info",
    "matching-features",
    "diagram",
];

/// Open string tag selecting a question's answer format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionType(String);

impl QuestionType {
    pub fn new(tag: impl Into<String>) -> Self {
        QuestionType(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_TYPES.contains(&self.0.as_str())
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        QuestionType("tfng".to_string())
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_level")]
    pub level: String,
    pub passages: Vec<Passage>,
}

impl Default for TestDefinition {
    fn default() -> Self {
        Self {
            title: String::new(),
            level: default_level(),
            passages: Vec::new(),
        }
    }
}

impl TestDefinition {
    pub fn question_count(&self) -> usize {
        self.passages.iter().map(|p| p.questions.len()).sum()
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.passages.iter().flat_map(|p| p.questions.iter())
    }
}

fn default_level() -> String {
    "6.0".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub text: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// "q" + the number from the source marker; never re-sequenced.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    pub text: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(rename = "wordLimit", default, skip_serializing_if = "Option::is_none")]
    pub word_limit: Option<u32>,
}
