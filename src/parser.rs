use crate::model::*;

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reset the carried question type to `tfng` at each `=== PASSAGE`
    /// marker. By default the type carries across passage boundaries until
    /// the next `TYPE:` directive.
    pub reset_kind_per_passage: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanMode {
    Header,
    PassageBody,
    QuestionsBody,
}

// Scanner state threaded through the scan; the carried question type lives
// here so the carry-forward across passages stays visible.
#[derive(Debug, Clone)]
struct ScanContext {
    mode: ScanMode,
    kind: QuestionType,
}

// Paragraph lines buffer until === QUESTIONS === (or end of document)
// joins them.
struct PassageBuilder {
    title: String,
    text: String,
    text_closed: bool,
    paragraphs: Vec<String>,
    questions: Vec<Question>,
}

impl PassageBuilder {
    fn new() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            text_closed: false,
            paragraphs: Vec::new(),
            questions: Vec::new(),
        }
    }

    fn close_text(&mut self) {
        self.text = self.paragraphs.join("\n\n");
        self.paragraphs.clear();
        self.text_closed = true;
    }

    fn finish(mut self) -> Passage {
        if !self.text_closed {
            self.close_text();
        }
        Passage {
            title: self.title,
            text: self.text,
            questions: self.questions,
        }
    }
}

/// Parse a test definition from the line-oriented text format.
///
/// Every trimmed line is classified in order; answer/explanation/options
/// lines match nothing here and are read only by the per-question
/// look-ahead, so a `TYPE:` directive between two question blocks still
/// takes effect. Unrecognized lines are skipped silently. A question
/// marker before any passage fails the parse.
pub fn parse_txt(content: &str, opts: &ParseOptions) -> Result<TestDefinition, String> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();

    let mut test = TestDefinition::default();
    let mut current: Option<PassageBuilder> = None;
    let mut ctx = ScanContext {
        mode: ScanMode::Header,
        kind: QuestionType::default(),
    };

    for (i, &line) in lines.iter().enumerate() {
        if let Some(rest) = line.strip_prefix("TITLE:") {
            test.title = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("LEVEL:") {
            test.level = rest.trim().to_string();
        } else if line.starts_with("=== PASSAGE") {
            if let Some(p) = current.take() {
                test.passages.push(p.finish());
            }
            current = Some(PassageBuilder::new());
            ctx.mode = ScanMode::PassageBody;
            if opts.reset_kind_per_passage {
                ctx.kind = QuestionType::default();
            }
        } else if line == "=== QUESTIONS ===" {
            if let Some(p) = current.as_mut() {
                p.close_text();
            }
            ctx.mode = ScanMode::QuestionsBody;
        } else if let Some(rest) = line.strip_prefix("TYPE:") {
            ctx.kind = QuestionType::new(rest.trim());
        } else if ctx.mode == ScanMode::PassageBody && is_bracketed(line) {
            if let Some(p) = current.as_mut() {
                p.title = line[1..line.len() - 1].to_string();
            }
        } else if ctx.mode == ScanMode::PassageBody
            && !line.is_empty()
            && !line.starts_with("===")
        {
            if let Some(p) = current.as_mut() {
                p.paragraphs.push(line.to_string());
            }
        } else if let Some((number, prompt)) = question_marker(line) {
            let passage = current.as_mut().ok_or_else(|| {
                format!("Question Q{} appears before any passage", number)
            })?;
            let question = extract_question(&lines, i, number, prompt, &ctx.kind);
            passage.questions.push(question);
        }
        // Anything else (blank lines, answer/explanation/options lines) is
        // skipped.
    }

    if let Some(p) = current.take() {
        test.passages.push(p.finish());
    }

    Ok(test)
}

fn is_bracketed(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('[') && line.ends_with(']')
}

// Q<digits>:<non-empty text>
fn question_marker(line: &str) -> Option<(u32, &str)> {
    let rest = line.strip_prefix('Q')?;
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let number: u32 = rest[..digits].parse().ok()?;
    let after = rest[digits..].strip_prefix(':')?;
    let prompt = after.trim();
    if prompt.is_empty() {
        return None;
    }
    Some((number, prompt))
}

// Collect the A<N>:/E<N>:/OPTIONS: lines belonging to the question opened
// at lines[start]. The look-ahead runs until end of document or a line
// starting with Q that is not this question's own marker.
fn extract_question(
    lines: &[&str],
    start: usize,
    number: u32,
    prompt: &str,
    kind: &QuestionType,
) -> Question {
    let answer_marker = format!("A{}:", number);
    let explanation_marker = format!("E{}:", number);
    let own_marker = format!("Q{}:", number);

    let mut answer = String::new();
    let mut explanation = String::new();
    let mut options: Option<Vec<String>> = None;

    let mut j = start + 1;
    while j < lines.len() {
        let line = lines[j];
        if let Some(rest) = line.strip_prefix(&answer_marker) {
            // A later duplicate overwrites: last one wins.
            answer = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(&explanation_marker) {
            explanation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("OPTIONS:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                options = Some(rest.split('|').map(|o| o.trim().to_string()).collect());
            }
        } else if line.starts_with('Q') && !line.starts_with(&own_marker) {
            break;
        }
        j += 1;
    }

    Question {
        id: format!("q{}", number),
        kind: kind.clone(),
        text: prompt.to_string(),
        answer,
        explanation,
        options,
        word_limit: None,
    }
}
