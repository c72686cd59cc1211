mod cli;

use std::path::{Path, PathBuf};

use clap::Parser;

use ieltsprep::parser::ParseOptions;
use ieltsprep::{model, score, source, store, template};

use crate::cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let store_dir = cli
        .store_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(store::default_store_dir);

    if let Some(ref format) = cli.example {
        let document = template::example_document(format.parse()?)?;
        return write_output(cli.out.as_deref(), &document);
    }

    if cli.list {
        let summaries = store::list_tests(&store_dir)?;
        if summaries.is_empty() {
            println!("No stored tests.");
            return Ok(());
        }
        for s in summaries {
            println!(
                "{}  {} (level {}, {} passages, {} questions, saved {})",
                s.id,
                if s.title.is_empty() { "(untitled)" } else { &s.title },
                s.level,
                s.passages,
                s.questions,
                s.saved_at.to_rfc3339(),
            );
        }
        return Ok(());
    }

    if let Some(ref id) = cli.remove {
        store::remove_test(&store_dir, id)?;
        eprintln!("Removed {}.", id);
        return Ok(());
    }

    let path = cli
        .path
        .as_deref()
        .ok_or_else(|| "No test document given (see --help)".to_string())?;
    let path = Path::new(path);

    let opts = ParseOptions {
        reset_kind_per_passage: cli.reset_type,
    };

    if cli.check {
        return check_document(path, &opts);
    }

    let test = source::load_test(path, &opts)?;

    if test.passages.is_empty() {
        eprintln!("Warning: document contains no passages");
    }
    for q in test.questions() {
        if q.answer.is_empty() {
            eprintln!("Warning: {} has no answer and cannot be scored", q.id);
        }
    }

    if let Some(ref answers_path) = cli.score {
        let sheet = score::load_answer_sheet(Path::new(answers_path))?;
        let report = score::score_test(&test, &sheet);
        println!(
            "Score: {}/{} correct, band {}",
            report.correct, report.total, report.band
        );
        let yaml = score::build_report_yaml(&report);
        return match cli.out.as_deref() {
            Some(out) => {
                std::fs::write(out, &yaml).map_err(|e| format!("Cannot write {}: {}", out, e))?;
                eprintln!("Report written to {}", out);
                Ok(())
            }
            None => {
                print!("{}", yaml);
                Ok(())
            }
        };
    }

    if cli.save {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let id = store::save_test(&store_dir, &test, &content)?;
        eprintln!("Saved as {}.", id);
        return Ok(());
    }

    print_summary(&test);
    Ok(())
}

fn check_document(path: &Path, opts: &ParseOptions) -> Result<(), String> {
    let test = source::load_test(path, opts)?;

    let mut problems = Vec::new();
    if test.passages.is_empty() {
        problems.push("document contains no passages".to_string());
    }
    for q in test.questions() {
        if q.answer.is_empty() {
            problems.push(format!("{} has no answer", q.id));
        }
        if !q.kind.is_known() {
            problems.push(format!("{} has unknown type {:?}", q.id, q.kind.as_str()));
        }
    }

    if problems.is_empty() {
        println!("OK: {} passages, {} questions", test.passages.len(), test.question_count());
        Ok(())
    } else {
        for p in &problems {
            println!("problem: {}", p);
        }
        Err(format!("{} problem(s) found", problems.len()))
    }
}

fn print_summary(test: &model::TestDefinition) {
    println!(
        "Test: {}",
        if test.title.is_empty() { "(untitled)" } else { &test.title }
    );
    println!("Level: {}", test.level);
    for (i, passage) in test.passages.iter().enumerate() {
        println!(
            "  Passage {}: {} ({} questions)",
            i + 1,
            if passage.title.is_empty() { "(untitled)" } else { &passage.title },
            passage.questions.len()
        );
    }
    println!("Questions: {}", test.question_count());
}

fn write_output(out: Option<&str>, content: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| format!("Cannot write {}: {}", path, e))?;
            eprintln!("Written to {}", path);
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
