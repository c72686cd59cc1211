use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::TestDefinition;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTest {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub source_hash: String,
    pub test: TestDefinition,
}

#[derive(Debug, Clone)]
pub struct StoredSummary {
    pub id: String,
    pub title: String,
    pub level: String,
    pub passages: usize,
    pub questions: usize,
    pub saved_at: DateTime<Utc>,
}

pub fn default_store_dir() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("", "", "ieltsprep") {
        return dirs.data_dir().to_path_buf();
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ieltsprep")
}

// Stable identifier: slugified title (or "untitled") plus a short prefix
// of the source content hash.
pub fn test_id(test: &TestDefinition, source_hash: &str) -> String {
    let slug = slugify(&test.title);
    let slug = if slug.is_empty() { "untitled" } else { &slug };
    let short = source_hash
        .strip_prefix("sha256:")
        .unwrap_or(source_hash)
        .chars()
        .take(8)
        .collect::<String>();
    format!("{}-{}", slug, short)
}

fn slugify(s: &str) -> String {
    let mut out = String::new();
    let mut last_dash = true;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

pub fn save_test(dir: &Path, test: &TestDefinition, source: &str) -> Result<String, String> {
    fs::create_dir_all(dir).map_err(|e| format!("Cannot create store dir: {}", e))?;

    let source_hash = compute_str_hash(source);
    let id = test_id(test, &source_hash);
    let stored = StoredTest {
        id: id.clone(),
        saved_at: Utc::now(),
        source_hash,
        test: test.clone(),
    };

    let json = serde_json::to_string_pretty(&stored)
        .map_err(|e| format!("Cannot serialize test: {}", e))?;
    atomic_write(&dir.join(format!("{}.json", id)), &json)?;

    Ok(id)
}

pub fn load_test(dir: &Path, id: &str) -> Result<StoredTest, String> {
    let path = dir.join(format!("{}.json", id));
    if !path.exists() {
        return Err(format!("No stored test with id {}", id));
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Corrupt stored test {}: {}", id, e))
}

pub fn list_tests(dir: &Path) -> Result<Vec<StoredSummary>, String> {
    let mut summaries = Vec::new();
    if !dir.exists() {
        return Ok(summaries);
    }

    let entries =
        fs::read_dir(dir).map_err(|e| format!("Cannot read store dir {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading entry: {}", e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |e| e != "json") {
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: cannot read {}: {}", path.display(), e);
                continue;
            }
        };
        let stored: StoredTest = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Warning: skipping corrupt entry {}: {}", path.display(), e);
                continue;
            }
        };

        summaries.push(StoredSummary {
            id: stored.id,
            title: stored.test.title.clone(),
            level: stored.test.level.clone(),
            passages: stored.test.passages.len(),
            questions: stored.test.question_count(),
            saved_at: stored.saved_at,
        });
    }

    summaries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(summaries)
}

pub fn remove_test(dir: &Path, id: &str) -> Result<(), String> {
    let path = dir.join(format!("{}.json", id));
    if !path.exists() {
        return Err(format!("No stored test with id {}", id));
    }
    fs::remove_file(&path).map_err(|e| format!("Cannot remove {}: {}", path.display(), e))
}

fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename: {}", e))?;
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn compute_str_hash(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("sha256:{}", hex_encode(&result))
}
