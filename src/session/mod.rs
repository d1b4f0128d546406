//! Local session discovery.
//!
//! Finds recorded sessions under the local projects directory
//! (`~/.claude/projects/<project-slug>/<session-id>.jsonl`) and derives
//! list-friendly metadata: a short summary per session and a readable
//! project name from the slug directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::{EntryType, InputError};
use crate::parser;
use crate::render::truncate_chars;

/// Character cap for session list summaries.
const SUMMARY_PREVIEW_CHARS: usize = 80;

// ===== SessionInfo =====

/// One discovered session file.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    path: PathBuf,
    summary: String,
    modified: Option<DateTime<Utc>>,
}

impl SessionInfo {
    /// Path to the JSONL session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short summary, or an empty string when none could be derived.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Last modification time, when the filesystem reports one.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}

// ===== Discovery =====

/// The default projects directory: `~/.claude/projects`.
pub fn default_projects_dir() -> Result<PathBuf, InputError> {
    let home = dirs::home_dir().ok_or(InputError::NoProjectsDir)?;
    Ok(home.join(".claude").join("projects"))
}

/// List sessions under a projects directory, newest first.
///
/// Scans one level of project directories for `*.jsonl` files, skipping
/// subagent transcripts (`agent-*.jsonl`). A missing directory yields an
/// empty list, not an error. Ties on modification time break by path so
/// listings stay deterministic.
pub fn find_local_sessions(folder: &Path, limit: usize) -> Result<Vec<SessionInfo>, InputError> {
    if !folder.exists() {
        return Ok(Vec::new());
    }

    let mut found: Vec<(PathBuf, Option<std::time::SystemTime>)> = Vec::new();
    for project_entry in fs::read_dir(folder)? {
        let project_path = project_entry?.path();
        if !project_path.is_dir() {
            continue;
        }
        for file_entry in fs::read_dir(&project_path)? {
            let file_path = file_entry?.path();
            if !file_path
                .extension()
                .map(|ext| ext == "jsonl")
                .unwrap_or(false)
            {
                continue;
            }
            let stem = file_path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if stem.starts_with("agent-") {
                continue;
            }
            let modified = fs::metadata(&file_path).ok().and_then(|m| m.modified().ok());
            found.push((file_path, modified));
        }
    }

    found.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    found.truncate(limit);

    Ok(found
        .into_iter()
        .map(|(path, modified)| {
            let summary = session_summary(&path);
            SessionInfo {
                path,
                summary,
                modified: modified.map(DateTime::<Utc>::from),
            }
        })
        .collect())
}

/// The most recently modified session under a projects directory.
pub fn latest_session(folder: &Path) -> Result<PathBuf, InputError> {
    find_local_sessions(folder, 1)?
        .into_iter()
        .next()
        .map(|info| info.path)
        .ok_or_else(|| InputError::NoSessions {
            searched: folder.to_path_buf(),
        })
}

/// Short summary for one session file.
///
/// Prefers a recorded summary entry; falls back to the first line of the
/// first user message, truncated. Unreadable files yield an empty string
/// rather than an error, so one bad file never breaks a listing.
pub fn session_summary(path: &Path) -> String {
    let Ok(text) = fs::read_to_string(path) else {
        return String::new();
    };
    let parsed = parser::parse_session_text(&text);

    if let Some(summary) = parsed.entries().iter().find_map(|entry| entry.summary()) {
        return summary.to_string();
    }

    for entry in parsed.entries() {
        if entry.entry_type() != &EntryType::User {
            continue;
        }
        let Some(message) = entry.message() else {
            continue;
        };
        let text = message.text();
        let line = text.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cut = truncate_chars(line, SUMMARY_PREVIEW_CHARS);
        return if cut.len() < line.len() {
            format!("{cut}…")
        } else {
            line.to_string()
        };
    }
    String::new()
}

/// Readable project name from a slug directory name.
///
/// Project directories encode the working directory path with separators
/// flattened to hyphens (`-home-alice-myproject`). The reverse mapping is
/// lossy: hyphens that were part of a real directory name also become
/// slashes.
pub fn project_display_name(dir_name: &str) -> String {
    let trimmed = dir_name.strip_prefix('-').unwrap_or(dir_name);
    trimmed.replace('-', "/")
}

// ===== Tests =====
