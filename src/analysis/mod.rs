//! Conversation analyzer.
//!
//! One linear scan over the parsed entries producing aggregate statistics:
//! per-tool invocation counts and every commit reference detected in
//! tool-result text. The scan is independent of rendering; the page composer
//! merges its output into the index page.

pub mod patterns;

pub use patterns::{commit_lines, detect_repo_slug, CommitRef};

use crate::model::{ContentBlock, EntryType, LogEntry, MessageContent, ToolName};
use std::collections::HashMap;

// ===== SessionAnalysis =====

/// Aggregate statistics for one session.
///
/// Accumulated entry by entry via [`record_entry`](Self::record_entry), or in
/// one call via [`analyze`](Self::analyze). Counts key off [`ToolName`];
/// `first_seen` keeps encounter order so that formatting can break count ties
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct SessionAnalysis {
    tool_counts: HashMap<ToolName, u32>,
    first_seen: Vec<ToolName>,
    commits: Vec<CommitRef>,
}

impl SessionAnalysis {
    /// Create an empty analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a full entry stream in one pass.
    pub fn analyze<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut analysis = Self::new();
        for entry in entries {
            analysis.record_entry(entry);
        }
        analysis
    }

    /// Record one entry.
    ///
    /// Tool invocations count only on assistant turns. Commit references are
    /// collected from every tool_result block regardless of which channel
    /// carries it, tolerating results that match no prior tool_use.
    pub fn record_entry(&mut self, entry: &LogEntry) {
        let Some(message) = entry.message() else {
            return;
        };
        let MessageContent::Blocks(blocks) = message.content() else {
            return;
        };

        let is_assistant = entry.entry_type() == &EntryType::Assistant;
        for block in blocks {
            match block {
                ContentBlock::ToolUse(call) if is_assistant => {
                    self.record_tool(call.name());
                }
                ContentBlock::ToolResult { content, .. } => {
                    self.commits
                        .extend(commit_lines(&content.flattened_text()));
                }
                _ => {}
            }
        }
    }

    fn record_tool(&mut self, name: &ToolName) {
        if !self.tool_counts.contains_key(name) {
            self.first_seen.push(name.clone());
        }
        *self.tool_counts.entry(name.clone()).or_default() += 1;
    }

    /// Invocation counts per tool.
    pub fn tool_counts(&self) -> &HashMap<ToolName, u32> {
        &self.tool_counts
    }

    /// Detected commit references in encounter order, duplicates preserved.
    pub fn commits(&self) -> &[CommitRef] {
        &self.commits
    }

    /// Total number of tool invocations.
    pub fn total_tool_calls(&self) -> u32 {
        self.tool_counts.values().sum()
    }

    /// Counts sorted by descending count, ties broken by first-seen order.
    ///
    /// The tie-break works because the seed vector is in first-seen order and
    /// the sort is stable.
    pub fn sorted_counts(&self) -> Vec<(&ToolName, u32)> {
        let mut counts: Vec<(&ToolName, u32)> = self
            .first_seen
            .iter()
            .map(|name| (name, self.tool_counts.get(name).copied().unwrap_or(0)))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Format tool statistics as a compact human-readable string.
///
/// Produces e.g. `"5 bash, 3 read, 1 write"`: descending count, ties in
/// first-seen order, lowercased names. An analysis with no tool calls yields
/// an empty string.
pub fn format_tool_stats(analysis: &SessionAnalysis) -> String {
    analysis
        .sorted_counts()
        .iter()
        .map(|(name, count)| format!("{} {}", count, name.as_str().to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Tests =====
