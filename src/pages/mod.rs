//! Static page generation.
//!
//! Walks an ordered entry stream once for analysis and once for rendering,
//! packs the rendered turns into pages under a size budget, and writes the
//! page set plus an index to the output directory. Reruns against the same
//! input produce byte-identical output; nothing here reads a clock or any
//! other ambient state.

pub mod compose;
pub mod layout;

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::analysis::{detect_repo_slug, format_tool_stats, SessionAnalysis};
use crate::model::{AppError, ContentBlock, LogEntry, MessageContent, OutputError, RepoSlug};
use crate::parser;
use crate::render::{escape_html, RenderContext};

pub use compose::{build_pages, pack_units, render_turn, render_turns, Page, RenderedTurn};
pub use layout::page_file_name;

/// Default rendered-size budget per page, in bytes of fragment HTML.
pub const DEFAULT_PAGE_BUDGET: usize = 200_000;

/// Default character cap for index summaries.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 120;

// ===== RenderOptions =====

/// Tunable policy for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    repo: Option<RepoSlug>,
    page_budget: usize,
    summary_max_chars: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            repo: None,
            page_budget: DEFAULT_PAGE_BUDGET,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl RenderOptions {
    /// Options with default thresholds and no repository configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repository slug for commit hyperlinking, overriding
    /// auto-detection.
    pub fn with_repo(mut self, repo: RepoSlug) -> Self {
        self.repo = Some(repo);
        self
    }

    /// Set the per-page rendered-size budget.
    pub fn with_page_budget(mut self, budget: usize) -> Self {
        self.page_budget = budget;
        self
    }

    /// Set the index summary character cap.
    pub fn with_summary_max_chars(mut self, max_chars: usize) -> Self {
        self.summary_max_chars = max_chars;
        self
    }

    /// Explicitly configured repository, if any.
    pub fn repo(&self) -> Option<&RepoSlug> {
        self.repo.as_ref()
    }

    /// Per-page rendered-size budget.
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Index summary character cap.
    pub fn summary_max_chars(&self) -> usize {
        self.summary_max_chars
    }
}

// ===== GenerateReport =====

/// What one render invocation produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pages: usize,
    turns: usize,
    commits: usize,
    repo: Option<RepoSlug>,
}

impl GenerateReport {
    /// Number of content pages written (the index is extra).
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Number of turns rendered.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Number of commit references detected.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Repository used for commit links, configured or detected.
    pub fn repo(&self) -> Option<&RepoSlug> {
        self.repo.as_ref()
    }
}

// ===== Generation =====

/// Render a parsed entry stream into a page set under `output_dir`.
///
/// Writes `index.html` plus `page-NNN.html` files, overwriting existing
/// files. Only failures to create or write the destination propagate;
/// malformed entries degrade per-turn without aborting.
pub fn generate(
    entries: &[LogEntry],
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<GenerateReport, OutputError> {
    let repo = resolve_repo(entries, options);
    let ctx = match repo.clone() {
        Some(repo) => RenderContext::new().with_repo(repo),
        None => RenderContext::new(),
    };

    let analysis = SessionAnalysis::analyze(entries);
    let turns = render_turns(entries, &ctx);
    let title = session_title(entries);
    let pages = build_pages(
        &turns,
        &title,
        options.page_budget(),
        options.summary_max_chars(),
    );
    let index_html = render_index(&title, &pages, &analysis, repo.as_ref(), turns.len());

    fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    write_page(output_dir, "index.html", &index_html)?;
    for page in &pages {
        write_page(output_dir, page.file_name(), page.html())?;
    }

    info!(
        pages = pages.len(),
        turns = turns.len(),
        output = %output_dir.display(),
        "Wrote page set"
    );
    Ok(GenerateReport {
        pages: pages.len(),
        turns: turns.len(),
        commits: analysis.commits().len(),
        repo,
    })
}

/// Parse a session file and render it into a page set.
pub fn generate_from_file(
    session_file: &Path,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<GenerateReport, AppError> {
    let parsed = parser::parse_session_file(session_file)?;
    if parsed.skipped() > 0 {
        warn!(
            skipped = parsed.skipped(),
            file = %session_file.display(),
            "Some log lines could not be parsed"
        );
    }
    Ok(generate(parsed.entries(), output_dir, options)?)
}

/// Repository for commit links: explicit configuration wins, otherwise the
/// first push target found in tool output.
fn resolve_repo(entries: &[LogEntry], options: &RenderOptions) -> Option<RepoSlug> {
    if let Some(repo) = options.repo() {
        return Some(repo.clone());
    }
    detect_repo_from_entries(entries)
}

/// Scan every tool result for a GitHub push target, first match wins.
///
/// Purely cosmetic: no match just means commit text renders unlinked.
pub fn detect_repo_from_entries(entries: &[LogEntry]) -> Option<RepoSlug> {
    for entry in entries {
        let Some(message) = entry.message() else {
            continue;
        };
        let MessageContent::Blocks(blocks) = message.content() else {
            continue;
        };
        for block in blocks {
            if let ContentBlock::ToolResult { content, .. } = block {
                if let Some(repo) = detect_repo_slug(&content.flattened_text()) {
                    debug!(repo = %repo, "Auto-detected repository from push output");
                    return Some(repo);
                }
            }
        }
    }
    None
}

/// Session title: the first recorded summary, else a generic fallback.
fn session_title(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .find_map(|entry| entry.summary())
        .unwrap_or("Session transcript")
        .to_string()
}

fn render_index(
    title: &str,
    pages: &[Page],
    analysis: &SessionAnalysis,
    repo: Option<&RepoSlug>,
    turn_count: usize,
) -> String {
    let escaped_title = escape_html(title);
    let mut body = format!("<header class=\"page-header\"><h1>{escaped_title}</h1></header>\n");

    body.push_str("<section class=\"session-stats\">\n");
    body.push_str(&format!(
        "<p class=\"stats-line\">{} pages, {} turns</p>\n",
        pages.len(),
        turn_count
    ));
    let stats = format_tool_stats(analysis);
    if !stats.is_empty() {
        body.push_str(&format!(
            "<p class=\"stats-line\">Tool calls: {}</p>\n",
            escape_html(&stats)
        ));
    }
    body.push_str("</section>\n");

    if !analysis.commits().is_empty() {
        body.push_str("<section class=\"commit-list\">\n<h2>Commits</h2>\n<ul>\n");
        for commit in analysis.commits() {
            let hash = escape_html(commit.hash());
            let hash_html = match repo {
                Some(repo) => format!(
                    "<a href=\"{}\" class=\"commit-link\">{hash}</a>",
                    repo.commit_url(commit.hash())
                ),
                None => format!("<code>{hash}</code>"),
            };
            body.push_str(&format!(
                "<li>{hash_html} {}</li>\n",
                escape_html(commit.message())
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    body.push_str("<section class=\"page-list\">\n<h2>Pages</h2>\n<ol>\n");
    for page in pages {
        body.push_str(&format!(
            "<li><a href=\"{}\">Page {:03}</a>",
            page.file_name(),
            page.number()
        ));
        if !page.summary().is_empty() {
            body.push_str(&format!(
                "<span class=\"page-summary\">{}</span>",
                escape_html(page.summary())
            ));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ol>\n</section>\n");

    layout::page_document(&escaped_title, &body)
}

fn write_page(dir: &Path, name: &str, contents: &str) -> Result<(), OutputError> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| OutputError::WriteFile { path, source })
}

// ===== Tests =====
