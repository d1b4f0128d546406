//! Turn rendering and page packing.
//!
//! Turns render to self-describing HTML fragments first; packing then groups
//! consecutive fragments under a rendered-size budget. The two stages stay
//! separate so the packing policy is testable as a pure function over sizes.

use std::ops::Range;

use crate::model::{LogEntry, Role};
use crate::render::{escape_html, render_message, truncate_chars, RenderContext};

use super::layout::{nav_fragment, page_document, page_file_name};

// ===== Turn rendering =====

/// One turn rendered to HTML, with the plain text kept for summaries.
#[derive(Debug, Clone)]
pub struct RenderedTurn {
    html: String,
    text: String,
}

impl RenderedTurn {
    /// The rendered fragment.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Plain message text, used to synthesize index summaries.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Render one log entry as a transcript turn.
///
/// Non-turn entries (system records, summaries, entries without a message)
/// and turns whose every block degrades to nothing render as an empty
/// string. Tool-result-only turns get a compact section without the role
/// header; they are tool output echoed on the user channel, not something
/// the user typed.
pub fn render_turn(entry: &LogEntry, ctx: &RenderContext) -> String {
    if !entry.is_turn() {
        return String::new();
    }
    let Some(message) = entry.message() else {
        return String::new();
    };

    let body = render_message(message, ctx);
    if body.is_empty() {
        return String::new();
    }

    if message.is_tool_result_only() {
        return format!("<section class=\"turn tool-output\">\n{body}</section>\n");
    }

    let (role_label, role_class) = match message.role() {
        Role::User => ("User", "user"),
        Role::Assistant => ("Assistant", "assistant"),
    };
    let time_html = match entry.timestamp() {
        Some(ts) => format!(
            "<time class=\"turn-time\">{}</time>",
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => String::new(),
    };
    format!(
        "<section class=\"turn {role_class}\">\n\
         <header class=\"turn-header\"><span class=\"turn-role\">{role_label}</span>{time_html}</header>\n\
         {body}</section>\n"
    )
}

/// Render every turn in the entry stream, in order, dropping empty renders.
pub fn render_turns(entries: &[LogEntry], ctx: &RenderContext) -> Vec<RenderedTurn> {
    entries
        .iter()
        .filter_map(|entry| {
            let html = render_turn(entry, ctx);
            if html.is_empty() {
                return None;
            }
            let text = entry
                .message()
                .map(|message| message.text().trim().to_string())
                .unwrap_or_default();
            Some(RenderedTurn { html, text })
        })
        .collect()
}

// ===== Packing =====

/// Group consecutive units into pages under a size budget.
///
/// Greedy: units accumulate until adding the next one would exceed the
/// budget, then the page closes. A unit larger than the whole budget still
/// gets placed: it becomes the sole content of its page. No unit is ever
/// dropped or reordered.
pub fn pack_units(sizes: &[usize], budget: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut current = 0usize;

    for (index, &size) in sizes.iter().enumerate() {
        if index > start && current + size > budget {
            pages.push(start..index);
            start = index;
            current = 0;
        }
        current += size;
    }
    if start < sizes.len() {
        pages.push(start..sizes.len());
    }
    pages
}

// ===== Page assembly =====

/// One complete output page.
#[derive(Debug, Clone)]
pub struct Page {
    number: usize,
    file_name: String,
    html: String,
    summary: String,
}

impl Page {
    /// 1-based sequence number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Output file name (`page-NNN.html`).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The complete HTML document.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Short synthesized summary for the index listing.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// Assemble rendered turns into complete page documents.
///
/// Pages carry navigation at top and bottom and a summary synthesized from
/// the first turn with meaningful text.
pub fn build_pages(
    turns: &[RenderedTurn],
    session_title: &str,
    budget: usize,
    summary_max_chars: usize,
) -> Vec<Page> {
    let sizes: Vec<usize> = turns.iter().map(|turn| turn.html.len()).collect();
    let ranges = pack_units(&sizes, budget);
    let total = ranges.len();
    let title = escape_html(session_title);

    ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| {
            let number = index + 1;
            let slice = &turns[range];
            let nav = nav_fragment(number, total);

            let mut body = format!(
                "<header class=\"page-header\"><h1>{title}</h1>\
                 <p class=\"page-meta\">Page {number} of {total}</p></header>\n"
            );
            body.push_str(&nav);
            for turn in slice {
                body.push_str(&turn.html);
            }
            body.push_str(&nav);

            Page {
                number,
                file_name: page_file_name(number),
                html: page_document(&format!("{title} - Page {number} of {total}"), &body),
                summary: page_summary(slice, summary_max_chars),
            }
        })
        .collect()
}

/// First meaningful text on the page, normalized to one line and truncated.
fn page_summary(turns: &[RenderedTurn], max_chars: usize) -> String {
    let source = turns
        .iter()
        .map(RenderedTurn::text)
        .find(|text| !text.is_empty())
        .unwrap_or("");
    let normalized = source.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated = truncate_chars(&normalized, max_chars);
    if truncated.len() < normalized.len() {
        format!("{truncated}…")
    } else {
        normalized
    }
}

// ===== Tests =====
