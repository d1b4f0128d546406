//! Content-block to HTML fragment rendering.
//!
//! One structured content unit in, one HTML fragment out. Rendering never
//! fails: malformed or unknown blocks degrade to an empty string so a single
//! odd entry cannot abort a page build. All ambient state lives in an
//! explicit [`RenderContext`] threaded through every call.

pub mod html;
pub mod markdown;
pub mod tools;

use regex::Captures;

use crate::analysis::patterns::commit_line_regex;
use crate::model::{
    ContentBlock, Message, MessageContent, RepoSlug, ToolCall, ToolName, ToolResultContent,
};

pub use html::{escape_html, format_json, format_json_or_raw, is_json_like, truncate_chars};
pub use markdown::render_markdown_text;
pub use tools::{
    render_bash_tool, render_edit_tool, render_generic_tool, render_todo_write, render_write_tool,
};

// ===== RenderContext =====

/// Ambient inputs for fragment rendering.
///
/// Carries the source-repository slug used for commit hyperlinking. Absent
/// slug means commit text renders unlinked; nothing else changes.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    repo: Option<RepoSlug>,
}

impl RenderContext {
    /// Context with no repository configured.
    pub fn new() -> Self {
        Self { repo: None }
    }

    /// Set the repository slug for commit hyperlinking.
    pub fn with_repo(mut self, repo: RepoSlug) -> Self {
        self.repo = Some(repo);
        self
    }

    /// The configured repository, if any.
    pub fn repo(&self) -> Option<&RepoSlug> {
        self.repo.as_ref()
    }
}

// ===== Block rendering =====

/// Render one content block to an HTML fragment.
///
/// Dispatches on the block variant; unknown blocks render as an empty
/// string.
pub fn render_content_block(block: &ContentBlock, ctx: &RenderContext) -> String {
    match block {
        ContentBlock::Text { text } => render_text_block(text),
        ContentBlock::Thinking { thinking } => render_thinking_block(thinking),
        ContentBlock::ToolUse(call) => render_tool_use_block(call),
        ContentBlock::ToolResult {
            content, is_error, ..
        } => render_tool_result_block(content, *is_error, ctx),
        ContentBlock::Other => String::new(),
    }
}

/// Render a whole message body: all blocks concatenated in order.
pub fn render_message(message: &Message, ctx: &RenderContext) -> String {
    match message.content() {
        MessageContent::Text(text) => render_text_block(text),
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .map(|block| render_content_block(block, ctx))
            .collect(),
    }
}

fn render_text_block(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"message-text\">{}</div>\n",
        render_markdown_text(text)
    )
}

fn render_thinking_block(thinking: &str) -> String {
    if thinking.is_empty() {
        return String::new();
    }
    format!(
        "<details class=\"thinking\"><summary>Thinking</summary>\n\
         <div class=\"thinking-body\">{}</div></details>\n",
        render_markdown_text(thinking)
    )
}

/// Dispatch a tool invocation to its specialized renderer.
///
/// The match is closed over the tool vocabulary; anything without a
/// dedicated renderer falls through to the generic labeled-JSON form.
fn render_tool_use_block(call: &ToolCall) -> String {
    match call.name() {
        ToolName::TodoWrite => render_todo_write(call.input(), call.id()),
        ToolName::Write => render_write_tool(call.input(), call.id()),
        ToolName::Edit => render_edit_tool(call.input(), call.id()),
        ToolName::Bash => render_bash_tool(call.input(), call.id()),
        other => render_generic_tool(other.as_str(), call.input(), call.id()),
    }
}

/// Render tool output verbatim in a monospace container.
///
/// JSON-looking content that parses is pretty-printed; everything else is
/// escaped as-is, with commit confirmation lines hyperlinked when a
/// repository is known. `is_error` switches the styling class only.
fn render_tool_result_block(
    content: &ToolResultContent,
    is_error: bool,
    ctx: &RenderContext,
) -> String {
    let text = content.flattened_text();
    if text.is_empty() {
        return String::new();
    }

    let body = if is_json_like(Some(&text)) {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => escape_html(&format_json(&value)),
            Err(_) => escape_and_link(&text, ctx),
        }
    } else {
        escape_and_link(&text, ctx)
    };

    let class = if is_error {
        "tool-result error"
    } else {
        "tool-result"
    };
    format!("<pre class=\"{class}\"><code>{body}</code></pre>\n")
}

fn escape_and_link(text: &str, ctx: &RenderContext) -> String {
    let escaped = escape_html(text);
    match ctx.repo() {
        Some(repo) => link_commit_hashes(&escaped, repo),
        None => escaped,
    }
}

/// Wrap the hash of every commit confirmation line in a commit link.
///
/// Operates on already-escaped text; escaping touches none of the
/// characters the commit pattern keys on, so line structure survives.
fn link_commit_hashes(escaped: &str, repo: &RepoSlug) -> String {
    commit_line_regex()
        .replace_all(escaped, |caps: &Captures<'_>| {
            let hash = &caps[1];
            let anchor = format!(
                "<a href=\"{}\" class=\"commit-link\">{hash}</a>",
                repo.commit_url(hash)
            );
            // The captured hash is the token directly before "] ", and the
            // ref section cannot contain "]", so this replaces exactly it.
            caps[0].replacen(&format!("{hash}] "), &format!("{anchor}] "), 1)
        })
        .into_owned()
}

// ===== Tests =====
