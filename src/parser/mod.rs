//! JSONL parser for session log entries.
//!
//! Pure parsing functions converting JSONL lines into validated [`LogEntry`]
//! values. This is the single validation boundary: raw records deserialize
//! into all-optional `Raw*` structs, get checked once here, and everything
//! downstream works with typed models only.
//!
//! Tolerance rules: a line that is not JSON or lacks a `type` field is
//! malformed and gets skipped (with a warning) by [`parse_session_text`]. A
//! line that parses but carries odd pieces degrades instead: unknown entry
//! types and block tags map to `Other` variants, a tool_use without a name
//! becomes an inert block, an unparseable timestamp becomes `None`. One bad
//! block never invalidates its whole entry.

use crate::model::{
    ContentBlock, EntryType, InputError, LogEntry, Message, MessageContent, ParseError, Role,
    ToolCall, ToolName, ToolResultContent,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

// Role string constants
const ROLE_USER: &str = "user";
const ROLE_ASSISTANT: &str = "assistant";

// ===== Raw deserialization structs =====

/// Raw JSON structure for deserializing log entries.
///
/// Every field is optional so tolerance decisions live in the parse
/// functions, not in serde failures.
#[derive(Debug, Deserialize)]
struct RawLogEntry {
    #[serde(default, rename = "type")]
    entry_type: Option<String>,
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<RawMessageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessageContent {
    Text(String),
    Blocks(Vec<RawContentBlock>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: Option<String>,
        #[serde(default)]
        content: Option<RawToolResultContent>,
        #[serde(default)]
        is_error: bool,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    #[serde(other)]
    Other,
}

/// Tool results carry either a bare string or nested blocks; anything else
/// (numbers, bare objects) degrades to its JSON text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawToolResultContent {
    Text(String),
    Blocks(Vec<RawContentBlock>),
    Json(serde_json::Value),
}

// ===== Parsed session =====

/// Outcome of parsing one session file: the valid entries in file order plus
/// a count of malformed lines that were skipped.
#[derive(Debug)]
pub struct ParsedSession {
    entries: Vec<LogEntry>,
    skipped: usize,
}

impl ParsedSession {
    /// The parsed entries in file order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// How many malformed lines were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the session, yielding the entries.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

// ===== Parse functions =====

/// Read and parse a whole session file.
///
/// Malformed lines are skipped with a warning; only I/O problems are errors.
///
/// # Errors
///
/// Returns [`InputError::FileNotFound`] when `path` does not exist and
/// [`InputError::Io`] for other read failures.
pub fn parse_session_file(path: &Path) -> Result<ParsedSession, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_session_text(&raw))
}

/// Parse session text, one JSON record per line.
///
/// Lines that fail to parse are counted and skipped with a warning carrying
/// the 1-based line number; blank lines are ignored silently.
pub fn parse_session_text(raw: &str) -> ParsedSession {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_entry(line, line_number) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!(line = line_number, error = %err, "Skipping malformed log line");
                skipped += 1;
            }
        }
    }

    ParsedSession { entries, skipped }
}

/// Parse a single JSONL line into a LogEntry.
///
/// # Errors
///
/// Returns [`ParseError::InvalidJson`] when the line is not a JSON object and
/// [`ParseError::MissingField`] when the `type` field is absent. Everything
/// else degrades (see the module docs) rather than erroring.
pub fn parse_entry(raw: &str, line_number: usize) -> Result<LogEntry, ParseError> {
    let raw_entry: RawLogEntry =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    let entry_type = raw_entry
        .entry_type
        .as_deref()
        .map(EntryType::parse)
        .ok_or(ParseError::MissingField {
            line: line_number,
            field: "type",
        })?;

    let timestamp = raw_entry
        .timestamp
        .as_deref()
        .and_then(|ts| match ts.parse::<DateTime<Utc>>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                debug!(line = line_number, raw = ts, "Ignoring unparseable timestamp");
                None
            }
        });

    let mut entry = LogEntry::new(entry_type.clone());
    if let Some(ts) = timestamp {
        entry = entry.with_timestamp(ts);
    }
    if let Some(summary) = raw_entry.summary {
        entry = entry.with_summary(summary);
    }
    if let Some(raw_msg) = raw_entry.message {
        entry = entry.with_message(parse_message(raw_msg, &entry_type));
    }

    Ok(entry)
}

/// Parse a raw message, inferring a missing or unknown role from the entry
/// type.
fn parse_message(raw: RawMessage, entry_type: &EntryType) -> Message {
    let fallback_role = match entry_type {
        EntryType::User => Role::User,
        _ => Role::Assistant,
    };
    let role = match raw.role.as_deref() {
        Some(ROLE_USER) => Role::User,
        Some(ROLE_ASSISTANT) => Role::Assistant,
        _ => fallback_role,
    };

    let content = match raw.content {
        None => MessageContent::Text(String::new()),
        Some(RawMessageContent::Text(text)) => MessageContent::Text(text),
        Some(RawMessageContent::Blocks(blocks)) => {
            MessageContent::Blocks(blocks.into_iter().map(parse_content_block).collect())
        }
    };

    Message::new(role, content)
}

/// Parse a raw content block; degraded shapes map to inert variants.
fn parse_content_block(raw: RawContentBlock) -> ContentBlock {
    match raw {
        RawContentBlock::Text { text } => ContentBlock::Text { text },
        RawContentBlock::ToolUse { id, name, input } => {
            if name.is_empty() {
                // Without a name there is nothing to dispatch or count.
                return ContentBlock::Other;
            }
            let input = if input.is_null() {
                serde_json::Value::Object(serde_json::Map::new())
            } else {
                input
            };
            ContentBlock::ToolUse(ToolCall::new(id, ToolName::parse(&name), input))
        }
        RawContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ContentBlock::ToolResult {
            tool_use_id: tool_use_id.filter(|id| !id.is_empty()),
            content: parse_tool_result_content(content),
            is_error,
        },
        RawContentBlock::Thinking { thinking } => ContentBlock::Thinking { thinking },
        RawContentBlock::Other => ContentBlock::Other,
    }
}

fn parse_tool_result_content(raw: Option<RawToolResultContent>) -> ToolResultContent {
    match raw {
        None => ToolResultContent::Text(String::new()),
        Some(RawToolResultContent::Text(text)) => ToolResultContent::Text(text),
        Some(RawToolResultContent::Blocks(blocks)) => {
            ToolResultContent::Blocks(blocks.into_iter().map(parse_content_block).collect())
        }
        Some(RawToolResultContent::Json(value)) => ToolResultContent::Text(value.to_string()),
    }
}

// ===== Tests =====
