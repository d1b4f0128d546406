//! Message types for coding-assistant session log entries.
//!
//! Types represent the structure of messages exchanged during sessions.
//! Everything here is immutable once parsed; the parser module is the only
//! producer.

// ===== Role =====

/// Message role in a recorded conversation.
///
/// Identifies who authored a message in the JSONL log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Message authored by the user (or injected on the user channel,
    /// e.g. tool results)
    User,
    /// Message authored by the assistant
    Assistant,
}

// ===== MessageContent =====

/// Content of a message in the session log format.
///
/// Messages are either plain text (simple user prompts) or structured blocks
/// (assistant messages with text, tool calls, results, and thinking). Sum type
/// ensures exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text content (typically user messages)
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

// ===== ContentBlock =====

/// Individual content block within a structured message.
///
/// Messages consist of heterogeneous blocks: text (visible output), tool_use
/// (tool invocations), tool_result (tool outputs), and thinking (extended
/// reasoning). Unrecognized block tags parse to `Other` so one odd block never
/// invalidates its whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Text block containing markdown-formatted output
    Text {
        /// Markdown content visible to the user
        text: String,
    },
    /// Tool invocation by the assistant
    ToolUse(ToolCall),
    /// Result returned from a tool execution
    ToolResult {
        /// Id correlating this result to the originating tool_use, when the
        /// recorder captured one
        tool_use_id: Option<String>,
        /// Tool output (stdout, file contents, etc.)
        content: ToolResultContent,
        /// Whether the tool execution failed
        is_error: bool,
    },
    /// Extended thinking block (the assistant's internal reasoning)
    Thinking {
        /// Reasoning content, collapsed by default in rendered output
        thinking: String,
    },
    /// Block of a type this version does not recognize; renders as nothing
    Other,
}

// ===== ToolResultContent =====

/// Payload of a tool_result block.
///
/// The log format records tool output either as a bare string or as a nested
/// block list (usually a single text block, occasionally several).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResultContent {
    /// Plain string output
    Text(String),
    /// Nested content blocks
    Blocks(Vec<ContentBlock>),
}

impl ToolResultContent {
    /// Flatten the payload to one string.
    ///
    /// Nested `Text` blocks are joined with newlines; other nested block
    /// types contribute nothing. This is the view the JSON and commit-line
    /// heuristics operate on.
    pub fn flattened_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

// ===== ToolCall =====

/// Tool invocation recorded in a session log.
///
/// Represents the assistant calling a tool (Read, Write, Bash, etc.) with
/// structured parameters. The id correlates to a later ToolResult block; ids
/// are carried verbatim and may be empty in degraded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Identifier for this tool invocation
    id: String,
    /// Tool being invoked (Read, Bash, Grep, etc.)
    name: ToolName,
    /// Tool-specific parameters as JSON
    input: serde_json::Value,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: ToolName, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name,
            input,
        }
    }

    /// Identifier linking this call to its result
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tool name (Read, Write, Bash, etc.)
    pub fn name(&self) -> &ToolName {
        &self.name
    }

    /// Tool-specific input parameters
    pub fn input(&self) -> &serde_json::Value {
        &self.input
    }
}

// ===== ToolName =====

/// Tool names recognized in session logs.
///
/// Enumerates the standard tool vocabulary with a fallback variant for custom
/// or future tools. Used for statistics aggregation and renderer dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// Read files from filesystem
    Read,
    /// Write files to filesystem
    Write,
    /// Edit existing files (string replacement)
    Edit,
    /// Apply multiple edits atomically
    MultiEdit,
    /// Execute bash commands
    Bash,
    /// Search file contents with regex
    Grep,
    /// Find files by glob pattern
    Glob,
    /// Create or manage subagent tasks
    Task,
    /// Maintain the task checklist
    TodoWrite,
    /// Search the web
    WebSearch,
    /// Fetch web resources
    WebFetch,
    /// Unknown or custom tool
    Other(String),
}

impl ToolName {
    /// Parse a tool name from the JSONL log.
    ///
    /// Recognizes the standard tools, wrapping unknown names in `Other`.
    pub fn parse(name: &str) -> Self {
        match name {
            "Read" => Self::Read,
            "Write" => Self::Write,
            "Edit" => Self::Edit,
            "MultiEdit" => Self::MultiEdit,
            "Bash" => Self::Bash,
            "Grep" => Self::Grep,
            "Glob" => Self::Glob,
            "Task" => Self::Task,
            "TodoWrite" => Self::TodoWrite,
            "WebSearch" => Self::WebSearch,
            "WebFetch" => Self::WebFetch,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Edit => "Edit",
            Self::MultiEdit => "MultiEdit",
            Self::Bash => "Bash",
            Self::Grep => "Grep",
            Self::Glob => "Glob",
            Self::Task => "Task",
            Self::TodoWrite => "TodoWrite",
            Self::WebSearch => "WebSearch",
            Self::WebFetch => "WebFetch",
            Self::Other(s) => s,
        }
    }
}

// ===== Message =====

/// Complete message in a recorded conversation.
///
/// One turn of the session with its role and content. Messages are the
/// primary unit the page composer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who authored this message
    role: Role,
    /// Message content (text or structured blocks)
    content: MessageContent,
}

impl Message {
    /// Create a new message with role and content.
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self { role, content }
    }

    /// Message author role
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message content (text or blocks)
    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Extract all tool calls from this message.
    ///
    /// Returns an empty vector for text-only messages. Used for statistics
    /// aggregation.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        match &self.content {
            MessageContent::Text(_) => vec![],
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse(call) => Some(call),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Get text content, joining all text blocks.
    ///
    /// Extracts only Text blocks, ignoring tool use, results, and thinking.
    /// Returns an empty string if no text blocks are present.
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Whether this message carries exactly one tool_result block and
    /// nothing else.
    ///
    /// True only for block-list content of length one whose single block is a
    /// tool_result. Plain-string content, empty lists, and mixed block lists
    /// are all false. Such messages get compact rendering: they are tool
    /// output echoed on the user channel, not something the user typed.
    pub fn is_tool_result_only(&self) -> bool {
        match &self.content {
            MessageContent::Text(_) => false,
            MessageContent::Blocks(blocks) => {
                blocks.len() == 1 && matches!(blocks[0], ContentBlock::ToolResult { .. })
            }
        }
    }
}

// ===== Tests =====
