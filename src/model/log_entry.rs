//! Log entry types representing parsed JSONL records.
//!
//! LogEntry is one record of the session file. Fields are validated once at
//! the parse boundary; downstream code never re-checks them.

use crate::model::Message;
use chrono::{DateTime, Utc};

// ===== EntryType =====

/// Type of log entry.
///
/// The recorder emits more record types than this pipeline renders; anything
/// outside the known vocabulary lands in `Other` and is carried through
/// untouched so one unknown record never invalidates a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryType {
    /// A user turn (or tool output echoed on the user channel)
    User,
    /// An assistant turn
    Assistant,
    /// A system record (hooks, notices); never rendered as a turn
    System,
    /// A session summary record carrying a short title
    Summary,
    /// Any record type this version does not recognize
    Other(String),
}

impl EntryType {
    /// Parse the record's `type` field.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "system" => Self::System,
            "summary" => Self::Summary,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire-format string for this entry type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Summary => "summary",
            Self::Other(s) => s,
        }
    }
}

// ===== LogEntry =====

/// A parsed record from the session file.
///
/// Invariant: immutable once constructed; owned by the pipeline for the
/// duration of one render pass.
#[derive(Debug, Clone)]
pub struct LogEntry {
    entry_type: EntryType,
    message: Option<Message>,
    timestamp: Option<DateTime<Utc>>,
    summary: Option<String>,
}

impl LogEntry {
    /// Create a new entry of the given type with no message, timestamp, or
    /// summary. Attach those with the `with_*` builders.
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            message: None,
            timestamp: None,
            summary: None,
        }
    }

    /// Attach the message payload (user/assistant records).
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Attach the record timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach the summary text (summary records).
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    // ===== Accessors (read-only) =====

    /// The record's type.
    pub fn entry_type(&self) -> &EntryType {
        &self.entry_type
    }

    /// The message payload, present for user/assistant records.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// The record timestamp, when the recorder captured one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// The summary text carried by summary records.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Whether this entry is a renderable conversation turn: a user or
    /// assistant record that actually carries a message.
    pub fn is_turn(&self) -> bool {
        matches!(self.entry_type, EntryType::User | EntryType::Assistant)
            && self.message.is_some()
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MessageContent, Role};

    fn make_message() -> Message {
        Message::new(Role::Assistant, MessageContent::Text("Test".to_string()))
    }

    fn make_timestamp() -> DateTime<Utc> {
        "2025-12-25T10:30:00Z".parse().expect("valid timestamp")
    }

    // ===== EntryType Tests =====

    #[test]
    fn entry_type_parse_recognizes_known_types() {
        assert_eq!(EntryType::parse("user"), EntryType::User);
        assert_eq!(EntryType::parse("assistant"), EntryType::Assistant);
        assert_eq!(EntryType::parse("system"), EntryType::System);
        assert_eq!(EntryType::parse("summary"), EntryType::Summary);
    }

    #[test]
    fn entry_type_parse_wraps_unknown_in_other() {
        assert_eq!(
            EntryType::parse("file-history-snapshot"),
            EntryType::Other("file-history-snapshot".to_string())
        );
    }

    #[test]
    fn entry_type_as_str_round_trips() {
        for raw in ["user", "assistant", "system", "summary", "result"] {
            assert_eq!(EntryType::parse(raw).as_str(), raw);
        }
    }

    // ===== LogEntry Tests =====

    #[test]
    fn log_entry_builders_attach_fields() {
        let ts = make_timestamp();
        let entry = LogEntry::new(EntryType::Assistant)
            .with_message(make_message())
            .with_timestamp(ts);

        assert_eq!(entry.entry_type(), &EntryType::Assistant);
        assert_eq!(entry.timestamp(), Some(ts));
        assert_eq!(entry.message().map(|m| m.role()), Some(Role::Assistant));
        assert!(entry.summary().is_none());
    }

    #[test]
    fn log_entry_summary_record_carries_text() {
        let entry = LogEntry::new(EntryType::Summary).with_summary("Fix the flaky test");

        assert_eq!(entry.summary(), Some("Fix the flaky test"));
        assert!(entry.message().is_none());
        assert!(entry.timestamp().is_none());
    }

    #[test]
    fn user_entry_with_message_is_a_turn() {
        let entry = LogEntry::new(EntryType::User).with_message(make_message());
        assert!(entry.is_turn());
    }

    #[test]
    fn assistant_entry_without_message_is_not_a_turn() {
        let entry = LogEntry::new(EntryType::Assistant);
        assert!(!entry.is_turn());
    }

    #[test]
    fn system_and_summary_entries_are_not_turns() {
        assert!(!LogEntry::new(EntryType::System)
            .with_message(make_message())
            .is_turn());
        assert!(!LogEntry::new(EntryType::Summary)
            .with_summary("title")
            .is_turn());
    }

    #[test]
    fn unknown_entry_type_is_not_a_turn() {
        let entry =
            LogEntry::new(EntryType::Other("result".to_string())).with_message(make_message());
        assert!(!entry.is_turn());
    }
}
