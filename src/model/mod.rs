//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors. The parser
//! is the sole producer; rendering and analysis consume them read-only.

pub mod error;
pub mod log_entry;
pub mod message;
pub mod repo;

// Re-export for convenience
pub use error::{AppError, InputError, OutputError, ParseError};
pub use log_entry::{EntryType, LogEntry};
pub use message::{
    ContentBlock, Message, MessageContent, Role, ToolCall, ToolName, ToolResultContent,
};
pub use repo::{InvalidRepoSlug, RepoSlug};
