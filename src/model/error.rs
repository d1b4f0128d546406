//! Error types for the ccpub pipeline.
//!
//! A small hierarchical taxonomy built with `thiserror`. Errors compose via
//! `From` conversions so call sites propagate with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error wrapping all pipeline failures
//!   - [`InputError`] - session file reading failures (not found, no sessions, IO)
//!   - [`ParseError`] - JSONL parsing failures (malformed JSON, missing fields)
//!   - [`OutputError`] - page write-out failures (directory creation, file write)
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: a malformed JSONL line is logged with its
//! line number and skipped, and rendering continues with the remaining entries.
//! Input and output errors are fatal: without a readable session file or a
//! writable destination there is nothing useful to produce, so they propagate
//! to the caller as a hard failure with no partial-success claim.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level pipeline error encompassing all failure modes.
///
/// Domain-specific errors convert automatically via `From`, so functions that
/// read, parse, and write in sequence can return `Result<_, AppError>` and use
/// `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the session file. Fatal: there is no input to render.
    #[error("Failed to read session: {0}")]
    Input(#[from] InputError),

    /// Failed to parse a log entry. Non-fatal during batch rendering (the
    /// line is skipped with a warning); surfaced here only when a caller asks
    /// for strict single-entry parsing.
    #[error("Failed to parse log entry: {0}")]
    Parse(#[from] ParseError),

    /// Failed to write the output page set. Fatal: the render completed in
    /// memory but the destination rejected it.
    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

/// Errors encountered when locating or reading session input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The session file does not exist at the given path.
    ///
    /// The `path` field carries the full path that was attempted so the
    /// message pinpoints what to fix.
    #[error("Session file not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No session path was given and no session files exist under the local
    /// projects directory.
    #[error("No sessions found under {searched}")]
    NoSessions {
        /// The directory that was scanned for `.jsonl` session files.
        searched: PathBuf,
    },

    /// The local projects directory could not be determined (no home
    /// directory available on this system).
    #[error("Cannot locate the projects directory: no home directory")]
    NoProjectsDir,

    /// Generic I/O failure reading the session file (permissions, disk
    /// errors). The wrapped error carries the OS detail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing JSONL log entries.
///
/// All variants carry a 1-based `line` so the warning log points at the exact
/// line in the session file, matching what text editors display.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A log line is not syntactically valid JSON.
    ///
    /// The parser error message is captured as a `String` rather than the
    /// full `serde_json::Error` to keep this type cheap to store and display.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// The 1-based line number in the session file.
        line: usize,
        /// The JSON parser's description of what went wrong.
        message: String,
    },

    /// A record is valid JSON but lacks a field the schema requires.
    ///
    /// Field names are compile-time constants from the record schema, hence
    /// `&'static str`.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// The 1-based line number of the incomplete record.
        line: usize,
        /// The JSON key that was expected but absent.
        field: &'static str,
    },
}

/// Errors encountered while writing the rendered page set.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The destination directory could not be created.
    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        /// The directory that was being created.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },

    /// A page file could not be written.
    #[error("Cannot write {path}: {source}")]
    WriteFile {
        /// The page file that was being written.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}
