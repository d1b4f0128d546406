//! Claude Code transcript publisher (ccpub)
//!
//! Renders machine-recorded Claude Code JSONL session logs into a set
//! of static, linked HTML pages: numbered transcript pages plus an
//! index carrying summaries, tool-usage statistics, and commit
//! references.
//!
//! The pipeline is pure from parsed entries to rendered strings;
//! only [`pages::generate`] and its callers touch the filesystem, so
//! identical input always produces byte-identical output.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod model;
pub mod pages;
pub mod parser;
pub mod render;
pub mod session;
