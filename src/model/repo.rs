//! Repository slug newtype with a smart constructor.
//!
//! The slug identifies the source-control repository commits link to. It is
//! validated once at construction; rendering code can interpolate it into
//! URLs without re-checking.

use std::fmt;
use thiserror::Error;

/// A GitHub-style `owner/repo` slug used for commit hyperlinks.
///
/// Construction validates the shape, so a held value is always linkable.
/// NEVER export the raw constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug(String);

impl RepoSlug {
    /// Smart constructor: requires exactly `owner/repo` with both halves
    /// non-empty and limited to `[A-Za-z0-9._-]`.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidRepoSlug> {
        let raw = raw.into();
        let mut halves = raw.split('/');
        let (owner, repo) = match (halves.next(), halves.next(), halves.next()) {
            (Some(owner), Some(repo), None) => (owner, repo),
            _ => {
                return Err(InvalidRepoSlug::Shape { raw });
            }
        };
        if owner.is_empty() || repo.is_empty() {
            return Err(InvalidRepoSlug::Shape { raw });
        }
        let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if !owner.chars().all(valid_char) || !repo.chars().all(valid_char) {
            return Err(InvalidRepoSlug::Characters { raw });
        }
        Ok(Self(raw))
    }

    /// The slug as `owner/repo`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of a commit in this repository.
    pub fn commit_url(&self, hash: &str) -> String {
        format!("https://github.com/{}/commit/{}", self.0, hash)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failure for a repository slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRepoSlug {
    /// Not of the form `owner/repo` with both halves non-empty.
    #[error("Repository slug must be 'owner/repo', got '{raw}'")]
    Shape {
        /// The rejected input.
        raw: String,
    },
    /// Contains characters outside the accepted set.
    #[error("Repository slug contains invalid characters: '{raw}'")]
    Characters {
        /// The rejected input.
        raw: String,
    },
}
