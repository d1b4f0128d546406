//! Text heuristics over tool output.
//!
//! Pure functions that detect structured sub-content inside unstructured
//! tool-result text: git commit confirmation lines and push-target
//! repository slugs. They live outside the rendering control flow so their
//! policies can change without touching any renderer.

use crate::model::RepoSlug;
use regex::Regex;
use std::sync::LazyLock;

/// Matches one git commit confirmation line, e.g.
/// `[main abc1234] Add new feature` or `[main (root-commit) abc1234] Init`.
/// The hash is the last 6-40 char lowercase hex token inside the brackets;
/// the subject is the rest of the line. Stat lines (` 1 file changed, ...`)
/// do not start with `[` and never match.
static COMMIT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[[^\]]+ ([0-9a-f]{6,40})\] (.+)$").expect("Invalid commit line regex")
});

/// Matches the repository part of a GitHub push target, in either the ssh
/// (`To github.com:owner/repo.git`) or https
/// (`To https://github.com/owner/repo.git`) spelling.
static PUSH_TARGET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)")
        .expect("Invalid push target regex")
});

// ===== CommitRef =====

/// A commit reference detected in tool output: short hash plus subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    hash: String,
    message: String,
}

impl CommitRef {
    /// Create a commit reference.
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// The (usually abbreviated) commit hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The commit subject line.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ===== Detection functions =====

/// Extract every commit confirmation line from `text`, in order.
///
/// A single tool result may confirm several commits (e.g. a loop of `git
/// commit` calls); each matching line yields one [`CommitRef`]. Text without
/// commit lines yields an empty vector.
pub fn commit_lines(text: &str) -> Vec<CommitRef> {
    COMMIT_LINE_REGEX
        .captures_iter(text)
        .map(|caps| CommitRef::new(&caps[1], &caps[2]))
        .collect()
}

/// The commit-line pattern, for callers that need match positions rather
/// than extracted fields (e.g. hash hyperlinking inside escaped output).
pub(crate) fn commit_line_regex() -> &'static Regex {
    &COMMIT_LINE_REGEX
}

/// Find the first GitHub `owner/repo` slug in push-style output.
///
/// Returns `None` when no match is found or the matched text does not
/// validate as a slug. A trailing `.git` on the repository name is stripped.
pub fn detect_repo_slug(text: &str) -> Option<RepoSlug> {
    let caps = PUSH_TARGET_REGEX.captures(text)?;
    let owner = &caps[1];
    let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]);
    RepoSlug::new(format!("{owner}/{repo}")).ok()
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    // ===== commit_lines =====

    #[test]
    fn commit_line_with_stat_line_extracts_subject_only() {
        let text = "[main abc1234] Add new feature\n 1 file changed, 2 insertions(+)";
        let commits = commit_lines(text);

        assert_eq!(commits, vec![CommitRef::new("abc1234", "Add new feature")]);
    }

    #[test]
    fn root_commit_marker_is_handled() {
        let text = "[main (root-commit) def5678] Initial commit\n 3 files changed";
        let commits = commit_lines(text);

        assert_eq!(commits, vec![CommitRef::new("def5678", "Initial commit")]);
    }

    #[test]
    fn detached_head_ref_is_handled() {
        let text = "[detached HEAD 0a1b2c3] Hotfix\n 1 file changed";
        let commits = commit_lines(text);

        assert_eq!(commits, vec![CommitRef::new("0a1b2c3", "Hotfix")]);
    }

    #[test]
    fn multiple_commit_lines_extract_independently() {
        let text = concat!(
            "[main aaa111b] First change\n",
            " 1 file changed\n",
            "[main bbb222c] Second change\n",
            " 2 files changed\n",
        );
        let commits = commit_lines(text);

        assert_eq!(
            commits,
            vec![
                CommitRef::new("aaa111b", "First change"),
                CommitRef::new("bbb222c", "Second change"),
            ]
        );
    }

    #[test]
    fn subject_may_contain_brackets() {
        let text = "[main abc1234] Fix [urgent] crash";
        let commits = commit_lines(text);

        assert_eq!(
            commits,
            vec![CommitRef::new("abc1234", "Fix [urgent] crash")]
        );
    }

    #[test]
    fn plain_text_yields_no_commits() {
        assert!(commit_lines("nothing to see here").is_empty());
        assert!(commit_lines("").is_empty());
    }

    #[test]
    fn indented_bracket_line_does_not_match() {
        // Only line-initial brackets count; quoted commit lines inside other
        // output stay unmatched.
        assert!(commit_lines("  [main abc1234] quoted").is_empty());
    }

    #[test]
    fn bracket_without_hash_does_not_match() {
        assert!(commit_lines("[warning] something happened").is_empty());
    }

    #[test]
    fn full_length_hash_matches() {
        let text = "[trunk 0123456789abcdef0123456789abcdef01234567] Long hash";
        let commits = commit_lines(text);

        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].hash(),
            "0123456789abcdef0123456789abcdef01234567"
        );
    }

    // ===== detect_repo_slug =====

    #[test]
    fn detects_ssh_push_target() {
        let text = "To github.com:example/project.git\n   abc1234..def5678  main -> main";
        let slug = detect_repo_slug(text).expect("should detect slug");

        assert_eq!(slug.as_str(), "example/project");
    }

    #[test]
    fn detects_https_push_target() {
        let text = "To https://github.com/my-org/my_repo.git\n * [new branch] main -> main";
        let slug = detect_repo_slug(text).expect("should detect slug");

        assert_eq!(slug.as_str(), "my-org/my_repo");
    }

    #[test]
    fn keeps_first_match_when_several_present() {
        let text = concat!(
            "To github.com:first/one.git\n",
            "remote: https://github.com/second/two/pull/new/main\n",
        );
        let slug = detect_repo_slug(text).expect("should detect slug");

        assert_eq!(slug.as_str(), "first/one");
    }

    #[test]
    fn plain_text_yields_no_slug() {
        assert!(detect_repo_slug("Everything up-to-date").is_none());
        assert!(detect_repo_slug("").is_none());
    }

    #[test]
    fn repo_without_git_suffix_is_kept_verbatim() {
        let slug =
            detect_repo_slug("remote: https://github.com/owner/repo/pull/new/feature")
                .expect("should detect slug");

        assert_eq!(slug.as_str(), "owner/repo");
    }
}
