//! Tests for config loading, precedence, and override resolution.

use super::*;

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::model::RepoSlug;
use crate::pages::{DEFAULT_PAGE_BUDGET, DEFAULT_SUMMARY_MAX_CHARS};

// ===== Defaults =====

#[test]
fn default_config_uses_builtin_thresholds() {
    let config = ResolvedConfig::default();

    assert_eq!(config.github_repo, None);
    assert_eq!(config.page_budget, DEFAULT_PAGE_BUDGET);
    assert_eq!(config.summary_max_chars, DEFAULT_SUMMARY_MAX_CHARS);
    assert_eq!(config.log_file, None);
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_none_when_file_missing() {
    let dir = tempdir().unwrap();

    let result = load_config_file(dir.path().join("missing.toml"));

    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_all_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
github_repo = "octo/site"
page_budget = 150000
summary_max_chars = 96
log_file = "/tmp/ccpub.log"
"#,
    )
    .unwrap();

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(config.github_repo.as_deref(), Some("octo/site"));
    assert_eq!(config.page_budget, Some(150_000));
    assert_eq!(config.summary_max_chars, Some(96));
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/ccpub.log")));
}

#[test]
fn load_config_file_allows_partial_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "page_budget = 50000\n").unwrap();

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(config.page_budget, Some(50_000));
    assert_eq!(config.github_repo, None);
    assert_eq!(config.summary_max_chars, None);
    assert_eq!(config.log_file, None);
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    // Misspelled key should fail loudly rather than be ignored.
    fs::write(&path, "page_bugdet = 50000\n").unwrap();

    let err = load_config_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_config_file_reports_invalid_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "github_repo = \n").unwrap();

    let err = load_config_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_config_file_reports_read_failures() {
    // A directory exists but cannot be read as a file.
    let dir = tempdir().unwrap();

    let err = load_config_file(dir.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn config_error_display_names_the_offending_path() {
    let err = ConfigError::ParseError {
        path: PathBuf::from("/etc/ccpub/config.toml"),
        reason: "expected value".to_string(),
    };

    let message = err.to_string();
    assert!(message.contains("/etc/ccpub/config.toml"));
    assert!(message.contains("expected value"));
}

// ===== default_config_path =====

#[test]
fn default_config_path_points_into_ccpub_directory() {
    // May be None on platforms without a config directory.
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("ccpub/config.toml"), "got: {:?}", path);
    }
}

// ===== merge_config =====

#[test]
fn merge_config_with_no_file_yields_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_present_fields() {
    let file = ConfigFile {
        github_repo: Some("octo/site".to_string()),
        page_budget: None,
        summary_max_chars: Some(64),
        log_file: None,
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.github_repo.as_deref(), Some("octo/site"));
    assert_eq!(resolved.page_budget, DEFAULT_PAGE_BUDGET);
    assert_eq!(resolved.summary_max_chars, 64);
    assert_eq!(resolved.log_file, None);
}

#[test]
fn merge_config_carries_log_file_through() {
    let file = ConfigFile {
        github_repo: None,
        page_budget: None,
        summary_max_chars: None,
        log_file: Some(PathBuf::from("/var/log/ccpub.log")),
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.log_file, Some(PathBuf::from("/var/log/ccpub.log")));
}

// ===== Environment overrides =====

/// RAII guard to ensure environment variable cleanup even when an
/// assertion fails mid-test.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(ccpub_env)]
fn apply_env_overrides_respects_ccpub_repo() {
    let _guard = EnvGuard::new("CCPUB_REPO");
    env::set_var("CCPUB_REPO", "env-owner/env-repo");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.github_repo.as_deref(), Some("env-owner/env-repo"));
}

#[test]
#[serial(ccpub_env)]
fn apply_env_overrides_is_identity_when_unset() {
    let _guard = EnvGuard::new("CCPUB_REPO");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base);
}

#[test]
#[serial(ccpub_env)]
fn apply_env_overrides_beats_config_file_value() {
    let _guard = EnvGuard::new("CCPUB_REPO");
    env::set_var("CCPUB_REPO", "env-owner/env-repo");

    let base = ResolvedConfig {
        github_repo: Some("file-owner/file-repo".to_string()),
        ..ResolvedConfig::default()
    };

    let result = apply_env_overrides(base);

    assert_eq!(result.github_repo.as_deref(), Some("env-owner/env-repo"));
}

// ===== CLI overrides =====

#[test]
fn apply_cli_overrides_takes_highest_precedence() {
    let base = ResolvedConfig {
        github_repo: Some("file-owner/file-repo".to_string()),
        page_budget: 100,
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(base, Some("cli-owner/cli-repo".to_string()), Some(64_000));

    assert_eq!(result.github_repo.as_deref(), Some("cli-owner/cli-repo"));
    assert_eq!(result.page_budget, 64_000);
}

#[test]
fn apply_cli_overrides_without_flags_changes_nothing() {
    let base = ResolvedConfig::default();

    let result = apply_cli_overrides(base.clone(), None, None);

    assert_eq!(result, base);
}

// ===== Precedence =====

#[test]
#[serial(ccpub_env)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("CCPUB_CONFIG");
    let dir = tempdir().unwrap();

    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "github_repo = \"explicit/repo\"\n").unwrap();

    // Env var points elsewhere and should be ignored.
    let from_env = dir.path().join("env.toml");
    fs::write(&from_env, "github_repo = \"env/repo\"\n").unwrap();
    env::set_var("CCPUB_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit)).unwrap().unwrap();

    assert_eq!(config.github_repo.as_deref(), Some("explicit/repo"));
}

#[test]
#[serial(ccpub_env)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new("CCPUB_CONFIG");
    let dir = tempdir().unwrap();

    let from_env = dir.path().join("env.toml");
    fs::write(&from_env, "page_budget = 12345\n").unwrap();
    env::set_var("CCPUB_CONFIG", &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    assert_eq!(config.page_budget, Some(12_345));
}

#[test]
#[serial(ccpub_env)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    let _guard = EnvGuard::new("CCPUB_CONFIG");
    let dir = tempdir().unwrap();
    env::set_var("CCPUB_CONFIG", dir.path().join("absent.toml"));

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
#[serial(ccpub_env)]
fn load_config_with_precedence_falls_back_to_default_location() {
    let _guard = EnvGuard::new("CCPUB_CONFIG");

    // No flag and no env var consults the default path, which may or may
    // not exist on the machine running the tests.
    assert!(load_config_with_precedence(None).is_ok());
}

#[test]
#[serial(ccpub_env)]
fn resolve_config_layers_file_env_and_cli() {
    let _config_guard = EnvGuard::new("CCPUB_CONFIG");
    let _repo_guard = EnvGuard::new("CCPUB_REPO");
    let dir = tempdir().unwrap();

    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "github_repo = \"file/repo\"\npage_budget = 1000\nsummary_max_chars = 40\n",
    )
    .unwrap();
    env::set_var("CCPUB_REPO", "env/repo");

    let resolved = resolve_config(Some(path), None, Some(2000)).unwrap();

    // File sets the baseline, environment beats file, CLI beats both.
    assert_eq!(resolved.github_repo.as_deref(), Some("env/repo"));
    assert_eq!(resolved.page_budget, 2000);
    assert_eq!(resolved.summary_max_chars, 40);
}

#[test]
#[serial(ccpub_env)]
fn resolve_config_cli_repo_beats_environment() {
    let _config_guard = EnvGuard::new("CCPUB_CONFIG");
    let _repo_guard = EnvGuard::new("CCPUB_REPO");

    env::set_var("CCPUB_REPO", "env/repo");

    let resolved = resolve_config(None, Some("cli/repo".to_string()), None).unwrap();

    assert_eq!(resolved.github_repo.as_deref(), Some("cli/repo"));
}

// ===== render_options =====

#[test]
fn render_options_carries_budgets_and_repo() {
    let config = ResolvedConfig {
        github_repo: Some("octo/site".to_string()),
        page_budget: 5_000,
        summary_max_chars: 33,
        log_file: None,
    };

    let options = config.render_options().unwrap();

    assert_eq!(options.page_budget(), 5_000);
    assert_eq!(options.summary_max_chars(), 33);
    assert_eq!(options.repo().map(RepoSlug::as_str), Some("octo/site"));
}

#[test]
fn render_options_without_repo_leaves_links_off() {
    let options = ResolvedConfig::default().render_options().unwrap();

    assert!(options.repo().is_none());
    assert_eq!(options.page_budget(), DEFAULT_PAGE_BUDGET);
}

#[test]
fn render_options_rejects_malformed_repo() {
    let config = ResolvedConfig {
        github_repo: Some("not a slug".to_string()),
        ..ResolvedConfig::default()
    };

    let err = config.render_options().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidRepo { .. }));
}
