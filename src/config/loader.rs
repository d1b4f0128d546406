//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::RepoSlug;
use crate::pages::{RenderOptions, DEFAULT_PAGE_BUDGET, DEFAULT_SUMMARY_MAX_CHARS};

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Configured repository is not a plain `owner/name` pair.
    #[error("Invalid repository '{raw}': {reason}")]
    InvalidRepo {
        /// The rejected value.
        raw: String,
        /// Validation error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/ccpub/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// GitHub repository (`owner/name`) used for commit hyperlinks.
    #[serde(default)]
    pub github_repo: Option<String>,

    /// Per-page rendered-size budget in bytes.
    #[serde(default)]
    pub page_budget: Option<usize>,

    /// Character cap for index page summaries.
    #[serde(default)]
    pub summary_max_chars: Option<usize>,

    /// Path to log file for tracing output; stderr when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// GitHub repository for commit hyperlinks, if configured.
    ///
    /// Held as the raw string until [`ResolvedConfig::render_options`]
    /// validates it, so a bad value is reported against its source
    /// rather than at first use.
    pub github_repo: Option<String>,

    /// Per-page rendered-size budget in bytes.
    pub page_budget: usize,

    /// Character cap for index page summaries.
    pub summary_max_chars: usize,

    /// Path to log file for tracing output; stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            github_repo: None,
            page_budget: DEFAULT_PAGE_BUDGET,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            log_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Convert to renderer options, validating the repository slug.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepo`] if `github_repo` is set but
    /// not a plain `owner/name` pair.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        let mut options = RenderOptions::new()
            .with_page_budget(self.page_budget)
            .with_summary_max_chars(self.summary_max_chars);

        if let Some(raw) = &self.github_repo {
            let slug = RepoSlug::new(raw.clone()).map_err(|e| ConfigError::InvalidRepo {
                raw: raw.clone(),
                reason: e.to_string(),
            })?;
            options = options.with_repo(slug);
        }

        Ok(options)
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Arguments
///
/// * `path` - Path to config file
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/ccpub/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ccpub").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `CCPUB_CONFIG` environment variable
/// 3. Default path `~/.config/ccpub/config.toml`
///
/// Only the highest-precedence candidate is consulted; a missing file at
/// that location yields `Ok(None)` rather than falling through.
///
/// # Arguments
///
/// * `config_path` - Optional explicit config path (e.g., from CLI `--config`)
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    // 1. Explicit path (like CLI --config)
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    // 2. CCPUB_CONFIG environment variable
    if let Ok(env_path) = std::env::var("CCPUB_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    // 3. Default path
    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    // No config path available
    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default.
///
/// # Arguments
///
/// * `config_file` - Optional loaded config file
///
/// # Returns
///
/// Fully resolved configuration.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        github_repo: config.github_repo.or(defaults.github_repo),
        page_budget: config.page_budget.unwrap_or(defaults.page_budget),
        summary_max_chars: config
            .summary_max_chars
            .unwrap_or(defaults.summary_max_chars),
        log_file: config.log_file.or(defaults.log_file),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CCPUB_REPO`: Override `github_repo`
///
/// # Arguments
///
/// * `config` - Base resolved config
///
/// # Returns
///
/// Config with environment overrides applied.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    // Override repository if CCPUB_REPO is set
    if let Ok(repo) = std::env::var("CCPUB_REPO") {
        config.github_repo = Some(repo);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `repo_override` - Optional repository from `--repo` flag
/// * `page_budget_override` - Optional budget from `--page-budget` flag
///
/// # Returns
///
/// Config with CLI overrides applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    repo_override: Option<String>,
    page_budget_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(repo) = repo_override {
        config.github_repo = Some(repo);
    }

    if let Some(budget) = page_budget_override {
        config.page_budget = budget;
    }

    config
}

/// Resolve the effective configuration for one invocation.
///
/// Layers, lowest precedence first: built-in defaults, the config file
/// (if any), environment variables, CLI flags.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    repo_override: Option<String>,
    page_budget_override: Option<usize>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file);
    let with_env = apply_env_overrides(merged);

    Ok(apply_cli_overrides(
        with_env,
        repo_override,
        page_budget_override,
    ))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
