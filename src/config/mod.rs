//! Configuration module.
//!
//! Settings resolve through a fixed precedence chain: built-in
//! defaults, then an optional TOML file, then environment variables,
//! then CLI flags. [`resolve_config`] runs the whole chain; the
//! individual steps are exported for callers that need finer control.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, load_config_file,
    load_config_with_precedence, merge_config, resolve_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
