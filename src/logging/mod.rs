//! Tracing subscriber initialization.
//!
//! Logs go to stderr by default so generated page paths printed on
//! stdout stay clean for shell pipelines. When a log file is
//! configured, logs are written there instead and can be monitored
//! with `tail -f`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the tracing subscriber.
///
/// With no log file, output goes to stderr; with one, the log
/// directory is created if missing and output is appended to the file.
///
/// # Arguments
///
/// * `log_file` - Optional log file path; stderr when `None`
/// * `default_filter` - Filter used when RUST_LOG is not set (e.g. "info")
///
/// # Returns
/// * `Ok(())` if initialization succeeded
/// * `Err(LoggingError)` if the subscriber was already initialized,
///   the path is unusable, or directory creation failed
pub fn init(log_file: Option<&Path>, default_filter: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over the caller's default
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let Some(log_path) = log_file else {
        return tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init()
            .map_err(|_| LoggingError::SubscriberAlreadySet);
    };

    // Create log directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial(tracing_init)]
    fn init_with_file_creates_log_directory_if_missing() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("logs");
        let log_file = nested.join("run.log");

        // Initialize logging (may fail if subscriber already set, which is fine)
        let _ = init(Some(&log_file), "info");

        // Directory is created even if subscriber init failed
        assert!(nested.exists(), "Log directory should be created: {:?}", nested);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_with_file_succeeds_when_directory_already_exists() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("run.log");

        let _ = init(Some(&log_file), "info");

        assert!(dir.path().exists());
    }

    #[test]
    #[serial(tracing_init)]
    fn init_rejects_path_without_file_name() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("..");

        // Path validation runs before subscriber setup, so this fails the
        // same way regardless of global subscriber state.
        let err = init(Some(&bogus), "info").unwrap_err();

        assert!(matches!(err, LoggingError::InvalidPath(_)));
    }

    #[test]
    #[serial(tracing_init)]
    fn reinitialization_reports_subscriber_already_set() {
        let _ = init(None, "info");

        let err = init(None, "info").unwrap_err();

        assert!(matches!(err, LoggingError::SubscriberAlreadySet));
    }
}
