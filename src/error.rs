//! Error types for mochitest-filter.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for mochitest-filter operations.
///
/// Line classification itself never fails; these errors come from the
/// shell around it (arguments, configuration, the harness process).
#[derive(Error, Debug)]
pub enum FilterError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A user-supplied denylist pattern is not a valid regular expression.
    #[error("invalid denylist pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The harness checkout directory does not exist.
    #[error("harness directory not found: {}", .0.display())]
    HarnessMissing(PathBuf),

    /// The harness process could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The output channel closed before the harness finished.
    #[error("output channel closed")]
    ChannelClosed,
}

/// Convenience Result type for mochitest-filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
