//! Configuration management for mochitest-filter.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::Denylist;
use crate::cli::Args;
use crate::execution::HarnessCommand;
use crate::output::Highlighter;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Harness configuration.
    pub harness: HarnessSection,
    /// Line filter configuration.
    pub filter: FilterSection,
    /// Terminal output configuration.
    pub output: OutputSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Harness configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSection {
    /// Firefox checkout containing `mach`.
    pub dir: PathBuf,
    /// Tests to run when none are given on the command line.
    pub default_tests: Vec<String>,
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("firefox"),
            default_tests: vec!["devtools/client/debugger/new".to_string()],
        }
    }
}

/// Line filter configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Regex patterns hidden in addition to the built-in denylist.
    pub extra_denylist: Vec<String>,
}

/// Terminal output configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Emit terminal colors.
    pub color: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MOCHITEST_FILTER_HARNESS_DIR") {
            if !dir.is_empty() {
                self.harness.dir = PathBuf::from(dir);
            }
        }

        if let Some(level) = lookup("MOCHITEST_FILTER_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }

        // https://no-color.org: any non-empty value disables color.
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.output.color = false;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref dir) = args.harness_dir {
            self.harness.dir = dir.clone();
        }

        for pattern in &args.deny {
            if !self.filter.extra_denylist.contains(pattern) {
                self.filter.extra_denylist.push(pattern.clone());
            }
        }

        if args.no_color {
            self.output.color = false;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Build the denylist from the configured extra patterns.
    pub fn denylist(&self) -> crate::Result<Denylist> {
        Denylist::with_extra(&self.filter.extra_denylist)
    }

    /// Highlighter matching the color setting.
    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.output.color)
    }

    /// Harness command for the given tests, or the configured defaults.
    pub fn harness_command(&self, tests: &[String]) -> HarnessCommand {
        let tests = if tests.is_empty() {
            &self.harness.default_tests
        } else {
            tests
        };
        HarnessCommand::mochitest(&self.harness.dir, tests.iter().cloned())
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
