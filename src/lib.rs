//! # mochitest-filter
//!
//! Streaming classifier that condenses mochitest harness output into a
//! readable terminal summary.
//!
//! The harness prints a mix of framework logs, nested browser-process logs,
//! console messages and `TEST-*` result markers. This crate drops the known
//! noise, tracks which phase of the run is being parsed, and reformats the
//! remaining lines for live viewing.
//!
//! ## Features
//!
//! - **Line classification**: denylist, four shape-specific sub-parsers and
//!   an explicit mode state machine
//! - **Streaming**: partial lines are reassembled across output chunks
//! - **Harness runner**: spawns `mach mochitest` and streams its stdout
//! - **Replay**: condenses captured logs offline
//!
//! ## Quick Start
//!
//! ```
//! use mochitest_filter::classify::read_output;
//!
//! let log = "\
//! GECKO(1234) | INFO | Start BrowserChrome Test Results
//! TEST-UNEXPECTED-FAIL | devtools/browser_dbg-foo.js | timeout waiting
//! End BrowserChrome Test Results
//! ";
//!
//! let lines = read_output(log);
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].body, "browser_dbg-foo.js - timeout waiting");
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod output;
pub mod stream;

// Re-export commonly used types
pub use classify::{
    classify, read_output, sanitize, Classification, Denylist, FormattedLine, LineClassifier,
    Mode, Style,
};
pub use error::{FilterError, Result};
pub use execution::{HarnessCommand, HarnessProcess, RunResult};
pub use output::Highlighter;
pub use stream::StreamDriver;
