//! Terminal-facing output processing.
//!
//! This module covers both ends of the terminal:
//! - stripping escape sequences from incoming harness lines
//! - rendering classified lines with colors
//!
//! # Example
//!
//! ```
//! use mochitest_filter::classify::{FormattedLine, Style};
//! use mochitest_filter::output::{strip_ansi, Highlighter};
//!
//! let clean = strip_ansi(b"\x1b[31mTEST-UNEXPECTED-FAIL\x1b[0m");
//! assert_eq!(clean, "TEST-UNEXPECTED-FAIL");
//!
//! let line = FormattedLine::labelled("TEST-OK", "browser_dbg.js", Style::Ok).indent(2);
//! assert_eq!(Highlighter::plain().render(&line), "  TEST-OK browser_dbg.js");
//! ```

mod ansi;
mod highlight;

pub use ansi::strip_ansi;
pub use highlight::Highlighter;
