//! Line classification and mode tracking.
//!
//! Every harness line goes through the same pipeline:
//! - sanitization (trim, unescape quotes)
//! - denylist check, independent of mode
//! - dispatch by shape to one of four sub-parsers
//!
//! The parse [`Mode`] is passed in and handed back explicitly, or kept in a
//! [`LineClassifier`] owned by whoever drives the stream.
//!
//! # Example
//!
//! ```
//! use mochitest_filter::classify::{classify, sanitize, Denylist, Mode};
//!
//! let denylist = Denylist::new();
//! let line = sanitize("TEST-PASS | foo.js | should render correctly");
//! let result = classify(&denylist, Mode::Normal, &line);
//!
//! assert_eq!(result.mode, Mode::Normal);
//! assert!(result.output.unwrap().text().contains("should render correctly"));
//! ```

mod denylist;
mod line;
mod mode;
mod parsers;
mod sanitize;

use tracing::{debug, trace};

pub use denylist::Denylist;
pub use line::{FormattedLine, Style};
pub use mode::Mode;
pub use parsers::{RESULTS_BEGIN, RESULTS_END};
pub use sanitize::{sanitize, SanitizedLine};

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Mode to use for the next line.
    pub mode: Mode,
    /// Formatted output, if the line should be shown.
    pub output: Option<FormattedLine>,
}

impl Classification {
    /// Drop the line, moving to `mode`.
    pub fn suppress(mode: Mode) -> Self {
        Self { mode, output: None }
    }

    /// Show `line`, moving to `mode`.
    pub fn emit(mode: Mode, line: FormattedLine) -> Self {
        Self {
            mode,
            output: Some(line),
        }
    }
}

/// Classify one sanitized line in the given mode.
///
/// Total: every input yields a next mode and at most one output line.
pub fn classify(denylist: &Denylist, mode: Mode, line: &SanitizedLine) -> Classification {
    let line = line.as_str();

    if denylist.is_noise(line) {
        return Classification::suppress(mode);
    }

    if mode.is_terminal() {
        return Classification::suppress(mode);
    }

    let mut result = if line.contains("TEST-") {
        parsers::test_result(mode, line)
    } else if line.contains("INFO") {
        parsers::info(mode, line)
    } else if parsers::is_nested_process(line) || parsers::is_bare_stack_delimiter(line) {
        parsers::nested_process(mode, line)
    } else if line.contains("Console message") {
        parsers::console(mode, line)
    } else if line.contains(RESULTS_END) {
        Classification::suppress(Mode::Done)
    } else {
        Classification::emit(mode, FormattedLine::plain(line))
    };

    // Nothing is shown before the results begin, whatever its shape.
    if !mode.can_emit() {
        result.output = None;
    }

    result
}

/// Stateful classifier for one harness run.
///
/// Owns the denylist and the current mode; create one per stream.
#[derive(Debug, Default)]
pub struct LineClassifier {
    denylist: Denylist,
    mode: Mode,
}

impl LineClassifier {
    /// Create a classifier in [`Mode::Starting`] with the built-in denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom denylist.
    pub fn with_denylist(denylist: Denylist) -> Self {
        Self {
            denylist,
            mode: Mode::Starting,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sanitize and classify one raw line, advancing the mode.
    pub fn feed(&mut self, raw: &str) -> Option<FormattedLine> {
        let line = sanitize(raw);
        let result = classify(&self.denylist, self.mode, &line);

        if result.mode != self.mode {
            debug!(from = %self.mode, to = %result.mode, "mode transition");
            self.mode = result.mode;
        }

        if result.output.is_none() {
            trace!(line = line.as_str(), "suppressed");
        }

        result.output
    }
}

/// Classify a captured multi-line log from a fresh [`Mode::Starting`].
///
/// Returns the non-empty formatted lines in order.
pub fn read_output(text: &str) -> Vec<FormattedLine> {
    let mut classifier = LineClassifier::new();
    text.split('\n')
        .filter_map(|raw| classifier.feed(raw))
        .filter(|line| !line.text().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mode: Mode, raw: &str) -> Classification {
        classify(&Denylist::new(), mode, &sanitize(raw))
    }

    #[test]
    fn test_noise_keeps_mode() {
        for mode in [Mode::Starting, Mode::Normal, Mode::InStackTrace, Mode::Done] {
            let result = run(mode, "GECKO(1) | TELEMETRY PING");
            assert_eq!(result, Classification::suppress(mode));
        }
    }

    #[test]
    fn test_empty_line() {
        for mode in [Mode::Starting, Mode::Normal, Mode::InStackTrace, Mode::Done] {
            assert_eq!(run(mode, ""), Classification::suppress(mode));
        }
    }

    #[test]
    fn test_done_absorbs() {
        let result = run(Mode::Done, "TEST-UNEXPECTED-FAIL | a.js | boom");
        assert_eq!(result, Classification::suppress(Mode::Done));
        let result = run(Mode::Done, "GECKO(1) | INFO | Start BrowserChrome Test Results");
        assert_eq!(result.mode, Mode::Done);
    }

    #[test]
    fn test_end_marker() {
        let result = run(Mode::Normal, "End BrowserChrome Test Results");
        assert_eq!(result, Classification::suppress(Mode::Done));
    }

    #[test]
    fn test_starting_suppresses_every_shape() {
        for raw in [
            "TEST-PASS | foo.js | ok",
            "Console message: hi",
            "GECKO(1) | hi",
            "plain text",
        ] {
            let result = run(Mode::Starting, raw);
            assert!(result.output.is_none(), "{raw}");
            assert_eq!(result.mode, Mode::Starting);
        }
    }

    #[test]
    fn test_plain_passthrough() {
        let result = run(Mode::Normal, "  something unexpected  ");
        assert_eq!(result.output.unwrap().text(), "something unexpected");
    }

    #[test]
    fn test_test_token_wins_over_info() {
        let result = run(Mode::Normal, "0:01.00 INFO TEST-OK | a/b.js | took 3ms");
        let line = result.output.unwrap();
        assert_eq!(line.style, Style::Ok);
    }

    #[test]
    fn test_asterisks_inside_text_are_not_delimiters() {
        let result = run(
            Mode::Normal,
            r#"Console message: [JavaScript Warning: \"x ***** y\"]"#,
        );
        assert_eq!(result.mode, Mode::Normal);
        let line = result.output.unwrap();
        assert_eq!(line.style, Style::Warning);
        assert_eq!(line.body, "\"x ***** y\"]");

        let result = run(Mode::Normal, "Password field shows *******");
        assert_eq!(result.mode, Mode::Normal);
        assert_eq!(result.output.unwrap().text(), "Password field shows *******");

        let result = run(Mode::InStackTrace, "Password field shows *******");
        assert_eq!(result.mode, Mode::InStackTrace);
    }

    #[test]
    fn test_line_classifier_tracks_mode() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.mode(), Mode::Starting);

        assert!(classifier
            .feed("GECKO(1234) | INFO | Start BrowserChrome Test Results")
            .is_none());
        assert_eq!(classifier.mode(), Mode::Normal);

        assert!(classifier.feed("*****").is_some());
        assert_eq!(classifier.mode(), Mode::InStackTrace);

        assert!(classifier.feed("End BrowserChrome Test Results").is_none());
        assert_eq!(classifier.mode(), Mode::Done);
        assert!(classifier.feed("TEST-PASS | a.js | late").is_none());
    }

    #[test]
    fn test_read_output() {
        let log = "\
0:00.01 INFO preparing profile
GECKO(1234) | INFO | Start BrowserChrome Test Results
TEST-START | devtools/browser_dbg-foo.js
TEST-PASS | devtools/browser_dbg-foo.js | should render correctly
TELEMETRY PING
TEST-OK | devtools/browser_dbg-foo.js | took 120ms
End BrowserChrome Test Results
TEST-PASS | devtools/browser_dbg-foo.js | after the end
";
        let lines: Vec<String> = read_output(log).iter().map(FormattedLine::text).collect();
        assert_eq!(
            lines,
            vec![
                "  TEST-START browser_dbg-foo.js",
                " TEST-PASS should render correctly",
                "  TEST-OK browser_dbg-foo.js",
            ]
        );
    }
}
