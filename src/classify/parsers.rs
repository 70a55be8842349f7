//! Shape-specific sub-parsers.
//!
//! Each parser receives a line the dispatcher has already routed to it and
//! returns the next mode plus at most one formatted line. Field extraction
//! is all-or-nothing: a line whose marker is present but whose fields cannot
//! be pulled out is echoed verbatim instead.

use once_cell::sync::Lazy;
use regex::Regex;

use super::line::{FormattedLine, Style};
use super::mode::Mode;
use super::Classification;

/// Marker that opens the results section of the run.
pub const RESULTS_BEGIN: &str = "Start BrowserChrome Test Results";

/// Marker that closes the results section of the run.
pub const RESULTS_END: &str = "End BrowserChrome Test Results";

/// Stack-trace delimiter: five or more asterisks.
const STACK_DELIMITER: &str = "*****";

/// End-of-run tallies that are reported elsewhere.
const SUMMARY_KEYWORDS: &[&str] = &["Passed", "Failed", "Todo", "Mode", "Shutdown"];

static TEST_RESULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(TEST-[A-Z-]*).* \| (.*\.js)( \| (.*))?$").unwrap());

/// Fields of a `TEST-*` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TestResult<'a> {
    kind: &'a str,
    path: &'a str,
    message: Option<&'a str>,
}

impl<'a> TestResult<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = TEST_RESULT.captures(line)?;
        Some(Self {
            kind: caps.get(1)?.as_str(),
            path: caps.get(2)?.as_str(),
            message: caps.get(4).map(|m| m.as_str()),
        })
    }

    fn file_name(&self) -> &'a str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(self.path)
    }
}

fn verbatim(mode: Mode, line: &str) -> Classification {
    Classification::emit(mode, FormattedLine::plain(line.trim()))
}

/// Check whether a line opens or closes a stack trace.
pub fn is_stack_delimiter(line: &str) -> bool {
    line.contains(STACK_DELIMITER)
}

/// Check whether a line is nothing but a stack-trace delimiter.
pub fn is_bare_stack_delimiter(line: &str) -> bool {
    line.len() >= STACK_DELIMITER.len() && line.bytes().all(|b| b == b'*')
}

/// Check whether a line comes from the nested browser process.
pub fn is_nested_process(line: &str) -> bool {
    line.contains("GECKO(")
}

/// Handle a line carrying a `TEST-` token. Never changes mode.
pub fn test_result(mode: Mode, line: &str) -> Classification {
    let Some(result) = TestResult::parse(line) else {
        return verbatim(mode, line);
    };

    let message = result.message.unwrap_or("");
    let formatted = match result.kind {
        "TEST-PASS" => FormattedLine::labelled(result.kind, message, Style::Pass).indent(1),
        "TEST-UNEXPECTED-FAIL" => {
            let body = if message.is_empty() {
                result.file_name().to_string()
            } else {
                format!("{} - {}", result.file_name(), message)
            };
            FormattedLine::labelled(result.kind, body, Style::Fail).indent(2)
        }
        "TEST-OK" => FormattedLine::labelled(result.kind, result.file_name(), Style::Ok).indent(2),
        _ => FormattedLine::labelled(result.kind, result.file_name(), Style::Info).indent(2),
    };

    Classification::emit(mode, formatted)
}

/// Text after the last `INFO` token, without leading separators.
fn info_message(line: &str) -> Option<&str> {
    let start = line.rfind("INFO")? + "INFO".len();
    Some(
        line[start..]
            .trim_start_matches(|c: char| c == '|' || c == ':' || c.is_whitespace())
            .trim_end(),
    )
}

/// Handle a line carrying an `INFO` token.
///
/// The results-begin marker is the only way out of [`Mode::Starting`].
pub fn info(mode: Mode, line: &str) -> Classification {
    let Some(message) = info_message(line) else {
        return verbatim(mode, line);
    };

    if mode == Mode::Starting {
        if message.contains(RESULTS_BEGIN) {
            return Classification::suppress(Mode::Normal);
        }
        return Classification::suppress(mode);
    }

    if SUMMARY_KEYWORDS.iter().any(|k| message.contains(k)) {
        return Classification::suppress(mode);
    }

    Classification::emit(mode, FormattedLine::plain(message).indent(2))
}

/// Text after the first `|` of a `GECKO...` line.
fn nested_message(line: &str) -> Option<&str> {
    if !line.starts_with("GECKO") {
        return None;
    }
    line.split_once('|').map(|(_, rest)| rest.trim())
}

/// Handle a nested-process line or a bare stack-trace delimiter.
pub fn nested_process(mode: Mode, line: &str) -> Classification {
    if mode == Mode::Starting {
        return Classification::suppress(mode);
    }

    if is_stack_delimiter(line) {
        let next = mode.toggle_stack_trace();
        if next == Mode::InStackTrace {
            let header = FormattedLine::labelled("Stack Trace", "", Style::Fail).indent(3);
            return Classification::emit(next, header);
        }
        return Classification::suppress(next);
    }

    let Some(message) = nested_message(line) else {
        return verbatim(mode, line);
    };

    if mode == Mode::InStackTrace {
        let frame = FormattedLine::labelled(">", message, Style::StackFrame).indent(3);
        return Classification::emit(mode, frame);
    }

    Classification::emit(mode, FormattedLine::plain(message))
}

/// Handle a `Console message` line. Never changes mode.
pub fn console(mode: Mode, line: &str) -> Classification {
    const WARNING: &str = "JavaScript Warning";
    const WARNING_PREFIX: &str = "JavaScript Warning: ";

    if !line.contains(WARNING) {
        return Classification::emit(mode, FormattedLine::plain(line));
    }

    match line.rfind(WARNING_PREFIX) {
        Some(idx) => {
            let message = &line[idx + WARNING_PREFIX.len()..];
            let formatted =
                FormattedLine::labelled("JS warning:", message, Style::Warning).indent(2);
            Classification::emit(mode, formatted)
        }
        None => Classification::emit(mode, FormattedLine::plain(line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(result: &Classification) -> Option<String> {
        result.output.as_ref().map(FormattedLine::text)
    }

    #[test]
    fn test_parse_test_result() {
        let result = TestResult::parse("TEST-PASS | a/b/foo.js | works").unwrap();
        assert_eq!(result.kind, "TEST-PASS");
        assert_eq!(result.path, "a/b/foo.js");
        assert_eq!(result.message, Some("works"));
        assert_eq!(result.file_name(), "foo.js");
    }

    #[test]
    fn test_parse_test_result_without_message() {
        let result = TestResult::parse("0:01.00 TEST-OK | dir/browser_foo.js").unwrap();
        assert_eq!(result.kind, "TEST-OK");
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_parse_test_result_miss() {
        assert!(TestResult::parse("TEST-START | not a script").is_none());
    }

    #[test]
    fn test_pass() {
        let result = test_result(Mode::Normal, "TEST-PASS | foo.js | should render correctly");
        let line = result.output.clone().unwrap();
        assert_eq!(line.style, Style::Pass);
        assert_eq!(line.text(), " TEST-PASS should render correctly");
        assert_eq!(result.mode, Mode::Normal);
    }

    #[test]
    fn test_unexpected_fail() {
        let result = test_result(Mode::Normal, "TEST-UNEXPECTED-FAIL | /a/b/foo.js | timeout waiting");
        let line = result.output.unwrap();
        assert_eq!(line.style, Style::Fail);
        assert_eq!(line.body, "foo.js - timeout waiting");
    }

    #[test]
    fn test_unexpected_fail_without_message() {
        let result = test_result(Mode::Normal, "TEST-UNEXPECTED-FAIL | /a/b/foo.js");
        assert_eq!(result.output.unwrap().body, "foo.js");
    }

    #[test]
    fn test_ok() {
        let result = test_result(Mode::Normal, "TEST-OK | devtools/browser_dbg.js | took 10ms");
        let line = result.output.unwrap();
        assert_eq!(line.style, Style::Ok);
        assert_eq!(line.text(), "  TEST-OK browser_dbg.js");
    }

    #[test]
    fn test_other_kind() {
        let result = test_result(Mode::Normal, "TEST-START | devtools/browser_dbg.js");
        let line = result.output.unwrap();
        assert_eq!(line.style, Style::Info);
        assert_eq!(line.text(), "  TEST-START browser_dbg.js");
    }

    #[test]
    fn test_result_fallback() {
        let result = test_result(Mode::Normal, "TEST-INFO something odd");
        assert_eq!(text(&result).unwrap(), "TEST-INFO something odd");
        assert_eq!(result.output.unwrap().style, Style::Neutral);
    }

    #[test]
    fn test_info_begin_marker() {
        let result = info(Mode::Starting, "GECKO(1234) | INFO | Start BrowserChrome Test Results");
        assert_eq!(result.mode, Mode::Normal);
        assert!(result.output.is_none());
    }

    #[test]
    fn test_info_suppressed_while_starting() {
        let result = info(Mode::Starting, "0:00.10 INFO checking something");
        assert_eq!(result.mode, Mode::Starting);
        assert!(result.output.is_none());
    }

    #[test]
    fn test_info_summary_suppressed() {
        for line in [
            "INFO Passed: 10",
            "INFO Failed: 0",
            "INFO Todo: 1",
            "INFO Mode: e10s",
            "INFO Shutdown",
        ] {
            let result = info(Mode::Normal, line);
            assert!(result.output.is_none(), "{line}");
        }
    }

    #[test]
    fn test_info_summary_keyword_before_token() {
        let result = info(Mode::Normal, "Shutdown hooks Passed INFO | profile ready");
        assert_eq!(text(&result).unwrap(), "  profile ready");
        assert_eq!(result.mode, Mode::Normal);
    }

    #[test]
    fn test_info_emits_message() {
        let result = info(Mode::Normal, "0:05.00 INFO | Waiting for the debugger");
        assert_eq!(text(&result).unwrap(), "  Waiting for the debugger");
    }

    #[test]
    fn test_nested_suppressed_while_starting() {
        let result = nested_process(Mode::Starting, "GECKO(1) | *****");
        assert_eq!(result.mode, Mode::Starting);
        assert!(result.output.is_none());
    }

    #[test]
    fn test_stack_trace_toggle() {
        let first = nested_process(Mode::Normal, "*****");
        assert_eq!(first.mode, Mode::InStackTrace);
        assert_eq!(text(&first).unwrap(), "   Stack Trace");

        let second = nested_process(first.mode, "*****");
        assert_eq!(second.mode, Mode::Normal);
        assert!(second.output.is_none());
    }

    #[test]
    fn test_bare_stack_delimiter() {
        assert!(is_bare_stack_delimiter("*****"));
        assert!(is_bare_stack_delimiter("****************************************"));
        assert!(!is_bare_stack_delimiter("****"));
        assert!(!is_bare_stack_delimiter("Password field shows *******"));
        assert!(!is_bare_stack_delimiter("GECKO(1) | *****"));
    }

    #[test]
    fn test_stack_frame() {
        let result = nested_process(Mode::InStackTrace, "GECKO(1) | some message");
        assert_eq!(text(&result).unwrap(), "   > some message");
        assert_eq!(result.mode, Mode::InStackTrace);
    }

    #[test]
    fn test_nested_plain() {
        let result = nested_process(Mode::Normal, "GECKO(77) | [Parent 77] WARNING: x");
        assert_eq!(text(&result).unwrap(), "[Parent 77] WARNING: x");
    }

    #[test]
    fn test_nested_fallback_without_separator() {
        let result = nested_process(Mode::Normal, "GECKO(77) exited with code 0");
        assert_eq!(text(&result).unwrap(), "GECKO(77) exited with code 0");
    }

    #[test]
    fn test_console_warning() {
        let line = "Console message: [JavaScript Warning: \"unused var\" {file: \"a.js\"}]";
        let result = console(Mode::Normal, line);
        let formatted = result.output.unwrap();
        assert_eq!(formatted.style, Style::Warning);
        assert_eq!(formatted.text(), "  JS warning: \"unused var\" {file: \"a.js\"}]");
    }

    #[test]
    fn test_console_warning_without_colon() {
        let line = "Console message: JavaScript Warning";
        let result = console(Mode::Normal, line);
        assert_eq!(text(&result).unwrap(), line);
    }

    #[test]
    fn test_console_other() {
        let line = "Console message: hello";
        let result = console(Mode::Normal, line);
        assert_eq!(text(&result).unwrap(), line);
        assert_eq!(result.mode, Mode::Normal);
    }
}
