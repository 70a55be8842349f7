//! Terminal escape stripping for harness output.

use vte::{Params, Parser, Perform};

/// Strip terminal escape sequences from one line of raw bytes.
///
/// Printable text and tabs survive; CSI, OSC, DCS and other escapes are
/// dropped along with the remaining C0 controls. Invalid UTF-8 is replaced
/// lossily.
pub fn strip_ansi(input: &[u8]) -> String {
    if !input.iter().any(|b| *b < 0x20 && *b != b'\t') {
        return String::from_utf8_lossy(input).into_owned();
    }

    let mut text = LineText::default();
    let mut parser = Parser::new();
    parser.advance(&mut text, input);
    text.0
}

/// Collects printable characters of a single line.
#[derive(Default)]
struct LineText(String);

impl Perform for LineText {
    fn print(&mut self, c: char) {
        self.0.push(c);
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\t' {
            self.0.push('\t');
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(
        &mut self,
        _params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line() {
        assert_eq!(strip_ansi(b"TEST-PASS | a.js | ok"), "TEST-PASS | a.js | ok");
    }

    #[test]
    fn test_strip_colored_status() {
        let input = b"\x1b[32mTEST-OK\x1b[0m | browser_dbg.js";
        assert_eq!(strip_ansi(input), "TEST-OK | browser_dbg.js");
    }

    #[test]
    fn test_drops_carriage_return() {
        assert_eq!(strip_ansi(b"GECKO(1) | hi\r"), "GECKO(1) | hi");
    }

    #[test]
    fn test_keeps_tabs() {
        assert_eq!(strip_ansi(b"col1\tcol2"), "col1\tcol2");
    }

    #[test]
    fn test_osc_title() {
        assert_eq!(strip_ansi(b"\x1b]0;mach\x07INFO | ready"), "INFO | ready");
    }

    #[test]
    fn test_utf8_text() {
        assert_eq!(strip_ansi("\x1b[1mnaïve ✓\x1b[0m".as_bytes()), "naïve ✓");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_ansi(b""), "");
    }
}
