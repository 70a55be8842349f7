//! Feeds harness output through the classifier into a terminal sink.

use std::io::Write;

use tracing::debug;

use super::buffer::LineBuffer;
use crate::classify::{LineClassifier, Mode};
use crate::output::{strip_ansi, Highlighter};
use crate::Result;

/// Line counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Lines read from the harness.
    pub lines_in: usize,
    /// Lines written to the sink.
    pub lines_out: usize,
}

impl DriverStats {
    /// Lines dropped by the classifier.
    pub fn suppressed(&self) -> usize {
        self.lines_in - self.lines_out
    }
}

/// Splits chunks into lines, classifies them in arrival order and writes
/// the survivors to `sink`.
pub struct StreamDriver<W: Write> {
    classifier: LineClassifier,
    buffer: LineBuffer,
    highlighter: Highlighter,
    sink: W,
    stats: DriverStats,
}

impl<W: Write> StreamDriver<W> {
    /// Create a driver around a fresh classifier.
    pub fn new(classifier: LineClassifier, highlighter: Highlighter, sink: W) -> Self {
        Self {
            classifier,
            buffer: LineBuffer::new(),
            highlighter,
            sink,
            stats: DriverStats::default(),
        }
    }

    /// Current classifier mode.
    pub fn mode(&self) -> Mode {
        self.classifier.mode()
    }

    /// Counts so far.
    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Accept one chunk of raw output. Never applies backpressure.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        for line in self.buffer.push(chunk) {
            self.process_line(&line)?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Flush the trailing partial line and return the sink with final counts.
    pub fn finish(mut self) -> Result<(W, DriverStats)> {
        if let Some(line) = self.buffer.finish() {
            self.process_line(&line)?;
        }
        self.sink.flush()?;

        debug!(
            lines_in = self.stats.lines_in,
            lines_out = self.stats.lines_out,
            mode = %self.classifier.mode(),
            "stream finished"
        );
        Ok((self.sink, self.stats))
    }

    fn process_line(&mut self, raw: &[u8]) -> Result<()> {
        self.stats.lines_in += 1;
        let text = strip_ansi(raw);

        if let Some(formatted) = self.classifier.feed(&text) {
            writeln!(self.sink, "{}", self.highlighter.render(&formatted))?;
            self.stats.lines_out += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> StreamDriver<Vec<u8>> {
        StreamDriver::new(LineClassifier::new(), Highlighter::plain(), Vec::new())
    }

    #[test]
    fn test_chunks_split_mid_line() {
        let mut driver = driver();
        driver
            .push_chunk(b"GECKO(9) | INFO | Start BrowserChrome Te")
            .unwrap();
        assert_eq!(driver.mode(), Mode::Starting);
        driver.push_chunk(b"st Results\nTEST-PASS | a.js | ok\n").unwrap();
        assert_eq!(driver.mode(), Mode::Normal);

        let (out, stats) = driver.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " TEST-PASS ok\n");
        assert_eq!(stats.lines_in, 2);
        assert_eq!(stats.lines_out, 1);
        assert_eq!(stats.suppressed(), 1);
    }

    #[test]
    fn test_trailing_partial_line_flushed() {
        let mut driver = driver();
        driver
            .push_chunk(b"INFO | Start BrowserChrome Test Results\nplain tail")
            .unwrap();
        let (out, _) = driver.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain tail\n");
    }

    #[test]
    fn test_colored_input_classified() {
        let mut driver = driver();
        driver
            .push_chunk(b"INFO | Start BrowserChrome Test Results\n\x1b[31mTEST-UNEXPECTED-FAIL\x1b[0m | x/a.js | boom\n")
            .unwrap();
        let (out, _) = driver.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  TEST-UNEXPECTED-FAIL a.js - boom\n"
        );
    }
}
