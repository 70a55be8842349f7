//! Stream driver between the harness process and the terminal.
//!
//! Chunks arrive in any size; the driver reassembles lines, strips escape
//! sequences, classifies each line in order and writes the result.
//!
//! # Example
//!
//! ```
//! use mochitest_filter::classify::LineClassifier;
//! use mochitest_filter::output::Highlighter;
//! use mochitest_filter::stream::StreamDriver;
//!
//! let mut driver = StreamDriver::new(LineClassifier::new(), Highlighter::plain(), Vec::new());
//! driver.push_chunk(b"INFO | Start BrowserChrome Test Results\nTEST-PA").unwrap();
//! driver.push_chunk(b"SS | foo.js | renders\n").unwrap();
//!
//! let (out, stats) = driver.finish().unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), " TEST-PASS renders\n");
//! assert_eq!(stats.lines_in, 2);
//! ```

mod buffer;
mod driver;

pub use buffer::LineBuffer;
pub use driver::{DriverStats, StreamDriver};
