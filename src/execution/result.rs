//! Harness run result types.

use std::time::Duration;

/// Outcome of a harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Wall-clock duration.
    pub duration: Duration,
    /// Bytes read from the harness output.
    pub bytes_read: usize,
    /// Whether the run was cancelled by the user.
    pub cancelled: bool,
}

impl RunResult {
    /// Check if the harness succeeded (exit code 0).
    pub fn success(&self) -> bool {
        !self.cancelled && self.exit_code == Some(0)
    }
}

/// A chunk of raw harness output.
///
/// Chunk boundaries are arbitrary and may fall inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// Raw bytes.
    pub raw: Vec<u8>,
}

impl OutputChunk {
    /// Create a new output chunk.
    pub fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// Number of bytes in the chunk.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
