//! Harness process execution.
//!
//! This module starts the test harness and hands its output to the
//! stream driver:
//! - harness presence check
//! - process spawning with streamed stdout
//! - cancellation on user interrupt
//! - replay of captured logs through the same path
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mochitest_filter::execution::{check_harness, spawn, HarnessCommand};
//!
//! # async fn run() -> mochitest_filter::Result<()> {
//! let checkout = Path::new("firefox");
//! check_harness(checkout)?;
//!
//! let command = HarnessCommand::mochitest(checkout, ["devtools/client/debugger/new"]);
//! let mut process = spawn(&command)?;
//! while let Some(chunk) = process.next_chunk().await {
//!     println!("{} bytes", chunk.len());
//! }
//! let result = process.wait().await?;
//! # Ok(())
//! # }
//! ```

mod command;
mod result;
mod runner;

pub use command::HarnessCommand;
pub use result::{OutputChunk, RunResult};
pub use runner::{check_harness, pump, replay, spawn, HarnessProcess};
