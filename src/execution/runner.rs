//! Harness process runner.

use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::command::HarnessCommand;
use super::result::{OutputChunk, RunResult};
use crate::error::FilterError;
use crate::stream::{DriverStats, StreamDriver};
use crate::Result;

/// Buffer size for reading harness output.
const READ_BUFFER_SIZE: usize = 4096;

/// Chunks buffered between the reader task and the driver.
const CHANNEL_CAPACITY: usize = 64;

/// Check that the harness checkout exists.
pub fn check_harness(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(FilterError::HarnessMissing(dir.to_path_buf()))
    }
}

/// Read `reader` to the end, forwarding each read as a chunk.
///
/// Returns the number of bytes forwarded.
pub async fn pump<R>(mut reader: R, tx: &mpsc::Sender<OutputChunk>) -> Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let mut total = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            debug!(total, "harness output: EOF");
            break;
        }
        total += n;
        tx.send(OutputChunk::new(buf[..n].to_vec()))
            .await
            .map_err(|_| FilterError::ChannelClosed)?;
    }

    Ok(total)
}

/// Feed a captured log through `driver`, read in chunks like live output.
pub async fn replay<R, W>(mut reader: R, mut driver: StreamDriver<W>) -> Result<(W, DriverStats)>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        driver.push_chunk(&buf[..n])?;
    }

    driver.finish()
}

/// A running harness process.
pub struct HarnessProcess {
    chunks: mpsc::Receiver<OutputChunk>,
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<RunResult>>,
}

impl HarnessProcess {
    /// Next chunk of output, or `None` once the process is gone.
    pub async fn next_chunk(&mut self) -> Option<OutputChunk> {
        self.chunks.recv().await
    }

    /// Ask the reader task to kill the process. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the process to exit.
    pub async fn wait(self) -> Result<RunResult> {
        let HarnessProcess {
            chunks,
            cancel,
            task,
        } = self;
        // Dropping the receiver makes the reader stop forwarding.
        drop(chunks);
        let result = task
            .await
            .map_err(|e| FilterError::Io(std::io::Error::other(e)))?;
        drop(cancel);
        result
    }
}

/// Spawn the harness and start streaming its stdout.
///
/// Must be called from within a tokio runtime. Stderr is inherited.
pub fn spawn(command: &HarnessCommand) -> Result<HarnessProcess> {
    info!(command = %command, dir = %command.working_dir.display(), "spawning harness");

    let mut child = tokio::process::Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.working_dir)
        .envs(&command.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| FilterError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let stdout = child.stdout.take().ok_or(FilterError::ChannelClosed)?;
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let start = Instant::now();
        let mut cancelled = false;

        let bytes_read = tokio::select! {
            read = pump(stdout, &tx) => match read {
                Ok(n) => n,
                // The driver went away; nothing left to forward to.
                Err(FilterError::ChannelClosed) => 0,
                Err(e) => return Err(e),
            },
            _ = &mut cancel_rx => {
                warn!("cancelling harness run");
                cancelled = true;
                child.start_kill()?;
                0
            }
        };

        let status = child.wait().await?;
        let result = RunResult {
            exit_code: status.code(),
            duration: start.elapsed(),
            bytes_read,
            cancelled,
        };
        debug!(?result, "harness exited");
        Ok::<_, FilterError>(result)
    });

    Ok(HarnessProcess {
        chunks: rx,
        cancel: Some(cancel_tx),
        task,
    })
}
