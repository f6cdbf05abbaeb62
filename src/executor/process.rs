// Interpreter subprocess lifecycle

use crate::executor::error::{ExecutorError, Result};
use crate::executor::types::ExecutionResult;
use chrono::Utc;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How long to keep draining pipes once the interpreter is gone.
///
/// Background jobs started by the command can hold the pipes open after the
/// interpreter exits; output arriving after this window is dropped.
pub const IO_CAPTURE_TIMEOUT: Duration = Duration::from_millis(500);

/// Most bytes kept per captured view.
///
/// Reading continues past the limit so the child never blocks on a full
/// pipe, but the extra bytes are discarded.
pub const MAX_OUTPUT_BYTES: usize = 8 * 1024 * 1024;

const READ_CHUNK_BYTES: usize = 8192;

/// Chunks in flight between the pumps and the collector
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type Chunk = (Stream, Vec<u8>);

/// Bytes read from the child's pipes
#[derive(Debug, Default)]
struct Captured {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    combined: Vec<u8>,
    truncated: bool,
}

fn append_bounded(buf: &mut Vec<u8>, chunk: &[u8]) -> bool {
    let remaining = MAX_OUTPUT_BYTES.saturating_sub(buf.len());
    let take = chunk.len().min(remaining);
    buf.extend_from_slice(&chunk[..take]);
    take < chunk.len()
}

impl Captured {
    fn push(&mut self, stream: Stream, chunk: &[u8]) {
        let own = match stream {
            Stream::Stdout => append_bounded(&mut self.stdout, chunk),
            Stream::Stderr => append_bounded(&mut self.stderr, chunk),
        };
        let combined = append_bounded(&mut self.combined, chunk);

        if (own || combined) && !self.truncated {
            warn!(
                max_bytes = MAX_OUTPUT_BYTES,
                stream = ?stream,
                "output exceeded limit, truncating"
            );
            self.truncated = true;
        }
    }

    fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }
}

/// Forward everything read from `reader` to the collector
async fn pump<R: AsyncRead + Unpin>(mut reader: R, stream: Stream, tx: mpsc::Sender<Chunk>) {
    let mut buf = [0u8; READ_CHUNK_BYTES];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send((stream, buf[..n].to_vec())).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(stream = ?stream, error = %e, "pipe read failed");
                break;
            }
        }
    }
}

/// Accumulate chunks while the child runs, until every pump has hung up
async fn collect(mut rx: mpsc::Receiver<Chunk>) -> Captured {
    let mut captured = Captured::default();
    while let Some((stream, chunk)) = rx.recv().await {
        captured.push(stream, &chunk);
    }
    captured
}

/// Type the command into the interpreter, then close its stdin
async fn deliver(mut stdin: ChildStdin, command: String) {
    let mut payload = command.into_bytes();
    payload.push(b'\n');

    // A broken pipe only means the interpreter exited before reading everything
    if let Err(e) = stdin.write_all(&payload).await {
        debug!(error = %e, "failed to deliver command to interpreter");
        return;
    }
    if let Err(e) = stdin.shutdown().await {
        debug!(error = %e, "failed to close interpreter stdin");
    }
}

/// Wait for the collector until the capture window closes.
///
/// Pumps still blocked on a pipe after the window are aborted, which hangs up
/// their senders and lets the collector return what it already holds.
async fn drain(mut collector: JoinHandle<Captured>, pumps: Vec<JoinHandle<()>>) -> Captured {
    let finished = timeout(IO_CAPTURE_TIMEOUT, &mut collector).await;
    let joined = match finished {
        Ok(joined) => joined,
        Err(_) => {
            debug!("pipes still open after interpreter exit, dropping the rest");
            for pump in &pumps {
                pump.abort();
            }
            collector.await
        }
    };

    match joined {
        Ok(captured) => captured,
        Err(e) => {
            debug!(error = %e, "output collector did not finish");
            Captured::default()
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Runs a command by typing it into an interpreter's stdin
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Launch `interpreter`, feed it `command` and wait up to `timeout_after`.
    ///
    /// The interpreter is started directly, never through a host shell, and
    /// inherits the full environment. A non-zero exit code is returned in the
    /// result and logged as a warning. On timeout the child is killed and an
    /// empty result with no return code comes back. Only a failure to start
    /// (or to wait for) the interpreter is an error.
    pub async fn execute(
        &self,
        interpreter: &Path,
        command: &str,
        working_dir: Option<&Path>,
        timeout_after: Duration,
    ) -> Result<ExecutionResult> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut cmd = Command::new(interpreter);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            interpreter = %interpreter.display(),
            working_dir = ?working_dir,
            timeout_secs = timeout_after.as_secs_f64(),
            "spawning interpreter"
        );

        let mut child = cmd.spawn().map_err(|e| ExecutorError::LaunchFailed {
            interpreter: interpreter.display().to_string(),
            source: e,
        })?;
        let pid = child.id();

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut pumps = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            pumps.push(tokio::spawn(pump(stdout, Stream::Stdout, tx.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(tokio::spawn(pump(stderr, Stream::Stderr, tx.clone())));
        }
        drop(tx);
        let collector = tokio::spawn(collect(rx));

        let writer = child
            .stdin
            .take()
            .map(|stdin| tokio::spawn(deliver(stdin, command.to_string())));

        let waited = timeout(timeout_after, child.wait()).await;

        match waited {
            Ok(Ok(status)) => {
                let captured = drain(collector, pumps).await;
                let result = ExecutionResult {
                    stdout: lossy(&captured.stdout),
                    stderr: lossy(&captured.stderr),
                    output: lossy(&captured.combined),
                    return_code: status.code(),
                    timed_out: false,
                    truncated: captured.truncated,
                    sanitized: false,
                    pid,
                    started_at,
                    duration_ms: start.elapsed().as_millis() as u64,
                };

                if !status.success() {
                    warn!(
                        command = %command,
                        return_code = ?result.return_code,
                        output = %result.output,
                        "Command returned non-zero exit code"
                    );
                }

                Ok(result)
            }
            Ok(Err(e)) => {
                if let Err(kill_err) = child.start_kill() {
                    debug!(error = %kill_err, "kill after failed wait");
                }
                if let Some(writer) = writer {
                    writer.abort();
                }
                Err(ExecutorError::WaitFailed {
                    interpreter: interpreter.display().to_string(),
                    source: e,
                })
            }
            Err(_) => {
                // Kill before anything else so a logging failure cannot leak the child
                if let Err(e) = child.kill().await {
                    warn!(pid = ?pid, error = %e, "failed to kill timed-out interpreter");
                }
                if let Some(writer) = writer {
                    writer.abort();
                }

                let captured = drain(collector, pumps).await;
                if !captured.stdout.is_empty() {
                    warn!("{}", lossy(&captured.stdout));
                }
                if !captured.stderr.is_empty() {
                    warn!("{}", lossy(&captured.stderr));
                }
                if captured.is_empty() {
                    debug!("no partial output before timeout");
                }
                warn!(
                    command = %command,
                    timeout_secs = timeout_after.as_secs_f64(),
                    "Command timed out!"
                );

                Ok(ExecutionResult::timed_out(
                    pid,
                    started_at,
                    start.elapsed().as_millis() as u64,
                ))
            }
        }
    }
}
