use crate::foundation::error::{PlotError, PlotResult};
use crate::transport::Transport;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread::JoinHandle;
use std::time::Duration;

/// Sentinel line terminating one curve's inline data.
pub const END_OF_DATA: &str = "e";

/// Options for [`PipeTransport`].
#[derive(Clone, Debug)]
pub struct PipeTransportOpts {
    /// Longest time `flush` waits for the writer to accept a call's output.
    pub write_timeout: Duration,
}

impl Default for PipeTransportOpts {
    fn default() -> Self {
        Self {
            write_timeout: Duration::from_secs(5),
        }
    }
}

/// Transport that renders the engine's inline-data text protocol into any writer.
///
/// Output of one call is buffered and handed to a dedicated writer thread on `flush`; the caller
/// waits at most `write_timeout` for the write to complete. After a timeout the transport is
/// stalled and every later call fails fast; replace it to recover.
pub struct PipeTransport {
    opts: PipeTransportOpts,
    pending: String,
    jobs: Option<SyncSender<Vec<u8>>>,
    acks: Receiver<std::io::Result<()>>,
    worker: Option<JoinHandle<()>>,
    /// Milliseconds waited by the write that stalled the transport.
    stalled: Option<u64>,
}

impl PipeTransport {
    /// Start a writer thread that owns `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W, opts: PipeTransportOpts) -> Self {
        let (job_tx, job_rx) = mpsc::sync_channel::<Vec<u8>>(1);
        let (ack_tx, ack_rx) = mpsc::sync_channel::<std::io::Result<()>>(1);
        let worker = std::thread::spawn(move || {
            let mut writer = writer;
            for buf in job_rx {
                let res = writer.write_all(&buf).and_then(|()| writer.flush());
                if ack_tx.send(res).is_err() {
                    break;
                }
            }
        });
        Self {
            opts,
            pending: String::new(),
            jobs: Some(job_tx),
            acks: ack_rx,
            worker: Some(worker),
            stalled: None,
        }
    }

    /// Return `true` once a write exceeded the bounded wait.
    pub fn is_stalled(&self) -> bool {
        self.stalled.is_some()
    }

    /// Text buffered for the next `flush`.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    fn ensure_live(&self) -> PlotResult<()> {
        match self.stalled {
            Some(waited_ms) => Err(PlotError::TransportTimeout { waited_ms }),
            None => Ok(()),
        }
    }

    fn stall(&mut self, waited_ms: u64) -> PlotError {
        self.stalled = Some(waited_ms);
        tracing::warn!(waited_ms, "pipe transport stalled");
        PlotError::TransportTimeout { waited_ms }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.opts.write_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Transport for PipeTransport {
    fn send(&mut self, command: &str) -> PlotResult<()> {
        self.ensure_live()?;
        self.pending.push_str(command);
        self.pending.push('\n');
        Ok(())
    }

    fn send_row(&mut self, values: &[f64]) -> PlotResult<()> {
        self.ensure_live()?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.pending.push(' ');
            }
            write!(self.pending, "{v}").map_err(anyhow::Error::from)?;
        }
        self.pending.push('\n');
        Ok(())
    }

    fn end_curve(&mut self) -> PlotResult<()> {
        self.ensure_live()?;
        self.pending.push_str(END_OF_DATA);
        self.pending.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> PlotResult<()> {
        self.ensure_live()?;
        if self.pending.is_empty() {
            return Ok(());
        }
        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| PlotError::transport("pipe transport is closed"))?;
        let buf = std::mem::take(&mut self.pending).into_bytes();
        match jobs.try_send(buf) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                // The writer is still busy with an earlier call's output.
                let waited_ms = self.timeout_ms();
                return Err(self.stall(waited_ms));
            }
            Err(TrySendError::Disconnected(_)) => {
                return Err(PlotError::transport("writer thread exited"));
            }
        }

        match self.acks.recv_timeout(self.opts.write_timeout) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PlotError::transport(format!("write failed: {e}"))),
            Err(RecvTimeoutError::Timeout) => {
                let waited_ms = self.timeout_ms();
                Err(self.stall(waited_ms))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(PlotError::transport("writer thread exited"))
            }
        }
    }
}

impl Drop for PipeTransport {
    fn drop(&mut self) {
        drop(self.jobs.take());
        // A stalled writer may never return; leave its thread detached.
        if self.stalled.is_none()
            && let Some(worker) = self.worker.take()
        {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/pipe.rs"]
mod tests;
