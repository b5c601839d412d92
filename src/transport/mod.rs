//! Transports deliver rendered commands and data rows to a plotting engine.
//!
//! Ordering contract for one plot call: exactly one `send` with the full command, then for every
//! curve (in clause order) its rows followed by `end_curve`, then `flush`.

use crate::foundation::error::PlotResult;

/// Pipe-backed transport with a bounded write wait.
pub mod pipe;

/// Sink contract for the command and data stream of a plot call.
pub trait Transport {
    /// Deliver the rendered command.
    fn send(&mut self, command: &str) -> PlotResult<()>;
    /// Deliver one data row.
    fn send_row(&mut self, values: &[f64]) -> PlotResult<()>;
    /// Mark the current curve's data as complete.
    fn end_curve(&mut self) -> PlotResult<()>;
    /// Called once after the last curve of a call.
    fn flush(&mut self) -> PlotResult<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, command: &str) -> PlotResult<()> {
        (**self).send(command)
    }

    fn send_row(&mut self, values: &[f64]) -> PlotResult<()> {
        (**self).send_row(values)
    }

    fn end_curve(&mut self) -> PlotResult<()> {
        (**self).end_curve()
    }

    fn flush(&mut self) -> PlotResult<()> {
        (**self).flush()
    }
}

/// Event recorded by [`RecordingTransport`].
#[derive(Clone, Debug, PartialEq)]
pub enum TransportEvent {
    /// A command string.
    Command(String),
    /// One data row.
    Row(Vec<f64>),
    /// End-of-curve sentinel.
    EndCurve,
    /// End of a call.
    Flush,
}

/// In-memory transport for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Vec<TransportEvent>,
}

impl RecordingTransport {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in arrival order.
    pub fn events(&self) -> &[TransportEvent] {
        &self.events
    }

    /// Commands in arrival order.
    pub fn commands(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransportEvent::Command(c) => Some(c.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rows grouped per curve, split at each sentinel.
    pub fn curves(&self) -> Vec<Vec<Vec<f64>>> {
        let mut out = Vec::new();
        let mut current = Vec::new();
        for e in &self.events {
            match e {
                TransportEvent::Row(r) => current.push(r.clone()),
                TransportEvent::EndCurve => out.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        out
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, command: &str) -> PlotResult<()> {
        self.events.push(TransportEvent::Command(command.to_string()));
        Ok(())
    }

    fn send_row(&mut self, values: &[f64]) -> PlotResult<()> {
        self.events.push(TransportEvent::Row(values.to_vec()));
        Ok(())
    }

    fn end_curve(&mut self) -> PlotResult<()> {
        self.events.push(TransportEvent::EndCurve);
        Ok(())
    }

    fn flush(&mut self) -> PlotResult<()> {
        self.events.push(TransportEvent::Flush);
        Ok(())
    }
}
