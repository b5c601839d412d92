//! plotargs interprets heterogeneous plot calls for gnuplot-style engines.
//!
//! A plot call is an ordered mix of option fragments (mapping literals or inline
//! `key, value` runs) and N-dimensional numeric arrays. plotargs turns it into a validated plot
//! description and the literal command + data stream the engine consumes.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: raw arguments -> alternating option and data runs
//! 2. **Chunk**: runs -> chunks carrying per-curve option snapshots (legends never propagate)
//! 3. **Resolve**: tuple size per chunk, implicit domain columns, broadcast curve count
//! 4. **Render**: chunks -> one command string (`plot`/`splot` with one clause per curve)
//! 5. **Serialize**: per curve, rows in column order followed by an end-of-curve sentinel
//!
//! Every validation step runs before anything reaches a [`Transport`]: a rejected call never
//! leaves a partial command behind.
//!
//! # Getting started
//!
//! Create a [`PlotWindow`] over a transport ([`RecordingTransport`] for tests,
//! [`PipeTransport`] for a real engine pipe), then call [`PlotWindow::plot`] with
//! [`RawArgument`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod args;
mod chunk;
mod emit;
mod foundation;
mod options;
mod transport;
mod window;

pub use args::classify::RawArgument;
pub use chunk::broadcast::CurveDims;
pub use chunk::builder::Chunk;
pub use emit::serialize::write_rows;
pub use foundation::core::{PlotArray, PlotMode};
pub use foundation::error::{PlotError, PlotResult};
pub use options::state::OptionState;
pub use options::vocab::{OptionScope, OptionSpec, ValueKind, lookup, names_in_scope};
pub use transport::pipe::{END_OF_DATA, PipeTransport, PipeTransportOpts};
pub use transport::{RecordingTransport, Transport, TransportEvent};
pub use window::plot_window::{PlotStats, PlotWindow, PreparedPlot, WindowOpts};
