use crate::args::classify::{RawArgument, classify};
use crate::chunk::builder::{Chunk, build_chunks, split_plot_options};
use crate::emit::command::render_command;
use crate::emit::serialize::write_chunk;
use crate::foundation::core::PlotMode;
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::OptionState;
use crate::options::vocab::OptionScope;
use crate::transport::Transport;

/// Window-level configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowOpts {
    /// Plot in 3-D unless a call overrides it with the `3d` option.
    #[serde(default)]
    pub three_d: bool,
    /// Ceiling on the total number of curves in one call.
    #[serde(default = "default_max_curves")]
    pub max_curves: usize,
    /// Plot-option defaults applied to every call.
    #[serde(default)]
    pub plot_options: serde_json::Map<String, serde_json::Value>,
}

fn default_max_curves() -> usize {
    100
}

impl Default for WindowOpts {
    fn default() -> Self {
        Self {
            three_d: false,
            max_curves: default_max_curves(),
            plot_options: serde_json::Map::new(),
        }
    }
}

impl WindowOpts {
    /// Parse and validate options from a JSON document.
    pub fn from_json_str(s: &str) -> PlotResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| PlotError::config(format!("invalid window options: {e}")))?;
        opts.plot_defaults()?;
        Ok(opts)
    }

    fn plot_defaults(&self) -> PlotResult<OptionState> {
        OptionState::from_json_map(&self.plot_options, OptionScope::Plot)
            .map_err(|e| PlotError::config(e.to_string()))
    }
}

/// Counts reported after a successful plot call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotStats {
    /// Resolved chunks.
    pub chunks: usize,
    /// Curves emitted.
    pub curves: usize,
    /// Data rows emitted across all curves.
    pub rows: usize,
}

/// A fully validated call, ready to be sent.
#[derive(Clone, Debug)]
pub struct PreparedPlot {
    /// Dimensionality used for the call.
    pub mode: PlotMode,
    /// Effective plot options (window defaults overridden by the call).
    pub plot_options: OptionState,
    /// Rendered engine command.
    pub command: String,
    /// Resolved chunks in clause order.
    pub chunks: Vec<Chunk>,
}

impl PreparedPlot {
    /// Total curves across all chunks.
    pub fn curve_count(&self) -> usize {
        self.chunks.iter().map(Chunk::curve_count).sum()
    }

    /// Send the command, every curve's rows and sentinels, then flush.
    pub fn emit(&self, transport: &mut dyn Transport) -> PlotResult<PlotStats> {
        transport.send(&self.command)?;
        let mut rows = 0;
        for chunk in &self.chunks {
            rows += write_chunk(chunk, transport)?;
        }
        transport.flush()?;
        Ok(PlotStats {
            chunks: self.chunks.len(),
            curves: self.curve_count(),
            rows,
        })
    }
}

/// Plot-window abstraction owning the cumulative curve option state and a transport.
///
/// Calls against one window must not overlap; `&mut self` enforces this.
pub struct PlotWindow<T: Transport> {
    opts: WindowOpts,
    plot_defaults: OptionState,
    curve_state: OptionState,
    transport: T,
}

impl<T: Transport> PlotWindow<T> {
    /// Create a window; fails if `opts.plot_options` is not valid plot-scope vocabulary.
    pub fn new(opts: WindowOpts, transport: T) -> PlotResult<Self> {
        let plot_defaults = opts.plot_defaults()?;
        Ok(Self {
            opts,
            plot_defaults,
            curve_state: OptionState::new(),
            transport,
        })
    }

    /// Window configuration.
    pub fn opts(&self) -> &WindowOpts {
        &self.opts
    }

    /// Cumulative curve options carried between calls.
    pub fn curve_state(&self) -> &OptionState {
        &self.curve_state
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Swap in a new transport (e.g. after a stall), returning the old one.
    pub fn replace_transport(&mut self, transport: T) -> T {
        std::mem::replace(&mut self.transport, transport)
    }

    /// Consume the window, returning its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Forget the cumulative curve options.
    pub fn reset(&mut self) {
        self.curve_state.clear();
    }

    /// Validate a call and render its command without sending anything.
    ///
    /// On success the cumulative curve state is updated; on failure it is left untouched.
    #[tracing::instrument(skip(self, args), fields(args = args.len()))]
    pub fn prepare(&mut self, args: Vec<RawArgument>) -> PlotResult<PreparedPlot> {
        let segments = classify(args)?;
        let (call_plot, segments) = split_plot_options(segments)?;

        let mut plot_options = self.plot_defaults.clone();
        plot_options.extend_from(&call_plot);
        let mode = PlotMode::from_three_d(match plot_options.get("3d") {
            Some(v) => v.as_bool().unwrap_or(false),
            None => self.opts.three_d,
        });
        let max_curves = plot_options
            .count("maxcurves")
            .unwrap_or(self.opts.max_curves);

        let mut state = self.curve_state.clone();
        let chunks = build_chunks(segments, &mut state, mode, max_curves)?;
        let requested: usize = chunks.iter().map(Chunk::curve_count).sum();

        let command = render_command(&plot_options, mode, &chunks)?;
        self.curve_state = state;
        tracing::debug!(chunks = chunks.len(), curves = requested, ?mode, "prepared plot");
        Ok(PreparedPlot {
            mode,
            plot_options,
            command,
            chunks,
        })
    }

    /// Validate a call, then send its command and data through the transport.
    #[tracing::instrument(skip(self, args), fields(args = args.len()))]
    pub fn plot(&mut self, args: Vec<RawArgument>) -> PlotResult<PlotStats> {
        let prepared = self.prepare(args)?;
        prepared.emit(&mut self.transport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/window/plot_window.rs"]
mod tests;
