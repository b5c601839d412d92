/// Convenience result type used across plotargs.
pub type PlotResult<T> = Result<T, PlotError>;

/// Top-level error taxonomy used by plot-call APIs.
///
/// Argument-validation kinds are raised before anything reaches a transport. Only
/// [`PlotError::TransportTimeout`] and [`PlotError::Transport`] can surface after emission
/// started.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// One or more option names are not in the vocabulary.
    #[error("unknown option: {}", names.join(", "))]
    UnknownOption {
        /// Offending names, in argument order.
        names: Vec<String>,
    },

    /// An inline `key, value` run ended on a key.
    #[error("dangling option key: '{key}' has no value")]
    DanglingOptionKey {
        /// The unpaired key.
        key: String,
    },

    /// A recognized option carries a value of the wrong type or range.
    #[error("invalid option value: {name}: {reason}")]
    InvalidOptionValue {
        /// Option name.
        name: String,
        /// What was expected.
        reason: String,
    },

    /// A recognized option appears where its scope does not allow it.
    #[error("misplaced option: {name}: {reason}")]
    MisplacedOption {
        /// Option name.
        name: String,
        /// Why the placement is rejected.
        reason: String,
    },

    /// A chunk supplies a number of arrays that cannot fill its tuple layout.
    #[error("arity mismatch: expected {expected} arrays per curve, got {got}")]
    ArityMismatch {
        /// Resolved tuple size.
        expected: usize,
        /// Arrays actually supplied.
        got: usize,
    },

    /// Curve option snapshots inside one chunk resolve to different tuple sizes.
    #[error("tuple size conflict: {}", fmt_sizes(sizes))]
    TupleSizeConflict {
        /// Resolved size per snapshot.
        sizes: Vec<usize>,
    },

    /// A style (or axis routing) that cannot be expressed in the current plot mode.
    #[error("unsupported style: '{style}' is not available in 3-D plots")]
    UnsupportedStyle {
        /// Offending style keyword.
        style: String,
    },

    /// Array shapes disagree on an axis.
    #[error("broadcast error: conflicting extents on axis {axis} across shapes {shapes:?}")]
    Broadcast {
        /// Axis where the conflict was found (0 is the point axis).
        axis: usize,
        /// Shapes of every array in the chunk.
        shapes: Vec<Vec<usize>>,
    },

    /// More curve option snapshots than broadcast curves.
    #[error("too many options: {options} option sets for {curves} curves")]
    TooManyOptions {
        /// Snapshot count.
        options: usize,
        /// Curve count.
        curves: usize,
    },

    /// A legend list whose length matches neither 1 nor the curve count.
    #[error("legend count mismatch: {legends} legends for {curves} curves")]
    LegendCountMismatch {
        /// Legend list length.
        legends: usize,
        /// Curve count.
        curves: usize,
    },

    /// The call would plot more curves than the configured ceiling.
    #[error("max curves exceeded: {requested} curves requested, limit is {max}")]
    MaxCurvesExceeded {
        /// Total curves across all chunks.
        requested: usize,
        /// Effective ceiling.
        max: usize,
    },

    /// 3-D implicit grid preconditions were not met.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The call contained no array data.
    #[error("no data: a plot call needs at least one array")]
    NoData,

    /// The transport did not accept a write within the bounded wait.
    #[error("transport timeout: no progress after {waited_ms} ms")]
    TransportTimeout {
        /// Milliseconds waited before giving up.
        waited_ms: u64,
    },

    /// The transport failed while writing.
    #[error("transport error: {0}")]
    Transport(String),

    /// Invalid window configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotError {
    /// Build a [`PlotError::InvalidOptionValue`] value.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PlotError::MisplacedOption`] value.
    pub fn misplaced(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MisplacedOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PlotError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PlotError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Return `true` for failures raised by a transport rather than by argument validation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportTimeout { .. } | Self::Transport(_))
    }
}

fn fmt_sizes(sizes: &[usize]) -> String {
    sizes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" vs ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
