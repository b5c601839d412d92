use ndarray::ArrayD;

/// N-dimensional numeric array as supplied by callers.
///
/// Axis 0 is the point axis; every further axis is a broadcast axis.
pub type PlotArray = ArrayD<f64>;

/// Dimensionality of a plot call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PlotMode {
    /// Planar plot (`plot`).
    #[default]
    TwoD,
    /// Surface/space plot (`splot`).
    ThreeD,
}

impl PlotMode {
    /// Build a mode from a `3d` flag.
    pub fn from_three_d(three_d: bool) -> Self {
        if three_d { Self::ThreeD } else { Self::TwoD }
    }

    /// Return `true` for [`PlotMode::ThreeD`].
    pub fn is_3d(self) -> bool {
        matches!(self, Self::ThreeD)
    }

    /// Geometric minimum of numeric channels per point.
    pub fn base_tuple_size(self) -> usize {
        match self {
            Self::TwoD => 2,
            Self::ThreeD => 3,
        }
    }

    /// Number of leading domain columns that may be synthesized.
    pub fn domain_size(self) -> usize {
        match self {
            Self::TwoD => 1,
            Self::ThreeD => 2,
        }
    }

    /// Plot verb understood by the engine.
    pub fn verb(self) -> &'static str {
        match self {
            Self::TwoD => "plot",
            Self::ThreeD => "splot",
        }
    }
}

/// Extent of `arr` along `axis`; axes beyond `ndim` count as extent 1.
pub(crate) fn extent(arr: &PlotArray, axis: usize) -> usize {
    arr.shape().get(axis).copied().unwrap_or(1)
}

/// Number of points in `arr` (extent of the point axis).
pub(crate) fn point_count(arr: &PlotArray) -> usize {
    extent(arr, 0)
}

pub(crate) fn shapes_of(data: &[PlotArray]) -> Vec<Vec<usize>> {
    data.iter().map(|a| a.shape().to_vec()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
