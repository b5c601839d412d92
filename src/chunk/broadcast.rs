use crate::foundation::core::{PlotArray, extent, shapes_of};
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::{LEGEND, OptionState};
use crate::options::vocab::lookup;
use smallvec::SmallVec;

/// Shared extent per broadcast axis (axis 1 first).
pub type CurveDims = SmallVec<[usize; 4]>;

/// Count the curves represented by a chunk's arrays.
///
/// Every axis beyond the point axis may carry at most one distinct non-1 extent across the whole
/// chunk; arrays with extent 1 (or lacking the axis) are reused for every curve along it.
pub(crate) fn count_curves(data: &[PlotArray]) -> PlotResult<(usize, CurveDims)> {
    let broadcast_err = |axis| PlotError::Broadcast {
        axis,
        shapes: shapes_of(data),
    };

    let Some(first) = data.first() else {
        return Ok((0, CurveDims::new()));
    };
    let points = extent(first, 0);
    if data.iter().any(|a| extent(a, 0) != points) {
        return Err(broadcast_err(0));
    }

    let max_ndim = data.iter().map(|a| a.ndim()).max().unwrap_or(1);
    let mut dims = CurveDims::new();
    let mut count = 1usize;
    for axis in 1..max_ndim {
        let mut shared: Option<usize> = None;
        for arr in data {
            let e = extent(arr, axis);
            if e == 0 {
                return Err(broadcast_err(axis));
            }
            if e == 1 {
                continue;
            }
            match shared {
                None => shared = Some(e),
                Some(s) if s != e => return Err(broadcast_err(axis)),
                Some(_) => {}
            }
        }
        let e = shared.unwrap_or(1);
        dims.push(e);
        // Saturates; the caller's curve ceiling rejects it.
        count = count.saturating_mul(e);
    }
    Ok((count, dims))
}

/// Pad or reject the option snapshots so there is exactly one per curve, and spread legend lists.
pub(crate) fn reconcile_options(
    mut options: Vec<OptionState>,
    curves: usize,
) -> PlotResult<Vec<OptionState>> {
    if options.len() > curves {
        return Err(PlotError::TooManyOptions {
            options: options.len(),
            curves,
        });
    }

    // (snapshot index, legend list) for every list-valued legend.
    let mut spreads = Vec::new();
    for (k, opts) in options.iter().enumerate() {
        let Some(list) = opts.legend_list() else {
            continue;
        };
        if list.len() == 1 {
            continue;
        }
        if list.len() != curves || k + list.len() > curves {
            // Counted from curve 0 so an offset list reports how far it reaches.
            return Err(PlotError::LegendCountMismatch {
                legends: k + list.len(),
                curves,
            });
        }
        spreads.push((k, list.to_vec()));
    }

    if let Some(last) = options.last().map(OptionState::without_legend) {
        options.resize(curves, last);
    }

    if spreads.is_empty() {
        return Ok(options);
    }
    let legend_spec =
        lookup(LEGEND).ok_or_else(|| anyhow::anyhow!("legend missing from option vocabulary"))?;
    for (k, list) in spreads {
        for (j, legend) in list.into_iter().enumerate() {
            options[k + j].set(legend_spec, legend);
        }
    }
    Ok(options)
}

#[cfg(test)]
#[path = "../../tests/unit/chunk/broadcast.rs"]
mod tests;
