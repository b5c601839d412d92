use crate::args::classify::Segment;
use crate::chunk::broadcast::{CurveDims, count_curves, reconcile_options};
use crate::chunk::domain::complete_domain;
use crate::chunk::tuple::resolve_tuple_size;
use crate::foundation::core::{PlotArray, PlotMode, point_count};
use crate::foundation::error::{PlotError, PlotResult};
use crate::options::state::{LEGEND, OptionFragment, OptionState};
use crate::options::vocab::OptionScope;

/// A run of curve options plus the arrays they style, fully resolved.
///
/// Chunks live for one plot call only. After resolution `options().len() == curve_count()` and
/// every array shares the same point-axis extent.
#[derive(Clone, Debug)]
pub struct Chunk {
    options: Vec<OptionState>,
    data: Vec<PlotArray>,
    tuple_size: usize,
    curve_count: usize,
    curve_dims: CurveDims,
}

impl Chunk {
    /// One option snapshot per curve.
    pub fn options(&self) -> &[OptionState] {
        &self.options
    }

    /// Arrays in column order (domain columns first).
    pub fn data(&self) -> &[PlotArray] {
        &self.data
    }

    /// Numeric channels per point.
    pub fn tuple_size(&self) -> usize {
        self.tuple_size
    }

    /// Number of broadcast curves.
    pub fn curve_count(&self) -> usize {
        self.curve_count
    }

    /// Shared extent per broadcast axis, axis 1 first.
    pub fn curve_dims(&self) -> &[usize] {
        &self.curve_dims
    }

    /// Points per curve.
    pub fn points(&self) -> usize {
        self.data.first().map(point_count).unwrap_or(0)
    }
}

/// Pull the leading plot-scope fragments out of the call.
///
/// Returns the call's plot options and the remaining segments, which carry curve options only.
pub(crate) fn split_plot_options(
    mut segments: Vec<Segment>,
) -> PlotResult<(OptionState, Vec<Segment>)> {
    let mut plot = OptionState::new();

    if let Some(Segment::Options(frags)) = segments.first_mut() {
        let mut curve_frags = Vec::with_capacity(frags.len());
        for frag in std::mem::take(frags) {
            match frag.scopes() {
                (true, true) if frag.is_map => {
                    let name = frag
                        .entries
                        .iter()
                        .find(|(s, _)| s.scope == OptionScope::Plot)
                        .map(|(s, _)| s.name)
                        .unwrap_or_default();
                    return Err(PlotError::misplaced(
                        name,
                        "a mapping fragment may not mix plot and curve options",
                    ));
                }
                (true, _) => {
                    let (plot_part, curve_part) = frag.split_by_scope();
                    plot.merge(&plot_part);
                    if !curve_part.entries.is_empty() {
                        curve_frags.push(curve_part);
                    }
                }
                (false, _) => curve_frags.push(frag),
            }
        }
        if curve_frags.is_empty() {
            segments.remove(0);
        } else {
            segments[0] = Segment::Options(curve_frags);
        }
    }

    for seg in &segments {
        let Segment::Options(frags) = seg else {
            continue;
        };
        for frag in frags {
            if let Some((spec, _)) = frag
                .entries
                .iter()
                .find(|(s, _)| s.scope == OptionScope::Plot)
            {
                return Err(PlotError::misplaced(
                    spec.name,
                    "plot options must precede the first array",
                ));
            }
        }
    }

    Ok((plot, segments))
}

/// Running curve total of one call against its ceiling.
struct CurveBudget {
    used: usize,
    max: usize,
}

impl CurveBudget {
    fn claim(&mut self, curves: usize) -> PlotResult<()> {
        let requested = self.used.saturating_add(curves);
        if requested > self.max {
            return Err(PlotError::MaxCurvesExceeded {
                requested,
                max: self.max,
            });
        }
        self.used = requested;
        Ok(())
    }
}

/// Walk curve-option and data runs, producing resolved chunks.
///
/// `state` is the cumulative curve option state; it is updated in place. The curve total is
/// checked against `max_curves` before any per-curve snapshot is materialized.
pub(crate) fn build_chunks(
    segments: Vec<Segment>,
    state: &mut OptionState,
    mode: PlotMode,
    max_curves: usize,
) -> PlotResult<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut budget = CurveBudget {
        used: 0,
        max: max_curves,
    };
    let mut pending = Vec::<OptionFragment>::new();
    let mut saw_data = false;

    for seg in segments {
        match seg {
            Segment::Options(frags) => pending.extend(frags),
            Segment::Data(run) => {
                saw_data = true;
                let frags = std::mem::take(&mut pending);
                build_run(run, &frags, state, mode, &mut budget, &mut chunks)?;
            }
        }
    }

    if !saw_data {
        return Err(PlotError::NoData);
    }
    state.remove(LEGEND);
    if !pending.is_empty() {
        for frag in &pending {
            state.remove(LEGEND);
            state.merge(frag);
        }
        tracing::warn!(
            fragments = pending.len(),
            "curve options after the last array carried into window state"
        );
    }
    Ok(chunks)
}

fn build_run(
    mut run: Vec<PlotArray>,
    frags: &[OptionFragment],
    state: &mut OptionState,
    mode: PlotMode,
    budget: &mut CurveBudget,
    chunks: &mut Vec<Chunk>,
) -> PlotResult<()> {
    let mut snapshots = Vec::with_capacity(frags.len().max(1));
    if frags.is_empty() {
        state.remove(LEGEND);
        snapshots.push(state.clone());
    }
    for frag in frags {
        state.remove(LEGEND);
        state.merge(frag);
        snapshots.push(state.clone());
    }

    let tuple_size = resolve_tuple_size(&snapshots, mode)?;
    loop {
        let take = run.len().min(tuple_size);
        let surplus = run.split_off(take);
        chunks.push(finish_chunk(snapshots, run, tuple_size, mode, budget)?);
        if surplus.is_empty() {
            return Ok(());
        }
        // Surplus arrays form the next chunk with inherited options.
        run = surplus;
        state.remove(LEGEND);
        snapshots = vec![state.clone()];
    }
}

fn finish_chunk(
    options: Vec<OptionState>,
    data: Vec<PlotArray>,
    tuple_size: usize,
    mode: PlotMode,
    budget: &mut CurveBudget,
) -> PlotResult<Chunk> {
    let data = complete_domain(data, tuple_size, mode)?;
    let (curve_count, curve_dims) = count_curves(&data)?;
    budget.claim(curve_count)?;
    let options = reconcile_options(options, curve_count)?;
    tracing::debug!(tuple_size, curve_count, arrays = data.len(), "resolved chunk");
    Ok(Chunk {
        options,
        data,
        tuple_size,
        curve_count,
        curve_dims,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/chunk/builder.rs"]
mod tests;
