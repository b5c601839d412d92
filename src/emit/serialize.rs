use crate::chunk::builder::Chunk;
use crate::foundation::core::PlotArray;
use crate::foundation::error::PlotResult;
use crate::transport::Transport;
use ndarray::{ArrayView1, Axis, Ix1};
use smallvec::SmallVec;

/// Write every curve of `chunk`, each terminated by the end-of-curve sentinel.
///
/// Returns the number of rows written.
pub(crate) fn write_chunk(chunk: &Chunk, transport: &mut dyn Transport) -> PlotResult<usize> {
    let points = chunk.points();
    let mut rows = 0;
    for curve in 0..chunk.curve_count() {
        let index = curve_index(curve, chunk.curve_dims());
        let columns = chunk
            .data()
            .iter()
            .map(|a| curve_slice(a, &index))
            .collect::<PlotResult<Vec<_>>>()?;
        rows += write_rows(&columns, points, transport)?;
        transport.end_curve()?;
    }
    Ok(rows)
}

/// Emit `points` rows, one value per column in column order.
pub fn write_rows(
    columns: &[ArrayView1<'_, f64>],
    points: usize,
    transport: &mut dyn Transport,
) -> PlotResult<usize> {
    let mut row = Vec::with_capacity(columns.len());
    for p in 0..points {
        row.clear();
        row.extend(columns.iter().map(|c| c[p]));
        transport.send_row(&row)?;
    }
    Ok(points)
}

/// Multi-index of curve `curve` over the broadcast axes; axis 1 varies fastest.
pub(crate) fn curve_index(mut curve: usize, dims: &[usize]) -> SmallVec<[usize; 4]> {
    dims.iter()
        .map(|&d| {
            let i = curve % d;
            curve /= d;
            i
        })
        .collect()
}

/// The point-axis vector of `arr` selected by a broadcast multi-index.
fn curve_slice<'a>(arr: &'a PlotArray, index: &[usize]) -> PlotResult<ArrayView1<'a, f64>> {
    let mut view = arr.view();
    // Peel trailing axes first so earlier axis numbers stay valid.
    for axis in (1..arr.ndim()).rev() {
        let i = if arr.shape()[axis] == 1 {
            0
        } else {
            index[axis - 1]
        };
        view = view.index_axis_move(Axis(axis), i);
    }
    Ok(view
        .into_dimensionality::<Ix1>()
        .map_err(anyhow::Error::from)?)
}

#[cfg(test)]
#[path = "../../tests/unit/emit/serialize.rs"]
mod tests;
