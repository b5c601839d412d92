use crate::foundation::core::{PlotArray, PlotMode, point_count};
use crate::foundation::error::{PlotError, PlotResult};
use ndarray::{Array1, IxDyn};

/// Fill in the leading domain column(s) when a chunk omits them.
///
/// Returns the data unchanged when it already supplies `tuple_size` arrays.
pub(crate) fn complete_domain(
    data: Vec<PlotArray>,
    tuple_size: usize,
    mode: PlotMode,
) -> PlotResult<Vec<PlotArray>> {
    let got = data.len();
    if got == tuple_size {
        return Ok(data);
    }
    if got == 0 || got + mode.domain_size() != tuple_size {
        return Err(PlotError::ArityMismatch {
            expected: tuple_size,
            got,
        });
    }

    match mode {
        PlotMode::TwoD => Ok(prepend_index_domain(data)),
        PlotMode::ThreeD => grid_domain(data),
    }
}

fn prepend_index_domain(data: Vec<PlotArray>) -> Vec<PlotArray> {
    let n = point_count(&data[0]);
    let index = Array1::from_iter((0..n).map(|i| i as f64)).into_dyn();
    let mut out = Vec::with_capacity(data.len() + 1);
    out.push(index);
    out.extend(data);
    out
}

/// Treat axes 0 and 1 as an implicit `W x H` grid, flattened row-major into one point axis.
fn grid_domain(data: Vec<PlotArray>) -> PlotResult<Vec<PlotArray>> {
    let first = &data[0];
    if first.ndim() < 2 {
        return Err(PlotError::InvalidGrid(format!(
            "implicit 3-D domain needs arrays with at least 2 axes, got shape {:?}",
            first.shape()
        )));
    }
    let (w, h) = (first.shape()[0], first.shape()[1]);

    let mut out = Vec::with_capacity(data.len() + 2);
    out.push(Array1::from_iter((0..w * h).map(|k| (k / h) as f64)).into_dyn());
    out.push(Array1::from_iter((0..w * h).map(|k| (k % h) as f64)).into_dyn());

    for arr in data {
        if arr.ndim() < 2 || arr.shape()[0] != w || arr.shape()[1] != h {
            return Err(PlotError::InvalidGrid(format!(
                "every array must share the {w}x{h} grid, got shape {:?}",
                arr.shape()
            )));
        }
        out.push(flatten_leading_axes(&arr)?);
    }
    Ok(out)
}

fn flatten_leading_axes(arr: &PlotArray) -> PlotResult<PlotArray> {
    let shape = arr.shape();
    let mut new_shape = Vec::with_capacity(shape.len() - 1);
    new_shape.push(shape[0] * shape[1]);
    new_shape.extend_from_slice(&shape[2..]);

    // Logical iteration order is row-major regardless of memory layout.
    let values: Vec<f64> = arr.iter().copied().collect();
    PlotArray::from_shape_vec(IxDyn(&new_shape), values)
        .map_err(|e| PlotError::Other(anyhow::Error::new(e)))
}

#[cfg(test)]
#[path = "../../tests/unit/chunk/domain.rs"]
mod tests;
