//! De Casteljau subdivision of control grids.

use freeform_core::{FreeformError, Result};
use freeform_math::{ControlPoint, Interval};

use crate::grid::ControlGrid;

/// Split one Bezier control polygon at `t`.
///
/// Returns the control points of the pieces over `[0, t]` and `[t, 1]`, each
/// reparameterized to `[0, 1]`.
pub fn split_lane<P: ControlPoint>(points: &[P], t: f64) -> (Vec<P>, Vec<P>) {
    let size = points.len();
    let mut lower = Vec::with_capacity(size);
    let mut upper = vec![P::ZERO; size];
    let mut work = points.to_vec();

    for level in 0..size {
        lower.push(work[0]);
        upper[size - 1 - level] = work[work.len() - 1];
        work = work
            .windows(2)
            .map(|w| w[0] * (1.0 - t) + w[1] * t)
            .collect();
    }

    (lower, upper)
}

/// Split every lane along `axis` at `t`.
pub fn split_grid<P: ControlPoint, const R: usize>(
    grid: &ControlGrid<P, R>,
    axis: usize,
    t: f64,
) -> Result<(ControlGrid<P, R>, ControlGrid<P, R>)> {
    let (lower, upper): (Vec<_>, Vec<_>) = grid
        .lanes(axis)
        .iter()
        .map(|lane| split_lane(lane, t))
        .unzip();
    Ok((
        ControlGrid::from_lanes(grid.shape(), axis, lower)?,
        ControlGrid::from_lanes(grid.shape(), axis, upper)?,
    ))
}

/// Restrict `axis` to `window ⊆ [0, 1]`, reparameterized back to `[0, 1]`.
///
/// Splits at `window.beg` keeping the upper part, then splits that part at
/// `(end − beg)/(1 − beg)` keeping the lower part.
pub fn window_grid<P: ControlPoint, const R: usize>(
    grid: &ControlGrid<P, R>,
    axis: usize,
    window: Interval,
) -> Result<ControlGrid<P, R>> {
    if !window.is_proper() || !Interval::UNIT.contains_interval(&window) {
        return Err(FreeformError::ParameterOutOfDomain(format!(
            "sub-domain {} on axis {} is not a proper window of [0, 1]",
            window, axis
        )));
    }

    let (_, upper) = split_grid(grid, axis, window.beg)?;
    let t = window.width() / (1.0 - window.beg);
    let (lower, _) = split_grid(&upper, axis, t)?;
    Ok(lower)
}
