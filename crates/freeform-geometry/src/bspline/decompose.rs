//! Decomposition of a B-spline into Bezier patches.
//!
//! Once every interior knot has multiplicity at least `degree` (and the first
//! knot at least `degree + 1`), the `degree + 1` control points ending at a
//! span's knot index are the Bezier form of that span. With exactly those
//! multiplicities consecutive blocks share one row of control points.

use std::sync::Arc;

use rayon::prelude::*;

use freeform_core::Result;
use freeform_math::{ControlPoint, Interval};

use super::insert::insert_knot;
use super::knot::KnotVector;
use crate::bezier::BezierEntity;
use crate::grid::{ControlGrid, MultiIndex};
use crate::kernel::Kernel;

/// One Bezier piece of a B-spline and the box of parameters it covers.
#[derive(Debug, Clone)]
pub struct Patch<P, const R: usize> {
    pub subdomain: [Interval; R],
    pub bezier: BezierEntity<P, R>,
}

impl<P: ControlPoint, const R: usize> Patch<P, R> {
    /// Whether this patch answers for `params`.
    ///
    /// Lower bounds are inclusive and upper bounds exclusive, except on axes
    /// where the patch reaches the end of `domain`.
    pub fn owns(&self, params: &[f64; R], domain: &[Interval; R]) -> bool {
        (0..R).all(|axis| {
            let sub = self.subdomain[axis];
            sub.contains_half_open(params[axis], sub.end == domain[axis].end)
        })
    }

    /// Parameters of `params` in the patch's own `[0, 1]^R`.
    pub fn local(&self, params: &[f64; R]) -> [f64; R] {
        let mut local = [0.0; R];
        for axis in 0..R {
            local[axis] = self.subdomain[axis].normalize(params[axis]).clamp(0.0, 1.0);
        }
        local
    }
}

/// Knots to insert, ascending, so every span becomes a Bezier segment.
///
/// The first distinct knot is raised to multiplicity `degree + 1`, interior
/// knots to `degree`; the last knot is left alone.
pub fn insertion_plan(knots: &KnotVector, degree: usize) -> Vec<f64> {
    let runs = knots.multiplicities();
    let last = runs.len() - 1;
    runs.iter()
        .enumerate()
        .filter(|&(i, _)| i != last)
        .flat_map(|(i, &(value, mult))| {
            let target = if i == 0 { degree + 1 } else { degree };
            std::iter::repeat(value).take(target.saturating_sub(mult))
        })
        .collect()
}

/// Each span of a refined knot vector with the index of its first control point.
fn bezier_spans(knots: &KnotVector, degree: usize) -> Vec<(Interval, usize)> {
    knots
        .spans()
        .into_iter()
        .filter_map(|span| {
            let start = knots.span_of(span.beg)?.checked_sub(degree)?;
            Some((span, start))
        })
        .collect()
}

/// Apply the insertion plan of `axis` to `grid`.
pub fn refine_axis<P: ControlPoint, const R: usize>(
    knots: &KnotVector,
    degree: usize,
    grid: &ControlGrid<P, R>,
    axis: usize,
) -> Result<(KnotVector, ControlGrid<P, R>)> {
    let plan = insertion_plan(knots, degree);
    log::debug!(
        "axis {}: degree {}, {} knots, {} insertions",
        axis,
        degree,
        knots.len(),
        plan.len()
    );
    plan.into_iter().try_fold(
        (knots.clone(), grid.clone()),
        |(knots, grid), value| insert_knot(&knots, degree, &grid, axis, value),
    )
}

/// Split a B-spline into Bezier patches tiling its domain.
///
/// Patches come back in row-major order of their per-axis span indices.
pub fn decompose<P: ControlPoint, const R: usize>(
    kernel: &Arc<Kernel>,
    degrees: [usize; R],
    knots: &[KnotVector; R],
    grid: &ControlGrid<P, R>,
) -> Result<Vec<Patch<P, R>>> {
    let mut refined = grid.clone();
    let mut spans: [Vec<(Interval, usize)>; R] = std::array::from_fn(|_| Vec::new());
    for axis in 0..R {
        let (axis_knots, axis_grid) = refine_axis(&knots[axis], degrees[axis], &refined, axis)?;
        refined = axis_grid;
        spans[axis] = bezier_spans(&axis_knots, degrees[axis]);
    }

    let counts: [usize; R] = std::array::from_fn(|axis| spans[axis].len());
    log::debug!(
        "decomposed into {:?} patches over refined grid {:?}",
        counts,
        refined.shape()
    );

    let extent = degrees.map(|d| d + 1);
    let indices: Vec<[usize; R]> = MultiIndex::new(counts).collect();
    indices
        .into_par_iter()
        .map(|index| -> Result<Patch<P, R>> {
            let mut start = [0; R];
            let mut subdomain = [Interval::UNIT; R];
            for axis in 0..R {
                (subdomain[axis], start[axis]) = spans[axis][index[axis]];
            }
            let block = refined.block(start, extent)?;
            Ok(Patch {
                subdomain,
                bezier: BezierEntity::new(kernel, degrees, block)?,
            })
        })
        .collect()
}
