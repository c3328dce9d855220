//! Capability interface shared by every freeform entity.

use rayon::prelude::*;

use freeform_core::{FreeformError, Result};
use freeform_math::{ControlPoint, Interval};

/// A parametric entity of rank `R` (1 = curve, 2 = surface, 3 = volume).
pub trait Freeform<const R: usize>: Send + Sync {
    type Point: ControlPoint;

    /// Point at the given parameters.
    fn evaluate(&self, params: [f64; R]) -> Result<Self::Point>;

    /// Partial derivative of per-axis `orders` at the given parameters.
    ///
    /// All-zero orders are plain evaluation.
    fn differentiate(&self, params: [f64; R], orders: [usize; R]) -> Result<Self::Point>;

    /// Parameter domain, one interval per axis.
    fn domain(&self) -> [Interval; R];

    /// Cheap containment check callers can run before evaluating.
    fn contains(&self, params: [f64; R]) -> bool {
        self.domain()
            .iter()
            .zip(params.iter())
            .all(|(interval, &t)| interval.contains(t))
    }

    /// Evaluate many parameter tuples in parallel; fails on the first bad tuple.
    fn evaluate_many(&self, params: &[[f64; R]]) -> Result<Vec<Self::Point>> {
        params.par_iter().map(|&p| self.evaluate(p)).collect()
    }
}

/// Entities that can be restricted to a sub-domain of their own domain.
pub trait Subdivide<const R: usize>: Freeform<R> + Sized {
    fn subdivide(&self, subdomain: [Interval; R]) -> Result<Self>;
}

/// Fail with `ParameterOutOfDomain` unless every parameter lies in `domain`.
pub(crate) fn check_params<const R: usize>(
    domain: &[Interval; R],
    params: &[f64; R],
) -> Result<()> {
    for axis in 0..R {
        if !domain[axis].contains(params[axis]) {
            return Err(FreeformError::ParameterOutOfDomain(format!(
                "parameter {} on axis {} outside {}",
                params[axis], axis, domain[axis]
            )));
        }
    }
    Ok(())
}

/// Reject per-axis orders above the supported maximum.
pub(crate) fn check_order_limit<const R: usize>(orders: &[usize; R], max: usize) -> Result<()> {
    match orders.iter().position(|&o| o > max) {
        Some(axis) => Err(FreeformError::UnsupportedOrder(format!(
            "order {} on axis {} exceeds the supported maximum {}",
            orders[axis], axis, max
        ))),
        None => Ok(()),
    }
}
