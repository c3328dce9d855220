//! Derivative control grids.
//!
//! Differentiating a Bezier entity along one axis yields another Bezier entity
//! of one lower degree on that axis whose control points are scaled forward
//! differences. Differencing along independent axes commutes, so every mixed
//! partial is reached by differencing an already-differenced grid.

use std::collections::HashMap;

use freeform_core::{FreeformError, KernelConfig, OrderPolicy, Result};
use freeform_math::ControlPoint;

use crate::grid::{ControlGrid, MultiIndex};

/// `D[i] = factor·(P[i+1] − P[i])` along `axis`.
pub fn difference<P: ControlPoint, const R: usize>(
    grid: &ControlGrid<P, R>,
    axis: usize,
    factor: f64,
) -> Result<ControlGrid<P, R>> {
    if grid.extent(axis) < 2 {
        return Err(FreeformError::UnsupportedOrder(format!(
            "axis {} has a single control point and cannot be differenced",
            axis
        )));
    }
    grid.map_lanes(axis, |lane| {
        lane.windows(2).map(|w| (w[1] - w[0]) * factor).collect()
    })
}

/// Pre-scaled difference grids for every admissible order tuple.
///
/// The grid stored under `orders` contracts against Bernstein bases of
/// degrees `degrees[a] - orders[a]` to give the partial derivative directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeCache<P, const R: usize> {
    degrees: [usize; R],
    policy: OrderPolicy,
    grids: HashMap<[usize; R], ControlGrid<P, R>>,
}

impl<P: ControlPoint, const R: usize> DerivativeCache<P, R> {
    pub fn build(
        grid: &ControlGrid<P, R>,
        degrees: [usize; R],
        policy: OrderPolicy,
    ) -> Result<Self> {
        let limits = degrees.map(|d| d.min(KernelConfig::MAX_DERIVATIVE_ORDER) + 1);
        let mut grids: HashMap<[usize; R], ControlGrid<P, R>> = HashMap::new();

        // Row-major order visits every predecessor tuple before its successors.
        for orders in MultiIndex::new(limits) {
            if orders.iter().all(|&o| o == 0) || !policy.admits(&orders) {
                continue;
            }
            let axis = (0..R).rev().find(|&a| orders[a] > 0).unwrap_or(0);
            let mut previous = orders;
            previous[axis] -= 1;

            let source = if previous.iter().all(|&o| o == 0) {
                grid
            } else {
                grids.get(&previous).ok_or_else(|| {
                    FreeformError::UnsupportedOrder(format!(
                        "missing derivative grid for orders {:?}",
                        previous
                    ))
                })?
            };
            let factor = (degrees[axis] + 1 - orders[axis]) as f64;
            let derived = difference(source, axis, factor)?;
            grids.insert(orders, derived);
        }

        Ok(Self {
            degrees,
            policy,
            grids,
        })
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn get(&self, orders: [usize; R]) -> Option<&ControlGrid<P, R>> {
        self.grids.get(&orders)
    }

    /// Validate `orders` and return the matching grid.
    ///
    /// Must not be called with all-zero orders; those are plain evaluation.
    pub fn lookup(&self, orders: [usize; R]) -> Result<&ControlGrid<P, R>> {
        crate::entity::check_order_limit(&orders, KernelConfig::MAX_DERIVATIVE_ORDER)?;
        if let Some(axis) = (0..R).find(|&a| orders[a] > self.degrees[a]) {
            return Err(FreeformError::UnsupportedOrder(format!(
                "order {} on axis {} exceeds its degree {}",
                orders[axis], axis, self.degrees[axis]
            )));
        }
        if !self.policy.admits(&orders) {
            return Err(FreeformError::UnsupportedOrder(format!(
                "orders {:?} rejected by the {:?} policy",
                orders, self.policy
            )));
        }
        self.grids.get(&orders).ok_or_else(|| {
            FreeformError::UnsupportedOrder(format!("no derivative grid for orders {:?}", orders))
        })
    }
}
