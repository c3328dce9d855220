//! Bezier entities of any rank.

pub mod basis;
pub mod derivative;
pub mod subdivide;

use std::sync::Arc;

use freeform_core::traits::{BoundingBox, Validate};
use freeform_core::{FreeformError, Result, Tolerance};
use freeform_math::{ControlPoint, Interval};

use crate::entity::{check_params, Freeform, Subdivide};
use crate::grid::ControlGrid;
use crate::kernel::Kernel;

use self::basis::{bernstein, bernstein_tuple};
use self::derivative::DerivativeCache;

/// A single tensor-product Bezier patch over `[0, 1]^R`.
///
/// Extents of the control grid are `degree + 1` on every axis. Derivative
/// grids are built when the entity is constructed, so a value is always ready
/// to evaluate and differentiate; changing control points produces a new
/// entity through [`BezierEntity::with_control_points`].
#[derive(Debug, Clone)]
pub struct BezierEntity<P, const R: usize> {
    kernel: Arc<Kernel>,
    degrees: [usize; R],
    control_points: ControlGrid<P, R>,
    derivatives: DerivativeCache<P, R>,
}

impl<P: ControlPoint, const R: usize> BezierEntity<P, R> {
    pub fn new(
        kernel: &Arc<Kernel>,
        degrees: [usize; R],
        control_points: ControlGrid<P, R>,
    ) -> Result<Self> {
        kernel.check_degrees(&degrees)?;
        for axis in 0..R {
            if control_points.extent(axis) != degrees[axis] + 1 {
                return Err(FreeformError::InvalidControlGrid(format!(
                    "axis {} of degree {} needs {} control points, got {}",
                    axis,
                    degrees[axis],
                    degrees[axis] + 1,
                    control_points.extent(axis)
                )));
            }
        }
        let derivatives =
            DerivativeCache::build(&control_points, degrees, kernel.config().order_policy)?;
        Ok(Self {
            kernel: Arc::clone(kernel),
            degrees,
            control_points,
            derivatives,
        })
    }

    /// Degrees inferred from the grid extents.
    pub fn from_control_grid(kernel: &Arc<Kernel>, control_points: ControlGrid<P, R>) -> Result<Self> {
        let degrees = control_points.shape().map(|n| n - 1);
        Self::new(kernel, degrees, control_points)
    }

    pub fn kernel(&self) -> &Arc<Kernel> {
        &self.kernel
    }

    pub fn degrees(&self) -> [usize; R] {
        self.degrees
    }

    pub fn degree(&self, axis: usize) -> usize {
        self.degrees[axis]
    }

    pub fn control_points(&self) -> &ControlGrid<P, R> {
        &self.control_points
    }

    /// Pre-scaled control grid of the partial derivative with `orders`.
    pub fn derivative_grid(&self, orders: [usize; R]) -> Option<&ControlGrid<P, R>> {
        self.derivatives.get(orders)
    }

    pub fn with_control_points(&self, control_points: ControlGrid<P, R>) -> Result<Self> {
        Self::new(&self.kernel, self.degrees, control_points)
    }

    /// Split along `axis` at `t ∈ (0, 1)` into the pieces over `[0, t]` and `[t, 1]`.
    pub fn split(&self, axis: usize, t: f64) -> Result<(Self, Self)> {
        if axis >= R {
            return Err(FreeformError::ParameterOutOfDomain(format!(
                "axis {} does not exist on a rank-{} entity",
                axis, R
            )));
        }
        if !(t > 0.0 && t < 1.0) {
            return Err(FreeformError::ParameterOutOfDomain(format!(
                "split parameter {} must lie strictly inside (0, 1)",
                t
            )));
        }
        let (lower, upper) = subdivide::split_grid(&self.control_points, axis, t)?;
        Ok((
            self.with_control_points(lower)?,
            self.with_control_points(upper)?,
        ))
    }
}

impl<P: ControlPoint, const R: usize> Freeform<R> for BezierEntity<P, R> {
    type Point = P;

    fn evaluate(&self, params: [f64; R]) -> Result<P> {
        check_params(&self.domain(), &params)?;
        let bases = bernstein_tuple(self.kernel.binomial(), params, self.degrees)?;
        self.control_points.contract(&bases)
    }

    fn differentiate(&self, params: [f64; R], orders: [usize; R]) -> Result<P> {
        if orders.iter().all(|&o| o == 0) {
            return self.evaluate(params);
        }
        check_params(&self.domain(), &params)?;
        let grid = self.derivatives.lookup(orders)?;
        let mut reduced = self.degrees;
        for axis in 0..R {
            reduced[axis] -= orders[axis];
        }
        let bases = bernstein_tuple(self.kernel.binomial(), params, reduced)?;
        grid.contract(&bases)
    }

    fn domain(&self) -> [Interval; R] {
        [Interval::UNIT; R]
    }
}

impl<P: ControlPoint, const R: usize> Subdivide<R> for BezierEntity<P, R> {
    fn subdivide(&self, subdomain: [Interval; R]) -> Result<Self> {
        let mut grid = self.control_points.clone();
        for (axis, window) in subdomain.iter().enumerate() {
            if *window != Interval::UNIT {
                grid = subdivide::window_grid(&grid, axis, *window)?;
            }
        }
        self.with_control_points(grid)
    }
}

impl<P: ControlPoint, const R: usize> BoundingBox for BezierEntity<P, R> {
    type Point = P;

    fn bounding_box(&self) -> (P, P) {
        self.control_points.bounding_box()
    }
}

impl<P: ControlPoint, const R: usize> Validate for BezierEntity<P, R> {
    fn validate(&self, tolerance: Tolerance) -> Result<()> {
        self.control_points.validate(tolerance)?;
        for axis in 0..R {
            if self.control_points.extent(axis) != self.degrees[axis] + 1 {
                return Err(FreeformError::InvalidControlGrid(format!(
                    "axis {} extent {} does not match degree {}",
                    axis,
                    self.control_points.extent(axis),
                    self.degrees[axis]
                )));
            }
        }
        Ok(())
    }
}

impl<P: ControlPoint> BezierEntity<P, 1> {
    pub fn curve(kernel: &Arc<Kernel>, degree: usize, points: Vec<P>) -> Result<Self> {
        Self::new(kernel, [degree], ControlGrid::from_curve(points)?)
    }
}

impl<P: ControlPoint> BezierEntity<P, 2> {
    pub fn surface(kernel: &Arc<Kernel>, degrees: [usize; 2], rows: Vec<Vec<P>>) -> Result<Self> {
        Self::new(kernel, degrees, ControlGrid::from_surface(rows)?)
    }

    /// Curve obtained by fixing parameter `t` on `axis`.
    ///
    /// Fixing `u` (axis 0) yields a curve along `v` and vice versa.
    pub fn iso_curve(&self, axis: usize, t: f64) -> Result<BezierEntity<P, 1>> {
        if axis > 1 || !Interval::UNIT.contains(t) {
            return Err(FreeformError::ParameterOutOfDomain(format!(
                "iso-curve at {} on axis {} outside the surface domain",
                t, axis
            )));
        }
        let basis = bernstein(self.kernel.binomial(), t, self.degrees[axis])?;
        let points = self
            .control_points
            .lanes(axis)
            .iter()
            .map(|lane| {
                lane.iter()
                    .zip(basis.iter())
                    .fold(P::ZERO, |acc, (&p, &b)| acc + p * b)
            })
            .collect();
        BezierEntity::curve(&self.kernel, self.degrees[1 - axis], points)
    }
}

impl<P: ControlPoint> BezierEntity<P, 3> {
    pub fn volume(
        kernel: &Arc<Kernel>,
        degrees: [usize; 3],
        cells: Vec<Vec<Vec<P>>>,
    ) -> Result<Self> {
        Self::new(kernel, degrees, ControlGrid::from_volume(cells)?)
    }
}
