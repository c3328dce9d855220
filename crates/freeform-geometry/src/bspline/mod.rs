//! B-spline entities of any rank.
//!
//! A B-spline is decomposed into Bezier patches when it is constructed.
//! Evaluation finds the patch owning the parameters, maps them into the
//! patch's `[0, 1]^R` and rescales derivatives by the chain rule.

pub mod decompose;
pub mod deboor;
pub mod insert;
pub mod knot;

use std::sync::Arc;

use freeform_core::traits::{BoundingBox, Validate};
use freeform_core::{FreeformError, Result, Tolerance};
use freeform_math::{ControlPoint, Interval};

use crate::entity::{check_params, Freeform};
use crate::grid::ControlGrid;
use crate::kernel::Kernel;

pub use self::decompose::Patch;
pub use self::knot::KnotVector;

/// A clamped tensor-product B-spline with one knot vector per axis.
#[derive(Debug, Clone)]
pub struct BSplineEntity<P, const R: usize> {
    kernel: Arc<Kernel>,
    degrees: [usize; R],
    knots: [KnotVector; R],
    control_points: ControlGrid<P, R>,
    patches: Vec<Patch<P, R>>,
}

impl<P: ControlPoint, const R: usize> BSplineEntity<P, R> {
    pub fn new(
        kernel: &Arc<Kernel>,
        degrees: [usize; R],
        knots: [KnotVector; R],
        control_points: ControlGrid<P, R>,
    ) -> Result<Self> {
        kernel.check_degrees(&degrees)?;
        for axis in 0..R {
            knots[axis].validate_for(degrees[axis], control_points.extent(axis))?;
        }
        let patches = decompose::decompose(kernel, degrees, &knots, &control_points)?;
        Ok(Self {
            kernel: Arc::clone(kernel),
            degrees,
            knots,
            control_points,
            patches,
        })
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

    pub fn knots(&self) -> &[KnotVector; R] {
        &self.knots
    }

    pub fn control_points(&self) -> &ControlGrid<P, R> {
        &self.control_points
    }

    pub fn patches(&self) -> &[Patch<P, R>] {
        &self.patches
    }

    /// The patch responsible for `params`.
    pub fn patch_at(&self, params: &[f64; R]) -> Result<&Patch<P, R>> {
        let domain = self.domain();
        self.patches
            .iter()
            .find(|patch| patch.owns(params, &domain))
            .ok_or_else(|| {
                FreeformError::ParameterOutOfDomain(format!(
                    "no patch contains {:?}; domain is {:?}",
                    params, domain
                ))
            })
    }

    /// Same entity with `value` inserted once into the knots of `axis`.
    pub fn insert_knot(&self, axis: usize, value: f64) -> Result<Self> {
        if axis >= R {
            return Err(FreeformError::InvalidKnot(format!(
                "axis {} does not exist on a rank-{} entity",
                axis, R
            )));
        }
        let (knots, grid) = insert::insert_knot(
            &self.knots[axis],
            self.degrees[axis],
            &self.control_points,
            axis,
            value,
        )?;
        let mut all = self.knots.clone();
        all[axis] = knots;
        Self::new(&self.kernel, self.degrees, all, grid)
    }

    pub fn with_control_points(&self, control_points: ControlGrid<P, R>) -> Result<Self> {
        Self::new(&self.kernel, self.degrees, self.knots.clone(), control_points)
    }

    pub fn with_knots(&self, knots: [KnotVector; R]) -> Result<Self> {
        Self::new(&self.kernel, self.degrees, knots, self.control_points.clone())
    }

    /// Evaluate directly from knots and control points, bypassing the patches.
    pub fn evaluate_de_boor(&self, params: [f64; R]) -> Result<P> {
        check_params(&self.domain(), &params)?;
        deboor::evaluate(self.degrees, &self.knots, &self.control_points, params)
    }
}

impl<P: ControlPoint, const R: usize> Freeform<R> for BSplineEntity<P, R> {
    type Point = P;

    fn evaluate(&self, params: [f64; R]) -> Result<P> {
        let patch = self.patch_at(&params)?;
        patch.bezier.evaluate(patch.local(&params))
    }

    fn differentiate(&self, params: [f64; R], orders: [usize; R]) -> Result<P> {
        let patch = self.patch_at(&params)?;
        let local = patch.bezier.differentiate(patch.local(&params), orders)?;
        let scale: f64 = (0..R)
            .map(|axis| patch.subdomain[axis].width().powi(orders[axis] as i32))
            .product();
        Ok(local / scale)
    }

    fn domain(&self) -> [Interval; R] {
        std::array::from_fn(|axis| self.knots[axis].domain())
    }
}

impl<P: ControlPoint, const R: usize> BoundingBox for BSplineEntity<P, R> {
    type Point = P;

    fn bounding_box(&self) -> (P, P) {
        self.control_points.bounding_box()
    }
}

impl<P: ControlPoint, const R: usize> Validate for BSplineEntity<P, R> {
    /// Checks knots against the grid and that the patches tile the domain.
    /// Neighbouring patches must meet within `tolerance.linear` unless the
    /// knot between them repeats more than `degree` times.
    fn validate(&self, tolerance: Tolerance) -> Result<()> {
        self.control_points.validate(tolerance)?;
        for axis in 0..R {
            self.knots[axis].validate_for(self.degrees[axis], self.control_points.extent(axis))?;
        }

        let domain = self.domain();
        let expected: usize = self.knots.iter().map(|k| k.spans().len()).product();
        if self.patches.len() != expected {
            return Err(FreeformError::InvalidKnotVector(format!(
                "{} patches for {} knot spans",
                self.patches.len(),
                expected
            )));
        }
        let mut covered = 0.0;
        for patch in &self.patches {
            let inside = (0..R).all(|axis| {
                patch.subdomain[axis].is_proper()
                    && domain[axis].contains_interval(&patch.subdomain[axis])
            });
            if !inside {
                return Err(FreeformError::InvalidKnotVector(format!(
                    "patch {:?} leaves the domain {:?}",
                    patch.subdomain, domain
                )));
            }
            covered += patch.subdomain.iter().map(Interval::width).product::<f64>();
        }
        let total: f64 = domain.iter().map(Interval::width).product();
        if !tolerance.parametric_eq(covered, total) {
            return Err(FreeformError::InvalidKnotVector(format!(
                "patches cover {} of a domain measuring {}",
                covered, total
            )));
        }

        for a in &self.patches {
            for b in &self.patches {
                for axis in 0..R {
                    let join = a.subdomain[axis].end;
                    let adjacent = join == b.subdomain[axis].beg
                        && self.knots[axis].multiplicity(join) <= self.degrees[axis]
                        && (0..R)
                            .filter(|&other| other != axis)
                            .all(|other| a.subdomain[other] == b.subdomain[other]);
                    if adjacent {
                        check_shared_face(a, b, axis, tolerance)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// The last control layer of `a` along `axis` must match the first of `b`.
fn check_shared_face<P: ControlPoint, const R: usize>(
    a: &Patch<P, R>,
    b: &Patch<P, R>,
    axis: usize,
    tolerance: Tolerance,
) -> Result<()> {
    let upper = a.bezier.control_points().lanes(axis);
    let lower = b.bezier.control_points().lanes(axis);
    for (la, lb) in upper.iter().zip(lower.iter()) {
        let (pa, pb) = (la[la.len() - 1], lb[0]);
        let gap = pa.distance(pb);
        if !tolerance.coincident(gap) {
            return Err(FreeformError::InvalidControlGrid(format!(
                "patches {:?} and {:?} separate by {} along axis {}",
                a.subdomain, b.subdomain, gap, axis
            )));
        }
    }
    Ok(())
}

impl<P: ControlPoint> BSplineEntity<P, 1> {
    pub fn curve(
        kernel: &Arc<Kernel>,
        degree: usize,
        knots: KnotVector,
        points: Vec<P>,
    ) -> Result<Self> {
        Self::new(kernel, [degree], [knots], ControlGrid::from_curve(points)?)
    }
}

impl<P: ControlPoint> BSplineEntity<P, 2> {
    pub fn surface(
        kernel: &Arc<Kernel>,
        degrees: [usize; 2],
        knots: [KnotVector; 2],
        rows: Vec<Vec<P>>,
    ) -> Result<Self> {
        Self::new(kernel, degrees, knots, ControlGrid::from_surface(rows)?)
    }
}

impl<P: ControlPoint> BSplineEntity<P, 3> {
    pub fn volume(
        kernel: &Arc<Kernel>,
        degrees: [usize; 3],
        knots: [KnotVector; 3],
        cells: Vec<Vec<Vec<P>>>,
    ) -> Result<Self> {
        Self::new(kernel, degrees, knots, ControlGrid::from_volume(cells)?)
    }
}
