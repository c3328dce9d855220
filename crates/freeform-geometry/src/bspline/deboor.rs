//! Direct Cox–de Boor evaluation of B-splines.
//!
//! Independent of patch decomposition; [`super::BSplineEntity::evaluate_de_boor`]
//! uses it to cross-check the Bezier-patch pipeline.

use freeform_core::{FreeformError, Result};
use freeform_math::ControlPoint;

use super::knot::KnotVector;
use crate::grid::ControlGrid;

/// Values at `t` of the `degree + 1` basis functions that can be non-zero on
/// `span`, i.e. `N[span - degree ..= span]`.
///
/// `span` must be non-empty (`knots[span] < knots[span + 1]`).
pub fn basis_functions(degree: usize, knots: &KnotVector, span: usize, t: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    values[0] = 1.0;
    // Raise N[span - p + 1 ..= span] from degree p - 1 to p in place. Each
    // lower-degree function feeds its right share into the new function of
    // the same support start and its left share into the next one.
    for p in 1..=degree {
        let mut carry = 0.0;
        for r in 0..p {
            let first = span + 1 + r - p;
            let (lo, hi) = (knots[first], knots[first + p]);
            let share = values[r] / (hi - lo);
            values[r] = carry + (hi - t) * share;
            carry = (t - lo) * share;
        }
        values[p] = carry;
    }
    values
}

/// Evaluate a tensor-product B-spline at `params`.
///
/// Only the `(degree + 1)^R` control points whose basis functions are
/// non-zero at `params` take part in the contraction.
pub fn evaluate<P: ControlPoint, const R: usize>(
    degrees: [usize; R],
    knots: &[KnotVector; R],
    grid: &ControlGrid<P, R>,
    params: [f64; R],
) -> Result<P> {
    let mut start = [0; R];
    let mut bases: [Vec<f64>; R] = std::array::from_fn(|_| Vec::new());

    for axis in 0..R {
        let (degree, t) = (degrees[axis], params[axis]);
        let span = knots[axis].evaluation_span(t).ok_or_else(|| {
            FreeformError::ParameterOutOfDomain(format!(
                "{} is outside {} on axis {}",
                t,
                knots[axis].domain(),
                axis
            ))
        })?;
        start[axis] = span.checked_sub(degree).ok_or_else(|| {
            FreeformError::InvalidKnotVector(format!(
                "span {} on axis {} has fewer than {} knots before it",
                span, axis, degree
            ))
        })?;
        bases[axis] = basis_functions(degree, &knots[axis], span, t);
    }

    grid.block(start, degrees.map(|d| d + 1))?.contract(&bases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freeform_math::{dvec2, dvec3, DVec2, DVec3};

    #[test]
    fn test_basis_sums_to_one() {
        let uniform = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
        let padded =
            KnotVector::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        for knots in [&uniform, &padded] {
            let end = knots.last();
            for i in 0..=12 {
                let t = end * i as f64 / 12.0;
                let span = knots.evaluation_span(t).unwrap();
                let basis = basis_functions(2, knots, span, t);
                let sum: f64 = basis.iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-12,
                    "Basis at t={} over {:?} sums to {}",
                    t,
                    knots.as_slice(),
                    sum
                );
                assert!(basis.iter().all(|&b| b >= -1e-15));
            }
        }
    }

    #[test]
    fn test_quadratic_basis_at_knot() {
        // At an interior simple knot of a uniform quadratic, two functions share 1/2 each.
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
        let basis = basis_functions(2, &knots, 3, 1.0);
        assert!((basis[0] - 0.5).abs() < 1e-12);
        assert!((basis[1] - 0.5).abs() < 1e-12);
        assert!(basis[2].abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_linear_polyline() {
        let knots = [KnotVector::new(vec![0.0, 0.0, 1.0, 2.0, 2.0]).unwrap()];
        let grid = ControlGrid::from_curve(vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(1.0, 1.0, 0.0),
        ])
        .unwrap();

        let p = evaluate([1], &knots, &grid, [0.5]).unwrap();
        assert!((p - dvec3(0.5, 0.0, 0.0)).length() < 1e-10);
        let p = evaluate([1], &knots, &grid, [1.5]).unwrap();
        assert!((p - dvec3(1.0, 0.5, 0.0)).length() < 1e-10);
        let p = evaluate([1], &knots, &grid, [2.0]).unwrap();
        assert!((p - dvec3(1.0, 1.0, 0.0)).length() < 1e-10);
        assert!(matches!(
            evaluate([1], &knots, &grid, [2.5]),
            Err(FreeformError::ParameterOutOfDomain(_))
        ));
    }

    #[test]
    fn test_evaluate_ignores_padded_start() {
        // The leading control point sits under an empty-support basis function.
        let knots = [KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 1.0]).unwrap()];
        let grid =
            ControlGrid::from_curve(vec![dvec2(9.0, 9.0), DVec2::ZERO, dvec2(2.0, 0.0)]).unwrap();
        let p = evaluate([1], &knots, &grid, [0.0]).unwrap();
        assert!(p.length() < 1e-12);
        let p = evaluate([1], &knots, &grid, [0.25]).unwrap();
        assert!((p - dvec2(0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_evaluate_bilinear_surface() {
        let knots = [
            KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap(),
            KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap(),
        ];
        let grid = ControlGrid::from_surface(vec![
            vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)],
            vec![DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)],
        ])
        .unwrap();

        let p = evaluate([1, 1], &knots, &grid, [0.5, 0.5]).unwrap();
        assert!((p - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-10);
    }
}
