//! Boehm knot insertion.

use freeform_core::{FreeformError, Result};
use freeform_math::ControlPoint;

use super::knot::KnotVector;
use crate::grid::ControlGrid;

/// Insert `value` once into the knot vector of `axis`.
///
/// Every lane along `axis` gains one control point; the entity described by
/// the refined knots and grid is geometrically identical to the input.
pub fn insert_knot<P: ControlPoint, const R: usize>(
    knots: &KnotVector,
    degree: usize,
    grid: &ControlGrid<P, R>,
    axis: usize,
    value: f64,
) -> Result<(KnotVector, ControlGrid<P, R>)> {
    if axis >= R {
        return Err(FreeformError::InvalidKnot(format!(
            "axis {} does not exist on a rank-{} grid",
            axis, R
        )));
    }
    let span = knots.span_of(value).ok_or_else(|| {
        FreeformError::InvalidKnot(format!(
            "knot {} lies outside [{}, {})",
            value,
            knots.first(),
            knots.last()
        ))
    })?;

    let alphas: Vec<f64> = (0..=grid.extent(axis))
        .map(|i| {
            if i + degree <= span {
                1.0
            } else if i > span {
                0.0
            } else {
                (value - knots[i]) / (knots[i + degree] - knots[i])
            }
        })
        .collect();

    let refined = grid.map_lanes(axis, |lane| {
        alphas
            .iter()
            .enumerate()
            .map(|(i, &alpha)| {
                let mut p = P::ZERO;
                if i < lane.len() {
                    p = p + lane[i] * alpha;
                }
                if i > 0 {
                    p = p + lane[i - 1] * (1.0 - alpha);
                }
                p
            })
            .collect()
    })?;

    log::trace!(
        "inserted knot {} on axis {} after span {}; extent {} -> {}",
        value,
        axis,
        span,
        grid.extent(axis),
        refined.extent(axis)
    );

    Ok((knots.inserted(span, value), refined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bspline::deboor;
    use freeform_math::{dvec2, DVec2};

    fn quadratic() -> (KnotVector, ControlGrid<DVec2, 1>) {
        (
            KnotVector::new(vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]).unwrap(),
            ControlGrid::from_curve(vec![
                dvec2(0.0, 0.0),
                dvec2(1.0, 2.0),
                dvec2(2.0, -1.0),
                dvec2(3.0, 0.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_insert_keeps_shape() {
        let (knots, grid) = quadratic();
        let (refined_knots, refined) = insert_knot(&knots, 2, &grid, 0, 0.25).unwrap();
        assert_eq!(
            refined_knots.as_slice(),
            &[0.0, 0.0, 0.0, 0.25, 0.5, 1.0, 1.0, 1.0]
        );
        assert_eq!(refined.extent(0), 5);
        // End points are untouched.
        assert_eq!(refined.points()[0], grid.points()[0]);
        assert_eq!(refined.points()[4], grid.points()[3]);

        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let before = deboor::evaluate([2], &[knots.clone()], &grid, [t]).unwrap();
            let after = deboor::evaluate([2], &[refined_knots.clone()], &refined, [t]).unwrap();
            assert!(
                (before - after).length() < 1e-12,
                "Insertion moved the curve at t={}: {:?} vs {:?}",
                t,
                before,
                after
            );
        }
    }

    #[test]
    fn test_insert_along_second_axis() {
        let knots = KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let grid = ControlGrid::from_fn([2, 2], |[i, j]| dvec2(i as f64, j as f64)).unwrap();
        let (refined_knots, refined) = insert_knot(&knots, 1, &grid, 1, 0.5).unwrap();
        assert_eq!(refined_knots.as_slice(), &[0.0, 0.0, 0.5, 1.0, 1.0]);
        assert_eq!(refined.shape(), [2, 3]);
        assert_eq!(*refined.get([1, 1]).unwrap(), dvec2(1.0, 0.5));
    }

    #[test]
    fn test_insert_rejects_bad_input() {
        let (knots, grid) = quadratic();
        assert!(matches!(
            insert_knot(&knots, 2, &grid, 0, 1.0),
            Err(FreeformError::InvalidKnot(_))
        ));
        assert!(matches!(
            insert_knot(&knots, 2, &grid, 0, -0.5),
            Err(FreeformError::InvalidKnot(_))
        ));
        assert!(matches!(
            insert_knot(&knots, 2, &grid, 1, 0.5),
            Err(FreeformError::InvalidKnot(_))
        ));
    }
}
