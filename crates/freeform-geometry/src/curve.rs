//! Curve aliases and differential geometry of rank-1 entities.

use freeform_core::Result;
use freeform_math::{Point2, Point3, Vector2, Vector3};

use crate::bezier::BezierEntity;
use crate::bspline::BSplineEntity;
use crate::entity::Freeform;

pub type BezierCurve2d = BezierEntity<Point2, 1>;
pub type BezierCurve3d = BezierEntity<Point3, 1>;
pub type BSplineCurve2d = BSplineEntity<Point2, 1>;
pub type BSplineCurve3d = BSplineEntity<Point3, 1>;

/// Differential geometry of curves in the plane.
///
/// Normal and curvature need the second derivative, so they fail with
/// `UnsupportedOrder` on linear curves.
pub trait PlanarCurve: Freeform<1, Point = Point2> {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.evaluate([t])
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        self.differentiate([t], [1])
    }

    /// Second derivative minus its projection onto the tangent.
    fn normal_at(&self, t: f64) -> Result<Vector2> {
        let first = self.differentiate([t], [1])?;
        let second = self.differentiate([t], [2])?;
        Ok(reject(second, first, first.dot(first), second.dot(first)))
    }

    /// `|x'y'' − x''y'| / |c'|³`.
    fn curvature_at(&self, t: f64) -> Result<f64> {
        let first = self.differentiate([t], [1])?;
        let second = self.differentiate([t], [2])?;
        Ok(first.perp_dot(second).abs() / first.length().powi(3))
    }
}

impl<T: Freeform<1, Point = Point2> + ?Sized> PlanarCurve for T {}

/// Differential geometry of curves in space.
pub trait SpaceCurve: Freeform<1, Point = Point3> {
    fn point_at(&self, t: f64) -> Result<Point3> {
        self.evaluate([t])
    }

    fn tangent_at(&self, t: f64) -> Result<Vector3> {
        self.differentiate([t], [1])
    }

    /// Second derivative minus its projection onto the tangent.
    fn normal_at(&self, t: f64) -> Result<Vector3> {
        let first = self.differentiate([t], [1])?;
        let second = self.differentiate([t], [2])?;
        Ok(reject(second, first, first.dot(first), second.dot(first)))
    }

    /// `|c' × c''| / |c'|³`.
    fn curvature_at(&self, t: f64) -> Result<f64> {
        let first = self.differentiate([t], [1])?;
        let second = self.differentiate([t], [2])?;
        Ok(first.cross(second).length() / first.length().powi(3))
    }
}

impl<T: Freeform<1, Point = Point3> + ?Sized> SpaceCurve for T {}

/// `v − (dot / norm_sq)·onto`, or `v` when `onto` vanishes.
fn reject<V>(v: V, onto: V, norm_sq: f64, dot: f64) -> V
where
    V: std::ops::Sub<Output = V> + std::ops::Mul<f64, Output = V>,
{
    if norm_sq == 0.0 {
        v
    } else {
        v - onto * (dot / norm_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::bspline::KnotVector;
    use crate::kernel::Kernel;
    use freeform_core::{FreeformError, KernelConfig};
    use freeform_math::{dvec2, dvec3, Interval};

    fn kernel() -> Arc<Kernel> {
        Kernel::shared(KernelConfig::default())
    }

    #[test]
    fn test_parabola_curvature() {
        // (t, t²) as a quadratic Bezier: curvature at the vertex is 2.
        let curve = BezierCurve2d::curve(
            &kernel(),
            2,
            vec![dvec2(0.0, 0.0), dvec2(0.5, 0.0), dvec2(1.0, 1.0)],
        )
        .unwrap();
        assert!((curve.curvature_at(0.0).unwrap() - 2.0).abs() < 1e-12);
        let n = curve.normal_at(0.0).unwrap();
        assert!(n.dot(curve.tangent_at(0.0).unwrap()).abs() < 1e-12);
        assert!((n - dvec2(0.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_space_curve_normal_is_orthogonal() {
        let curve = BezierCurve3d::curve(
            &kernel(),
            3,
            vec![
                dvec3(0.0, 0.0, 0.0),
                dvec3(1.0, 1.0, 0.0),
                dvec3(2.0, 0.0, 1.0),
                dvec3(3.0, 1.0, 1.0),
            ],
        )
        .unwrap();
        for i in 0..=4 {
            let t = i as f64 / 4.0;
            let n = curve.normal_at(t).unwrap();
            let d = curve.tangent_at(t).unwrap();
            assert!(n.dot(d).abs() < 1e-10, "Normal not orthogonal at t={}", t);
            assert!(curve.curvature_at(t).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_line_has_no_second_derivative() {
        let knots = KnotVector::open_uniform(1, 2, Interval::UNIT).unwrap();
        let line =
            BSplineCurve2d::curve(&kernel(), 1, knots, vec![dvec2(0.0, 0.0), dvec2(1.0, 1.0)])
                .unwrap();
        assert_eq!(line.point_at(0.5).unwrap(), dvec2(0.5, 0.5));
        assert!(matches!(
            line.curvature_at(0.5),
            Err(FreeformError::UnsupportedOrder(_))
        ));
    }

    #[test]
    fn test_trait_object_profile() {
        let curve: Arc<dyn Freeform<1, Point = Point2>> = Arc::new(
            BezierCurve2d::curve(&kernel(), 1, vec![dvec2(1.0, 0.0), dvec2(1.0, 2.0)]).unwrap(),
        );
        assert_eq!(curve.tangent_at(0.3).unwrap(), dvec2(0.0, 2.0));
    }
}
