//! Surfaces swept from a planar profile curve.
//!
//! The profile is any rank-1 entity with 2D points, held behind `Arc<dyn _>`
//! so Bezier and B-spline profiles (or other constructed curves) can be mixed.

use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

use freeform_core::{KernelConfig, Result};
use freeform_math::{dvec3, Interval, Point2, Point3};

use crate::entity::{check_order_limit, check_params, Freeform};

pub type Profile = Arc<dyn Freeform<1, Point = Point2>>;

/// `S(u, v) = (x(u), y(u), v)` for `v ∈ [0, 1]`.
#[derive(Clone)]
pub struct ExtrusionSurface {
    profile: Profile,
}

impl ExtrusionSurface {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

impl fmt::Debug for ExtrusionSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtrusionSurface")
            .field("domain", &self.domain())
            .finish()
    }
}

impl Freeform<2> for ExtrusionSurface {
    type Point = Point3;

    fn evaluate(&self, params: [f64; 2]) -> Result<Point3> {
        check_params(&self.domain(), &params)?;
        let p = self.profile.evaluate([params[0]])?;
        Ok(dvec3(p.x, p.y, params[1]))
    }

    fn differentiate(&self, params: [f64; 2], orders: [usize; 2]) -> Result<Point3> {
        check_order_limit(&orders, KernelConfig::MAX_DERIVATIVE_ORDER)?;
        check_params(&self.domain(), &params)?;
        match orders {
            [0, 0] => self.evaluate(params),
            [u, 0] => {
                let d = self.profile.differentiate([params[0]], [u])?;
                Ok(dvec3(d.x, d.y, 0.0))
            }
            [0, 1] => Ok(Point3::Z),
            _ => Ok(Point3::ZERO),
        }
    }

    fn domain(&self) -> [Interval; 2] {
        [self.profile.domain()[0], Interval::UNIT]
    }
}

/// The profile revolved about the Y axis: `S(u, v) = (x cos v, y, x sin v)`
/// for `v ∈ [0, 2π]`.
#[derive(Clone)]
pub struct RevolutionSurface {
    profile: Profile,
}

impl RevolutionSurface {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

impl fmt::Debug for RevolutionSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevolutionSurface")
            .field("domain", &self.domain())
            .finish()
    }
}

impl Freeform<2> for RevolutionSurface {
    type Point = Point3;

    fn evaluate(&self, params: [f64; 2]) -> Result<Point3> {
        self.differentiate(params, [0, 0])
    }

    /// Each `v` derivative advances the angle by a quarter turn; the `y`
    /// coordinate does not depend on `v` and vanishes once `v` is differentiated.
    fn differentiate(&self, params: [f64; 2], orders: [usize; 2]) -> Result<Point3> {
        check_order_limit(&orders, KernelConfig::MAX_DERIVATIVE_ORDER)?;
        check_params(&self.domain(), &params)?;
        let p = self.profile.differentiate([params[0]], [orders[0]])?;
        let (sin, cos) = params[1].sin_cos();
        let (c, s) = match orders[1] % 4 {
            0 => (cos, sin),
            1 => (-sin, cos),
            2 => (-cos, -sin),
            _ => (sin, -cos),
        };
        let y = if orders[1] == 0 { p.y } else { 0.0 };
        Ok(dvec3(p.x * c, y, p.x * s))
    }

    fn domain(&self) -> [Interval; 2] {
        [self.profile.domain()[0], Interval::new(0.0, TAU)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    use crate::curve::BezierCurve2d;
    use crate::kernel::Kernel;
    use crate::surface::SurfaceNormal;
    use freeform_core::FreeformError;
    use freeform_math::{dvec2, DVec3};

    fn quarter_arc_profile() -> Profile {
        let kernel = Kernel::shared(KernelConfig::default());
        Arc::new(
            BezierCurve2d::curve(
                &kernel,
                2,
                vec![dvec2(1.0, 0.0), dvec2(2.0, 1.0), dvec2(1.0, 2.0)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_extrusion() {
        let surface = ExtrusionSurface::new(quarter_arc_profile());
        assert_eq!(surface.domain(), [Interval::UNIT, Interval::UNIT]);
        let p = surface.evaluate([0.5, 0.25]).unwrap();
        assert!((p - dvec3(1.5, 1.0, 0.25)).length() < 1e-12);

        assert_eq!(surface.differentiate([0.5, 0.25], [0, 1]).unwrap(), DVec3::Z);
        assert_eq!(surface.differentiate([0.5, 0.25], [1, 1]).unwrap(), DVec3::ZERO);
        let su = surface.differentiate([0.0, 0.5], [1, 0]).unwrap();
        assert!((su - dvec3(2.0, 2.0, 0.0)).length() < 1e-12);
        assert!(matches!(
            surface.evaluate([0.5, 1.5]),
            Err(FreeformError::ParameterOutOfDomain(_))
        ));
        assert!(matches!(
            surface.differentiate([0.5, 0.5], [0, 4]),
            Err(FreeformError::UnsupportedOrder(_))
        ));
    }

    #[test]
    fn test_revolution_point_and_phase() {
        let surface = RevolutionSurface::new(quarter_arc_profile());
        let p = surface.evaluate([0.0, FRAC_PI_2]).unwrap();
        assert!((p - dvec3(0.0, 0.0, 1.0)).length() < 1e-12);

        // Radius 1 at u = 0: derivatives in v trace the unit circle.
        let v: f64 = 0.3;
        let (s, c) = v.sin_cos();
        let dv = surface.differentiate([0.0, v], [0, 1]).unwrap();
        assert!((dv - dvec3(-s, 0.0, c)).length() < 1e-12);
        let dvv = surface.differentiate([0.0, v], [0, 2]).unwrap();
        assert!((dvv - dvec3(-c, 0.0, -s)).length() < 1e-12);
        let dvvv = surface.differentiate([0.0, v], [0, 3]).unwrap();
        assert!((dvvv - dvec3(s, 0.0, -c)).length() < 1e-12);
    }

    #[test]
    fn test_revolution_matches_finite_differences() {
        let surface = RevolutionSurface::new(quarter_arc_profile());
        let (u, v, h) = (0.4, 1.1, 1e-6);
        let fd_u = (surface.evaluate([u + h, v]).unwrap() - surface.evaluate([u - h, v]).unwrap())
            / (2.0 * h);
        let fd_v = (surface.evaluate([u, v + h]).unwrap() - surface.evaluate([u, v - h]).unwrap())
            / (2.0 * h);
        assert!((surface.differentiate([u, v], [1, 0]).unwrap() - fd_u).length() < 1e-6);
        assert!((surface.differentiate([u, v], [0, 1]).unwrap() - fd_v).length() < 1e-6);

        let n = surface.normal_at(u, v).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.dot(fd_u).abs() < 1e-5);
    }
}
