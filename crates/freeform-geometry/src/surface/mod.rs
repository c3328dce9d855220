//! Surface aliases, normals, and surfaces built from planar profiles.

pub mod constructed;

use freeform_core::Result;
use freeform_math::{Point2, Point3, Vector3};

use crate::bezier::BezierEntity;
use crate::bspline::BSplineEntity;
use crate::entity::Freeform;

pub use constructed::{ExtrusionSurface, RevolutionSurface};

pub type BezierSurface2d = BezierEntity<Point2, 2>;
pub type BezierSurface3d = BezierEntity<Point3, 2>;
pub type BSplineSurface2d = BSplineEntity<Point2, 2>;
pub type BSplineSurface3d = BSplineEntity<Point3, 2>;

/// Unit normal of a surface in space.
pub trait SurfaceNormal: Freeform<2, Point = Point3> {
    /// Normalized `S_u × S_v`; zero where the surface is degenerate.
    fn normal_at(&self, u: f64, v: f64) -> Result<Vector3> {
        let su = self.differentiate([u, v], [1, 0])?;
        let sv = self.differentiate([u, v], [0, 1])?;
        Ok(su.cross(sv).normalize_or_zero())
    }
}

impl<T: Freeform<2, Point = Point3> + ?Sized> SurfaceNormal for T {}
