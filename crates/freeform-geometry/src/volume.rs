//! Volume aliases.

use freeform_math::Point3;

use crate::bezier::BezierEntity;
use crate::bspline::BSplineEntity;

pub type BezierVolume = BezierEntity<Point3, 3>;
pub type BSplineVolume = BSplineEntity<Point3, 3>;
