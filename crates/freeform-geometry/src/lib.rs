//! Freeform geometry: Bezier and B-spline curves, surfaces, and volumes.
//!
//! Every entity implements [`Freeform`] for its parametric rank and shares a
//! [`Kernel`] (binomial table plus configuration) through `Arc`.

pub mod bezier;
pub mod bspline;
pub mod curve;
pub mod entity;
pub mod grid;
pub mod kernel;
pub mod surface;
pub mod volume;

pub use bezier::BezierEntity;
pub use bspline::{BSplineEntity, KnotVector, Patch};
pub use curve::{
    BSplineCurve2d, BSplineCurve3d, BezierCurve2d, BezierCurve3d, PlanarCurve, SpaceCurve,
};
pub use entity::{Freeform, Subdivide};
pub use grid::ControlGrid;
pub use kernel::Kernel;
pub use surface::{
    BSplineSurface2d, BSplineSurface3d, BezierSurface2d, BezierSurface3d, ExtrusionSurface,
    RevolutionSurface, SurfaceNormal,
};
pub use volume::{BSplineVolume, BezierVolume};
