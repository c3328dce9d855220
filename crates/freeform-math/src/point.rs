//! Point arithmetic required by control grids.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{DVec2, DVec3};

/// Ambient point type of a freeform entity (2D or 3D).
///
/// Control points and derivative vectors share this type; the engine only
/// needs affine combinations, scaling and componentwise extrema.
pub trait ControlPoint:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Neg<Output = Self>
    + 'static
{
    const ZERO: Self;

    fn component_min(self, other: Self) -> Self;
    fn component_max(self, other: Self) -> Self;
    fn length(self) -> f64;

    fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl ControlPoint for DVec2 {
    const ZERO: Self = DVec2::ZERO;

    fn component_min(self, other: Self) -> Self {
        self.min(other)
    }

    fn component_max(self, other: Self) -> Self {
        self.max(other)
    }

    fn length(self) -> f64 {
        DVec2::length(self)
    }
}

impl ControlPoint for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    fn component_min(self, other: Self) -> Self {
        self.min(other)
    }

    fn component_max(self, other: Self) -> Self {
        self.max(other)
    }

    fn length(self) -> f64 {
        DVec3::length(self)
    }
}
