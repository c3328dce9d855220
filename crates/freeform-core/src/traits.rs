use crate::error::Result;
use crate::tolerance::Tolerance;

/// Validate structural integrity of a freeform entity.
pub trait Validate {
    fn validate(&self, tolerance: Tolerance) -> Result<()>;
}

/// Compute an axis-aligned bounding box.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> (Self::Point, Self::Point);
}
