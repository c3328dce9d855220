pub mod binomial;
pub mod interval;
pub mod point;

pub use glam::{dvec2, dvec3, DVec2, DVec3};
pub use binomial::BinomialTable;
pub use interval::Interval;
pub use point::ControlPoint;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
