/// Comparison thresholds for checking entity consistency.
///
/// `linear` bounds gaps between points in model space; `parametric` bounds
/// differences between knots, sub-domain bounds and domain measures.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    pub linear: f64,
    pub parametric: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_PARAMETRIC: f64 = 1e-10;

    pub fn new(linear: f64, parametric: f64) -> Self {
        Self { linear, parametric }
    }

    /// Thresholds suited to control points read back from text formats.
    pub fn loose() -> Self {
        Self::new(1e-4, 1e-6)
    }

    /// Whether two points `gap` apart count as the same point.
    pub fn coincident(self, gap: f64) -> bool {
        gap <= self.linear
    }

    /// Whether two parameter-space quantities agree.
    pub fn parametric_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.parametric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINEAR, Self::DEFAULT_PARAMETRIC)
    }
}
