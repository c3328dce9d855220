use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// Closed real interval `[beg, end]` used for parametric domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub beg: f64,
    pub end: f64,
}

impl Interval {
    pub const UNIT: Interval = Interval { beg: 0.0, end: 1.0 };

    pub fn new(beg: f64, end: f64) -> Self {
        Self { beg, end }
    }

    pub fn unit() -> Self {
        Self::UNIT
    }

    pub fn width(&self) -> f64 {
        self.end - self.beg
    }

    pub fn midpoint(&self) -> f64 {
        (self.beg + self.end) * 0.5
    }

    /// Whether `beg < end` and both bounds are finite.
    pub fn is_proper(&self) -> bool {
        self.beg.is_finite() && self.end.is_finite() && self.beg < self.end
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.beg && t <= self.end
    }

    /// Half-open containment `[beg, end)`; with `close_end` the upper bound is included.
    pub fn contains_half_open(&self, t: f64, close_end: bool) -> bool {
        t >= self.beg && (t < self.end || (close_end && t == self.end))
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        other.beg >= self.beg && other.end <= self.end
    }

    /// Map `t` from this interval onto `[0, 1]`.
    pub fn normalize(&self, t: f64) -> f64 {
        (t - self.beg) / self.width()
    }

    /// Map `s` from `[0, 1]` onto this interval.
    pub fn lerp(&self, s: f64) -> f64 {
        self.beg + s * self.width()
    }

    /// Express `other` in the normalized coordinates of this interval.
    pub fn relative(&self, other: &Self) -> Self {
        Self::new(self.normalize(other.beg), self.normalize(other.end))
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            beg: self.beg.min(other.beg),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::UNIT
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.beg, self.end)
    }
}

impl AbsDiffEq for Interval {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.beg.abs_diff_eq(&other.beg, epsilon) && self.end.abs_diff_eq(&other.end, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_contains() {
        let i = Interval::new(0.5, 1.5);
        assert!(i.contains(0.5));
        assert!(i.contains(1.5));
        assert!(!i.contains(1.6));
        assert!(i.contains_half_open(0.5, false));
        assert!(!i.contains_half_open(1.5, false));
        assert!(i.contains_half_open(1.5, true));
    }

    #[test]
    fn test_normalize_and_lerp() {
        let i = Interval::new(2.0, 6.0);
        assert_abs_diff_eq!(i.normalize(3.0), 0.25);
        assert_abs_diff_eq!(i.lerp(0.25), 3.0);
        assert_abs_diff_eq!(i.width(), 4.0);
        assert_abs_diff_eq!(
            i.relative(&Interval::new(3.0, 5.0)),
            Interval::new(0.25, 0.75),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_merge_and_nesting() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(0.5, 2.0);
        let m = a.merge(&b);
        assert_eq!(m, Interval::new(0.0, 2.0));
        assert!(m.contains_interval(&a));
        assert!(!a.contains_interval(&b));
        assert!(!Interval::new(1.0, 1.0).is_proper());
    }
}
