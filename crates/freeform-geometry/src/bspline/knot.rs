//! Knot vectors.

use serde::{Deserialize, Serialize};

use freeform_core::{FreeformError, Result};
use freeform_math::Interval;

/// A non-decreasing sequence of finite knots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    pub fn new(knots: Vec<f64>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(FreeformError::InvalidKnotVector(format!(
                "need at least two knots, got {}",
                knots.len()
            )));
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(FreeformError::InvalidKnotVector(
                "knots must be finite".into(),
            ));
        }
        if let Some(i) = knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(FreeformError::InvalidKnotVector(format!(
                "knots decrease at index {}: {} > {}",
                i + 1,
                knots[i],
                knots[i + 1]
            )));
        }
        Ok(Self(knots))
    }

    /// Clamped knots with `count - degree - 1` evenly spaced interior knots over `domain`.
    pub fn open_uniform(degree: usize, count: usize, domain: Interval) -> Result<Self> {
        if count <= degree {
            return Err(FreeformError::InvalidKnotVector(format!(
                "degree {} needs at least {} control points, got {}",
                degree,
                degree + 1,
                count
            )));
        }
        let spans = (count - degree) as f64;
        let mut knots = Vec::with_capacity(count + degree + 1);
        knots.extend(std::iter::repeat(domain.beg).take(degree + 1));
        knots.extend((1..count - degree).map(|i| domain.lerp(i as f64 / spans)));
        knots.extend(std::iter::repeat(domain.end).take(degree + 1));
        Self::new(knots)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.0[0]
    }

    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// `[first, last]`, the parameter domain of a clamped B-spline.
    pub fn domain(&self) -> Interval {
        Interval::new(self.first(), self.last())
    }

    /// Index `k` with `knots[k] <= value < knots[k + 1]`.
    ///
    /// `None` when `value` lies outside `[first, last)`.
    pub fn span_of(&self, value: f64) -> Option<usize> {
        if !(value >= self.first() && value < self.last()) {
            return None;
        }
        // Last index whose knot is <= value; the strict upper bound holds by construction.
        let k = self.0.partition_point(|&knot| knot <= value);
        Some(k - 1)
    }

    /// Span that evaluation at `t` reads from.
    ///
    /// Agrees with [`span_of`](Self::span_of) inside the domain; `t == last`
    /// falls into the final non-empty span.
    pub fn evaluation_span(&self, t: f64) -> Option<usize> {
        if t == self.last() && self.domain().is_proper() {
            let below = self.0.partition_point(|&knot| knot < t);
            return Some(below - 1);
        }
        self.span_of(t)
    }

    /// Runs of equal knots as `(value, multiplicity)`, ascending.
    pub fn multiplicities(&self) -> Vec<(f64, usize)> {
        let mut runs: Vec<(f64, usize)> = Vec::new();
        for &knot in &self.0 {
            match runs.last_mut() {
                Some((value, count)) if *value == knot => *count += 1,
                _ => runs.push((knot, 1)),
            }
        }
        runs
    }

    pub fn multiplicity(&self, value: f64) -> usize {
        self.0.iter().filter(|&&knot| knot == value).count()
    }

    pub fn distinct(&self) -> Vec<f64> {
        self.multiplicities().into_iter().map(|(value, _)| value).collect()
    }

    /// Consecutive distinct knots as intervals.
    pub fn spans(&self) -> Vec<Interval> {
        self.distinct()
            .windows(2)
            .map(|w| Interval::new(w[0], w[1]))
            .collect()
    }

    /// Whether both ends repeat at least `degree + 1` times.
    ///
    /// Extra end knots only add basis functions with empty support, as when a
    /// knot is inserted at the start of the domain.
    pub fn is_clamped(&self, degree: usize) -> bool {
        let runs = self.multiplicities();
        match (runs.first(), runs.last()) {
            (Some(&(_, head)), Some(&(_, tail))) => head > degree && tail > degree,
            _ => false,
        }
    }

    /// New vector with `value` inserted after index `span`.
    pub(crate) fn inserted(&self, span: usize, value: f64) -> Self {
        let mut knots = Vec::with_capacity(self.0.len() + 1);
        knots.extend_from_slice(&self.0[..=span]);
        knots.push(value);
        knots.extend_from_slice(&self.0[span + 1..]);
        Self(knots)
    }

    /// Check the vector against a B-spline axis of `degree` with `count` control points.
    pub fn validate_for(&self, degree: usize, count: usize) -> Result<()> {
        if degree == 0 {
            return Err(FreeformError::InvalidKnotVector(
                "B-spline axes need degree 1 or higher".into(),
            ));
        }
        if self.len() != count + degree + 1 {
            return Err(FreeformError::InvalidKnotVector(format!(
                "{} knots for {} control points of degree {}; expected {}",
                self.len(),
                count,
                degree,
                count + degree + 1
            )));
        }
        if !self.domain().is_proper() {
            return Err(FreeformError::InvalidKnotVector(format!(
                "knot vector spans the empty domain {}",
                self.domain()
            )));
        }
        if !self.is_clamped(degree) {
            return Err(FreeformError::InvalidKnotVector(format!(
                "end knots must repeat at least {} times",
                degree + 1
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for KnotVector {
    type Error = FreeformError;

    fn try_from(knots: Vec<f64>) -> Result<Self> {
        Self::new(knots)
    }
}

impl From<KnotVector> for Vec<f64> {
    fn from(knots: KnotVector) -> Self {
        knots.0
    }
}

impl std::ops::Index<usize> for KnotVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_decreasing() {
        assert!(matches!(
            KnotVector::new(vec![0.0, 1.0, 0.5]),
            Err(FreeformError::InvalidKnotVector(_))
        ));
        assert!(KnotVector::new(vec![0.0]).is_err());
        assert!(KnotVector::new(vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_span_of() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
        assert_eq!(knots.span_of(0.0), Some(2));
        assert_eq!(knots.span_of(0.5), Some(2));
        assert_eq!(knots.span_of(1.0), Some(3));
        assert_eq!(knots.span_of(2.5), Some(4));
        assert_eq!(knots.span_of(3.0), None);
        assert_eq!(knots.span_of(-1.0), None);
    }

    #[test]
    fn test_multiplicities() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(knots.multiplicities(), vec![(0.0, 3), (0.5, 2), (1.0, 3)]);
        assert_eq!(knots.multiplicity(0.5), 2);
        assert_eq!(knots.distinct(), vec![0.0, 0.5, 1.0]);
        assert_eq!(
            knots.spans(),
            vec![Interval::new(0.0, 0.5), Interval::new(0.5, 1.0)]
        );
        assert!(knots.is_clamped(2));
        assert!(!knots.is_clamped(3));
    }

    #[test]
    fn test_evaluation_span() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
        assert_eq!(knots.evaluation_span(0.0), Some(2));
        assert_eq!(knots.evaluation_span(1.5), Some(3));
        assert_eq!(knots.evaluation_span(3.0), Some(4));
        assert_eq!(knots.evaluation_span(3.5), None);

        // Extra end knots never select an empty span.
        let padded =
            KnotVector::new(vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(padded.evaluation_span(0.0), Some(3));
        assert_eq!(padded.evaluation_span(1.0), Some(4));
    }

    #[test]
    fn test_open_uniform() {
        let knots = KnotVector::open_uniform(2, 4, Interval::UNIT).unwrap();
        assert_eq!(knots.as_slice(), &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);

        let knots = KnotVector::open_uniform(3, 4, Interval::new(2.0, 4.0)).unwrap();
        assert_eq!(knots.as_slice(), &[2.0, 2.0, 2.0, 2.0, 4.0, 4.0, 4.0, 4.0]);
        assert!(KnotVector::open_uniform(3, 3, Interval::UNIT).is_err());
    }

    #[test]
    fn test_validate_for() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]).unwrap();
        assert!(knots.validate_for(2, 4).is_ok());
        assert!(knots.validate_for(2, 5).is_err());
        assert!(knots.validate_for(0, 6).is_err());

        let unclamped = KnotVector::new(vec![0.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.0]).unwrap();
        assert!(matches!(
            unclamped.validate_for(2, 4),
            Err(FreeformError::InvalidKnotVector(_))
        ));

        let padded_start = KnotVector::new(vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]).unwrap();
        assert!(padded_start.validate_for(2, 5).is_ok());

        let discontinuous =
            KnotVector::new(vec![0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0]).unwrap();
        assert!(discontinuous.validate_for(1, 5).is_ok());

        let point = KnotVector::new(vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!(point.validate_for(1, 2).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let knots: KnotVector = serde_json::from_str("[0.0, 0.0, 1.0, 1.0]").unwrap();
        assert_eq!(knots.domain(), Interval::UNIT);
        assert_eq!(serde_json::to_string(&knots).unwrap(), "[0.0,0.0,1.0,1.0]");
        assert!(serde_json::from_str::<KnotVector>("[1.0, 0.0]").is_err());
    }

    #[test]
    fn test_inserted() {
        let knots = KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let refined = knots.inserted(1, 0.25);
        assert_eq!(refined.as_slice(), &[0.0, 0.0, 0.25, 1.0, 1.0]);
    }
}
