//! Rank-generic control-point grids and tensor-product contraction.
//!
//! A [`ControlGrid`] stores its points row-major: the last axis varies
//! fastest. Every per-axis algorithm in the kernel (differencing, De Casteljau
//! splitting, Boehm insertion) is expressed through [`ControlGrid::lanes`] and
//! [`ControlGrid::from_lanes`], which visit the one-dimensional fibers running
//! along a chosen axis while the other axes are held fixed.

use freeform_core::traits::{BoundingBox, Validate};
use freeform_core::{FreeformError, Result, Tolerance};
use freeform_math::ControlPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct ControlGrid<P, const R: usize> {
    shape: [usize; R],
    points: Vec<P>,
}

impl<P: ControlPoint, const R: usize> ControlGrid<P, R> {
    pub fn new(shape: [usize; R], points: Vec<P>) -> Result<Self> {
        if shape.iter().any(|&n| n == 0) {
            return Err(FreeformError::InvalidControlGrid(format!(
                "every axis needs at least one control point, got shape {:?}",
                shape
            )));
        }
        let expected: usize = shape.iter().product();
        if points.len() != expected {
            return Err(FreeformError::InvalidControlGrid(format!(
                "shape {:?} needs {} points, got {}",
                shape,
                expected,
                points.len()
            )));
        }
        Ok(Self { shape, points })
    }

    /// Build a grid by evaluating `f` at every multi-index.
    pub fn from_fn(shape: [usize; R], mut f: impl FnMut([usize; R]) -> P) -> Result<Self> {
        let points = MultiIndex::new(shape).map(&mut f).collect();
        Self::new(shape, points)
    }

    pub fn shape(&self) -> [usize; R] {
        self.shape
    }

    pub fn extent(&self, axis: usize) -> usize {
        self.shape[axis]
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn strides(&self) -> [usize; R] {
        strides_of(self.shape)
    }

    fn offset(&self, index: [usize; R]) -> usize {
        let strides = self.strides();
        index
            .iter()
            .zip(strides.iter())
            .map(|(i, s)| i * s)
            .sum()
    }

    pub fn get(&self, index: [usize; R]) -> Option<&P> {
        if index.iter().zip(self.shape.iter()).any(|(i, n)| i >= n) {
            return None;
        }
        self.points.get(self.offset(index))
    }

    pub fn map_points(&self, f: impl Fn(P) -> P) -> Self {
        Self {
            shape: self.shape,
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Collect every lane running along `axis`.
    ///
    /// Lanes are ordered by the row-major order of the remaining axes, which is
    /// the order [`ControlGrid::from_lanes`] expects.
    pub fn lanes(&self, axis: usize) -> Vec<Vec<P>> {
        let stride = self.strides()[axis];
        let len = self.shape[axis];
        let mut base_shape = self.shape;
        base_shape[axis] = 1;

        MultiIndex::new(base_shape)
            .map(|base| {
                let start = self.offset(base);
                (0..len).map(|k| self.points[start + k * stride]).collect()
            })
            .collect()
    }

    /// Reassemble a grid from lanes produced by [`ControlGrid::lanes`].
    ///
    /// `shape` gives the extents of the other axes; the extent along `axis` is
    /// taken from the lanes, which must all have the same length.
    pub fn from_lanes(shape: [usize; R], axis: usize, lanes: Vec<Vec<P>>) -> Result<Self> {
        let len = lanes.first().map(Vec::len).unwrap_or(0);
        if lanes.iter().any(|lane| lane.len() != len) {
            return Err(FreeformError::InvalidControlGrid(
                "lanes along one axis must share a length".into(),
            ));
        }
        let mut new_shape = shape;
        new_shape[axis] = len;
        let mut base_shape = shape;
        base_shape[axis] = 1;
        let lane_count: usize = base_shape.iter().product();
        if lanes.len() != lane_count {
            return Err(FreeformError::InvalidControlGrid(format!(
                "expected {} lanes along axis {}, got {}",
                lane_count,
                axis,
                lanes.len()
            )));
        }

        let strides = strides_of(new_shape);
        let mut points = vec![P::ZERO; new_shape.iter().product()];
        for (base, lane) in MultiIndex::new(base_shape).zip(lanes) {
            let start: usize = base.iter().zip(strides.iter()).map(|(i, s)| i * s).sum();
            for (k, p) in lane.into_iter().enumerate() {
                points[start + k * strides[axis]] = p;
            }
        }
        Self::new(new_shape, points)
    }

    /// Transform every lane along `axis` with `f`.
    pub fn map_lanes(&self, axis: usize, f: impl Fn(&[P]) -> Vec<P>) -> Result<Self> {
        let lanes = self.lanes(axis).iter().map(|lane| f(lane)).collect();
        Self::from_lanes(self.shape, axis, lanes)
    }

    /// Copy the sub-grid starting at `start` with the given `extent`.
    pub fn block(&self, start: [usize; R], extent: [usize; R]) -> Result<Self> {
        for axis in 0..R {
            if start[axis] + extent[axis] > self.shape[axis] {
                return Err(FreeformError::InvalidControlGrid(format!(
                    "block {:?}+{:?} exceeds grid shape {:?}",
                    start, extent, self.shape
                )));
            }
        }
        Self::from_fn(extent, |local| {
            let mut index = local;
            for axis in 0..R {
                index[axis] += start[axis];
            }
            self.points[self.offset(index)]
        })
    }

    /// Tensor-product contraction `Σ P[i]·Π basis[a][i_a]`.
    pub fn contract(&self, bases: &[Vec<f64>; R]) -> Result<P> {
        for axis in 0..R {
            if bases[axis].len() != self.shape[axis] {
                return Err(FreeformError::InvalidControlGrid(format!(
                    "basis of length {} cannot contract axis {} of extent {}",
                    bases[axis].len(),
                    axis,
                    self.shape[axis]
                )));
            }
        }

        let mut sum = P::ZERO;
        for (index, &p) in MultiIndex::new(self.shape).zip(self.points.iter()) {
            let weight: f64 = (0..R).map(|axis| bases[axis][index[axis]]).product();
            if weight != 0.0 {
                sum = sum + p * weight;
            }
        }
        Ok(sum)
    }
}

impl<P: ControlPoint> ControlGrid<P, 1> {
    pub fn from_curve(points: Vec<P>) -> Result<Self> {
        Self::new([points.len()], points)
    }
}

impl<P: ControlPoint> ControlGrid<P, 2> {
    /// `rows[i][j]` is the point at u-index `i` and v-index `j`.
    pub fn from_surface(rows: Vec<Vec<P>>) -> Result<Self> {
        let nu = rows.len();
        let nv = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != nv) {
            return Err(FreeformError::InvalidControlGrid(
                "surface control net is ragged".into(),
            ));
        }
        Self::new([nu, nv], rows.into_iter().flatten().collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<P>> {
        self.points
            .chunks(self.shape[1])
            .map(<[P]>::to_vec)
            .collect()
    }
}

impl<P: ControlPoint> ControlGrid<P, 3> {
    /// `cells[i][j][k]` is the point at u-index `i`, v-index `j`, w-index `k`.
    pub fn from_volume(cells: Vec<Vec<Vec<P>>>) -> Result<Self> {
        let nu = cells.len();
        let nv = cells.first().map(Vec::len).unwrap_or(0);
        let nw = cells
            .first()
            .and_then(|slab| slab.first())
            .map(Vec::len)
            .unwrap_or(0);
        let ragged = cells
            .iter()
            .any(|slab| slab.len() != nv || slab.iter().any(|row| row.len() != nw));
        if ragged {
            return Err(FreeformError::InvalidControlGrid(
                "volume control lattice is ragged".into(),
            ));
        }
        Self::new([nu, nv, nw], cells.into_iter().flatten().flatten().collect())
    }
}

impl<P: ControlPoint, const R: usize> BoundingBox for ControlGrid<P, R> {
    type Point = P;

    fn bounding_box(&self) -> (P, P) {
        let first = self.points[0];
        self.points[1..]
            .iter()
            .fold((first, first), |(lo, hi), &p| {
                (lo.component_min(p), hi.component_max(p))
            })
    }
}

impl<P: ControlPoint, const R: usize> Validate for ControlGrid<P, R> {
    fn validate(&self, _tolerance: Tolerance) -> Result<()> {
        let expected: usize = self.shape.iter().product();
        if expected == 0 || expected != self.points.len() {
            return Err(FreeformError::InvalidControlGrid(format!(
                "shape {:?} does not match {} stored points",
                self.shape,
                self.points.len()
            )));
        }
        Ok(())
    }
}

fn strides_of<const R: usize>(shape: [usize; R]) -> [usize; R] {
    let mut strides = [1; R];
    for axis in (0..R.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

/// Row-major iterator over all multi-indices of a shape.
#[derive(Debug, Clone)]
pub struct MultiIndex<const R: usize> {
    shape: [usize; R],
    next: Option<[usize; R]>,
}

impl<const R: usize> MultiIndex<R> {
    pub fn new(shape: [usize; R]) -> Self {
        let next = if shape.iter().any(|&n| n == 0) {
            None
        } else {
            Some([0; R])
        };
        Self { shape, next }
    }
}

impl<const R: usize> Iterator for MultiIndex<R> {
    type Item = [usize; R];

    fn next(&mut self) -> Option<[usize; R]> {
        let current = self.next?;
        let mut following = current;
        let mut axis = R;
        self.next = loop {
            if axis == 0 {
                break None;
            }
            axis -= 1;
            following[axis] += 1;
            if following[axis] < self.shape[axis] {
                break Some(following);
            }
            following[axis] = 0;
        };
        Some(current)
    }
}
