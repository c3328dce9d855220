//! Binomial-coefficient table.

use freeform_core::{FreeformError, Result};

/// Pascal's triangle up to a fixed maximum degree.
///
/// Built once per kernel; every basis evaluation looks its coefficients up
/// here, so `max_degree` is a hard ceiling on usable degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTable {
    rows: Vec<Vec<f64>>,
}

impl BinomialTable {
    pub fn new(max_degree: usize) -> Self {
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(max_degree + 1);
        for n in 0..=max_degree {
            let mut row = vec![1.0; n + 1];
            for k in 1..n {
                row[k] = rows[n - 1][k - 1] + rows[n - 1][k];
            }
            rows.push(row);
        }
        Self { rows }
    }

    pub fn max_degree(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn supports(&self, degree: usize) -> bool {
        degree <= self.max_degree()
    }

    /// Coefficient row `C(n, 0..=n)`.
    pub fn row(&self, n: usize) -> Result<&[f64]> {
        self.rows
            .get(n)
            .map(Vec::as_slice)
            .ok_or(FreeformError::UnsupportedDegree {
                degree: n,
                max: self.max_degree(),
            })
    }
}
