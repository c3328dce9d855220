//! Bernstein basis evaluation.

use freeform_core::Result;
use freeform_math::BinomialTable;

/// Bernstein basis `B_{i,n}(t) = C(n,i)·(1−t)^(n−i)·t^i` for `i` in `0..=n`.
///
/// Powers of `t` and `1−t` are built as running products; the binomial
/// coefficients come from `table`, so `n` above its ceiling is an
/// `UnsupportedDegree` error.
pub fn bernstein(table: &BinomialTable, t: f64, degree: usize) -> Result<Vec<f64>> {
    let binomials = table.row(degree)?;

    let s = 1.0 - t;
    let mut t_pow = vec![1.0; degree + 1];
    let mut s_pow = vec![1.0; degree + 1];
    for i in 1..=degree {
        t_pow[i] = t_pow[i - 1] * t;
        s_pow[i] = s_pow[i - 1] * s;
    }

    Ok((0..=degree)
        .map(|i| binomials[i] * s_pow[degree - i] * t_pow[i])
        .collect())
}

/// One basis vector per axis.
pub fn bernstein_tuple<const R: usize>(
    table: &BinomialTable,
    params: [f64; R],
    degrees: [usize; R],
) -> Result<[Vec<f64>; R]> {
    let mut bases: [Vec<f64>; R] = std::array::from_fn(|_| Vec::new());
    for axis in 0..R {
        bases[axis] = bernstein(table, params[axis], degrees[axis])?;
    }
    Ok(bases)
}
