//! Shape checks and the Cholesky factorization used by the proposal generator.

use nalgebra as na;
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Result, SamplerError};

/// Returns the dimension of `matrix` if it is square and non-empty.
pub fn check_square(matrix: &ArrayView2<f64>) -> Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(SamplerError::invalid(format!(
            "expected a square matrix, got {rows}x{cols}"
        )));
    }
    if rows == 0 {
        return Err(SamplerError::invalid("matrix has zero dimension"));
    }
    Ok(rows)
}

/// Checks that `x` has exactly `dim` entries.
pub fn check_dim(x: &ArrayView1<f64>, dim: usize) -> Result<()> {
    if x.len() != dim {
        return Err(SamplerError::invalid(format!(
            "expected a vector of length {dim}, got {}",
            x.len()
        )));
    }
    Ok(())
}

/// Checks that `x` and `matrix` describe the same, non-zero dimension.
pub fn check_vector_matrix(x: &ArrayView1<f64>, matrix: &ArrayView2<f64>) -> Result<usize> {
    let dim = check_square(matrix)?;
    if x.len() != dim {
        return Err(SamplerError::invalid(format!(
            "vector of length {} does not match {dim}x{dim} matrix",
            x.len()
        )));
    }
    Ok(dim)
}

/// Lower triangular factor `L` with `matrix = L Lᵀ`.
///
/// Only the lower triangle of `matrix` is read. The matrix must be positive
/// definite; pivots are not compared against the matrix scale.
///
/// # Errors
///
/// [`SamplerError::NumericalDegeneracy`] for non-finite entries or when the
/// factorization fails (singular or indefinite input).
pub fn cholesky(matrix: &ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = check_square(matrix)?;
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(SamplerError::degenerate(
            "covariance contains non-finite entries",
        ));
    }

    let dense = na::DMatrix::from_fn(n, n, |i, j| matrix[(i.max(j), i.min(j))]);
    let chol = na::Cholesky::new(dense).ok_or_else(|| {
        SamplerError::degenerate("covariance is not positive definite")
    })?;
    let l = chol.l();
    Ok(Array2::from_shape_fn((n, n), |(i, j)| l[(i, j)]))
}
