/*!
Zero-mean multivariate Gaussian proposals.

[`sample_gaussian`] draws a batch of proposal increments for a given covariance.
[`CandidateBuffer`] keeps one such batch around so a chain only factorizes its
proposal covariance once per refill instead of once per step.
*/

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::Result;
use crate::linalg::cholesky;

/**
Draws `count` independent vectors from `N(0, covariance)`.

The result has one draw per row. `count` is clamped to at least one.

# Errors

[`SamplerError::InvalidArgument`](crate::error::SamplerError::InvalidArgument)
if `covariance` is not square, and
[`SamplerError::NumericalDegeneracy`](crate::error::SamplerError::NumericalDegeneracy)
if it is not positive definite.

# Examples

```rust
use metrosampler::proposal::sample_gaussian;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

let mut rng = SmallRng::seed_from_u64(42);
let draws = sample_gaussian(&Array2::eye(3).view(), 5, &mut rng).unwrap();
assert_eq!(draws.dim(), (5, 3));
```
*/
pub fn sample_gaussian<R: Rng + ?Sized>(
    covariance: &ArrayView2<f64>,
    count: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let l = cholesky(covariance)?;
    let dim = l.nrows();
    let count = count.max(1);

    let z = Array2::from_shape_simple_fn((count, dim), || rng.sample::<f64, _>(StandardNormal));
    // Rows of z Lᵀ are L z_i.
    Ok(z.dot(&l.t()))
}

/// Pre-drawn proposal increments, consumed front to back.
#[derive(Debug, Clone)]
pub(crate) struct CandidateBuffer {
    draws: Array2<f64>,
    next: usize,
    batch: usize,
}

impl CandidateBuffer {
    pub(crate) fn new(dim: usize, batch: usize) -> Self {
        Self {
            draws: Array2::zeros((0, dim)),
            next: 0,
            batch: batch.max(1),
        }
    }

    /// Drops every remaining draw.
    pub(crate) fn clear(&mut self) {
        self.next = self.draws.nrows();
    }

    /// Replaces the contents with a fresh batch drawn from `covariance`.
    pub(crate) fn refill<R: Rng + ?Sized>(
        &mut self,
        covariance: &ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<()> {
        self.draws = sample_gaussian(covariance, self.batch, rng)?;
        self.next = 0;
        Ok(())
    }

    /// Number of draws not yet handed out.
    pub(crate) fn remaining(&self) -> usize {
        self.draws.nrows() - self.next
    }

    /// Returns `origin` plus the next increment, refilling from `covariance`
    /// first when the buffer is empty.
    pub(crate) fn propose<R: Rng + ?Sized>(
        &mut self,
        origin: &ArrayView1<f64>,
        covariance: &ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>> {
        if self.remaining() == 0 {
            self.refill(covariance, rng)?;
        }
        let step = self.draws.index_axis(Axis(0), self.next);
        self.next += 1;
        Ok(origin + &step)
    }
}
