//! Online first and second moments of a chain's trajectory.

use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Running mean and sample covariance, updated one state at a time.
///
/// After `n` updates with `x_1, ..., x_n` the estimator holds the sample mean
/// and the `n - 1` normalised sample covariance of those states, without
/// keeping the trajectory around.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningMoments {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    count: u64,
}

impl RunningMoments {
    pub fn new(dim: usize) -> Self {
        Self {
            mean: Array1::zeros(dim),
            covariance: Array2::zeros((dim, dim)),
            count: 0,
        }
    }

    /// Incorporates one state.
    ///
    /// The covariance is advanced with the mean from before this update; the
    /// mean is advanced afterwards. Swapping the two biases the covariance.
    pub fn update(&mut self, x: &ArrayView1<f64>) {
        let n = self.count as f64;
        let diff = x - &self.mean;

        if self.count > 0 {
            let col = diff.view().insert_axis(Axis(1));
            let row = diff.view().insert_axis(Axis(0));
            let outer = col.dot(&row);
            self.covariance *= (n - 1.0) / n;
            self.covariance.scaled_add(1.0 / (n + 1.0), &outer);
        }

        self.mean.scaled_add(1.0 / (n + 1.0), &diff);
        self.count += 1;
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    /// Number of states incorporated so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }
}
