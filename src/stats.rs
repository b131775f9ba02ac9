//! Batch summaries of sampler output.

use ndarray::prelude::*;
use ndarray_stats::CorrelationExt;

use crate::core::SampleRun;
use crate::error::{Result, SamplerError};

/// Sample mean and `n - 1` normalised sample covariance of the rows of `samples`.
///
/// These are the quantities the running estimator of a chain tracks, so the
/// two can be cross-checked on a recorded trajectory.
///
/// # Errors
///
/// [`SamplerError::InvalidArgument`] when `samples` has fewer than two rows or
/// no columns.
pub fn sample_moments(samples: &ArrayView2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
    let (n, dim) = samples.dim();
    if n < 2 || dim == 0 {
        return Err(SamplerError::invalid(format!(
            "need at least two samples of positive dimension, got {n}x{dim}"
        )));
    }
    let mean = samples
        .mean_axis(Axis(0))
        .ok_or_else(|| SamplerError::invalid("empty sample"))?;
    let cov = samples
        .t()
        .cov(1.0)
        .map_err(|e| SamplerError::invalid(e.to_string()))?;
    Ok((mean, cov))
}

/// Acceptance rate over several runs, weighting every attempted jump equally.
pub fn pooled_acceptance_rate(runs: &[SampleRun]) -> f64 {
    let (accepted, total) = runs
        .iter()
        .fold((0, 0), |(a, t), r| (a + r.accepted, t + r.total));
    if total == 0 {
        0.0
    } else {
        accepted as f64 / total as f64
    }
}

/// Stacks the samples of several runs into one `(sum of rows) x d` matrix.
pub fn pool_samples(runs: &[SampleRun]) -> Result<Array2<f64>> {
    let views: Vec<ArrayView2<f64>> = runs.iter().map(|r| r.samples.view()).collect();
    if views.is_empty() {
        return Err(SamplerError::invalid("no runs to pool"));
    }
    ndarray::concatenate(Axis(0), &views).map_err(|e| SamplerError::invalid(e.to_string()))
}
