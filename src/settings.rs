//! Configuration of an adaptive chain.

use crate::error::{Result, SamplerError};

/// Parameters of the Adaptive Metropolis algorithm.
///
/// All fields are fixed once a chain is built. The setters consume and return
/// `self` so settings can be built in a single expression:
///
/// ```rust
/// use metrosampler::settings::AdaptiveSettings;
///
/// let settings = AdaptiveSettings::default()
///     .set_burn_in(0)
///     .set_gamma(0.1)
///     .set_seed(42);
/// assert_eq!(settings.update_freq, 200);
/// assert_eq!(settings.seed, Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveSettings {
    /// Steps between two attempts to refresh the proposal covariance.
    /// Zero is treated as one.
    pub update_freq: usize,
    /// Steps before the learnt covariance may replace the initial one.
    pub t0: u64,
    /// Steps run while building the chain, before any sample is exposed.
    pub burn_in: usize,
    /// Scale factor for the proposal step size.
    pub gamma: f64,
    /// Regularizer added to the diagonal of the learnt proposal covariance.
    pub eps: f64,
    /// Seed of the chain's random stream. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            update_freq: 200,
            t0: 1000,
            burn_in: 10_000,
            gamma: 1.0,
            eps: 1e-6,
            seed: None,
        }
    }
}

impl AdaptiveSettings {
    pub fn set_update_freq(mut self, update_freq: usize) -> Self {
        self.update_freq = update_freq;
        self
    }

    pub fn set_t0(mut self, t0: u64) -> Self {
        self.t0 = t0;
        self
    }

    pub fn set_burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    pub fn set_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn set_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the ranges and returns a copy with `update_freq` coerced to at least one.
    pub(crate) fn validated(self) -> Result<Self> {
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(SamplerError::invalid(format!(
                "gamma must be positive and finite, got {}",
                self.gamma
            )));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(SamplerError::invalid(format!(
                "eps must be positive and finite, got {}",
                self.eps
            )));
        }
        Ok(Self {
            update_freq: self.update_freq.max(1),
            ..self
        })
    }

    /// Scale `2.7² γ / d` applied to the learnt covariance.
    pub fn scaling(&self, dim: usize) -> f64 {
        2.7_f64.powi(2) * self.gamma / dim as f64
    }
}
