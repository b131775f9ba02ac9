/*!
Step-size tuning by repeated short runs.

The Adaptive Metropolis chain learns the *shape* of its proposal but keeps the
overall scale `gamma` fixed. [`tune_gamma`] wraps the chain in an outer loop:
build a chain, measure its acceptance rate on a short run, rescale `gamma`
with [`adjust_gamma`], and repeat until the rate lands in the target band.
*/

use log::info;
use ndarray::{Array1, Array2};

use crate::adaptive::AdaptiveChain;
use crate::distributions::Distribution;
use crate::error::Result;
use crate::settings::AdaptiveSettings;

/// Parameters of the tuning loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningSettings {
    /// Upper bound on the number of trial chains.
    pub max_rounds: usize,
    /// Samples drawn from each trial chain.
    pub samples: usize,
    /// Thinning of each trial run.
    pub thinning: usize,
    /// Acceptance rates strictly inside this interval stop the loop.
    pub target: (f64, f64),
}

impl Default for TuningSettings {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            samples: 2000,
            thinning: 10,
            target: (0.20, 0.35),
        }
    }
}

/// One trial chain of [`tune_gamma`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningRound {
    /// Scale the trial chain was built with.
    pub gamma: f64,
    /// Acceptance rate it achieved.
    pub acceptance_rate: f64,
}

/// Outcome of [`tune_gamma`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tuned {
    /// Scale to use for the production chain.
    pub gamma: f64,
    /// Acceptance rate of the last trial run.
    pub acceptance_rate: f64,
    /// Trial chains built.
    pub rounds: usize,
    /// Every trial, in order.
    pub history: Vec<TuningRound>,
}

/// Rescales `gamma` according to the observed acceptance `rate`.
///
/// Rates in `(0.20, 0.35)` leave `gamma` untouched. Low rates shrink it (by
/// 0.1, 0.15 or 0.5 below 0.05, 0.10 and 0.20), high rates grow it (by 10, 6,
/// 3 or 2 above 0.95, 0.75, 0.50 and 0.35).
pub fn adjust_gamma(rate: f64, gamma: f64) -> f64 {
    if rate > 0.20 && rate < 0.35 {
        return gamma;
    }

    let factor = if rate < 0.05 {
        0.10
    } else if rate < 0.10 {
        0.15
    } else if rate < 0.20 {
        0.5
    } else if rate > 0.95 {
        10.0
    } else if rate > 0.75 {
        6.0
    } else if rate > 0.50 {
        3.0
    } else if rate > 0.35 {
        2.0
    } else {
        // exactly 0.20 or 0.35
        1.0
    };
    gamma * factor
}

/// Searches for a `gamma` whose acceptance rate falls inside `tuning.target`.
///
/// Every round builds a fresh chain from `initial_state` with the current
/// `gamma` (burn-in included, as configured in `settings`). The loop stops as
/// soon as a rate is inside the target band or after `tuning.max_rounds`
/// rounds. In the latter case the returned `gamma` has already been adjusted
/// for the last observed rate.
pub fn tune_gamma<D>(
    target: &D,
    initial_state: &Array1<f64>,
    initial_covariance: &Array2<f64>,
    settings: AdaptiveSettings,
    tuning: TuningSettings,
) -> Result<Tuned>
where
    D: Distribution + Clone,
{
    let (lo, hi) = tuning.target;
    let mut gamma = settings.gamma;
    let mut rate = 0.0;
    let mut rounds = 0;
    let mut history = Vec::with_capacity(tuning.max_rounds);

    while rounds < tuning.max_rounds {
        let mut chain = AdaptiveChain::new(
            target.clone(),
            initial_state.clone(),
            initial_covariance.clone(),
            settings.set_gamma(gamma),
        )?;
        let run = chain.sample(tuning.samples, tuning.thinning)?;
        rate = run.acceptance_rate();
        rounds += 1;
        history.push(TuningRound {
            gamma,
            acceptance_rate: rate,
        });
        info!(
            "tuning round {rounds}: gamma = {gamma:e}, accepted {}/{} ({rate:.3})",
            run.accepted, run.total
        );

        if rate > lo && rate < hi {
            break;
        }
        gamma = adjust_gamma(rate, gamma);
    }

    Ok(Tuned {
        gamma,
        acceptance_rate: rate,
        rounds,
        history,
    })
}
