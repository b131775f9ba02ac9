/*!
# Adaptive Metropolis Sampler

This module implements the Adaptive Metropolis algorithm of Haario, Saksman and
Tamminen (*An adaptive Metropolis algorithm*, Bernoulli 7(2), 2001). Candidates
are drawn from a Gaussian centred at the current state. The proposal covariance
starts out as a user supplied matrix and, once the chain is past `t0` steps, is
periodically replaced by a scaled copy of the covariance of the chain's own
trajectory.

## Overview

- **Target (`D`)**: any [`Distribution`]; only densities, never log-densities,
  are compared.
- **Chain**: [`AdaptiveChain`] owns its state, its running moments and its own
  seeded random stream. It runs its burn-in while being built.
- **Parallel Chains**: [`AdaptiveMetropolis`] holds several chains seeded with
  `seed + i` and drives them in parallel through [`ChainRunner`](crate::core::ChainRunner).

## Example Usage

```rust
use metrosampler::adaptive::AdaptiveChain;
use metrosampler::distributions::{Distribution, Gaussian};
use metrosampler::settings::AdaptiveSettings;
use ndarray::{arr1, arr2, Array2};

let target = Gaussian::new(arr1(&[0.0, 0.0]), arr2(&[[0.5, -0.2], [-0.2, 0.5]])).unwrap();
let settings = AdaptiveSettings::default()
    .set_burn_in(2_000)
    .set_gamma(0.5)
    .set_seed(42);

let x0 = target.get_example();
let mut chain = AdaptiveChain::new(target, x0, Array2::eye(2), settings).unwrap();
let run = chain.sample(500, 10).unwrap();

assert_eq!(run.samples.dim(), (500, 2));
assert_eq!(run.total, 5_000);
```
*/

use log::{debug, trace, warn};
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::core::{run_chain, HasChains, MarkovChain, SampleRun};
use crate::distributions::Distribution;
use crate::error::{Result, SamplerError};
use crate::linalg::{check_vector_matrix, cholesky};
use crate::moments::RunningMoments;
use crate::proposal::CandidateBuffer;
use crate::settings::AdaptiveSettings;

/// Regime of a chain, derived from its iteration counter.
///
/// Burn-in is not a separate regime: [`AdaptiveChain::warm_up`] runs ordinary
/// steps, which fall in whichever phase their iteration number implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The initial proposal covariance is still in use (`iteration <= t0`).
    Fixed,
    /// The proposal covariance is refreshed every `update_freq` steps.
    Adaptive,
}

/// Ratio of candidate to current density.
///
/// A zero current density makes any feasible candidate infinitely better
/// (`+∞`), while zero over zero is NaN. [`accepts`] rejects NaN, so a chain
/// stuck in an infeasible region only moves once it proposes a feasible state.
pub fn acceptance_ratio(candidate: f64, current: f64) -> f64 {
    if current > 0.0 {
        candidate / current
    } else if candidate > 0.0 {
        f64::INFINITY
    } else {
        f64::NAN
    }
}

/// Metropolis rule: accept when `ratio >= u` for a uniform draw `u` in `[0, 1)`.
pub fn accepts(ratio: f64, u: f64) -> bool {
    // false for NaN
    ratio >= u
}

fn checked_density(p: f64) -> Result<f64> {
    if p.is_finite() && p >= 0.0 {
        Ok(p)
    } else {
        Err(SamplerError::degenerate(format!(
            "density must be finite and non-negative, got {p}"
        )))
    }
}

/// A single Adaptive Metropolis chain.
#[derive(Debug, Clone)]
pub struct AdaptiveChain<D> {
    /// The distribution to sample from.
    pub target: D,
    settings: AdaptiveSettings,
    current_state: Array1<f64>,
    current_density: f64,
    proposal_covariance: Array2<f64>,
    moments: RunningMoments,
    candidates: CandidateBuffer,
    sd: f64,
    seed: u64,
    rng: SmallRng,
}

impl<D: Distribution> AdaptiveChain<D> {
    /**
    Builds a chain at `initial_state` and runs `settings.burn_in` steps.

    # Errors

    [`SamplerError::InvalidArgument`] if `initial_covariance` is not square,
    if its size differs from `initial_state` or from `target.dim()`, if the
    state is empty or not finite, or if `gamma`/`eps` are not positive.
    [`SamplerError::NumericalDegeneracy`] if `initial_covariance` is not
    positive definite. Errors raised by the target during burn-in are
    propagated.
    */
    pub fn new(
        target: D,
        initial_state: Array1<f64>,
        initial_covariance: Array2<f64>,
        settings: AdaptiveSettings,
    ) -> Result<Self> {
        let settings = settings.validated()?;
        let dim = check_vector_matrix(&initial_state.view(), &initial_covariance.view())?;
        if dim != target.dim() {
            return Err(SamplerError::invalid(format!(
                "initial state has length {dim}, target has dimension {}",
                target.dim()
            )));
        }
        if initial_state.iter().any(|v| !v.is_finite()) {
            return Err(SamplerError::invalid("initial state is not finite"));
        }
        cholesky(&initial_covariance.view())?;

        let current_density = checked_density(target.eval(initial_state.view())?)?;
        if current_density == 0.0 {
            warn!("chain starts from a zero-density state; it stays there until a feasible candidate appears");
        }

        let seed = settings.seed.unwrap_or_else(|| thread_rng().gen::<u64>());
        let mut chain = Self {
            target,
            sd: settings.scaling(dim),
            current_state: initial_state,
            current_density,
            proposal_covariance: initial_covariance,
            moments: RunningMoments::new(dim),
            candidates: CandidateBuffer::new(dim, settings.update_freq),
            seed,
            rng: SmallRng::seed_from_u64(seed),
            settings,
        };
        chain.warm_up(settings.burn_in)?;
        Ok(chain)
    }

    /// Runs `steps` steps whose states are never exposed. Returns the number
    /// of accepted proposals.
    pub fn warm_up(&mut self, steps: usize) -> Result<usize> {
        if steps == 0 {
            return Ok(0);
        }
        debug!("burn-in: {steps} steps from iteration {}", self.iteration());
        let mut accepted = 0;
        for _ in 0..steps {
            if self.step()? {
                accepted += 1;
            }
        }
        debug!(
            "burn-in finished: {accepted}/{steps} accepted, proposal scale {:.3e}",
            self.sd
        );
        Ok(accepted)
    }

    /// Draws `count` samples, keeping one state every `thinning` steps.
    ///
    /// The returned counters cover all `count * thinning` steps.
    pub fn sample(&mut self, count: usize, thinning: usize) -> Result<SampleRun> {
        run_chain(self, count, thinning)
    }

    fn refresh_proposal(&mut self) -> Result<()> {
        let n = self.iteration();
        let mut covariance = self.moments.covariance() * self.sd;
        let jitter = self.sd * self.settings.eps;
        covariance.diag_mut().mapv_inplace(|v| v + jitter);

        self.candidates.clear();
        self.candidates.refill(&covariance.view(), &mut self.rng)?;
        self.proposal_covariance = covariance;

        if n <= self.settings.t0.saturating_add(self.settings.update_freq as u64) {
            debug!("adaptive phase: first proposal refresh at iteration {n}");
        }
        trace!("proposal refreshed at iteration {n}");
        Ok(())
    }

    pub fn current_density(&self) -> f64 {
        self.current_density
    }

    /// Running mean of the states visited so far.
    pub fn x_mean(&self) -> &Array1<f64> {
        self.moments.mean()
    }

    /// Running covariance of the states visited so far.
    pub fn x_covariance(&self) -> &Array2<f64> {
        self.moments.covariance()
    }

    /// Covariance currently used to draw candidates.
    pub fn proposal_covariance(&self) -> &Array2<f64> {
        &self.proposal_covariance
    }

    /// Number of steps taken, burn-in included.
    pub fn iteration(&self) -> u64 {
        self.moments.count()
    }

    pub fn phase(&self) -> Phase {
        if self.iteration() > self.settings.t0 {
            Phase::Adaptive
        } else {
            Phase::Fixed
        }
    }

    /// Settings in effect, with `update_freq` already coerced.
    pub fn settings(&self) -> &AdaptiveSettings {
        &self.settings
    }

    pub fn dim(&self) -> usize {
        self.current_state.len()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<D: Distribution> MarkovChain for AdaptiveChain<D> {
    /**
    Performs one Adaptive Metropolis step.

    The running moments absorb the current state, the iteration counter
    advances, and a candidate `x + ξ` with `ξ ~ N(0, C)` is scored by the
    target. Past `t0`, on every `update_freq`-th iteration the proposal
    covariance becomes `sd · (cov + eps · I)` with `sd = 2.7² γ / d`. The
    candidate is accepted when [`acceptance_ratio`] is at least a uniform draw.

    Errors from the target abort the step after the moments were updated.
    */
    fn step(&mut self) -> Result<bool> {
        self.moments.update(&self.current_state.view());
        let n = self.iteration();

        let candidate = self.candidates.propose(
            &self.current_state.view(),
            &self.proposal_covariance.view(),
            &mut self.rng,
        )?;
        let candidate_density = checked_density(self.target.eval(candidate.view())?)?;
        let u: f64 = self.rng.gen();

        if n % self.settings.update_freq as u64 == 0 && n > self.settings.t0 {
            self.refresh_proposal()?;
        }

        let ratio = acceptance_ratio(candidate_density, self.current_density);
        if accepts(ratio, u) {
            self.current_state = candidate;
            self.current_density = candidate_density;
            return Ok(true);
        }
        Ok(false)
    }

    fn current_state(&self) -> ArrayView1<'_, f64> {
        self.current_state.view()
    }
}

/**
Several independent [`AdaptiveChain`]s sharing a target and a starting point.

Chain `i` is seeded with `seed + i`, so a fixed seed reproduces every chain.

# Examples

```rust
use metrosampler::adaptive::AdaptiveMetropolis;
use metrosampler::core::ChainRunner;
use metrosampler::distributions::ConstrainedUniform;
use metrosampler::settings::AdaptiveSettings;
use ndarray::{arr1, Array2};

let target = ConstrainedUniform::new(arr1(&[0.5, 0.5])).unwrap();
let settings = AdaptiveSettings::default().set_burn_in(500).set_seed(7);
let mut am = AdaptiveMetropolis::new(target, arr1(&[0.5, 0.5]), Array2::eye(2) * 0.01, settings, 4)
    .unwrap();
assert_eq!(am.chains[3].seed(), 10);

let runs = am.run(100, 5).unwrap();
assert_eq!(runs.len(), 4);
```
*/
#[derive(Debug, Clone)]
pub struct AdaptiveMetropolis<D> {
    /// The distribution to sample from.
    pub target: D,
    /// The independent chains.
    pub chains: Vec<AdaptiveChain<D>>,
    /// The global random seed.
    pub seed: u64,
}

impl<D> AdaptiveMetropolis<D>
where
    D: Distribution + Clone + Send + Sync,
{
    /// Builds `n_chains` chains, running their burn-in in parallel.
    pub fn new(
        target: D,
        initial_state: Array1<f64>,
        initial_covariance: Array2<f64>,
        settings: AdaptiveSettings,
        n_chains: usize,
    ) -> Result<Self> {
        let seed = settings.seed.unwrap_or_else(|| thread_rng().gen::<u64>());
        let chains = (0..n_chains)
            .into_par_iter()
            .map(|i| {
                AdaptiveChain::new(
                    target.clone(),
                    initial_state.clone(),
                    initial_covariance.clone(),
                    settings.set_seed(seed.wrapping_add(i as u64)),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            target,
            chains,
            seed,
        })
    }
}

impl<D> HasChains for AdaptiveMetropolis<D>
where
    D: Distribution + Send,
{
    type Chain = AdaptiveChain<D>;

    fn chains_mut(&mut self) -> &mut Vec<Self::Chain> {
        &mut self.chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChainRunner;
    use crate::distributions::{ConstrainedUniform, Gaussian};
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2, s, Axis};
    use ndarray_stats::CorrelationExt;
    use std::cell::Cell;

    const SEED: u64 = 42;

    /// Density one everywhere.
    #[derive(Clone)]
    struct Flat(usize);

    impl Distribution for Flat {
        fn dim(&self) -> usize {
            self.0
        }

        fn get_example(&self) -> Array1<f64> {
            Array1::zeros(self.0)
        }

        fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
            crate::linalg::check_dim(&x, self.0)?;
            Ok(1.0)
        }
    }

    /// Zero on the negative half-line, one elsewhere.
    #[derive(Clone)]
    struct HalfLine;

    impl Distribution for HalfLine {
        fn dim(&self) -> usize {
            1
        }

        fn get_example(&self) -> Array1<f64> {
            arr1(&[1.0])
        }

        fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
            Ok(if x[0] >= 0.0 { 1.0 } else { 0.0 })
        }
    }

    struct Broken;

    /// Density one for the first `limit` evaluations, then a user error.
    #[derive(Debug)]
    struct FailsAfter {
        calls: Cell<usize>,
        limit: usize,
    }

    impl FailsAfter {
        fn new(limit: usize) -> Self {
            Self {
                calls: Cell::new(0),
                limit,
            }
        }
    }

    impl Distribution for FailsAfter {
        fn dim(&self) -> usize {
            1
        }

        fn get_example(&self) -> Array1<f64> {
            arr1(&[0.0])
        }

        fn eval(&self, _x: ArrayView1<f64>) -> Result<f64> {
            let calls = self.calls.get() + 1;
            self.calls.set(calls);
            if calls > self.limit {
                Err(SamplerError::distribution("model evaluation failed"))
            } else {
                Ok(1.0)
            }
        }
    }

    impl Distribution for Broken {
        fn dim(&self) -> usize {
            1
        }

        fn get_example(&self) -> Array1<f64> {
            arr1(&[0.0])
        }

        fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
            if x[0] == 0.0 {
                Ok(1.0)
            } else {
                Ok(f64::NAN)
            }
        }
    }

    fn unit_square() -> ConstrainedUniform {
        ConstrainedUniform::new(arr1(&[0.2, 0.5]))
            .unwrap()
            .with_constraint(|_| true)
    }

    fn settings() -> AdaptiveSettings {
        AdaptiveSettings::default()
            .set_update_freq(200)
            .set_t0(1000)
            .set_burn_in(0)
            .set_seed(SEED)
    }

    /// Batch moments of `x0` followed by all but the last sample.
    fn visited_moments(x0: &Array1<f64>, run: &SampleRun) -> (Array1<f64>, Array2<f64>) {
        let n = run.samples.nrows();
        let mut visited = Array2::zeros((n, x0.len()));
        visited.row_mut(0).assign(x0);
        visited
            .slice_mut(s![1.., ..])
            .assign(&run.samples.slice(s![..n - 1, ..]));
        let mean = visited.mean_axis(Axis(0)).unwrap();
        let cov = visited.t().cov(1.0).unwrap();
        (mean, cov)
    }

    #[test]
    fn ratio_policy() {
        assert_eq!(acceptance_ratio(0.5, 1.0), 0.5);
        assert_eq!(acceptance_ratio(1.0, 0.0), f64::INFINITY);
        assert!(acceptance_ratio(0.0, 0.0).is_nan());

        assert!(accepts(f64::INFINITY, 0.999_999));
        assert!(accepts(1.0, 0.999_999));
        assert!(accepts(0.5, 0.5));
        assert!(!accepts(0.5, 0.75));
        assert!(!accepts(f64::NAN, 0.0));
    }

    #[test]
    fn running_moments_match_trajectory() {
        let target = unit_square();
        let x0 = target.get_example();
        let mut chain = AdaptiveChain::new(target, x0.clone(), Array2::eye(2), settings()).unwrap();

        let run = chain.sample(200, 1).unwrap();
        assert_eq!(run.samples.dim(), (200, 2));
        assert_eq!(chain.iteration(), 200);

        let (mean, cov) = visited_moments(&x0, &run);
        assert_abs_diff_eq!(chain.x_mean(), &mean, epsilon = 1e-5);
        assert_abs_diff_eq!(chain.x_covariance(), &cov, epsilon = 1e-5);
    }

    #[test]
    fn moments_match_with_constant_refresh() {
        // update_freq 0 -> 1 and t0 0: the proposal is refreshed every step.
        let target = unit_square();
        let x0 = target.get_example();
        let s = settings().set_update_freq(0).set_t0(0);
        let mut chain = AdaptiveChain::new(target, x0.clone(), Array2::eye(2), s).unwrap();
        assert_eq!(chain.settings().update_freq, 1);

        let run = chain.sample(200, 1).unwrap();
        let (mean, cov) = visited_moments(&x0, &run);
        assert_abs_diff_eq!(chain.x_mean(), &mean, epsilon = 1e-5);
        assert_abs_diff_eq!(chain.x_covariance(), &cov, epsilon = 1e-5);
        assert_eq!(chain.phase(), Phase::Adaptive);
    }

    #[test]
    fn samples_stay_in_hypercube() {
        let target = unit_square();
        let x0 = target.get_example();
        let s = settings().set_burn_in(2_000).set_gamma(0.1);
        let mut chain = AdaptiveChain::new(target.clone(), x0, Array2::eye(2), s).unwrap();
        let run = chain.sample(1_000, 5).unwrap();
        for x in run.samples.axis_iter(Axis(0)) {
            assert!(target.contains(&x), "sample {x} left the unit square");
        }
        assert!(run.accepted > 0);
    }

    #[test]
    fn constant_density_accepts_everything() {
        let mut chain = AdaptiveChain::new(Flat(3), Array1::zeros(3), Array2::eye(3), settings())
            .unwrap();
        let run = chain.sample(5_000, 1).unwrap();
        assert_eq!(run.total, 5_000);
        assert!(run.acceptance_rate() >= 0.99, "rate {}", run.acceptance_rate());
    }

    #[test]
    fn seeded_runs_are_identical() {
        let build = || {
            let target = Gaussian::new(arr1(&[0.0, 0.0]), arr2(&[[0.5, -0.2], [-0.2, 0.5]]))
                .unwrap();
            let s = settings().set_burn_in(1_500).set_update_freq(50).set_t0(100);
            AdaptiveChain::new(target, arr1(&[0.2, 0.1]), Array2::eye(2), s).unwrap()
        };
        let a = build().sample(300, 3).unwrap();
        let b = build().sample(300, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn constructor_rejects_bad_shapes() {
        let target = unit_square();
        let cases = [
            (arr1(&[0.2, 0.5, 0.1]), Array2::eye(3)),
            (arr1(&[0.2]), Array2::eye(1)),
            (arr1(&[0.2, 0.5]), Array2::eye(3)),
            (arr1(&[0.2, 0.5]), Array2::zeros((2, 3))),
        ];
        for (x0, cov) in cases {
            let res = AdaptiveChain::new(target.clone(), x0, cov, settings());
            assert!(matches!(res, Err(SamplerError::InvalidArgument(_))));
        }

        let res = AdaptiveChain::new(
            target.clone(),
            arr1(&[0.2, 0.5]),
            Array2::eye(2),
            settings().set_gamma(0.0),
        );
        assert!(matches!(res, Err(SamplerError::InvalidArgument(_))));

        let indefinite = arr2(&[[1.0, 2.0], [2.0, 1.0]]);
        let res = AdaptiveChain::new(target, arr1(&[0.2, 0.5]), indefinite, settings());
        assert!(matches!(res, Err(SamplerError::NumericalDegeneracy(_))));
    }

    #[test]
    fn proposal_refresh_timing() {
        let target = Flat(2);
        let s = settings().set_update_freq(10).set_t0(25);
        let mut chain = AdaptiveChain::new(target, Array1::zeros(2), Array2::eye(2), s).unwrap();
        let initial = chain.proposal_covariance().clone();
        assert_eq!(chain.phase(), Phase::Fixed);

        chain.warm_up(25).unwrap();
        assert_eq!(chain.phase(), Phase::Fixed);
        chain.warm_up(4).unwrap();
        assert_eq!(chain.phase(), Phase::Adaptive);
        assert_eq!(chain.proposal_covariance(), &initial);

        chain.warm_up(1).unwrap();
        assert_eq!(chain.iteration(), 30);
        assert_ne!(chain.proposal_covariance(), &initial);

        // Taken right after the update at iteration 30, the running
        // covariance is unchanged by the step's accept/reject.
        let sd = chain.settings().scaling(2);
        let expected = chain.x_covariance() * sd + Array2::<f64>::eye(2) * (sd * 1e-6);
        assert_abs_diff_eq!(chain.proposal_covariance(), &expected, epsilon = 1e-12);

        let refreshed = chain.proposal_covariance().clone();
        chain.warm_up(9).unwrap();
        assert_eq!(chain.proposal_covariance(), &refreshed);
    }

    #[test]
    fn zero_density_start_accepts_first_feasible_candidate() {
        let s = settings().set_t0(u64::MAX);
        let mut chain = AdaptiveChain::new(HalfLine, arr1(&[-5.0]), Array2::eye(1) * 1e-4, s)
            .unwrap();
        assert_eq!(chain.current_density(), 0.0);

        // Every candidate is near -5, so every ratio is 0/0 and rejected.
        let run = chain.sample(50, 1).unwrap();
        assert_eq!(run.accepted, 0);
        assert_eq!(chain.current_state()[0], -5.0);

        let mut chain = AdaptiveChain::new(HalfLine, arr1(&[-1e-9]), Array2::eye(1), s).unwrap();
        let mut steps = 0;
        while chain.current_density() == 0.0 {
            let accepted = chain.step().unwrap();
            steps += 1;
            assert_eq!(accepted, chain.current_state()[0] >= 0.0);
            assert!(steps < 1_000);
        }
        assert!(chain.current_state()[0] >= 0.0);
    }

    #[test]
    fn target_errors_propagate() {
        let res = AdaptiveChain::new(Broken, arr1(&[0.0]), Array2::eye(1), settings());
        let mut chain = res.unwrap();
        assert!(matches!(
            chain.step(),
            Err(SamplerError::NumericalDegeneracy(_))
        ));
        assert_eq!(chain.iteration(), 1);

        let res = AdaptiveChain::new(Broken, arr1(&[0.0]), Array2::eye(1), settings().set_burn_in(5));
        assert!(res.is_err());
    }

    #[test]
    fn parallel_chains_are_seeded_per_chain() {
        let target = unit_square();
        let s = settings().set_burn_in(200).set_gamma(0.1);
        let mut am = AdaptiveMetropolis::new(target.clone(), arr1(&[0.2, 0.5]), Array2::eye(2), s, 3)
            .unwrap();
        assert_eq!(am.seed, SEED);
        assert_eq!(
            am.chains.iter().map(|c| c.seed()).collect::<Vec<_>>(),
            vec![SEED, SEED + 1, SEED + 2]
        );

        let runs = am.run(100, 2).unwrap();
        assert_eq!(runs.len(), 3);
        assert_ne!(runs[0].samples, runs[1].samples);

        let mut single = AdaptiveChain::new(target, arr1(&[0.2, 0.5]), Array2::eye(2), s.set_seed(SEED + 1))
            .unwrap();
        assert_eq!(single.sample(100, 2).unwrap(), runs[1]);
    }

    #[test]
    fn distribution_errors_propagate_unchanged() {
        // The initial density is the first call, burn-in steps follow.
        let res = AdaptiveChain::new(FailsAfter::new(3), arr1(&[0.0]), Array2::eye(1), settings().set_burn_in(5));
        match res {
            Err(err @ SamplerError::Distribution(_)) => {
                assert!(std::error::Error::source(&err).is_some());
            }
            other => panic!("expected a distribution error, got {other:?}"),
        }

        let mut chain =
            AdaptiveChain::new(FailsAfter::new(10), arr1(&[0.0]), Array2::eye(1), settings()).unwrap();
        assert!(matches!(
            chain.sample(20, 1),
            Err(SamplerError::Distribution(_))
        ));
        assert_eq!(chain.iteration(), 10);
    }

    #[test]
    fn badly_scaled_proposal_moves_every_coordinate() {
        let target = Gaussian::new(arr1(&[0.0, 0.0]), arr2(&[[1e-6, 0.0], [0.0, 1e7]])).unwrap();
        let cov = arr2(&[[1e6, 0.0], [0.0, 1e-7]]);
        let s = settings().set_t0(u64::MAX);
        let mut chain = AdaptiveChain::new(target, arr1(&[0.0, 0.0]), cov, s).unwrap();

        let run = chain.sample(2_000, 1).unwrap();
        assert!(run.accepted > 0);
        // Changes of one coordinate, counted from the start at zero.
        let moved = |col: usize| {
            let mut prev = 0.0;
            run.samples
                .column(col)
                .iter()
                .filter(|&&v| {
                    let changed = v != prev;
                    prev = v;
                    changed
                })
                .count()
        };
        assert_eq!(moved(0), run.accepted);
        assert_eq!(moved(1), run.accepted);
    }
}
