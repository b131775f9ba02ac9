//! Chain abstraction and the drivers that turn steps into thinned samples.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;

use crate::error::Result;

pub trait MarkovChain {
    /// Does one iteration of the chain, returning whether the proposed state
    /// was accepted.
    fn step(&mut self) -> Result<bool>;

    /// The current state, without stepping.
    fn current_state(&self) -> ArrayView1<'_, f64>;
}

/// Thinned samples of one chain together with its jump counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRun {
    /// One sample per row, earliest first.
    pub samples: Array2<f64>,
    /// Accepted proposals over the whole run.
    pub accepted: usize,
    /// Attempted proposals over the whole run.
    pub total: usize,
}

impl SampleRun {
    /// Fraction of accepted proposals, zero for an empty run.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total as f64
        }
    }
}

/// Records `count` states, running `thinning` steps before each one.
///
/// `thinning` is clamped to at least one. Intermediate states are discarded;
/// the counters cover every step taken.
pub fn run_chain<M>(chain: &mut M, count: usize, thinning: usize) -> Result<SampleRun>
where
    M: MarkovChain + ?Sized,
{
    drive(chain, count, thinning, || {})
}

/// Like [`run_chain`], advancing `pb` once per recorded sample.
pub fn run_chain_with_progress<M>(
    chain: &mut M,
    count: usize,
    thinning: usize,
    pb: &ProgressBar,
) -> Result<SampleRun>
where
    M: MarkovChain + ?Sized,
{
    pb.set_length(count as u64);
    drive(chain, count, thinning, || pb.inc(1))
}

fn drive<M, F>(chain: &mut M, count: usize, thinning: usize, mut on_sample: F) -> Result<SampleRun>
where
    M: MarkovChain + ?Sized,
    F: FnMut(),
{
    let thinning = thinning.max(1);
    let dim = chain.current_state().len();
    let mut samples = Array2::<f64>::zeros((count, dim));
    let mut accepted = 0;
    let mut total = 0;

    for mut row in samples.axis_iter_mut(Axis(0)) {
        for _ in 0..thinning {
            if chain.step()? {
                accepted += 1;
            }
            total += 1;
        }
        row.assign(&chain.current_state());
        on_sample();
    }

    Ok(SampleRun {
        samples,
        accepted,
        total,
    })
}

/// A trait for "anything that owns multiple MarkovChains".
pub trait HasChains {
    type Chain: MarkovChain + Send;

    /// Returns a mutable reference to the vector of chains.
    fn chains_mut(&mut self) -> &mut Vec<Self::Chain>;
}

pub trait ChainRunner: HasChains {
    /// Runs every chain in parallel, returning one [`SampleRun`] per chain in
    /// chain order. The first error of any chain is returned.
    fn run(&mut self, count: usize, thinning: usize) -> Result<Vec<SampleRun>> {
        self.chains_mut()
            .par_iter_mut()
            .map(|chain| run_chain(chain, count, thinning))
            .collect()
    }

    /// Same as [`ChainRunner::run`], with one progress bar per chain.
    fn run_progress(&mut self, count: usize, thinning: usize) -> Result<Vec<SampleRun>> {
        let multi = MultiProgress::new();
        let pb_style = ProgressStyle::default_bar()
            .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        self.chains_mut()
            .par_iter_mut()
            .enumerate()
            .map(|(i, chain)| {
                let pb = multi.add(ProgressBar::new(count as u64));
                pb.set_prefix(format!("Chain {i}"));
                pb.set_style(pb_style.clone());

                let run = run_chain_with_progress(chain, count, thinning, &pb);
                match &run {
                    Ok(r) => pb.finish_with_message(format!(
                        "acceptance {:.3}",
                        r.acceptance_rate()
                    )),
                    Err(_) => pb.abandon_with_message("failed"),
                }
                run
            })
            .collect()
    }
}

impl<T: HasChains> ChainRunner for T {}
