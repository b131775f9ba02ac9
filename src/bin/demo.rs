//! Samples the part of the unit square above the diagonal with several adaptive
//! chains, after tuning the step scale, and prints summary statistics.

use metrosampler::prelude::*;
use metrosampler::stats::{pool_samples, pooled_acceptance_rate, sample_moments};
use metrosampler::tuning::{tune_gamma, TuningSettings};
use ndarray::{arr1, Array2};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    const SAMPLES: usize = 20_000;
    const THINNING: usize = 10;
    const N_CHAINS: usize = 4;
    const SEED: u64 = 42;

    let target = ConstrainedUniform::new(arr1(&[0.25, 0.75]))?
        .with_constraint(|x| x[1] >= x[0]);
    let initial_state = target.get_example();
    let initial_covariance = Array2::eye(2);

    let settings = AdaptiveSettings::default().set_burn_in(5_000).set_seed(SEED);
    let tuned = tune_gamma(
        &target,
        &initial_state,
        &initial_covariance,
        settings,
        TuningSettings::default(),
    )?;
    for (i, round) in tuned.history.iter().enumerate() {
        println!(
            "Tuning round {}: gamma = {:.3e}, acceptance {:.3}",
            i + 1,
            round.gamma,
            round.acceptance_rate
        );
    }
    println!("Using gamma = {:.3e}", tuned.gamma);

    let mut am = AdaptiveMetropolis::new(
        target,
        initial_state,
        initial_covariance,
        settings.set_gamma(tuned.gamma),
        N_CHAINS,
    )?;
    let runs = am.run_progress(SAMPLES / N_CHAINS, THINNING)?;

    let pooled = pool_samples(&runs)?;
    let (mean, cov) = sample_moments(&pooled.view())?;
    println!("Generated {} samples", pooled.nrows());
    println!("Acceptance rate: {:.3}", pooled_acceptance_rate(&runs));
    println!("Mean: {mean:.3}");
    println!("Covariance:\n{cov:.4}");

    #[cfg(feature = "csv")]
    {
        metrosampler::io::csv::save_csv(&runs, "samples.csv")?;
        println!("Saved samples to samples.csv");
    }

    Ok(())
}
