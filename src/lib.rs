//! # metrosampler
//!
//! Draws samples from un-normalized densities over `R^d` with the Adaptive
//! Metropolis algorithm: a random-walk Metropolis chain whose Gaussian proposal
//! covariance is periodically re-estimated from the chain's own history.
//!
//! ```rust
//! use metrosampler::prelude::*;
//! use ndarray::{arr1, Array2};
//!
//! // Uniform on the part of the unit square above the diagonal.
//! let target = ConstrainedUniform::new(arr1(&[0.2, 0.5]))
//!     .unwrap()
//!     .with_constraint(|x| x[1] >= x[0]);
//!
//! let settings = AdaptiveSettings::default()
//!     .set_burn_in(5_000)
//!     .set_gamma(0.1)
//!     .set_seed(42);
//! let mut chain =
//!     AdaptiveChain::new(target.clone(), target.get_example(), Array2::eye(2), settings).unwrap();
//!
//! let run = chain.sample(1_000, 10).unwrap();
//! assert!(run.samples.rows().into_iter().all(|x| target.contains(&x)));
//! println!("acceptance rate: {:.2}", run.acceptance_rate());
//! ```

pub mod adaptive;
pub mod core;
pub mod distributions;
pub mod error;
pub mod io;
pub mod linalg;
pub mod moments;
pub mod proposal;
pub mod settings;
pub mod stats;
pub mod tuning;

pub mod prelude {
    pub use crate::adaptive::{AdaptiveChain, AdaptiveMetropolis, Phase};
    pub use crate::core::{ChainRunner, MarkovChain, SampleRun};
    pub use crate::distributions::{ConstrainedUniform, Distribution, Gaussian};
    pub use crate::error::SamplerError;
    pub use crate::settings::AdaptiveSettings;
}
