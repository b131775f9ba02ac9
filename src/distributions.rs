/*!
Target distributions for the adaptive sampler.

A target only needs to report its dimension, hand out one feasible state, and
evaluate an un-normalized, non-negative density. Two concrete targets ship with
the crate: a uniform distribution on the unit hypercube cut down by arbitrary
constraints, and a multivariate Gaussian given by its precision matrix.

# Examples

```rust
use metrosampler::distributions::{ConstrainedUniform, Distribution};
use ndarray::arr1;

// Points of the unit square below the diagonal.
let target = ConstrainedUniform::new(arr1(&[0.6, 0.2]))
    .unwrap()
    .with_constraint(|x| x[1] <= x[0]);

assert_eq!(target.eval(arr1(&[0.9, 0.1]).view()).unwrap(), 1.0);
assert_eq!(target.eval(arr1(&[0.1, 0.9]).view()).unwrap(), 0.0);
assert_eq!(target.eval(arr1(&[1.5, 0.1]).view()).unwrap(), 0.0);
```
*/

use std::fmt;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Result, SamplerError};
use crate::linalg::{check_dim, check_vector_matrix};

/// A continuous target distribution known up to a normalizing constant.
pub trait Distribution {
    /// Dimension of the state space.
    fn dim(&self) -> usize;

    /// A state at which [`Distribution::eval`] is strictly positive.
    fn get_example(&self) -> Array1<f64>;

    /// Un-normalized density at `x`.
    ///
    /// Implementations must return a finite, non-negative number and fail with
    /// [`SamplerError::InvalidArgument`] when `x.len() != self.dim()`.
    fn eval(&self, x: ArrayView1<f64>) -> Result<f64>;
}

type Constraint = Arc<dyn Fn(&ArrayView1<f64>) -> bool + Send + Sync>;

/// Uniform distribution on `[0, 1]^d` restricted to the states satisfying
/// every registered constraint.
#[derive(Clone)]
pub struct ConstrainedUniform {
    example: Array1<f64>,
    constraints: Vec<Constraint>,
}

impl ConstrainedUniform {
    /// Creates the distribution from a feasible example; its length fixes `d`.
    pub fn new(example: Array1<f64>) -> Result<Self> {
        if example.is_empty() {
            return Err(SamplerError::invalid("example state has zero dimension"));
        }
        Ok(Self {
            example,
            constraints: Vec::new(),
        })
    }

    /// Adds a constraint. A state is feasible only if every constraint holds.
    pub fn with_constraint<F>(mut self, constraint: F) -> Self
    where
        F: Fn(&ArrayView1<f64>) -> bool + Send + Sync + 'static,
    {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Whether `x` lies in the feasible region. `x` must have length `d`.
    pub fn contains(&self, x: &ArrayView1<f64>) -> bool {
        x.iter().all(|v| (0.0..=1.0).contains(v)) && self.constraints.iter().all(|c| c(x))
    }
}

impl fmt::Debug for ConstrainedUniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedUniform")
            .field("example", &self.example)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

impl Distribution for ConstrainedUniform {
    fn dim(&self) -> usize {
        self.example.len()
    }

    fn get_example(&self) -> Array1<f64> {
        self.example.clone()
    }

    fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
        check_dim(&x, self.dim())?;
        Ok(if self.contains(&x) { 1.0 } else { 0.0 })
    }
}

/**
Multivariate Gaussian with density proportional to
`exp(-½ (x - μ)ᵀ P (x - μ))`, where `P` is the precision (inverse covariance).

# Examples

```rust
use metrosampler::distributions::{Distribution, Gaussian};
use ndarray::{arr1, arr2};

let target = Gaussian::new(arr1(&[0.0, 0.0]), arr2(&[[0.5, -0.2], [-0.2, 0.5]])).unwrap();
assert_eq!(target.eval(arr1(&[0.0, 0.0]).view()).unwrap(), 1.0);
assert!(target.eval(arr1(&[1.0, 1.0]).view()).unwrap() < 1.0);
```
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian {
    pub mean: Array1<f64>,
    pub precision: Array2<f64>,
}

impl Gaussian {
    pub fn new(mean: Array1<f64>, precision: Array2<f64>) -> Result<Self> {
        check_vector_matrix(&mean.view(), &precision.view())?;
        Ok(Self { mean, precision })
    }
}

impl Distribution for Gaussian {
    fn dim(&self) -> usize {
        self.mean.len()
    }

    fn get_example(&self) -> Array1<f64> {
        self.mean.clone()
    }

    fn eval(&self, x: ArrayView1<f64>) -> Result<f64> {
        check_dim(&x, self.dim())?;
        let diff = &x - &self.mean;
        let quad = diff.dot(&self.precision.dot(&diff));
        Ok((-0.5 * quad).exp())
    }
}
