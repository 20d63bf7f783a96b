//! Epsilon-greedy and Boltzmann action selection
//!
//! Both policies work on the value estimates of the candidate actions and
//! return an index into the candidates. The exploration parameter is passed
//! per decision: epsilon for [`EpsilonGreedy`], temperature for
//! [`Boltzmann`].

use marl_core::{argmax, MarlError, Policy, Result, TieBreak};
use ndarray::{Array1, ArrayView1};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Temperatures below this are treated as zero: the policy becomes argmax.
pub const MIN_TEMPERATURE: f64 = 1e-8;

/// Epsilon-greedy policy.
///
/// With probability `epsilon` (clamped to `[0, 1]`) a candidate is drawn
/// uniformly; otherwise a maximizer is chosen according to `tie_break`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    /// Rule for choosing among equally valued maximizers
    pub tie_break: TieBreak,
}

impl EpsilonGreedy {
    /// Create an epsilon-greedy policy with uniform random tie-breaking
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an epsilon-greedy policy with the given tie-break rule
    #[must_use]
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

impl Policy for EpsilonGreedy {
    fn choose(
        &self,
        values: ArrayView1<'_, f64>,
        epsilon: f64,
        rng: &mut dyn RngCore,
    ) -> Result<usize> {
        if values.is_empty() {
            return Err(MarlError::EmptyCandidates);
        }
        if epsilon.is_nan() {
            return Err(MarlError::InvalidParameter("epsilon is NaN".to_string()));
        }

        if rng.gen::<f64>() < epsilon.clamp(0.0, 1.0) {
            // Explore: uniform over every candidate
            Ok(rng.gen_range(0..values.len()))
        } else {
            argmax(values, self.tie_break, rng)
        }
    }

    fn name(&self) -> &'static str {
        "epsilon-greedy"
    }
}

/// Boltzmann (softmax) policy.
///
/// Samples candidate `i` with probability proportional to `exp(Q_i / T)`.
/// A temperature below [`MIN_TEMPERATURE`] degenerates to argmax with the
/// configured tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boltzmann {
    /// Rule for choosing among maximizers on the zero-temperature path
    pub tie_break: TieBreak,
}

impl Boltzmann {
    /// Create a Boltzmann policy with uniform random tie-breaking
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Boltzmann {
    fn choose(
        &self,
        values: ArrayView1<'_, f64>,
        temperature: f64,
        rng: &mut dyn RngCore,
    ) -> Result<usize> {
        if values.is_empty() {
            return Err(MarlError::EmptyCandidates);
        }
        if temperature.is_nan() {
            return Err(MarlError::InvalidParameter("temperature is NaN".to_string()));
        }
        if is_degenerate(temperature) {
            return argmax(values, self.tie_break, rng);
        }

        let probs = softmax(values, temperature);
        let dist =
            WeightedIndex::new(probs.iter()).map_err(|e| MarlError::Computation(e.to_string()))?;
        Ok(dist.sample(rng))
    }

    fn name(&self) -> &'static str {
        "boltzmann"
    }
}

fn is_degenerate(temperature: f64) -> bool {
    temperature < MIN_TEMPERATURE
}

/// Stabilized softmax of `values / temperature`; requires a usable temperature.
///
/// The maximum is subtracted before dividing, so the largest exponent is
/// exactly zero and the sum is never below one.
fn softmax(values: ArrayView1<'_, f64>, temperature: f64) -> Array1<f64> {
    if temperature.is_infinite() {
        #[allow(clippy::cast_precision_loss)]
        return Array1::from_elem(values.len(), 1.0 / values.len() as f64);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return greedy_distribution(values);
    }
    let exp = values.mapv(|q| ((q - max) / temperature).exp());
    let sum = exp.sum();
    exp / sum
}

/// Maximizers share the probability mass evenly
fn greedy_distribution(values: ArrayView1<'_, f64>) -> Array1<f64> {
    let best = marl_core::greedy_indices(values);
    #[allow(clippy::cast_precision_loss)]
    let share = 1.0 / best.len() as f64;
    let mut probs = Array1::zeros(values.len());
    for i in best {
        probs[i] = share;
    }
    probs
}

/// Boltzmann selection probabilities for `values` at `temperature`.
///
/// The maximum value is subtracted before scaling, so large values or
/// tiny temperatures cannot overflow. When the temperature is below
/// [`MIN_TEMPERATURE`] the result is the argmax distribution: the maximizers
/// share the probability mass evenly.
#[must_use]
pub fn boltzmann_probabilities(values: ArrayView1<'_, f64>, temperature: f64) -> Array1<f64> {
    if values.is_empty() {
        return Array1::zeros(0);
    }
    if is_degenerate(temperature) {
        return greedy_distribution(values);
    }
    softmax(values, temperature)
}
