//! Action-selection policy abstractions

use ndarray::ArrayView1;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{MarlError, Result};

/// How ties among maximal values are broken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Uniformly at random among all maximizers
    #[default]
    Random,
    /// The first maximizer in candidate order
    First,
}

/// Core policy trait for selecting among candidate actions.
///
/// A policy is a pure function of the candidates' value estimates, an
/// exploration parameter (epsilon or temperature, depending on the policy) and
/// a caller-supplied random source. It returns an index into the candidates.
pub trait Policy: Debug + Send + Sync {
    /// Choose the index of one candidate
    fn choose(&self, values: ArrayView1<'_, f64>, param: f64, rng: &mut dyn RngCore)
        -> Result<usize>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn choose(
        &self,
        values: ArrayView1<'_, f64>,
        param: f64,
        rng: &mut dyn RngCore,
    ) -> Result<usize> {
        (**self).choose(values, param, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Resolve a policy decision back to the chosen action
pub fn select<'a, A>(
    policy: &dyn Policy,
    actions: &'a [A],
    values: ArrayView1<'_, f64>,
    param: f64,
    rng: &mut dyn RngCore,
) -> Result<&'a A> {
    if actions.is_empty() {
        return Err(MarlError::EmptyCandidates);
    }
    if actions.len() != values.len() {
        return Err(MarlError::InvalidParameter(format!(
            "{} candidates but {} values",
            actions.len(),
            values.len()
        )));
    }
    let index = policy.choose(values, param, rng)?;
    actions.get(index).ok_or_else(|| {
        MarlError::Computation(format!(
            "{} returned index {index} for {} candidates",
            policy.name(),
            actions.len()
        ))
    })
}

/// Indices of every candidate holding the maximal value
#[must_use]
pub fn greedy_indices(values: ArrayView1<'_, f64>) -> Vec<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}

/// Index of a maximizer, ties broken by `tie_break`
pub fn argmax(
    values: ArrayView1<'_, f64>,
    tie_break: TieBreak,
    rng: &mut dyn RngCore,
) -> Result<usize> {
    let best = greedy_indices(values);
    let chosen = match tie_break {
        TieBreak::First => best.first(),
        TieBreak::Random => best.choose(rng),
    };
    chosen.copied().ok_or(MarlError::EmptyCandidates)
}
