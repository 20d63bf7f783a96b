//! Tabular action-value function Q(s, a)

use indexmap::IndexMap;
use ndarray::Array1;
use tracing::{debug, warn};

use crate::{ActionCatalog, Action, Environment, MarlError, Result, State};

/// Eagerly populated Q-table.
///
/// Every (state, action) pair the environment declares is seeded to `0.0` at
/// construction, so a lookup miss always means the state space was declared
/// incompletely and is reported as an error rather than defaulted.
#[derive(Debug, Clone)]
pub struct ValueTable<S, A> {
    q_values: IndexMap<S, IndexMap<A, f64>>,
}

impl<S: State, A: Action> ValueTable<S, A> {
    /// Enumerate the environment's state space and seed every pair to zero
    pub fn from_environment<E>(env: &E) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        Ok(Self::from_catalog(&ActionCatalog::from_environment(env)?))
    }

    /// Seed a table from an already enumerated action catalog
    #[must_use]
    pub fn from_catalog(catalog: &ActionCatalog<S, A>) -> Self {
        let q_values: IndexMap<S, IndexMap<A, f64>> = catalog
            .iter()
            .map(|(state, actions)| {
                let row = actions.iter().map(|a| (a.clone(), 0.0)).collect();
                (state.clone(), row)
            })
            .collect();

        let table = Self { q_values };
        debug!(
            states = table.len(),
            pairs = table.pair_count(),
            "Initialized value table"
        );
        table
    }

    /// Re-seed the table from the environment.
    ///
    /// Overwriting a populated table discards learned values, so this emits a
    /// warning and returns `true` when that happened. It never fails for that
    /// reason.
    pub fn reinitialize<E>(&mut self, env: &E) -> Result<bool>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        let fresh = Self::from_environment(env)?;
        let overwritten = !self.is_empty();
        if overwritten {
            warn!(
                states = self.len(),
                "Overriding populated value table; learned values are discarded"
            );
        }
        *self = fresh;
        Ok(overwritten)
    }

    fn row(&self, state: &S) -> Result<&IndexMap<A, f64>> {
        self.q_values
            .get(state)
            .ok_or_else(|| MarlError::unknown_state(state))
    }

    /// Get Q(s, a)
    pub fn get(&self, state: &S, action: &A) -> Result<f64> {
        self.row(state)?
            .get(action)
            .copied()
            .ok_or_else(|| MarlError::unknown_action(state, action))
    }

    /// Set Q(s, a)
    pub fn set(&mut self, state: &S, action: &A, value: f64) -> Result<()> {
        let slot = self
            .q_values
            .get_mut(state)
            .ok_or_else(|| MarlError::unknown_state(state))?
            .get_mut(action)
            .ok_or_else(|| MarlError::unknown_action(state, action))?;
        *slot = value;
        Ok(())
    }

    /// Greatest value held at `state`, the bootstrap term max_a' Q(s', a').
    ///
    /// A declared state without actions (a terminal state of an environment
    /// with state-dependent action sets) bootstraps from `0.0`.
    pub fn max_over_actions(&self, state: &S) -> Result<f64> {
        let row = self.row(state)?;
        if row.is_empty() {
            return Ok(0.0);
        }
        Ok(row.values().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// First action holding the maximal value at `state`, if any
    pub fn greedy_action(&self, state: &S) -> Result<Option<&A>> {
        let row = self.row(state)?;
        let mut best: Option<(&A, f64)> = None;
        for (action, &value) in row {
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((action, value));
            }
        }
        Ok(best.map(|(a, _)| a))
    }

    /// Values of `candidates` at `state`, in candidate order
    pub fn values_for(&self, state: &S, candidates: &[A]) -> Result<Array1<f64>> {
        let row = self.row(state)?;
        candidates
            .iter()
            .map(|a| {
                row.get(a)
                    .copied()
                    .ok_or_else(|| MarlError::unknown_action(state, a))
            })
            .collect::<Result<Vec<_>>>()
            .map(Array1::from)
    }

    /// Actions enumerated at `state`, in declaration order
    pub fn actions(&self, state: &S) -> Result<Vec<A>> {
        Ok(self.row(state)?.keys().cloned().collect())
    }

    /// Enumerated states, in declaration order
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.q_values.keys()
    }

    /// Iterate over (state, action, value) entries
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, f64)> {
        self.q_values
            .iter()
            .flat_map(|(s, row)| row.iter().map(move |(a, &v)| (s, a, v)))
    }

    /// Number of enumerated states
    #[must_use]
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    /// Check if the table holds no states
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Total number of (state, action) pairs
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.q_values.values().map(IndexMap::len).sum()
    }
}
