//! Actions and per-state action catalogs

use indexmap::IndexMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::{Environment, MarlError, Result, State};

/// Trait for actions an agent may take.
///
/// Like states, actions are opaque hashable keys.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Action for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Snapshot of the environment's action sets, one entry per declared state.
///
/// Agents take this at construction so they can resolve their default
/// candidate set later without holding on to the environment.
#[derive(Debug, Clone)]
pub struct ActionCatalog<S, A> {
    declared: Vec<A>,
    per_state: IndexMap<S, Vec<A>>,
}

impl<S: State, A: Action> ActionCatalog<S, A> {
    /// Enumerate the environment's declared states and their action sets.
    ///
    /// Fails with [`MarlError::EmptyActionSet`] if a non-terminal state
    /// declares no actions.
    pub fn from_environment<E>(env: &E) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        let mut per_state = IndexMap::new();
        for state in env.state_space() {
            let actions = env.actions_at(&state);
            if actions.is_empty() && !env.is_terminal(&state) {
                return Err(MarlError::EmptyActionSet {
                    state: format!("{state:?}"),
                });
            }
            per_state.insert(state, actions);
        }

        Ok(Self {
            declared: env.action_space(),
            per_state,
        })
    }

    /// The environment's full declared action space
    #[must_use]
    pub fn declared(&self) -> &[A] {
        &self.declared
    }

    /// Whether `action` belongs to the declared action space
    pub fn contains(&self, action: &A) -> bool {
        self.declared.contains(action)
    }

    /// The action set available at `state`
    pub fn actions_at(&self, state: &S) -> Result<&[A]> {
        self.per_state
            .get(state)
            .map(Vec::as_slice)
            .ok_or_else(|| MarlError::unknown_state(state))
    }

    /// Number of enumerated states
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_state.len()
    }

    /// Check if no states were enumerated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_state.is_empty()
    }

    /// Iterate over (state, action set) entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[A])> {
        self.per_state.iter().map(|(s, a)| (s, a.as_slice()))
    }
}
