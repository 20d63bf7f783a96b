//! State keys and terminal markers

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for environment states.
///
/// States are opaque lookup keys: the core hashes and compares them but never
/// interprets their structure. Any `Clone + Eq + Hash + Debug` type qualifies,
/// e.g. a scalar, a pair of grid coordinates or a composite tuple.
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// Not a terminal state
    No,
    /// Terminal state (episode ends)
    Yes,
    /// Truncated (step budget exhausted)
    Truncated,
}

impl Terminal {
    /// Check if the episode is over (either Yes or Truncated)
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::No)
    }
}
