//! Core traits and types for tabular multi-agent reinforcement learning
//!
//! This crate provides the contracts shared by agents and environments,
//! the eagerly populated value table, the action-selection policy
//! abstraction and the turn-based episode driver.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod environment;
pub mod error;
pub mod policy;
pub mod reward;
pub mod simulation;
pub mod state;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core traits and types
pub use action::{Action, ActionCatalog};
pub use agent::{Agent, AgentKind, AgentMetrics, DynAgent};
pub use environment::{Environment, Response};
pub use error::{MarlError, Result};
pub use policy::{argmax, greedy_indices, select, Policy, TieBreak};
pub use reward::Reward;
pub use simulation::{
    run_episode, run_episodes, Episode, EpisodeOptions, EpisodeOutcome,
    DEFAULT_STEP_BUDGET, DEFAULT_TEMPERATURE_DECAY,
};
pub use state::{State, Terminal};
pub use value::ValueTable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        run_episode, Action, Agent, DynAgent, Environment, EpisodeOptions, Policy, Response,
        Result, Reward, State, ValueTable,
    };
}
