//! Tabular agents for multi-agent reinforcement learning
//!
//! This crate provides the agent variants and the strategies they are built from:
//! - Uniform random and fixed-action baselines
//! - Independent Q-learning
//! - Hysteretic Q-learning
//! - Epsilon-greedy and Boltzmann action selection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod fixed;
pub mod hysteretic;
pub mod learner;
pub mod policy;
pub mod q_learner;
pub mod random;
pub mod update;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export agents
pub use fixed::FixedAgent;
pub use hysteretic::HystereticQLearner;
pub use learner::TabularLearner;
pub use q_learner::QLearner;
pub use random::RandomAgent;

// Re-export strategies
pub use config::LearnerConfig;
pub use policy::{boltzmann_probabilities, Boltzmann, EpsilonGreedy, MIN_TEMPERATURE};
pub use update::{td_update, Hysteretic, Standard, TdUpdate, Transition, UpdateRule};
pub use utils::{
    boxed, BoxedSchedule, ConstantSchedule, ExponentialSchedule, LinearSchedule, Schedule,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Boltzmann, ConstantSchedule, EpsilonGreedy, FixedAgent, HystereticQLearner,
        LearnerConfig, QLearner, RandomAgent, Schedule,
    };
    pub use marl_core::prelude::*;
}
