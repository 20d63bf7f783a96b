//! Reference environments for tabular multi-agent reinforcement learning
//!
//! This crate provides:
//! - The climbing game and Boutilier's coordination game
//! - A single-agent grid world
//! - Two-predator pursuit
//! - Reward wrappers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod boutilier;
pub mod grid;
pub mod matrix;
pub mod pursuit;
pub mod wrappers;

// Re-export environments
pub use boutilier::{Boutilier, Lever, BOUTILIER_START};
pub use grid::{Cell, GridMove, GridWorld};
pub use matrix::{Climb, ClimbingGame, CLIMB_END, CLIMB_START};
pub use pursuit::{Pursuit, PursuitState};
pub use wrappers::RewardWrapper;

// Re-export core types
pub use marl_core::{Environment, Response, Reward};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Boutilier, Climb, ClimbingGame, GridMove, GridWorld, Lever, Pursuit, RewardWrapper,
    };
    pub use marl_core::prelude::*;
}
