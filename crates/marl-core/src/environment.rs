//! Environment capability consumed by agents and the simulation driver

use serde::{Deserialize, Serialize};

use crate::{Action, Reward, State};

/// Result of applying one joint action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<S> {
    /// Reward signal, shared by every participating agent
    pub reward: Reward,
    /// State reached after the joint action
    pub next_state: S,
}

impl<S> Response<S> {
    /// Create a new response
    pub fn new(reward: impl Into<Reward>, next_state: S) -> Self {
        Self {
            reward: reward.into(),
            next_state,
        }
    }
}

/// Core environment trait.
///
/// An environment owns its transition dynamics. The core only needs to
/// enumerate its (finite) state space, resolve action sets, and step it with a
/// joint action holding one component per agent in agent order.
pub trait Environment {
    /// State type
    type State: State;
    /// Action type
    type Action: Action;

    /// Every state the environment can reach. Tabular agents enumerate this
    /// eagerly, so it must be finite.
    fn state_space(&self) -> Vec<Self::State>;

    /// The full declared action space
    fn action_space(&self) -> Vec<Self::Action>;

    /// Actions available at `state`. Defaults to the full action space.
    fn actions_at(&self, _state: &Self::State) -> Vec<Self::Action> {
        self.action_space()
    }

    /// Reset to, and return, a start state. May be randomized.
    fn start_state(&mut self) -> Self::State;

    /// Whether `state` ends the episode
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Apply a joint action from the current state
    fn respond_to_action(
        &mut self,
        joint_action: &[Self::Action],
    ) -> crate::Result<Response<Self::State>>;
}

impl<E> Environment for Box<E>
where
    E: Environment + ?Sized,
{
    type State = E::State;
    type Action = E::Action;

    fn state_space(&self) -> Vec<Self::State> {
        (**self).state_space()
    }

    fn action_space(&self) -> Vec<Self::Action> {
        (**self).action_space()
    }

    fn actions_at(&self, state: &Self::State) -> Vec<Self::Action> {
        (**self).actions_at(state)
    }

    fn start_state(&mut self) -> Self::State {
        (**self).start_state()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        (**self).is_terminal(state)
    }

    fn respond_to_action(
        &mut self,
        joint_action: &[Self::Action],
    ) -> crate::Result<Response<Self::State>> {
        (**self).respond_to_action(joint_action)
    }
}
