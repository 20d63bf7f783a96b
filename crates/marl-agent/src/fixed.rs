//! Agent that always plays the same action

use marl_core::{Action, Agent, AgentKind, Environment, MarlError, Result, Reward, State};
use rand::RngCore;
use std::marker::PhantomData;
use tracing::{error, warn};

/// Agent committed to one action chosen at construction
#[derive(Debug, Clone)]
pub struct FixedAgent<S, A> {
    action: A,
    accumulated_reward: f64,
    last_action: Option<A>,
    _state: PhantomData<fn() -> S>,
}

impl<S: State, A: Action> FixedAgent<S, A> {
    /// Create a fixed agent, rejecting an action outside the declared space
    pub fn new<E>(env: &E, action: A) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        if !env.action_space().contains(&action) {
            error!(action = ?action, "Fixed action is not in the declared action space");
            return Err(MarlError::FixedActionOutOfSpace {
                action: format!("{action:?}"),
            });
        }
        Ok(Self::committed(action))
    }

    /// Create a fixed agent, only warning when the action is outside the
    /// declared space
    pub fn new_lenient<E>(env: &E, action: A) -> Self
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        if !env.action_space().contains(&action) {
            warn!(action = ?action, "Fixed action is not in the declared action space");
        }
        Self::committed(action)
    }

    fn committed(action: A) -> Self {
        Self {
            action,
            accumulated_reward: 0.0,
            last_action: None,
            _state: PhantomData,
        }
    }

    /// The action this agent always plays
    pub fn action(&self) -> &A {
        &self.action
    }
}

impl<S: State, A: Action> Agent for FixedAgent<S, A> {
    type State = S;
    type Action = A;

    fn select_action(
        &mut self,
        _state: &S,
        _candidates: Option<&[A]>,
        _exploration: Option<f64>,
        _step: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<A> {
        self.last_action = Some(self.action.clone());
        Ok(self.action.clone())
    }

    fn update(
        &mut self,
        _state: &S,
        _action_taken: &A,
        _next_state: &S,
        reward: Reward,
        _step: Option<usize>,
    ) -> Result<()> {
        self.accumulated_reward += reward.value();
        Ok(())
    }

    fn accumulated_reward(&self) -> f64 {
        self.accumulated_reward
    }

    fn reset_accumulated_reward(&mut self) {
        self.accumulated_reward = 0.0;
    }

    fn last_action(&self) -> Option<&A> {
        self.last_action.as_ref()
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Fixed
    }
}
