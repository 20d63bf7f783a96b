//! Random agent for baseline comparisons

use marl_core::{
    Action, ActionCatalog, Agent, AgentKind, Environment, MarlError, Result, Reward, State,
};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Agent that selects uniformly among the candidate actions
#[derive(Debug, Clone)]
pub struct RandomAgent<S, A> {
    catalog: ActionCatalog<S, A>,
    accumulated_reward: f64,
    last_action: Option<A>,
}

impl<S: State, A: Action> RandomAgent<S, A> {
    /// Create a new random agent over `env`'s action sets
    pub fn new<E>(env: &E) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        Ok(Self {
            catalog: ActionCatalog::from_environment(env)?,
            accumulated_reward: 0.0,
            last_action: None,
        })
    }
}

impl<S: State, A: Action> Agent for RandomAgent<S, A> {
    type State = S;
    type Action = A;

    fn select_action(
        &mut self,
        state: &S,
        candidates: Option<&[A]>,
        _exploration: Option<f64>,
        _step: usize,
        rng: &mut dyn RngCore,
    ) -> Result<A> {
        let candidates = match candidates {
            Some(c) => c,
            None => self.catalog.actions_at(state)?,
        };
        let action = candidates
            .choose(rng)
            .cloned()
            .ok_or(MarlError::EmptyCandidates)?;
        self.last_action = Some(action.clone());
        Ok(action)
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
        AgentKind::Random
    }
}
