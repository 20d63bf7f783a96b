//! Environment wrappers for common transformations

use marl_core::{Environment, Response, Result, Reward};

/// Wrapper that modifies rewards
pub struct RewardWrapper<E, F> {
    /// Inner environment
    pub env: E,
    /// Reward transformation function, given the joint action that earned it
    pub reward_fn: F,
}

impl<E, F> RewardWrapper<E, F>
where
    E: Environment,
    F: Fn(Reward, &[E::Action]) -> Reward + Send,
{
    /// Wrap `env`
    pub fn new(env: E, reward_fn: F) -> Self {
        Self { env, reward_fn }
    }
}

impl<E, F> Environment for RewardWrapper<E, F>
where
    E: Environment,
    F: Fn(Reward, &[E::Action]) -> Reward + Send,
{
    type State = E::State;
    type Action = E::Action;

    fn state_space(&self) -> Vec<Self::State> {
        self.env.state_space()
    }

    fn action_space(&self) -> Vec<Self::Action> {
        self.env.action_space()
    }

    fn actions_at(&self, state: &Self::State) -> Vec<Self::Action> {
        self.env.actions_at(state)
    }

    fn start_state(&mut self) -> Self::State {
        self.env.start_state()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        self.env.is_terminal(state)
    }

    fn respond_to_action(
        &mut self,
        joint_action: &[Self::Action],
    ) -> Result<Response<Self::State>> {
        let mut response = self.env.respond_to_action(joint_action)?;
        response.reward = (self.reward_fn)(response.reward, joint_action);
        Ok(response)
    }
}

impl<E: std::fmt::Debug, F> std::fmt::Debug for RewardWrapper<E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardWrapper")
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
