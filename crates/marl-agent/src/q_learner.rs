//! Independent Q-learning agent

use marl_core::{Action, Agent, AgentKind, Environment, Policy, Result, Reward, State, ValueTable};
use rand::RngCore;

use crate::learner::TabularLearner;
use crate::update::{Standard, TdUpdate};
use crate::utils::{BoxedSchedule, Schedule};
use crate::LearnerConfig;

/// Q-learner applying the standard TD rule `Q ← Q + α(t) · δ`
pub struct QLearner<S, A> {
    learner: TabularLearner<S, A>,
}

impl<S: State, A: Action> std::fmt::Debug for QLearner<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QLearner")
            .field("learner", &self.learner)
            .finish()
    }
}

impl<S: State, A: Action> QLearner<S, A> {
    /// Create a Q-learner with an eagerly populated value table.
    ///
    /// `exploration` feeds the policy whenever the caller does not pass an
    /// explicit exploration parameter.
    pub fn new<E>(
        env: &E,
        exploration: impl Schedule + 'static,
        learning_rate: impl Schedule + 'static,
        discount: impl Schedule + 'static,
        policy: impl Policy + 'static,
    ) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        Self::assemble(
            env,
            Box::new(exploration),
            Box::new(learning_rate),
            Box::new(discount),
            Box::new(policy),
        )
    }

    /// Create a Q-learner from a [`LearnerConfig`]
    pub fn from_config<E>(
        env: &E,
        config: &LearnerConfig,
        policy: impl Policy + 'static,
    ) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        config.validate()?;
        Self::assemble(
            env,
            config.exploration_schedule(),
            config.learning_rate_schedule(),
            config.discount_schedule(),
            Box::new(policy),
        )
    }

    fn assemble<E>(
        env: &E,
        exploration: BoxedSchedule,
        learning_rate: BoxedSchedule,
        discount: BoxedSchedule,
        policy: Box<dyn Policy>,
    ) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        let learner = TabularLearner::new(
            env,
            Box::new(Standard::from_boxed(learning_rate)),
            discount,
            exploration,
            policy,
        )?;
        Ok(Self { learner })
    }

    /// Apply one update and return its record
    pub fn learn(
        &mut self,
        state: &S,
        action: &A,
        next_state: &S,
        reward: Reward,
        step: Option<usize>,
    ) -> Result<TdUpdate> {
        self.learner.learn(state, action, next_state, reward, step)
    }

    /// The underlying learner
    pub fn learner(&self) -> &TabularLearner<S, A> {
        &self.learner
    }

    /// Re-seed the value table; returns `true` if learned values were discarded
    pub fn reinitialize<E>(&mut self, env: &E) -> Result<bool>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        self.learner.reinitialize(env)
    }

    /// First action holding the maximal value at `state`
    pub fn greedy_action(&self, state: &S) -> Result<Option<&A>> {
        self.learner.greedy_action(state)
    }
}

impl<S: State, A: Action> Agent for QLearner<S, A> {
    type State = S;
    type Action = A;

    fn select_action(
        &mut self,
        state: &S,
        candidates: Option<&[A]>,
        exploration: Option<f64>,
        step: usize,
        rng: &mut dyn RngCore,
    ) -> Result<A> {
        self.learner.select(state, candidates, exploration, step, rng)
    }

    fn update(
        &mut self,
        state: &S,
        action_taken: &A,
        next_state: &S,
        reward: Reward,
        step: Option<usize>,
    ) -> Result<()> {
        self.learner
            .learn(state, action_taken, next_state, reward, step)
            .map(|_| ())
    }

    fn accumulated_reward(&self) -> f64 {
        self.learner.accumulated_reward()
    }

    fn reset_accumulated_reward(&mut self) {
        self.learner.reset_accumulated_reward();
    }

    fn last_action(&self) -> Option<&A> {
        self.learner.last_action()
    }

    fn kind(&self) -> AgentKind {
        AgentKind::QLearner
    }

    fn value_table(&self) -> Option<&ValueTable<S, A>> {
        Some(self.learner.table())
    }
}
