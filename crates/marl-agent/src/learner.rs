//! Tabular learner shared by the Q-learning agents
//!
//! A learner is composed of injected strategies: a value table, an update
//! rule, a discount schedule, an exploration schedule and a selection policy.
//! [`crate::QLearner`] and [`crate::HystereticQLearner`] differ only in the
//! update rule they plug in.

use marl_core::{select, Action, Environment, Policy, Result, Reward, State, ValueTable};
use rand::RngCore;
use tracing::{debug, trace};

use crate::update::{td_update, Transition, TdUpdate, UpdateRule};
use crate::utils::BoxedSchedule;

/// Value table plus the strategies that read and write it
pub struct TabularLearner<S, A> {
    table: ValueTable<S, A>,
    rule: Box<dyn UpdateRule>,
    discount: BoxedSchedule,
    exploration: BoxedSchedule,
    policy: Box<dyn Policy>,
    accumulated_reward: f64,
    last_action: Option<A>,
    updates: usize,
}

impl<S: State, A: Action> TabularLearner<S, A> {
    /// Build a learner, eagerly seeding its table from `env`
    pub fn new<E>(
        env: &E,
        rule: Box<dyn UpdateRule>,
        discount: BoxedSchedule,
        exploration: BoxedSchedule,
        policy: Box<dyn Policy>,
    ) -> Result<Self>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        let table = ValueTable::from_environment(env)?;
        debug!(
            rule = rule.name(),
            policy = policy.name(),
            states = table.len(),
            "Created tabular learner"
        );
        Ok(Self {
            table,
            rule,
            discount,
            exploration,
            policy,
            accumulated_reward: 0.0,
            last_action: None,
            updates: 0,
        })
    }

    /// Choose an action at `state` through the injected policy
    pub fn select(
        &mut self,
        state: &S,
        candidates: Option<&[A]>,
        exploration: Option<f64>,
        step: usize,
        rng: &mut dyn RngCore,
    ) -> Result<A> {
        let owned;
        let candidates = match candidates {
            Some(c) => c,
            None => {
                owned = self.table.actions(state)?;
                owned.as_slice()
            }
        };
        let values = self.table.values_for(state, candidates)?;
        let param = exploration.unwrap_or_else(|| self.exploration.value(step));
        let action = select(self.policy.as_ref(), candidates, values.view(), param, rng)?.clone();
        self.last_action = Some(action.clone());
        Ok(action)
    }

    /// Account the reward, then apply the update rule to Q(state, action)
    pub fn learn(
        &mut self,
        state: &S,
        action: &A,
        next_state: &S,
        reward: Reward,
        step: Option<usize>,
    ) -> Result<TdUpdate> {
        self.accumulated_reward += reward.value();

        let update = td_update(
            &mut self.table,
            self.rule.as_ref(),
            self.discount.as_ref(),
            Transition {
                state,
                action,
                next_state,
                reward,
            },
            step,
        )?;
        self.updates += 1;
        trace!(
            rule = self.rule.name(),
            state = ?state,
            action = ?action,
            td_error = update.td_error,
            updated = update.updated,
            "Applied TD update"
        );
        Ok(update)
    }

    /// Re-seed the table from `env`; returns `true` if learned values were discarded
    pub fn reinitialize<E>(&mut self, env: &E) -> Result<bool>
    where
        E: Environment<State = S, Action = A> + ?Sized,
    {
        self.table.reinitialize(env)
    }

    /// First action holding the maximal value at `state`
    pub fn greedy_action(&self, state: &S) -> Result<Option<&A>> {
        self.table.greedy_action(state)
    }

    /// Exploration parameter the agent would use at `step`
    pub fn exploration_at(&self, step: usize) -> f64 {
        self.exploration.value(step)
    }

    /// The value table
    pub fn table(&self) -> &ValueTable<S, A> {
        &self.table
    }

    /// Sum of every reward passed to `learn`
    pub fn accumulated_reward(&self) -> f64 {
        self.accumulated_reward
    }

    /// Zero the accumulated reward
    pub fn reset_accumulated_reward(&mut self) {
        self.accumulated_reward = 0.0;
    }

    /// The most recently selected action
    pub fn last_action(&self) -> Option<&A> {
        self.last_action.as_ref()
    }

    /// Number of successful updates applied
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl<S: State, A: Action> std::fmt::Debug for TabularLearner<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabularLearner")
            .field("rule", &self.rule.name())
            .field("policy", &self.policy)
            .field("states", &self.table.len())
            .field("accumulated_reward", &self.accumulated_reward)
            .field("updates", &self.updates)
            .finish_non_exhaustive()
    }
}
