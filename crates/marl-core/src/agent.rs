//! Agent traits and types

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Action, Reward, State, ValueTable};

/// Which family an agent belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Uniform random baseline
    Random,
    /// Always plays one action
    Fixed,
    /// Independent Q-learner
    QLearner,
    /// Hysteretic Q-learner
    Hysteretic,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Fixed => "fixed",
            Self::QLearner => "q-learner",
            Self::Hysteretic => "hysteretic-q-learner",
        };
        f.write_str(name)
    }
}

/// Core agent trait.
///
/// Agents decide independently: `select_action` sees only the shared state,
/// never another agent's choice for the same step.
pub trait Agent: Send {
    /// State type
    type State: State;
    /// Action type
    type Action: Action;

    /// Choose an action at `state`.
    ///
    /// `candidates` defaults to the environment's full action set at `state`.
    /// `exploration` overrides the agent's own exploration schedule, which is
    /// otherwise evaluated at `step`.
    fn select_action(
        &mut self,
        state: &Self::State,
        candidates: Option<&[Self::Action]>,
        exploration: Option<f64>,
        step: usize,
        rng: &mut dyn RngCore,
    ) -> crate::Result<Self::Action>;

    /// Learn from one transition. Non-learning agents only account the reward.
    fn update(
        &mut self,
        state: &Self::State,
        action_taken: &Self::Action,
        next_state: &Self::State,
        reward: Reward,
        step: Option<usize>,
    ) -> crate::Result<()>;

    /// Sum of every reward passed to `update`
    fn accumulated_reward(&self) -> f64;

    /// Zero the accumulated reward
    fn reset_accumulated_reward(&mut self);

    /// The most recently selected action
    fn last_action(&self) -> Option<&Self::Action>;

    /// Agent family
    fn kind(&self) -> AgentKind;

    /// The agent's value table, for learning agents
    fn value_table(&self) -> Option<&ValueTable<Self::State, Self::Action>> {
        None
    }
}

/// Boxed agent over a given state/action pair, as held by the driver
pub type DynAgent<S, A> = Box<dyn Agent<State = S, Action = A>>;

impl<G> Agent for Box<G>
where
    G: Agent + ?Sized,
{
    type State = G::State;
    type Action = G::Action;

    fn select_action(
        &mut self,
        state: &Self::State,
        candidates: Option<&[Self::Action]>,
        exploration: Option<f64>,
        step: usize,
        rng: &mut dyn RngCore,
    ) -> crate::Result<Self::Action> {
        (**self).select_action(state, candidates, exploration, step, rng)
    }

    fn update(
        &mut self,
        state: &Self::State,
        action_taken: &Self::Action,
        next_state: &Self::State,
        reward: Reward,
        step: Option<usize>,
    ) -> crate::Result<()> {
        (**self).update(state, action_taken, next_state, reward, step)
    }

    fn accumulated_reward(&self) -> f64 {
        (**self).accumulated_reward()
    }

    fn reset_accumulated_reward(&mut self) {
        (**self).reset_accumulated_reward();
    }

    fn last_action(&self) -> Option<&Self::Action> {
        (**self).last_action()
    }

    fn kind(&self) -> AgentKind {
        (**self).kind()
    }

    fn value_table(&self) -> Option<&ValueTable<Self::State, Self::Action>> {
        (**self).value_table()
    }
}

/// Per-agent summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Agent family
    pub kind: AgentKind,
    /// Accumulated reward
    pub accumulated_reward: f64,
    /// Number of enumerated states (learning agents)
    pub table_states: Option<usize>,
}

impl AgentMetrics {
    /// Snapshot an agent
    pub fn of<G: Agent + ?Sized>(agent: &G) -> Self {
        Self {
            kind: agent.kind(),
            accumulated_reward: agent.accumulated_reward(),
            table_states: agent.value_table().map(ValueTable::len),
        }
    }
}
