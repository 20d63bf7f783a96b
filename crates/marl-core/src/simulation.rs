//! Turn-based multi-agent episode driver

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Agent, Environment, MarlError, Result, Terminal};

/// Multiplicative temperature decay applied after every step
pub const DEFAULT_TEMPERATURE_DECAY: f64 = 0.99;

/// Default step budget for one episode
pub const DEFAULT_STEP_BUDGET: usize = 1000;

/// Options for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeOptions {
    /// Step counter value at episode start
    pub start_step: usize,
    /// Shared exploration parameter handed to every agent; `None` lets each
    /// agent evaluate its own schedule
    pub temperature: Option<f64>,
    /// Episode ends once the step counter reaches this value
    pub step_budget: usize,
    /// Whether agents learn from the episode
    pub update_agents: bool,
    /// Factor applied to the temperature after every step
    pub temperature_decay: f64,
}

impl Default for EpisodeOptions {
    fn default() -> Self {
        Self {
            start_step: 0,
            temperature: None,
            step_budget: DEFAULT_STEP_BUDGET,
            update_agents: true,
            temperature_decay: DEFAULT_TEMPERATURE_DECAY,
        }
    }
}

impl EpisodeOptions {
    fn validate(&self) -> Result<()> {
        if !(self.temperature_decay.is_finite() && self.temperature_decay > 0.0) {
            return Err(MarlError::InvalidParameter(format!(
                "temperature decay must be positive and finite, got {}",
                self.temperature_decay
            )));
        }
        if let Some(t) = self.temperature {
            if t.is_nan() || t < 0.0 {
                return Err(MarlError::InvalidParameter(format!(
                    "temperature must be non-negative, got {t}"
                )));
            }
        }
        Ok(())
    }
}

/// Episode information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Episode ID
    pub id: String,
    /// Total shared reward observed during the episode
    pub total_reward: f64,
    /// Number of steps taken in this episode
    pub steps: usize,
    /// How the episode ended
    pub ending: Terminal,
    /// Start time
    pub start_time: DateTime<Utc>,
    /// End time
    pub end_time: Option<DateTime<Utc>>,
}

impl Episode {
    fn begin() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            total_reward: 0.0,
            steps: 0,
            ending: Terminal::No,
            start_time: Utc::now(),
            end_time: None,
        }
    }

    fn finish(&mut self, ending: Terminal) {
        self.ending = ending;
        self.end_time = Some(Utc::now());
    }

    /// Whether the episode stopped on the step budget rather than a terminal state
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.ending == Terminal::Truncated
    }
}

/// What `run_episode` hands back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Step counter after the last step; feed into the next episode's `start_step`
    pub final_step: usize,
    /// Temperature after decay; feed into the next episode's `temperature`
    pub final_temperature: Option<f64>,
    /// Episode bookkeeping
    pub episode: Episode,
}

impl EpisodeOutcome {
    /// Total shared reward seen during the episode
    #[must_use]
    pub fn accumulated_reward(&self) -> f64 {
        self.episode.total_reward
    }
}

/// Run one episode for `agents` sharing `env`.
///
/// Every step resolves the current state, collects one independent decision
/// per agent, applies the joint action, then hands the same reward and next
/// state to every agent's `update` together with that agent's own action.
/// The loop stops on a terminal state or when the step counter reaches the
/// budget.
pub fn run_episode<E, G>(
    agents: &mut [G],
    env: &mut E,
    options: &EpisodeOptions,
    rng: &mut dyn RngCore,
) -> Result<EpisodeOutcome>
where
    E: Environment + ?Sized,
    G: Agent<State = E::State, Action = E::Action>,
{
    options.validate()?;

    let mut episode = Episode::begin();
    let mut state = env.start_state();
    let mut temperature = options.temperature;
    let mut step = options.start_step;

    while !env.is_terminal(&state) && step < options.step_budget {
        let candidates = env.actions_at(&state);
        let joint_action = agents
            .iter_mut()
            .map(|agent| {
                agent.select_action(
                    &state,
                    Some(candidates.as_slice()),
                    temperature,
                    step,
                    &mut *rng,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let response = env.respond_to_action(&joint_action)?;
        trace!(
            step,
            state = ?state,
            joint_action = ?joint_action,
            reward = response.reward.value(),
            next_state = ?response.next_state,
            "Episode step"
        );

        if options.update_agents {
            for (agent, action) in agents.iter_mut().zip(&joint_action) {
                agent.update(
                    &state,
                    action,
                    &response.next_state,
                    response.reward,
                    Some(step),
                )?;
            }
        }

        if let Some(t) = temperature.as_mut() {
            *t *= options.temperature_decay;
        }
        episode.total_reward += response.reward.value();
        episode.steps += 1;
        state = response.next_state;
        step += 1;
    }

    let ending = if env.is_terminal(&state) {
        Terminal::Yes
    } else {
        Terminal::Truncated
    };
    episode.finish(ending);

    debug!(
        episode_id = %episode.id,
        steps = episode.steps,
        final_step = step,
        total_reward = episode.total_reward,
        truncated = episode.truncated(),
        "Episode finished"
    );

    Ok(EpisodeOutcome {
        final_step: step,
        final_temperature: temperature,
        episode,
    })
}

/// Run `episodes` consecutive episodes, threading the step counter and the
/// temperature from each episode into the next.
pub fn run_episodes<E, G>(
    agents: &mut [G],
    env: &mut E,
    episodes: usize,
    options: &EpisodeOptions,
    rng: &mut dyn RngCore,
) -> Result<Vec<EpisodeOutcome>>
where
    E: Environment + ?Sized,
    G: Agent<State = E::State, Action = E::Action>,
{
    let mut current = options.clone();
    let mut outcomes = Vec::with_capacity(episodes);
    for _ in 0..episodes {
        let outcome = run_episode(agents, env, &current, rng)?;
        current.start_step = outcome.final_step;
        current.temperature = outcome.final_temperature;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LineWorld, OneShotEnv};
    use crate::{AgentKind, Reward};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Plays a constant action and records every call it receives
    #[derive(Debug)]
    struct Scripted<A> {
        action: A,
        total: f64,
        seen_temperatures: Vec<Option<f64>>,
        updates: Vec<(usize, Option<usize>)>,
        last: Option<A>,
    }

    impl<A> Scripted<A> {
        fn new(action: A) -> Self {
            Self {
                action,
                total: 0.0,
                seen_temperatures: Vec::new(),
                updates: Vec::new(),
                last: None,
            }
        }
    }

    impl<A: crate::Action> Agent for Scripted<A> {
        type State = usize;
        type Action = A;

        fn select_action(
            &mut self,
            _state: &usize,
            candidates: Option<&[A]>,
            exploration: Option<f64>,
            _step: usize,
            _rng: &mut dyn RngCore,
        ) -> Result<A> {
            assert!(candidates.is_some_and(|c| c.contains(&self.action)));
            self.seen_temperatures.push(exploration);
            self.last = Some(self.action.clone());
            Ok(self.action.clone())
        }

        fn update(
            &mut self,
            state: &usize,
            _action: &A,
            _next: &usize,
            reward: Reward,
            step: Option<usize>,
        ) -> Result<()> {
            self.total += reward.value();
            self.updates.push((*state, step));
            Ok(())
        }

        fn accumulated_reward(&self) -> f64 {
            self.total
        }

        fn reset_accumulated_reward(&mut self) {
            self.total = 0.0;
        }

        fn last_action(&self) -> Option<&A> {
            self.last.as_ref()
        }

        fn kind(&self) -> AgentKind {
            AgentKind::Fixed
        }
    }

    /// Same as `Scripted` but keyed on the one-shot environment's states
    #[derive(Debug, Default)]
    struct Counter {
        total: f64,
    }

    impl Agent for Counter {
        type State = &'static str;
        type Action = u8;

        fn select_action(
            &mut self,
            _: &&'static str,
            _: Option<&[u8]>,
            _: Option<f64>,
            _: usize,
            _: &mut dyn RngCore,
        ) -> Result<u8> {
            Ok(1)
        }

        fn update(
            &mut self,
            _: &&'static str,
            _: &u8,
            _: &&'static str,
            reward: Reward,
            _: Option<usize>,
        ) -> Result<()> {
            self.total += reward.value();
            Ok(())
        }

        fn accumulated_reward(&self) -> f64 {
            self.total
        }

        fn reset_accumulated_reward(&mut self) {
            self.total = 0.0;
        }

        fn last_action(&self) -> Option<&u8> {
            None
        }

        fn kind(&self) -> AgentKind {
            AgentKind::Fixed
        }
    }

    #[test]
    fn test_single_step_episode() {
        let mut env = OneShotEnv::new(7.5, 2);
        let mut agents = vec![Counter::default(), Counter::default()];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome =
            run_episode(&mut agents, &mut env, &EpisodeOptions::default(), &mut rng).unwrap();

        assert_eq!(outcome.final_step, 1);
        assert_eq!(outcome.episode.steps, 1);
        assert_eq!(outcome.episode.ending, Terminal::Yes);
        assert_relative_eq!(outcome.accumulated_reward(), 7.5);
        assert_eq!(env.last_joint_action, vec![1, 1]);
        for agent in &agents {
            assert_relative_eq!(agent.accumulated_reward(), 7.5);
        }
    }

    #[test]
    fn test_step_budget_truncates() {
        let mut env = LineWorld::new(10);
        let mut agents = vec![Scripted::new(LineWorld::LEFT)];
        let mut rng = StdRng::seed_from_u64(1);
        let options = EpisodeOptions {
            start_step: 3,
            step_budget: 8,
            ..EpisodeOptions::default()
        };

        let outcome = run_episode(&mut agents, &mut env, &options, &mut rng).unwrap();

        assert_eq!(outcome.final_step, 8);
        assert_eq!(outcome.episode.steps, 5);
        assert!(outcome.episode.truncated());
        let steps: Vec<_> = agents[0].updates.iter().map(|(_, t)| *t).collect();
        assert_eq!(steps, vec![Some(3), Some(4), Some(5), Some(6), Some(7)]);
    }

    #[test]
    fn test_temperature_decays_per_step() {
        let mut env = LineWorld::new(4);
        let mut agents = vec![Scripted::new(LineWorld::RIGHT)];
        let mut rng = StdRng::seed_from_u64(1);
        let options = EpisodeOptions {
            temperature: Some(100.0),
            ..EpisodeOptions::default()
        };

        let outcome = run_episode(&mut agents, &mut env, &options, &mut rng).unwrap();

        assert_eq!(outcome.final_step, 3);
        assert_relative_eq!(outcome.final_temperature.unwrap(), 100.0 * 0.99_f64.powi(3));
        let seen: Vec<f64> = agents[0].seen_temperatures.iter().map(|t| t.unwrap()).collect();
        assert_relative_eq!(seen[0], 100.0);
        assert_relative_eq!(seen[1], 99.0);
        assert_relative_eq!(seen[2], 98.01);
    }

    #[test]
    fn test_no_temperature_stays_none() {
        let mut env = LineWorld::new(3);
        let mut agents = vec![Scripted::new(LineWorld::RIGHT)];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome =
            run_episode(&mut agents, &mut env, &EpisodeOptions::default(), &mut rng).unwrap();

        assert_eq!(outcome.final_temperature, None);
        assert!(agents[0].seen_temperatures.iter().all(Option::is_none));
    }

    #[test]
    fn test_update_agents_false_skips_learning() {
        let mut env = OneShotEnv::new(3.0, 1);
        let mut agents = vec![Counter::default()];
        let mut rng = StdRng::seed_from_u64(1);
        let options = EpisodeOptions {
            update_agents: false,
            ..EpisodeOptions::default()
        };

        let outcome = run_episode(&mut agents, &mut env, &options, &mut rng).unwrap();

        assert_relative_eq!(outcome.accumulated_reward(), 3.0);
        assert_relative_eq!(agents[0].accumulated_reward(), 0.0);
    }

    #[test]
    fn test_start_in_terminal_state_takes_no_steps() {
        let mut env = LineWorld::new(1);
        let mut agents = vec![Scripted::new(LineWorld::RIGHT)];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome =
            run_episode(&mut agents, &mut env, &EpisodeOptions::default(), &mut rng).unwrap();

        assert_eq!(outcome.final_step, 0);
        assert_eq!(outcome.episode.ending, Terminal::Yes);
        assert!(agents[0].updates.is_empty());
    }

    #[test]
    fn test_environment_errors_propagate() {
        let mut env = OneShotEnv::new(1.0, 3);
        let mut agents = vec![Counter::default()];
        let mut rng = StdRng::seed_from_u64(1);

        let err =
            run_episode(&mut agents, &mut env, &EpisodeOptions::default(), &mut rng).unwrap_err();
        assert!(matches!(err, MarlError::JointActionArity { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let mut env = OneShotEnv::new(1.0, 1);
        let mut agents = vec![Counter::default()];
        let mut rng = StdRng::seed_from_u64(1);
        let options = EpisodeOptions {
            temperature_decay: 0.0,
            ..EpisodeOptions::default()
        };

        assert!(run_episode(&mut agents, &mut env, &options, &mut rng).is_err());
    }

    #[test]
    fn test_run_episodes_threads_step_and_temperature() {
        let mut env = LineWorld::new(3);
        let mut agents = vec![Scripted::new(LineWorld::RIGHT)];
        let mut rng = StdRng::seed_from_u64(1);
        let options = EpisodeOptions {
            temperature: Some(1.0),
            ..EpisodeOptions::default()
        };

        let outcomes = run_episodes(&mut agents, &mut env, 3, &options, &mut rng).unwrap();

        let finals: Vec<_> = outcomes.iter().map(|o| o.final_step).collect();
        assert_eq!(finals, vec![2, 4, 6]);
        assert_relative_eq!(outcomes[2].final_temperature.unwrap(), 0.99_f64.powi(6));
        assert_relative_eq!(agents[0].accumulated_reward(), 3.0);
    }

    #[test]
    fn test_boxed_agents_drive_episodes() {
        let mut env = OneShotEnv::new(2.0, 2);
        let mut agents: Vec<crate::DynAgent<&'static str, u8>> =
            vec![Box::new(Counter::default()), Box::new(Counter::default())];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome =
            run_episode(&mut agents, &mut env, &EpisodeOptions::default(), &mut rng).unwrap();
        assert_eq!(outcome.final_step, 1);
        assert_relative_eq!(agents[1].accumulated_reward(), 2.0);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: EpisodeOptions =
            serde_json::from_str(r#"{"temperature": 5.0, "step_budget": 20}"#).unwrap();
        assert_eq!(options.temperature, Some(5.0));
        assert_eq!(options.step_budget, 20);
        assert!(options.update_agents);
        assert_relative_eq!(options.temperature_decay, DEFAULT_TEMPERATURE_DECAY);
    }
}
