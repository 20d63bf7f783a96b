//! Example: independent learners on the climbing game
//!
//! Run with: RUST_LOG=info cargo run -p marl-env --example climbing_game

use marl_agent::{
    ConstantSchedule, EpsilonGreedy, ExponentialSchedule, HystereticQLearner, QLearner,
    RandomAgent,
};
use marl_core::{run_episodes, Agent, AgentMetrics, DynAgent, EpisodeOptions};
use marl_env::{Climb, ClimbingGame, CLIMB_START};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EPISODES: usize = 3_000;

fn exploration() -> ExponentialSchedule {
    ExponentialSchedule::new(1.0, 0.05, 0.999)
}

fn team(kind: &str, env: &ClimbingGame) -> anyhow::Result<Vec<DynAgent<u8, Climb>>> {
    let mut agents: Vec<DynAgent<u8, Climb>> = Vec::new();
    for _ in 0..2 {
        let agent: DynAgent<u8, Climb> = match kind {
            "hysteretic" => Box::new(HystereticQLearner::new(
                env,
                exploration(),
                ConstantSchedule::new(0.1),
                ConstantSchedule::new(0.9),
                ConstantSchedule::new(0.001),
                EpsilonGreedy::new(),
            )?),
            "q-learner" => Box::new(QLearner::new(
                env,
                exploration(),
                ConstantSchedule::new(0.1),
                ConstantSchedule::new(0.9),
                EpsilonGreedy::new(),
            )?),
            _ => Box::new(RandomAgent::new(env)?),
        };
        agents.push(agent);
    }
    Ok(agents)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = EpisodeOptions {
        step_budget: usize::MAX,
        ..EpisodeOptions::default()
    };

    for kind in ["hysteretic", "q-learner", "random"] {
        let mut env = ClimbingGame::new();
        let mut agents = team(kind, &env)?;
        let mut rng = StdRng::seed_from_u64(2024);

        let outcomes = run_episodes(&mut agents, &mut env, EPISODES, &options, &mut rng)?;

        let tail = &outcomes[EPISODES - 100..];
        #[allow(clippy::cast_precision_loss)]
        let mean_tail =
            tail.iter().map(|o| o.accumulated_reward()).sum::<f64>() / tail.len() as f64;

        let greedy: Vec<Option<Climb>> = agents
            .iter()
            .map(|agent| {
                agent
                    .value_table()
                    .and_then(|table| table.greedy_action(&CLIMB_START).ok().flatten().copied())
            })
            .collect();

        info!(
            agents = kind,
            mean_reward_last_100 = mean_tail,
            greedy = ?greedy,
            "Finished {EPISODES} episodes"
        );
        for (i, agent) in agents.iter().enumerate() {
            let metrics = AgentMetrics::of(agent);
            info!(agent = i, metrics = ?metrics, "Agent summary");
        }
    }

    Ok(())
}
