//! Small deterministic environments shared by the unit tests

use crate::{Environment, MarlError, Response, Result};

/// Corridor of `n` cells; reaching the last cell ends the episode with reward 1.
/// Only the first agent's component of the joint action moves the walker.
#[derive(Debug, Clone)]
pub struct LineWorld {
    pub n: usize,
    pub position: usize,
}

impl LineWorld {
    pub const LEFT: char = 'L';
    pub const RIGHT: char = 'R';

    pub fn new(n: usize) -> Self {
        Self { n, position: 0 }
    }
}

impl Environment for LineWorld {
    type State = usize;
    type Action = char;

    fn state_space(&self) -> Vec<usize> {
        (0..self.n).collect()
    }

    fn action_space(&self) -> Vec<char> {
        vec![Self::LEFT, Self::RIGHT]
    }

    fn start_state(&mut self) -> usize {
        self.position = 0;
        self.position
    }

    fn is_terminal(&self, state: &usize) -> bool {
        *state + 1 == self.n
    }

    fn respond_to_action(&mut self, joint_action: &[char]) -> Result<Response<usize>> {
        match joint_action.first() {
            Some(&Self::LEFT) => self.position = self.position.saturating_sub(1),
            Some(&Self::RIGHT) => self.position = (self.position + 1).min(self.n - 1),
            other => {
                return Err(MarlError::Environment(format!("unknown action {other:?}")));
            }
        }
        let reward = if self.is_terminal(&self.position) { 1.0 } else { 0.0 };
        Ok(Response::new(reward, self.position))
    }
}

/// Three-state chain 0 -> 1 -> 2 with state-dependent action sets
#[derive(Debug, Clone, Default)]
pub struct StateGatedEnv {
    pub strip_state_one: bool,
    pub current: u8,
}

impl Environment for StateGatedEnv {
    type State = u8;
    type Action = char;

    fn state_space(&self) -> Vec<u8> {
        vec![0, 1, 2]
    }

    fn action_space(&self) -> Vec<char> {
        vec!['a', 'b', 'c']
    }

    fn actions_at(&self, state: &u8) -> Vec<char> {
        match state {
            0 => vec!['a', 'b'],
            1 if !self.strip_state_one => vec!['c'],
            _ => Vec::new(),
        }
    }

    fn start_state(&mut self) -> u8 {
        self.current = 0;
        0
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 2
    }

    fn respond_to_action(&mut self, _joint_action: &[char]) -> Result<Response<u8>> {
        self.current = (self.current + 1).min(2);
        Ok(Response::new(1.0, self.current))
    }
}

/// Any joint action from the sole non-terminal state ends the episode with a
/// fixed reward.
#[derive(Debug, Clone)]
pub struct OneShotEnv {
    pub reward: f64,
    pub agents: usize,
    pub last_joint_action: Vec<u8>,
}

impl OneShotEnv {
    pub fn new(reward: f64, agents: usize) -> Self {
        Self {
            reward,
            agents,
            last_joint_action: Vec::new(),
        }
    }
}

impl Environment for OneShotEnv {
    type State = &'static str;
    type Action = u8;

    fn state_space(&self) -> Vec<&'static str> {
        vec!["start", "done"]
    }

    fn action_space(&self) -> Vec<u8> {
        vec![0, 1]
    }

    fn start_state(&mut self) -> &'static str {
        "start"
    }

    fn is_terminal(&self, state: &&'static str) -> bool {
        *state == "done"
    }

    fn respond_to_action(&mut self, joint_action: &[u8]) -> Result<Response<&'static str>> {
        if joint_action.len() != self.agents {
            return Err(MarlError::JointActionArity {
                expected: self.agents,
                actual: joint_action.len(),
            });
        }
        self.last_joint_action = joint_action.to_vec();
        Ok(Response::new(self.reward, "done"))
    }
}
