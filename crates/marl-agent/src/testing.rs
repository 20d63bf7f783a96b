//! Deterministic environments for the agent unit tests

use marl_core::{Environment, MarlError, Response, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Stay,
    Forward,
}

/// Chain 0 -> 1 -> 2 -> 3 (terminal). Moving forward into 3 pays 10.
/// The move is taken from the first agent's component of the joint action.
#[derive(Debug, Clone, Default)]
pub struct ChainEnv {
    pub position: u8,
}

impl Environment for ChainEnv {
    type State = u8;
    type Action = Move;

    fn state_space(&self) -> Vec<u8> {
        vec![0, 1, 2, 3]
    }

    fn action_space(&self) -> Vec<Move> {
        vec![Move::Stay, Move::Forward]
    }

    fn start_state(&mut self) -> u8 {
        self.position = 0;
        0
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 3
    }

    fn respond_to_action(&mut self, joint_action: &[Move]) -> Result<Response<u8>> {
        match joint_action.first() {
            Some(Move::Forward) => self.position = (self.position + 1).min(3),
            Some(Move::Stay) => {}
            None => return Err(MarlError::EmptyCandidates),
        }
        let reward = if self.position == 3 { 10.0 } else { 0.0 };
        Ok(Response::new(reward, self.position))
    }
}

/// Two-player single-stage coordination game: matching actions pay 1,
/// mismatches pay 0. Only action `b` is available to the second player's view
/// of the world in state 1, which exists to exercise state-dependent sets.
#[derive(Debug, Clone, Default)]
pub struct PairGame;

impl Environment for PairGame {
    type State = u8;
    type Action = char;

    fn state_space(&self) -> Vec<u8> {
        vec![0, 1, 2]
    }

    fn action_space(&self) -> Vec<char> {
        vec!['a', 'b']
    }

    fn actions_at(&self, state: &u8) -> Vec<char> {
        match state {
            1 => vec!['b'],
            _ => self.action_space(),
        }
    }

    fn start_state(&mut self) -> u8 {
        0
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 2
    }

    fn respond_to_action(&mut self, joint_action: &[char]) -> Result<Response<u8>> {
        let reward = match joint_action {
            [x, y] if x == y => 1.0,
            [_, _] => 0.0,
            other => {
                return Err(MarlError::JointActionArity {
                    expected: 2,
                    actual: other.len(),
                })
            }
        };
        Ok(Response::new(reward, 2))
    }
}
