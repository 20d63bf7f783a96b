//! Boutilier's two-stage coordination game

use marl_core::{Environment, MarlError, Response, Result};
use serde::{Deserialize, Serialize};

/// Action of one player in the Boutilier game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lever {
    /// Lever `a`
    A,
    /// Lever `b`
    B,
}

/// Start state
pub const BOUTILIER_START: u8 = 1;

const TERMINAL_STATES: [u8; 4] = [4, 5, 6, 7];

/// Two-player, two-stage coordination game.
///
/// Player 1's first lever picks the branch. On the risky branch (state 2) the
/// payoff depends on both first-stage levers as well as the second joint
/// action; the safe branch (state 3) always pays 7.
///
/// ```text
///          a? -> 2 --(a,a) then (b,b)--> 4  pays 11
///        /        \-(a,b) then (b,a)--> 5  pays k
///   1 --           \-otherwise-------> 7  pays 0
///        \
///          b? -> 3 --------------------> 6  pays 7
/// ```
#[derive(Debug, Clone)]
pub struct Boutilier {
    k: f64,
    current: u8,
    first_stage: Option<(Lever, Lever)>,
}

impl Default for Boutilier {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl Boutilier {
    /// Create the game with payoff `k` for state 5
    #[must_use]
    pub fn new(k: f64) -> Self {
        Self {
            k,
            current: BOUTILIER_START,
            first_stage: None,
        }
    }

    /// Reward for entering `state`
    #[must_use]
    pub fn reward_for(&self, state: u8) -> f64 {
        match state {
            4 => 11.0,
            5 => self.k,
            6 => 7.0,
            _ => 0.0,
        }
    }

    fn next_state(&self, first: Lever, second: Lever) -> Result<u8> {
        match (self.current, self.first_stage) {
            (1, _) => Ok(match first {
                Lever::A => 2,
                Lever::B => 3,
            }),
            (2, Some((Lever::A, Lever::A))) if (first, second) == (Lever::B, Lever::B) => Ok(4),
            (2, Some((Lever::A, Lever::B))) if (first, second) == (Lever::B, Lever::A) => Ok(5),
            (2, _) => Ok(7),
            (3, _) => Ok(6),
            (state, _) => Err(MarlError::Environment(format!(
                "no transition out of state {state}"
            ))),
        }
    }
}

impl Environment for Boutilier {
    type State = u8;
    type Action = Lever;

    fn state_space(&self) -> Vec<u8> {
        (1..=7).collect()
    }

    fn action_space(&self) -> Vec<Lever> {
        vec![Lever::A, Lever::B]
    }

    fn start_state(&mut self) -> u8 {
        self.current = BOUTILIER_START;
        self.first_stage = None;
        BOUTILIER_START
    }

    fn is_terminal(&self, state: &u8) -> bool {
        TERMINAL_STATES.contains(state)
    }

    fn respond_to_action(&mut self, joint_action: &[Lever]) -> Result<Response<u8>> {
        let &[first, second] = joint_action else {
            return Err(MarlError::JointActionArity {
                expected: 2,
                actual: joint_action.len(),
            });
        };

        let next = self.next_state(first, second)?;
        if self.current == BOUTILIER_START {
            self.first_stage = Some((first, second));
        }
        self.current = next;
        Ok(Response::new(self.reward_for(next), next))
    }
}
