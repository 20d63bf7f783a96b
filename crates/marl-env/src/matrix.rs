//! Single-stage cooperative matrix games

use marl_core::{Environment, MarlError, Response, Result};
use serde::{Deserialize, Serialize};

/// Action of one player in the climbing game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Climb {
    /// Row/column A
    A,
    /// Row/column B
    B,
    /// Row/column C
    C,
}

impl Climb {
    /// Every action, in declaration order
    pub const ALL: [Climb; 3] = [Climb::A, Climb::B, Climb::C];

    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }
}

/// Start state of the climbing game
pub const CLIMB_START: u8 = 0;
/// The single terminal state of the climbing game
pub const CLIMB_END: u8 = 1;

const CLIMBING_PAYOFFS: [[f64; 3]; 3] = [
    [11.0, -30.0, 0.0],
    [-30.0, 7.0, 6.0],
    [0.0, 0.0, 5.0],
];

/// Two-player climbing game.
///
/// The optimal joint action `(A, A)` pays 11 but sits next to the -30
/// miscoordination penalties, so learners that average over a teammate's
/// exploration drift towards the safer `(C, C)` or `(B, B)`.
#[derive(Debug, Clone, Default)]
pub struct ClimbingGame {
    last_joint_action: Option<(Climb, Climb)>,
}

impl ClimbingGame {
    /// Create a new climbing game
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payoff of a joint action
    #[must_use]
    pub fn payoff(first: Climb, second: Climb) -> f64 {
        CLIMBING_PAYOFFS[first.index()][second.index()]
    }

    /// The joint action played most recently
    pub fn last_joint_action(&self) -> Option<(Climb, Climb)> {
        self.last_joint_action
    }
}

impl Environment for ClimbingGame {
    type State = u8;
    type Action = Climb;

    fn state_space(&self) -> Vec<u8> {
        vec![CLIMB_START, CLIMB_END]
    }

    fn action_space(&self) -> Vec<Climb> {
        Climb::ALL.to_vec()
    }

    fn start_state(&mut self) -> u8 {
        self.last_joint_action = None;
        CLIMB_START
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == CLIMB_END
    }

    fn respond_to_action(&mut self, joint_action: &[Climb]) -> Result<Response<u8>> {
        let &[first, second] = joint_action else {
            return Err(MarlError::JointActionArity {
                expected: 2,
                actual: joint_action.len(),
            });
        };
        self.last_joint_action = Some((first, second));
        Ok(Response::new(Self::payoff(first, second), CLIMB_END))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_payoff_matrix() {
        assert_relative_eq!(ClimbingGame::payoff(Climb::A, Climb::A), 11.0);
        assert_relative_eq!(ClimbingGame::payoff(Climb::A, Climb::B), -30.0);
        assert_relative_eq!(ClimbingGame::payoff(Climb::B, Climb::C), 6.0);
        assert_relative_eq!(ClimbingGame::payoff(Climb::C, Climb::B), 0.0);
        assert_relative_eq!(ClimbingGame::payoff(Climb::C, Climb::C), 5.0);
    }

    #[test]
    fn test_every_joint_action_ends_the_game() {
        let mut game = ClimbingGame::new();
        for first in Climb::ALL {
            for second in Climb::ALL {
                assert_eq!(game.start_state(), CLIMB_START);
                let response = game.respond_to_action(&[first, second]).unwrap();
                assert!(game.is_terminal(&response.next_state));
                assert_eq!(game.last_joint_action(), Some((first, second)));
            }
        }
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let mut game = ClimbingGame::new();
        let err = game.respond_to_action(&[Climb::A]).unwrap_err();
        assert!(matches!(
            err,
            MarlError::JointActionArity {
                expected: 2,
                actual: 1
            }
        ));
    }
}
