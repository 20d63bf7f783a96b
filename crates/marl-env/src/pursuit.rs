//! Predator-prey pursuit on a grid

use marl_core::{Environment, MarlError, Response, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{cells, Cell, GridMove};

/// Positions of both predators and the prey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PursuitState {
    /// Predator positions, in agent order
    pub predators: [Cell; 2],
    /// Prey position
    pub prey: Cell,
}

impl PursuitState {
    /// Whether a predator stands on the prey
    #[must_use]
    pub fn captured(&self) -> bool {
        self.predators.contains(&self.prey)
    }
}

/// Two predators chase a stationary prey.
///
/// Every episode starts from a fresh random layout with the three pieces on
/// distinct cells. Capture pays +1, every other step costs 1.
#[derive(Debug, Clone)]
pub struct Pursuit {
    n: usize,
    rng: StdRng,
    current: PursuitState,
}

impl Pursuit {
    /// Create a pursuit game on an `n × n` board with a seeded layout generator
    pub fn new(n: usize, seed: u64) -> Result<Self> {
        if n < 2 {
            return Err(MarlError::InvalidParameter(format!(
                "pursuit needs at least a 2x2 board, got {n}"
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let current = Self::layout(n, &mut rng);
        Ok(Self { n, rng, current })
    }

    fn layout(n: usize, rng: &mut StdRng) -> PursuitState {
        let mut draw = || (rng.gen_range(0..n), rng.gen_range(0..n));
        let prey = draw();
        let first = loop {
            let cell = draw();
            if cell != prey {
                break cell;
            }
        };
        let second = loop {
            let cell = draw();
            if cell != prey && cell != first {
                break cell;
            }
        };
        PursuitState {
            predators: [first, second],
            prey,
        }
    }

    /// The current layout
    pub fn current(&self) -> PursuitState {
        self.current
    }
}

impl Environment for Pursuit {
    type State = PursuitState;
    type Action = GridMove;

    fn state_space(&self) -> Vec<PursuitState> {
        let board: Vec<Cell> = cells(self.n).collect();
        let mut states = Vec::with_capacity(board.len().pow(3));
        for &first in &board {
            for &second in &board {
                for &prey in &board {
                    states.push(PursuitState {
                        predators: [first, second],
                        prey,
                    });
                }
            }
        }
        states
    }

    fn action_space(&self) -> Vec<GridMove> {
        let mut actions = GridMove::COMPASS.to_vec();
        actions.push(GridMove::Stay);
        actions
    }

    fn start_state(&mut self) -> PursuitState {
        self.current = Self::layout(self.n, &mut self.rng);
        debug!(state = ?self.current, "Pursuit layout drawn");
        self.current
    }

    fn is_terminal(&self, state: &PursuitState) -> bool {
        state.captured()
    }

    fn respond_to_action(&mut self, joint_action: &[GridMove]) -> Result<Response<PursuitState>> {
        let &[first, second] = joint_action else {
            return Err(MarlError::JointActionArity {
                expected: 2,
                actual: joint_action.len(),
            });
        };
        let [p1, p2] = self.current.predators;
        self.current.predators = [first.apply(p1, self.n), second.apply(p2, self.n)];

        let reward = if self.current.captured() { 1.0 } else { -1.0 };
        Ok(Response::new(reward, self.current))
    }
}
