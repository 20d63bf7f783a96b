//! Grid world on an `n × n` board

use marl_core::{Environment, MarlError, Response, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A board position `(x, y)`
pub type Cell = (usize, usize);

/// Move on a grid board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridMove {
    /// x - 1
    Left,
    /// x + 1
    Right,
    /// y - 1
    Up,
    /// y + 1
    Down,
    /// Stay in place
    Stay,
}

impl GridMove {
    /// The four compass moves
    pub const COMPASS: [GridMove; 4] = [
        GridMove::Left,
        GridMove::Right,
        GridMove::Up,
        GridMove::Down,
    ];

    /// Apply the move to `cell`, clamping to a board of side `n`
    #[must_use]
    pub fn apply(self, (x, y): Cell, n: usize) -> Cell {
        let last = n.saturating_sub(1);
        match self {
            Self::Left => (x.saturating_sub(1), y),
            Self::Right => ((x + 1).min(last), y),
            Self::Up => (x, y.saturating_sub(1)),
            Self::Down => (x, (y + 1).min(last)),
            Self::Stay => (x, y),
        }
    }
}

/// Every cell of a board of side `n`, row-major in `x`
pub(crate) fn cells(n: usize) -> impl Iterator<Item = Cell> {
    (0..n * n).map(move |i| (i / n, i % n))
}

/// Single-agent grid world.
///
/// Entering a terminal cell pays +1, every other step costs 1.
#[derive(Debug, Clone)]
pub struct GridWorld {
    n: usize,
    start: Cell,
    terminals: Vec<Cell>,
    current: Cell,
}

impl GridWorld {
    /// Create a grid world, checking every cell lies on the board
    pub fn new(n: usize, start: Cell, terminals: Vec<Cell>) -> Result<Self> {
        if n == 0 {
            return Err(MarlError::InvalidParameter(
                "grid side must be positive".to_string(),
            ));
        }
        let on_board = |&(x, y): &Cell| x < n && y < n;
        if !on_board(&start) {
            return Err(MarlError::InvalidParameter(format!(
                "start cell {start:?} is off a {n}x{n} grid"
            )));
        }
        if let Some(cell) = terminals.iter().find(|c| !on_board(*c)) {
            return Err(MarlError::InvalidParameter(format!(
                "terminal cell {cell:?} is off a {n}x{n} grid"
            )));
        }

        debug!(n, ?start, terminals = terminals.len(), "Created grid world");
        Ok(Self {
            n,
            start,
            terminals,
            current: start,
        })
    }

    /// Board side
    pub fn side(&self) -> usize {
        self.n
    }

    /// The agent's current cell
    pub fn position(&self) -> Cell {
        self.current
    }
}

impl Environment for GridWorld {
    type State = Cell;
    type Action = GridMove;

    fn state_space(&self) -> Vec<Cell> {
        cells(self.n).collect()
    }

    fn action_space(&self) -> Vec<GridMove> {
        GridMove::COMPASS.to_vec()
    }

    fn start_state(&mut self) -> Cell {
        self.current = self.start;
        self.start
    }

    fn is_terminal(&self, state: &Cell) -> bool {
        self.terminals.contains(state)
    }

    fn respond_to_action(&mut self, joint_action: &[GridMove]) -> Result<Response<Cell>> {
        let &[action] = joint_action else {
            return Err(MarlError::JointActionArity {
                expected: 1,
                actual: joint_action.len(),
            });
        };
        if !GridMove::COMPASS.contains(&action) {
            return Err(MarlError::Environment(format!(
                "unknown grid world action {action:?}"
            )));
        }

        self.current = action.apply(self.current, self.n);
        let reward = if self.is_terminal(&self.current) {
            1.0
        } else {
            -1.0
        };
        Ok(Response::new(reward, self.current))
    }
}
