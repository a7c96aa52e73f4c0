use crate::{Cell, Role, MAX_DIMENSION};

/// The error type for queries on a [`GridGraph`](crate::GridGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphError {
    NodeNotFound(Cell),
    Unreachable { from: Cell, to: Cell },
    InvalidDimensions { rows: usize, cols: usize },
}

impl std::error::Error for GraphError {}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NodeNotFound(cell) => write!(f, "Cell {} is not part of the graph", cell),
            GraphError::Unreachable { from, to } => {
                write!(f, "There is no path from {} to {}", from, to)
            }
            GraphError::InvalidDimensions { rows, cols } => write!(
                f,
                "A grid of {} x {} cells was requested, but both sides must be between 1 and {}",
                rows, cols, MAX_DIMENSION
            ),
        }
    }
}

/// The error type for [`try_remove()`](crate::try_remove), i.e. for removing a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditError {
    NodeNotFound(Cell),
    NotBorderNode(Cell),
    WouldDisconnect(Cell),
}

impl std::error::Error for EditError {}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::NodeNotFound(cell) => write!(f, "Cell {} is not part of the graph", cell),
            EditError::NotBorderNode(cell) => write!(
                f,
                "Cell {} has all four neighbors, only cells on the border can be removed",
                cell
            ),
            EditError::WouldDisconnect(cell) => {
                write!(f, "Removing cell {} would split the region", cell)
            }
        }
    }
}

/// The error type for one placement or move in a [`PursuitGame`](crate::PursuitGame).
///
/// A call that returns one of these has left the game untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    NodeNotFound(Cell),
    OccupiedCell(Cell),
    AlreadyPlaced(Role),
    IllegalMove { role: Role, from: Cell, to: Cell },
    NotYourTurn(Role),
    NoSuchPursuer(usize),
    WrongPursuerCount { expected: usize, given: usize },
    /// A game was asked for with this many pursuers.
    UnsupportedPursuerCount(usize),
    GameOver,
}

impl std::error::Error for GameError {}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NodeNotFound(cell) => write!(f, "Cell {} is not part of the graph", cell),
            GameError::OccupiedCell(cell) => write!(f, "Cell {} is already occupied", cell),
            GameError::AlreadyPlaced(role) => write!(f, "The {} has already been placed", role),
            GameError::IllegalMove { role, from, to } => write!(
                f,
                "The {} cannot move from {} to {}, only to a neighboring cell or stay",
                role, from, to
            ),
            GameError::NotYourTurn(role) => write!(f, "It is not the {}'s turn", role),
            GameError::NoSuchPursuer(idx) => write!(f, "There is no pursuer number {}", idx + 1),
            GameError::WrongPursuerCount { expected, given } => write!(
                f,
                "Expected positions for {} pursuer(s), but got {}",
                expected, given
            ),
            GameError::UnsupportedPursuerCount(count) => write!(
                f,
                "A game has 1 or 2 pursuers, {} is not supported",
                count
            ),
            GameError::GameOver => write!(f, "The evader has been caught, the game is over"),
        }
    }
}
