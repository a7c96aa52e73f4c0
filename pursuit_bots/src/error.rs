use pursuit::{GameError, GraphError};

/// Error type for bots choosing a placement or move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrategyError {
    /// After a column was guarded, no adjacent column leads towards the evader.
    NoTarget,
    /// The strategy only works with this other number of pursuers.
    WrongPursuerCount { supported: usize, given: usize },
    Graph(GraphError),
    Game(GameError),
}

impl std::error::Error for StrategyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StrategyError::Graph(err) => Some(err),
            StrategyError::Game(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for StrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyError::NoTarget => write!(f, "There is no column left to target"),
            StrategyError::WrongPursuerCount { supported, given } => write!(
                f,
                "This strategy needs {} pursuer(s), but the game has {}",
                supported, given
            ),
            StrategyError::Graph(_) => write!(f, "Graph query failed"),
            StrategyError::Game(_) => write!(f, "The game rejected the bot's choice"),
        }
    }
}

impl From<GraphError> for StrategyError {
    fn from(err: GraphError) -> Self {
        StrategyError::Graph(err)
    }
}

impl From<GameError> for StrategyError {
    fn from(err: GameError) -> Self {
        StrategyError::Game(err)
    }
}
