mod column_guard;
mod error;
mod greedy;
mod random_walk;
pub use column_guard::*;
pub use error::*;
pub use greedy::*;
pub use random_walk::*;

use pursuit::{Cell, GameError, PursuitGame, Role, Step, TurnOutcome};

/// A trait to simplify writing pursuer bots.
///
/// Bots only propose cells. [`PursuerControl::act()`] submits them through
/// the game's placement and move methods, so the game's rules are always
/// enforced.
pub trait PursuerControl {
    /// Forget everything about the previous game.
    fn new_game(&mut self);
    /// One cell per pursuer, in pursuer order.
    fn place_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError>;
    /// The next cell for each pursuer, in pursuer order.
    fn move_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError>;

    /// Does whatever the pursuers have to do at the current step.
    fn act(&mut self, game: &mut PursuitGame) -> Result<TurnOutcome, StrategyError> {
        match game.step() {
            Step::PlacingPursuer(_) | Step::PlacingPursuers => {
                let cells = self.place_pursuers(game)?;
                if cells.len() != game.pursuer_count() {
                    return Err(GameError::WrongPursuerCount {
                        expected: game.pursuer_count(),
                        given: cells.len(),
                    }
                    .into());
                }
                let unplaced: Vec<usize> = (0..game.pursuer_count())
                    .filter(|&idx| game.pursuer(idx).is_none())
                    .collect();
                if unplaced.len() == cells.len() {
                    return Ok(game.place_pursuers(&cells)?);
                }
                // A human placed some of them already
                let mut outcome = TurnOutcome::Continue(game.step());
                for idx in unplaced {
                    outcome = game.place(Role::Pursuer(idx), cells[idx])?;
                }
                Ok(outcome)
            }
            Step::PursuersMoving => {
                let cells = self.move_pursuers(game)?;
                let mut outcome = TurnOutcome::Continue(game.step());
                for (idx, cell) in cells.into_iter().enumerate() {
                    // A human may already have moved some of them
                    if game.state().moved.get(idx).copied().unwrap_or(true) {
                        continue;
                    }
                    outcome = game.move_pursuer(idx, cell)?;
                    if let TurnOutcome::Captured { .. } = outcome {
                        break;
                    }
                }
                Ok(outcome)
            }
            Step::Over => Err(GameError::GameOver.into()),
            Step::PlacingEvader | Step::EvaderMoving => {
                Err(GameError::NotYourTurn(Role::Pursuer(0)).into())
            }
        }
    }
}

/// A trait to simplify writing evader bots, see [`PursuerControl`].
pub trait EvaderControl {
    fn new_game(&mut self);
    fn place_evader(&mut self, game: &PursuitGame) -> Result<Cell, StrategyError>;
    fn move_evader(&mut self, game: &PursuitGame) -> Result<Cell, StrategyError>;

    fn act(&mut self, game: &mut PursuitGame) -> Result<TurnOutcome, StrategyError> {
        match game.step() {
            Step::PlacingEvader => {
                let cell = self.place_evader(game)?;
                Ok(game.place(Role::Evader, cell)?)
            }
            Step::EvaderMoving => {
                let cell = self.move_evader(game)?;
                Ok(game.move_evader(cell)?)
            }
            Step::Over => Err(GameError::GameOver.into()),
            _ => Err(GameError::NotYourTurn(Role::Evader).into()),
        }
    }
}
