use pursuit::{
    visualize_snapshot, GridGraph, Phase, PlacementOrder, PursuerCount, PursuitGame, Role,
    TurnOutcome,
};
use pursuit_bots::{EvaderControl, PursuerControl, StrategyError};
use tracing::trace;

use crate::recording::Recorder;

pub enum GameResult {
    Captured { pursuer: usize, turns: usize },
    /// The turn limit was reached.
    Escaped { turns: usize },
    IllegalMoveBy { role: Role, err: StrategyError },
}

/// How a game is set up, apart from the region.
#[derive(Clone, Copy, Debug)]
pub struct GameSetup {
    pub pursuers: PursuerCount,
    pub order: PlacementOrder,
    /// Turns in the movement phase (each side's turn counts once) before the evader
    /// is declared to have escaped.
    pub max_turns: usize,
}

/// Plays one game between two bots.
///
/// Returns an error only when recording the game fails, not when a bot
/// fails to choose or chooses an illegal move. Every game is recorded,
/// however it ends.
pub fn play_game(
    graph: GridGraph,
    setup: GameSetup,
    pursuers: &mut dyn PursuerControl,
    evader: &mut dyn EvaderControl,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut game = PursuitGame::with_placement_order(graph, setup.pursuers, setup.order);
    pursuers.new_game();
    evader.new_game();
    record(&game, recorder);

    let mut turns = 0;
    let game_result = loop {
        if game.phase() == Phase::Movement {
            if turns >= setup.max_turns {
                break GameResult::Escaped { turns };
            }
            turns += 1;
        }
        let Some(role) = game.current_role() else {
            // Can't happen, capture ends the loop below
            break GameResult::Escaped { turns };
        };
        let outcome = match role {
            Role::Pursuer(_) => pursuers.act(&mut game),
            Role::Evader => evader.act(&mut game),
        };
        record(&game, recorder);
        match outcome {
            Ok(TurnOutcome::Captured { pursuer }) => {
                break GameResult::Captured { pursuer, turns };
            }
            Ok(TurnOutcome::Continue(_)) => {}
            Err(err) => break GameResult::IllegalMoveBy { role, err },
        }
    };

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }
    Ok(game_result)
}

fn record(game: &PursuitGame, recorder: &mut Option<Recorder>) {
    let snapshot = game.snapshot();
    trace!("\n{}", visualize_snapshot(&snapshot));
    if let Some(recorder) = recorder {
        recorder.store_snapshot(snapshot);
    }
}
