use serde::{Deserialize, Serialize};

use crate::{Cell, Phase, PursuitGame, Role, Step};

/// Everything a renderer needs to draw one moment of a game.
///
/// A snapshot is a plain copy; it does not change when the game does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The dimensions of the rectangle the region was cut from.
    pub rows: usize,
    pub cols: usize,
    /// The cells of the region, in row-major order.
    pub nodes: Vec<Cell>,
    /// Each edge once, see [`GridGraph::edges()`](crate::GridGraph::edges).
    pub edges: Vec<(Cell, Cell)>,
    pub phase: Phase,
    pub step: Step,
    /// Whose turn it is, `None` once the game is over.
    pub to_move: Option<Role>,
    pub pursuers: Vec<Option<Cell>>,
    pub evader: Option<Cell>,
    /// The legal targets of `to_move`, for highlighting.
    pub legal_targets: Vec<Cell>,
    pub moves: usize,
}

impl Snapshot {
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

impl PursuitGame {
    pub fn snapshot(&self) -> Snapshot {
        let to_move = self.current_role();
        let graph = self.graph();
        let state = self.state();
        Snapshot {
            rows: graph.rows(),
            cols: graph.cols(),
            nodes: graph.nodes().collect(),
            edges: graph.edges().collect(),
            phase: state.phase(),
            step: state.step,
            to_move,
            pursuers: state.pursuers.clone(),
            evader: state.evader,
            legal_targets: to_move
                .map(|role| self.legal_targets(role).into_iter().collect())
                .unwrap_or_default(),
            moves: state.moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridGraph, PursuerCount};

    #[test]
    fn snapshot_follows_the_game() {
        let mut game = PursuitGame::new(GridGraph::build(2, 3).unwrap(), PursuerCount::One);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.nodes.len(), 6);
        assert_eq!(snapshot.edges.len(), 7);
        assert_eq!(snapshot.to_move, Some(Role::Evader));
        assert_eq!(snapshot.legal_targets.len(), 6);

        game.select_cell(Cell::new(0, 0)).unwrap();
        game.select_cell(Cell::new(1, 2)).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, Phase::Movement);
        assert_eq!(snapshot.evader, Some(Cell::new(0, 0)));
        assert_eq!(snapshot.pursuers, vec![Some(Cell::new(1, 2))]);
        assert_eq!(
            snapshot.legal_targets,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]
        );
    }

    #[test]
    fn snapshot_knows_when_the_game_is_over() {
        let mut game = PursuitGame::new(GridGraph::build(1, 2).unwrap(), PursuerCount::One);
        game.select_cell(Cell::new(0, 1)).unwrap();
        game.select_cell(Cell::new(0, 0)).unwrap();
        assert!(!game.snapshot().is_over());
        game.move_evader(Cell::new(0, 0)).unwrap();
        let snapshot = game.snapshot();
        assert!(snapshot.is_over());
        assert_eq!(snapshot.to_move, None);
        assert!(snapshot.legal_targets.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let game = PursuitGame::new(GridGraph::build(1, 2).unwrap(), PursuerCount::Two);
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"placement\""));
        assert!(json.contains("\"step\":{\"placing_pursuer\":0}"));
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game.snapshot());
    }
}
