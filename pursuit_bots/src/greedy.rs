use std::cmp::Ordering;
use std::collections::BTreeMap;

use pursuit::{Cell, GameError, GridGraph, PursuitGame, Role};
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};

use crate::{PursuerControl, StrategyError};

/// Pursuers that each run straight at the evader along a shortest path.
///
/// Works for any number of pursuers. Pursuers start spread out: each one is
/// placed on a free cell as far as possible from the pieces already placed.
/// Ties are broken randomly.
pub struct GreedyChaser {
    rng: StdRng,
}

impl GreedyChaser {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Picks randomly among the cells with the lowest score.
    fn best_cell(&mut self, candidates: impl Iterator<Item = (Cell, usize)>) -> Option<Cell> {
        let mut top_choices: Vec<Cell> = Vec::new();
        let mut top_score = usize::MAX;
        for (cell, score) in candidates {
            match score.cmp(&top_score) {
                Ordering::Greater => {}
                Ordering::Equal => top_choices.push(cell),
                Ordering::Less => {
                    top_choices = vec![cell];
                    top_score = score;
                }
            }
        }
        top_choices.choose(&mut self.rng).copied()
    }
}

/// For every cell, the distance to the closest of `sources`.
fn distances_to_any(
    graph: &GridGraph,
    sources: &[Cell],
) -> Result<BTreeMap<Cell, usize>, StrategyError> {
    let mut nearest = BTreeMap::new();
    for &source in sources {
        for (cell, distance) in graph.distances_from(source)? {
            nearest
                .entry(cell)
                .and_modify(|d: &mut usize| *d = (*d).min(distance))
                .or_insert(distance);
        }
    }
    Ok(nearest)
}

impl PursuerControl for GreedyChaser {
    fn new_game(&mut self) {}

    fn place_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError> {
        let graph = game.graph();
        let mut occupied: Vec<Cell> = game.state().evader.into_iter().collect();
        occupied.extend(game.state().pursuers.iter().flatten());

        let mut cells = Vec::with_capacity(game.pursuer_count());
        for _ in 0..game.pursuer_count() {
            let nearest = distances_to_any(graph, &occupied)?;
            // Lowest score wins, so invert the distance to spread out
            let cell = self
                .best_cell(
                    graph
                        .nodes()
                        .filter(|cell| !occupied.contains(cell))
                        .map(|cell| {
                            let distance = nearest.get(&cell).copied().unwrap_or(usize::MAX);
                            (cell, usize::MAX - distance)
                        }),
                )
                .ok_or(StrategyError::NoTarget)?;
            occupied.push(cell);
            cells.push(cell);
        }
        Ok(cells)
    }

    fn move_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError> {
        let evader = game
            .evader()
            .ok_or(GameError::NotYourTurn(Role::Pursuer(0)))?;
        let distances = game.graph().distances_from(evader)?;

        let mut cells = Vec::with_capacity(game.pursuer_count());
        for idx in 0..game.pursuer_count() {
            let pursuer = game
                .pursuer(idx)
                .ok_or(GameError::NotYourTurn(Role::Pursuer(idx)))?;
            let candidates = game
                .legal_targets(Role::Pursuer(idx))
                .into_iter()
                .filter_map(|cell| distances.get(&cell).map(|&d| (cell, d)));
            cells.push(self.best_cell(candidates).unwrap_or(pursuer));
        }
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use pursuit::{PursuerCount, Step, TurnOutcome};

    use super::*;
    use crate::{EvaderControl, RandomWalker};

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn placement_spreads_out() {
        let mut game = PursuitGame::new(GridGraph::build(3, 3).unwrap(), PursuerCount::One);
        game.place(Role::Evader, c(0, 0)).unwrap();
        let mut chaser = GreedyChaser::from_seed(1);
        assert_eq!(chaser.place_pursuers(&game), Ok(vec![c(2, 2)]));
    }

    #[test]
    fn steps_towards_the_evader() {
        let mut graph = GridGraph::build(3, 3).unwrap();
        graph.remove(c(1, 1)).unwrap();
        let mut game = PursuitGame::new(graph, PursuerCount::One);
        game.place(Role::Evader, c(0, 0)).unwrap();
        game.place_pursuers(&[c(0, 2)]).unwrap();
        game.move_evader(c(0, 0)).unwrap();

        let mut chaser = GreedyChaser::from_seed(5);
        assert_eq!(chaser.act(&mut game), Ok(TurnOutcome::Continue(Step::EvaderMoving)));
        assert_eq!(game.pursuer(0), Some(c(0, 1)));
        game.move_evader(c(1, 0)).unwrap();
        assert_eq!(chaser.act(&mut game), Ok(TurnOutcome::Continue(Step::EvaderMoving)));
        assert_eq!(game.pursuer(0), Some(c(0, 0)));
        game.move_evader(c(2, 0)).unwrap();
        chaser.act(&mut game).unwrap();
        assert_eq!(game.pursuer(0), Some(c(1, 0)));
    }

    #[test]
    fn two_greedy_pursuers_catch_a_random_walker() {
        for seed in 0..5 {
            let mut game = PursuitGame::new(GridGraph::build(5, 5).unwrap(), PursuerCount::Two);
            let mut chaser = GreedyChaser::from_seed(seed);
            let mut walker = RandomWalker::from_seed(seed);
            let mut captured = false;
            for _ in 0..2000 {
                let outcome = match game.current_role() {
                    Some(Role::Evader) => walker.act(&mut game).unwrap(),
                    Some(Role::Pursuer(_)) => chaser.act(&mut game).unwrap(),
                    None => break,
                };
                if let TurnOutcome::Captured { .. } = outcome {
                    captured = true;
                    break;
                }
            }
            assert!(captured, "Evader escaped with seed {}", seed);
        }
    }
}
