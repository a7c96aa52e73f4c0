use pursuit::{Cell, PursuitGame, Role};
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};

use crate::{EvaderControl, StrategyError};

/// An evader that starts on a random free cell and then wanders around,
/// choosing uniformly between staying and each neighboring cell.
pub struct RandomWalker {
    rng: StdRng,
}

impl RandomWalker {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    fn choose_target(&mut self, game: &PursuitGame) -> Result<Cell, StrategyError> {
        let targets: Vec<Cell> = game.legal_targets(Role::Evader).into_iter().collect();
        targets
            .choose(&mut self.rng)
            .copied()
            .ok_or(StrategyError::NoTarget)
    }
}

impl EvaderControl for RandomWalker {
    fn new_game(&mut self) {}

    fn place_evader(&mut self, game: &PursuitGame) -> Result<Cell, StrategyError> {
        self.choose_target(game)
    }

    fn move_evader(&mut self, game: &PursuitGame) -> Result<Cell, StrategyError> {
        self.choose_target(game)
    }
}

#[cfg(test)]
mod tests {
    use pursuit::{GridGraph, PursuerCount, Step};
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn places_on_the_only_free_cell() {
        let mut game = PursuitGame::new(GridGraph::build(1, 3).unwrap(), PursuerCount::Two);
        game.place_pursuers(&[Cell::new(0, 0), Cell::new(0, 2)])
            .unwrap();
        let mut walker = RandomWalker::from_seed(3);
        walker.act(&mut game).unwrap();
        assert_eq!(game.evader(), Some(Cell::new(0, 1)));
        assert_eq!(game.step(), Step::PursuersMoving);
    }

    #[test]
    fn no_free_cell_left() {
        let mut game = PursuitGame::new(GridGraph::build(1, 2).unwrap(), PursuerCount::Two);
        game.place_pursuers(&[Cell::new(0, 0), Cell::new(0, 1)])
            .unwrap();
        let mut walker = RandomWalker::from_seed(0);
        assert_eq!(walker.act(&mut game), Err(StrategyError::NoTarget));
    }

    #[test]
    fn same_seed_same_walk() {
        let walk = |seed| {
            let mut game = PursuitGame::new(GridGraph::build(5, 5).unwrap(), PursuerCount::One);
            let mut walker = RandomWalker::from_seed(seed);
            walker.act(&mut game).unwrap();
            let corner = if game.evader() == Some(Cell::new(0, 0)) {
                Cell::new(4, 4)
            } else {
                Cell::new(0, 0)
            };
            game.place_pursuers(&[corner]).unwrap();
            let mut cells = vec![game.evader()];
            for _ in 0..10 {
                if game.is_over() {
                    break;
                }
                walker.act(&mut game).unwrap();
                cells.push(game.evader());
                // Let the pursuer stand still
                if let Some(pursuer) = game.pursuer(0) {
                    if game.step() == Step::PursuersMoving {
                        game.move_pursuer(0, pursuer).unwrap();
                    }
                }
            }
            cells
        };
        assert_eq!(walk(42), walk(42));
    }

    quickcheck! {
        fn moves_are_legal(seed: u64, rows: u8, cols: u8) -> bool {
            let rows = (rows % 5) as usize + 1;
            let cols = (cols % 5) as usize + 2;
            let mut game = PursuitGame::new(GridGraph::build(rows, cols).unwrap(), PursuerCount::One);
            let mut walker = RandomWalker::from_seed(seed);
            walker.act(&mut game).unwrap();
            let Some(evader) = game.evader() else { return false };
            let pursuer = game.graph().nodes().find(|&cell| cell != evader).unwrap();
            game.place_pursuers(&[pursuer]).unwrap();
            for _ in 0..20 {
                if game.step() != Step::EvaderMoving {
                    break;
                }
                let legal = game.legal_targets(Role::Evader);
                match walker.move_evader(&game) {
                    Ok(cell) if legal.contains(&cell) => {}
                    _ => return false,
                }
                if walker.act(&mut game).is_err() {
                    return false;
                }
                if !game.is_over() {
                    game.move_pursuer(0, pursuer).unwrap();
                }
            }
            true
        }
    }
}
