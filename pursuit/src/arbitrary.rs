use quickcheck::{Arbitrary, Gen};

use crate::{try_remove, Cell, GridGraph, PlacementOrder, PursuerCount, PursuitGame};

/// A small rectangle and a list of cells to try removing from it, in order.
///
/// The picks may fall outside the rectangle or repeat.
#[derive(Clone, Debug)]
pub struct ErosionSequence {
    pub rows: usize,
    pub cols: usize,
    pub picks: Vec<Cell>,
}

impl Arbitrary for ErosionSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = (u8::arbitrary(g) % 6) as usize + 1;
        let cols = (u8::arbitrary(g) % 6) as usize + 1;
        let num_picks = usize::arbitrary(g) % (2 * rows * cols + 1);
        let picks = (0..num_picks)
            .map(|_| {
                // One extra row and column on each side, to also pick non-members
                let row = (u8::arbitrary(g) % (rows as u8 + 2)) as i32 - 1;
                let col = (u8::arbitrary(g) % (cols as u8 + 2)) as i32 - 1;
                Cell::new(row, col)
            })
            .collect();
        Self { rows, cols, picks }
    }
}

/// A connected region obtained by eroding a small rectangle.
#[derive(Clone, Debug)]
pub struct GridWithHoles {
    pub graph: GridGraph,
}

impl Arbitrary for GridWithHoles {
    fn arbitrary(g: &mut Gen) -> Self {
        let erosion = ErosionSequence::arbitrary(g);
        // Can't fail, the dimensions are in range
        let mut graph = GridGraph::build(erosion.rows, erosion.cols).unwrap();
        for cell in erosion.picks {
            let _ = try_remove(&mut graph, cell);
        }
        Self { graph }
    }
}

/// A region, a game configuration and a sequence of choices, each of which
/// selects one of the legal targets at that point (modulo their number).
#[derive(Clone, Debug)]
pub struct GameScript {
    pub region: GridWithHoles,
    pub pursuers: PursuerCount,
    pub order: PlacementOrder,
    pub picks: Vec<usize>,
}

impl GameScript {
    pub fn new_game(&self) -> PursuitGame {
        PursuitGame::with_placement_order(self.region.graph.clone(), self.pursuers, self.order)
    }
}

impl Arbitrary for GameScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut region = GridWithHoles::arbitrary(g);
        // Need room for two pursuers and the evader
        while region.graph.len() < 3 {
            region = GridWithHoles::arbitrary(g);
        }
        Self {
            region,
            pursuers: *g.choose(&[PursuerCount::One, PursuerCount::Two]).unwrap(),
            order: *g
                .choose(&[PlacementOrder::PursuersFirst, PlacementOrder::EvaderFirst])
                .unwrap(),
            picks: Vec::arbitrary(g),
        }
    }
}
