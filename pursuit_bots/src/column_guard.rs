use std::cmp::Ordering;

use pursuit::{
    Cell, ColumnPath, GameError, GraphError, GridGraph, PursuitGame, Role, TurnOutcome,
};

use crate::{PursuerControl, StrategyError};

/// Two pursuers that sweep the region column by column.
///
/// One pursuer (the guard) keeps the evader from crossing its column path,
/// while the other (the chaser) walks to the next column path towards the
/// evader and starts guarding that one. Once it does, the roles swap and the
/// old guard becomes the chaser. The evader's side of the region shrinks with
/// every swap until it is cornered.
#[derive(Clone, Debug, Default)]
pub struct ColumnGuardStrategy {
    context: Option<StrategyContext>,
}

#[derive(Clone, Debug)]
struct StrategyContext {
    /// Index of the chasing pursuer; the other one is the guard.
    chaser: usize,
    /// The column path the chaser is supposed to guard next.
    target: ColumnPath,
    route: Option<Route>,
    guard_achieved: bool,
}

/// The chaser's way to the target column path.
#[derive(Clone, Debug)]
struct Route {
    target: Cell,
    path: Vec<Cell>,
}

/// Where the evader would cross a column path, and who gets there first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardCheck {
    /// The cell of the path closest to the evader.
    pub escape_cell: Cell,
    pub evader_distance: usize,
    pub pursuer_distance: usize,
}

impl GuardCheck {
    /// The pursuer reaches the escape cell strictly before the evader.
    pub fn is_guarding(&self) -> bool {
        self.pursuer_distance < self.evader_distance
    }
}

impl ColumnGuardStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places or moves the pursuers, whichever the game is waiting for.
    pub fn play_turn(&mut self, game: &mut PursuitGame) -> Result<TurnOutcome, StrategyError> {
        self.act(game)
    }

    /// The column path the chaser is currently heading for or guarding.
    pub fn target_path(&self) -> Option<&ColumnPath> {
        self.context.as_ref().map(|ctx| &ctx.target)
    }

    /// The index of the pursuer that is currently chasing.
    pub fn chaser(&self) -> Option<usize> {
        self.context.as_ref().map(|ctx| ctx.chaser)
    }

    /// Computes the starting cells of both pursuers and resets the strategy.
    ///
    /// Pursuer A goes to the middle of the column path at the top of the
    /// rightmost column, and becomes the chaser with that path as target.
    /// Pursuer B goes to the middle of the column path next to it, or of
    /// A's own path if the region is a single column there.
    ///
    /// Cells for which `is_occupied` returns true are avoided by moving along
    /// the path, and then to the nearest free cell of the region.
    pub fn placement(
        &mut self,
        graph: &GridGraph,
        is_occupied: impl Fn(Cell) -> bool,
    ) -> Result<[Cell; 2], StrategyError> {
        let x = graph.rightmost_column().ok_or(StrategyError::NoTarget)?;
        // Nodes are sorted by row, so the first one in column x is the topmost
        let top = graph
            .nodes()
            .find(|cell| cell.col == x)
            .ok_or(StrategyError::NoTarget)?;
        let path_a = ColumnPath::through(graph, top)?;
        let path_b = match path_a.edges_into_column(graph, x - 1).next() {
            Some((_, neighbor)) => ColumnPath::through(graph, neighbor)?,
            None => path_a.clone(),
        };

        let a = free_cell_near(graph, &path_a, &is_occupied)?;
        let b = free_cell_near(graph, &path_b, |cell| is_occupied(cell) || cell == a)?;

        self.context = Some(StrategyContext {
            chaser: 0,
            target: path_a,
            route: None,
            guard_achieved: false,
        });
        Ok([a, b])
    }

    /// Computes the next cell of both pursuers.
    ///
    /// On error, the strategy's state is unchanged.
    pub fn plan_moves(
        &mut self,
        graph: &GridGraph,
        pursuers: [Cell; 2],
        evader: Cell,
    ) -> Result<[Cell; 2], StrategyError> {
        // Whoever is next to the evader takes it
        for (idx, &pursuer) in pursuers.iter().enumerate() {
            if pursuer.is_orthogonal_to(evader) && graph.contains(evader) {
                let mut next = pursuers;
                next[idx] = evader;
                return Ok(next);
            }
        }

        let mut ctx = match &self.context {
            Some(ctx) => ctx.clone(),
            // The pursuers were placed by someone else, so take over from where they are
            None => StrategyContext {
                chaser: 0,
                target: ColumnPath::through(graph, pursuers[0])?,
                route: None,
                guard_achieved: false,
            },
        };
        let next = ctx.plan(graph, pursuers, evader)?;
        self.context = Some(ctx);
        Ok(next)
    }
}

impl StrategyContext {
    fn plan(
        &mut self,
        graph: &GridGraph,
        pursuers: [Cell; 2],
        evader: Cell,
    ) -> Result<[Cell; 2], StrategyError> {
        let mut next = pursuers;
        let chaser = self.chaser;
        let guard = 1 - chaser;

        // The guard keeps watching whatever column path it is on
        let guard_path = ColumnPath::through(graph, pursuers[guard])?;
        if !guard_check(graph, &guard_path, pursuers[guard], evader)?.is_guarding() {
            next[guard] = guard_approach(graph, pursuers[guard], evader);
        }

        if self.target.contains(pursuers[chaser]) {
            if guard_check(graph, &self.target, pursuers[chaser], evader)?.is_guarding() {
                self.guard_achieved = true;
            } else {
                next[chaser] = guard_approach(graph, pursuers[chaser], evader);
            }
        } else {
            next[chaser] = self.advance_chaser(graph, pursuers[chaser])?;
        }

        if self.guard_achieved {
            self.target = retarget(graph, &self.target, evader)?;
            self.chaser = guard;
            self.guard_achieved = false;
        }
        Ok(next)
    }

    /// One step along the cached route to the target path.
    fn advance_chaser(&mut self, graph: &GridGraph, chaser: Cell) -> Result<Cell, StrategyError> {
        let route = match self.route.take() {
            Some(route)
                if self.target.contains(route.target) && route.path.contains(&chaser) =>
            {
                route
            }
            _ => {
                let (target, _) = nearest_cell_on(graph, &self.target, chaser)?;
                Route {
                    target,
                    path: graph.shortest_path(chaser, target)?,
                }
            }
        };
        let next = route
            .path
            .iter()
            .position(|&cell| cell == chaser)
            .and_then(|idx| route.path.get(idx + 1))
            .copied()
            .unwrap_or(chaser);
        self.route = Some(route);
        Ok(next)
    }
}

/// The cell of `path` closest to `from`, and its distance. Ties go to the topmost cell.
pub fn nearest_cell_on(
    graph: &GridGraph,
    path: &ColumnPath,
    from: Cell,
) -> Result<(Cell, usize), GraphError> {
    let distances = graph.distances_from(from)?;
    path.cells()
        .iter()
        .filter_map(|cell| distances.get(cell).map(|&distance| (*cell, distance)))
        .min_by_key(|&(_, distance)| distance)
        .ok_or(GraphError::Unreachable {
            from,
            to: path.middle(),
        })
}

/// Compares how fast the pursuer and the evader can reach the evader's best
/// crossing point on `path`.
pub fn guard_check(
    graph: &GridGraph,
    path: &ColumnPath,
    pursuer: Cell,
    evader: Cell,
) -> Result<GuardCheck, GraphError> {
    let (escape_cell, evader_distance) = nearest_cell_on(graph, path, evader)?;
    let pursuer_distance = graph.shortest_path_length(pursuer, escape_cell)?;
    Ok(GuardCheck {
        escape_cell,
        evader_distance,
        pursuer_distance,
    })
}

/// One step up or down the pursuer's column, towards the evader's row.
///
/// The pursuer stays where it is if it is already level with the evader, or
/// if the cell it would step to is a hole.
pub fn guard_approach(graph: &GridGraph, pursuer: Cell, evader: Cell) -> Cell {
    let target = match pursuer.row.cmp(&evader.row) {
        Ordering::Greater => pursuer.up(),
        Ordering::Less => pursuer.down(),
        Ordering::Equal => return pursuer,
    };
    if graph.contains(target) {
        target
    } else {
        pursuer
    }
}

/// The next column path to guard once `guarded` is safe.
///
/// This is the column path through the first cell next to `guarded` that
/// lies on the evader's side of it.
pub fn retarget(
    graph: &GridGraph,
    guarded: &ColumnPath,
    evader: Cell,
) -> Result<ColumnPath, StrategyError> {
    let mut scratch = graph.clone();
    for &cell in guarded.cells() {
        scratch.remove(cell)?;
    }
    let evader_side = scratch
        .connected_components()
        .into_iter()
        .find(|component| component.contains(&evader))
        .ok_or(StrategyError::NoTarget)?;

    for &cell in guarded.cells() {
        for neighbor in [cell.left(), cell.right()] {
            if evader_side.contains(&neighbor) {
                return Ok(ColumnPath::through(graph, neighbor)?);
            }
        }
    }
    // Can't happen in a connected region: the evader's side must touch the path
    // somewhere, and a column path has no vertical edges leaving it.
    Err(StrategyError::NoTarget)
}

// Searches outwards from the middle of the path, then falls back to the
// whole region. Returns the middle itself if nothing is free.
fn free_cell_near(
    graph: &GridGraph,
    path: &ColumnPath,
    is_occupied: impl Fn(Cell) -> bool,
) -> Result<Cell, GraphError> {
    let cells = path.cells();
    let middle = cells.len() / 2;
    for offset in 0..cells.len() {
        for idx in [middle.checked_add(offset), middle.checked_sub(offset)]
            .into_iter()
            .flatten()
        {
            if let Some(&cell) = cells.get(idx) {
                if !is_occupied(cell) {
                    return Ok(cell);
                }
            }
        }
    }
    let distances = graph.distances_from(path.middle())?;
    Ok(distances
        .into_iter()
        .filter(|&(cell, _)| !is_occupied(cell))
        .min_by_key(|&(_, distance)| distance)
        .map(|(cell, _)| cell)
        .unwrap_or(path.middle()))
}

fn two_pursuers(game: &PursuitGame) -> Result<(), StrategyError> {
    match game.pursuer_count() {
        2 => Ok(()),
        given => Err(StrategyError::WrongPursuerCount { supported: 2, given }),
    }
}

impl PursuerControl for ColumnGuardStrategy {
    fn new_game(&mut self) {
        self.context = None;
    }

    fn place_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError> {
        two_pursuers(game)?;
        let state = game.state();
        Ok(self
            .placement(game.graph(), |cell| state.is_occupied(cell))?
            .to_vec())
    }

    fn move_pursuers(&mut self, game: &PursuitGame) -> Result<Vec<Cell>, StrategyError> {
        two_pursuers(game)?;
        let (Some(a), Some(b), Some(evader)) = (game.pursuer(0), game.pursuer(1), game.evader())
        else {
            return Err(GameError::NotYourTurn(Role::Pursuer(0)).into());
        };
        Ok(self.plan_moves(game.graph(), [a, b], evader)?.to_vec())
    }
}
