use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Cell, GameError, GridGraph};

/// A piece in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A cop, identified by its index (0 or 1).
    Pursuer(usize),
    /// The robber.
    Evader,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Pursuer(idx) => write!(f, "pursuer {}", idx + 1),
            Role::Evader => write!(f, "evader"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Placement,
    Movement,
    Over,
}

/// How many pursuers chase the evader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PursuerCount {
    One,
    Two,
}

impl PursuerCount {
    pub fn get(self) -> usize {
        match self {
            PursuerCount::One => 1,
            PursuerCount::Two => 2,
        }
    }
}

impl TryFrom<usize> for PursuerCount {
    type Error = GameError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PursuerCount::One),
            2 => Ok(PursuerCount::Two),
            _ => Err(GameError::UnsupportedPursuerCount(value)),
        }
    }
}

/// Who places first at the start of a game.
///
/// The side that placed last does not move first: after
/// [`PursuersFirst`](PlacementOrder::PursuersFirst) placement the pursuers
/// open the movement phase, after [`EvaderFirst`](PlacementOrder::EvaderFirst)
/// placement the evader does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementOrder {
    /// Pursuer 1, pursuer 2, then the evader, one step each.
    PursuersFirst,
    /// The evader, then all pursuers in one combined step.
    EvaderFirst,
}

impl PlacementOrder {
    /// Two pursuers place one by one before the evader; a single pursuer is
    /// placed after the evader.
    pub fn default_for(count: PursuerCount) -> Self {
        match count {
            PursuerCount::One => PlacementOrder::EvaderFirst,
            PursuerCount::Two => PlacementOrder::PursuersFirst,
        }
    }
}

/// Whose turn it is, in detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Waiting for this pursuer to be placed.
    PlacingPursuer(usize),
    /// Waiting for all unplaced pursuers, which are placed by one controller.
    PlacingPursuers,
    PlacingEvader,
    /// Every pursuer moves once, in any order.
    PursuersMoving,
    EvaderMoving,
    Over,
}

impl Step {
    pub fn phase(self) -> Phase {
        match self {
            Step::PlacingPursuer(_) | Step::PlacingPursuers | Step::PlacingEvader => {
                Phase::Placement
            }
            Step::PursuersMoving | Step::EvaderMoving => Phase::Movement,
            Step::Over => Phase::Over,
        }
    }
}

/// Summarizes the outcome of a placement or move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game goes on with this step.
    Continue(Step),
    /// This pursuer now shares a cell with the evader.
    Captured { pursuer: usize },
}

/// The observable state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub step: Step,
    /// One entry per pursuer, `None` until placed.
    pub pursuers: Vec<Option<Cell>>,
    pub evader: Option<Cell>,
    /// Which pursuers have already moved in the current cops' turn.
    pub moved: Vec<bool>,
    /// The number of accepted moves (not placements) so far.
    pub moves: usize,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        self.step.phase()
    }

    /// Is `cell` held by any placed piece?
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.evader == Some(cell) || self.pursuers.contains(&Some(cell))
    }

    pub fn position(&self, role: Role) -> Option<Cell> {
        match role {
            Role::Pursuer(idx) => self.pursuers.get(idx).copied().flatten(),
            Role::Evader => self.evader,
        }
    }

    /// The index of the first pursuer sitting on the evader, if any.
    pub fn capturing_pursuer(&self) -> Option<usize> {
        let evader = self.evader?;
        self.pursuers.iter().position(|&p| p == Some(evader))
    }
}

/// A game of one or two pursuers against one evader on a fixed graph.
///
/// Every mutating method either succeeds, or returns an error and leaves
/// the game exactly as it was.
#[derive(Clone, Debug)]
pub struct PursuitGame {
    graph: GridGraph,
    order: PlacementOrder,
    state: GameState,
}

impl PursuitGame {
    /// Starts a game with the default placement order for this number of pursuers.
    pub fn new(graph: GridGraph, pursuers: PursuerCount) -> Self {
        Self::with_placement_order(graph, pursuers, PlacementOrder::default_for(pursuers))
    }

    pub fn with_placement_order(
        graph: GridGraph,
        pursuers: PursuerCount,
        order: PlacementOrder,
    ) -> Self {
        let count = pursuers.get();
        let mut state = GameState {
            step: Step::Over,
            pursuers: vec![None; count],
            evader: None,
            moved: vec![false; count],
            moves: 0,
        };
        state.step = next_placement_step(&state, order);
        Self {
            graph,
            order,
            state,
        }
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.step == Step::Over
    }

    pub fn placement_order(&self) -> PlacementOrder {
        self.order
    }

    pub fn pursuer_count(&self) -> usize {
        self.state.pursuers.len()
    }

    pub fn pursuer(&self, idx: usize) -> Option<Cell> {
        self.state.position(Role::Pursuer(idx))
    }

    pub fn evader(&self) -> Option<Cell> {
        self.state.evader
    }

    /// The role that [`Self::select_cell()`] acts for, or `None` once the game is over.
    pub fn current_role(&self) -> Option<Role> {
        match self.state.step {
            Step::PlacingPursuer(idx) => Some(Role::Pursuer(idx)),
            Step::PlacingPursuers => self.first_unplaced_pursuer().map(Role::Pursuer),
            Step::PlacingEvader | Step::EvaderMoving => Some(Role::Evader),
            Step::PursuersMoving => self.first_unmoved_pursuer().map(Role::Pursuer),
            Step::Over => None,
        }
    }

    /// The cells `role` could go to according to the placement and movement rules.
    ///
    /// During placement this is every unoccupied cell. During movement it is the
    /// piece's own cell plus its neighbors. Once the game is over it is empty.
    ///
    /// This does not take turn order into account; the set is the same whether
    /// or not it's currently `role`'s turn.
    pub fn legal_targets(&self, role: Role) -> BTreeSet<Cell> {
        match self.phase() {
            Phase::Placement => self
                .graph
                .nodes()
                .filter(|&cell| !self.state.is_occupied(cell))
                .collect(),
            Phase::Movement => match self.state.position(role) {
                Some(current) => {
                    let mut targets: BTreeSet<Cell> =
                        self.graph.member_neighbors(current).collect();
                    targets.insert(current);
                    targets
                }
                None => BTreeSet::new(),
            },
            Phase::Over => BTreeSet::new(),
        }
    }

    /// The single entry point for a human player: act for whoever's turn it is.
    ///
    /// During placement, this places the piece whose turn it is. During the
    /// cops' turn, it moves the first pursuer that hasn't moved yet.
    pub fn select_cell(&mut self, cell: Cell) -> Result<TurnOutcome, GameError> {
        match self.current_role() {
            None => Err(GameError::GameOver),
            Some(role) if self.phase() == Phase::Placement => self.place(role, cell),
            Some(Role::Pursuer(idx)) => self.move_pursuer(idx, cell),
            Some(Role::Evader) => self.move_evader(cell),
        }
    }

    /// Puts a piece on the board.
    pub fn place(&mut self, role: Role, cell: Cell) -> Result<TurnOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if let Role::Pursuer(idx) = role {
            if idx >= self.pursuer_count() {
                return Err(GameError::NoSuchPursuer(idx));
            }
        }
        if self.state.position(role).is_some() {
            return Err(GameError::AlreadyPlaced(role));
        }
        let is_turn = match (self.state.step, role) {
            (Step::PlacingPursuer(expected), Role::Pursuer(idx)) => expected == idx,
            (Step::PlacingPursuers, Role::Pursuer(_)) => true,
            (Step::PlacingEvader, Role::Evader) => true,
            _ => false,
        };
        if !is_turn {
            return Err(GameError::NotYourTurn(role));
        }
        if !self.graph.contains(cell) {
            return Err(GameError::NodeNotFound(cell));
        }
        if self.state.is_occupied(cell) {
            return Err(GameError::OccupiedCell(cell));
        }

        match role {
            Role::Pursuer(idx) => self.state.pursuers[idx] = Some(cell),
            Role::Evader => self.state.evader = Some(cell),
        }
        self.state.step = next_placement_step(&self.state, self.order);
        Ok(TurnOutcome::Continue(self.state.step))
    }

    /// Places all pursuers at once, pursuer `i` at `cells[i]`.
    ///
    /// Either all pursuers are placed or, on error, none are.
    pub fn place_pursuers(&mut self, cells: &[Cell]) -> Result<TurnOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if cells.len() != self.pursuer_count() {
            return Err(GameError::WrongPursuerCount {
                expected: self.pursuer_count(),
                given: cells.len(),
            });
        }
        let backup = self.state.clone();
        let mut outcome = TurnOutcome::Continue(self.state.step);
        for (idx, &cell) in cells.iter().enumerate() {
            match self.place(Role::Pursuer(idx), cell) {
                Ok(o) => outcome = o,
                Err(err) => {
                    self.state = backup;
                    return Err(err);
                }
            }
        }
        Ok(outcome)
    }

    /// Moves one pursuer during the cops' turn.
    pub fn move_pursuer(&mut self, idx: usize, cell: Cell) -> Result<TurnOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let role = Role::Pursuer(idx);
        let Some(from) = self.state.position(role) else {
            return Err(if idx >= self.pursuer_count() {
                GameError::NoSuchPursuer(idx)
            } else {
                GameError::NotYourTurn(role)
            });
        };
        if self.state.step != Step::PursuersMoving || self.state.moved[idx] {
            return Err(GameError::NotYourTurn(role));
        }
        self.check_move(role, from, cell)?;

        self.state.pursuers[idx] = Some(cell);
        self.state.moved[idx] = true;
        self.state.moves += 1;
        if let Some(outcome) = self.detect_capture() {
            return Ok(outcome);
        }
        if self.state.moved.iter().all(|&moved| moved) {
            self.state.moved.iter_mut().for_each(|moved| *moved = false);
            self.state.step = Step::EvaderMoving;
        }
        Ok(TurnOutcome::Continue(self.state.step))
    }

    /// Moves the evader during its turn.
    pub fn move_evader(&mut self, cell: Cell) -> Result<TurnOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let role = Role::Evader;
        if self.state.step != Step::EvaderMoving {
            return Err(GameError::NotYourTurn(role));
        }
        let Some(from) = self.state.evader else {
            return Err(GameError::NotYourTurn(role));
        };
        self.check_move(role, from, cell)?;

        self.state.evader = Some(cell);
        self.state.moves += 1;
        if let Some(outcome) = self.detect_capture() {
            return Ok(outcome);
        }
        self.state.step = Step::PursuersMoving;
        Ok(TurnOutcome::Continue(self.state.step))
    }

    fn check_move(&self, role: Role, from: Cell, to: Cell) -> Result<(), GameError> {
        let legal = from == to || (self.graph.contains(to) && from.is_orthogonal_to(to));
        if legal {
            Ok(())
        } else {
            Err(GameError::IllegalMove { role, from, to })
        }
    }

    fn detect_capture(&mut self) -> Option<TurnOutcome> {
        let pursuer = self.state.capturing_pursuer()?;
        self.state.step = Step::Over;
        Some(TurnOutcome::Captured { pursuer })
    }

    fn first_unplaced_pursuer(&self) -> Option<usize> {
        self.state.pursuers.iter().position(Option::is_none)
    }

    fn first_unmoved_pursuer(&self) -> Option<usize> {
        self.state.moved.iter().position(|&moved| !moved)
    }
}

// The placement step follows from which slots are filled, so it can never
// get out of sync with the placements themselves.
fn next_placement_step(state: &GameState, order: PlacementOrder) -> Step {
    let unplaced_pursuer = state.pursuers.iter().position(Option::is_none);
    match order {
        PlacementOrder::PursuersFirst => match (unplaced_pursuer, state.evader) {
            (Some(idx), _) => Step::PlacingPursuer(idx),
            (None, None) => Step::PlacingEvader,
            (None, Some(_)) => Step::PursuersMoving,
        },
        PlacementOrder::EvaderFirst => match (state.evader, unplaced_pursuer) {
            (None, _) => Step::PlacingEvader,
            (Some(_), Some(_)) => Step::PlacingPursuers,
            (Some(_), None) => Step::EvaderMoving,
        },
    }
}
