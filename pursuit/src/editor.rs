use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Cell, EditError, GraphError, GridGraph};

/// Does `cell` lack at least one of its four orthogonal neighbors?
pub fn is_border_node(graph: &GridGraph, cell: Cell) -> Result<bool, EditError> {
    if !graph.contains(cell) {
        return Err(EditError::NodeNotFound(cell));
    }
    Ok(cell
        .orthogonal_offsets()
        .into_iter()
        .any(|other| !graph.contains(other)))
}

/// Would the graph have the same number of components without `cell`?
///
/// This is checked by removing the cell from a scratch copy of the graph.
/// Removing an articulation point or the very last node is not safe.
pub fn is_removal_safe(graph: &GridGraph, cell: Cell) -> Result<bool, EditError> {
    let mut scratch = graph.clone();
    scratch
        .remove(cell)
        .map_err(|_| EditError::NodeNotFound(cell))?;
    Ok(!scratch.is_empty() && scratch.component_count() == graph.component_count())
}

/// Removes `cell` if it is on the border and removing it keeps the graph connected.
///
/// If an error is returned, the graph is unmodified. Each call re-checks
/// connectivity from scratch: two cells that are each safe to remove may
/// not be safe to remove together.
pub fn try_remove(graph: &mut GridGraph, cell: Cell) -> Result<(), EditError> {
    if !is_border_node(graph, cell)? {
        return Err(EditError::NotBorderNode(cell));
    }
    if !is_removal_safe(graph, cell)? {
        return Err(EditError::WouldDisconnect(cell));
    }
    graph
        .remove(cell)
        .map_err(|_| EditError::NodeNotFound(cell))
}

/// Owns a graph while the user shapes it, and hands it over for playing.
#[derive(Clone, Debug)]
pub struct GraphEditor {
    graph: GridGraph,
}

impl GraphEditor {
    /// Starts editing the full `rows` x `cols` rectangle.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GraphError> {
        Ok(Self {
            graph: GridGraph::build(rows, cols)?,
        })
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    /// The user picked a cell: remove it if that is allowed.
    pub fn select_cell(&mut self, cell: Cell) -> Result<(), EditError> {
        try_remove(&mut self.graph, cell)
    }

    /// The cells that [`Self::select_cell()`] would currently accept.
    pub fn removable_cells(&self) -> Vec<Cell> {
        self.graph
            .nodes()
            .filter(|&cell| {
                matches!(is_border_node(&self.graph, cell), Ok(true))
                    && matches!(is_removal_safe(&self.graph, cell), Ok(true))
            })
            .collect()
    }

    /// Removes up to `count` cells, each chosen uniformly among the removable cells
    /// at that moment.
    ///
    /// Returns how many cells were removed, which is less than `count` only if
    /// no removable cell was left.
    pub fn erode_randomly<R: Rng>(&mut self, rng: &mut R, count: usize) -> usize {
        for removed in 0..count {
            let candidates = self.removable_cells();
            let Some(&cell) = candidates.choose(rng) else {
                return removed;
            };
            // Can't fail, the candidate was just checked
            let _ = try_remove(&mut self.graph, cell);
        }
        count
    }

    /// Stops editing and gives up the graph.
    pub fn finish(self) -> GridGraph {
        self.graph
    }
}
