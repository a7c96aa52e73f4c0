use crate::{Cell, GraphError, GridGraph};

/// A maximal run of vertically connected cells in one column.
///
/// This is a view derived from a graph at one point in time. It does not
/// borrow the graph, so after the graph changes it must be recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnPath {
    /// Sorted by row, never empty.
    cells: Vec<Cell>,
}

impl ColumnPath {
    /// The column path through `seed`, extended up and down as far as the graph goes.
    pub fn through(graph: &GridGraph, seed: Cell) -> Result<Self, GraphError> {
        graph.check_node(seed)?;
        let mut top = seed;
        while graph.contains(top.up()) {
            top = top.up();
        }
        let mut cells = vec![top];
        let mut cursor = top;
        while graph.contains(cursor.down()) {
            cursor = cursor.down();
            cells.push(cursor);
        }
        Ok(Self { cells })
    }

    pub fn column(&self) -> i32 {
        self.cells[0].col
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a column path contains at least its seed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col == self.column()
            && cell.row >= self.cells[0].row
            && cell.row <= self.cells[self.cells.len() - 1].row
    }

    /// The cell at index `len / 2`.
    pub fn middle(&self) -> Cell {
        self.cells[self.cells.len() / 2]
    }

    /// Cells of this path that have an edge into column `col`, paired with
    /// their neighbor in that column.
    pub fn edges_into_column<'a>(
        &'a self,
        graph: &'a GridGraph,
        col: i32,
    ) -> impl Iterator<Item = (Cell, Cell)> + 'a {
        let offset = col - self.column();
        self.cells
            .iter()
            .filter(move |_| offset.abs() == 1)
            .map(move |&cell| (cell, Cell::new(cell.row, col)))
            .filter(move |&(_, other)| graph.contains(other))
    }
}

impl GridGraph {
    /// Shorthand for [`ColumnPath::through()`].
    pub fn column_path(&self, seed: Cell) -> Result<ColumnPath, GraphError> {
        ColumnPath::through(self, seed)
    }
}
