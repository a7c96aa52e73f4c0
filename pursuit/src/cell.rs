use serde::{Deserialize, Serialize};

/// A grid coordinate, which doubles as the identity of a graph node.
///
/// Cells are ordered row-major (by row, then by column). This order is used
/// everywhere a deterministic iteration order is needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn up(self) -> Self {
        Self::new(self.row - 1, self.col)
    }

    pub fn down(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    pub fn left(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    pub fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    /// The four orthogonal positions around this cell, whether or not they
    /// belong to any graph.
    ///
    /// The order (up, down, left, right) is fixed, and is the order in which
    /// breadth-first searches expand their frontier.
    pub fn orthogonal_offsets(self) -> [Cell; 4] {
        [self.up(), self.down(), self.left(), self.right()]
    }

    /// Whether the two cells differ by exactly one unit step in one axis.
    pub fn is_orthogonal_to(self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn offsets_are_orthogonal() {
        let center = Cell::new(3, -2);
        for offset in center.orthogonal_offsets() {
            assert!(center.is_orthogonal_to(offset));
        }
        assert!(!center.is_orthogonal_to(center));
        assert!(!center.is_orthogonal_to(Cell::new(4, -1)));
    }
}
