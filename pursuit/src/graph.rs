use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{Cell, GraphError};

/// The largest number of rows or columns a grid may be built with.
pub const MAX_DIMENSION: usize = 100;

/// An undirected graph over grid cells with 4-neighbor adjacency.
///
/// Only the node set is stored. Two cells are connected by an edge iff
/// both are members and they are orthogonally adjacent, so removing a node
/// implicitly removes all of its edges.
///
/// After it is built, a graph only ever shrinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    /// The dimensions the graph was built with. All nodes lie in `0..rows` x `0..cols`.
    rows: usize,
    cols: usize,
    nodes: BTreeSet<Cell>,
}

impl GridGraph {
    /// Creates the full `rows` x `cols` grid.
    pub fn build(rows: usize, cols: usize) -> Result<Self, GraphError> {
        if !(1..=MAX_DIMENSION).contains(&rows) || !(1..=MAX_DIMENSION).contains(&cols) {
            return Err(GraphError::InvalidDimensions { rows, cols });
        }
        let mut nodes = BTreeSet::new();
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                nodes.insert(Cell::new(row, col));
            }
        }
        Ok(Self { rows, cols, nodes })
    }

    /// The number of rows the graph was built with.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns the graph was built with.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.nodes.contains(&cell)
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = Cell> + '_ {
        self.nodes.iter().copied()
    }

    /// Every undirected edge exactly once, as `(cell, cell below)` or `(cell, cell to the right)`.
    pub fn edges(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.nodes.iter().flat_map(move |&cell| {
            [cell.down(), cell.right()]
                .into_iter()
                .filter(move |&other| self.contains(other))
                .map(move |other| (cell, other))
        })
    }

    /// The neighbors of `cell`, in the order up, down, left, right.
    pub fn neighbors(&self, cell: Cell) -> Result<Vec<Cell>, GraphError> {
        self.check_node(cell)?;
        Ok(self.member_neighbors(cell).collect())
    }

    /// Removes a node and its edges.
    ///
    /// Removing a cell that is not in the graph is an error and leaves the
    /// graph unchanged. This does not check connectivity; see
    /// [`try_remove()`](crate::try_remove) for that.
    pub fn remove(&mut self, cell: Cell) -> Result<(), GraphError> {
        if self.nodes.remove(&cell) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(cell))
        }
    }

    /// Partitions the nodes into maximal connected subsets.
    ///
    /// The components are ordered by their smallest cell.
    pub fn connected_components(&self) -> Vec<BTreeSet<Cell>> {
        let mut components = Vec::new();
        let mut unvisited = self.nodes.clone();
        while let Some(start) = unvisited.pop_first() {
            let mut component = BTreeSet::from([start]);
            let mut queue = VecDeque::from([start]);
            while let Some(cell) = queue.pop_front() {
                for next in self.member_neighbors(cell) {
                    if unvisited.remove(&next) {
                        component.insert(next);
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    pub fn component_count(&self) -> usize {
        self.connected_components().len()
    }

    /// Breadth-first distances from `source` to every node reachable from it.
    pub fn distances_from(&self, source: Cell) -> Result<BTreeMap<Cell, usize>, GraphError> {
        self.check_node(source)?;
        let mut distances = BTreeMap::from([(source, 0)]);
        let mut queue = VecDeque::from([source]);
        while let Some(cell) = queue.pop_front() {
            let base = distances[&cell];
            for next in self.member_neighbors(cell) {
                distances.entry(next).or_insert_with(|| {
                    queue.push_back(next);
                    base + 1
                });
            }
        }
        Ok(distances)
    }

    /// A shortest path from `from` to `to`, including both endpoints.
    ///
    /// Among several shortest paths, the one found first by a breadth-first
    /// search that expands neighbors in the order up, down, left, right is
    /// returned, so the result is deterministic.
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Result<Vec<Cell>, GraphError> {
        self.check_node(from)?;
        self.check_node(to)?;
        let mut predecessors: BTreeMap<Cell, Cell> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);
        let mut found = from == to;
        while let Some(cell) = queue.pop_front() {
            if found {
                break;
            }
            for next in self.member_neighbors(cell) {
                if next == from || predecessors.contains_key(&next) {
                    continue;
                }
                predecessors.insert(next, cell);
                if next == to {
                    found = true;
                    break;
                }
                queue.push_back(next);
            }
        }
        if !found {
            return Err(GraphError::Unreachable { from, to });
        }

        // Walk back from the destination
        let mut path = vec![to];
        let mut cursor = to;
        while cursor != from {
            cursor = predecessors[&cursor];
            path.push(cursor);
        }
        path.reverse();
        Ok(path)
    }

    /// The number of edges on a shortest path between the two cells.
    pub fn shortest_path_length(&self, from: Cell, to: Cell) -> Result<usize, GraphError> {
        Ok(self.shortest_path(from, to)?.len() - 1)
    }

    /// The largest column index of any node, or `None` if the graph is empty.
    pub fn rightmost_column(&self) -> Option<i32> {
        self.nodes.iter().map(|cell| cell.col).max()
    }

    pub(crate) fn check_node(&self, cell: Cell) -> Result<(), GraphError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(cell))
        }
    }

    // Neighbors without the membership check for `cell` itself.
    pub(crate) fn member_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.orthogonal_offsets()
            .into_iter()
            .filter(move |&other| self.contains(other))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::GridWithHoles;

    #[test]
    fn build_rejects_bad_dimensions() {
        assert_eq!(
            GridGraph::build(0, 3),
            Err(GraphError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert!(GridGraph::build(MAX_DIMENSION + 1, 1).is_err());
        assert!(GridGraph::build(MAX_DIMENSION, 1).is_ok());
    }

    #[test]
    fn full_grid_has_all_nodes_and_edges() {
        let graph = GridGraph::build(3, 4).unwrap();
        assert_eq!(graph.len(), 12);
        // 3 rows of 3 horizontal edges, 4 columns of 2 vertical edges
        assert_eq!(graph.edges().count(), 3 * 3 + 4 * 2);
        assert_eq!(graph.component_count(), 1);
    }

    #[test]
    fn neighbors_in_fixed_order() {
        let graph = GridGraph::build(3, 3).unwrap();
        assert_eq!(
            graph.neighbors(Cell::new(1, 1)).unwrap(),
            vec![Cell::new(0, 1), Cell::new(2, 1), Cell::new(1, 0), Cell::new(1, 2)]
        );
        assert_eq!(
            graph.neighbors(Cell::new(0, 0)).unwrap(),
            vec![Cell::new(1, 0), Cell::new(0, 1)]
        );
        assert_eq!(
            graph.neighbors(Cell::new(5, 5)),
            Err(GraphError::NodeNotFound(Cell::new(5, 5)))
        );
    }

    #[test]
    fn remove_drops_edges() {
        let mut graph = GridGraph::build(2, 2).unwrap();
        graph.remove(Cell::new(0, 0)).unwrap();
        assert!(!graph.contains(Cell::new(0, 0)));
        assert_eq!(graph.neighbors(Cell::new(0, 1)).unwrap(), vec![Cell::new(1, 1)]);
        assert_eq!(graph.edges().count(), 2);
        assert_eq!(
            graph.remove(Cell::new(0, 0)),
            Err(GraphError::NodeNotFound(Cell::new(0, 0)))
        );
    }

    #[test]
    fn components_after_cut() {
        let mut graph = GridGraph::build(3, 3).unwrap();
        for row in 0..3 {
            graph.remove(Cell::new(row, 1)).unwrap();
        }
        let components = graph.connected_components();
        assert_eq!(components.len(), 2);
        assert!(components[0].contains(&Cell::new(0, 0)));
        assert!(components[1].contains(&Cell::new(2, 2)));
        assert_eq!(
            graph.shortest_path(Cell::new(0, 0), Cell::new(0, 2)),
            Err(GraphError::Unreachable {
                from: Cell::new(0, 0),
                to: Cell::new(0, 2)
            })
        );
    }

    #[test]
    fn shortest_path_is_deterministic() {
        let graph = GridGraph::build(3, 3).unwrap();
        let path = graph.shortest_path(Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        // Expanding "down" before "right" walks the first column first
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2)
            ]
        );
        assert_eq!(graph.shortest_path(Cell::new(1, 1), Cell::new(1, 1)).unwrap(), vec![Cell::new(1, 1)]);
        assert_eq!(graph.shortest_path_length(Cell::new(0, 0), Cell::new(2, 2)), Ok(4));
    }

    #[test]
    fn path_around_a_hole() {
        let mut graph = GridGraph::build(3, 3).unwrap();
        graph.remove(Cell::new(0, 1)).unwrap();
        graph.remove(Cell::new(1, 1)).unwrap();
        assert_eq!(graph.shortest_path_length(Cell::new(0, 0), Cell::new(0, 2)), Ok(6));
        assert_eq!(
            graph.shortest_path_length(Cell::new(0, 0), Cell::new(0, 1)),
            Err(GraphError::NodeNotFound(Cell::new(0, 1)))
        );
    }

    quickcheck! {
        fn path_length_matches_distances(input: GridWithHoles) -> bool {
            let graph = input.graph;
            let Some(source) = graph.nodes().next() else { return true };
            let distances = graph.distances_from(source).unwrap();
            let ok = graph.nodes().all(|cell| {
                let path = graph.shortest_path(source, cell).unwrap();
                let steps_are_edges = path.windows(2).all(|w| w[0].is_orthogonal_to(w[1]) && graph.contains(w[1]));
                steps_are_edges && path.len() - 1 == distances[&cell]
            });
            ok
        }
    }
}
