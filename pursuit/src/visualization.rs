use crate::{Cell, GridGraph, Snapshot};

/// Draws a game as text, one character per cell.
///
/// `·` is a cell of the region, a blank is a hole, digits are the pursuers,
/// `E` is the evader and `X` marks a capture. Legal targets of the player to
/// move are drawn as `+`.
pub fn visualize_snapshot(snapshot: &Snapshot) -> String {
    draw_grid(snapshot.rows, snapshot.cols, |cell| {
        let pursuer = snapshot.pursuers.iter().position(|&p| p == Some(cell));
        match (pursuer, snapshot.evader == Some(cell)) {
            (Some(_), true) => 'X',
            (Some(idx), false) => char::from_digit(idx as u32 + 1, 10).unwrap_or('P'),
            (None, true) => 'E',
            (None, false) if snapshot.legal_targets.contains(&cell) => '+',
            (None, false) if snapshot.nodes.binary_search(&cell).is_ok() => '·',
            (None, false) => ' ',
        }
    })
}

/// Draws a region, with the `marked` cells (e.g. removable ones) drawn as `+`.
pub fn visualize_graph(graph: &GridGraph, marked: &[Cell]) -> String {
    draw_grid(graph.rows(), graph.cols(), |cell| {
        if marked.contains(&cell) {
            '+'
        } else if graph.contains(cell) {
            '·'
        } else {
            ' '
        }
    })
}

fn draw_grid(rows: usize, cols: usize, glyph: impl Fn(Cell) -> char) -> String {
    // Draw the column indices and the top of the box
    let mut result = String::from("     ");
    for col in 0..cols {
        result += &format!("{} ", col % 10);
    }
    result += "\n    ╭";
    for _ in 0..cols {
        result += "──";
    }
    result += "─╮\n";

    for row in 0..rows as i32 {
        result += &format!("{:>3} │ ", row);
        for col in 0..cols as i32 {
            result.push(glyph(Cell::new(row, col)));
            result.push(' ');
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..cols {
        result += "──";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PursuerCount, PursuitGame};

    #[test]
    fn draws_holes_and_pieces() {
        let mut graph = GridGraph::build(2, 3).unwrap();
        graph.remove(Cell::new(1, 1)).unwrap();
        let mut game = PursuitGame::new(graph, PursuerCount::One);
        game.select_cell(Cell::new(1, 2)).unwrap();
        game.select_cell(Cell::new(0, 0)).unwrap();
        let expected = [
            "     0 1 2 ",
            "    ╭───────╮",
            "  0 │ 1 · + │",
            "  1 │ ·   E │",
            "    ╰───────╯",
        ]
        .join("\n");
        assert_eq!(visualize_snapshot(&game.snapshot()), expected);
    }

    #[test]
    fn draws_marked_cells() {
        let graph = GridGraph::build(1, 2).unwrap();
        let drawing = visualize_graph(&graph, &[Cell::new(0, 1)]);
        assert!(drawing.contains("│ · + │"));
    }
}
