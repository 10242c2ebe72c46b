//! Connect-three on a 10x10 grid, without gravity.
//!
//! Any empty cell may be marked; every run of three equal marks in a row,
//! column or diagonal scores a point. The bot here does no search: it scores
//! each candidate placement with a one-ply heuristic and takes the first best.
//!
//! The heuristic for a candidate cell is
//! - [`C3_TRIPLE_WEIGHT`] per triple the placement would complete for me, plus
//!   the same per triple it would deny the opponent,
//! - [`C3_OWN_NEIGHBOR`] per neighbouring own mark and [`C3_OPPONENT_NEIGHBOR`]
//!   per neighbouring opponent mark,
//! - minus [`C3_SIDE_PENALTY`] per neighbouring column past the left or right
//!   edge and [`C3_EDGE_PENALTY`] per neighbouring row past the top or bottom.
//!
//! It talks the same referee protocol as the main bot (see
//! [`crate::protocol`]) on a 10x10 grid.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::board::Player;
use crate::constants::{
    C3_EDGE_PENALTY, C3_N, C3_OPPONENT_NEIGHBOR, C3_OWN_NEIGHBOR, C3_SIDE_PENALTY,
    C3_TRIPLE_WEIGHT,
};
use crate::error::{Error, Result};
use crate::protocol::{TokenReader, check_coord};

/// A cell `(x, y)`: `x` is the column, `y` the row.
pub type Cell = (usize, usize);

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// The connect-three grid with running triple counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Player>; C3_N]; C3_N],
    /// Triples scored so far, indexed `[me, opponent]`.
    scores: [usize; 2],
}

fn score_index(player: Player) -> usize {
    match player {
        Player::Me => 0,
        Player::Opponent => 1,
    }
}

fn offset(cell: Cell, dx: isize, dy: isize) -> Option<Cell> {
    let x = cell.0.checked_add_signed(dx)?;
    let y = cell.1.checked_add_signed(dy)?;
    (x < C3_N && y < C3_N).then_some((x, y))
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, (x, y): Cell) -> Option<Player> {
        self.cells[x][y]
    }

    /// Triples scored so far by `player`.
    pub fn score(&self, player: Player) -> usize {
        self.scores[score_index(player)]
    }

    /// Empty cells, column by column.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..C3_N)
            .flat_map(|x| (0..C3_N).map(move |y| (x, y)))
            .filter(|&cell| self.get(cell).is_none())
    }

    /// Number of triples through `cell` that would be all `player` if `cell`
    /// were marked for `player`.
    pub fn triples_through(&self, cell: Cell, player: Player) -> usize {
        let owned = |c: Cell| c == cell || self.get(c) == Some(player);

        let mut count = 0;
        for (dx, dy) in DIRECTIONS {
            // The window starts `k` steps before `cell`.
            for k in 0..3isize {
                let Some(start) = offset(cell, -k * dx, -k * dy) else {
                    continue;
                };
                let window = [Some(start), offset(start, dx, dy), offset(start, 2 * dx, 2 * dy)];
                if window.iter().all(|c| c.is_some_and(owned)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Mark `cell` for `player` and return the number of triples it scored.
    pub fn place(&mut self, cell: Cell, player: Player) -> usize {
        debug_assert!(self.get(cell).is_none(), "cell {cell:?} already taken");
        let scored = self.triples_through(cell, player);
        self.cells[cell.0][cell.1] = Some(player);
        self.scores[score_index(player)] += scored;
        scored
    }

    /// Heuristic value of marking `cell` for me.
    pub fn heuristic(&self, cell: Cell) -> f64 {
        let triples =
            self.triples_through(cell, Player::Me) + self.triples_through(cell, Player::Opponent);
        let mut score = C3_TRIPLE_WEIGHT * triples as f64;

        for dx in -1..=1isize {
            if offset(cell, dx, 0).is_none() {
                score -= C3_SIDE_PENALTY;
                continue;
            }
            for dy in -1..=1isize {
                let Some(neighbor) = offset(cell, dx, dy) else {
                    score -= C3_EDGE_PENALTY;
                    continue;
                };
                if neighbor == cell {
                    continue;
                }
                match self.get(neighbor) {
                    Some(Player::Me) => score += C3_OWN_NEIGHBOR,
                    Some(Player::Opponent) => score += C3_OPPONENT_NEIGHBOR,
                    None => {}
                }
            }
        }

        score
    }

    /// The first candidate with the strictly highest heuristic.
    pub fn pick_move(&self, candidates: &[Cell]) -> Option<Cell> {
        let mut best = *candidates.first()?;
        let mut best_score = f64::NEG_INFINITY;
        for &cell in candidates {
            let score = self.heuristic(cell);
            if score > best_score {
                best = cell;
                best_score = score;
            }
        }
        debug!("picked {best:?} scoring {best_score}");
        Some(best)
    }
}

/// Run the connect-three protocol loop until input ends.
///
/// Coordinates on the wire are `row col`. Returns the number of turns played.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<usize> {
    let mut reader = TokenReader::new(input);
    let mut grid = Grid::new();
    let mut candidates = Vec::with_capacity(C3_N * C3_N);
    let mut turns = 0;

    loop {
        let Some(row) = reader.try_int("opponent row")? else {
            break;
        };
        let col = reader.int("opponent column")?;
        if !(row == -1 && col == -1) {
            let (row, col) = check_coord(row, col, C3_N)?;
            if grid.get((col, row)).is_some() {
                return Err(Error::Occupied { row, col });
            }
            grid.place((col, row), Player::Opponent);
        }

        let count = reader.int("legal move count")?;
        candidates.clear();
        for _ in 0..count {
            if let Some((row, col)) = reader.coord(C3_N, "legal move")? {
                candidates.push((col, row));
            }
        }

        let (x, y) = grid.pick_move(&candidates).ok_or(Error::NoLegalMoves)?;
        grid.place((x, y), Player::Me);
        debug!(
            me = grid.score(Player::Me),
            opponent = grid.score(Player::Opponent),
            "scores after turn {}",
            turns + 1
        );

        writeln!(output, "{y} {x}")?;
        output.flush()?;
        turns += 1;
    }

    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triples_through() {
        let mut grid = Grid::new();
        grid.place((3, 3), Player::Me);
        grid.place((4, 3), Player::Me);
        assert_eq!(grid.triples_through((5, 3), Player::Me), 1);
        assert_eq!(grid.triples_through((2, 3), Player::Me), 1);
        assert_eq!(grid.triples_through((5, 3), Player::Opponent), 0);

        grid.place((6, 3), Player::Me);
        // Completes 3-4-5 and 4-5-6.
        assert_eq!(grid.place((5, 3), Player::Me), 2);
        assert_eq!(grid.score(Player::Me), 2);
    }

    #[test]
    fn test_anti_diagonal_at_edge() {
        let mut grid = Grid::new();
        grid.place((0, 2), Player::Opponent);
        grid.place((1, 1), Player::Opponent);
        assert_eq!(grid.triples_through((2, 0), Player::Opponent), 1);
    }

    #[test]
    fn test_corner_penalty() {
        let grid = Grid::new();
        // One column past the edge (-3) and two rows past the edge (-1 each).
        assert_eq!(grid.heuristic((0, 0)), -5.0);
        assert_eq!(grid.heuristic((5, 5)), 0.0);
    }

    #[test]
    fn test_blocks_opponent_triple() {
        let mut grid = Grid::new();
        grid.place((5, 5), Player::Opponent);
        grid.place((5, 6), Player::Opponent);
        let pick = grid.pick_move(&[(1, 1), (5, 7), (8, 8)]);
        assert_eq!(pick, Some((5, 7)));
    }

    #[test]
    fn test_pick_move_empty() {
        assert_eq!(Grid::new().pick_move(&[]), None);
    }

    #[test]
    fn test_protocol_turn() {
        let input = "4 5\n3\n0 0\n5 5\n9 9\n";
        let mut output = Vec::new();
        assert_eq!(run(input.as_bytes(), &mut output).unwrap(), 1);
        // (5, 5) neighbours the opponent's mark at row 4, column 5.
        assert_eq!(String::from_utf8(output).unwrap(), "5 5\n");
    }
}
