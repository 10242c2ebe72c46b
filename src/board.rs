//! A 3x3 tic-tac-toe grid with incremental win detection.
//!
//! [`SubBoard`] is used twice: once per cell grid of the big board, and once as
//! the meta-board that records which sub-boards have been decided.
//!
//! Every row, column and diagonal keeps a running signed sum of the marks on
//! it (`+1` for [`Player::Me`], `-1` for [`Player::Opponent`]). A line is won
//! exactly when its sum reaches `+3` or `-3`, so a move can be checked for a win
//! by looking only at the lines through the cell it occupies.

use std::fmt;

use crate::constants::{N, WIN_SUM};

/// One of the two sides. An empty cell is `None` in an `Option<Player>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// The side the engine plays for (the maximizing side).
    Me,
    /// The other side (the minimizing side).
    Opponent,
}

impl Player {
    /// Signed unit increment this player adds to a line sum.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Player::Me => 1,
            Player::Opponent => -1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Me => Player::Opponent,
            Player::Opponent => Player::Me,
        }
    }

    /// Diagram symbol: `X` for me, `O` for the opponent.
    pub fn symbol(self) -> char {
        match self {
            Player::Me => 'X',
            Player::Opponent => 'O',
        }
    }

    /// Parse a diagram symbol. `.` and anything else is not a player.
    pub fn from_symbol(c: char) -> Option<Player> {
        match c {
            'X' | 'x' => Some(Player::Me),
            'O' | 'o' => Some(Player::Opponent),
            _ => None,
        }
    }
}

/// A 3x3 grid with cached line sums.
///
/// Cells are indexed `[x][y]` with `x` the column and `y` the row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubBoard {
    owner: [[Option<Player>; N]; N],
    columns: [i8; N],
    rows: [i8; N],
    /// `[0]` is the main diagonal (x == y), `[1]` the anti-diagonal (x + y == 2).
    diagonals: [i8; 2],
}

impl SubBoard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn is_win(sum: i8) -> bool {
        sum == WIN_SUM || sum == -WIN_SUM
    }

    /// Mark cell `(x, y)` for `player`.
    ///
    /// Returns `true` if any line through the cell is now complete. The cell
    /// must be empty; this is only checked in debug builds.
    pub fn apply(&mut self, x: usize, y: usize, player: Player) -> bool {
        debug_assert!(self.owner[x][y].is_none(), "cell ({x}, {y}) already taken");
        self.owner[x][y] = Some(player);
        let d = player.sign();

        let mut win = false;

        self.columns[x] += d;
        win |= Self::is_win(self.columns[x]);

        self.rows[y] += d;
        win |= Self::is_win(self.rows[y]);

        if x == y {
            self.diagonals[0] += d;
            win |= Self::is_win(self.diagonals[0]);
        }

        if x + y == N - 1 {
            self.diagonals[1] += d;
            win |= Self::is_win(self.diagonals[1]);
        }

        win
    }

    /// Exact inverse of [`SubBoard::apply`] for the same `(x, y, player)`.
    pub fn undo(&mut self, x: usize, y: usize, player: Player) {
        debug_assert_eq!(self.owner[x][y], Some(player), "undo of a move never applied");
        self.owner[x][y] = None;
        let d = player.sign();

        self.columns[x] -= d;
        self.rows[y] -= d;

        if x == y {
            self.diagonals[0] -= d;
        }

        if x + y == N - 1 {
            self.diagonals[1] -= d;
        }
    }

    /// Owner of cell `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Player> {
        self.owner[x][y]
    }

    #[inline]
    pub fn is_taken(&self, x: usize, y: usize) -> bool {
        self.owner[x][y].is_some()
    }

    /// Number of occupied cells.
    pub fn count_taken(&self) -> usize {
        self.owner.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.count_taken() == N * N
    }

    /// Empty cells, outer loop over `x`, inner over `y`.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.owner.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_none())
                .map(move |(y, _)| (x, y))
        })
    }

    /// Replace the contents of `out` with the empty cells, in
    /// [`SubBoard::empty_cells`] order.
    ///
    /// Returns the number of cells written, at most 9.
    pub fn legal_moves(&self, out: &mut Vec<(usize, usize)>) -> usize {
        out.clear();
        out.extend(self.empty_cells());
        out.len()
    }

    /// All eight cached line sums: columns, rows, then diagonals.
    pub fn line_sums(&self) -> impl Iterator<Item = i8> + '_ {
        self.columns
            .iter()
            .chain(self.rows.iter())
            .chain(self.diagonals.iter())
            .copied()
    }

    /// The player owning a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.line_sums().find_map(|s| match s {
            WIN_SUM => Some(Player::Me),
            s if s == -WIN_SUM => Some(Player::Opponent),
            _ => None,
        })
    }
}

impl fmt::Display for SubBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let ch = self.owner[x][y].map_or('.', Player::symbol);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
