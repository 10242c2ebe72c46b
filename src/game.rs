//! Full Ultimate Tic-Tac-Toe game state.
//!
//! A [`Game`] is a 3x3 grid of [`SubBoard`]s plus a meta-board (also a
//! `SubBoard`) whose cells record which sub-boards have been won. Moves are
//! applied and undone in place; the search never copies a `Game`.
//!
//! Move legality follows the "send" rule: the cell a player marks names the
//! sub-board the opponent must play in next. If that sub-board is already
//! decided, the opponent may play in any undecided sub-board.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::board::{Player, SubBoard};
use crate::codec::Move;
use crate::constants::{GLOBAL_N, MAX_MOVES, N};
use crate::error::{Error, Result};

/// What applying a move changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The move completed a line of sub-boards on the meta-board.
    pub game_won: bool,
    /// The move decided its sub-board. Needed to undo the meta-board mark.
    pub board_won: bool,
}

/// The whole board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Game {
    /// Sub-boards indexed `[a][b]`, `a` the column and `b` the row.
    boards: [[SubBoard; N]; N],
    /// Meta-board: cell `(a, b)` is owned by the winner of sub-board `(a, b)`.
    winners: SubBoard,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a position from a 9x9 text diagram.
    ///
    /// Each of the nine rows holds nine cells: `X` for [`Player::Me`], `O` for
    /// [`Player::Opponent`] and `.` for empty. Whitespace and `|` are ignored,
    /// and lines made only of `-` and `+` are skipped, so the output of
    /// [`Game`]'s `Display` impl parses back to the same position.
    ///
    /// Marks are placed in row-major order through [`Game::apply`], so line sums
    /// and the meta-board are always consistent.
    pub fn from_diagram(diagram: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace() && *c != '|')
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty() && !cells.iter().all(|&c| matches!(c, '-' | '+')))
            .collect();

        if rows.len() != GLOBAL_N {
            return Err(Error::InvalidDiagramRows {
                expected: GLOBAL_N,
                got: rows.len(),
            });
        }

        let mut game = Game::new();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != GLOBAL_N {
                return Err(Error::InvalidDiagramRow {
                    row,
                    expected: GLOBAL_N,
                    got: cells.len(),
                });
            }
            for (col, &c) in cells.iter().enumerate() {
                if c == '.' {
                    continue;
                }
                let player = Player::from_symbol(c).ok_or(Error::InvalidDiagramCell {
                    character: c,
                    row,
                    col,
                })?;
                game.apply(Move::from_global(row, col), player);
            }
        }
        Ok(game)
    }

    /// Sub-board `(a, b)`.
    #[inline]
    pub fn board(&self, a: usize, b: usize) -> &SubBoard {
        &self.boards[a][b]
    }

    /// The meta-board of decided sub-boards.
    #[inline]
    pub fn winners(&self) -> &SubBoard {
        &self.winners
    }

    /// Whether sub-board `(a, b)` has been won.
    #[inline]
    pub fn is_decided(&self, a: usize, b: usize) -> bool {
        self.winners.is_taken(a, b)
    }

    /// Owner of the cell a move would occupy.
    pub fn get(&self, mv: Move) -> Option<Player> {
        let (a, b, x, y) = mv.decode();
        self.boards[a][b].get(x, y)
    }

    /// The player who has won the whole game, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winners.winner()
    }

    /// Mark `mv` for `player`.
    ///
    /// If the move wins its sub-board, the meta-board is marked too, and
    /// `game_won` reports whether that completed a meta-board line. A sub-board
    /// that already has a winner keeps it. The target cell must be empty.
    pub fn apply(&mut self, mv: Move, player: Player) -> Outcome {
        let (a, b, x, y) = mv.decode();
        let board_won = self.boards[a][b].apply(x, y, player) && !self.winners.is_taken(a, b);

        let mut game_won = false;
        if board_won {
            game_won = self.winners.apply(a, b, player);
        }

        Outcome { game_won, board_won }
    }

    /// Inverse of [`Game::apply`]. `board_won` must be the value `apply`
    /// returned for this move.
    pub fn undo(&mut self, mv: Move, player: Player, board_won: bool) {
        let (a, b, x, y) = mv.decode();
        self.boards[a][b].undo(x, y, player);

        if board_won {
            self.winners.undo(a, b, player);
        }
    }

    /// Apply `mv` and return a guard that undoes it when dropped.
    ///
    /// The guard dereferences to the game, so the search can recurse through
    /// it; every exit path (including early returns) restores the position.
    pub fn play(&mut self, mv: Move, player: Player) -> Applied<'_> {
        let outcome = self.apply(mv, player);
        Applied {
            game: self,
            mv,
            player,
            outcome,
        }
    }

    /// Replace the contents of `out` with the legal moves after a move into
    /// cell `last`, or with every move in an undecided sub-board when `last` is
    /// `None` (first move of the game).
    ///
    /// Moves are ordered sub-board first, then cell, each in
    /// [`SubBoard::empty_cells`] order. Returns the number written, at most 81.
    pub fn legal_moves_from(&self, last: Option<(usize, usize)>, out: &mut Vec<Move>) -> usize {
        out.clear();
        match last {
            Some((a, b)) if !self.winners.is_taken(a, b) => self.push_board_moves(a, b, out),
            _ => {
                for (a, b) in self.winners.empty_cells() {
                    self.push_board_moves(a, b, out);
                }
            }
        }
        debug_assert!(out.len() <= MAX_MOVES);
        out.len()
    }

    /// Legal moves after the previous move landed in cell `(last_x, last_y)`.
    #[inline]
    pub fn legal_moves(&self, last_x: usize, last_y: usize, out: &mut Vec<Move>) -> usize {
        self.legal_moves_from(Some((last_x, last_y)), out)
    }

    fn push_board_moves(&self, a: usize, b: usize, out: &mut Vec<Move>) {
        out.extend(
            self.boards[a][b]
                .empty_cells()
                .map(|(x, y)| Move::new(a, b, x, y)),
        );
    }
}

/// Renders the global 9x9 grid with `|` between sub-board columns and a
/// `---+---+---` rule between sub-board rows.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GLOBAL_N {
            if row > 0 && row % N == 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..GLOBAL_N {
                if col > 0 && col % N == 0 {
                    write!(f, "|")?;
                }
                let ch = self
                    .get(Move::from_global(row, col))
                    .map_or('.', Player::symbol);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move applied to a [`Game`], undone when the guard is dropped.
pub struct Applied<'a> {
    game: &'a mut Game,
    mv: Move,
    player: Player,
    outcome: Outcome,
}

impl Applied<'_> {
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for Applied<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        self.game.undo(self.mv, self.player, self.outcome.board_won);
    }
}
