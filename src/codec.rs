//! Compact move encoding.
//!
//! A move names a sub-board `(a, b)` and a cell `(x, y)` inside it, each
//! coordinate in `0..3`. The four coordinates are packed as 2-bit fields into a
//! single byte:
//!
//! ```text
//!  bit  7 6 | 5 4 | 3 2 | 1 0
//!       y   | x   | b   | a
//! ```
//!
//! `a`/`x` are columns and `b`/`y` are rows. The referee talks in a flat 9x9
//! global grid where `row = b * 3 + y` and `col = a * 3 + x`.

use std::fmt;

use crate::constants::{GLOBAL_N, N};

const FIELD_BITS: u32 = 2;
const FIELD_MASK: u8 = 0b11;

/// A packed Ultimate Tic-Tac-Toe move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    /// Pack sub-board `(a, b)` and cell `(x, y)` into a move.
    #[inline]
    pub fn new(a: usize, b: usize, x: usize, y: usize) -> Self {
        debug_assert!(a < N && b < N && x < N && y < N, "move field out of range");
        Move(
            a as u8
                | (b as u8) << FIELD_BITS
                | (x as u8) << (2 * FIELD_BITS)
                | (y as u8) << (3 * FIELD_BITS),
        )
    }

    #[inline]
    fn field(self, index: u32) -> usize {
        ((self.0 >> (index * FIELD_BITS)) & FIELD_MASK) as usize
    }

    /// Unpack into `(a, b, x, y)`.
    #[inline]
    pub fn decode(self) -> (usize, usize, usize, usize) {
        (self.field(0), self.field(1), self.field(2), self.field(3))
    }

    /// Sub-board column and row.
    #[inline]
    pub fn board(self) -> (usize, usize) {
        (self.field(0), self.field(1))
    }

    /// Cell column and row within the sub-board.
    #[inline]
    pub fn cell(self) -> (usize, usize) {
        (self.field(2), self.field(3))
    }

    /// The raw packed byte.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Convert from global `(row, col)` coordinates.
    pub fn from_global(row: usize, col: usize) -> Self {
        debug_assert!(row < GLOBAL_N && col < GLOBAL_N);
        Move::new(col / N, row / N, col % N, row % N)
    }

    /// Global `(row, col)` coordinates of this move.
    pub fn global(self) -> (usize, usize) {
        let (a, b, x, y) = self.decode();
        (b * N + y, a * N + x)
    }
}

/// Renders the move as `"row col"` in global coordinates, the referee's format.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.global();
        write!(f, "{row} {col}")
    }
}

/// Every one of the 81 moves, in global row-major order.
pub fn all_moves() -> impl Iterator<Item = Move> {
    (0..GLOBAL_N).flat_map(|row| (0..GLOBAL_N).map(move |col| Move::from_global(row, col)))
}
