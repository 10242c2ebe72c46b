//! Constants for board geometry, search parameters and buffer sizes.
//!
//! This module contains all the tunable values for the engine. Runtime
//! overrides (search depth, battle size) come from the command line.

// =============================================================================
// Board Geometry
// =============================================================================

/// Width and height of a sub-board, and of the grid of sub-boards.
pub const N: usize = 3;

/// Width and height of the flat global board (9x9).
pub const GLOBAL_N: usize = N * N;

/// Number of lines on a sub-board: 3 rows, 3 columns, 2 diagonals.
pub const N_LINES: usize = 2 * N + 2;

/// Line sum at which a line is won by one player.
pub const WIN_SUM: i8 = N as i8;

// =============================================================================
// Move Buffers
// =============================================================================

/// Maximum number of legal cells on a single sub-board.
pub const MAX_SUB_MOVES: usize = N * N;

/// Maximum number of legal moves in a whole game position.
pub const MAX_MOVES: usize = GLOBAL_N * GLOBAL_N;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const MAX_DEPTH: usize = 8;

/// Bonus added to a line of play that captures a sub-board without winning
/// the whole game. Subtracted when the opponent captures one.
pub const SUB_BOARD_BONUS: f64 = 1.0;

// =============================================================================
// Battle Harness
// =============================================================================

/// Default number of games played by the battle harness.
pub const N_BATTLES: usize = 20;

/// Default search depth used by the battle harness (kept shallow so a full
/// battle finishes in seconds).
pub const BATTLE_DEPTH: usize = 4;

// =============================================================================
// Connect-Three Variant
// =============================================================================

/// Width and height of the connect-three grid.
pub const C3_N: usize = 10;

/// Weight of each triple completed (or blocked) by a placement.
pub const C3_TRIPLE_WEIGHT: f64 = 10.0;

/// Bonus per neighbouring own mark.
pub const C3_OWN_NEIGHBOR: f64 = 2.0;

/// Bonus per neighbouring opponent mark.
pub const C3_OPPONENT_NEIGHBOR: f64 = 1.0;

/// Penalty for each neighbouring column that falls off the left or right edge.
pub const C3_SIDE_PENALTY: f64 = 3.0;

/// Penalty for each neighbouring row that falls off the top or bottom edge.
pub const C3_EDGE_PENALTY: f64 = 1.0;
