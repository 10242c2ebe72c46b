//! uttt-minimax: a depth-limited minimax bot for Ultimate Tic-Tac-Toe.
//!
//! Ultimate Tic-Tac-Toe is played on a 3x3 grid of 3x3 sub-boards. The cell a
//! player marks decides which sub-board the opponent must play in next; winning
//! a sub-board claims the matching cell of the meta-board, and three claimed
//! sub-boards in a line win the game.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, search parameters and buffer sizes
//! - [`codec`] - Packed move representation
//! - [`board`] - 3x3 grid with incremental win detection
//! - [`game`] - Full game state, move generation and position fixtures
//! - [`search`] - Minimax search and root move selection
//! - [`protocol`] - Per-turn referee protocol loop
//! - [`battle`] - Engine vs random-mover harness
//! - [`connect3`] - Heuristic bot for the 10x10 connect-three variant
//! - [`error`] - Error type for the input boundaries
//!
//! ## Example
//!
//! ```
//! use uttt_minimax::game::Game;
//! use uttt_minimax::search::pick_move;
//!
//! let mut game = Game::new();
//! let mut moves = Vec::new();
//! game.legal_moves_from(None, &mut moves);
//!
//! let best = pick_move(&moves, &mut game, 2).unwrap();
//! println!("Best move: {best}");
//! ```

pub mod battle;
pub mod board;
pub mod codec;
pub mod connect3;
pub mod constants;
pub mod error;
pub mod game;
pub mod protocol;
pub mod search;

pub use error::{Error, Result};
