//! Per-turn referee protocol.
//!
//! The referee and the bot exchange whitespace-separated integers. Each turn
//! the referee sends:
//!
//! ```text
//! <opponent row> <opponent col>      (-1 -1 on the very first turn)
//! <number of legal moves>
//! <row> <col>                        (one line per legal move)
//! ```
//!
//! and the bot answers with one `<row> <col>` line. Coordinates are global
//! (0..9 for Ultimate Tic-Tac-Toe). The loop ends cleanly when the input ends
//! at the start of a turn.
//!
//! ## Example
//!
//! ```
//! use uttt_minimax::protocol::Bot;
//!
//! let mut bot = Bot::new(2);
//! let input = "-1 -1\n2\n4 4\n0 0\n";
//! let mut output = Vec::new();
//! bot.run(input.as_bytes(), &mut output, false).unwrap();
//! assert_eq!(output.len(), 4);
//! ```

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::board::Player;
use crate::codec::Move;
use crate::constants::{GLOBAL_N, MAX_DEPTH, MAX_MOVES};
use crate::error::{Error, Result};
use crate::game::Game;
use crate::search::Minimax;

/// Reads whitespace-separated integers regardless of line layout.
pub struct TokenReader<R> {
    input: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }

    /// Next integer, or `None` at end of input.
    pub fn try_int(&mut self, expected: &'static str) -> Result<Option<i32>> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => token
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidInteger { token, expected }),
        }
    }

    /// Next integer; end of input is an error.
    pub fn int(&mut self, expected: &'static str) -> Result<i32> {
        self.try_int(expected)?
            .ok_or(Error::UnexpectedEof { expected })
    }

    /// A `row col` pair on a `size`x`size` board. `-1 -1` reads as `None`.
    pub fn coord(&mut self, size: usize, expected: &'static str) -> Result<Option<(usize, usize)>> {
        let row = self.int(expected)?;
        let col = self.int(expected)?;
        if row == -1 && col == -1 {
            return Ok(None);
        }
        check_coord(row, col, size).map(Some)
    }
}

/// Validate a signed `(row, col)` against a `size`x`size` board.
pub fn check_coord(row: i32, col: i32, size: usize) -> Result<(usize, usize)> {
    let in_range = |v: i32| usize::try_from(v).ok().filter(|&v| v < size);
    match (in_range(row), in_range(col)) {
        (Some(r), Some(c)) => Ok((r, c)),
        _ => Err(Error::OutOfRange { row, col, size }),
    }
}

/// The Ultimate Tic-Tac-Toe bot: persistent game state plus a searcher.
pub struct Bot {
    game: Game,
    depth: usize,
    searcher: Minimax,
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(MAX_DEPTH)
    }
}

impl Bot {
    /// A bot starting from the empty board.
    pub fn new(depth: usize) -> Self {
        Self::with_game(Game::new(), depth)
    }

    /// A bot starting from an arbitrary position.
    pub fn with_game(game: Game, depth: usize) -> Self {
        Self {
            game,
            depth,
            searcher: Minimax::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play one turn: record the opponent's move (if any), choose one of
    /// `legal`, record it and return it.
    pub fn turn(&mut self, opponent: Option<Move>, legal: &[Move]) -> Result<Move> {
        if let Some(mv) = opponent {
            if self.game.get(mv).is_some() {
                let (row, col) = mv.global();
                return Err(Error::Occupied { row, col });
            }
            let outcome = self.game.apply(mv, Player::Opponent);
            debug!(board_won = outcome.board_won, "opponent played {mv}");
        }

        let choice = self
            .searcher
            .pick_move(legal, &mut self.game, self.depth)
            .ok_or(Error::NoLegalMoves)?;

        let outcome = self.game.apply(choice, Player::Me);
        if outcome.game_won {
            info!("{choice} wins the game");
        }
        Ok(choice)
    }

    /// Run the protocol loop until input ends (or after one turn if `once`).
    ///
    /// Returns the number of turns played.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W, once: bool) -> Result<usize> {
        let mut reader = TokenReader::new(input);
        let mut legal = Vec::with_capacity(MAX_MOVES);
        let mut turns = 0;

        loop {
            let Some(row) = reader.try_int("opponent row")? else {
                break;
            };
            let col = reader.int("opponent column")?;
            let opponent = if row == -1 && col == -1 {
                None
            } else {
                let (row, col) = check_coord(row, col, GLOBAL_N)?;
                Some(Move::from_global(row, col))
            };

            let count = reader.int("legal move count")?;
            legal.clear();
            for _ in 0..count {
                if let Some((row, col)) = reader.coord(GLOBAL_N, "legal move")? {
                    legal.push(Move::from_global(row, col));
                }
            }
            debug!(count = legal.len(), "turn {}: opponent {opponent:?}", turns + 1);
            debug!("\n{}", self.game);

            let choice = self.turn(opponent, &legal)?;
            writeln!(output, "{choice}")?;
            output.flush()?;
            turns += 1;

            if once {
                break;
            }
        }

        Ok(turns)
    }
}
