//! Depth-limited minimax search.
//!
//! This module implements a plain backtracking minimax over a single mutable
//! [`Game`]:
//! - No alpha-beta pruning and no transposition table; every legal move at
//!   every ply is explored.
//! - Forced wins are reported as `+inf` (for [`Player::Me`]) or `-inf` (for
//!   [`Player::Opponent`]) the moment a move completes the game, before the
//!   depth bound is reached.
//! - Leaves at depth zero are scored by [`evaluate`], which is always finite.
//! - A line of play that captures a sub-board without ending the game gets a
//!   [`SUB_BOARD_BONUS`] nudge in the capturing side's favour.
//!
//! Each ply owns one preallocated move buffer, so the recursive path does not
//! allocate.

use tracing::{debug, info, trace};

use crate::board::Player;
use crate::codec::Move;
use crate::constants::{MAX_MOVES, SUB_BOARD_BONUS};
use crate::game::Game;

/// Static evaluation from [`Player::Me`]'s point of view.
///
/// Sums the eight line sums of the meta-board, so every sub-board won by me
/// raises the score and every sub-board lost lowers it.
pub fn evaluate(game: &Game) -> f64 {
    game.winners().line_sums().map(f64::from).sum()
}

/// Minimax searcher with reusable per-ply move buffers.
pub struct Minimax {
    /// `buffers[i]` holds the moves of the node `i` plies below the root.
    buffers: Vec<Vec<Move>>,
    /// Nodes visited since construction.
    nodes: u64,
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

impl Minimax {
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            nodes: 0,
        }
    }

    /// Number of nodes visited so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn reserve(&mut self, depth: usize) {
        while self.buffers.len() < depth {
            self.buffers.push(Vec::with_capacity(MAX_MOVES));
        }
    }

    /// Value of the position for `player` to move, whose legal moves are
    /// constrained by the previous move having landed in cell `last`.
    ///
    /// The game is left exactly as it was found.
    pub fn evaluate(
        &mut self,
        game: &mut Game,
        depth: usize,
        player: Player,
        last: (usize, usize),
    ) -> f64 {
        self.reserve(depth);
        search(game, &mut self.buffers[..depth], player, last, &mut self.nodes)
    }

    /// Pick the best of `moves` for [`Player::Me`], searching `depth` plies
    /// including the candidate move itself.
    ///
    /// A move that wins the game outright is taken immediately. Otherwise the
    /// first move with the strictly highest score wins, and the first
    /// candidate is kept if nothing beats it. Returns `None` only when `moves`
    /// is empty.
    pub fn pick_move(&mut self, moves: &[Move], game: &mut Game, depth: usize) -> Option<Move> {
        let mut choice = *moves.first()?;
        let mut value = f64::NEG_INFINITY;

        let child_depth = depth.saturating_sub(1);
        self.reserve(child_depth);
        let start_nodes = self.nodes;

        for (i, &mv) in moves.iter().enumerate() {
            let mut applied = game.play(mv, Player::Me);
            let outcome = applied.outcome();
            if outcome.game_won {
                debug!("{}/{}: {mv} wins game", i + 1, moves.len());
                choice = mv;
                value = f64::INFINITY;
                break;
            }

            let mut score = search(
                &mut applied,
                &mut self.buffers[..child_depth],
                Player::Opponent,
                mv.cell(),
                &mut self.nodes,
            );
            drop(applied);

            if outcome.board_won {
                score += SUB_BOARD_BONUS;
            }

            debug!(
                board_won = outcome.board_won,
                "{}/{}: {mv} scores {score}",
                i + 1,
                moves.len()
            );

            if score > value {
                choice = mv;
                value = score;
            }
        }

        info!(
            nodes = self.nodes - start_nodes,
            "picked {choice} with value {value}"
        );
        Some(choice)
    }
}

/// Search one node. `buffers` has one entry per remaining ply, so its length
/// is the remaining depth.
fn search(
    game: &mut Game,
    buffers: &mut [Vec<Move>],
    player: Player,
    last: (usize, usize),
    nodes: &mut u64,
) -> f64 {
    *nodes += 1;

    let Some((moves, rest)) = buffers.split_first_mut() else {
        return evaluate(game);
    };

    if game.legal_moves(last.0, last.1, moves) == 0 {
        trace!("no legal moves after cell {last:?}");
        return evaluate(game);
    }

    let (mut value, win) = match player {
        Player::Me => (f64::NEG_INFINITY, f64::INFINITY),
        Player::Opponent => (f64::INFINITY, f64::NEG_INFINITY),
    };
    let bonus = f64::from(player.sign()) * SUB_BOARD_BONUS;

    for &mv in moves.iter() {
        let mut applied = game.play(mv, player);
        let outcome = applied.outcome();
        if outcome.game_won {
            return win;
        }

        let mut next = search(&mut applied, rest, player.opponent(), mv.cell(), nodes);
        drop(applied);

        if outcome.board_won {
            next += bonus;
        }

        value = match player {
            Player::Me => value.max(next),
            Player::Opponent => value.min(next),
        };
    }

    value
}

/// Value of the position for `player` to move after a move into cell `last`.
pub fn minimax(game: &mut Game, depth: usize, player: Player, last: (usize, usize)) -> f64 {
    Minimax::new().evaluate(game, depth, player, last)
}

/// Pick the best root move; see [`Minimax::pick_move`].
pub fn pick_move(moves: &[Move], game: &mut Game, depth: usize) -> Option<Move> {
    Minimax::new().pick_move(moves, game, depth)
}
