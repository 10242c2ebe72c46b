//! Battle harness: the minimax engine against a uniformly random mover.
//!
//! Seats alternate between games so the engine moves first in half of them.
//! A game ends when a side completes a line of sub-boards, or when the side to
//! move has no legal move (scored as a draw).

use tracing::{debug, info};

use crate::board::Player;
use crate::codec::Move;
use crate::constants::MAX_MOVES;
use crate::game::Game;
use crate::search::Minimax;

/// Result of one game, from the engine's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// 1 for a win, 0.5 for a draw, 0 for a loss.
    pub fn points(self) -> f64 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Draw => 0.5,
            GameResult::Loss => 0.0,
        }
    }
}

/// Tally of a battle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Report {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    /// The engine's share of the points, in `[0, 1]`. Zero games score 0.
    pub fn score(&self) -> f64 {
        if self.games() == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / self.games() as f64
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }
}

/// Play one game. The engine plays [`Player::Me`] at `depth`; the random side
/// draws from `rng`.
pub fn play_game(engine_first: bool, depth: usize, rng: &mut fastrand::Rng) -> GameResult {
    let mut game = Game::new();
    let mut searcher = Minimax::new();
    let mut moves: Vec<Move> = Vec::with_capacity(MAX_MOVES);
    let mut last = None;
    let mut player = if engine_first {
        Player::Me
    } else {
        Player::Opponent
    };

    loop {
        game.legal_moves_from(last, &mut moves);
        let choice = match player {
            Player::Me => searcher.pick_move(&moves, &mut game, depth),
            Player::Opponent => rng.choice(moves.iter().copied()),
        };
        let Some(mv) = choice else {
            debug!("{player:?} has no legal move\n{game}");
            return GameResult::Draw;
        };

        if game.apply(mv, player).game_won {
            debug!("{player:?} wins with {mv}\n{game}");
            return match player {
                Player::Me => GameResult::Win,
                Player::Opponent => GameResult::Loss,
            };
        }

        last = Some(mv.cell());
        player = player.opponent();
    }
}

/// Play `n` games with alternating seats and tally the results.
pub fn battle(n: usize, depth: usize, rng: &mut fastrand::Rng) -> Report {
    let mut report = Report::default();
    for i in 0..n {
        let engine_first = i % 2 == 0;
        let result = play_game(engine_first, depth, rng);
        info!(engine_first, "game {}/{n}: {result:?}", i + 1);
        report.record(result);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_score() {
        let report = Report {
            wins: 3,
            losses: 1,
            draws: 2,
        };
        assert_eq!(report.games(), 6);
        assert!((report.score() - 4.0 / 6.0).abs() < 1e-12);
        assert_eq!(Report::default().score(), 0.0);
    }

    #[test]
    fn test_battle_counts_every_game() {
        let mut rng = fastrand::Rng::with_seed(7);
        let report = battle(4, 1, &mut rng);
        assert_eq!(report.games(), 4);
    }

    #[test]
    fn test_engine_beats_random_mover() {
        let mut rng = fastrand::Rng::with_seed(42);
        let report = battle(6, 2, &mut rng);
        assert!(
            report.score() >= 0.5,
            "engine should at least hold its own: {report:?}"
        );
    }
}
