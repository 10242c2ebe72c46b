//! Property tests over random legal play sequences.

use proptest::prelude::*;

use uttt_minimax::board::Player;
use uttt_minimax::codec::Move;
use uttt_minimax::game::{Game, Outcome};
use uttt_minimax::search::Minimax;

/// Play legal moves chosen by `picks` (taken modulo the number of legal
/// moves) until the picks run out, the game ends or no move is legal.
///
/// Returns the moves played with their player and outcome, plus the cell of
/// the last move.
fn play_out(game: &mut Game, picks: &[usize]) -> (Vec<(Move, Player, Outcome)>, Option<(usize, usize)>) {
    let mut history = Vec::new();
    let mut moves = Vec::new();
    let mut last = None;
    let mut player = Player::Me;

    for &pick in picks {
        if game.winner().is_some() || game.legal_moves_from(last, &mut moves) == 0 {
            break;
        }
        let mv = moves[pick % moves.len()];
        let outcome = game.apply(mv, player);
        history.push((mv, player, outcome));
        last = Some(mv.cell());
        player = player.opponent();
    }

    (history, last)
}

proptest! {
    #[test]
    fn apply_undo_are_inverse(picks in proptest::collection::vec(any::<usize>(), 0..81)) {
        let mut game = Game::new();
        let mut snapshots = vec![game.clone()];
        let mut moves = Vec::new();
        let mut last = None;
        let mut player = Player::Me;
        let mut history = Vec::new();

        for pick in picks {
            if game.winner().is_some() || game.legal_moves_from(last, &mut moves) == 0 {
                break;
            }
            let mv = moves[pick % moves.len()];
            let outcome = game.apply(mv, player);
            history.push((mv, player, outcome));
            snapshots.push(game.clone());
            last = Some(mv.cell());
            player = player.opponent();
        }

        while let Some((mv, player, outcome)) = history.pop() {
            prop_assert_eq!(&game, snapshots.last().unwrap());
            game.undo(mv, player, outcome.board_won);
            snapshots.pop();
        }
        prop_assert_eq!(game, Game::new());
    }

    #[test]
    fn meta_board_tracks_sub_board_winners(picks in proptest::collection::vec(any::<usize>(), 0..81)) {
        let mut game = Game::new();
        play_out(&mut game, &picks);
        for a in 0..3 {
            for b in 0..3 {
                prop_assert_eq!(game.winners().get(a, b), game.board(a, b).winner());
            }
        }
    }

    #[test]
    fn legal_moves_respect_send_rule(picks in proptest::collection::vec(any::<usize>(), 0..60)) {
        let mut game = Game::new();
        let (_, last) = play_out(&mut game, &picks);
        let Some((ta, tb)) = last else {
            return Ok(());
        };

        let mut moves = Vec::new();
        game.legal_moves(ta, tb, &mut moves);
        for &mv in &moves {
            let (a, b) = mv.board();
            prop_assert!(game.get(mv).is_none());
            prop_assert!(!game.is_decided(a, b));
            if !game.is_decided(ta, tb) {
                prop_assert_eq!((a, b), (ta, tb));
            }
        }

        let expected: usize = if game.is_decided(ta, tb) {
            game.winners()
                .empty_cells()
                .map(|(a, b)| 9 - game.board(a, b).count_taken())
                .sum()
        } else {
            9 - game.board(ta, tb).count_taken()
        };
        prop_assert_eq!(moves.len(), expected);
    }

    #[test]
    fn search_restores_position(picks in proptest::collection::vec(any::<usize>(), 0..40)) {
        let mut game = Game::new();
        let (_, last) = play_out(&mut game, &picks);
        prop_assume!(game.winner().is_none());

        let before = game.clone();
        let mut searcher = Minimax::new();
        let value = searcher.evaluate(&mut game, 2, Player::Me, last.unwrap_or((1, 1)));
        prop_assert!(!value.is_nan());
        prop_assert_eq!(game, before);
    }
}
