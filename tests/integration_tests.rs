//! Integration tests for uttt-minimax
//!
//! These drive the bot the way a referee would: either through the text
//! protocol or through `Bot::turn`, with a separate `Game` acting as referee.

use uttt_minimax::board::Player;
use uttt_minimax::codec::Move;
use uttt_minimax::game::Game;
use uttt_minimax::protocol::Bot;
use uttt_minimax::search::{minimax, pick_move};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Legal moves for the side to move after a move into cell `last`.
fn legal_after(game: &Game, last: Option<(usize, usize)>) -> Vec<Move> {
    let mut moves = Vec::new();
    game.legal_moves_from(last, &mut moves);
    moves
}

/// Format moves as referee input lines.
fn referee_lines(moves: &[Move]) -> String {
    let mut s = format!("{}\n", moves.len());
    for mv in moves {
        s.push_str(&format!("{mv}\n"));
    }
    s
}

/// Me holds sub-boards (0, 1) and (0, 2) and two cells of row 0 in
/// sub-board (0, 0); the opponent holds (1, 1) and (2, 2).
const LEFT_COLUMN: &str = "
    .XX|...|...
    ...|...|...
    ...|...|...
    ---+---+---
    XXX|OOO|...
    ...|...|...
    ...|...|...
    ---+---+---
    XXX|...|OOO
    ...|...|...
    ...|...|...
";

// =============================================================================
// Search scenarios
// =============================================================================

#[test]
fn test_completing_move_wins_game() {
    let mut game = Game::from_diagram(LEFT_COLUMN).unwrap();
    assert!(game.is_decided(0, 1));
    assert!(game.is_decided(0, 2));
    assert!(game.is_decided(1, 1));
    assert!(game.is_decided(2, 2));

    let moves = legal_after(&game, Some((0, 0)));
    assert_eq!(moves.len(), 7);

    for depth in 1..=3 {
        assert_eq!(
            pick_move(&moves, &mut game, depth),
            Some(Move::new(0, 0, 0, 0)),
            "depth {depth}"
        );
        assert_eq!(minimax(&mut game, depth, Player::Me, (0, 0)), f64::INFINITY);
    }
}

#[test]
fn test_never_releases_opponent_to_winning_board() {
    // The opponent holds (1, 1) and (2, 2) and needs sub-board (0, 0), where it
    // already has two cells of column 0. Playing cell (1, 1) or (2, 2) would
    // send it to a decided sub-board, freeing it to win at once.
    let diagram = "
        O..|...|...
        O..|...|...
        ...|...|...
        ---+---+---
        ...|OOO|...
        ...|...|...
        ...|...|...
        ---+---+---
        ...|...|OOO
        ...|...|...
        ...|...|...
    ";
    let mut game = Game::from_diagram(diagram).unwrap();
    let mut moves = legal_after(&game, Some((0, 0)));
    moves.reverse();
    assert_eq!(moves[0], Move::new(0, 0, 2, 2));

    let choice = pick_move(&moves, &mut game, 2).unwrap();
    assert_eq!(choice, Move::new(0, 0, 2, 1));

    let mut releasing = game.clone();
    releasing.apply(Move::new(0, 0, 1, 1), Player::Me);
    assert_eq!(
        minimax(&mut releasing, 1, Player::Opponent, (1, 1)),
        f64::NEG_INFINITY
    );
}

#[test]
fn test_opponent_forced_win_is_negative_infinity() {
    let mirrored = LEFT_COLUMN.replace('X', "#").replace('O', "X").replace('#', "O");
    let mut game = Game::from_diagram(&mirrored).unwrap();
    assert_eq!(
        minimax(&mut game, 2, Player::Opponent, (0, 0)),
        f64::NEG_INFINITY
    );
}

// =============================================================================
// Protocol
// =============================================================================

#[test]
fn test_protocol_first_turn() {
    let mut referee = Game::new();
    let first = legal_after(&referee, None);

    let mut bot = Bot::new(2);
    let input = format!("-1 -1\n{}", referee_lines(&first));
    let mut output = Vec::new();
    bot.run(input.as_bytes(), &mut output, false).unwrap();

    let reply = String::from_utf8(output).unwrap();
    let mut parts = reply.split_whitespace().map(|t| t.parse::<usize>().unwrap());
    let (row, col) = (parts.next().unwrap(), parts.next().unwrap());
    let mine = Move::from_global(row, col);
    assert!(first.contains(&mine));
    referee.apply(mine, Player::Me);
    assert_eq!(bot.game(), &referee);
}

#[test]
fn test_full_game_against_referee() {
    let mut referee = Game::new();
    let mut bot = Bot::new(2);
    let mut rng = fastrand::Rng::with_seed(3);
    let mut last = None;

    for _ in 0..81 {
        // Opponent (random) move first, except on the very first turn.
        let opponent = if last.is_some() {
            let moves = legal_after(&referee, last);
            let Some(mv) = rng.choice(moves) else { break };
            let won = referee.apply(mv, Player::Opponent).game_won;
            last = Some(mv.cell());
            if won {
                break;
            }
            Some(mv)
        } else {
            None
        };

        let moves = legal_after(&referee, last);
        if moves.is_empty() {
            break;
        }
        let mine = bot.turn(opponent, &moves).unwrap();
        assert!(moves.contains(&mine), "{mine} not among legal moves");
        let won = referee.apply(mine, Player::Me).game_won;
        assert_eq!(bot.game(), &referee);
        last = Some(mine.cell());
        if won {
            break;
        }
    }
}
