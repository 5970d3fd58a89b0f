//! Tests for Basic mode rules through the public API.

use proptest::prelude::*;
use tictactoe_pro::{Game, GameStatus, Mode, MoveError, Player, Position, Square};

fn play(game: &mut Game, cells: &[(usize, usize)]) {
    for (row, col) in cells {
        game.place_at(*row, *col).unwrap();
    }
}

#[test]
fn test_new_game_starts_with_x_on_empty_board() {
    let game = Game::new(Mode::Basic);
    assert_eq!(game.to_move(), Player::X);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert!(game.board().squares().iter().all(|s| *s == Square::Empty));
    assert!(game.live_pieces(Player::X).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any order of distinct cells alternates X, O, X, ... until the game ends.
    #[test]
    fn prop_turns_alternate_until_game_ends(
        order in Just((0..9usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let mut game = Game::new(Mode::Basic);
        let mut expected = Player::X;
        let mut last_mover = None;
        for index in order {
            if !game.is_active() {
                break;
            }
            prop_assert_eq!(game.to_move(), expected);
            let pos = Position::from_index(index).unwrap();
            let placement = game.place(pos).unwrap();
            prop_assert_eq!(placement.mov.player, expected);
            last_mover = Some(expected);
            expected = expected.opponent();
        }

        match game.status() {
            GameStatus::Won(winner) => prop_assert_eq!(Some(winner), last_mover),
            GameStatus::Draw => prop_assert_eq!(game.move_count(), 9),
            GameStatus::InProgress => prop_assert!(false, "game still running after nine moves"),
        }
    }
}

#[test]
fn test_top_row_win() {
    let mut game = Game::new(Mode::Basic);
    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    assert_eq!(game.status(), GameStatus::Won(Player::X));
    assert_eq!(
        game.winning_line().map(|l| l.positions()),
        Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
    );
    // Winner stays recorded as the player to move.
    assert_eq!(game.to_move(), Player::X);
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / X O O / O X X
    let mut game = Game::new(Mode::Basic);
    play(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );
    assert_eq!(game.status(), GameStatus::Draw);
    assert!(game.winning_line().is_none());
}

#[test]
fn test_win_on_last_cell_beats_draw() {
    // X O X / O X O / O X X: the ninth move completes the main diagonal.
    let mut game = Game::new(Mode::Basic);
    play(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 0), (2, 2)],
    );
    assert_eq!(game.status(), GameStatus::Won(Player::X));
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let mut game = Game::new(Mode::Basic);
    play(&mut game, &[(1, 1)]);
    let before = game.clone();
    assert_eq!(
        game.place_at(1, 1),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(game, before);
}

#[test]
fn test_moves_after_win_rejected() {
    let mut game = Game::new(Mode::Basic);
    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    assert_eq!(game.place_at(2, 0), Err(MoveError::GameOver));
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut game = Game::new(Mode::Basic);
    assert_eq!(
        game.place_at(3, 0),
        Err(MoveError::OutOfBounds { row: 3, col: 0 })
    );
    assert!(game.moves().is_empty());
}

#[test]
fn test_reset_clears_board() {
    let mut game = Game::new(Mode::Basic);
    play(&mut game, &[(0, 0), (1, 1)]);
    game.reset();
    assert_eq!(game, Game::new(Mode::Basic));
}
