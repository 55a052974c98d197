//! Integration tests for the game session

use food_tetris::core::{Board, GameConfig, GameSession, ScriptedSource};
use food_tetris::input::InputHandler;
use food_tetris::types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Board with the bottom `rows` rows filled except columns 4 and 5, which a
/// hard-dropped burger fills exactly when `rows <= 2`.
fn gapped_board(rows: i8) -> Board {
    let mut board = Board::new();
    for y in (BOARD_HEIGHT as i8 - rows)..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 && x != 5 {
                board.set(x, y, Some(PieceKind::Pretzel));
            }
        }
    }
    board
}

/// Board with the bottom `rows` rows filled except column 0, for vertical fries.
fn well_board(rows: i8) -> Board {
    let mut board = Board::new();
    for y in (BOARD_HEIGHT as i8 - rows)..BOARD_HEIGHT as i8 {
        for x in 1..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::Pasta));
        }
    }
    board
}

fn session_with(board: Board, kinds: &[PieceKind]) -> GameSession<ScriptedSource> {
    let mut s = GameSession::with_board(GameConfig::default(), ScriptedSource::new(kinds.to_vec()), board);
    s.start();
    s
}

/// Rotate fries upright, push it against the left wall and hard drop.
fn drop_fries_in_left_well(s: &mut GameSession<ScriptedSource>) {
    assert!(s.apply_action(GameAction::RotateCw));
    assert_eq!(s.active().unwrap().rotation, Rotation::East);
    while s.apply_action(GameAction::MoveLeft) {}
    // East fries is column x + 2.
    assert_eq!(s.active().unwrap().x, -2);
    assert!(s.apply_action(GameAction::HardDrop));
}

#[test]
fn test_game_lifecycle() {
    let mut s = GameSession::new(12345);
    assert!(!s.started());
    s.start();
    assert!(s.started());
    assert!(s.active().is_some());
    assert!(!s.game_over());
    assert!(!s.paused());
    assert!(s.is_playing());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameSession::new(99);
    let mut b = GameSession::new(99);
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.preview(), b.preview());
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
        if a.game_over() {
            break;
        }
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_line_clear_scores_at_level_one() {
    // One, two: burger into a two-wide gap.
    for (rows, expected) in [(1, 100), (2, 300)] {
        let mut s = session_with(gapped_board(rows), &[PieceKind::Burger]);
        s.apply_action(GameAction::HardDrop);
        assert_eq!(s.lines(), rows as u32);
        assert_eq!(s.score(), expected);
    }

    // Three, four: vertical fries into a one-wide well.
    for (rows, expected) in [(3, 500), (4, 800)] {
        let mut s = session_with(well_board(rows), &[PieceKind::Fries]);
        drop_fries_in_left_well(&mut s);
        assert_eq!(s.lines(), rows as u32);
        assert_eq!(s.score(), expected);
    }
}

#[test]
fn test_level_two_doubles_scores() {
    // A deep well: every upright fries clears four rows and the well slides down.
    let mut s = session_with(well_board(16), &[PieceKind::Fries]);

    drop_fries_in_left_well(&mut s);
    drop_fries_in_left_well(&mut s);
    assert_eq!((s.lines(), s.level(), s.score()), (8, 1, 1600));

    // Lines 9 and 10 are part of this clear, which still scores at level 1.
    drop_fries_in_left_well(&mut s);
    assert_eq!((s.lines(), s.level(), s.score()), (12, 2, 2400));

    drop_fries_in_left_well(&mut s);
    assert_eq!((s.lines(), s.level(), s.score()), (16, 2, 4000));
}

#[test]
fn test_spawn_collision_is_game_over() {
    let mut board = Board::new();
    board.set(5, 2, Some(PieceKind::Carrot));
    let mut s = session_with(board, &[PieceKind::Fries]);

    assert!(s.game_over());
    assert!(s.active().is_none());
    assert_eq!((s.score(), s.level(), s.lines()), (0, 1, 0));

    // Everything but restart is ignored.
    for action in [GameAction::MoveLeft, GameAction::HardDrop, GameAction::Hold, GameAction::Pause] {
        assert!(!s.apply_action(action));
    }
    assert!(!s.advance(10_000));
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut s = GameSession::with_config(GameConfig::default(), ScriptedSource::new(vec![PieceKind::Burger]));
    s.start();
    for _ in 0..20 {
        if s.game_over() {
            break;
        }
        s.apply_action(GameAction::HardDrop);
    }
    assert!(s.game_over());
    // Nine burgers reach row 2, where the next spawn overlaps.
    assert_eq!(s.board().filled_count(), 36);
    let event = s.take_last_event().unwrap();
    assert!(event.game_over);
}

#[test]
fn test_hold_twice_without_lock() {
    let mut s = session_with(Board::new(), &[PieceKind::Chicken, PieceKind::Banana, PieceKind::Carrot]);
    assert!(s.apply_action(GameAction::Hold));
    let current = s.active().unwrap();
    let held = s.held();

    assert!(!s.apply_action(GameAction::Hold));
    assert_eq!(s.active().unwrap(), current);
    assert_eq!(s.held(), held);
    assert!(!s.can_hold());
}

#[test]
fn test_pause_freezes_everything() {
    let mut s = GameSession::new(3);
    s.start();
    let before = s.snapshot();

    assert!(s.apply_action(GameAction::Pause));
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::RotateCw,
        GameAction::SoftDropStart,
        GameAction::HardDrop,
        GameAction::Hold,
    ] {
        assert!(!s.apply_action(action));
    }
    assert!(!s.advance(60_000));
    assert!(s.apply_action(GameAction::Pause));

    let after = s.snapshot();
    assert_eq!(after.board, before.board);
    assert_eq!(after.active, before.active);
    assert_eq!(after.timers, before.timers);
}

#[test]
fn test_restart_after_game_over() {
    let mut board = Board::new();
    board.set(5, 2, Some(PieceKind::Carrot));
    let mut s = session_with(board, &[PieceKind::Fries, PieceKind::Burger]);
    assert!(s.game_over());

    assert!(s.apply_action(GameAction::Restart));
    assert!(!s.game_over());
    assert_eq!(s.board().filled_count(), 0);
    assert!(s.active().is_some());
    assert_eq!(s.held(), None);
}

#[test]
fn test_feast_mode_wins_on_time() {
    let config = GameConfig {
        fall_interval_ms: 1_000_000,
        ..GameConfig::feast()
    };
    let mut s = GameSession::with_config(config, ScriptedSource::new(vec![PieceKind::Burger]));
    s.start();

    s.advance(179_999);
    assert!(!s.won());
    s.advance(1);
    assert!(s.won());
    assert!(!s.game_over());
    assert!(!s.apply_action(GameAction::HardDrop));
}

#[test]
fn test_feast_mode_wins_on_fullness() {
    let config = GameConfig::feast();
    let mut s = GameSession::with_board(config, ScriptedSource::new(vec![PieceKind::Fries]), well_board(16));
    s.start();

    drop_fries_in_left_well(&mut s);
    assert_eq!(s.fullness(), 80);
    assert!(!s.won());

    drop_fries_in_left_well(&mut s);
    assert_eq!(s.fullness(), 100);
    assert!(s.won());
    assert!(s.active().is_none());
    assert!(s.take_last_event().unwrap().won);
}

#[test]
fn test_input_handler_drives_session() {
    use crossterm::event::KeyCode;

    let mut s = session_with(Board::new(), &[PieceKind::Burger]);
    let mut input = InputHandler::with_repeat_ms(100).with_key_release_timeout_ms(10_000);

    let first = input.handle_key_press(KeyCode::Right).unwrap();
    assert!(s.apply_action(first));
    for action in input.update(300) {
        s.apply_action(action);
    }
    assert_eq!(s.active().unwrap().x, 7);

    let start = input.handle_key_press(KeyCode::Down).unwrap();
    assert!(s.apply_action(start));
    assert!(s.soft_dropping());
    let stop = input.handle_key_release(KeyCode::Down).unwrap();
    assert!(s.apply_action(stop));
    assert!(!s.soft_dropping());
}
