//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Direction and soft-drop keys map to their first action here; holding them
/// is [`crate::InputHandler`]'s job. Letters are case-insensitive.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    // Ctrl-C is quit, not hold.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDropStart),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char(c) => char_action(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn char_action(c: char) -> Option<GameAction> {
    let action = match c {
        'a' | 'h' => GameAction::MoveLeft,
        'd' | 'l' => GameAction::MoveRight,
        's' | 'j' => GameAction::SoftDropStart,
        // Clockwise only.
        'w' | 'k' | 'x' => GameAction::RotateCw,
        ' ' => GameAction::HardDrop,
        'c' => GameAction::Hold,
        'p' => GameAction::Pause,
        'r' => GameAction::Restart,
        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
