//! Held-key tracking for terminal environments.
//!
//! Left/right repeat at a fixed interval while held. Down starts a soft drop
//! on press and ends it on release; the session does the fast falling.
//! Terminals that never report key releases are handled with a timeout.

use std::time::Instant;

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, DEFAULT_HORIZONTAL_REPEAT_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Keys this handler tracks as held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left,
    Right,
    Down,
}

fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('h')
        | KeyCode::Char('H') => Some(HeldKey::Left),
        KeyCode::Right
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('l')
        | KeyCode::Char('L') => Some(HeldKey::Right),
        KeyCode::Down
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(HeldKey::Down),
        _ => None,
    }
}

/// Whether `code` is one of the held keys handled here rather than by
/// [`crate::map::handle_key_event`].
pub fn is_held_key(code: KeyCode) -> bool {
    held_key(code).is_some()
}

/// Tracks held direction and soft-drop keys.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    repeat_accumulator: u32,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_repeat_ms(DEFAULT_HORIZONTAL_REPEAT_MS)
    }

    pub fn with_repeat_ms(repeat_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            repeat_accumulator: 0,
            repeat_ms: repeat_ms.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn repeat_ms(&self) -> u32 {
        self.repeat_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Returns the action to apply immediately, if any. A key that is
    /// already held yields nothing (terminal auto-repeat is ignored).
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let key = held_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            HeldKey::Left => self.press_horizontal(HorizontalDirection::Left, GameAction::MoveLeft),
            HeldKey::Right => {
                self.press_horizontal(HorizontalDirection::Right, GameAction::MoveRight)
            }
            HeldKey::Down => {
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(GameAction::SoftDropStart)
                }
            }
        }
    }

    fn press_horizontal(
        &mut self,
        direction: HorizontalDirection,
        action: GameAction,
    ) -> Option<GameAction> {
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.repeat_accumulator = 0;
        Some(action)
    }

    /// Returns `SoftDropStop` when the soft-drop key is released.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match held_key(code)? {
            HeldKey::Left => {
                self.release_horizontal(HorizontalDirection::Left);
                None
            }
            HeldKey::Right => {
                self.release_horizontal(HorizontalDirection::Right);
                None
            }
            HeldKey::Down => self.release_down(),
        }
    }

    fn release_horizontal(&mut self, direction: HorizontalDirection) {
        if self.horizontal == direction {
            self.horizontal = HorizontalDirection::None;
            self.repeat_accumulator = 0;
        }
    }

    fn release_down(&mut self) -> Option<GameAction> {
        if !self.down_held {
            return None;
        }
        self.down_held = false;
        Some(GameAction::SoftDropStop)
    }

    /// Advance by `elapsed_ms` and return the repeats (and timed-out
    /// releases) that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            self.horizontal = HorizontalDirection::None;
            self.repeat_accumulator = 0;
            if let Some(action) = self.release_down() {
                let _ = actions.try_push(action);
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => GameAction::MoveLeft,
            HorizontalDirection::Right => GameAction::MoveRight,
            HorizontalDirection::None => return actions,
        };

        self.repeat_accumulator += elapsed_ms;
        while self.repeat_accumulator >= self.repeat_ms {
            let _ = actions.try_push(repeat);
            self.repeat_accumulator -= self.repeat_ms;
        }

        actions
    }

    /// Forget all held keys. Returns `SoftDropStop` if a soft drop was active.
    pub fn reset(&mut self) -> Option<GameAction> {
        self.horizontal = HorizontalDirection::None;
        self.repeat_accumulator = 0;
        self.last_key_time = Instant::now();
        self.release_down()
    }

    #[cfg(test)]
    fn age_last_key(&mut self, ms: u64) {
        self.last_key_time = Instant::now() - std::time::Duration::from_millis(ms);
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
