//! Read-only copy of session state for presentation and logging
//!
//! A snapshot owns its data, so it can be handed to a renderer or serialized
//! and sent elsewhere without borrowing the live session.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_PREVIEW};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    /// None while the piece can still fall.
    pub lock_ms: Option<u32>,
    pub play_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActivePiece>,
    pub ghost: Option<ActivePiece>,
    pub preview: ArrayVec<PieceKind, MAX_PREVIEW>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fullness: u32,
    pub fullness_target: Option<u32>,
    pub survival_limit_ms: Option<u32>,
    pub paused: bool,
    pub game_over: bool,
    pub won: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Neither paused nor finished.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.won && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            preview: ArrayVec::new(),
            held: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            fullness: 0,
            fullness_target: None,
            survival_limit_ms: None,
            paused: false,
            game_over: false,
            won: false,
            timers: TimersSnapshot {
                fall_ms: 0,
                lock_ms: None,
                play_ms: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_an_unstarted_session() {
        let snap = GameSnapshot::default();
        assert!(snap.board.iter().flatten().all(|c| c.is_none()));
        assert!(snap.active.is_none() && snap.preview.is_empty());
        assert!(snap.can_hold);
        assert_eq!((snap.score, snap.level, snap.lines), (0, 1, 0));
        assert!(snap.playable());
    }
}
