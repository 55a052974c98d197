//! Session configuration
//!
//! All timings are in milliseconds. `Default` is the full game (three-piece
//! preview, lock delay); [`GameConfig::classic`] is the bare variant that
//! locks as soon as a piece cannot fall.

use serde::Serialize;

use crate::types::{
    DEFAULT_FALL_INTERVAL_MS, DEFAULT_FULLNESS_TARGET, DEFAULT_HORIZONTAL_REPEAT_MS,
    DEFAULT_LOCK_DELAY_MS, DEFAULT_PREVIEW_LEN, DEFAULT_SOFT_DROP_INTERVAL_MS,
    DEFAULT_SURVIVAL_LIMIT_MS, MAX_PREVIEW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// Upcoming pieces kept in the preview (1..=MAX_PREVIEW).
    pub preview_len: usize,
    /// Automatic fall interval.
    pub fall_interval_ms: u32,
    /// Fall interval while soft drop is held.
    pub soft_drop_interval_ms: u32,
    /// Grace period once the piece cannot fall; 0 locks immediately.
    pub lock_delay_ms: u32,
    /// Repeat interval for a held direction key (used by the input layer).
    pub horizontal_repeat_ms: u32,
    /// Fullness at which the session is won, if any.
    pub fullness_target: Option<u32>,
    /// Play time after which the session is won, if any.
    pub survival_limit_ms: Option<u32>,
}

impl GameConfig {
    /// Single-piece preview, no lock delay.
    pub fn classic() -> Self {
        Self {
            preview_len: 1,
            lock_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Default game plus the fullness and survival win conditions.
    pub fn feast() -> Self {
        Self {
            fullness_target: Some(DEFAULT_FULLNESS_TARGET),
            survival_limit_ms: Some(DEFAULT_SURVIVAL_LIMIT_MS),
            ..Self::default()
        }
    }

    /// Copy with out-of-range values pulled back into range.
    pub fn normalized(mut self) -> Self {
        self.preview_len = self.preview_len.clamp(1, MAX_PREVIEW);
        self.fall_interval_ms = self.fall_interval_ms.max(1);
        self.soft_drop_interval_ms = self.soft_drop_interval_ms.max(1);
        self.horizontal_repeat_ms = self.horizontal_repeat_ms.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preview_len: DEFAULT_PREVIEW_LEN,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            soft_drop_interval_ms: DEFAULT_SOFT_DROP_INTERVAL_MS,
            lock_delay_ms: DEFAULT_LOCK_DELAY_MS,
            horizontal_repeat_ms: DEFAULT_HORIZONTAL_REPEAT_MS,
            fullness_target: None,
            survival_limit_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let classic = GameConfig::classic();
        assert_eq!(classic.preview_len, 1);
        assert_eq!(classic.lock_delay_ms, 0);
        assert_eq!(classic.fullness_target, None);

        let feast = GameConfig::feast();
        assert_eq!(feast.preview_len, 3);
        assert_eq!(feast.fullness_target, Some(100));
        assert_eq!(feast.survival_limit_ms, Some(180_000));
    }

    #[test]
    fn normalized_clamps() {
        let cfg = GameConfig {
            preview_len: 0,
            fall_interval_ms: 0,
            ..GameConfig::default()
        }
        .normalized();
        assert_eq!(cfg.preview_len, 1);
        assert_eq!(cfg.fall_interval_ms, 1);

        let cfg = GameConfig {
            preview_len: 50,
            ..GameConfig::default()
        }
        .normalized();
        assert_eq!(cfg.preview_len, MAX_PREVIEW);
    }
}
