//! Runtime settings read from the environment.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `FOOD_TETRIS_SEED` | RNG seed (default: derived from the clock) |
//! | `FOOD_TETRIS_MODE` | `classic`, `standard` (default) or `feast` |
//! | `FOOD_TETRIS_PREVIEW` | preview length, clamped to `1..=6` |
//! | `FOOD_TETRIS_LOCK_DELAY_MS` | lock delay override |
//! | `FOOD_TETRIS_FALL_MS` | fall interval override |
//! | `FOOD_TETRIS_LOG_PATH` | append lock events as JSON lines to this file |
//!
//! Unparseable values are ignored and the default is used.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::core::GameConfig;

/// Rule preset selected by `FOOD_TETRIS_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One-piece preview, immediate lock.
    Classic,
    #[default]
    Standard,
    /// Standard plus fullness and survival win conditions.
    Feast,
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "standard" | "default" => Some(Mode::Standard),
            "feast" => Some(Mode::Feast),
            _ => None,
        }
    }

    pub fn config(self) -> GameConfig {
        match self {
            Mode::Classic => GameConfig::classic(),
            Mode::Standard => GameConfig::default(),
            Mode::Feast => GameConfig::feast(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub seed: u64,
    pub mode: Mode,
    pub config: GameConfig,
    pub log_path: Option<PathBuf>,
}

impl Settings {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u32 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());

        let seed = lookup("FOOD_TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let mode = lookup("FOOD_TETRIS_MODE")
            .and_then(|s| Mode::from_str(&s))
            .unwrap_or_default();

        let mut config = mode.config();
        if let Some(n) = parse_u32("FOOD_TETRIS_PREVIEW") {
            config.preview_len = n as usize;
        }
        if let Some(ms) = parse_u32("FOOD_TETRIS_LOCK_DELAY_MS") {
            config.lock_delay_ms = ms;
        }
        if let Some(ms) = parse_u32("FOOD_TETRIS_FALL_MS") {
            config.fall_interval_ms = ms;
        }

        let log_path = lookup("FOOD_TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            seed,
            mode,
            config: config.normalized(),
            log_path,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[("FOOD_TETRIS_SEED", "42")]);
        assert_eq!(s.seed, 42);
        assert_eq!(s.mode, Mode::Standard);
        assert_eq!(s.config, GameConfig::default());
        assert_eq!(s.log_path, None);
    }

    #[test]
    fn mode_and_overrides() {
        let s = settings(&[
            ("FOOD_TETRIS_MODE", "Feast"),
            ("FOOD_TETRIS_PREVIEW", "5"),
            ("FOOD_TETRIS_LOCK_DELAY_MS", "250"),
            ("FOOD_TETRIS_FALL_MS", "800"),
            ("FOOD_TETRIS_LOG_PATH", " /tmp/food.jsonl "),
        ]);
        assert_eq!(s.mode, Mode::Feast);
        assert_eq!(s.config.preview_len, 5);
        assert_eq!(s.config.lock_delay_ms, 250);
        assert_eq!(s.config.fall_interval_ms, 800);
        assert_eq!(s.config.fullness_target, Some(100));
        assert_eq!(s.log_path, Some(PathBuf::from("/tmp/food.jsonl")));
    }

    #[test]
    fn bad_values_fall_back() {
        let s = settings(&[
            ("FOOD_TETRIS_MODE", "brunch"),
            ("FOOD_TETRIS_PREVIEW", "lots"),
            ("FOOD_TETRIS_FALL_MS", "-3"),
            ("FOOD_TETRIS_LOG_PATH", "  "),
        ]);
        assert_eq!(s.mode, Mode::Standard);
        assert_eq!(s.config.preview_len, 3);
        assert_eq!(s.config.fall_interval_ms, 1000);
        assert_eq!(s.log_path, None);
    }

    #[test]
    fn preview_is_clamped() {
        let s = settings(&[("FOOD_TETRIS_PREVIEW", "0")]);
        assert_eq!(s.config.preview_len, 1);
        let s = settings(&[("FOOD_TETRIS_PREVIEW", "99")]);
        assert_eq!(s.config.preview_len, 6);
    }

    #[test]
    fn classic_mode() {
        let s = settings(&[("FOOD_TETRIS_MODE", "classic")]);
        assert_eq!(s.config.preview_len, 1);
        assert_eq!(s.config.lock_delay_ms, 0);
    }
}
