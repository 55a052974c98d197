//! Scoring module - line table, levels and fullness
//!
//! Clearing `n` rows at once awards `LINE_SCORES[n] * level`. The level is
//! derived from total lines (`lines / 10 + 1`), so it never drops below 1.
//! Each cleared line also adds to a fullness meter used by the feast mode.

use serde::Serialize;

use crate::types::{FULLNESS_PER_LINE, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level reached after `lines` total cleared lines.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Running score, level, line count and fullness for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fullness: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            fullness: 0,
        }
    }

    /// Apply a clear of `lines` rows and return the points awarded.
    ///
    /// Scoring uses the level in effect before the clear. Fullness is capped
    /// at `fullness_target` when one is set. Zero lines changes nothing.
    pub fn apply_clear(&mut self, lines: usize, fullness_target: Option<u32>) -> u32 {
        if lines == 0 {
            return 0;
        }

        let points = line_clear_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += lines as u32;
        self.level = level_for_lines(self.lines);

        let fullness = self.fullness + FULLNESS_PER_LINE * lines as u32;
        self.fullness = match fullness_target {
            Some(target) => fullness.min(target),
            None => fullness,
        };

        points
    }

    /// Whether the fullness meter has reached `target`.
    pub fn is_full(&self, fullness_target: Option<u32>) -> bool {
        fullness_target.is_some_and(|target| self.fullness >= target)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_level_one() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
        assert_eq!(line_clear_score(5, 1), 0);
    }

    #[test]
    fn test_line_clear_score_scales_with_level() {
        assert_eq!(line_clear_score(1, 2), 200);
        assert_eq!(line_clear_score(4, 3), 2400);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(20), 3);
    }

    #[test]
    fn test_apply_clear_zero_lines_is_noop() {
        let mut p = Progress::new();
        assert_eq!(p.apply_clear(0, Some(100)), 0);
        assert_eq!(p, Progress::new());
    }

    #[test]
    fn test_apply_clear_uses_level_before_clear() {
        let mut p = Progress {
            score: 0,
            level: 1,
            lines: 9,
            fullness: 0,
        };
        assert_eq!(p.apply_clear(1, None), 100);
        assert_eq!(p.level, 2);
        assert_eq!(p.lines, 10);
    }

    #[test]
    fn test_fullness_is_capped() {
        let mut p = Progress::new();
        p.apply_clear(4, Some(100));
        assert_eq!(p.fullness, 80);
        assert!(!p.is_full(Some(100)));
        p.apply_clear(2, Some(100));
        assert_eq!(p.fullness, 100);
        assert!(p.is_full(Some(100)));
        assert!(!p.is_full(None));
    }
}
