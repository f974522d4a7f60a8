//! Scoring module - row-clear points, levels and gravity speed
//!
//! Rules:
//! - Clearing `n` rows at once awards `100 * 2^(n-1)`; zero rows award nothing.
//! - The level is `ceil(score / 1000)`, never below 1 and never decreasing.
//! - Entering an odd level halves the gravity interval. Even levels leave it
//!   alone, so the speed-up is asymmetric.

use crate::types::{FIRST_LEVEL, LEVEL_SCORE_STEP, MIN_TICK_MS, ROW_CLEAR_BASE_SCORE};

/// Points for clearing `rows` rows simultaneously
pub fn row_clear_score(rows: usize) -> u32 {
    if rows == 0 {
        return 0;
    }
    ROW_CLEAR_BASE_SCORE.saturating_mul(1u32 << (rows as u32 - 1).min(31))
}

/// Level implied by a score: `ceil(score / 1000)`, at least 1
pub fn level_for_score(score: u32) -> u32 {
    score.div_ceil(LEVEL_SCORE_STEP).max(FIRST_LEVEL)
}

/// Gravity interval after entering `level` from the current `interval_ms`.
pub fn interval_after_level_up(level: u32, interval_ms: u32) -> u32 {
    if level % 2 == 1 {
        (interval_ms / 2).max(MIN_TICK_MS)
    } else {
        interval_ms
    }
}

/// A level transition produced by [`ScoreState::modulate_level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub tick_interval_ms: u32,
    /// Whether the gravity interval changed (odd level)
    pub sped_up: bool,
}

/// Rows-cleared counter, score, level and current gravity interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub rows_cleared: u32,
    pub level: u32,
    pub tick_interval_ms: u32,
}

impl ScoreState {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            score: 0,
            rows_cleared: 0,
            level: FIRST_LEVEL,
            tick_interval_ms,
        }
    }

    /// Account for `rows` simultaneously cleared rows. Returns the points awarded.
    pub fn apply_clear(&mut self, rows: usize) -> u32 {
        let points = row_clear_score(rows);
        self.rows_cleared = self.rows_cleared.saturating_add(rows as u32);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Raise the level if the score moved past the current level's threshold.
    pub fn modulate_level(&mut self) -> Option<LevelUp> {
        let level = level_for_score(self.score);
        if level <= self.level {
            return None;
        }

        let before = self.tick_interval_ms;
        self.level = level;
        self.tick_interval_ms = interval_after_level_up(level, before);
        Some(LevelUp {
            level,
            tick_interval_ms: self.tick_interval_ms,
            sped_up: self.tick_interval_ms != before,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_TICK_MS;

    #[test]
    fn test_row_clear_scores() {
        assert_eq!(row_clear_score(0), 0);
        assert_eq!(row_clear_score(1), 100);
        assert_eq!(row_clear_score(2), 200);
        assert_eq!(row_clear_score(3), 400);
        assert_eq!(row_clear_score(4), 800);
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(100), 1);
        assert_eq!(level_for_score(1000), 1);
        assert_eq!(level_for_score(1100), 2);
        assert_eq!(level_for_score(2000), 2);
        assert_eq!(level_for_score(2100), 3);
    }

    #[test]
    fn test_interval_halves_only_on_odd_levels() {
        assert_eq!(interval_after_level_up(2, 800), 800);
        assert_eq!(interval_after_level_up(3, 800), 400);
        assert_eq!(interval_after_level_up(4, 400), 400);
        assert_eq!(interval_after_level_up(5, 400), 200);
        assert_eq!(interval_after_level_up(7, 1), 1);
    }

    #[test]
    fn test_zero_clear_leaves_score() {
        let mut state = ScoreState::new(BASE_TICK_MS);
        assert_eq!(state.apply_clear(0), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.rows_cleared, 0);
    }

    #[test]
    fn test_level_progression() {
        let mut state = ScoreState::new(BASE_TICK_MS);

        state.score = 1000;
        assert_eq!(state.modulate_level(), None);

        state.score = 1100;
        let up = state.modulate_level().unwrap();
        assert_eq!(up.level, 2);
        assert!(!up.sped_up);
        assert_eq!(state.tick_interval_ms, 800);

        state.score = 2300;
        let up = state.modulate_level().unwrap();
        assert_eq!(up.level, 3);
        assert!(up.sped_up);
        assert_eq!(state.tick_interval_ms, 400);

        // Same level again: no change.
        assert_eq!(state.modulate_level(), None);
    }
}
