//! Scoring module - line-clear points and level progression
//!
//! Rules:
//! - A lock that clears `n` rows scores `n * 100 * level` (the level in effect
//!   *before* any level-up caused by the same clear).
//! - The level goes up by one when the running line total reaches
//!   `level * 10`; at most one level per lock.
//! - Every level-up shortens the gravity interval by 100ms, never below 100ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, POINTS_PER_LINE,
    STARTING_LEVEL,
};

/// Points for clearing `rows` rows at `level`
pub fn calculate_line_score(rows: u32, level: u32) -> u32 {
    rows.saturating_mul(POINTS_PER_LINE).saturating_mul(level)
}

/// Whether `lines` cleared so far earns a level-up at `level`
pub fn reaches_next_level(lines: u32, level: u32) -> bool {
    lines >= level.saturating_mul(LINES_PER_LEVEL)
}

/// Gravity interval after one level-up from `interval_ms`
pub fn next_drop_interval_ms(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_sub(DROP_STEP_MS)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Outcome of applying one lock's cleared rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub points: u32,
    pub leveled_up: bool,
}

/// Score, level, line total and gravity interval of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }
}

impl Progress {
    /// Account for `rows` cleared by a single lock
    ///
    /// Zero rows leaves everything untouched.
    pub fn apply_clear(&mut self, rows: u32) -> ClearResult {
        if rows == 0 {
            return ClearResult::default();
        }

        let points = calculate_line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows);

        let leveled_up = reaches_next_level(self.lines, self.level);
        if leveled_up {
            self.level += 1;
            self.drop_interval_ms = next_drop_interval_ms(self.drop_interval_ms);
        }

        ClearResult { points, leveled_up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_scales_with_rows_and_level() {
        assert_eq!(calculate_line_score(0, 5), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(4, 1), 400);
        assert_eq!(calculate_line_score(2, 3), 600);
    }

    #[test]
    fn test_two_rows_at_level_three() {
        let mut progress = Progress {
            level: 3,
            lines: 20,
            ..Progress::default()
        };
        let result = progress.apply_clear(2);
        assert_eq!(result.points, 600);
        assert_eq!(progress.score, 600);
        assert_eq!(progress.lines, 22);
        assert_eq!(progress.level, 3);
        assert!(!result.leveled_up);
    }

    #[test]
    fn test_level_up_at_threshold() {
        let mut progress = Progress {
            lines: 8,
            ..Progress::default()
        };
        let result = progress.apply_clear(2);
        assert!(result.leveled_up);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.drop_interval_ms, 900);
        // Points use the level before the level-up.
        assert_eq!(result.points, 200);
    }

    #[test]
    fn test_at_most_one_level_per_clear() {
        let mut progress = Progress {
            lines: 9,
            ..Progress::default()
        };
        // 13 lines would satisfy level 2's threshold as well.
        progress.apply_clear(4);
        assert_eq!(progress.lines, 13);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(next_drop_interval_ms(1000), 900);
        assert_eq!(next_drop_interval_ms(200), 100);
        assert_eq!(next_drop_interval_ms(100), 100);
        assert_eq!(next_drop_interval_ms(50), 100);

        let mut progress = Progress {
            level: 12,
            lines: 119,
            drop_interval_ms: 100,
            ..Progress::default()
        };
        assert!(progress.apply_clear(1).leveled_up);
        assert_eq!(progress.drop_interval_ms, 100);
    }

    #[test]
    fn test_zero_rows_is_a_no_op() {
        let mut progress = Progress::default();
        assert_eq!(progress.apply_clear(0), ClearResult::default());
        assert_eq!(progress, Progress::default());
    }
}
