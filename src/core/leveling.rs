//! Leveling module - the score-to-drop-interval curve
//!
//! A fixed, monotonically non-decreasing table: once `points` reaches the
//! threshold for the current level, the level increments and the gravity
//! interval tightens. Level and interval never regress; levels past the end
//! of the table keep the floor interval.

use crate::types::{BASE_DROP_SECS, DROP_INTERVAL_FLOOR_SECS};

/// (score threshold, drop interval in seconds) for advancing *out of* each
/// level, starting at level 1. Thresholds grow, intervals shrink.
const LEVEL_TABLE: [(u32, f32); 29] = [
    (600, 0.8),
    (1_800, 0.72),
    (2_800, 0.63),
    (3_600, 0.55),
    (5_800, 0.47),
    (6_400, 0.38),
    (9_800, 0.3),
    (15_200, 0.22),
    (18_800, 0.13),
    (21_000, 0.1),
    (24_800, 0.08),
    (28_800, 0.08),
    (32_800, 0.08),
    (67_600, 0.07),
    (82_800, 0.07),
    (122_400, 0.07),
    (200_800, 0.05),
    (329_200, 0.05),
    (498_800, 0.05),
    (648_000, 0.03),
    (724_800, 0.03),
    (778_800, 0.03),
    (862_800, 0.03),
    (921_600, 0.03),
    (999_999, 0.03),
    (999_999, 0.03),
    (999_999, 0.03),
    (999_999, 0.03),
    (999_999, 0.03),
];

/// Monotonic score-to-speed state. Starts at level 1 with the base interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leveling {
    current_level: u32,
    drop_interval: f32,
}

impl Leveling {
    pub fn new() -> Self {
        Self {
            current_level: 1,
            drop_interval: BASE_DROP_SECS,
        }
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Seconds between automatic one-cell descents.
    pub fn drop_interval(&self) -> f32 {
        self.drop_interval
    }

    /// Re-check the table against the cumulative score. A large score jump
    /// may advance several levels at once.
    pub fn on_points(&mut self, points: u32) {
        while let Some(&(threshold, interval)) =
            LEVEL_TABLE.get((self.current_level - 1) as usize)
        {
            if points < threshold {
                break;
            }
            self.current_level += 1;
            self.drop_interval = interval;
        }
    }
}

impl Default for Leveling {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_level_one_with_base_interval() {
        let leveling = Leveling::new();
        assert_eq!(leveling.current_level(), 1);
        assert_eq!(leveling.drop_interval(), BASE_DROP_SECS);
    }

    #[test]
    fn below_first_threshold_nothing_changes() {
        let mut leveling = Leveling::new();
        leveling.on_points(599);
        assert_eq!(leveling.current_level(), 1);
        assert_eq!(leveling.drop_interval(), BASE_DROP_SECS);
    }

    #[test]
    fn first_threshold_advances_to_level_two() {
        let mut leveling = Leveling::new();
        leveling.on_points(600);
        assert_eq!(leveling.current_level(), 2);
        assert_eq!(leveling.drop_interval(), 0.8);
    }

    #[test]
    fn big_score_jump_advances_multiple_levels() {
        let mut leveling = Leveling::new();
        leveling.on_points(3_000);
        // 3000 crosses 600, 1800, and 2800.
        assert_eq!(leveling.current_level(), 4);
        assert_eq!(leveling.drop_interval(), 0.63);
    }

    #[test]
    fn level_and_interval_are_monotonic() {
        let mut leveling = Leveling::new();
        let mut last_level = leveling.current_level();
        let mut last_interval = leveling.drop_interval();

        for points in (0..1_200_000).step_by(7_919) {
            leveling.on_points(points);
            assert!(leveling.current_level() >= last_level);
            assert!(leveling.drop_interval() <= last_interval);
            last_level = leveling.current_level();
            last_interval = leveling.drop_interval();
        }
    }

    #[test]
    fn table_exhaustion_keeps_floor_interval() {
        let mut leveling = Leveling::new();
        leveling.on_points(5_000_000);
        assert_eq!(leveling.current_level(), 30);
        assert_eq!(leveling.drop_interval(), DROP_INTERVAL_FLOOR_SECS);
    }

    #[test]
    fn table_is_internally_monotonic() {
        for pair in LEVEL_TABLE.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
            assert!(pair[0].1 >= pair[1].1);
        }
        assert_eq!(LEVEL_TABLE[LEVEL_TABLE.len() - 1].1, DROP_INTERVAL_FLOOR_SECS);
    }
}
