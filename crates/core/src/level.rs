#![forbid(unsafe_code)]

/// XP granted for completing the preference quiz.
pub const QUIZ_XP: i64 = 50;
/// XP granted for publishing a post.
pub const POST_XP: i64 = 10;

/// Total XP threshold for a level: floor(100 * 1.5^(n-1)).
///
/// Truncation (not rounding-to-nearest) is part of the contract so level
/// thresholds stay reproducible.
pub fn xp_for_level(level: i64) -> i64 {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    (100.0 * 1.5f64.powi(exponent)).floor() as i64
}

/// Monotone level-up pass: the level climbs while the next threshold is met,
/// and never decreases.
pub fn level_after(level: i64, total_xp: i64) -> i64 {
    let mut level = level.max(1);
    while total_xp >= xp_for_level(level + 1) {
        level += 1;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_starts_at_100() {
        assert_eq!(xp_for_level(1), 100);
        assert_eq!(xp_for_level(2), 150);
        assert_eq!(xp_for_level(3), 225);
        assert_eq!(xp_for_level(4), 337);
    }

    #[test]
    fn curve_is_strictly_increasing() {
        for level in 1..40 {
            assert!(xp_for_level(level + 1) > xp_for_level(level), "level {level}");
        }
    }

    #[test]
    fn level_up_is_monotone_over_growing_xp() {
        let mut level = 1;
        let mut previous = 1;
        for total_xp in (0..5_000).step_by(37) {
            level = level_after(level, total_xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn level_after_climbs_multiple_thresholds_at_once() {
        // 0 -> 400 XP crosses the 150, 225 and 337 thresholds.
        assert_eq!(level_after(1, 400), 4);
        // Already past the threshold: stays put.
        assert_eq!(level_after(4, 400), 4);
    }

    #[test]
    fn level_never_decreases() {
        assert_eq!(level_after(5, 0), 5);
    }
}
