#![forbid(unsafe_code)]

use time::Date;

pub const DAILY_BASE_XP: i64 = 25;

/// Consecutive-day counter for the daily quiz action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreakState {
    pub current: i64,
    pub longest: i64,
    pub last_quiz_date: Option<Date>,
}

impl StreakState {
    pub fn new() -> Self {
        Self {
            current: 0,
            longest: 0,
            last_quiz_date: None,
        }
    }

    /// One transition per calendar day: yesterday extends the streak, a
    /// replay on the same day changes nothing, anything else resets to 1.
    pub fn advance(self, today: Date) -> Self {
        let current = match self.last_quiz_date {
            Some(last) if Some(last) == today.previous_day() => self.current + 1,
            Some(last) if last == today => self.current,
            _ => 1,
        };
        Self {
            current,
            longest: self.longest.max(current),
            last_quiz_date: Some(today),
        }
    }
}

impl Default for StreakState {
    fn default() -> Self {
        Self::new()
    }
}

/// Daily quiz XP: the streak bonus only kicks in past day one and its
/// contribution caps at 50.
pub fn daily_xp(current_streak: i64) -> i64 {
    if current_streak > 1 {
        DAILY_BASE_XP + 5 * current_streak.min(10)
    } else {
        DAILY_BASE_XP
    }
}
