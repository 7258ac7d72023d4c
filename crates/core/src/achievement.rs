#![forbid(unsafe_code)]

/// Closed set of achievement conditions the engine can actually evaluate.
///
/// The catalog carries more `condition_type` values than this (cuisines
/// explored, wine pairings, ...); those parse to `None` and are skipped
/// during the unlock check rather than treated as errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    MealsCooked,
    Streak,
    Followers,
    Posts,
}

impl ConditionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "meals_cooked" => Some(Self::MealsCooked),
            "streak" => Some(Self::Streak),
            "followers" => Some(Self::Followers),
            "posts" => Some(Self::Posts),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MealsCooked => "meals_cooked",
            Self::Streak => "streak",
            Self::Followers => "followers",
            Self::Posts => "posts",
        }
    }
}

/// User activity aggregates, fetched fresh from storage at check time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityCounters {
    pub menus_generated: i64,
    pub current_streak: i64,
    pub followers: i64,
    pub posts: i64,
}

pub fn condition_met(kind: ConditionKind, threshold: i64, counters: &ActivityCounters) -> bool {
    let value = match kind {
        ConditionKind::MealsCooked => counters.menus_generated,
        ConditionKind::Streak => counters.current_streak,
        ConditionKind::Followers => counters.followers,
        ConditionKind::Posts => counters.posts,
    };
    value >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!(
            ConditionKind::parse("meals_cooked"),
            Some(ConditionKind::MealsCooked)
        );
        assert_eq!(ConditionKind::parse("streak"), Some(ConditionKind::Streak));
        assert_eq!(
            ConditionKind::parse("followers"),
            Some(ConditionKind::Followers)
        );
        assert_eq!(ConditionKind::parse("posts"), Some(ConditionKind::Posts));
    }

    #[test]
    fn unmapped_condition_types_parse_to_none() {
        assert_eq!(ConditionKind::parse("cuisines"), None);
        assert_eq!(ConditionKind::parse("wine_pairings"), None);
        assert_eq!(ConditionKind::parse(""), None);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let counters = ActivityCounters {
            menus_generated: 10,
            current_streak: 3,
            followers: 0,
            posts: 1,
        };
        assert!(condition_met(ConditionKind::MealsCooked, 10, &counters));
        assert!(condition_met(ConditionKind::Streak, 3, &counters));
        assert!(!condition_met(ConditionKind::Streak, 4, &counters));
        assert!(!condition_met(ConditionKind::Followers, 1, &counters));
        assert!(condition_met(ConditionKind::Posts, 1, &counters));
    }
}
