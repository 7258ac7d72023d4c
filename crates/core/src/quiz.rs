#![forbid(unsafe_code)]

use crate::tags::TagSet;
use std::collections::BTreeMap;

/// Profile archetype as seen by the scorer: identity plus its tag set,
/// in catalog insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    pub id: String,
    pub tags: TagSet,
}

/// Frequency of each tag across the questions the user liked.
pub fn tag_counts<'a, I>(liked: I) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = &'a TagSet>,
{
    let mut counts = BTreeMap::new();
    for tags in liked {
        for tag in tags.iter() {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

pub fn profile_score(tags: &TagSet, counts: &BTreeMap<String, u32>) -> u32 {
    tags.iter()
        .map(|tag| counts.get(tag).copied().unwrap_or(0))
        .sum()
}

/// Strictly-highest score wins; ties keep the first profile encountered, so
/// the result is deterministic for a fixed catalog order. With no liked
/// answers every score is 0 and the first profile wins.
pub fn best_profile<'a>(
    profiles: &'a [ProfileCard],
    counts: &BTreeMap<String, u32>,
) -> Option<(&'a ProfileCard, u32)> {
    let mut best: Option<(&ProfileCard, u32)> = None;
    for profile in profiles {
        let score = profile_score(&profile.tags, counts);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((profile, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, tags: &str) -> ProfileCard {
        ProfileCard {
            id: id.to_string(),
            tags: TagSet::parse(tags),
        }
    }

    #[test]
    fn tag_counts_accumulate_across_questions() {
        let sets = vec![
            TagSet::parse("spicy,exotic"),
            TagSet::parse("spicy"),
            TagSet::parse("sweet"),
        ];
        let counts = tag_counts(&sets);
        assert_eq!(counts.get("spicy"), Some(&2));
        assert_eq!(counts.get("exotic"), Some(&1));
        assert_eq!(counts.get("sweet"), Some(&1));
    }

    #[test]
    fn highest_overlap_wins() {
        let profiles = vec![card("a", "spicy,exotic"), card("b", "sweet")];
        let mut counts = BTreeMap::new();
        counts.insert("spicy".to_string(), 2);
        counts.insert("sweet".to_string(), 1);

        let (winner, score) = best_profile(&profiles, &counts).expect("winner");
        assert_eq!(winner.id, "a");
        assert_eq!(score, 2);
    }

    #[test]
    fn ties_keep_first_catalog_entry() {
        let profiles = vec![card("first", "sweet"), card("second", "spicy")];
        let mut counts = BTreeMap::new();
        counts.insert("sweet".to_string(), 1);
        counts.insert("spicy".to_string(), 1);

        let (winner, score) = best_profile(&profiles, &counts).expect("winner");
        assert_eq!(winner.id, "first");
        assert_eq!(score, 1);
    }

    #[test]
    fn no_liked_answers_selects_first_profile_with_zero_score() {
        let profiles = vec![card("first", "sweet"), card("second", "spicy")];
        let counts = BTreeMap::new();

        let (winner, score) = best_profile(&profiles, &counts).expect("winner");
        assert_eq!(winner.id, "first");
        assert_eq!(score, 0);
    }

    #[test]
    fn empty_catalog_yields_none() {
        assert!(best_profile(&[], &BTreeMap::new()).is_none());
    }
}
