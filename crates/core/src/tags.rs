#![forbid(unsafe_code)]

use std::collections::BTreeSet;

/// Label set parsed once from the comma-separated text column.
///
/// Trims, lowercases and deduplicates, so a tag repeated on the same row
/// counts once everywhere downstream. Iteration order is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn parse(raw: &str) -> Self {
        let mut out = BTreeSet::new();
        for part in raw.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            out.insert(trimmed.to_lowercase());
        }
        Self(out)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
