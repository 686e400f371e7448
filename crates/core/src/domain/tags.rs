//! Open-ended tag vocabulary with case-insensitive membership.
//!
//! Tags, colors and categories are free text in stored wardrobes. Every
//! comparison in the engine goes through [`normalize_tag`] so casing and
//! stray whitespace never decide a match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Canonical comparison form of a tag, color or category label.
pub fn normalize_tag(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive label equality.
pub fn labels_match(a: &str, b: &str) -> bool {
    let a = normalize_tag(a);
    !a.is_empty() && a == normalize_tag(b)
}

/// A set of normalized labels. Empty labels are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return false;
        }
        self.0.insert(normalized)
    }

    pub fn contains(&self, tag: &str) -> bool {
        let normalized = normalize_tag(tag);
        !normalized.is_empty() && self.0.contains(&normalized)
    }

    /// True when any of `candidates` is a member.
    pub fn contains_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|candidate| self.contains(candidate))
    }

    pub fn intersects(&self, other: &TagSet) -> bool {
        self.0.iter().any(|tag| other.0.contains(tag))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for TagSet {
    fn from(values: Vec<String>) -> Self {
        values.iter().map(String::as_str).collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
