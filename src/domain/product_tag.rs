use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a comma-separated list of tag identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagIdParseError {
    /// A token could not be parsed as an integer.
    #[error("`{0}` is not a valid tag identifier")]
    InvalidToken(String),
    /// A token parsed to zero or a negative number.
    #[error("tag identifier must be positive, got {0}")]
    NonPositive(i32),
}

/// Ordered, deduplicated set of tag identifiers linked (or to be linked) to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagIdSet(BTreeSet<i32>);

impl TagIdSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse the comma-separated wire representation submitted by forms.
    ///
    /// Absent or blank input yields an empty set. Blank tokens between commas
    /// are skipped, duplicates collapse.
    pub fn parse(raw: Option<&str>) -> Result<Self, TagIdParseError> {
        let Some(raw) = raw else {
            return Ok(Self::new());
        };

        let mut ids = BTreeSet::new();
        for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            let id = token
                .parse::<i32>()
                .map_err(|_| TagIdParseError::InvalidToken(token.to_string()))?;
            if id <= 0 {
                return Err(TagIdParseError::NonPositive(id));
            }
            ids.insert(id);
        }

        Ok(Self(ids))
    }

    pub fn insert(&mut self, id: i32) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Identifiers present in `self` but not in `other`.
    pub fn difference(&self, other: &TagIdSet) -> TagIdSet {
        Self(self.0.difference(&other.0).copied().collect())
    }

    /// Identifiers as a vector, in ascending order. Handy for `eq_any` filters.
    pub fn to_vec(&self) -> Vec<i32> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<i32> for TagIdSet {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for TagIdSet {
    type Err = TagIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for TagIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

/// Minimal set of join-table changes that turns one tag set into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    /// Links present now but no longer desired.
    pub to_detach: TagIdSet,
    /// Desired links that do not exist yet.
    pub to_attach: TagIdSet,
}

impl TagDelta {
    /// Compute the delta converging `existing` to `desired`.
    pub fn between(existing: &TagIdSet, desired: &TagIdSet) -> Self {
        Self {
            to_detach: existing.difference(desired),
            to_attach: desired.difference(existing),
        }
    }

    /// `true` when both operand sets are empty.
    pub fn is_noop(&self) -> bool {
        self.to_detach.is_empty() && self.to_attach.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i32]) -> TagIdSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn parse_treats_missing_and_blank_input_as_empty() {
        assert_eq!(TagIdSet::parse(None), Ok(TagIdSet::new()));
        assert_eq!(TagIdSet::parse(Some("")), Ok(TagIdSet::new()));
        assert_eq!(TagIdSet::parse(Some("  ,  ")), Ok(TagIdSet::new()));
    }

    #[test]
    fn parse_trims_and_deduplicates() {
        let parsed = TagIdSet::parse(Some(" 3, 1,3,,")).expect("valid ids");

        assert_eq!(parsed, set(&[1, 3]));
        assert_eq!(parsed.to_string(), "1,3");
    }

    #[test]
    fn parse_rejects_non_numeric_tokens() {
        let result = "1,x".parse::<TagIdSet>();

        assert_eq!(result, Err(TagIdParseError::InvalidToken("x".to_string())));
    }

    #[test]
    fn parse_rejects_non_positive_ids() {
        assert_eq!(
            TagIdSet::parse(Some("2,0")),
            Err(TagIdParseError::NonPositive(0))
        );
        assert_eq!(
            TagIdSet::parse(Some("-4")),
            Err(TagIdParseError::NonPositive(-4))
        );
    }

    #[test]
    fn delta_detaches_stale_and_attaches_only_new_ids() {
        let delta = TagDelta::between(&set(&[1, 2, 3]), &set(&[2, 3, 4]));

        assert_eq!(delta.to_detach, set(&[1]));
        assert_eq!(delta.to_attach, set(&[4]));
    }

    #[test]
    fn delta_between_identical_sets_is_noop() {
        let delta = TagDelta::between(&set(&[5]), &set(&[5]));

        assert!(delta.is_noop());
    }

    #[test]
    fn delta_from_empty_attaches_everything() {
        let delta = TagDelta::between(&TagIdSet::new(), &set(&[7, 8]));

        assert!(delta.to_detach.is_empty());
        assert_eq!(delta.to_attach, set(&[7, 8]));
    }

    #[test]
    fn delta_to_empty_detaches_everything() {
        let delta = TagDelta::between(&set(&[7, 8]), &TagIdSet::new());

        assert_eq!(delta.to_detach, set(&[7, 8]));
        assert!(delta.to_attach.is_empty());
    }
}
