//! The durable set of claimed avatar tokens.

use serde::{Deserialize, Serialize};

use super::catalog;

/// Set of claimed tokens, kept in insertion order for stable serialization.
///
/// Membership is what matters; the order only keeps the persisted file
/// diffable. Entries that are not in the catalog are preserved verbatim but
/// never count as claims on catalog avatars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ClaimSet {
    tokens: Vec<String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list, dropping duplicates (first occurrence wins).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for token in tokens {
            set.insert(token);
        }
        set
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Appends `token` if absent. Returns `true` when the set changed.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of catalog avatars that are claimed; foreign entries are ignored.
    pub fn catalog_claims(&self) -> usize {
        self.iter().filter(|t| catalog::contains(t)).count()
    }

    /// Tokens present in `self` but not in `other`, in insertion order.
    pub fn difference<'a>(&'a self, other: &'a ClaimSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |t| !other.contains(t))
    }
}

impl From<Vec<String>> for ClaimSet {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<ClaimSet> for Vec<String> {
    fn from(set: ClaimSet) -> Self {
        set.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut set = ClaimSet::new();
        assert!(set.insert("🦦"));
        assert!(set.insert("🦇"));
        assert!(!set.insert("🦦"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["🦦", "🦇"]);
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let set: ClaimSet = serde_json::from_str(r#"["🦦", "🦇", "🦦"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_foreign_entries_are_kept_but_not_counted() {
        let set = ClaimSet::from_tokens(["🦦", "🦊"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.catalog_claims(), 1);
    }

    #[test]
    fn test_difference() {
        let old = ClaimSet::from_tokens(["🦦"]);
        let new = ClaimSet::from_tokens(["🦦", "🐢", "🦑"]);
        assert_eq!(new.difference(&old).collect::<Vec<_>>(), vec!["🐢", "🦑"]);
    }
}
