use serde::{Deserialize, Serialize};

/// Class tokens in first-seen order, without duplicates.
///
/// Tokens are only ever appended; once a token is in the set its position
/// never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssClassSet(Vec<String>);

impl CssClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every whitespace-separated token of a `class` attribute value
    /// that has not been seen yet.
    pub fn extend_from_attr(&mut self, class_attr: &str) {
        for token in class_attr.split_whitespace() {
            self.insert(token);
        }
    }

    /// Returns `true` if the token was newly added.
    pub fn insert(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.0.push(token.to_string());
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
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

    /// Space-joined tokens, as they would appear in a `class` attribute.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> FromIterator<&'a str> for CssClassSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for attr in iter {
            set.extend_from_attr(attr);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_first_seen_order_without_duplicates() {
        let set: CssClassSet = ["a b", "b c"].into_iter().collect();
        assert_eq!(set.as_slice(), &["a", "b", "c"]);
    }

    #[test]
    fn splits_on_any_whitespace() {
        let mut set = CssClassSet::new();
        set.extend_from_attr("  hero\tbanner\n  hero ");
        assert_eq!(set.joined(), "hero banner");
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = CssClassSet::new();
        assert!(set.insert("card"));
        assert!(!set.insert("card"));
        assert!(!set.insert("   "));
        assert_eq!(set.len(), 1);
    }
}
