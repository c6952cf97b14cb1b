use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Built-in theme values every compiled styleset starts from.
pub const DEFAULT_VARIABLES: &[(&str, &str)] = &[
    ("primary-color", "#2563eb"),
    ("secondary-color", "#64748b"),
    ("accent-color", "#f59e0b"),
    ("text-color", "#1f2937"),
    ("background-color", "#ffffff"),
    ("heading-font-family", "system-ui, sans-serif"),
    ("body-font-family", "system-ui, sans-serif"),
    ("base-font-size", "16px"),
    ("line-height", "1.7"),
    ("spacing-unit", "1rem"),
    ("section-spacing", "4rem"),
    ("border-radius", "8px"),
    ("container-width", "1200px"),
    ("narrow-width", "800px"),
];

/// Ordered custom-property values keyed by normalized name.
///
/// Names are stored without leading dashes, so `--primary-color` and
/// `primary-color` address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesetVariables(Vec<(String, String)>);

impl StylesetVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults() -> Self {
        DEFAULT_VARIABLES.iter().copied().collect()
    }

    pub fn normalize_name(name: &str) -> &str {
        name.trim().trim_start_matches('-')
    }

    /// Sets a value; an existing entry is overwritten in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let name = Self::normalize_name(name);
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = Self::normalize_name(name);
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `self` overlaid with `overrides`; overriding values win, new names are
    /// appended after the existing ones.
    pub fn merged_with(&self, overrides: &StylesetVariables) -> Self {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.set(name, value);
        }
        merged
    }

    /// Defaults overlaid with `overrides`.
    pub fn resolve(overrides: &StylesetVariables) -> Self {
        Self::defaults().merged_with(overrides)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StylesetVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.set(name.as_ref(), value);
        }
        vars
    }
}

impl Serialize for StylesetVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
