use super::variables::StylesetVariables;
use crate::shop::ShopId;

/// A family of tenant themes: variable overrides plus free-form CSS.
pub trait StylesetDefinition: Send + Sync {
    /// Registry key, lower-case.
    fn key(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Lower-case fragments of a shop's name or URL that select this family.
    fn keywords(&self) -> &[&str] {
        &[]
    }

    /// Values overriding the built-in defaults.
    fn variables(&self) -> StylesetVariables {
        StylesetVariables::new()
    }

    fn custom_css(&self) -> &str {
        ""
    }
}

/// Provides the styleset a shop currently has active, if any.
pub trait StylesetSource: Send + Sync {
    fn active_styleset(&self, shop_id: ShopId) -> Option<Box<dyn StylesetDefinition>>;
}

/// A styleset as saved by the host application for one shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredStyleset {
    pub key: String,
    pub name: String,
    pub variables: StylesetVariables,
    pub custom_css: String,
}

impl StylesetDefinition for StoredStyleset {
    fn key(&self) -> &str {
        &self.key
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn variables(&self) -> StylesetVariables {
        self.variables.clone()
    }

    fn custom_css(&self) -> &str {
        &self.custom_css
    }
}

/// Neutral catalogue look; the fallback family.
#[derive(Debug, Default)]
pub struct WholesaleStyleset;

impl StylesetDefinition for WholesaleStyleset {
    fn key(&self) -> &str {
        "wholesale"
    }

    fn display_name(&self) -> &str {
        "Wholesale"
    }

    fn keywords(&self) -> &[&str] {
        &["wholesale", "bulk", "b2b", "supply"]
    }
}

#[derive(Debug, Default)]
pub struct ApparelStyleset;

impl StylesetDefinition for ApparelStyleset {
    fn key(&self) -> &str {
        "apparel"
    }

    fn display_name(&self) -> &str {
        "Apparel"
    }

    fn keywords(&self) -> &[&str] {
        &["apparel", "fashion", "wear", "clothing", "boutique"]
    }

    fn variables(&self) -> StylesetVariables {
        [
            ("primary-color", "#111827"),
            ("accent-color", "#be185d"),
            ("heading-font-family", "\"Playfair Display\", serif"),
            ("border-radius", "0"),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Debug, Default)]
pub struct FoodStyleset;

impl StylesetDefinition for FoodStyleset {
    fn key(&self) -> &str {
        "food"
    }

    fn display_name(&self) -> &str {
        "Food & Grocery"
    }

    fn keywords(&self) -> &[&str] {
        &["food", "gourmet", "grocery", "kitchen", "bakery", "sweets", "tea", "coffee"]
    }

    fn variables(&self) -> StylesetVariables {
        [
            ("primary-color", "#15803d"),
            ("accent-color", "#ea580c"),
            ("background-color", "#fffbeb"),
            ("border-radius", "12px"),
        ]
        .into_iter()
        .collect()
    }
}

#[derive(Debug, Default)]
pub struct CosmeticsStyleset;

impl StylesetDefinition for CosmeticsStyleset {
    fn key(&self) -> &str {
        "cosmetics"
    }

    fn display_name(&self) -> &str {
        "Cosmetics & Beauty"
    }

    fn keywords(&self) -> &[&str] {
        &["cosme", "beauty", "skin", "salon", "makeup"]
    }

    fn variables(&self) -> StylesetVariables {
        [
            ("primary-color", "#db2777"),
            ("secondary-color", "#f9a8d4"),
            ("body-font-family", "\"Noto Sans\", sans-serif"),
            ("border-radius", "999px"),
        ]
        .into_iter()
        .collect()
    }
}
