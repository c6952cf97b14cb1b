use std::sync::Arc;

use super::definition::{
    ApparelStyleset, CosmeticsStyleset, FoodStyleset, StylesetDefinition, WholesaleStyleset,
};
use crate::shop::{Shop, ShopDirectory, ShopRef};

/// Key of the family used when nothing else matches.
pub const DEFAULT_STYLESET_KEY: &str = "wholesale";

type DefinitionFactory = Box<dyn Fn() -> Box<dyn StylesetDefinition> + Send + Sync>;

/// Registry of styleset families, keyed by lower-case type key.
///
/// Registration order is resolution priority: when a shop's name or URL
/// matches keywords of several families, the earliest registered wins.
pub struct StylesetFactory {
    registry: Vec<(String, DefinitionFactory)>,
    default_key: String,
    directory: Option<Arc<dyn ShopDirectory>>,
}

impl Default for StylesetFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesetFactory {
    /// Registry with the built-in families. Wholesale goes last: its keywords
    /// are the least specific.
    pub fn new() -> Self {
        let mut factory = Self {
            registry: Vec::new(),
            default_key: DEFAULT_STYLESET_KEY.to_string(),
            directory: None,
        };
        factory.register("apparel", || Box::new(ApparelStyleset));
        factory.register("food", || Box::new(FoodStyleset));
        factory.register("cosmetics", || Box::new(CosmeticsStyleset));
        factory.register(DEFAULT_STYLESET_KEY, || Box::new(WholesaleStyleset));
        factory
    }

    /// Resolve bare shop ids through `directory`.
    pub fn with_directory(mut self, directory: Arc<dyn ShopDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Adds a family, or replaces the factory of an existing key in place.
    pub fn register<F>(&mut self, key: &str, factory: F)
    where
        F: Fn() -> Box<dyn StylesetDefinition> + Send + Sync + 'static,
    {
        let key = key.to_lowercase();
        let factory: DefinitionFactory = Box::new(factory);
        match self.registry.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = factory,
            None => self.registry.push((key, factory)),
        }
    }

    fn lookup(&self, key: &str) -> Option<&DefinitionFactory> {
        self.registry
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, factory)| factory)
    }

    /// A fresh definition for `key`; unknown keys get the default family.
    pub fn get(&self, key: &str) -> Box<dyn StylesetDefinition> {
        let key = key.to_lowercase();
        match self.lookup(&key).or_else(|| self.lookup(&self.default_key)) {
            Some(factory) => factory(),
            None => Box::new(WholesaleStyleset),
        }
    }

    pub fn resolve_type(&self, shop: ShopRef<'_>) -> String {
        let looked_up;
        let shop: Option<&Shop> = match shop {
            ShopRef::Shop(shop) => Some(shop),
            ShopRef::Id(id) => {
                looked_up = self.directory.as_ref().and_then(|d| d.find_shop(id));
                looked_up.as_ref()
            }
            ShopRef::Absent => None,
        };

        let Some(shop) = shop else {
            return self.default_key.clone();
        };

        let haystack = format!("{} {}", shop.name, shop.url).to_lowercase();
        for (key, factory) in &self.registry {
            let definition = factory();
            if definition.keywords().iter().any(|kw| haystack.contains(kw)) {
                log::debug!("shop {} resolved to styleset `{key}`", shop.id);
                return key.clone();
            }
        }
        self.default_key.clone()
    }

    pub fn get_for_shop(&self, shop: ShopRef<'_>) -> Box<dyn StylesetDefinition> {
        self.get(&self.resolve_type(shop))
    }

    /// `(key, display name)` for every registered family, in priority order.
    pub fn available_types(&self) -> Vec<(String, String)> {
        self.registry
            .iter()
            .map(|(key, factory)| (key.clone(), factory().display_name().to_string()))
            .collect()
    }
}
