use serde::{Deserialize, Serialize};

pub type ShopId = u64;

/// The tenant fields the engine looks at. Everything else about a shop lives
/// in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Shop {
    pub fn new(id: ShopId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A tenant given as an object, a bare id, or not at all.
#[derive(Debug, Clone, Copy)]
pub enum ShopRef<'a> {
    Shop(&'a Shop),
    Id(ShopId),
    Absent,
}

impl<'a> From<&'a Shop> for ShopRef<'a> {
    fn from(shop: &'a Shop) -> Self {
        ShopRef::Shop(shop)
    }
}

impl From<ShopId> for ShopRef<'_> {
    fn from(id: ShopId) -> Self {
        ShopRef::Id(id)
    }
}

impl<'a> From<Option<&'a Shop>> for ShopRef<'a> {
    fn from(shop: Option<&'a Shop>) -> Self {
        shop.map_or(ShopRef::Absent, ShopRef::Shop)
    }
}

/// Looks shops up by id on behalf of the engine.
pub trait ShopDirectory: Send + Sync {
    fn find_shop(&self, id: ShopId) -> Option<Shop>;
}
