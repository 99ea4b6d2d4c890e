//! Ordered, url-keyed catalog list used by the catalog index

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::AssetRef;

/// Catalog assets keyed by `url`, iterated in insertion order.
///
/// Serialized as a plain JSON array. Inserting a url that is already present
/// replaces that entry in place; a new url is appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSet {
    entries: IndexMap<String, AssetRef>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by url. Returns the replaced entry, if any.
    pub fn upsert(&mut self, asset: AssetRef) -> Option<AssetRef> {
        self.entries.insert(asset.url.clone(), asset)
    }

    pub fn get(&self, url: &str) -> Option<&AssetRef> {
        self.entries.get(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        self.entries.values()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<AssetRef> for CatalogSet {
    fn from_iter<I: IntoIterator<Item = AssetRef>>(iter: I) -> Self {
        let mut set = CatalogSet::new();
        for asset in iter {
            set.upsert(asset);
        }
        set
    }
}

impl Extend<AssetRef> for CatalogSet {
    fn extend<I: IntoIterator<Item = AssetRef>>(&mut self, iter: I) {
        for asset in iter {
            self.upsert(asset);
        }
    }
}

impl Serialize for CatalogSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de> Deserialize<'de> for CatalogSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let assets = Vec::<AssetRef>::deserialize(deserializer)?;
        Ok(assets.into_iter().collect())
    }
}
