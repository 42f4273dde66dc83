// src/store/catalog.rs
use std::{
    collections::{btree_map, BTreeMap},
    path::{Path, PathBuf},
};

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    file::{read_json, write_json},
    product::{Product, ProductId},
};

/// Tracked products keyed by id. Iteration is in id order, so a check run
/// always visits products in the same sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn contains(&self, id: &ProductId) -> bool { self.entries.contains_key(id) }
    pub fn get(&self, id: &ProductId) -> Option<&Product> { self.entries.get(id) }
    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> { self.entries.get_mut(id) }

    pub fn insert(&mut self, id: ProductId, product: Product) -> Option<Product> {
        self.entries.insert(id, product)
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        self.entries.remove(id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ProductId, Product> {
        self.entries.iter()
    }

    /// Ids in iteration order (snapshot, so callers may mutate while walking).
    pub fn ids(&self) -> Vec<ProductId> {
        self.entries.keys().cloned().collect()
    }

    /// 1-based position lookup, as shown in numbered listings.
    pub fn id_at(&self, position: usize) -> Option<&ProductId> {
        position.checked_sub(1).and_then(|i| self.entries.keys().nth(i))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a ProductId, &'a Product);
    type IntoIter = btree_map::Iter<'a, ProductId, Product>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// What `CatalogStore::load` found on disk.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Missing,
    Loaded(usize),
    /// File existed but could not be read/parsed; an empty catalog was used.
    Corrupt(String),
}

/// JSON file holding the whole catalog. Every save rewrites it.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: absent or corrupt input falls back to an empty catalog.
    pub fn load(&self) -> (Catalog, LoadOutcome) {
        match read_json::<Catalog>(&self.path) {
            Ok(Some(catalog)) => {
                info!("Catalog: loaded {} product(s) from {}", catalog.len(), self.path.display());
                let n = catalog.len();
                (catalog, LoadOutcome::Loaded(n))
            }
            Ok(None) => (Catalog::default(), LoadOutcome::Missing),
            Err(e) => {
                error!("Catalog: {e}; starting empty");
                (Catalog::default(), LoadOutcome::Corrupt(e.to_string()))
            }
        }
    }

    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        write_json(&self.path, catalog)?;
        info!("Catalog: saved {} product(s) → {}", catalog.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("pricewatch_catalog_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    fn sample() -> Catalog {
        let mut c = Catalog::default();
        c.insert(ProductId::from("B2"), Product::new("https://www.amazon.com/dp/B2", "Beta", 3.5));
        c.insert(ProductId::from("A1"), Product::new("https://www.amazon.com/dp/A1", "Alpha", 10.0));
        c
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = CatalogStore::new(tmp_dir("missing").join("c.json"));
        let (c, outcome) = store.load();
        assert!(c.is_empty());
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn corrupt_file_loads_empty_and_reports() {
        let dir = tmp_dir("corrupt");
        let path = dir.join("c.json");
        fs::write(&path, "[1, 2").unwrap();
        let (c, outcome) = CatalogStore::new(&path).load();
        assert!(c.is_empty());
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
    }

    #[test]
    fn save_load_round_trip_is_idempotent() {
        let dir = tmp_dir("roundtrip");
        let store = CatalogStore::new(dir.join("c.json"));
        store.save(&sample()).unwrap();

        let (first, _) = store.load();
        let bytes_first = fs::read(store.path()).unwrap();
        store.save(&first).unwrap();
        let (second, outcome) = store.load();

        assert_eq!(first, sample());
        assert_eq!(first, second);
        assert_eq!(outcome, LoadOutcome::Loaded(2));
        assert_eq!(bytes_first, fs::read(store.path()).unwrap());
    }

    #[test]
    fn reads_object_keyed_by_id() {
        let dir = tmp_dir("shape");
        let path = dir.join("c.json");
        fs::write(
            &path,
            r#"{ "B0X": { "url": "https://www.amazon.com/dp/B0X", "name": "Thing", "last_price": 19.99 },
                 "B0Y": { "url": "https://www.amazon.com/dp/B0Y" } }"#,
        )
        .unwrap();
        let (c, _) = CatalogStore::new(&path).load();
        assert_eq!(c.get(&ProductId::from("B0X")).unwrap().last_price, Some(19.99));
        let y = c.get(&ProductId::from("B0Y")).unwrap();
        assert_eq!(y.name, "Unknown Product");
        assert_eq!(y.last_price, None);
    }

    #[test]
    fn iteration_and_positions_follow_id_order() {
        let c = sample();
        let ids: Vec<&str> = c.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "B2"]);
        assert_eq!(c.id_at(2).map(|i| i.as_str()), Some("B2"));
        assert_eq!(c.id_at(0), None);
        assert_eq!(c.id_at(3), None);
    }
}
