//! # Key-Value Store
//!
//! The persistence seam: four fixed keys, each holding one JSON blob.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────────────────┐
//! │ key          │ value                                                    │
//! ├──────────────┼──────────────────────────────────────────────────────────┤
//! │ products     │ [{"id":..,"name":..,"category":..,"price":..,"stock":..}]│
//! │ sales        │ [{"id":..,"customerName":..,"items":[..],"isPaid":..}]   │
//! │ expenses     │ [{"id":..,"description":..,"amount":..,"date":..}]       │
//! │ settings     │ {"name":..,"logoUri":..,"phone":..,"email":..}           │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations: [`SqliteStore`](crate::SqliteStore) for the device,
//! [`MemoryStore`](crate::MemoryStore) for tests and previews.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::StoreResult;

// =============================================================================
// Keys
// =============================================================================

/// The fixed storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Products,
    Sales,
    Expenses,
    Settings,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Products,
        StorageKey::Sales,
        StorageKey::Expenses,
        StorageKey::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Products => "products",
            StorageKey::Sales => "sales",
            StorageKey::Expenses => "expenses",
            StorageKey::Settings => "settings",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Trait
// =============================================================================

/// Raw string storage under fixed keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored blob, `None` if the key was never written.
    async fn load(&self, key: StorageKey) -> StoreResult<Option<String>>;

    /// Replaces the blob under `key`.
    async fn save(&self, key: StorageKey, json: &str) -> StoreResult<()>;

    /// Removes every key.
    async fn clear(&self) -> StoreResult<()>;
}

// =============================================================================
// Typed Helpers
// =============================================================================

/// Loads and decodes a blob.
///
/// A missing key or a blob that does not decode yields `T::default()`;
/// only storage failures are returned as errors.
pub async fn load_json<T>(store: &dyn KeyValueStore, key: StorageKey) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.load(key).await? else {
        debug!(key = %key, "No stored value, using default");
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Stored value does not decode, using default");
            Ok(T::default())
        }
    }
}

/// Loads a JSON array record by record.
///
/// Records that do not decode are skipped with a warning; the rest are
/// kept in stored order. A missing key or a blob that is not an array
/// yields an empty list.
pub async fn load_list<T>(store: &dyn KeyValueStore, key: StorageKey) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.load(key).await? else {
        debug!(key = %key, "No stored list, starting empty");
        return Ok(Vec::new());
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(key = %key, error = %e, "Stored list does not decode, starting empty");
            return Ok(Vec::new());
        }
    };

    let stored = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = %key, index, error = %e, "Skipping stored record that does not decode");
                None
            }
        })
        .collect();

    if records.len() < stored {
        warn!(
            key = %key,
            kept = records.len(),
            skipped = stored - records.len(),
            "Some stored records were skipped"
        );
    }

    Ok(records)
}

/// Encodes and saves a value.
pub async fn save_json<T>(store: &dyn KeyValueStore, key: StorageKey, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.save(key, &json).await?;
    debug!(key = %key, bytes = json.len(), "Saved value");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use boutique_core::{Product, ShopSettings};

    #[tokio::test]
    async fn test_missing_key_loads_default() {
        let store = MemoryStore::new();
        let products: Vec<Product> = load_json(&store, StorageKey::Products).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_default() {
        let store = MemoryStore::new();
        store.save(StorageKey::Settings, "{not json").await.unwrap();

        let settings: ShopSettings = load_json(&store, StorageKey::Settings).await.unwrap();
        assert_eq!(settings, ShopSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let products = vec![Product {
            id: "p1".to_string(),
            name: "Riz".to_string(),
            category: "Alimentation".to_string(),
            price: 500,
            stock: 10,
        }];

        save_json(&store, StorageKey::Products, &products).await.unwrap();
        let raw = store.load(StorageKey::Products).await.unwrap().unwrap();
        assert!(raw.contains("\"name\":\"Riz\""));

        let loaded: Vec<Product> = load_json(&store, StorageKey::Products).await.unwrap();
        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn test_list_skips_only_bad_records() {
        let store = MemoryStore::new();
        store
            .save(
                StorageKey::Products,
                r#"[
                    {"id":"p1","name":"Riz","category":"Alimentation","price":500,"stock":10},
                    {"id":"p2","name":"Huile","category":"Alimentation","price":null,"stock":4},
                    {"id":"p3","category":"Alimentation","price":300,"stock":1},
                    "not a product",
                    {"id":"p4","name":"Sucre","category":"Alimentation","price":650.5,"stock":2}
                ]"#,
            )
            .await
            .unwrap();

        let products: Vec<Product> = load_list(&store, StorageKey::Products).await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Riz", "Huile", "Sucre"]);
        assert_eq!(products[1].price, 0);
        assert_eq!(products[2].price, 650);
    }

    #[tokio::test]
    async fn test_list_from_non_array_is_empty() {
        let store = MemoryStore::new();
        store.save(StorageKey::Sales, r#"{"id":"s1"}"#).await.unwrap();

        let sales: Vec<boutique_core::Sale> = load_list(&store, StorageKey::Sales).await.unwrap();
        assert!(sales.is_empty());

        let missing: Vec<Product> = load_list(&store, StorageKey::Products).await.unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_key_names() {
        let names: Vec<_> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["products", "sales", "expenses", "settings"]);
    }
}
