//! Loads every collection at once.

use boutique_core::{Expense, Product, Sale, ShopSettings};
use tracing::info;

use crate::error::StoreResult;
use crate::store::{load_json, load_list, KeyValueStore, StorageKey};

/// Everything persisted for one shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopSnapshot {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub settings: ShopSettings,
}

/// Reads the four keys.
///
/// Collections skip records that do not decode. Missing keys and
/// undecodable blobs become defaults.
pub async fn load_snapshot(store: &dyn KeyValueStore) -> StoreResult<ShopSnapshot> {
    let snapshot = ShopSnapshot {
        products: load_list(store, StorageKey::Products).await?,
        sales: load_list(store, StorageKey::Sales).await?,
        expenses: load_list(store, StorageKey::Expenses).await?,
        settings: load_json(store, StorageKey::Settings).await?,
    };

    info!(
        products = snapshot.products.len(),
        sales = snapshot.sales.len(),
        expenses = snapshot.expenses.len(),
        "Loaded shop data"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let snapshot = load_snapshot(&store).await.unwrap();
        assert_eq!(snapshot, ShopSnapshot::default());
        assert_eq!(snapshot.settings.name, "Ma Boutique");
    }

    #[tokio::test]
    async fn test_legacy_blobs_decode() {
        let store = MemoryStore::new();
        store
            .save(
                StorageKey::Expenses,
                r#"[{"id":"e1","description":"Loyer","category":"Local","amount":25000.0,"date":"01/06/2024"}]"#,
            )
            .await
            .unwrap();
        store
            .save(StorageKey::Settings, r#"{"name":"Chez Awa","logoUri":"data:image/png;base64,AA=="}"#)
            .await
            .unwrap();
        store.save(StorageKey::Products, "garbage").await.unwrap();

        let snapshot = load_snapshot(&store).await.unwrap();
        assert_eq!(snapshot.expenses[0].amount, 25000);
        assert_eq!(snapshot.settings.name, "Chez Awa");
        assert!(snapshot.settings.phone.is_none());
        assert!(snapshot.products.is_empty());
    }

    #[tokio::test]
    async fn test_one_bad_sale_keeps_the_others() {
        let store = MemoryStore::new();
        store
            .save(
                StorageKey::Sales,
                r#"[
                    {"id":"s1","customerName":"Awa","items":[{"productId":"p1","productName":"Riz","quantity":2,"price":500}],"total":1000,"date":"01/06/2024","status":"completed","paymentMethod":"cash","isPaid":true},
                    {"id":"s2","customerName":"Moussa","items":"broken","total":500,"date":"02/06/2024","status":"completed","paymentMethod":"debt","isPaid":false}
                ]"#,
            )
            .await
            .unwrap();

        let snapshot = load_snapshot(&store).await.unwrap();
        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.sales[0].customer_name, "Awa");
    }
}
