//! # Application State
//!
//! The collections the shop works on, plus the collaborators that persist
//! them and tell the date.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState                                        │
//! │                                                                         │
//! │   products  sales  expenses  settings      ◄── loaded once at startup  │
//! │      │        │       │         │                                       │
//! │      └────────┴───────┴─────────┘                                       │
//! │                   │ persist(key) after every mutation                   │
//! │                   ▼                                                     │
//! │        Arc<dyn KeyValueStore>              Arc<dyn Clock>              │
//! │        (SqliteStore / MemoryStore)         (SystemClock / FixedClock)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state is owned by the caller and passed to commands by `&mut`.
//! There is no global and no lock.

use boutique_core::{Clock, Expense, Locale, Product, ReportContext, Sale, ShopSettings};
use boutique_store::{load_snapshot, save_json, KeyValueStore, StorageKey, StoreResult};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::config::AppConfig;

/// Everything the commands read and mutate.
pub struct AppState {
    pub(crate) products: Vec<Product>,
    pub(crate) sales: Vec<Sale>,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) settings: ShopSettings,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    locale: Locale,
    currency: String,
}

impl AppState {
    /// Loads every collection from `store`.
    ///
    /// Missing or undecodable keys start empty (default settings).
    pub async fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let snapshot = load_snapshot(store.as_ref()).await?;
        let defaults = AppConfig::default();

        Ok(AppState {
            products: snapshot.products,
            sales: snapshot.sales,
            expenses: snapshot.expenses,
            settings: snapshot.settings,
            store,
            clock,
            locale: defaults.locale,
            currency: defaults.currency,
        })
    }

    /// Applies the locale and currency of `config`.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.locale = config.locale;
        self.currency = config.currency.clone();
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Newest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Reference day, locale and currency for rendering.
    pub fn report_context(&self) -> ReportContext {
        ReportContext::new(self.clock.today())
            .with_locale(self.locale)
            .with_currency(self.currency.clone())
    }

    /// Fresh id for a new record.
    pub(crate) fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Writes one collection back to the store.
    pub(crate) async fn persist(&self, key: StorageKey) -> StoreResult<()> {
        let store = self.store.as_ref();
        match key {
            StorageKey::Products => save_json(store, key, &self.products).await?,
            StorageKey::Sales => save_json(store, key, &self.sales).await?,
            StorageKey::Expenses => save_json(store, key, &self.expenses).await?,
            StorageKey::Settings => save_json(store, key, &self.settings).await?,
        }

        debug!(key = %key, "Persisted");
        Ok(())
    }

    /// Stores new sales and products, then swaps them in.
    ///
    /// Memory changes only once both writes succeed. Products are written
    /// first; if the sales write then fails the previous products are
    /// written back, so the store never holds a stock move without its sale.
    pub(crate) async fn commit_sales_and_stock(
        &mut self,
        sales: Vec<Sale>,
        products: Vec<Product>,
    ) -> StoreResult<()> {
        let store = self.store.as_ref();
        save_json(store, StorageKey::Products, &products).await?;

        if let Err(e) = save_json(store, StorageKey::Sales, &sales).await {
            if let Err(restore) = save_json(store, StorageKey::Products, &self.products).await {
                warn!(error = %restore, "Could not restore stored products");
            }
            return Err(e);
        }

        self.sales = sales;
        self.products = products;
        debug!(sales = self.sales.len(), products = self.products.len(), "Committed sale change");
        Ok(())
    }

    /// Drops every record and restores default settings, in memory only.
    pub(crate) fn reset(&mut self) {
        self.products.clear();
        self.sales.clear();
        self.expenses.clear();
        self.settings = ShopSettings::default();
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("products", &self.products.len())
            .field("sales", &self.sales.len())
            .field("expenses", &self.expenses.len())
            .field("settings", &self.settings)
            .field("locale", &self.locale)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for command tests.

    use super::*;
    use async_trait::async_trait;
    use boutique_core::FixedClock;
    use boutique_store::{MemoryStore, StoreError};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};

    pub fn june_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    /// Empty state over a fresh in-memory store, frozen on 20/06/2024.
    pub async fn empty_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::load(store.clone(), Arc::new(FixedClock(june_20())))
            .await
            .unwrap();
        (state, store)
    }

    /// Memory store whose writes to one key fail while `broken` is set.
    #[derive(Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        pub failing_key: Option<StorageKey>,
        pub broken: AtomicBool,
    }

    impl FlakyStore {
        pub fn failing_on(key: StorageKey) -> Self {
            FlakyStore {
                failing_key: Some(key),
                ..FlakyStore::default()
            }
        }

        pub fn break_writes(&self) {
            self.broken.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn load(&self, key: StorageKey) -> StoreResult<Option<String>> {
            self.inner.load(key).await
        }

        async fn save(&self, key: StorageKey, json: &str) -> StoreResult<()> {
            if self.broken.load(Ordering::SeqCst) && self.failing_key == Some(key) {
                return Err(StoreError::QueryFailed("disk I/O error".to_string()));
            }
            self.inner.save(key, json).await
        }

        async fn clear(&self) -> StoreResult<()> {
            self.inner.clear().await
        }
    }

    /// State over a [`FlakyStore`], frozen on 20/06/2024.
    pub async fn flaky_state(key: StorageKey) -> (AppState, Arc<FlakyStore>) {
        let store = Arc::new(FlakyStore::failing_on(key));
        let state = AppState::load(store.clone(), Arc::new(FixedClock(june_20())))
            .await
            .unwrap();
        (state, store)
    }

    pub fn product(id: &str, name: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "Alimentation".to_string(),
            price,
            stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use boutique_core::FixedClock;
    use boutique_store::{load_json, MemoryStore};

    #[tokio::test]
    async fn test_load_from_empty_store() {
        let (state, _) = empty_state().await;
        assert!(state.products().is_empty());
        assert_eq!(state.settings().display_name(), "Ma Boutique");
        assert_eq!(state.report_context().today, june_20());
    }

    #[tokio::test]
    async fn test_persist_writes_collection() {
        let (mut state, store) = empty_state().await;
        state.products.push(product("p1", "Riz", 500, 10));
        state.persist(StorageKey::Products).await.unwrap();

        let saved: Vec<Product> = load_json(store.as_ref(), StorageKey::Products).await.unwrap();
        assert_eq!(saved, state.products);
    }

    #[tokio::test]
    async fn test_config_sets_report_context() {
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig {
            locale: Locale::En,
            currency: "XOF".to_string(),
            ..AppConfig::default()
        };
        let state = AppState::load(store, Arc::new(FixedClock(june_20())))
            .await
            .unwrap()
            .with_config(&config);

        let context = state.report_context();
        assert_eq!(context.locale, Locale::En);
        assert_eq!(context.currency, "XOF");
    }

    #[tokio::test]
    async fn test_bad_record_does_not_erase_collection() {
        use crate::commands::product::{add_product, ProductInput};

        let store = Arc::new(MemoryStore::new());
        store
            .save(
                StorageKey::Products,
                r#"[{"id":"p1","name":"Riz","category":"Alimentation","price":500,"stock":10},
                    {"id":"p2","name":"Huile","category":"Alimentation","price":null,"stock":3},
                    {"id":"p3","category":"Alimentation","price":100,"stock":1}]"#,
            )
            .await
            .unwrap();

        let mut state = AppState::load(store.clone(), Arc::new(FixedClock(june_20())))
            .await
            .unwrap();
        assert_eq!(state.products().len(), 2);

        add_product(
            &mut state,
            ProductInput {
                name: "Sucre".to_string(),
                category: "Alimentation".to_string(),
                price: 650,
                stock: 5,
            },
        )
        .await
        .unwrap();

        let saved: Vec<Product> = load_json(store.as_ref(), StorageKey::Products).await.unwrap();
        let names: Vec<_> = saved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sucre", "Riz", "Huile"]);
        assert_eq!(saved[2].price, 0);
    }

    #[tokio::test]
    async fn test_commit_restores_products_when_sales_write_fails() {
        let (mut state, store) = flaky_state(StorageKey::Sales).await;
        state.products.push(product("p1", "Riz", 500, 10));
        state.persist(StorageKey::Products).await.unwrap();
        store.break_writes();

        let mut products = state.products.clone();
        products[0].remove_stock(4);
        let err = state.commit_sales_and_stock(Vec::new(), products).await.unwrap_err();
        assert!(err.to_string().contains("disk I/O error"));

        assert_eq!(state.products()[0].stock, 10);
        let saved: Vec<Product> = load_json(&store.inner, StorageKey::Products).await.unwrap();
        assert_eq!(saved[0].stock, 10);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let (state, _) = empty_state().await;
        assert_ne!(state.next_id(), state.next_id());
    }
}
