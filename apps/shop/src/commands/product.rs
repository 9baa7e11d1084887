//! # Product Commands
//!
//! Inventory CRUD and search.
//!
//! New products go to the front of the list. Deleting a product leaves
//! past sales untouched: their items keep the name and price they were
//! sold with.

use boutique_core::validation::{validate_non_negative, validate_required};
use boutique_core::{CoreError, Product};
use boutique_store::StorageKey;
use serde::Deserialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

/// Product form fields.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: i64,
}

impl ProductInput {
    fn into_product(self, id: String) -> Result<Product, ApiError> {
        let name = validate_required("name", &self.name)?;
        let category = validate_required("category", &self.category)?;
        validate_non_negative("price", self.price)?;
        validate_non_negative("stock", self.stock)?;

        Ok(Product {
            id,
            name,
            category,
            price: self.price,
            stock: self.stock,
        })
    }
}

/// Adds a product to the inventory.
pub async fn add_product(state: &mut AppState, input: ProductInput) -> Result<Product, ApiError> {
    let product = input.into_product(state.next_id())?;

    state.products.insert(0, product.clone());
    state.persist(StorageKey::Products).await?;

    info!(id = %product.id, name = %product.name, stock = product.stock, "Product added");
    Ok(product)
}

/// Replaces every field of an existing product.
pub async fn update_product(
    state: &mut AppState,
    id: &str,
    input: ProductInput,
) -> Result<Product, ApiError> {
    let index = state
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

    let product = input.into_product(id.to_string())?;
    state.products[index] = product.clone();
    state.persist(StorageKey::Products).await?;

    info!(id = %id, "Product updated");
    Ok(product)
}

/// Removes a product. Sales that reference it are not touched.
pub async fn delete_product(state: &mut AppState, id: &str) -> Result<(), ApiError> {
    let before = state.products.len();
    state.products.retain(|p| p.id != id);

    if state.products.len() == before {
        return Err(CoreError::ProductNotFound(id.to_string()).into());
    }

    state.persist(StorageKey::Products).await?;
    info!(id = %id, "Product deleted");
    Ok(())
}

/// Case-insensitive match on name or category. A blank query lists all.
pub fn search_products<'a>(state: &'a AppState, query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    let found: Vec<&Product> = state
        .products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect();

    debug!(query = %needle, count = found.len(), "search_products");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing::empty_state;
    use boutique_store::load_json;

    fn input(name: &str, category: &str, price: i64, stock: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists() {
        let (mut state, store) = empty_state().await;

        add_product(&mut state, input("Riz", "Alimentation", 500, 10)).await.unwrap();
        let second = add_product(&mut state, input("Savon", "Hygiène", 300, 4)).await.unwrap();

        assert_eq!(state.products()[0].id, second.id);
        let saved: Vec<Product> = load_json(store.as_ref(), StorageKey::Products).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name, "Savon");
    }

    #[tokio::test]
    async fn test_add_requires_fields() {
        let (mut state, _) = empty_state().await;

        let err = add_product(&mut state, input("  ", "Alimentation", 500, 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");

        let err = add_product(&mut state, input("Riz", "Alimentation", -5, 1)).await.unwrap_err();
        assert_eq!(err.message, "price cannot be negative");
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (mut state, _) = empty_state().await;
        let riz = add_product(&mut state, input("Riz", "Alimentation", 500, 10)).await.unwrap();

        let updated = update_product(&mut state, &riz.id, input("Riz parfumé", "Alimentation", 650, 8))
            .await
            .unwrap();
        assert_eq!(updated.id, riz.id);
        assert_eq!(state.products()[0].price, 650);

        delete_product(&mut state, &riz.id).await.unwrap();
        assert!(state.products().is_empty());

        let err = delete_product(&mut state, &riz.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_category() {
        let (mut state, _) = empty_state().await;
        add_product(&mut state, input("Riz", "Alimentation", 500, 10)).await.unwrap();
        add_product(&mut state, input("Savon", "Hygiène", 300, 4)).await.unwrap();

        assert_eq!(search_products(&state, "RIZ").len(), 1);
        assert_eq!(search_products(&state, "hygi")[0].name, "Savon");
        assert_eq!(search_products(&state, "").len(), 2);
        assert!(search_products(&state, "lait").is_empty());
    }
}
