//! # Sale Commands
//!
//! Recording, editing, settling and deleting sales, with the stock moves
//! each one implies.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Lifecycle                                       │
//! │                                                                         │
//! │  create_sale ──► stock -= qty (clamped at 0) ──► sale prepended        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update_sale ──► stock += old qty, stock -= new qty (clamped)          │
//! │       │          total/is_paid recomputed, re-dated today              │
//! │       ▼                                                                 │
//! │  settle_debt ──► is_paid = true (no-op when already paid)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delete_sale ──► stock += qty                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock moves skip items whose product has been deleted. Sales and stock
//! are written together through `AppState::commit_sales_and_stock`; a failed
//! write leaves the state untouched.

use boutique_core::validation::{validate_required, validate_sale_items};
use boutique_core::{CoreError, PaymentMethod, Product, Sale, SaleItem};
use boutique_store::StorageKey;
use serde::Deserialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Inputs
// =============================================================================

/// One picked product.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleLineInput {
    pub product_id: String,
    pub quantity: i64,
}

/// Sale form fields.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleInput {
    pub customer_name: String,
    pub items: Vec<SaleLineInput>,
    #[ts(as = "String")]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Helpers
// =============================================================================

/// Freezes name and price for each line.
///
/// A line already on `previous` keeps its old snapshot, so editing a sale
/// does not reprice it. Other lines read the current product.
fn snapshot_items(
    products: &[Product],
    lines: &[SaleLineInput],
    previous: &[SaleItem],
) -> Result<Vec<SaleItem>, CoreError> {
    lines
        .iter()
        .map(|line| {
            if let Some(old) = previous.iter().find(|item| item.product_id == line.product_id) {
                return Ok(SaleItem {
                    quantity: line.quantity,
                    ..old.clone()
                });
            }

            products
                .iter()
                .find(|p| p.id == line.product_id)
                .map(|p| SaleItem::from_product(p, line.quantity))
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))
        })
        .collect()
}

fn take_stock(products: &mut [Product], items: &[SaleItem]) {
    for item in items {
        if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
            product.remove_stock(item.quantity);
        }
    }
}

fn return_stock(products: &mut [Product], items: &[SaleItem]) {
    for item in items {
        if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
            product.restore_stock(item.quantity);
        }
    }
}

fn sale_index(state: &AppState, id: &str) -> Result<usize, CoreError> {
    state
        .sales
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))
}

// =============================================================================
// Commands
// =============================================================================

/// Records a sale dated today and takes its items out of stock.
///
/// ## Validation
/// - customer name present
/// - at least one item, each with quantity > 0
/// - every product id exists
pub async fn create_sale(state: &mut AppState, input: SaleInput) -> Result<Sale, ApiError> {
    let customer = validate_required("customerName", &input.customer_name)?;
    let items = snapshot_items(&state.products, &input.items, &[])?;
    validate_sale_items(&items)?;

    let sale = Sale::from_items(
        state.next_id(),
        customer,
        items,
        input.payment_method,
        state.clock().today_label(),
    );

    let mut products = state.products.clone();
    take_stock(&mut products, &sale.items);
    let mut sales = state.sales.clone();
    sales.insert(0, sale.clone());

    state.commit_sales_and_stock(sales, products).await?;

    info!(
        id = %sale.id,
        total = sale.total,
        method = %sale.payment_method,
        paid = sale.is_paid,
        "Sale created"
    );
    Ok(sale)
}

/// Rewrites a sale from the form and moves stock by the difference.
pub async fn update_sale(state: &mut AppState, id: &str, input: SaleInput) -> Result<Sale, ApiError> {
    let index = sale_index(state, id)?;
    let customer = validate_required("customerName", &input.customer_name)?;
    let items = snapshot_items(&state.products, &input.items, &state.sales[index].items)?;
    validate_sale_items(&items)?;

    let sale = Sale::from_items(
        id,
        customer,
        items,
        input.payment_method,
        state.clock().today_label(),
    );

    let mut sales = state.sales.clone();
    let previous = std::mem::replace(&mut sales[index], sale.clone());
    let mut products = state.products.clone();
    return_stock(&mut products, &previous.items);
    take_stock(&mut products, &sale.items);

    state.commit_sales_and_stock(sales, products).await?;

    info!(id = %id, total = sale.total, "Sale updated");
    Ok(sale)
}

/// Marks a debt as paid. Settling an already paid sale changes nothing.
pub async fn settle_debt(state: &mut AppState, id: &str) -> Result<Sale, ApiError> {
    let index = sale_index(state, id)?;

    if state.sales[index].is_paid {
        debug!(id = %id, "Sale already paid");
        return Ok(state.sales[index].clone());
    }

    state.sales[index].settle();
    state.persist(StorageKey::Sales).await?;

    info!(id = %id, amount = state.sales[index].total, "Debt settled");
    Ok(state.sales[index].clone())
}

/// Removes a sale and puts its items back in stock.
pub async fn delete_sale(state: &mut AppState, id: &str) -> Result<(), ApiError> {
    let index = sale_index(state, id)?;
    let mut sales = state.sales.clone();
    let sale = sales.remove(index);
    let mut products = state.products.clone();
    return_stock(&mut products, &sale.items);

    state.commit_sales_and_stock(sales, products).await?;

    info!(id = %id, items = sale.items.len(), "Sale deleted");
    Ok(())
}

/// Case-insensitive match on customer name or any item's product name.
pub fn search_sales<'a>(state: &'a AppState, query: &str) -> Vec<&'a Sale> {
    let needle = query.trim().to_lowercase();

    let found: Vec<&Sale> = state
        .sales
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.customer_name.to_lowercase().contains(&needle)
                || s
                    .items
                    .iter()
                    .any(|item| item.product_name.to_lowercase().contains(&needle))
        })
        .collect();

    debug!(query = %needle, count = found.len(), "search_sales");
    found
}

// =============================================================================
// Unit Tests
// =============================================================================
