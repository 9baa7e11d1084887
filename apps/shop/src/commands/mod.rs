//! # Commands Module
//!
//! Every operation the UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Inventory CRUD, search
//! ├── sale.rs       ◄─── Sales, stock moves, debt settlement
//! ├── expense.rs    ◄─── Expense CRUD, search
//! ├── settings.rs   ◄─── Shop identity, reset
//! ├── dashboard.rs  ◄─── Home screen figures
//! └── report.rs     ◄─── Report/invoice export and preview
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  const sale = await invoke('create_sale', {                             │
//! │    customerName: 'Awa',                                                 │
//! │    items: [{ productId: '…', quantity: 2 }],                            │
//! │    paymentMethod: 'debt'                                                │
//! │  });                                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  async fn create_sale(                                                  │
//! │      state: &mut AppState,   ◄── Owned by the host                     │
//! │      input: SaleInput,       ◄── From invoke params                    │
//! │  ) -> Result<Sale, ApiError>                                            │
//! │         │                                                               │
//! │         │ mutation ──► state.persist(key)                               │
//! │         ▼                                                               │
//! │  UI receives: Sale                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries (`search_*`, `dashboard_summary`, previews) take `&AppState`
//! and never touch the store.

pub mod dashboard;
pub mod expense;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;
