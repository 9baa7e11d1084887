//! # boutique-core: Pure Business Logic for Boutique
//!
//! This crate holds the reporting engine of the shop app: the period filter,
//! the aggregator and the document renderer, plus the domain types they
//! work on. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boutique Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI (external)                         │   │
//! │  │   Produits ──► Ventes ──► Charges ──► Tableau de bord          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/shop commands                           │   │
//! │  │    create_sale, settle_debt, export_report, etc.               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ boutique-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   records ──► period ──► aggregate ──► report ──► Document      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              boutique-store (persistence layer)                 │   │
//! │  │          key-value JSON blobs in SQLite, in-memory store        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, ShopSettings)
//! - [`money`] - Whole-franc FCFA amounts
//! - [`period`] - Day / week / month / quarter bucketing
//! - [`aggregate`] - Totals, net profit, outstanding debt
//! - [`report`] - Document trees, HTML and fixed-layout rendering
//! - [`clock`] - Source of "today"
//! - [`error`] - Domain error types
//! - [`validation`] - Field presence checks
//!
//! ## Example Usage
//!
//! ```rust
//! use boutique_core::aggregate::net_profit;
//! use boutique_core::period::{filter_by_period, FilterPeriod};
//! use boutique_core::{Expense, PaymentMethod, Sale};
//! use chrono::NaiveDate;
//!
//! let sales = vec![Sale::from_items("s1", "Awa", vec![], PaymentMethod::Cash, "01/06/2024")];
//! let expenses: Vec<Expense> = vec![];
//! let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
//!
//! let june = filter_by_period(&sales, Some(FilterPeriod::Month), today);
//! assert_eq!(june.len(), 1);
//! assert!(net_profit(&sales, &expenses).is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod money;
pub mod period;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use period::{FilterPeriod, Dated};
pub use report::{Document, Locale, ReportContext, ReportKind, ReportRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shop name used until the owner sets one.
pub const DEFAULT_SHOP_NAME: &str = "Ma Boutique";

/// Display and storage format of every record date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";
