//! # Report Engine
//!
//! Turns record collections into printable documents.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReportRequest { kind, period }                                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  period::filter_by_period   (sales and/or expenses, same period)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  builder                    (aggregate totals, build Document tree)    │
//! │        │                                                                │
//! │        ├──────────────► html::render    full text, escaped             │
//! │        └──────────────► layout::render  A4 draw commands, truncated    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invoices skip the period filter and are looked up by sale id.
//! Exporting a rendered document is the caller's business.

pub mod builder;
pub mod document;
pub mod html;
pub mod labels;
pub mod layout;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::CURRENCY_LABEL;
use crate::period::{filter_by_period, FilterPeriod};
use crate::types::{Expense, Sale, ShopSettings};
use crate::DATE_FORMAT;

pub use document::{Block, Cell, Document, DocumentKind, Header, Logo, Table, TableRole, Tone};
pub use labels::{Labels, Locale};

// =============================================================================
// Context
// =============================================================================

/// Everything rendering needs besides the records themselves.
///
/// ## Example
/// ```rust
/// use boutique_core::report::{Locale, ReportContext};
/// use chrono::NaiveDate;
///
/// let context = ReportContext::new(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
///     .with_locale(Locale::En)
///     .with_currency("XOF");
/// assert_eq!(context.today_label(), "20/06/2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub locale: Locale,
    /// Label printed after amounts.
    pub currency: String,
    /// Reference day for period filtering and the generation date.
    pub today: NaiveDate,
}

impl ReportContext {
    /// French labels, FCFA amounts.
    pub fn new(today: NaiveDate) -> Self {
        ReportContext {
            locale: Locale::default(),
            currency: CURRENCY_LABEL.to_string(),
            today,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn labels(&self) -> &'static Labels {
        self.locale.labels()
    }

    pub fn today_label(&self) -> String {
        self.today.format(DATE_FORMAT).to_string()
    }
}

// =============================================================================
// Requests
// =============================================================================

/// The period-scoped reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ReportKind {
    Sales,
    Expenses,
    Balance,
}

/// What the user picked in the report dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportRequest {
    pub kind: ReportKind,
    /// `None` keeps every record.
    pub period: Option<FilterPeriod>,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, period: Option<FilterPeriod>) -> Self {
        ReportRequest { kind, period }
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Filters, aggregates and builds one period-scoped report.
pub fn produce_report(
    request: ReportRequest,
    sales: &[Sale],
    expenses: &[Expense],
    settings: &ShopSettings,
    context: &ReportContext,
) -> Document {
    let ReportRequest { kind, period } = request;

    tracing::debug!(
        kind = ?kind,
        period = period.map(|p| p.as_str()).unwrap_or("all"),
        "Producing report"
    );

    match kind {
        ReportKind::Sales => {
            let sales = filter_by_period(sales, period, context.today);
            builder::sales_report(&sales, period, settings, context)
        }
        ReportKind::Expenses => {
            let expenses = filter_by_period(expenses, period, context.today);
            builder::expenses_report(&expenses, period, settings, context)
        }
        ReportKind::Balance => {
            let sales = filter_by_period(sales, period, context.today);
            let expenses = filter_by_period(expenses, period, context.today);
            builder::balance_report(&sales, &expenses, period, settings, context)
        }
    }
}

/// Builds the invoice for one sale. No period filtering.
///
/// ## Errors
/// - [`CoreError::SaleNotFound`] when no sale has `sale_id`
pub fn produce_invoice(
    sale_id: &str,
    sales: &[Sale],
    settings: &ShopSettings,
    context: &ReportContext,
) -> CoreResult<Document> {
    let sale = sales
        .iter()
        .find(|sale| sale.id == sale_id)
        .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

    tracing::debug!(sale_id = %sale.id, items = sale.items.len(), "Producing invoice");

    Ok(builder::invoice(sale, settings, context))
}

// =============================================================================
// Unit Tests
// =============================================================================
