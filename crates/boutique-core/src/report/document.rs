//! # Document Tree
//!
//! Renderer-neutral description of a report or invoice.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Document                                                               │
//! │  ├── Header                                                             │
//! │  │   ├── logo (validated data URI, optional)                           │
//! │  │   ├── shop name                                                      │
//! │  │   ├── contact lines  (phone, email, address)                         │
//! │  │   ├── title                                                          │
//! │  │   ├── generation date                                                │
//! │  │   └── period label   (period-scoped reports only)                    │
//! │  └── Blocks, in print order                                             │
//! │      ├── Section   "Recettes"                                           │
//! │      ├── Fields    invoice number, date, customer, payment             │
//! │      ├── Status    PAYÉ / NON PAYÉ                                      │
//! │      ├── Table     columns, rows, optional footer total                 │
//! │      ├── Total     net profit, amount due                               │
//! │      └── Note      thank-you lines                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts stay as [`Money`] until a renderer formats them with the
//! document's currency label. Expense amounts are stored already negated.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;

use crate::money::Money;

use super::labels::Locale;

// =============================================================================
// Document
// =============================================================================

/// Which document a tree describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Sales,
    Expenses,
    Balance,
    Invoice,
}

/// A fully built report or invoice, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub kind: DocumentKind,
    pub header: Header,
    pub blocks: Vec<Block>,
    /// Language of the captions renderers add (`Période`, `Date de génération`).
    pub locale: Locale,
    /// Label printed after every amount.
    pub currency: String,
    /// Suggested file name, without extension.
    pub file_stem: String,
}

impl Document {
    /// `"{n} {currency}"`. Negative values carry a leading `-`.
    pub fn format_amount(&self, amount: Money) -> String {
        format!("{} {}", amount.fcfa(), self.currency)
    }

    /// All tables, in print order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// The first total block, if any.
    pub fn grand_total(&self) -> Option<Money> {
        self.blocks.iter().find_map(|block| match block {
            Block::Total { amount, .. } => Some(*amount),
            _ => None,
        })
    }
}

// =============================================================================
// Header
// =============================================================================

/// Identity block printed at the top of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub logo: Option<Logo>,
    pub shop_name: String,
    pub contact_lines: Vec<String>,
    pub title: String,
    /// `DD/MM/YYYY`.
    pub generated_on: String,
    /// Present for period-scoped reports. `None` for invoices and the
    /// unfiltered report.
    pub period_label: Option<String>,
}

/// A logo that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    /// e.g. `image/png`.
    pub mime_type: String,
    /// The original data URI, embedded as-is.
    pub data_uri: String,
}

impl Logo {
    /// Accepts `data:image/<subtype>;base64,<payload>` when the payload decodes.
    ///
    /// Anything else means "no logo".
    pub fn from_data_uri(uri: &str) -> Option<Logo> {
        let uri = uri.trim();
        let rest = uri.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime_type = meta.strip_suffix(";base64")?;

        let subtype = mime_type.strip_prefix("image/")?;
        if subtype.is_empty() || payload.is_empty() {
            return None;
        }

        if let Err(e) = BASE64.decode(payload) {
            tracing::warn!(error = %e, "Logo payload is not valid base64, skipping logo");
            return None;
        }

        Some(Logo {
            mime_type: mime_type.to_string(),
            data_uri: uri.to_string(),
        })
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// Color hint for totals and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

impl Tone {
    /// Positive for zero and above.
    pub fn of(amount: Money) -> Tone {
        if amount.is_negative() {
            Tone::Negative
        } else {
            Tone::Positive
        }
    }
}

/// A labelled value line (`Client: Awa`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Field {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One element of the document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Sub-heading introducing the next table.
    Section { title: String },
    Fields { fields: Vec<Field> },
    Status { label: String, text: String, tone: Tone },
    Table(Table),
    Total { label: String, amount: Money, tone: Tone },
    Note { text: String },
}

// =============================================================================
// Tables
// =============================================================================

/// Which table this is. Fixed-layout rendering picks column positions,
/// text budgets and page breaks from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableRole {
    Sales,
    Expenses,
    BalanceSales,
    BalanceExpenses,
    InvoiceItems,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    Text(String),
    Count(i64),
    Amount(Money),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

/// Footer row holding the table total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub role: TableRole,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub footer: Option<Footer>,
}

impl Table {
    pub fn new(role: TableRole, columns: &[&str]) -> Self {
        Table {
            role,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            footer: None,
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn with_footer(mut self, label: impl Into<String>, amount: Money) -> Self {
        self.footer = Some(Footer {
            label: label.into(),
            amount,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_accepts_base64_image_uri() {
        let logo = Logo::from_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(logo.mime_type, "image/png");
    }

    #[test]
    fn test_logo_rejects_non_conforming_values() {
        assert!(Logo::from_data_uri("").is_none());
        assert!(Logo::from_data_uri("file:///sdcard/logo.png").is_none());
        assert!(Logo::from_data_uri("data:text/plain;base64,aGVsbG8=").is_none());
        assert!(Logo::from_data_uri("data:image/png,rawbytes").is_none());
        assert!(Logo::from_data_uri("data:image/png;base64,@@not-base64@@").is_none());
        assert!(Logo::from_data_uri("data:image/png;base64,").is_none());
    }

    #[test]
    fn test_tone_of_amount() {
        assert_eq!(Tone::of(Money::from_fcfa(0)), Tone::Positive);
        assert_eq!(Tone::of(Money::from_fcfa(-1)), Tone::Negative);
    }

    #[test]
    fn test_table_footer() {
        let table = Table::new(TableRole::Sales, &["Date", "Montant"])
            .with_footer("TOTAL", Money::from_fcfa(1500));
        assert!(table.is_empty());
        assert_eq!(table.footer.unwrap().amount.fcfa(), 1500);
    }
}
