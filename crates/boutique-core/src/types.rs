//! # Domain Types
//!
//! Core domain types used throughout Boutique.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  customer_name  │   │  description    │       │
//! │  │  category       │   │  items[] ───────┼─┐ │  category       │       │
//! │  │  price          │   │  total          │ │ │  amount         │       │
//! │  │  stock          │   │  payment_method │ │ │  date           │       │
//! │  └────────▲────────┘   │  is_paid        │ │ └─────────────────┘       │
//! │           │            └─────────────────┘ │                            │
//! │           │  soft reference  ┌─────────────▼───┐   ┌─────────────────┐ │
//! │           └──────────────────│    SaleItem     │   │  ShopSettings   │ │
//! │                              │  product_id     │   │  name, logo     │ │
//! │                              │  product_name * │   │  phone, email   │ │
//! │                              │  price *        │   │  address        │ │
//! │                              └─────────────────┘   └─────────────────┘ │
//! │                               * snapshot at time of sale               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Field names serialize in camelCase (`customerName`, `isPaid`, ...) so the
//! JSON blobs written by earlier versions of the app load unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{deserialize_amount, Money};
use crate::DEFAULT_SHOP_NAME;

// =============================================================================
// Product
// =============================================================================

/// A product held in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Opaque identifier.
    pub id: String,

    /// Display name, copied onto sale items when sold.
    pub name: String,

    /// Free-form category.
    pub category: String,

    /// Unit price in FCFA.
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: i64,

    /// Units on hand. Never below zero.
    #[serde(deserialize_with = "deserialize_amount")]
    pub stock: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_fcfa(self.price)
    }

    /// Value of the units on hand (`stock × price`).
    pub fn stock_value(&self) -> Money {
        self.price().multiply_quantity(self.stock)
    }

    /// Whether the product can still be picked for a sale.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// Takes `quantity` units out of stock, clamping at zero.
    pub fn remove_stock(&mut self, quantity: i64) {
        self.stock = self.stock.saturating_sub(quantity).max(0);
    }

    /// Puts `quantity` units back into stock.
    pub fn restore_stock(&mut self, quantity: i64) {
        self.stock = self.stock.saturating_add(quantity);
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SaleStatus {
    /// Sale recorded and goods handed over.
    #[default]
    Completed,
    /// Sale awaiting completion.
    Pending,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
///
/// Values outside the known set are kept verbatim in `Other` so that they
/// round-trip through storage and render as their raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Physical cash.
    #[default]
    Cash,
    /// Wave mobile money.
    Wave,
    /// Orange Money.
    Orange,
    /// Customer owes the amount (paid later).
    Debt,
    /// Unrecognized stored value.
    Other(String),
}

impl PaymentMethod {
    /// Parses the stored wire value. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "cash" => PaymentMethod::Cash,
            "wave" => PaymentMethod::Wave,
            "orange" => PaymentMethod::Orange,
            "debt" => PaymentMethod::Debt,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    /// Returns the stored wire value.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Wave => "wave",
            PaymentMethod::Orange => "orange",
            PaymentMethod::Debt => "debt",
            PaymentMethod::Other(raw) => raw,
        }
    }

    #[inline]
    pub fn is_debt(&self) -> bool {
        matches!(self, PaymentMethod::Debt)
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        PaymentMethod::parse(&value)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    /// Soft reference to the product; may dangle after product deletion.
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Units sold.
    #[serde(deserialize_with = "deserialize_amount")]
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: i64,
}

impl SaleItem {
    /// Builds a line item from a product, freezing its name and price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SaleItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price: product.price,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_fcfa(self.price)
    }

    /// `quantity × price`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// `name (xqty)`, as listed in the sales report.
    pub fn describe(&self) -> String {
        format!("{} (x{})", self.product_name, self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale.
///
/// ## Invariants
/// - `total` equals the sum of line totals when the sale is built
/// - `is_paid` starts `true` unless the method is `Debt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub customer_name: String,
    pub items: Vec<SaleItem>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: i64,
    /// Calendar day in `DD/MM/YYYY`.
    pub date: String,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default)]
    #[ts(as = "String")]
    pub payment_method: PaymentMethod,
    #[serde(default = "default_paid")]
    pub is_paid: bool,
}

fn default_paid() -> bool {
    true
}

impl Sale {
    /// Builds a completed sale, deriving `total` and `is_paid` from its parts.
    pub fn from_items(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        items: Vec<SaleItem>,
        payment_method: PaymentMethod,
        date: impl Into<String>,
    ) -> Self {
        let total = items.iter().map(SaleItem::line_total).sum::<Money>();
        Sale {
            id: id.into(),
            customer_name: customer_name.into(),
            is_paid: !payment_method.is_debt(),
            items,
            total: total.fcfa(),
            date: date.into(),
            status: SaleStatus::Completed,
            payment_method,
        }
    }

    /// Returns the stored total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_fcfa(self.total)
    }

    /// Sum of `quantity × price` over the items.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(SaleItem::line_total).sum()
    }

    /// A debt sale that has not been settled yet.
    pub fn is_unpaid_debt(&self) -> bool {
        self.payment_method.is_debt() && !self.is_paid
    }

    /// `name (xqty)` for every item, comma separated.
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(SaleItem::describe)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Marks the sale as paid. Settling is one-way.
    pub fn settle(&mut self) {
        self.is_paid = true;
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A shop expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: i64,
    /// Calendar day in `DD/MM/YYYY`.
    pub date: String,
}

impl Expense {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_fcfa(self.amount)
    }
}

// =============================================================================
// Shop Settings
// =============================================================================

/// Shop identity printed on every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ShopSettings {
    pub name: String,
    /// Inline `data:image/...;base64,` URI.
    pub logo_uri: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        ShopSettings {
            name: DEFAULT_SHOP_NAME.to_string(),
            logo_uri: None,
            phone: None,
            address: None,
            email: None,
        }
    }
}

impl ShopSettings {
    /// Shop name, falling back to the default when blank.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            DEFAULT_SHOP_NAME
        } else {
            name
        }
    }

    /// Phone, email and address in that order, skipping blank ones.
    pub fn contact_lines(&self) -> Vec<&str> {
        [&self.phone, &self.email, &self.address]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
