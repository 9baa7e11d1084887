//! # Aggregator
//!
//! Reductions over record collections. Every function is total: empty input
//! yields zero, nothing here can fail or mutate its input.
//!
//! Functions take `&[S]` with `S: Borrow<Sale>` (or `Borrow<Expense>`) so
//! they work both on owned collections and on the `Vec<&Sale>` returned by
//! [`filter_by_period`](crate::period::filter_by_period).
//!
//! ## Dashboard Figures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Chiffre d'affaires   Σ sale.total                                      │
//! │  Charges              Σ expense.amount                                  │
//! │  Charges du mois      Σ expense.amount in today's calendar month        │
//! │  Bénéfice net         Σ sale.total − Σ expense.amount                   │
//! │  Dettes               Σ sale.total where method = debt and unpaid       │
//! │  Stock                Σ product.stock, Σ stock × price                  │
//! │  Clients              distinct customer names (exact match)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::period::{filter_by_period, Dated, FilterPeriod};
use crate::types::{Expense, Product, Sale};

// =============================================================================
// Generic Sum
// =============================================================================

/// Sums `field` over `records`.
///
/// ## Example
/// ```rust
/// use boutique_core::aggregate::sum_amount;
/// use boutique_core::Expense;
///
/// let none: Vec<Expense> = vec![];
/// assert!(sum_amount(&none, Expense::amount).is_zero());
/// ```
pub fn sum_amount<T, F>(records: &[T], field: F) -> Money
where
    F: Fn(&T) -> Money,
{
    records.iter().map(field).sum()
}

/// Σ `sale.total`.
pub fn total_sales<S: Borrow<Sale>>(sales: &[S]) -> Money {
    sum_amount(sales, |sale| {
        let sale: &Sale = sale.borrow();
        sale.total()
    })
}

/// Σ `expense.amount`.
pub fn total_expenses<E: Borrow<Expense>>(expenses: &[E]) -> Money {
    sum_amount(expenses, |expense| {
        let expense: &Expense = expense.borrow();
        expense.amount()
    })
}

// =============================================================================
// Derived Figures
// =============================================================================

fn as_sale<S: Borrow<Sale>>(sale: &S) -> &Sale {
    sale.borrow()
}

/// Revenue minus expenses. Negative when expenses exceed revenue.
pub fn net_profit<S, E>(sales: &[S], expenses: &[E]) -> Money
where
    S: Borrow<Sale>,
    E: Borrow<Expense>,
{
    total_sales(sales) - total_expenses(expenses)
}

/// Σ total of debt sales not yet settled.
pub fn outstanding_debt<S: Borrow<Sale>>(sales: &[S]) -> Money {
    sales
        .iter()
        .map(as_sale)
        .filter(|sale| sale.is_unpaid_debt())
        .map(Sale::total)
        .sum()
}

/// Number of distinct customer names, compared exactly.
pub fn unique_customer_count<S: Borrow<Sale>>(sales: &[S]) -> usize {
    sales
        .iter()
        .map(|sale| as_sale(sale).customer_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Number of sales dated `day`.
pub fn sales_on<S: Borrow<Sale>>(sales: &[S], day: NaiveDate) -> usize {
    sales
        .iter()
        .filter(|sale| as_sale(*sale).calendar_date() == Some(day))
        .count()
}

// =============================================================================
// Categories
// =============================================================================

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Groups expenses by category, in the order categories first appear.
pub fn sum_by_category<E: Borrow<Expense>>(expenses: &[E]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        let expense: &Expense = expense.borrow();
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount();
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount(),
                count: 1,
            }),
        }
    }

    totals
}

// =============================================================================
// Stock
// =============================================================================

/// Units on hand across all products.
pub fn stock_units(products: &[Product]) -> i64 {
    products.iter().fold(0, |acc, p| acc.saturating_add(p.stock))
}

/// Σ `stock × price`.
pub fn stock_value(products: &[Product]) -> Money {
    sum_amount(products, Product::stock_value)
}

// =============================================================================
// Summary
// =============================================================================

/// Every figure shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopSummary {
    pub total_sales: Money,
    pub total_expenses: Money,
    pub expenses_this_month: Money,
    pub net_profit: Money,
    pub outstanding_debt: Money,
    pub stock_units: i64,
    pub stock_value: Money,
    pub sales_today: usize,
    pub unique_customers: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Σ `expense.amount` over the calendar month (and year) containing `today`.
pub fn expenses_this_month(expenses: &[Expense], today: NaiveDate) -> Money {
    total_expenses(&filter_by_period(expenses, Some(FilterPeriod::Month), today))
}

/// Computes the dashboard over the full (unfiltered) collections.
///
/// Only `sales_today` and `expenses_this_month` look at `today`.
pub fn summarize(
    sales: &[Sale],
    expenses: &[Expense],
    products: &[Product],
    today: NaiveDate,
) -> ShopSummary {
    let summary = ShopSummary {
        total_sales: total_sales(sales),
        total_expenses: total_expenses(expenses),
        expenses_this_month: expenses_this_month(expenses, today),
        net_profit: net_profit(sales, expenses),
        outstanding_debt: outstanding_debt(sales),
        stock_units: stock_units(products),
        stock_value: stock_value(products),
        sales_today: sales_on(sales, today),
        unique_customers: unique_customer_count(sales),
        expenses_by_category: sum_by_category(expenses),
    };

    tracing::debug!(
        sales = sales.len(),
        expenses = expenses.len(),
        products = products.len(),
        net_profit = summary.net_profit.fcfa(),
        "Computed shop summary"
    );

    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
