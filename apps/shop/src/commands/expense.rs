//! # Expense Commands
//!
//! Expenses are dated the day they are saved; editing one re-dates it.

use boutique_core::aggregate::{expenses_this_month, total_expenses};
use boutique_core::validation::{validate_non_negative, validate_required};
use boutique_core::{CoreError, Expense, Money};
use boutique_store::StorageKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

/// Expense form fields.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseInput {
    pub description: String,
    pub category: String,
    pub amount: i64,
}

impl ExpenseInput {
    fn into_expense(self, id: String, date: String) -> Result<Expense, ApiError> {
        let description = validate_required("description", &self.description)?;
        let category = validate_required("category", &self.category)?;
        validate_non_negative("amount", self.amount)?;

        Ok(Expense {
            id,
            description,
            category,
            amount: self.amount,
            date,
        })
    }
}

/// Records an expense dated today.
pub async fn add_expense(state: &mut AppState, input: ExpenseInput) -> Result<Expense, ApiError> {
    let expense = input.into_expense(state.next_id(), state.clock().today_label())?;

    state.expenses.insert(0, expense.clone());
    state.persist(StorageKey::Expenses).await?;

    info!(
        id = %expense.id,
        category = %expense.category,
        amount = expense.amount,
        "Expense added"
    );
    Ok(expense)
}

/// Replaces an expense, keeping its id.
pub async fn update_expense(
    state: &mut AppState,
    id: &str,
    input: ExpenseInput,
) -> Result<Expense, ApiError> {
    let index = state
        .expenses
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))?;

    let expense = input.into_expense(id.to_string(), state.clock().today_label())?;
    state.expenses[index] = expense.clone();
    state.persist(StorageKey::Expenses).await?;

    info!(id = %id, "Expense updated");
    Ok(expense)
}

pub async fn delete_expense(state: &mut AppState, id: &str) -> Result<(), ApiError> {
    let before = state.expenses.len();
    state.expenses.retain(|e| e.id != id);

    if state.expenses.len() == before {
        return Err(CoreError::ExpenseNotFound(id.to_string()).into());
    }

    state.persist(StorageKey::Expenses).await?;
    info!(id = %id, "Expense deleted");
    Ok(())
}

/// Case-insensitive match on description or category.
pub fn search_expenses<'a>(state: &'a AppState, query: &str) -> Vec<&'a Expense> {
    let needle = query.trim().to_lowercase();

    let found: Vec<&Expense> = state
        .expenses
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.description.to_lowercase().contains(&needle)
                || e.category.to_lowercase().contains(&needle)
        })
        .collect();

    debug!(query = %needle, count = found.len(), "search_expenses");
    found
}

/// Header figures of the expenses screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseTotals {
    pub total: Money,
    pub this_month: Money,
}

pub fn expense_totals(state: &AppState) -> ExpenseTotals {
    ExpenseTotals {
        total: total_expenses(state.expenses()),
        this_month: expenses_this_month(state.expenses(), state.clock().today()),
    }
}
