//! Home screen figures.

use boutique_core::aggregate::{summarize, ShopSummary};

use crate::state::AppState;

/// Totals over every record, plus today's sale count.
pub fn dashboard_summary(state: &AppState) -> ShopSummary {
    summarize(
        state.sales(),
        state.expenses(),
        state.products(),
        state.clock().today(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{empty_state, product};
    use boutique_core::{Expense, Money, PaymentMethod, Sale, SaleItem};

    #[tokio::test]
    async fn test_summary_over_state() {
        let (mut state, _) = empty_state().await;
        state.products = vec![product("p1", "Riz", 500, 4)];
        state.sales = vec![
            Sale::from_items(
                "s1",
                "Awa",
                vec![SaleItem::from_product(&state.products[0], 2)],
                PaymentMethod::Debt,
                "20/06/2024",
            ),
            Sale::from_items(
                "s2",
                "Awa",
                vec![SaleItem::from_product(&state.products[0], 1)],
                PaymentMethod::Cash,
                "02/06/2024",
            ),
        ];
        state.expenses = vec![Expense {
            id: "e1".to_string(),
            description: "Loyer".to_string(),
            category: "Loyer".to_string(),
            amount: 700,
            date: "01/06/2024".to_string(),
        }];

        let summary = dashboard_summary(&state);

        assert_eq!(summary.total_sales, Money::from_fcfa(1500));
        assert_eq!(summary.net_profit, Money::from_fcfa(800));
        assert_eq!(summary.outstanding_debt, Money::from_fcfa(1000));
        assert_eq!(summary.stock_value, Money::from_fcfa(2000));
        assert_eq!(summary.sales_today, 1);
        assert_eq!(summary.unique_customers, 1);
        assert_eq!(summary.expenses_this_month, Money::from_fcfa(700));
    }
}
