//! Builds [`Document`] trees from already filtered records.
//!
//! Nothing here filters or fails: callers pass the rows they want printed.

use crate::aggregate::{net_profit, total_expenses, total_sales};
use crate::money::Money;
use crate::period::FilterPeriod;
use crate::types::{Expense, Sale, ShopSettings};

use super::document::{
    Block, Cell, Document, DocumentKind, Field, Header, Logo, Table, TableRole, Tone,
};
use super::labels::Labels;
use super::ReportContext;

// =============================================================================
// Header
// =============================================================================

fn header(
    settings: &ShopSettings,
    title: &str,
    context: &ReportContext,
    period: Option<FilterPeriod>,
) -> Header {
    let logo = settings.logo_uri.as_deref().and_then(Logo::from_data_uri);

    Header {
        logo,
        shop_name: settings.display_name().to_string(),
        contact_lines: settings.contact_lines().into_iter().map(String::from).collect(),
        title: title.to_string(),
        generated_on: context.today_label(),
        period_label: period.map(|p| context.labels().period_label(Some(p)).to_string()),
    }
}

/// `rapport-ventes-month-2024-06-20` style names.
fn report_stem(prefix: &str, period: Option<FilterPeriod>, context: &ReportContext) -> String {
    let period = period.map(|p| p.as_str()).unwrap_or("all");
    format!("{}-{}-{}", prefix, period, context.today.format("%Y-%m-%d"))
}

/// Keeps letters, digits, `-` and `_`; everything else becomes `-`.
fn sanitize_stem(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

// =============================================================================
// Tables
// =============================================================================

fn sales_table(sales: &[&Sale], labels: &Labels) -> Table {
    let mut table = Table::new(
        TableRole::Sales,
        &[labels.date, labels.customer, labels.items, labels.payment, labels.amount],
    );

    for sale in sales {
        table.push_row(vec![
            Cell::text(&sale.date),
            Cell::text(&sale.customer_name),
            Cell::text(sale.items_summary()),
            Cell::text(labels.payment_label(&sale.payment_method)),
            Cell::Amount(sale.total()),
        ]);
    }

    table
}

fn expenses_table(expenses: &[&Expense], labels: &Labels) -> Table {
    let mut table = Table::new(
        TableRole::Expenses,
        &[labels.date, labels.description, labels.category, labels.amount],
    );

    for expense in expenses {
        table.push_row(vec![
            Cell::text(&expense.date),
            Cell::text(&expense.description),
            Cell::text(&expense.category),
            Cell::Amount(-expense.amount()),
        ]);
    }

    table
}

// =============================================================================
// Reports
// =============================================================================

/// Sales report: one row per sale, footer grand total.
pub fn sales_report(
    sales: &[&Sale],
    period: Option<FilterPeriod>,
    settings: &ShopSettings,
    context: &ReportContext,
) -> Document {
    let labels = context.labels();
    let total = total_sales(sales);
    let table = sales_table(sales, labels).with_footer(labels.total, total);

    Document {
        kind: DocumentKind::Sales,
        header: header(settings, labels.sales_title, context, period),
        blocks: vec![Block::Table(table)],
        locale: context.locale,
        currency: context.currency.clone(),
        file_stem: report_stem("rapport-ventes", period, context),
    }
}

/// Expenses report: one row per expense, amounts negated.
pub fn expenses_report(
    expenses: &[&Expense],
    period: Option<FilterPeriod>,
    settings: &ShopSettings,
    context: &ReportContext,
) -> Document {
    let labels = context.labels();
    let total = total_expenses(expenses);
    let table = expenses_table(expenses, labels).with_footer(labels.total, -total);

    Document {
        kind: DocumentKind::Expenses,
        header: header(settings, labels.expenses_title, context, period),
        blocks: vec![Block::Table(table)],
        locale: context.locale,
        currency: context.currency.clone(),
        file_stem: report_stem("rapport-charges", period, context),
    }
}

/// Balance report: revenue table, expenses table, then net profit.
pub fn balance_report(
    sales: &[&Sale],
    expenses: &[&Expense],
    period: Option<FilterPeriod>,
    settings: &ShopSettings,
    context: &ReportContext,
) -> Document {
    let labels = context.labels();

    let mut revenue = Table::new(
        TableRole::BalanceSales,
        &[labels.date, labels.customer, labels.amount],
    );
    for sale in sales {
        revenue.push_row(vec![
            Cell::text(&sale.date),
            Cell::text(&sale.customer_name),
            Cell::Amount(sale.total()),
        ]);
    }

    let mut costs = Table::new(
        TableRole::BalanceExpenses,
        &[labels.date, labels.description, labels.amount],
    );
    for expense in expenses {
        costs.push_row(vec![
            Cell::text(&expense.date),
            Cell::text(&expense.description),
            Cell::Amount(-expense.amount()),
        ]);
    }

    let net = net_profit(sales, expenses);

    Document {
        kind: DocumentKind::Balance,
        header: header(settings, labels.balance_title, context, period),
        blocks: vec![
            Block::Section {
                title: labels.revenue_section.to_string(),
            },
            Block::Table(revenue.with_footer(labels.revenue_subtotal, total_sales(sales))),
            Block::Section {
                title: labels.expenses_section.to_string(),
            },
            Block::Table(costs.with_footer(labels.expenses_subtotal, -total_expenses(expenses))),
            Block::Total {
                label: labels.net_profit.to_string(),
                amount: net,
                tone: Tone::of(net),
            },
        ],
        locale: context.locale,
        currency: context.currency.clone(),
        file_stem: report_stem("bilan", period, context),
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Single-sale invoice. The printed total is the stored `sale.total`.
pub fn invoice(sale: &Sale, settings: &ShopSettings, context: &ReportContext) -> Document {
    let labels = context.labels();

    let items_total = sale.items_total();
    if items_total != sale.total() {
        tracing::warn!(
            sale_id = %sale.id,
            stored_total = sale.total,
            items_total = items_total.fcfa(),
            "Sale total does not match its line items"
        );
    }

    let mut items = Table::new(
        TableRole::InvoiceItems,
        &[labels.article, labels.quantity, labels.unit_price, labels.line_total],
    );
    for item in &sale.items {
        items.push_row(vec![
            Cell::text(&item.product_name),
            Cell::Count(item.quantity),
            Cell::Amount(item.unit_price()),
            Cell::Amount(item.line_total()),
        ]);
    }

    let (status, tone) = if sale.is_unpaid_debt() {
        (labels.unpaid, Tone::Negative)
    } else {
        (labels.paid, Tone::Positive)
    };

    let shop_name = settings.display_name();

    Document {
        kind: DocumentKind::Invoice,
        header: header(settings, labels.invoice_title, context, None),
        blocks: vec![
            Block::Fields {
                fields: vec![
                    Field::new(labels.invoice_number, &sale.id),
                    Field::new(labels.date, &sale.date),
                    Field::new(labels.customer, &sale.customer_name),
                    Field::new(labels.payment_method, labels.payment_label(&sale.payment_method)),
                ],
            },
            Block::Status {
                label: labels.status.to_string(),
                text: status.to_string(),
                tone,
            },
            Block::Table(items),
            Block::Total {
                label: labels.amount_due.to_string(),
                amount: sale.total(),
                tone: Tone::Neutral,
            },
            Block::Note {
                text: labels.thank_you.to_string(),
            },
            Block::Note {
                text: format!("{} - {}", shop_name, labels.signature),
            },
        ],
        locale: context.locale,
        currency: context.currency.clone(),
        file_stem: sanitize_stem(&format!("facture-{}-{}", sale.id, sale.customer_name)),
    }
}

/// Σ of the amount cells in one column. Used by tests to cross-check footers.
#[cfg(test)]
pub(crate) fn column_sum(table: &Table, column: usize) -> Money {
    table
        .rows
        .iter()
        .filter_map(|row| match row.get(column) {
            Some(Cell::Amount(amount)) => Some(*amount),
            _ => None,
        })
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
