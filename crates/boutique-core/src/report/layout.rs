//! # Fixed Layout
//!
//! Paints a [`Document`] as absolutely positioned draw commands on A4 pages,
//! in millimetres from the top-left corner.
//!
//! ```text
//! ┌──────────────────────────── 210 mm ────────────────────────────┐
//! │ x=20                                                    [logo] │
//! │ SHOP NAME (20pt)                                               │
//! │ contact lines (10pt)                                           │
//! │ TITLE (16pt)                                                   │
//! │ Date de génération / Période (12pt)                            │
//! │ ─────────────────────────────────────────────── x=20..190      │
//! │ rows every 8 mm, new page once y passes the row limit          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike HTML output, long text columns are cut to a fixed number of
//! characters so they fit the column width.

use serde::Serialize;

use super::document::{Block, Cell, Document, Header, Table, TableRole, Tone};
use super::labels::Labels;

/// Left margin.
const MARGIN_LEFT: f32 = 20.0;
/// Right end of separator lines.
const RULE_RIGHT: f32 = 190.0;
/// Cursor position at the top of a continuation page.
const PAGE_TOP: f32 = 20.0;
/// Rows start a new page past this position.
const ROW_LIMIT: f32 = 270.0;
/// Tighter limit for the revenue table of the balance report.
const BALANCE_SALES_ROW_LIMIT: f32 = 250.0;
const ROW_HEIGHT: f32 = 8.0;

// =============================================================================
// Output Types
// =============================================================================

/// RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);

    fn of(tone: Tone) -> Rgb {
        match tone {
            Tone::Neutral => Rgb::BLACK,
            Tone::Positive => Rgb::GREEN,
            Tone::Negative => Rgb::RED,
        }
    }
}

/// One painting instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Image {
        data_uri: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

// =============================================================================
// Column Geometry
// =============================================================================

/// How a column's text is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    Full,
    /// Keep at most `n` characters.
    Cut(usize),
    /// Keep at most `n` characters and append `...` when cut.
    Ellipsis(usize),
}

struct Geometry {
    columns: &'static [(f32, Fit)],
    row_limit: f32,
    footer_x: f32,
}

fn geometry(role: TableRole) -> Geometry {
    use Fit::*;
    match role {
        TableRole::Sales => Geometry {
            columns: &[(20.0, Full), (50.0, Cut(15)), (100.0, Ellipsis(20)), (140.0, Full), (170.0, Full)],
            row_limit: ROW_LIMIT,
            footer_x: 140.0,
        },
        TableRole::Expenses => Geometry {
            columns: &[(20.0, Full), (60.0, Cut(25)), (120.0, Full), (160.0, Full)],
            row_limit: ROW_LIMIT,
            footer_x: 140.0,
        },
        TableRole::BalanceSales => Geometry {
            columns: &[(20.0, Full), (60.0, Cut(20)), (160.0, Full)],
            row_limit: BALANCE_SALES_ROW_LIMIT,
            footer_x: 120.0,
        },
        TableRole::BalanceExpenses => Geometry {
            columns: &[(20.0, Full), (60.0, Cut(25)), (160.0, Full)],
            row_limit: ROW_LIMIT,
            footer_x: 120.0,
        },
        TableRole::InvoiceItems => Geometry {
            columns: &[(20.0, Full), (100.0, Full), (130.0, Full), (170.0, Full)],
            row_limit: ROW_LIMIT,
            footer_x: 120.0,
        },
    }
}

/// Cuts `text` to `fit`, counting characters rather than bytes.
fn fit_text(text: &str, fit: Fit) -> String {
    match fit {
        Fit::Full => text.to_string(),
        Fit::Cut(max) => text.chars().take(max).collect(),
        Fit::Ellipsis(max) => {
            if text.chars().count() > max {
                let mut cut: String = text.chars().take(max).collect();
                cut.push_str("...");
                cut
            } else {
                text.to_string()
            }
        }
    }
}

// =============================================================================
// Painter
// =============================================================================

struct Painter<'a> {
    document: &'a Document,
    labels: &'static Labels,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> Painter<'a> {
    fn new(document: &'a Document) -> Self {
        Painter {
            document,
            labels: document.locale.labels(),
            pages: vec![Page::default()],
            y: PAGE_TOP,
        }
    }

    fn push(&mut self, command: DrawCommand) {
        // `pages` starts with one page and only grows.
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    fn text(&mut self, x: f32, size: f32, color: Rgb, text: impl Into<String>) {
        let y = self.y;
        self.push(DrawCommand::Text {
            x,
            y,
            size,
            color,
            text: text.into(),
        });
    }

    fn rule(&mut self, y: f32) {
        self.push(DrawCommand::Line {
            x1: MARGIN_LEFT,
            y1: y,
            x2: RULE_RIGHT,
            y2: y,
        });
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_TOP;
    }

    fn ensure_room(&mut self, limit: f32) {
        if self.y > limit {
            self.new_page();
        }
    }

    fn header(&mut self, header: &Header) {
        if let Some(logo) = &header.logo {
            self.push(DrawCommand::Image {
                data_uri: logo.data_uri.clone(),
                x: 160.0,
                y: 10.0,
                width: 30.0,
                height: 30.0,
            });
        }

        self.y = 20.0;
        self.text(MARGIN_LEFT, 20.0, Rgb::BLACK, header.shop_name.to_uppercase());
        self.y += 6.0;

        for line in &header.contact_lines {
            self.text(MARGIN_LEFT, 10.0, Rgb::BLACK, line.as_str());
            self.y += 5.0;
        }

        self.y += 4.0;
        self.text(MARGIN_LEFT, 16.0, Rgb::BLACK, header.title.to_uppercase());
        self.y += 15.0;

        let generated = format!("{}: {}", self.labels.generated_on, header.generated_on);
        self.text(MARGIN_LEFT, 12.0, Rgb::BLACK, generated);
        self.y += 10.0;

        if let Some(label) = header.period_label.as_deref() {
            let period = format!("{}: {}", self.labels.period, label);
            self.text(MARGIN_LEFT, 12.0, Rgb::BLACK, period);
            self.y += 10.0;
        }

        self.y += 10.0;
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Section { title } => {
                self.ensure_room(ROW_LIMIT);
                self.text(MARGIN_LEFT, 14.0, Rgb::BLACK, title.to_uppercase());
                self.y += 15.0;
            }
            Block::Fields { fields } => {
                for field in fields {
                    self.ensure_room(ROW_LIMIT);
                    let line = format!("{}: {}", field.label, field.value);
                    self.text(MARGIN_LEFT, 12.0, Rgb::BLACK, line);
                    self.y += 10.0;
                }
            }
            Block::Status { label, text, tone } => {
                self.ensure_room(ROW_LIMIT);
                let line = format!("{}: {}", label.to_uppercase(), text);
                self.text(MARGIN_LEFT, 12.0, Rgb::of(*tone), line);
                self.y += 20.0;
            }
            Block::Table(table) => self.table(table),
            Block::Total { label, amount, tone } => {
                self.y += 10.0;
                self.ensure_room(ROW_LIMIT);
                self.rule(self.y);
                self.y += 10.0;
                let line = format!(
                    "{}: {}",
                    label.to_uppercase(),
                    self.document.format_amount(*amount)
                );
                self.text(120.0, 14.0, Rgb::of(*tone), line);
                self.y += 30.0;
            }
            Block::Note { text } => {
                self.ensure_room(ROW_LIMIT);
                self.text(MARGIN_LEFT, 10.0, Rgb::BLACK, text.as_str());
                self.y += 10.0;
            }
        }
    }

    fn cell(&self, cell: &Cell) -> String {
        match cell {
            Cell::Text(text) => text.clone(),
            Cell::Count(count) => count.to_string(),
            Cell::Amount(amount) => self.document.format_amount(*amount),
        }
    }

    fn table(&mut self, table: &Table) {
        let geometry = geometry(table.role);

        self.ensure_room(geometry.row_limit);
        for (title, (x, _)) in table.columns.iter().zip(geometry.columns) {
            self.text(*x, 10.0, Rgb::BLACK, title.as_str());
        }
        self.rule(self.y + 2.0);
        self.y += 10.0;

        for row in &table.rows {
            self.ensure_room(geometry.row_limit);
            for (cell, (x, fit)) in row.iter().zip(geometry.columns) {
                let text = fit_text(&self.cell(cell), *fit);
                self.text(*x, 10.0, Rgb::BLACK, text);
            }
            self.y += ROW_HEIGHT;
        }

        let Some(footer) = &table.footer else {
            return;
        };

        let line = format!("{}: {}", footer.label, self.document.format_amount(footer.amount));
        match table.role {
            TableRole::BalanceSales | TableRole::BalanceExpenses => {
                self.y += 5.0;
                self.ensure_room(ROW_LIMIT);
                self.text(geometry.footer_x, 12.0, Rgb::BLACK, line);
                self.y += 20.0;
            }
            TableRole::Sales | TableRole::Expenses | TableRole::InvoiceItems => {
                self.y += 10.0;
                self.ensure_room(ROW_LIMIT);
                self.rule(self.y);
                self.y += 10.0;
                self.text(geometry.footer_x, 12.0, Rgb::BLACK, line);
                self.y += 10.0;
            }
        }
    }
}

/// Paints `document` onto as many pages as it needs.
pub fn render(document: &Document) -> Vec<Page> {
    let mut painter = Painter::new(document);

    painter.header(&document.header);
    for block in &document.blocks {
        painter.block(block);
    }

    tracing::debug!(
        kind = ?document.kind,
        pages = painter.pages.len(),
        "Laid out document"
    );

    painter.pages
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::FilterPeriod;
    use crate::report::{produce_invoice, produce_report, ReportContext, ReportKind, ReportRequest};
    use crate::types::{Expense, PaymentMethod, Sale, SaleItem, ShopSettings};
    use chrono::NaiveDate;

    fn context() -> ReportContext {
        ReportContext::new(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap())
    }

    fn sale(id: usize, customer: &str, product: &str) -> Sale {
        Sale::from_items(
            id.to_string(),
            customer,
            vec![SaleItem {
                product_id: "p1".to_string(),
                product_name: product.to_string(),
                quantity: 1,
                price: 100,
            }],
            PaymentMethod::Wave,
            "20/06/2024",
        )
    }

    fn texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| &p.commands)
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fit_text() {
        assert_eq!(fit_text("Aminata Ndiaye Sow", Fit::Cut(15)), "Aminata Ndiaye ");
        assert_eq!(fit_text("Riz (x2)", Fit::Ellipsis(20)), "Riz (x2)");
        assert_eq!(
            fit_text("Riz parfumé (x2), Huile (x1)", Fit::Ellipsis(20)),
            "Riz parfumé (x2), Hu..."
        );
        assert_eq!(fit_text("Électricité", Fit::Cut(3)), "Éle");
    }

    #[test]
    fn test_sales_columns_are_truncated() {
        let sales = vec![sale(1, "Aminata Ndiaye Sow", "Riz parfumé long grain")];
        let doc = produce_report(
            ReportRequest::new(ReportKind::Sales, Some(FilterPeriod::Day)),
            &sales,
            &[],
            &ShopSettings::default(),
            &context(),
        );
        let all = texts(&render(&doc));

        assert!(all.contains(&"Aminata Ndiaye ".to_string()));
        assert!(all.contains(&"Riz parfumé long gra...".to_string()));
        assert!(all.contains(&"TOTAL: 100 FCFA".to_string()));
        assert!(all.contains(&"MA BOUTIQUE".to_string()));
        assert!(all.contains(&"RAPPORT DES VENTES".to_string()));
    }

    #[test]
    fn test_rows_paginate() {
        let sales: Vec<Sale> = (0..60).map(|i| sale(i, "Awa", "Riz")).collect();
        let doc = produce_report(
            ReportRequest::new(ReportKind::Sales, None),
            &sales,
            &[],
            &ShopSettings::default(),
            &context(),
        );
        let pages = render(&doc);

        assert!(pages.len() >= 2);
        for page in &pages {
            for command in &page.commands {
                if let DrawCommand::Text { y, .. } = command {
                    assert!(*y <= ROW_LIMIT + ROW_HEIGHT + 30.0);
                }
            }
        }
        let rows = texts(&pages).iter().filter(|t| t.as_str() == "Awa").count();
        assert_eq!(rows, 60);
    }

    #[test]
    fn test_balance_net_color() {
        let expenses = vec![Expense {
            id: "e1".to_string(),
            description: "Facture d'électricité du mois de juin".to_string(),
            category: "Charges".to_string(),
            amount: 500,
            date: "20/06/2024".to_string(),
        }];
        let doc = produce_report(
            ReportRequest::new(ReportKind::Balance, Some(FilterPeriod::Week)),
            &[],
            &expenses,
            &ShopSettings::default(),
            &context(),
        );
        let pages = render(&doc);

        let net = pages[0]
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { text, color, .. } if text.starts_with("BÉNÉFICE NET") => {
                    Some((text.clone(), *color))
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(net, ("BÉNÉFICE NET: -500 FCFA".to_string(), Rgb::RED));

        let all = texts(&pages);
        assert!(all.contains(&"Facture d'électricité du ".to_string()));
        assert!(all.contains(&"Sous-total charges: -500 FCFA".to_string()));
    }

    #[test]
    fn test_invoice_layout() {
        let settings = ShopSettings {
            logo_uri: Some("data:image/jpeg;base64,/9j/4AAQSkZJRg==".to_string()),
            ..ShopSettings::default()
        };
        let sales = vec![sale(7, "Awa", "Savon")];
        let doc = produce_invoice("7", &sales, &settings, &context()).unwrap();
        let pages = render(&doc);

        assert!(matches!(pages[0].commands[0], DrawCommand::Image { .. }));
        let all = texts(&pages);
        assert!(all.contains(&"Facture N°: 7".to_string()));
        assert!(all.contains(&"STATUT: PAYÉ".to_string()));
        assert!(all.contains(&"TOTAL À PAYER: 100 FCFA".to_string()));
        assert!(all.contains(&"Merci pour votre achat !".to_string()));
    }
}
