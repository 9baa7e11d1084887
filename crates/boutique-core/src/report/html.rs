//! HTML rendering.
//!
//! Prints every text field in full and escapes it. This is the format handed
//! to the export collaborator, which turns the markup into a PDF.

use std::fmt::Write;

use super::document::{Block, Cell, Document, DocumentKind, Header, Table, Tone};
use super::labels::Labels;

const BASE_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 24px; }
.logo { float: right; margin-top: 0; margin-bottom: 16px; max-height: 60px; }
.shop { font-size: 20px; font-weight: bold; }
.contact { text-align: right; font-size: 14px; color: #64748B; margin-bottom: 8px; line-height: 1.5; }
table { width: 100%; border-collapse: collapse; margin-top: 24px; }
th, td { border: 1px solid #E2E8F0; padding: 8px; font-size: 12px; }
th { background: #F3F4F6; }
tfoot td { font-weight: bold; background: #F3F4F6; }
.positive { color: #008000; }
.negative { color: #FF0000; }
.note { font-size: 12px; color: #64748B; }";

/// Escapes text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn accent(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Expenses => "#EF4444",
        DocumentKind::Sales | DocumentKind::Balance | DocumentKind::Invoice => "#8B5CF6",
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "",
        Tone::Positive => " class=\"positive\"",
        Tone::Negative => " class=\"negative\"",
    }
}

/// Renders a complete HTML page.
pub fn render(document: &Document) -> String {
    let mut html = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n<style>\n{}\nh1 {{ color: {}; }}\n</style>\n</head>\n<body>\n",
        escape(&document.header.title),
        BASE_STYLE,
        accent(document.kind)
    );

    render_header(&mut html, &document.header, document.locale.labels());

    for block in &document.blocks {
        render_block(&mut html, document, block);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, header: &Header, labels: &Labels) {
    if let Some(logo) = &header.logo {
        let _ = writeln!(html, "<img src=\"{}\" class=\"logo\" />", escape(&logo.data_uri));
    }

    let _ = writeln!(html, "<div class=\"shop\">{}</div>", escape(&header.shop_name));

    if !header.contact_lines.is_empty() {
        html.push_str("<div class=\"contact\">\n");
        for line in &header.contact_lines {
            let _ = writeln!(html, "<div>{}</div>", escape(line));
        }
        html.push_str("</div>\n");
    }

    let _ = writeln!(html, "<h1>{}</h1>", escape(&header.title));
    let _ = writeln!(
        html,
        "<p><strong>{} :</strong> {}</p>",
        escape(labels.generated_on),
        escape(&header.generated_on)
    );

    if let Some(label) = header.period_label.as_deref() {
        let _ = writeln!(html, "<p><strong>{} :</strong> {}</p>", escape(labels.period), escape(label));
    }
}

fn render_block(html: &mut String, document: &Document, block: &Block) {
    match block {
        Block::Section { title } => {
            let _ = writeln!(html, "<h2>{}</h2>", escape(title));
        }
        Block::Fields { fields } => {
            for field in fields {
                let _ = writeln!(
                    html,
                    "<p><strong>{} :</strong> {}</p>",
                    escape(&field.label),
                    escape(&field.value)
                );
            }
        }
        Block::Status { label, text, tone } => {
            let _ = writeln!(
                html,
                "<p><strong>{} :</strong> <span{}>{}</span></p>",
                escape(label),
                tone_class(*tone),
                escape(text)
            );
        }
        Block::Table(table) => render_table(html, document, table),
        Block::Total { label, amount, tone } => {
            let _ = writeln!(
                html,
                "<h2{}>{} : {}</h2>",
                tone_class(*tone),
                escape(label),
                escape(&document.format_amount(*amount))
            );
        }
        Block::Note { text } => {
            let _ = writeln!(html, "<p class=\"note\">{}</p>", escape(text));
        }
    }
}

fn cell_text(document: &Document, cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Count(count) => count.to_string(),
        Cell::Amount(amount) => document.format_amount(*amount),
    }
}

fn render_table(html: &mut String, document: &Document, table: &Table) {
    html.push_str("<table>\n<thead>\n<tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(&cell_text(document, cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n");

    if let Some(footer) = &table.footer {
        let span = table.columns.len().saturating_sub(1).max(1);
        let _ = writeln!(
            html,
            "<tfoot>\n<tr><td colspan=\"{}\">{}</td><td>{}</td></tr>\n</tfoot>",
            span,
            escape(&footer.label),
            escape(&document.format_amount(footer.amount))
        );
    }

    html.push_str("</table>\n");
}
