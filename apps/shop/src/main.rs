//! # Boutique Command Line
//!
//! Exports reports and invoices from the shop database without the mobile
//! UI.
//!
//! ```text
//! boutique summary
//! boutique report balance --period month
//! boutique invoice 1717236000000 --out ./factures
//! boutique preview sales --period week > ventes.html
//! ```
//!
//! Database path, export directory, locale and currency come from
//! `BOUTIQUE_*` variables (see `AppConfig::from_env`); flags override them.

use boutique_app::commands::dashboard::dashboard_summary;
use boutique_app::commands::report::{export_invoice, export_report, preview_report_html};
use boutique_app::error::ApiError;
use boutique_app::export::HtmlFileExporter;
use boutique_app::state::AppConfig;
use boutique_app::{bootstrap, init_tracing};
use boutique_core::{FilterPeriod, ReportKind, ReportRequest};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "boutique")]
#[command(about = "Shop reports and invoices")]
struct Args {
    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard figures as JSON
    Summary,

    /// Export a period report as HTML
    Report {
        kind: KindArg,
        /// day, week, month or quarter; anything else keeps every record
        #[arg(long)]
        period: Option<String>,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export the invoice of one sale as HTML
    Invoice {
        sale_id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print a report's HTML to stdout
    Preview {
        kind: KindArg,
        #[arg(long)]
        period: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Sales,
    Expenses,
    Balance,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Sales => ReportKind::Sales,
            KindArg::Expenses => ReportKind::Expenses,
            KindArg::Balance => ReportKind::Balance,
        }
    }
}

fn request(kind: KindArg, period: Option<&str>) -> ReportRequest {
    let parsed = period.and_then(FilterPeriod::parse_lenient);
    if let (Some(raw), None) = (period, parsed) {
        warn!(period = %raw, "Unknown period, exporting every record");
    }
    ReportRequest::new(kind.into(), parsed)
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    init_tracing();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(db) = args.db {
        config.database_path = db;
    }

    let state = bootstrap(&config).await?;

    match args.command {
        Command::Summary => {
            let summary = dashboard_summary(&state);
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| ApiError::internal(e.to_string()))?;
            println!("{json}");
        }
        Command::Report { kind, period, out } => {
            let exporter = HtmlFileExporter::new(out.unwrap_or(config.export_dir));
            let handle =
                export_report(&state, request(kind, period.as_deref()), &exporter, None).await?;
            println!("{}", handle.path.display());
        }
        Command::Invoice { sale_id, out } => {
            let exporter = HtmlFileExporter::new(out.unwrap_or(config.export_dir));
            let handle = export_invoice(&state, &sale_id, &exporter, None).await?;
            println!("{}", handle.path.display());
        }
        Command::Preview { kind, period } => {
            println!("{}", preview_report_html(&state, request(kind, period.as_deref())));
        }
    }

    Ok(())
}
