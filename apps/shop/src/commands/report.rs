//! # Report Commands
//!
//! Build a document from the current state, render it and hand it to the
//! export collaborators.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Report Export                                        │
//! │                                                                         │
//! │  ReportRequest { kind, period }                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  produce_report (filter ──► aggregate ──► Document)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RenderedDocument (HTML) ──► exporter.export ──► sharer.share (opt.)   │
//! │                                   │                    │                │
//! │                                   ▼                    ▼                │
//! │                          ApiError::ExportError on either failure       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use boutique_core::report::{html, layout, produce_invoice, produce_report};
use boutique_core::{Document, ReportRequest};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::export::{DocumentExporter, DocumentHandle, DocumentSharer, RenderedDocument};
use crate::state::AppState;

/// Builds the period report without rendering it.
pub fn build_report(state: &AppState, request: ReportRequest) -> Document {
    produce_report(
        request,
        state.sales(),
        state.expenses(),
        state.settings(),
        &state.report_context(),
    )
}

/// The HTML the export would write, for on-screen preview.
pub fn preview_report_html(state: &AppState, request: ReportRequest) -> String {
    html::render(&build_report(state, request))
}

/// Fixed-layout draw commands for the printable version of a report.
pub fn preview_report_pages(state: &AppState, request: ReportRequest) -> Vec<layout::Page> {
    layout::render(&build_report(state, request))
}

/// Renders and exports a period report, then shares it when a sharer is
/// given.
pub async fn export_report(
    state: &AppState,
    request: ReportRequest,
    exporter: &dyn DocumentExporter,
    sharer: Option<&dyn DocumentSharer>,
) -> Result<DocumentHandle, ApiError> {
    let document = build_report(state, request);
    deliver(&document, exporter, sharer).await
}

/// Renders and exports the invoice of one sale.
pub async fn export_invoice(
    state: &AppState,
    sale_id: &str,
    exporter: &dyn DocumentExporter,
    sharer: Option<&dyn DocumentSharer>,
) -> Result<DocumentHandle, ApiError> {
    let document = produce_invoice(
        sale_id,
        state.sales(),
        state.settings(),
        &state.report_context(),
    )?;
    deliver(&document, exporter, sharer).await
}

async fn deliver(
    document: &Document,
    exporter: &dyn DocumentExporter,
    sharer: Option<&dyn DocumentSharer>,
) -> Result<DocumentHandle, ApiError> {
    let rendered = RenderedDocument::from_document(document);
    debug!(kind = ?rendered.kind, stem = %rendered.file_stem, "Exporting document");

    let handle = exporter.export(&rendered).await?;

    if let Some(sharer) = sharer {
        sharer.share(&handle).await?;
        info!(path = %handle.path.display(), "Document shared");
    }

    Ok(handle)
}

// =============================================================================
// Unit Tests
// =============================================================================
