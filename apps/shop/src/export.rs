//! # Document Export
//!
//! The boundary where rendered documents leave the app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Export Flow                                          │
//! │                                                                         │
//! │  Document (core) ──► html::render ──► RenderedDocument                 │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                               DocumentExporter::export                  │
//! │                                            │                            │
//! │                          ┌─────────────────┴───────────────┐           │
//! │                          ▼                                 ▼           │
//! │                 Ok(DocumentHandle)                Err(ExportError)     │
//! │                          │                                             │
//! │                          ▼ (optional)                                  │
//! │                 DocumentSharer::share                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each call is single shot. Nothing is retried.

use async_trait::async_trait;
use boutique_core::report::{html, DocumentKind};
use boutique_core::Document;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Extension of the files written by [`HtmlFileExporter`].
pub const HTML_EXTENSION: &str = "html";

// =============================================================================
// Types
// =============================================================================

/// Export/share failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The file could not be written.
    #[error("Could not write document: {0}")]
    Io(#[from] std::io::Error),

    /// The exporter refused the document.
    #[error("Export rejected: {0}")]
    Rejected(String),

    /// The share sheet failed or was unavailable.
    #[error("Sharing failed: {0}")]
    ShareFailed(String),
}

/// A document rendered to HTML, ready to hand over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    /// File name without extension.
    pub file_stem: String,
    pub html: String,
}

impl RenderedDocument {
    pub fn from_document(document: &Document) -> Self {
        RenderedDocument {
            kind: document.kind,
            file_stem: document.file_stem.clone(),
            html: html::render(document),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, HTML_EXTENSION)
    }
}

/// Where an exported document ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHandle {
    pub path: PathBuf,
    pub bytes: usize,
}

// =============================================================================
// Collaborators
// =============================================================================

/// Turns a rendered document into something the user can open.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(&self, document: &RenderedDocument) -> Result<DocumentHandle, ExportError>;
}

/// Hands an exported document to the platform share mechanism.
#[async_trait]
pub trait DocumentSharer: Send + Sync {
    async fn share(&self, handle: &DocumentHandle) -> Result<(), ExportError>;
}

/// Writes `<dir>/<file_stem>.html`, replacing any previous file.
#[derive(Debug, Clone)]
pub struct HtmlFileExporter {
    dir: PathBuf,
}

impl HtmlFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        HtmlFileExporter { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl DocumentExporter for HtmlFileExporter {
    async fn export(&self, document: &RenderedDocument) -> Result<DocumentHandle, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(document.file_name());
        debug!(path = %path.display(), "Writing document");

        tokio::fs::write(&path, document.html.as_bytes()).await?;

        info!(
            kind = ?document.kind,
            path = %path.display(),
            bytes = document.html.len(),
            "Document exported"
        );

        Ok(DocumentHandle {
            path,
            bytes: document.html.len(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(stem: &str) -> RenderedDocument {
        RenderedDocument {
            kind: DocumentKind::Sales,
            file_stem: stem.to_string(),
            html: "<html><body>ok</body></html>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlFileExporter::new(dir.path().join("exports"));

        let handle = exporter.export(&rendered("rapport-ventes-all-2024-06-20")).await.unwrap();

        assert_eq!(
            handle.path,
            dir.path().join("exports").join("rapport-ventes-all-2024-06-20.html")
        );
        let written = std::fs::read_to_string(&handle.path).unwrap();
        assert_eq!(written, "<html><body>ok</body></html>");
        assert_eq!(handle.bytes, written.len());
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let exporter = HtmlFileExporter::new(blocker.join("nested"));
        let err = exporter.export(&rendered("a")).await.unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(rendered("bilan-month-2024-06-20").file_name(), "bilan-month-2024-06-20.html");
    }
}
