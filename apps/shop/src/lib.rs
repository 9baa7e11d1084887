//! # Boutique App Library
//!
//! Application layer of the shop: state, commands, export and startup.
//!
//! ## Module Organization
//! ```text
//! boutique_app/
//! ├── lib.rs          ◄─── You are here (logging & bootstrap)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── AppState (collections + store + clock)
//! │   └── config.rs   ◄─── AppConfig (env + platform defaults)
//! ├── commands/       ◄─── Products, sales, expenses, settings, reports
//! ├── export.rs       ◄─── Exporter/sharer collaborators, HTML file export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod state;

use boutique_core::SystemClock;
use boutique_store::{SqliteStore, StoreConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AppConfig, AppState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,boutique=debug,sqlx=warn";

/// Opens the store and loads the shop.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode at config.database_path                      │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  2. Load State ───────────────────────────────────────────────────────► │
/// │     • products, sales, expenses, settings                               │
/// │     • undecodable blobs start empty                                     │
/// │                                                                         │
/// │  3. Apply Config ─────────────────────────────────────────────────────► │
/// │     • locale and currency for documents                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, ApiError> {
    info!(
        db = %config.database_path.display(),
        locale = ?config.locale,
        "Starting Boutique"
    );

    let store = SqliteStore::connect(StoreConfig::new(&config.database_path)).await?;
    let state = AppState::load(Arc::new(store), Arc::new(SystemClock))
        .await?
        .with_config(config);

    info!(?state, "State initialized");
    Ok(state)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=boutique_core=trace` - Trace the report engine only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, ProductInput};

    #[tokio::test]
    async fn test_bootstrap_persists_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("data").join("boutique.db"),
            export_dir: dir.path().join("exports"),
            ..AppConfig::default()
        };

        let mut state = bootstrap(&config).await.unwrap();
        add_product(
            &mut state,
            ProductInput {
                name: "Riz".to_string(),
                category: "Alimentation".to_string(),
                price: 500,
                stock: 10,
            },
        )
        .await
        .unwrap();
        drop(state);

        let reopened = bootstrap(&config).await.unwrap();
        assert_eq!(reopened.products().len(), 1);
        assert_eq!(reopened.products()[0].name, "Riz");
    }
}
