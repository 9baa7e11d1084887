//! # State Module
//!
//! Application state and configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  bootstrap(config)                                              │   │
//! │  │    SqliteStore::connect ──► AppState::load ──► with_config      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌───────────────────┴──────────────────┐                       │
//! │          ▼                                      ▼                       │
//! │  ┌──────────────────┐                 ┌──────────────────┐              │
//! │  │    AppState      │                 │    AppConfig     │              │
//! │  │                  │                 │                  │              │
//! │  │  collections     │                 │  database_path   │              │
//! │  │  store, clock    │                 │  export_dir      │              │
//! │  │  locale/currency │                 │  locale/currency │              │
//! │  └──────────────────┘                 └──────────────────┘              │
//! │                                                                         │
//! │  OWNERSHIP: commands take `&mut AppState`; config is read-only.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod config;

pub use app::AppState;
pub use config::{AppConfig, ENV_CURRENCY, ENV_DB_PATH, ENV_EXPORT_DIR, ENV_LOCALE};

#[cfg(test)]
pub(crate) use app::testing;
