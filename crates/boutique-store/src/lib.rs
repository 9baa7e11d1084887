//! # boutique-store: Persistence Layer for Boutique
//!
//! Every collection the shop owns is a JSON blob under a fixed key.
//! On device the blobs live in one SQLite table accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boutique Data Flow                               │
//! │                                                                         │
//! │  App command (create_sale)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   boutique-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │ load_json /   │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │◄───│ save_json     │    │  (embedded)  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │     ┌─────┴──────┐                                              │   │
//! │  │     ▼            ▼                                              │   │
//! │  │  SqliteStore  MemoryStore                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/boutique/boutique.db                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool and the SQLite store
//! - [`store`] - Storage keys, the store trait, typed JSON helpers
//! - [`memory`] - In-memory store
//! - [`snapshot`] - Loads all collections at startup
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boutique_store::{load_snapshot, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::connect(StoreConfig::new("path/to/boutique.db")).await?;
//! let snapshot = load_snapshot(&store).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{SqliteStore, StoreConfig};
pub use snapshot::{load_snapshot, ShopSnapshot};
pub use store::{load_json, load_list, save_json, KeyValueStore, StorageKey};
