//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BOUTIQUE_*`)
//! 2. Defaults (this file, platform data directory)
//!
//! Configuration is read-only after startup.

use boutique_core::money::CURRENCY_LABEL;
use boutique_core::Locale;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_DB_PATH: &str = "BOUTIQUE_DB_PATH";
pub const ENV_EXPORT_DIR: &str = "BOUTIQUE_EXPORT_DIR";
pub const ENV_LOCALE: &str = "BOUTIQUE_LOCALE";
pub const ENV_CURRENCY: &str = "BOUTIQUE_CURRENCY";

const DB_FILE_NAME: &str = "boutique.db";
const EXPORT_DIR_NAME: &str = "exports";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file holding the key-value table.
    pub database_path: PathBuf,

    /// Where exported reports and invoices are written.
    pub export_dir: PathBuf,

    /// Language of document labels.
    pub locale: Locale,

    /// Label printed after every amount.
    pub currency: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Data directory: platform app data folder (`.` if unknown)
    /// - Locale: French
    /// - Currency: FCFA
    fn default() -> Self {
        let data_dir = default_data_dir();
        AppConfig {
            database_path: data_dir.join(DB_FILE_NAME),
            export_dir: data_dir.join(EXPORT_DIR_NAME),
            locale: Locale::default(),
            currency: CURRENCY_LABEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `BOUTIQUE_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `BOUTIQUE_DB_PATH`: database file
    /// - `BOUTIQUE_EXPORT_DIR`: export directory
    /// - `BOUTIQUE_LOCALE`: `fr` or `en`
    /// - `BOUTIQUE_CURRENCY`: amount label
    pub fn from_env() -> Self {
        AppConfig::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(ENV_LOCALE) {
            match Locale::parse(&value) {
                Some(locale) => config.locale = locale,
                None => warn!(value = %value, "Unknown locale, keeping default"),
            }
        }

        if let Some(currency) = lookup(ENV_CURRENCY) {
            config.currency = currency.trim().to_string();
        }

        config
    }
}

/// Platform app data folder.
///
/// - **macOS**: `~/Library/Application Support/com.boutique.shop`
/// - **Windows**: `%APPDATA%\boutique\shop\data`
/// - **Linux**: `~/.local/share/shop`
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "boutique", "shop")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(|_| None);
        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.currency, "FCFA");
        assert!(config.database_path.ends_with("boutique.db"));
        assert!(config.export_dir.ends_with("exports"));
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            (ENV_DB_PATH, "/data/shop.db"),
            (ENV_EXPORT_DIR, "/data/out"),
            (ENV_LOCALE, "en"),
            (ENV_CURRENCY, "XOF"),
        ]);
        let config = AppConfig::from_vars(|key| env.get(key).cloned());

        assert_eq!(config.database_path, PathBuf::from("/data/shop.db"));
        assert_eq!(config.export_dir, PathBuf::from("/data/out"));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.currency, "XOF");
    }

    #[test]
    fn test_bad_locale_and_blank_values_ignored() {
        let env = vars(&[(ENV_LOCALE, "de"), (ENV_CURRENCY, "  ")]);
        let config = AppConfig::from_vars(|key| env.get(key).cloned());

        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.currency, "FCFA");
    }
}
