//! # Settings Commands
//!
//! Shop identity and the full data reset.

use boutique_core::report::Logo;
use boutique_core::ShopSettings;
use boutique_store::{KeyValueStore, StorageKey};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Saves the shop identity. Blank optional fields are stored as absent.
///
/// A logo that is not a decodable image data URI is still stored; the
/// renderers leave it out.
pub async fn update_settings(
    state: &mut AppState,
    settings: ShopSettings,
) -> Result<ShopSettings, ApiError> {
    let settings = ShopSettings {
        name: settings.name.trim().to_string(),
        logo_uri: non_blank(settings.logo_uri),
        phone: non_blank(settings.phone),
        address: non_blank(settings.address),
        email: non_blank(settings.email),
    };

    if let Some(uri) = settings.logo_uri.as_deref() {
        if Logo::from_data_uri(uri).is_none() {
            warn!(len = uri.len(), "Logo is not an image data URI, it will not be printed");
        }
    }

    state.settings = settings.clone();
    state.persist(StorageKey::Settings).await?;

    info!(name = %settings.display_name(), has_logo = settings.logo_uri.is_some(), "Settings saved");
    Ok(settings)
}

pub async fn remove_logo(state: &mut AppState) -> Result<ShopSettings, ApiError> {
    state.settings.logo_uri = None;
    state.persist(StorageKey::Settings).await?;

    info!("Logo removed");
    Ok(state.settings.clone())
}

/// Wipes the store and every in-memory collection.
pub async fn reset_all(state: &mut AppState) -> Result<(), ApiError> {
    state.store().clear().await?;
    state.reset();

    info!("All data reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{empty_state, product};

    const LOGO: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[tokio::test]
    async fn test_update_normalizes_blanks() {
        let (mut state, store) = empty_state().await;

        let saved = update_settings(
            &mut state,
            ShopSettings {
                name: " Chez Awa ".to_string(),
                logo_uri: Some(LOGO.to_string()),
                phone: Some("77 123 45 67".to_string()),
                address: Some("   ".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(saved.name, "Chez Awa");
        assert!(saved.address.is_none());
        assert_eq!(state.settings(), &saved);

        let raw = store.load(StorageKey::Settings).await.unwrap().unwrap();
        assert!(raw.contains("\"logoUri\""));
    }

    #[tokio::test]
    async fn test_remove_logo() {
        let (mut state, _) = empty_state().await;
        state.settings.logo_uri = Some(LOGO.to_string());

        let settings = remove_logo(&mut state).await.unwrap();
        assert!(settings.logo_uri.is_none());
    }

    #[tokio::test]
    async fn test_reset_all_clears_everything() {
        let (mut state, store) = empty_state().await;
        state.products.push(product("p1", "Riz", 500, 3));
        state.settings.name = "Chez Awa".to_string();
        state.persist(StorageKey::Products).await.unwrap();
        state.persist(StorageKey::Settings).await.unwrap();

        reset_all(&mut state).await.unwrap();

        assert!(state.products().is_empty());
        assert_eq!(state.settings(), &ShopSettings::default());
        assert!(store.is_empty().await);
    }
}
