//! Browser Storage
//!
//! `localStorage`-backed token store and the API base URL.

use ayiti_verite::config::{normalize_base_url, DEFAULT_API_BASE};
use ayiti_verite::{StoreError, TokenStore};

/// localStorage key overriding the build-time API URL
const API_URL_KEY: &str = "ayiti_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Tokens kept in `localStorage` under `access_token` / `refresh_token`
///
/// Holds no handle; storage is looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl TokenStore for LocalStorageTokens {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = local_storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let storage = local_storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".into()))?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// API base URL: localStorage override, then `AYITI_API_BASE_URL` at build
/// time, then the local development server
pub fn api_base() -> String {
    let url = local_storage()
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| {
            option_env!("AYITI_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string()
        });
    normalize_base_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ayiti_verite::{TokenStoreExt, Tokens};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_tokens_persist_in_local_storage() {
        let store = LocalStorageTokens;
        store.clear_tokens().unwrap();

        let tokens = Tokens {
            access: "access-1".into(),
            refresh: "refresh-1".into(),
        };
        store.save_tokens(&tokens).unwrap();
        assert_eq!(store.tokens(), Some(tokens));

        store.clear_tokens().unwrap();
        assert!(store.access_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_api_base_override() {
        let storage = local_storage().unwrap();
        storage.set_item(API_URL_KEY, "https://api.example.ht/").unwrap();
        assert_eq!(api_base(), "https://api.example.ht");

        storage.remove_item(API_URL_KEY).unwrap();
        assert_eq!(api_base(), normalize_base_url(option_env!("AYITI_API_BASE_URL").unwrap_or(DEFAULT_API_BASE)));
    }
}
