//! Token Storage
//!
//! Persisted client state is exactly two strings, `access_token` and
//! `refresh_token`. The store is a small key-value interface so the browser
//! build can back it with local storage and the CLI with a JSON file.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key of the short-lived bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the long-lived refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key-value persistence for session tokens
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Token pair issued by login and register
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

/// Helpers shared by every store
pub trait TokenStoreExt: TokenStore {
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Both tokens, only when both are present
    fn tokens(&self) -> Option<Tokens> {
        Some(Tokens {
            access: self.access_token()?,
            refresh: self.refresh_token()?,
        })
    }

    fn save_tokens(&self, tokens: &Tokens) -> Result<(), StoreError> {
        self.set(ACCESS_TOKEN_KEY, &tokens.access)?;
        self.set(REFRESH_TOKEN_KEY, &tokens.refresh)
    }

    /// Remove both tokens; attempts both removals even if the first fails
    fn clear_tokens(&self) -> Result<(), StoreError> {
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

impl<T: TokenStore + ?Sized> TokenStoreExt for T {}

/// Errors raised while persisting tokens
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Corrupt token file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// ============================================
// In-memory store
// ============================================

/// Process-local store, used by tests and one-shot tools
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: &Tokens) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.write();
            values.insert(ACCESS_TOKEN_KEY.to_string(), tokens.access.clone());
            values.insert(REFRESH_TOKEN_KEY.to_string(), tokens.refresh.clone());
        }
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().remove(key);
        Ok(())
    }
}

// ============================================
// File store
// ============================================

/// JSON file store for the command line
///
/// The whole map is rewritten on every change; the file holds two short
/// strings.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open (or lazily create) the token file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = expand_home(path.as_ref());
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| StoreError::Io {
                path: path.clone(),
                error: e.to_string(),
            })?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                    path: path.clone(),
                    error: e.to_string(),
                })?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(values).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write();
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
