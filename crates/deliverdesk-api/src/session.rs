use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ApiError, Result};

/// Key the bearer token is stored under
pub const AUTH_TOKEN_KEY: &str = "token";

/// Small persistent key/value store for session data
///
/// Plays the role browser local storage plays for the web console: the
/// login flow drops the bearer token in here and every request reads it back.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionStore {
    items: HashMap<String, String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store, nothing is written to disk
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from the default location, empty if it doesn't exist yet
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut store = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str::<SessionStore>(&contents).map_err(|e| {
                ApiError::Storage(format!("Failed to parse session file: {}", e))
            })?
        } else {
            Self::new()
        };

        store.path = Some(path);
        Ok(store)
    }

    /// Write the store back to the file it came from; no-op for in-memory stores
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ApiError::Storage(format!("Failed to serialize session: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bearer token, if one is stored and non-blank
    pub fn token(&self) -> Option<&str> {
        self.get_item(AUTH_TOKEN_KEY)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: &str) {
        self.set_item(AUTH_TOKEN_KEY, token);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ApiError::Storage("Could not find data directory".into()))?
            .join("deliverdesk");

        Ok(data_dir.join("session.json"))
    }
}
