//! User preferences that survive restarts.
//!
//! Currently just the UI language, which also drives the `Accept-Language`
//! header on every outbound request.

use crate::database::Database;
use crate::error::Result;

/// Storage key for the language preference.
pub const KEY_LANGUAGE: &str = "language";

/// Fallback language when no preference has been stored.
pub const DEFAULT_LANGUAGE: &str = "ru";

impl Database {
    /// Current language preference, defaulting to [`DEFAULT_LANGUAGE`].
    pub fn language(&self) -> Result<String> {
        Ok(self
            .kv_get(KEY_LANGUAGE)?
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()))
    }

    pub fn set_language(&self, lang: &str) -> Result<()> {
        self.kv_set(KEY_LANGUAGE, lang)
    }
}
