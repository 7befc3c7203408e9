//! Typed helpers for the persisted session keys.
//!
//! Three stable keys: `access_token`, `refresh_token` and the
//! JSON-serialized `user` record.  A corrupt user record is treated as
//! absent and removed, never surfaced as an error: the session silently
//! downgrades to logged-out.

use joldosh_shared::User;

use crate::database::Database;
use crate::error::Result;

/// Storage key for the bearer access token.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
/// Storage key for the optional refresh token.
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
/// Storage key for the cached user record (JSON).
pub const KEY_USER: &str = "user";

impl Database {
    pub fn access_token(&self) -> Result<Option<String>> {
        self.kv_get(KEY_ACCESS_TOKEN)
    }

    pub fn save_access_token(&self, token: &str) -> Result<()> {
        self.kv_set(KEY_ACCESS_TOKEN, token)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        self.kv_get(KEY_REFRESH_TOKEN)
    }

    pub fn save_refresh_token(&self, token: &str) -> Result<()> {
        self.kv_set(KEY_REFRESH_TOKEN, token)
    }

    /// Load the cached user record.
    ///
    /// Unparsable JSON is deleted and reported as `None` so that storage
    /// corruption resolves to an anonymous session rather than an error.
    pub fn user(&self) -> Result<Option<User>> {
        let Some(raw) = self.kv_get(KEY_USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupt cached user record");
                self.kv_delete(KEY_USER)?;
                Ok(None)
            }
        }
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.kv_set(KEY_USER, &json)
    }

    pub fn delete_user(&self) -> Result<()> {
        self.kv_delete(KEY_USER)
    }

    /// Remove every persisted session key.  Idempotent.
    pub fn clear_session(&self) -> Result<()> {
        self.kv_delete(KEY_ACCESS_TOKEN)?;
        self.kv_delete(KEY_REFRESH_TOKEN)?;
        self.kv_delete(KEY_USER)?;
        Ok(())
    }
}
