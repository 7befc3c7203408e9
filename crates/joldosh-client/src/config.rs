//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the SDK can talk to a local
//! backend with zero configuration.

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace REST API, without a trailing slash.
    /// Env: `JOLDOSH_API_URL`
    /// Default: `http://127.0.0.1:8000/api`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("JOLDOSH_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        config
    }
}
