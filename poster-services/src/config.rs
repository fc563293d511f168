//! Service configuration.

use std::time::Duration;

/// Default generation endpoint (a local gateway).
pub const DEFAULT_GENERATION_URL: &str = "http://localhost:8787/v1/generate";

/// Default verse API base URL.
pub const DEFAULT_VERSE_URL: &str = "http://localhost:8788/v1";

/// Bible version tried when the requested one has no match.
pub const DEFAULT_VERSION: &str = "KJV";

/// Endpoints and credentials for external collaborators.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Text/image generation endpoint.
    pub generation_url: String,
    /// Verse API base URL.
    pub verse_url: String,
    /// Bearer token for the generation endpoint.
    pub api_key: Option<String>,
    /// Fallback Bible version.
    pub default_version: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_url: DEFAULT_GENERATION_URL.to_string(),
            verse_url: DEFAULT_VERSE_URL.to_string(),
            api_key: None,
            default_version: DEFAULT_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the generation endpoint.
    #[must_use]
    pub fn with_generation_url(mut self, url: impl Into<String>) -> Self {
        self.generation_url = url.into();
        self
    }

    /// Set the verse API base URL.
    #[must_use]
    pub fn with_verse_url(mut self, url: impl Into<String>) -> Self {
        self.verse_url = url.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the fallback Bible version.
    #[must_use]
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
