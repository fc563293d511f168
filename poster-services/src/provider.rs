//! Collaborator traits implemented by HTTP clients and test fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ServiceResult;

/// A verse as returned by a Bible API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Canonical reference, e.g. "John 3:16".
    pub reference: String,
    /// Verse text.
    pub text: String,
}

/// Free-text generation (translation, transliteration, suggestions).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt`.
    async fn generate_text(&self, prompt: &str) -> ServiceResult<String>;
}

/// Image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render `prompt` to encoded PNG bytes.
    async fn generate_image(&self, prompt: &str) -> ServiceResult<Vec<u8>>;
}

/// Bible verse lookup.
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Fetch `reference` in `version_id`; `Ok(None)` means not found.
    async fn fetch_verse(&self, reference: &str, version_id: &str) -> ServiceResult<Option<Verse>>;
}
