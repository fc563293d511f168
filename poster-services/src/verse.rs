//! Verse lookup with a default-version fallback.

use std::sync::Arc;

use crate::provider::{Verse, VerseSource};
use crate::{ServiceError, ServiceResult};

/// Looks verses up, retrying in a default version when needed.
#[derive(Clone)]
pub struct VerseLookup {
    source: Arc<dyn VerseSource>,
    default_version: String,
}

impl std::fmt::Debug for VerseLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerseLookup")
            .field("default_version", &self.default_version)
            .finish_non_exhaustive()
    }
}

impl VerseLookup {
    /// Create a lookup over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn VerseSource>, default_version: impl Into<String>) -> Self {
        Self {
            source,
            default_version: default_version.into(),
        }
    }

    /// The fallback version.
    #[must_use]
    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Fetch one verse; provider errors count as "not found".
    pub async fn fetch_verse(&self, reference: &str, version_id: &str) -> Option<Verse> {
        match self.source.fetch_verse(reference, version_id).await {
            Ok(verse) => verse,
            Err(e) => {
                tracing::warn!(reference, version_id, "verse lookup failed: {e}");
                None
            }
        }
    }

    /// Look `reference` up in `version_id`, then in the default version.
    ///
    /// An empty `version_id` goes straight to the default version.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::VerseNotFound`] when neither version has it.
    pub async fn lookup(&self, reference: &str, version_id: &str) -> ServiceResult<Verse> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(not_found(reference));
        }

        let version = version_id.trim();
        if !version.is_empty() {
            if let Some(verse) = self.fetch_verse(reference, version).await {
                return Ok(verse);
            }
            if version.eq_ignore_ascii_case(&self.default_version) {
                return Err(not_found(reference));
            }
            tracing::info!(reference, version, fallback = %self.default_version, "Retrying verse in default version");
        }

        self.fetch_verse(reference, &self.default_version)
            .await
            .ok_or_else(|| not_found(reference))
    }
}

fn not_found(reference: &str) -> ServiceError {
    ServiceError::VerseNotFound {
        query: reference.to_string(),
    }
}
