//! HTTP-backed providers.
//!
//! [`HttpGenerationClient`] talks to a generation gateway with a small JSON
//! protocol:
//!
//! ```text
//! POST {endpoint}
//! { "id": 7, "kind": "text" | "image", "prompt": "..." }
//!
//! 200 { "text": "..." }            (kind = text)
//! 200 { "image_base64": "..." }    (kind = image)
//! 200 { "error": "..." }           (either)
//! ```
//!
//! [`HttpVerseSource`] reads `GET {base}/verses?reference=..&version=..` and
//! treats `404` as "not found".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ServiceConfig;
use crate::provider::{ImageGenerator, TextGenerator, Verse, VerseSource};
use crate::{ServiceError, ServiceResult};

const USER_AGENT: &str = concat!("poster-services/", env!("CARGO_PKG_VERSION"));

fn build_http(config: &ServiceConfig) -> ServiceResult<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()?)
}

fn parse_url(value: &str) -> ServiceResult<Url> {
    Url::parse(value).map_err(|e| ServiceError::InvalidUrl(format!("{value}: {e}")))
}

/// Client for the text/image generation gateway.
#[derive(Clone)]
pub struct HttpGenerationClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
    request_id: AtomicU64,
}

impl std::fmt::Debug for HttpGenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerationClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("authenticated", &self.inner.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpGenerationClient {
    /// Create a client for `config.generation_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] if the URL is malformed.
    /// Returns [`ServiceError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let endpoint = parse_url(&config.generation_url)?;
        Ok(Self {
            inner: Arc::new(InnerClient {
                http: build_http(config)?,
                endpoint,
                api_key: config.api_key.clone(),
                request_id: AtomicU64::new(1),
            }),
        })
    }

    /// The gateway endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    async fn send(&self, kind: GenerationKind, prompt: &str) -> ServiceResult<GenerationResponse> {
        let id = self.inner.request_id.fetch_add(1, Ordering::Relaxed);
        let request = GenerationRequest { id, kind, prompt };
        tracing::debug!(id, ?kind, "Sending generation request");

        let mut builder = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(&request);
        if let Some(key) = &self.inner.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?.error_for_status()?;
        let body: GenerationResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(ServiceError::Provider(error));
        }
        Ok(body)
    }
}

#[async_trait]
impl TextGenerator for HttpGenerationClient {
    async fn generate_text(&self, prompt: &str) -> ServiceResult<String> {
        let body = self.send(GenerationKind::Text, prompt).await?;
        body.text
            .filter(|t| !t.trim().is_empty())
            .ok_or(ServiceError::EmptyResponse)
    }
}

#[async_trait]
impl ImageGenerator for HttpGenerationClient {
    async fn generate_image(&self, prompt: &str) -> ServiceResult<Vec<u8>> {
        let body = self.send(GenerationKind::Image, prompt).await?;
        let encoded = body.image_base64.ok_or(ServiceError::EmptyResponse)?;
        Ok(base64::engine::general_purpose::STANDARD.decode(encoded.trim())?)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum GenerationKind {
    Text,
    Image,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    id: u64,
    kind: GenerationKind,
    prompt: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    image_base64: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Verse lookup over a REST Bible API.
#[derive(Debug, Clone)]
pub struct HttpVerseSource {
    http: Client,
    verses: Url,
}

impl HttpVerseSource {
    /// Create a source rooted at `config.verse_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] if the URL is malformed.
    /// Returns [`ServiceError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let base = config.verse_url.trim_end_matches('/');
        let verses = parse_url(&format!("{base}/verses"))?;
        Ok(Self {
            http: build_http(config)?,
            verses,
        })
    }
}

#[async_trait]
impl VerseSource for HttpVerseSource {
    async fn fetch_verse(&self, reference: &str, version_id: &str) -> ServiceResult<Option<Verse>> {
        let mut url = self.verses.clone();
        url.query_pairs_mut()
            .append_pair("reference", reference)
            .append_pair("version", version_id);

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let verse: Verse = response.error_for_status()?.json().await?;
        Ok((!verse.text.trim().is_empty()).then_some(verse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_generation_url() {
        let config = ServiceConfig::new().with_generation_url("not a url");
        assert!(matches!(
            HttpGenerationClient::new(&config),
            Err(ServiceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_verse_url_joins_path() {
        let config = ServiceConfig::new().with_verse_url("https://bible.example/api/");
        let source = HttpVerseSource::new(&config).expect("valid url");
        assert_eq!(source.verses.as_str(), "https://bible.example/api/verses");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerationRequest {
            id: 3,
            kind: GenerationKind::Image,
            prompt: "sunrise",
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["kind"], "image");
        assert_eq!(json["prompt"], "sunrise");
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_response_parses_partial_body() {
        let body: GenerationResponse =
            serde_json::from_str(r#"{"text":"Hola"}"#).expect("deserialize");
        assert_eq!(body.text.as_deref(), Some("Hola"));
        assert!(body.image_base64.is_none());
        assert!(body.error.is_none());
    }
}
