//! # Content Service
//!
//! The degrade-gracefully boundary around generation providers. None of the
//! public methods fail: on any provider error they return the input
//! unchanged (or `None`/an empty suggestion) and log a warning.

use std::sync::Arc;

use base64::Engine as _;
use futures::future;
use poster_core::{Template, VerseContent, SOURCE_LANGUAGE};
use serde::{Deserialize, Serialize};

use crate::provider::{ImageGenerator, TextGenerator};
use crate::{ServiceError, ServiceResult};

const CONTEXT_CHARS: usize = 200;

/// Style of a generated background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Shapes, gradients and light.
    Abstract,
    /// Photographic scenery.
    Realistic,
}

impl BackgroundKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Abstract => "an abstract, softly lit composition of shapes and gradients",
            Self::Realistic => "a realistic, photographic landscape",
        }
    }
}

/// Fonts (and optionally a color) suggested for a mood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecommendation {
    /// Font family values from the catalog, best first.
    pub font_values: Vec<String>,
    /// Hex color that suits the mood.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFontAnswer {
    #[serde(default, alias = "fontValues")]
    fonts: Vec<String>,
    #[serde(default, alias = "suggestedColor")]
    color: Option<String>,
}

/// Translation, transliteration and generation with graceful fallback.
#[derive(Clone)]
pub struct ContentService {
    text: Arc<dyn TextGenerator>,
    image: Option<Arc<dyn ImageGenerator>>,
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("has_image_generator", &self.image.is_some())
            .finish_non_exhaustive()
    }
}

impl ContentService {
    /// Create a service backed by `text`.
    #[must_use]
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text, image: None }
    }

    /// Add an image generator.
    #[must_use]
    pub fn with_image_generator(mut self, image: Arc<dyn ImageGenerator>) -> Self {
        self.image = Some(image);
        self
    }

    /// Translate `text` into `target_language`.
    ///
    /// English targets return `text` without calling the provider.
    pub async fn translate(&self, text: &str, target_language: &str) -> String {
        if is_source_language(target_language) || text.trim().is_empty() {
            return text.to_string();
        }
        let prompt = format!(
            "Translate the following text into {target_language}. \
             Reply with the translation only, no quotes or notes.\n\n{text}"
        );
        self.complete_or(&prompt, text, "translate").await
    }

    /// Translate a verse reference, keeping `chapter:verse` verbatim.
    ///
    /// Only the book name is sent to the provider; the numeric tail is
    /// re-attached unchanged.
    pub async fn translate_reference(&self, reference: &str, target_language: &str) -> String {
        if is_source_language(target_language) || reference.trim().is_empty() {
            return reference.to_string();
        }
        let (book, tail) = split_reference(reference);
        if book.is_empty() {
            return reference.to_string();
        }
        let prompt = format!(
            "Translate this Bible book name into {target_language}. \
             Reply with the book name only.\n\n{book}"
        );
        let translated = self.complete_or(&prompt, book, "translate_reference").await;
        match tail {
            Some(tail) => format!("{translated} {tail}"),
            None => translated,
        }
    }

    /// Translate a verse's text and reference concurrently.
    pub async fn translate_verse(
        &self,
        verse: &VerseContent,
        target_language: &str,
    ) -> (String, String) {
        future::join(
            self.translate(&verse.text, target_language),
            self.translate_reference(&verse.reference, target_language),
        )
        .await
    }

    /// Phonetic rendering of `word`; returns `word` on failure.
    pub async fn transliterate(&self, word: &str) -> String {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return word.to_string();
        }
        let prompt = format!(
            "Transliterate the following word into Latin script as it is pronounced. \
             Reply with the transliteration only.\n\n{trimmed}"
        );
        match self.text.generate_text(&prompt).await {
            Ok(answer) => match first_line(&answer) {
                Some(line) => line.to_string(),
                None => word.to_string(),
            },
            Err(e) => {
                tracing::warn!("transliterate failed, keeping input: {e}");
                word.to_string()
            }
        }
    }

    /// Suggest fonts from `catalog` for a mood description.
    ///
    /// Values not in `catalog` are dropped. An empty recommendation is
    /// returned on provider failure.
    pub async fn recommend_fonts(&self, mood: &str, catalog: &[String]) -> FontRecommendation {
        let prompt = format!(
            "Pick up to three fonts for a poster with this mood: \"{mood}\".\n\
             Choose only from: {}.\n\
             Reply with JSON: {{\"fonts\": [..], \"color\": \"#rrggbb\"}}",
            catalog.join(", ")
        );
        match self.fetch_font_answer(&prompt).await {
            Ok(raw) => FontRecommendation {
                font_values: raw
                    .fonts
                    .into_iter()
                    .map(|f| f.trim().to_string())
                    .filter(|f| catalog.is_empty() || catalog.contains(f))
                    .collect(),
                suggested_color: raw.color.filter(|c| is_hex_color(c)),
            },
            Err(e) => {
                tracing::warn!("recommend_fonts failed: {e}");
                FontRecommendation::default()
            }
        }
    }

    /// Generate a background for `template`, returned as a PNG data URI.
    pub async fn generate_background_image(
        &self,
        template: Template,
        kind: BackgroundKind,
        context: &str,
    ) -> Option<String> {
        let prompt = background_prompt(template, kind, context);
        match self.render_image(&prompt).await {
            Ok(bytes) if !bytes.is_empty() => Some(format!(
                "data:image/png;base64,{}",
                base64::engine::general_purpose::STANDARD.encode(bytes)
            )),
            Ok(_) => {
                tracing::warn!("background generation returned no image");
                None
            }
            Err(e) => {
                tracing::warn!("background generation failed: {e}");
                None
            }
        }
    }

    async fn render_image(&self, prompt: &str) -> ServiceResult<Vec<u8>> {
        let image = self.image.as_ref().ok_or(ServiceError::Unavailable("image"))?;
        image.generate_image(prompt).await
    }

    async fn fetch_font_answer(&self, prompt: &str) -> ServiceResult<RawFontAnswer> {
        let answer = self.text.generate_text(prompt).await?;
        let json = extract_json_object(&answer).ok_or(ServiceError::EmptyResponse)?;
        Ok(serde_json::from_str(json)?)
    }

    async fn complete_or(&self, prompt: &str, fallback: &str, operation: &str) -> String {
        match self.text.generate_text(prompt).await {
            Ok(answer) => {
                let answer = strip_quotes(answer.trim());
                if answer.is_empty() {
                    tracing::warn!("{operation} returned nothing, keeping input");
                    fallback.to_string()
                } else {
                    answer.to_string()
                }
            }
            Err(e) => {
                tracing::warn!("{operation} failed, keeping input: {e}");
                fallback.to_string()
            }
        }
    }
}

fn is_source_language(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case(SOURCE_LANGUAGE)
}

/// Split "1 John 4:8" into ("1 John", Some("4:8")).
///
/// The tail starts at the first digit-led token after the book name, so
/// ranges, verse lists and version tags stay untouched. A leading book
/// number ("1 John") belongs to the book.
fn split_reference(reference: &str) -> (&str, Option<&str>) {
    let trimmed = reference.trim();
    let starts: Vec<usize> = trimmed
        .char_indices()
        .filter(|&(i, c)| {
            let before = &trimmed[..i];
            !c.is_whitespace() && (before.is_empty() || before.ends_with(char::is_whitespace))
        })
        .map(|(i, _)| i)
        .collect();

    for (index, &start) in starts.iter().enumerate() {
        let token = trimmed[start..].split_whitespace().next().unwrap_or_default();
        let is_book_number =
            index == 0 && starts.len() > 1 && token.chars().all(|c| c.is_ascii_digit());
        if !is_book_number && token.starts_with(|c: char| c.is_ascii_digit()) {
            return (trimmed[..start].trim_end(), Some(&trimmed[start..]));
        }
    }
    (trimmed, None)
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, '"' | '\u{201c}' | '\u{201d}'))
        .trim()
}

fn first_line(text: &str) -> Option<&str> {
    text.lines()
        .map(|l| strip_quotes(l.trim()))
        .find(|l| !l.is_empty())
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn background_prompt(template: Template, kind: BackgroundKind, context: &str) -> String {
    let context: String = context.chars().take(CONTEXT_CHARS).collect();
    let style = template.style();
    format!(
        "Poster background, {}, in a {} style, leaving calm space for text in {}. \
         No words or letters. Inspired by: {}",
        kind.describe(),
        template.as_str(),
        style.base_text_color,
        context.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reference() {
        assert_eq!(split_reference("John 3:16"), ("John", Some("3:16")));
        assert_eq!(split_reference("1 John 4:7-8"), ("1 John", Some("4:7-8")));
        assert_eq!(split_reference("Psalm 23"), ("Psalm", Some("23")));
        assert_eq!(split_reference("Jude"), ("Jude", None));
        assert_eq!(split_reference("Psalm 23:1–3"), ("Psalm", Some("23:1–3")));
        assert_eq!(split_reference("John 3:16 (KJV)"), ("John", Some("3:16 (KJV)")));
        assert_eq!(split_reference("  3:16 "), ("", Some("3:16")));
        assert_eq!(split_reference("Song of Songs 2:4"), ("Song of Songs", Some("2:4")));
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"fonts\": []} hope this helps"),
            Some("{\"fonts\": []}")
        );
        assert_eq!(extract_json_object("no json"), None);
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1a2B3c"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#12345"));
    }

    #[test]
    fn test_background_prompt_truncates_context() {
        let long = "a".repeat(1000);
        let prompt = background_prompt(Template::Modern, BackgroundKind::Realistic, &long);
        assert!(prompt.contains("modern"));
        assert!(prompt.contains("photographic"));
        assert!(prompt.len() < 600);
    }
}
