//! The poster document: content, styling choices and layer geometry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canvas::AspectRatio;
use crate::layer::{LayerGeometry, LayerId, LayerSet};
use crate::pending::ContentField;
use crate::style::{Template, TextColor, TextEffect};
use crate::{PosterError, PosterResult};

/// Language that needs no translation.
pub const SOURCE_LANGUAGE: &str = "English";

/// What the poster announces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterMode {
    /// A Bible verse with its reference.
    #[default]
    Verse,
    /// An event announcement.
    Event,
}

/// Verse content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseContent {
    /// Reference, e.g. "John 3:16".
    pub reference: String,
    /// Verse text.
    pub text: String,
    /// Bible version identifier used for lookup.
    #[serde(default)]
    pub version_id: String,
}

/// Event announcement content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContent {
    /// Headline.
    pub title: String,
    /// Date line.
    #[serde(default)]
    pub date: String,
    /// Time line.
    #[serde(default)]
    pub time: String,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Free-form details.
    #[serde(default)]
    pub details: String,
}

/// Localization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// Display name of the target language.
    pub target_language: String,
    /// Optional phonetic rendering shown under the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            target_language: SOURCE_LANGUAGE.to_string(),
            transliteration: None,
        }
    }
}

impl LanguageSettings {
    /// Whether the target language needs translation.
    #[must_use]
    pub fn needs_translation(&self) -> bool {
        !self.target_language.eq_ignore_ascii_case(SOURCE_LANGUAGE)
    }
}

/// Image sources (URLs or data URIs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterAssets {
    /// Background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Photo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// The complete poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterDocument {
    /// Document identifier.
    pub id: Uuid,
    /// Verse or event.
    #[serde(default)]
    pub mode: PosterMode,
    /// Canvas shape.
    #[serde(default)]
    pub aspect: AspectRatio,
    /// Overlay template.
    #[serde(default)]
    pub template: Template,
    /// Text effect.
    #[serde(default)]
    pub effect: TextEffect,
    /// Main text color (flat or gradient).
    #[serde(default)]
    pub text_color: TextColor,
    /// Font family CSS value.
    #[serde(default = "PosterDocument::default_font")]
    pub font_family: String,
    /// Verse content.
    #[serde(default)]
    pub verse: VerseContent,
    /// Event content.
    #[serde(default)]
    pub event: EventContent,
    /// Localization.
    #[serde(default)]
    pub language: LanguageSettings,
    /// Images.
    #[serde(default)]
    pub assets: PosterAssets,
    /// Whether keyword emphasis is drawn.
    #[serde(default = "PosterDocument::default_highlight")]
    pub highlight_keywords: bool,
    #[serde(default)]
    layers: LayerSet,
}

impl Default for PosterDocument {
    fn default() -> Self {
        Self::new(PosterMode::Verse)
    }
}

impl PosterDocument {
    fn default_font() -> String {
        "'Playfair Display', serif".to_string()
    }

    const fn default_highlight() -> bool {
        true
    }

    /// Create an empty document in `mode`.
    #[must_use]
    pub fn new(mode: PosterMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            aspect: AspectRatio::default(),
            template: Template::default(),
            effect: TextEffect::default(),
            text_color: TextColor::default(),
            font_family: Self::default_font(),
            verse: VerseContent::default(),
            event: EventContent::default(),
            language: LanguageSettings::default(),
            assets: PosterAssets::default(),
            highlight_keywords: true,
            layers: LayerSet::default(),
        }
    }

    /// Builder-style verse content.
    #[must_use]
    pub fn with_verse(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
        self.verse.reference = reference.into();
        self.verse.text = text.into();
        self
    }

    /// All layer geometry.
    #[must_use]
    pub const fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Mutable access for the interaction controller.
    pub fn layers_mut(&mut self) -> &mut LayerSet {
        &mut self.layers
    }

    /// Geometry of one layer.
    #[must_use]
    pub const fn layer(&self, id: LayerId) -> &LayerGeometry {
        self.layers.get(id)
    }

    /// Replace one layer's geometry (clamped).
    pub fn set_layer(&mut self, id: LayerId, geometry: LayerGeometry) {
        self.layers.set(id, geometry);
    }

    /// Put every layer back to its default geometry.
    pub fn reset_layout(&mut self) {
        self.layers = LayerSet::default();
    }

    /// The text the text layer shows in the current mode.
    #[must_use]
    pub fn headline_text(&self) -> &str {
        match self.mode {
            PosterMode::Verse => &self.verse.text,
            PosterMode::Event => &self.event.title,
        }
    }

    /// Write a value produced by an asynchronous request.
    pub fn set_content(&mut self, field: ContentField, value: String) {
        match field {
            ContentField::VerseText => self.verse.text = value,
            ContentField::VerseReference => self.verse.reference = value,
            ContentField::EventTitle => self.event.title = value,
            ContentField::EventDetails => self.event.details = value,
            ContentField::Transliteration => {
                self.language.transliteration = (!value.is_empty()).then_some(value);
            }
            ContentField::Background => self.assets.background = Some(value),
            ContentField::FontFamily => self.font_family = value,
        }
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PosterResult<String> {
        serde_json::to_string(self).map_err(PosterError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// Layer geometry outside its bounds is clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let mut document: Self = serde_json::from_str(json)?;
        document.layers = document.layers.clamped();
        tracing::info!(id = %document.id, mode = ?document.mode, "Loaded poster document");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Position;

    #[test]
    fn test_json_round_trip() {
        let mut document = PosterDocument::new(PosterMode::Verse)
            .with_verse("John 3:16", "For God so loved the world");
        document.text_color = TextColor::parse("linear-gradient(#fff, #000)");
        document.set_layer(
            LayerId::Logo,
            LayerGeometry {
                position: Position::new(10.0, 90.0),
                width: 12.0,
                scale: None,
            },
        );

        let json = document.to_json().expect("serialize");
        let restored = PosterDocument::from_json(&json).expect("deserialize");
        assert_eq!(restored, document);
    }

    #[test]
    fn test_load_clamps_out_of_range_geometry() {
        let json = r#"{
            "id": "6f1c1c4e-2f0e-4d8b-9a53-3f7d2f0f9b11",
            "layers": {
                "text": { "position": { "x": 130.0, "y": -5.0 }, "width": 5.0, "scale": 9.0 },
                "logo": { "position": { "x": 50.0, "y": 50.0 }, "width": 80.0 },
                "photo": { "position": { "x": 50.0, "y": 50.0 }, "width": 1.0, "scale": 2.0 }
            }
        }"#;
        let document = PosterDocument::from_json(json).expect("deserialize");

        let text = document.layer(LayerId::Text);
        assert!((text.position.x - 100.0).abs() < f32::EPSILON);
        assert!(text.position.y.abs() < f32::EPSILON);
        assert!((text.width - 20.0).abs() < f32::EPSILON);
        assert_eq!(text.scale, Some(3.0));
        assert!((document.layer(LayerId::Logo).width - 60.0).abs() < f32::EPSILON);
        assert_eq!(document.layer(LayerId::Photo).scale, None);
        assert_eq!(document.language.target_language, SOURCE_LANGUAGE);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            PosterDocument::from_json("{ not json"),
            Err(PosterError::Serialization(_))
        ));
    }

    #[test]
    fn test_headline_follows_mode() {
        let mut document = PosterDocument::default().with_verse("Ps 23:1", "The LORD is my shepherd");
        document.event.title = "Harvest Festival".to_string();
        assert_eq!(document.headline_text(), "The LORD is my shepherd");
        document.mode = PosterMode::Event;
        assert_eq!(document.headline_text(), "Harvest Festival");
    }
}
