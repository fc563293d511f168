//! Template and text-effect styling.
//!
//! Every mapping here is an exhaustive `match`, so a new template or effect
//! does not compile until it has a style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PosterError, PosterResult};

const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

/// Poster template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Dark vertical fade, white serif text.
    #[default]
    Classic,
    /// Diagonal slate fade.
    Modern,
    /// Light wash, dark text.
    Minimal,
    /// Heavy dim, yellow text.
    Bold,
    /// Vignette, warm ivory text.
    Elegant,
}

impl Template {
    /// All templates in display order.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::Modern,
        Self::Minimal,
        Self::Bold,
        Self::Elegant,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Minimal => "minimal",
            Self::Bold => "bold",
            Self::Elegant => "elegant",
        }
    }

    /// Overlay and base colors for this template.
    #[must_use]
    pub const fn style(self) -> TemplateStyle {
        match self {
            Self::Classic => TemplateStyle {
                overlay: "linear-gradient(to bottom, rgba(0,0,0,0.25), rgba(0,0,0,0.55))",
                base_text_color: WHITE,
                base_font_px: 48.0,
            },
            Self::Modern => TemplateStyle {
                overlay: "linear-gradient(135deg, rgba(17,24,39,0.75), rgba(17,24,39,0.2))",
                base_text_color: WHITE,
                base_font_px: 44.0,
            },
            Self::Minimal => TemplateStyle {
                overlay: "rgba(255,255,255,0.55)",
                base_text_color: "#111827",
                base_font_px: 40.0,
            },
            Self::Bold => TemplateStyle {
                overlay: "rgba(0,0,0,0.6)",
                base_text_color: "#facc15",
                base_font_px: 56.0,
            },
            Self::Elegant => TemplateStyle {
                overlay: "radial-gradient(circle at center, rgba(0,0,0,0.1), rgba(0,0,0,0.65))",
                base_text_color: "#f5e6c8",
                base_font_px: 46.0,
            },
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PosterError::unknown("template", s))
    }
}

/// Visual parameters of a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemplateStyle {
    /// CSS background drawn between the image and the layers.
    pub overlay: &'static str,
    /// Default text color.
    pub base_text_color: &'static str,
    /// Text size at layer scale 1.0.
    pub base_font_px: f32,
}

/// Decorative text effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffect {
    /// Plain text.
    #[default]
    None,
    /// Soft drop shadow.
    Shadow,
    /// Halo in the text color.
    Glow,
    /// Contrasting stroke.
    Outline,
    /// Layered bright halo.
    Neon,
    /// Raised with a hard under-edge.
    Lifted,
    /// Offset double shadow.
    Retro,
    /// Light/dark bevel.
    Embossed,
}

impl TextEffect {
    /// All effects in display order.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Shadow,
        Self::Glow,
        Self::Outline,
        Self::Neon,
        Self::Lifted,
        Self::Retro,
        Self::Embossed,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Shadow => "shadow",
            Self::Glow => "glow",
            Self::Outline => "outline",
            Self::Neon => "neon",
            Self::Lifted => "lifted",
            Self::Retro => "retro",
            Self::Embossed => "embossed",
        }
    }
}

impl fmt::Display for TextEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEffect {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PosterError::unknown("text effect", s))
    }
}

/// A text color: flat, or a CSS gradient used as a clipped fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextColor {
    /// Any flat CSS color.
    Solid(String),
    /// A CSS gradient function.
    Gradient(String),
}

impl TextColor {
    /// Classify a CSS color value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        let is_gradient = ["linear-gradient(", "radial-gradient(", "conic-gradient("]
            .iter()
            .any(|marker| {
                lower.starts_with(marker) || lower.starts_with(&format!("repeating-{marker}"))
            });
        if is_gradient {
            Self::Gradient(trimmed.to_string())
        } else {
            Self::Solid(trimmed.to_string())
        }
    }

    /// Whether this is a gradient.
    #[must_use]
    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient(_))
    }

    /// The CSS value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Solid(value) | Self::Gradient(value) => value,
        }
    }

    /// Flat color for contexts that cannot use a gradient fill.
    #[must_use]
    pub fn solid_or_white(&self) -> &str {
        match self {
            Self::Solid(value) => value,
            Self::Gradient(_) => WHITE,
        }
    }

    /// Whether this is pure black.
    #[must_use]
    pub fn is_black(&self) -> bool {
        match self {
            Self::Solid(value) => {
                let compact: String = value
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_ascii_lowercase();
                matches!(
                    compact.as_str(),
                    "#000" | "#000000" | "#000000ff" | "black" | "rgb(0,0,0)" | "rgba(0,0,0,1)"
                )
            }
            Self::Gradient(_) => false,
        }
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::Solid(WHITE.to_string())
    }
}

impl From<String> for TextColor {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for TextColor {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        match color {
            TextColor::Solid(value) | TextColor::Gradient(value) => value,
        }
    }
}

/// Computed text style properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    /// `color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `background-image` (gradient fills only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// `background-clip` / `-webkit-background-clip`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_clip: Option<String>,
    /// `-webkit-text-fill-color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_fill_color: Option<String>,
    /// `text-shadow`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
    /// `-webkit-text-stroke`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<String>,
}

impl TextStyle {
    /// CSS declarations, in a fixed order.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = &self.color {
            out.push(("color", v.as_str()));
        }
        if let Some(v) = &self.background_image {
            out.push(("background-image", v.as_str()));
        }
        if let Some(v) = &self.background_clip {
            out.push(("background-clip", v.as_str()));
            out.push(("-webkit-background-clip", v.as_str()));
        }
        if let Some(v) = &self.text_fill_color {
            out.push(("-webkit-text-fill-color", v.as_str()));
        }
        if let Some(v) = &self.text_shadow {
            out.push(("text-shadow", v.as_str()));
        }
        if let Some(v) = &self.text_stroke {
            out.push(("-webkit-text-stroke", v.as_str()));
        }
        out
    }

    /// Inline CSS string.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.declarations()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Style for the main text in `color` with `effect`.
///
/// Gradient colors become a clipped background fill with transparent text.
#[must_use]
pub fn text_style(effect: TextEffect, color: &TextColor) -> TextStyle {
    let mut style = match color {
        TextColor::Solid(value) => TextStyle {
            color: Some(value.clone()),
            ..TextStyle::default()
        },
        TextColor::Gradient(value) => TextStyle {
            color: Some("transparent".to_string()),
            background_image: Some(value.clone()),
            background_clip: Some("text".to_string()),
            text_fill_color: Some("transparent".to_string()),
            ..TextStyle::default()
        },
    };
    apply_effect(&mut style, effect, color);
    style
}

/// Style for accent text (the reference line).
///
/// Accent text cannot take a gradient fill, so gradients fall back to white.
#[must_use]
pub fn accent_style(effect: TextEffect, color: &TextColor) -> TextStyle {
    let flat = TextColor::Solid(color.solid_or_white().to_string());
    text_style(effect, &flat)
}

fn apply_effect(style: &mut TextStyle, effect: TextEffect, color: &TextColor) {
    let tint = color.solid_or_white();
    match effect {
        TextEffect::None => {}
        TextEffect::Shadow => {
            style.text_shadow = Some("2px 2px 8px rgba(0,0,0,0.6)".to_string());
        }
        TextEffect::Glow => {
            style.text_shadow = Some(format!("0 0 12px {tint}, 0 0 24px {tint}"));
        }
        TextEffect::Outline => {
            let stroke = if color.is_black() { WHITE } else { BLACK };
            style.text_stroke = Some(format!("2px {stroke}"));
        }
        TextEffect::Neon => {
            style.text_shadow = Some(format!(
                "0 0 4px {WHITE}, 0 0 10px {tint}, 0 0 20px {tint}, 0 0 40px {tint}"
            ));
        }
        TextEffect::Lifted => {
            style.text_shadow =
                Some("0 4px 0 rgba(0,0,0,0.35), 0 8px 16px rgba(0,0,0,0.4)".to_string());
        }
        TextEffect::Retro => {
            style.text_shadow =
                Some("3px 3px 0 rgba(0,0,0,0.85), 6px 6px 0 rgba(255,255,255,0.25)".to_string());
        }
        TextEffect::Embossed => {
            style.text_shadow =
                Some("-1px -1px 0 rgba(255,255,255,0.4), 1px 1px 0 rgba(0,0,0,0.6)".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: &str = "linear-gradient(90deg, #f6d365, #fda085)";

    #[test]
    fn test_gradient_detection() {
        assert!(TextColor::parse(GOLD).is_gradient());
        assert!(TextColor::parse("repeating-radial-gradient(red, blue)").is_gradient());
        assert!(!TextColor::parse("#ff0000").is_gradient());
    }

    #[test]
    fn test_gradient_fill_for_every_effect() {
        let color = TextColor::parse(GOLD);
        for effect in TextEffect::ALL {
            let style = text_style(effect, &color);
            assert_eq!(style.text_fill_color.as_deref(), Some("transparent"));
            assert_eq!(style.background_image.as_deref(), Some(GOLD));
            assert_eq!(style.background_clip.as_deref(), Some("text"));
        }
    }

    #[test]
    fn test_accent_falls_back_to_white() {
        let color = TextColor::parse(GOLD);
        for effect in TextEffect::ALL {
            let style = accent_style(effect, &color);
            assert_eq!(style.color.as_deref(), Some(WHITE));
            assert!(style.background_image.is_none());
            assert!(style.text_fill_color.is_none());
        }
    }

    #[test]
    fn test_outline_inverts_on_black() {
        let black = text_style(TextEffect::Outline, &TextColor::parse("#000000"));
        assert_eq!(black.text_stroke.as_deref(), Some("2px #ffffff"));
        let named = text_style(TextEffect::Outline, &TextColor::parse("Black"));
        assert_eq!(named.text_stroke.as_deref(), Some("2px #ffffff"));
        let red = text_style(TextEffect::Outline, &TextColor::parse("#ff0000"));
        assert_eq!(red.text_stroke.as_deref(), Some("2px #000000"));
    }

    #[test]
    fn test_glow_uses_color() {
        let style = text_style(TextEffect::Glow, &TextColor::parse("#38bdf8"));
        assert!(style.text_shadow.unwrap_or_default().contains("#38bdf8"));
    }

    #[test]
    fn test_css_output() {
        let css = text_style(TextEffect::Shadow, &TextColor::parse(GOLD)).to_css();
        assert!(css.contains("-webkit-text-fill-color: transparent;"));
        assert!(css.contains("-webkit-background-clip: text;"));
        assert!(css.contains("text-shadow:"));
    }

    #[test]
    fn test_css_declarations_joined_in_order() {
        let css = text_style(TextEffect::Outline, &TextColor::parse("#000000")).to_css();
        assert_eq!(css, "color: #000000; -webkit-text-stroke: 2px #ffffff;");
        assert_eq!(TextStyle::default().to_css(), "");
    }

    #[test]
    fn test_templates_and_names() {
        for template in Template::ALL {
            assert!(!template.style().overlay.is_empty());
            assert_eq!(template.as_str().parse::<Template>().ok(), Some(template));
        }
        assert!("gothic".parse::<Template>().is_err());
        assert_eq!("NEON".parse::<TextEffect>().ok(), Some(TextEffect::Neon));
    }

    #[test]
    fn test_color_serde_is_plain_string() {
        let json = serde_json::to_string(&TextColor::parse(GOLD)).unwrap_or_default();
        assert_eq!(json, format!("\"{GOLD}\""));
        let back: TextColor = serde_json::from_str("\"#123456\"").unwrap_or_default();
        assert_eq!(back, TextColor::Solid("#123456".to_string()));
    }
}
