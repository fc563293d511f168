//! Canvas sizing and the screen-to-canvas conversion used by drag handling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PosterError, PosterResult};

/// The poster's aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// 4:5, the default feed format.
    #[default]
    Portrait,
    /// 1:1.
    Square,
    /// 16:9.
    Landscape,
}

impl AspectRatio {
    /// All aspect ratios in display order.
    pub const ALL: [Self; 3] = [Self::Portrait, Self::Square, Self::Landscape];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Square => "square",
            Self::Landscape => "landscape",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|aspect| aspect.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PosterError::unknown("aspect ratio", s))
    }
}

/// Native canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl PixelSize {
    /// Create a pixel size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Native pixel dimensions for an aspect ratio.
#[must_use]
pub const fn aspect_to_pixel_size(aspect: AspectRatio) -> PixelSize {
    match aspect {
        AspectRatio::Portrait => PixelSize::new(1080.0, 1350.0),
        AspectRatio::Square => PixelSize::new(1080.0, 1080.0),
        AspectRatio::Landscape => PixelSize::new(1920.0, 1080.0),
    }
}

/// A pointer displacement in canvas pixels (display scale already removed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelDelta {
    /// Horizontal displacement.
    pub dx: f32,
    /// Vertical displacement.
    pub dy: f32,
}

impl PixelDelta {
    /// Create a pixel delta.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// The canvas as currently shown: chosen aspect plus on-screen zoom.
///
/// `display_scale` is the rendering zoom (thumbnails, fit-to-window) and is
/// unrelated to the text layer's content scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    aspect: AspectRatio,
    display_scale: f32,
}

impl CanvasGeometry {
    /// Create a canvas geometry at 100% zoom.
    #[must_use]
    pub const fn new(aspect: AspectRatio) -> Self {
        Self {
            aspect,
            display_scale: 1.0,
        }
    }

    /// Builder-style display scale.
    #[must_use]
    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.set_display_scale(scale);
        self
    }

    /// Current aspect ratio.
    #[must_use]
    pub const fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// Change the aspect ratio. Layer percentages are unaffected.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
    }

    /// Current display scale.
    #[must_use]
    pub const fn display_scale(&self) -> f32 {
        self.display_scale
    }

    /// Set the display scale. Zero, negative and non-finite values are
    /// refused and the previous scale is kept.
    pub fn set_display_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.display_scale = scale;
        } else {
            tracing::warn!("Ignoring invalid display scale {scale}");
        }
    }

    /// Native pixel size for the current aspect.
    #[must_use]
    pub const fn pixel_size(&self) -> PixelSize {
        aspect_to_pixel_size(self.aspect)
    }

    /// On-screen size at the current display scale.
    #[must_use]
    pub fn displayed_size(&self) -> PixelSize {
        let native = self.pixel_size();
        PixelSize::new(
            native.width * self.display_scale,
            native.height * self.display_scale,
        )
    }

    /// Convert an on-screen pointer displacement into canvas pixels.
    #[must_use]
    pub fn screen_to_canvas_delta(&self, screen_dx: f32, screen_dy: f32) -> PixelDelta {
        PixelDelta::new(screen_dx / self.display_scale, screen_dy / self.display_scale)
    }

    /// Largest display scale at which the canvas fits inside `container`.
    ///
    /// Returns `None` for an empty container.
    #[must_use]
    pub fn fit_display_scale(&self, container: PixelSize) -> Option<f32> {
        let native = self.pixel_size();
        let scale = (container.width / native.width).min(container.height / native.height);
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self::new(AspectRatio::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_table() {
        assert_eq!(
            aspect_to_pixel_size(AspectRatio::Square),
            PixelSize::new(1080.0, 1080.0)
        );
        let landscape = aspect_to_pixel_size(AspectRatio::Landscape);
        assert!(landscape.width > landscape.height);
        let portrait = aspect_to_pixel_size(AspectRatio::Portrait);
        assert!(portrait.height > portrait.width);
    }

    #[test]
    fn test_screen_delta_removes_display_scale() {
        let canvas = CanvasGeometry::new(AspectRatio::Square).with_display_scale(0.5);
        let delta = canvas.screen_to_canvas_delta(10.0, -4.0);
        assert!((delta.dx - 20.0).abs() < f32::EPSILON);
        assert!((delta.dy + 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_display_scale_is_refused() {
        let mut canvas = CanvasGeometry::new(AspectRatio::Portrait).with_display_scale(0.25);
        canvas.set_display_scale(0.0);
        canvas.set_display_scale(-1.0);
        canvas.set_display_scale(f32::NAN);
        assert!((canvas.display_scale() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fit_display_scale() {
        let canvas = CanvasGeometry::new(AspectRatio::Landscape);
        let scale = canvas
            .fit_display_scale(PixelSize::new(960.0, 1000.0))
            .expect("non-empty container");
        assert!((scale - 0.5).abs() < f32::EPSILON);
        assert!(canvas.fit_display_scale(PixelSize::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_aspect_from_str() {
        assert_eq!(
            "Landscape".parse::<AspectRatio>().ok(),
            Some(AspectRatio::Landscape)
        );
        assert!("panorama".parse::<AspectRatio>().is_err());
    }
}
