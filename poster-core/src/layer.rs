//! Poster layers - the three positionable elements composited on the canvas.
//!
//! All geometry is stored as percentages of the canvas so that a layout
//! survives aspect-ratio and display-scale changes unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canvas::{PixelDelta, PixelSize};

/// Scale bounds for the text layer.
pub const TEXT_SCALE_BOUNDS: (f32, f32) = (0.5, 3.0);

/// Scale change per canvas pixel of combined X+Y drag.
pub const SCALE_PER_PIXEL: f32 = 0.005;

/// Identifies one of the three layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerId {
    /// Verse or event text block.
    Text,
    /// Organization logo.
    Logo,
    /// Speaker or event photo.
    Photo,
}

impl LayerId {
    /// All layers, back to front.
    pub const ALL: [Self; 3] = [Self::Photo, Self::Logo, Self::Text];

    /// Width bounds in percent of canvas width.
    #[must_use]
    pub const fn width_bounds(self) -> (f32, f32) {
        match self {
            Self::Text => (20.0, 100.0),
            Self::Logo => (5.0, 60.0),
            Self::Photo => (10.0, 90.0),
        }
    }

    /// Fixed stacking order; higher is drawn on top.
    #[must_use]
    pub const fn z_index(self) -> i32 {
        match self {
            Self::Photo => 0,
            Self::Logo => 1,
            Self::Text => 2,
        }
    }

    /// Whether this layer carries a content scale.
    #[must_use]
    pub const fn has_scale(self) -> bool {
        matches!(self, Self::Text)
    }

    /// The action that is actually applied to this layer.
    ///
    /// Logo and photo have no scale of their own; their scale handle
    /// resizes the width.
    #[must_use]
    pub const fn effective_action(self, action: Action) -> Action {
        match (self, action) {
            (Self::Logo | Self::Photo, Action::ScaleUniform) => Action::ResizeWidth,
            _ => action,
        }
    }

    /// Clamp a width to this layer's bounds.
    #[must_use]
    pub fn clamp_width(self, width: f32) -> f32 {
        let (min, max) = self.width_bounds();
        clamp_finite(width, min, max, min)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Logo => "logo",
            Self::Photo => "photo",
        };
        f.write_str(name)
    }
}

/// Kind of manipulation performed by a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Translate the anchor.
    Move,
    /// Change the width (X displacement only).
    ResizeWidth,
    /// Change the text scale (width for logo/photo).
    ScaleUniform,
}

/// Anchor point in percent of canvas width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Percent of canvas width, `[0, 100]`.
    pub x: f32,
    /// Percent of canvas height, `[0, 100]`.
    pub y: f32,
}

impl Position {
    /// Create a clamped position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_percent(x, 50.0),
            y: clamp_percent(y, 50.0),
        }
    }
}

/// Geometry of a single layer.
///
/// `position` is the visual center of the layer, not its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerGeometry {
    /// Center anchor.
    pub position: Position,
    /// Width in percent of canvas width.
    pub width: f32,
    /// Font-size multiplier; only present on the text layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl LayerGeometry {
    /// Default geometry for a layer.
    #[must_use]
    pub fn default_for(layer: LayerId) -> Self {
        match layer {
            LayerId::Text => Self {
                position: Position::new(50.0, 50.0),
                width: 80.0,
                scale: Some(1.0),
            },
            LayerId::Logo => Self {
                position: Position::new(50.0, 10.0),
                width: 20.0,
                scale: None,
            },
            LayerId::Photo => Self {
                position: Position::new(50.0, 80.0),
                width: 30.0,
                scale: None,
            },
        }
    }

    /// Copy of this geometry with every field forced into `layer`'s bounds.
    #[must_use]
    pub fn clamped(self, layer: LayerId) -> Self {
        let fallback = Self::default_for(layer);
        Self {
            position: Position {
                x: clamp_percent(self.position.x, fallback.position.x),
                y: clamp_percent(self.position.y, fallback.position.y),
            },
            width: layer.clamp_width(self.width),
            scale: layer
                .has_scale()
                .then(|| clamp_scale(self.scale.unwrap_or(1.0))),
        }
    }

    /// Font size for the text layer given the template's base size.
    #[must_use]
    pub fn font_px(&self, base_px: f32) -> f32 {
        base_px * self.scale.unwrap_or(1.0)
    }

    /// Percentage placement for the presentation layer.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement {
            left_pct: self.position.x,
            top_pct: self.position.y,
            width_pct: self.width,
        }
    }

    /// Pixel rectangle on a canvas of `canvas` size, given the rendered
    /// height of the layer's content. The anchor ends up at the center.
    #[must_use]
    pub fn pixel_rect(&self, canvas: PixelSize, rendered_height: f32) -> PixelRect {
        let width = self.width / 100.0 * canvas.width;
        let center_x = self.position.x / 100.0 * canvas.width;
        let center_y = self.position.y / 100.0 * canvas.height;
        PixelRect {
            x: center_x - width / 2.0,
            y: center_y - rendered_height / 2.0,
            width,
            height: rendered_height,
        }
    }
}

/// CSS-style percentage placement of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Left edge of the anchor in percent.
    pub left_pct: f32,
    /// Top edge of the anchor in percent.
    pub top_pct: f32,
    /// Width in percent.
    pub width_pct: f32,
}

impl Placement {
    /// Inline CSS that centers the element on its anchor.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "position: absolute; left: {}%; top: {}%; width: {}%; transform: translate(-50%, -50%);",
            self.left_pct, self.top_pct, self.width_pct
        )
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Snapshot of the field an action mutates, taken at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Baseline {
    /// Anchor position (move).
    Position(Position),
    /// Width (resize, or scale on logo/photo).
    Width(f32),
    /// Text scale.
    Scale(f32),
}

/// The three layers of a poster.
///
/// Fields are private so that every write goes through a clamping path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSet {
    text: LayerGeometry,
    logo: LayerGeometry,
    photo: LayerGeometry,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self {
            text: LayerGeometry::default_for(LayerId::Text),
            logo: LayerGeometry::default_for(LayerId::Logo),
            photo: LayerGeometry::default_for(LayerId::Photo),
        }
    }
}

impl LayerSet {
    /// Geometry of a layer.
    #[must_use]
    pub const fn get(&self, layer: LayerId) -> &LayerGeometry {
        match layer {
            LayerId::Text => &self.text,
            LayerId::Logo => &self.logo,
            LayerId::Photo => &self.photo,
        }
    }

    fn get_mut(&mut self, layer: LayerId) -> &mut LayerGeometry {
        match layer {
            LayerId::Text => &mut self.text,
            LayerId::Logo => &mut self.logo,
            LayerId::Photo => &mut self.photo,
        }
    }

    /// Layers with their geometry, back to front.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &LayerGeometry)> {
        LayerId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    /// Replace a layer's geometry, clamping it into bounds.
    pub fn set(&mut self, layer: LayerId, geometry: LayerGeometry) {
        *self.get_mut(layer) = geometry.clamped(layer);
    }

    /// Force every layer into bounds.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            text: self.text.clamped(LayerId::Text),
            logo: self.logo.clamped(LayerId::Logo),
            photo: self.photo.clamped(LayerId::Photo),
        }
    }

    /// Snapshot the value `action` will mutate on `layer`.
    #[must_use]
    pub fn baseline_for(&self, layer: LayerId, action: Action) -> Baseline {
        let geometry = self.get(layer);
        match layer.effective_action(action) {
            Action::Move => Baseline::Position(geometry.position),
            Action::ResizeWidth => Baseline::Width(geometry.width),
            Action::ScaleUniform => Baseline::Scale(geometry.scale.unwrap_or(1.0)),
        }
    }

    /// Apply a canvas-pixel displacement to a layer.
    ///
    /// Move adds the displacement to the current position. Resize and
    /// scale treat `delta` as the total displacement since the session
    /// began and compute the new value from `baseline`. Every result is
    /// clamped into the layer's bounds; this never fails.
    pub fn apply_delta(
        &mut self,
        layer: LayerId,
        action: Action,
        baseline: Baseline,
        delta: PixelDelta,
        canvas: PixelSize,
    ) -> LayerGeometry {
        let dx = finite_or_zero(delta.dx);
        let dy = finite_or_zero(delta.dy);
        let pct_x = to_percent(dx, canvas.width);
        let pct_y = to_percent(dy, canvas.height);

        let geometry = self.get_mut(layer);
        match layer.effective_action(action) {
            Action::Move => {
                let current = geometry.position;
                geometry.position = Position {
                    x: clamp_percent(current.x + pct_x, current.x),
                    y: clamp_percent(current.y + pct_y, current.y),
                };
            }
            Action::ResizeWidth => {
                let base = match baseline {
                    Baseline::Width(width) => width,
                    _ => geometry.width,
                };
                geometry.width = layer.clamp_width(base + pct_x);
            }
            Action::ScaleUniform => {
                let base = match baseline {
                    Baseline::Scale(scale) => scale,
                    _ => geometry.scale.unwrap_or(1.0),
                };
                geometry.scale = Some(clamp_scale(base + SCALE_PER_PIXEL * (dx + dy)));
            }
        }
        *geometry
    }
}

fn to_percent(pixels: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        pixels / extent * 100.0
    } else {
        0.0
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn clamp_percent(value: f32, fallback: f32) -> f32 {
    clamp_finite(value, 0.0, 100.0, fallback)
}

fn clamp_scale(value: f32) -> f32 {
    let (min, max) = TEXT_SCALE_BOUNDS;
    clamp_finite(value, min, max, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: PixelSize = PixelSize::new(400.0, 500.0);

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_move_adds_percent_delta() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Text, Action::Move);
        let updated = layers.apply_delta(
            LayerId::Text,
            Action::Move,
            baseline,
            PixelDelta::new(40.0, -50.0),
            CANVAS,
        );
        assert_close(updated.position.x, 60.0);
        assert_close(updated.position.y, 40.0);
    }

    #[test]
    fn test_move_clamps_to_canvas() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Logo, Action::Move);
        let updated = layers.apply_delta(
            LayerId::Logo,
            Action::Move,
            baseline,
            PixelDelta::new(-10_000.0, 10_000.0),
            CANVAS,
        );
        assert_close(updated.position.x, 0.0);
        assert_close(updated.position.y, 100.0);
    }

    #[test]
    fn test_resize_uses_baseline_and_x_only() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Photo, Action::ResizeWidth);
        layers.apply_delta(
            LayerId::Photo,
            Action::ResizeWidth,
            baseline,
            PixelDelta::new(100.0, 0.0),
            CANVAS,
        );
        let updated = layers.apply_delta(
            LayerId::Photo,
            Action::ResizeWidth,
            baseline,
            PixelDelta::new(20.0, 300.0),
            CANVAS,
        );
        assert_close(updated.width, 35.0);
    }

    #[test]
    fn test_width_bounds_per_layer() {
        for (layer, min, max) in [
            (LayerId::Text, 20.0, 100.0),
            (LayerId::Logo, 5.0, 60.0),
            (LayerId::Photo, 10.0, 90.0),
        ] {
            let mut layers = LayerSet::default();
            let baseline = layers.baseline_for(layer, Action::ResizeWidth);
            let grown = layers.apply_delta(
                layer,
                Action::ResizeWidth,
                baseline,
                PixelDelta::new(5_000.0, 0.0),
                CANVAS,
            );
            assert_close(grown.width, max);
            let shrunk = layers.apply_delta(
                layer,
                Action::ResizeWidth,
                baseline,
                PixelDelta::new(-5_000.0, 0.0),
                CANVAS,
            );
            assert_close(shrunk.width, min);
        }
    }

    #[test]
    fn test_scale_uses_raw_pixels() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Text, Action::ScaleUniform);
        let updated = layers.apply_delta(
            LayerId::Text,
            Action::ScaleUniform,
            baseline,
            PixelDelta::new(100.0, 100.0),
            CANVAS,
        );
        assert_close(updated.scale.unwrap_or_default(), 2.0);

        let clamped = layers.apply_delta(
            LayerId::Text,
            Action::ScaleUniform,
            baseline,
            PixelDelta::new(-1_000.0, 0.0),
            CANVAS,
        );
        assert_close(clamped.scale.unwrap_or_default(), 0.5);
    }

    #[test]
    fn test_scale_on_logo_resizes_width() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Logo, Action::ScaleUniform);
        assert_eq!(baseline, Baseline::Width(20.0));
        let updated = layers.apply_delta(
            LayerId::Logo,
            Action::ScaleUniform,
            baseline,
            PixelDelta::new(40.0, 999.0),
            CANVAS,
        );
        assert_close(updated.width, 30.0);
        assert!(updated.scale.is_none());
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut layers = LayerSet::default();
        let baseline = layers.baseline_for(LayerId::Text, Action::Move);
        let updated = layers.apply_delta(
            LayerId::Text,
            Action::Move,
            baseline,
            PixelDelta::new(f32::NAN, f32::INFINITY),
            CANVAS,
        );
        assert_close(updated.position.x, 50.0);
        assert_close(updated.position.y, 50.0);
    }

    #[test]
    fn test_pixel_rect_is_centered() {
        let geometry = LayerGeometry::default_for(LayerId::Text);
        let rect = geometry.pixel_rect(CANVAS, 100.0);
        assert_close(rect.width, 320.0);
        assert_close(rect.x, 40.0);
        assert_close(rect.y, 200.0);
    }

    #[test]
    fn test_clamped_drops_scale_on_images() {
        let geometry = LayerGeometry {
            position: Position { x: 140.0, y: -3.0 },
            width: 95.0,
            scale: Some(2.0),
        }
        .clamped(LayerId::Photo);
        assert_close(geometry.position.x, 100.0);
        assert_close(geometry.position.y, 0.0);
        assert_close(geometry.width, 90.0);
        assert!(geometry.scale.is_none());
    }

    #[test]
    fn test_placement_css() {
        let css = LayerGeometry::default_for(LayerId::Logo).placement().to_css();
        assert!(css.contains("left: 50%"));
        assert!(css.contains("translate(-50%, -50%)"));
    }
}
