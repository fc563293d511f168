//! # Poster Core
//!
//! Layered poster composition: a text block, a logo and a photo placed on a
//! fixed-aspect canvas, manipulated by pointer drags.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 poster-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Layer Model      │  Interaction            │
//! │  - % geometry     │  - Idle / Dragging      │
//! │  - Clamped bounds │  - Scoped capture       │
//! ├─────────────────────────────────────────────┤
//! │  Canvas Geometry  │  Highlight / Style      │
//! │  - Aspect table   │  - Keyword scoring      │
//! │  - Display scale  │  - Template, effects    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Geometry is stored in percent of the canvas, so switching aspect ratio
//! or zooming the view never changes a layout.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod document;
pub mod editor;
pub mod error;
pub mod event;
pub mod highlight;
pub mod interaction;
pub mod layer;
pub mod pending;
pub mod style;

pub use canvas::{aspect_to_pixel_size, AspectRatio, CanvasGeometry, PixelDelta, PixelSize};
pub use document::{
    EventContent, LanguageSettings, PosterAssets, PosterDocument, PosterMode, VerseContent,
    SOURCE_LANGUAGE,
};
pub use editor::PosterEditor;
pub use error::{PosterError, PosterResult};
pub use event::{Handle, HandleTarget, PointerEvent, PointerPhase};
pub use highlight::{
    segment_text, select_highlights, HighlightCache, HighlightSet, Segment, MAX_HIGHLIGHTS,
};
pub use interaction::{
    CaptureGuard, InteractionController, InteractionOutcome, InteractionSession, PointerCapture,
};
pub use layer::{Action, Baseline, LayerGeometry, LayerId, LayerSet, Placement, Position};
pub use pending::{ContentField, PendingRequests, Ticket};
pub use style::{accent_style, text_style, Template, TemplateStyle, TextColor, TextEffect, TextStyle};

/// Poster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
