//! Editor state: the document plus everything needed to manipulate and
//! render it.

use std::sync::Arc;

use crate::canvas::{AspectRatio, CanvasGeometry};
use crate::document::PosterDocument;
use crate::event::PointerEvent;
use crate::highlight::{segment_text, HighlightCache, HighlightSet, Segment};
use crate::interaction::{InteractionController, InteractionOutcome, PointerCapture};
use crate::pending::{ContentField, PendingRequests, Ticket};
use crate::style::{accent_style, text_style, TemplateStyle, TextStyle};

/// A poster being edited.
#[derive(Debug)]
pub struct PosterEditor {
    document: PosterDocument,
    canvas: CanvasGeometry,
    controller: InteractionController,
    highlights: HighlightCache,
    pending: PendingRequests,
    has_local_changes: bool,
}

impl PosterEditor {
    /// Edit `document` at 100% display scale.
    #[must_use]
    pub fn new(document: PosterDocument) -> Self {
        Self::with_controller(document, InteractionController::new())
    }

    /// Edit `document`, acquiring pointer capture from `host` during drags.
    #[must_use]
    pub fn with_capture(document: PosterDocument, host: Arc<dyn PointerCapture>) -> Self {
        Self::with_controller(document, InteractionController::with_capture(host))
    }

    fn with_controller(document: PosterDocument, controller: InteractionController) -> Self {
        Self {
            canvas: CanvasGeometry::new(document.aspect),
            document,
            controller,
            highlights: HighlightCache::new(),
            pending: PendingRequests::new(),
            has_local_changes: false,
        }
    }

    /// The document.
    #[must_use]
    pub const fn document(&self) -> &PosterDocument {
        &self.document
    }

    /// Mutable document access for content edits.
    ///
    /// Layer geometry stays clamped: [`crate::LayerSet`] only exposes
    /// clamping writers.
    pub fn document_mut(&mut self) -> &mut PosterDocument {
        self.has_local_changes = true;
        &mut self.document
    }

    /// Give the document back, ending any drag.
    #[must_use]
    pub fn into_document(mut self) -> PosterDocument {
        self.controller.end();
        self.document
    }

    /// Canvas geometry.
    #[must_use]
    pub const fn canvas(&self) -> &CanvasGeometry {
        &self.canvas
    }

    /// Change the on-screen zoom.
    pub fn set_display_scale(&mut self, scale: f32) {
        self.canvas.set_display_scale(scale);
    }

    /// Change the poster's aspect ratio. Percent geometry carries over.
    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.document.aspect = aspect;
        self.canvas.set_aspect(aspect);
        self.has_local_changes = true;
    }

    // `document_mut` can change the aspect behind our back.
    fn sync_canvas(&mut self) {
        if self.canvas.aspect() != self.document.aspect {
            self.canvas.set_aspect(self.document.aspect);
        }
    }

    /// The interaction controller.
    #[must_use]
    pub const fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Route a pointer event to the controller.
    pub fn process_event(&mut self, event: &PointerEvent) -> InteractionOutcome {
        self.sync_canvas();
        let outcome = self
            .controller
            .handle(event, self.document.layers_mut(), &self.canvas);
        if matches!(outcome, InteractionOutcome::Updated { .. }) {
            self.has_local_changes = true;
        }
        outcome
    }

    /// Abort any drag in progress (e.g. the view is being torn down).
    pub fn cancel_interaction(&mut self) -> InteractionOutcome {
        self.controller.end()
    }

    /// Words to emphasize in the headline.
    pub fn highlights(&mut self) -> Arc<HighlightSet> {
        if !self.document.highlight_keywords {
            return Arc::new(HighlightSet::empty());
        }
        self.highlights
            .get(self.document.mode, self.document.headline_text())
    }

    /// Headline split into rendered runs.
    pub fn headline_segments(&mut self) -> Vec<Segment> {
        let set = self.highlights();
        segment_text(self.document.headline_text(), &set)
    }

    /// Overlay and base colors of the current template.
    #[must_use]
    pub fn template_style(&self) -> TemplateStyle {
        self.document.template.style()
    }

    /// Style of the headline.
    #[must_use]
    pub fn headline_style(&self) -> TextStyle {
        text_style(self.document.effect, &self.document.text_color)
    }

    /// Style of the reference/accent line.
    #[must_use]
    pub fn accent_style(&self) -> TextStyle {
        accent_style(self.document.effect, &self.document.text_color)
    }

    /// Headline font size in pixels at the current text scale.
    #[must_use]
    pub fn headline_font_px(&self) -> f32 {
        self.document
            .layer(crate::LayerId::Text)
            .font_px(self.template_style().base_font_px)
    }

    /// Start an asynchronous update of `field`.
    pub fn begin_update(&mut self, field: ContentField) -> Ticket {
        self.pending.begin(field)
    }

    /// Apply the response for `ticket`, unless a newer request for the same
    /// field was started since. Returns whether the value was written.
    pub fn complete_update(&mut self, ticket: Ticket, value: String) -> bool {
        let field = ticket.field();
        if !self.pending.commit(ticket) {
            return false;
        }
        self.document.set_content(field, value);
        self.has_local_changes = true;
        true
    }

    /// Whether an update for `field` is outstanding.
    #[must_use]
    pub fn is_updating(&self, field: ContentField) -> bool {
        self.pending.is_pending(field)
    }

    /// Whether the document changed since the last save.
    #[must_use]
    pub const fn has_local_changes(&self) -> bool {
        self.has_local_changes
    }

    /// Record that the document was saved.
    pub fn mark_saved(&mut self) {
        self.has_local_changes = false;
    }
}

impl Default for PosterEditor {
    fn default() -> Self {
        Self::new(PosterDocument::default())
    }
}
