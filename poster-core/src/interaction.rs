//! # Pointer Interaction
//!
//! Turns pointer events into layer geometry changes.
//!
//! ```text
//!            down on handle                move (same pointer)
//!   Idle ─────────────────────▶ Dragging ◀───────────────────┐
//!    ▲                             │  └──────────────────────┘
//!    └──── up / cancel / reset ────┘
//! ```
//!
//! While a session is open the controller holds a [`CaptureGuard`] so the
//! host routes every move/up to it exclusively. The guard is released on
//! every way out of `Dragging`, including the controller being dropped.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasGeometry, PixelDelta};
use crate::event::{HandleTarget, PointerEvent, PointerPhase};
use crate::layer::{Action, Baseline, LayerGeometry, LayerId, LayerSet};

/// Host hook for exclusive pointer routing.
///
/// Implementations register the global move/up listeners (or call the
/// platform's pointer-capture API) in `acquire` and undo it in `release`.
pub trait PointerCapture: Send + Sync {
    /// Start routing `pointer_id` exclusively to the controller.
    fn acquire(&self, pointer_id: u32, target: HandleTarget);
    /// Stop routing `pointer_id`.
    fn release(&self, pointer_id: u32);
}

/// Scoped pointer capture; releases on drop.
pub struct CaptureGuard {
    host: Arc<dyn PointerCapture>,
    pointer_id: u32,
}

impl CaptureGuard {
    /// Acquire capture for `pointer_id`.
    #[must_use]
    pub fn acquire(host: Arc<dyn PointerCapture>, pointer_id: u32, target: HandleTarget) -> Self {
        host.acquire(pointer_id, target);
        Self { host, pointer_id }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.host.release(self.pointer_id);
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("pointer_id", &self.pointer_id)
            .finish_non_exhaustive()
    }
}

/// Public view of the active drag session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionSession {
    /// Layer being manipulated.
    pub layer: LayerId,
    /// Action requested by the pressed handle.
    pub action: Action,
    /// Pointer that owns the session.
    pub pointer_id: u32,
    /// Screen position at pointer-down.
    pub origin: (f32, f32),
    /// Value of the mutated field at pointer-down.
    pub baseline: Baseline,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// A session was opened.
    Started(InteractionSession),
    /// The active layer changed.
    Updated {
        /// Layer that changed.
        layer: LayerId,
        /// Its new geometry.
        geometry: LayerGeometry,
    },
    /// The session was closed.
    Ended {
        /// Layer whose session ended.
        layer: LayerId,
    },
    /// Nothing happened.
    Ignored,
}

#[derive(Debug)]
struct DragSession {
    info: InteractionSession,
    /// Last pointer position; only advances for move sessions.
    reference: (f32, f32),
    _capture: Option<CaptureGuard>,
}

/// The Idle/Dragging state machine.
#[derive(Default)]
pub struct InteractionController {
    session: Option<DragSession>,
    capture: Option<Arc<dyn PointerCapture>>,
}

impl InteractionController {
    /// Create a controller without a capture host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller that acquires pointer capture from `host` for
    /// the lifetime of each session.
    #[must_use]
    pub fn with_capture(host: Arc<dyn PointerCapture>) -> Self {
        Self {
            session: None,
            capture: Some(host),
        }
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<InteractionSession> {
        self.session.as_ref().map(|s| s.info)
    }

    /// Handle a pointer event, mutating `layers` while a session is open.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        layers: &mut LayerSet,
        canvas: &CanvasGeometry,
    ) -> InteractionOutcome {
        match event.phase {
            PointerPhase::Down => self.begin(event, layers),
            PointerPhase::Move => self.drag(event, layers, canvas),
            PointerPhase::Up => {
                if self.owns(event.pointer_id) {
                    self.end()
                } else {
                    InteractionOutcome::Ignored
                }
            }
            PointerPhase::Cancel => self.end(),
        }
    }

    /// Close the active session, releasing pointer capture.
    pub fn end(&mut self) -> InteractionOutcome {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(
                    layer = %session.info.layer,
                    action = ?session.info.action,
                    "Drag session ended"
                );
                InteractionOutcome::Ended {
                    layer: session.info.layer,
                }
            }
            None => InteractionOutcome::Ignored,
        }
    }

    fn owns(&self, pointer_id: u32) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.info.pointer_id == pointer_id)
    }

    fn begin(&mut self, event: &PointerEvent, layers: &LayerSet) -> InteractionOutcome {
        if self.session.is_some() {
            tracing::debug!(pointer = event.pointer_id, "Pointer-down ignored during drag");
            return InteractionOutcome::Ignored;
        }
        let Some(target) = event.target else {
            return InteractionOutcome::Ignored;
        };

        let action = target.handle.action();
        let info = InteractionSession {
            layer: target.layer,
            action,
            pointer_id: event.pointer_id,
            origin: (event.x, event.y),
            baseline: layers.baseline_for(target.layer, action),
        };
        let capture = self
            .capture
            .as_ref()
            .map(|host| CaptureGuard::acquire(Arc::clone(host), event.pointer_id, target));

        tracing::debug!(layer = %info.layer, action = ?action, "Drag session started");
        self.session = Some(DragSession {
            info,
            reference: info.origin,
            _capture: capture,
        });
        InteractionOutcome::Started(info)
    }

    fn drag(
        &mut self,
        event: &PointerEvent,
        layers: &mut LayerSet,
        canvas: &CanvasGeometry,
    ) -> InteractionOutcome {
        let Some(session) = self.session.as_mut() else {
            return InteractionOutcome::Ignored;
        };
        if session.info.pointer_id != event.pointer_id {
            return InteractionOutcome::Ignored;
        }

        let info = session.info;
        let reference = match info.action {
            Action::Move => session.reference,
            Action::ResizeWidth | Action::ScaleUniform => info.origin,
        };
        let delta: PixelDelta =
            canvas.screen_to_canvas_delta(event.x - reference.0, event.y - reference.1);
        if info.action == Action::Move {
            session.reference = (event.x, event.y);
        }

        let geometry = layers.apply_delta(
            info.layer,
            info.action,
            info.baseline,
            delta,
            canvas.pixel_size(),
        );
        InteractionOutcome::Updated {
            layer: info.layer,
            geometry,
        }
    }
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("session", &self.session)
            .field("has_capture_host", &self.capture.is_some())
            .finish()
    }
}
