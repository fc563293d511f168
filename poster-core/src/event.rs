//! Pointer input for layer manipulation.

use serde::{Deserialize, Serialize};

use crate::layer::{Action, LayerId};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// Gesture interrupted (pointer capture lost, window blur, ...).
    Cancel,
}

/// A manipulation handle drawn on a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// The layer body; dragging moves it.
    Move,
    /// Side handle; dragging changes the width.
    Resize,
    /// Corner handle; dragging scales the layer.
    Scale,
}

impl Handle {
    /// The action started by pressing this handle.
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::Move => Action::Move,
            Self::Resize => Action::ResizeWidth,
            Self::Scale => Action::ScaleUniform,
        }
    }
}

/// Which handle of which layer an event hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleTarget {
    /// Layer owning the handle.
    pub layer: LayerId,
    /// The handle.
    pub handle: Handle,
}

impl HandleTarget {
    /// Create a handle target.
    #[must_use]
    pub const fn new(layer: LayerId, handle: Handle) -> Self {
        Self { layer, handle }
    }
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Pointer identifier (mouse, pen or touch contact).
    pub pointer_id: u32,
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
    /// Handle under the pointer, if any.
    pub target: Option<HandleTarget>,
}

impl PointerEvent {
    /// Pointer-down on a handle.
    #[must_use]
    pub const fn down(target: HandleTarget, x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            pointer_id: 0,
            x,
            y,
            target: Some(target),
        }
    }

    /// Pointer move.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::untargeted(PointerPhase::Move, x, y)
    }

    /// Pointer release.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::untargeted(PointerPhase::Up, x, y)
    }

    /// Interrupted gesture.
    #[must_use]
    pub const fn cancel() -> Self {
        Self::untargeted(PointerPhase::Cancel, 0.0, 0.0)
    }

    const fn untargeted(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            pointer_id: 0,
            x,
            y,
            target: None,
        }
    }

    /// Builder-style pointer id.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
