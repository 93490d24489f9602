//! Redraw hook invoked after every committed transition.
//!
//! Painting is not part of this crate. The host supplies a [`Renderer`] that
//! turns a snapshot into pixels, a scene graph, a log line, or nothing.

use parking_lot::Mutex;

use crate::dungeon_state::DungeonState;

pub trait Renderer: Send + Sync {
    /// Draw `state`. Called with the controller's new current state.
    fn render(&self, state: &DungeonState);
}

/// Renderer that ignores every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _state: &DungeonState) {}
}

/// Keeps a copy of every rendered state, oldest first.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<DungeonState>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn last_frame(&self) -> Option<DungeonState> {
        self.frames.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, state: &DungeonState) {
        self.frames.lock().push(state.clone());
    }
}
