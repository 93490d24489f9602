//! Dungeon controller: owns the snapshot history of one dungeon and is the
//! only way to change it.
//!
//! This module is split into submodules by concern:
//! - `history`: the undo/redo stack itself
//! - `edits`: shape, door and config mutations
//! - `navigation`: undo, redo
//! - `sync`: loading from the store and reacting to foreign writes
//! - `handle`: a shareable, single-flight wrapper
//!
//! Every transition persists its target state first and only then moves the
//! history, so a failed write leaves the in-memory history exactly as it was.

mod edits;
mod handle;
mod history;
mod navigation;
mod sync;

use std::sync::Arc;

use dungeondraw_core::{ActorId, DocumentId, DocumentStore, Result};

use crate::dungeon_state::DungeonState;
use crate::renderer::Renderer;

pub use handle::DungeonHandle;
pub use history::History;

/// One controller per dungeon. Not shared; wrap in a [`DungeonHandle`] to
/// call it from several tasks.
pub struct DungeonController {
    document: DocumentId,
    actor: ActorId,
    store: Arc<dyn DocumentStore>,
    renderer: Arc<dyn Renderer>,
    history: History,
}

impl DungeonController {
    /// Controller with a freshly generated actor id and a start-state history.
    ///
    /// Nothing is read from the store until [`load_from_journal_entry`] is
    /// called.
    ///
    /// [`load_from_journal_entry`]: DungeonController::load_from_journal_entry
    pub fn new(
        document: DocumentId,
        store: Arc<dyn DocumentStore>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self::with_actor(document, ActorId::generate(), store, renderer)
    }

    pub fn with_actor(
        document: DocumentId,
        actor: ActorId,
        store: Arc<dyn DocumentStore>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        tracing::debug!("Creating controller for {} as {}", document, actor);
        Self {
            document,
            actor,
            store,
            renderer,
            history: History::default(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &Arc<DungeonState> {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Commit `state` as a new history entry.
    ///
    /// Persists first; on failure the history is untouched and the error is
    /// returned. On success any redo entries are discarded, the new state
    /// becomes current and the renderer is notified.
    pub async fn push_state(&mut self, state: DungeonState) -> Result<()> {
        let state = Arc::new(state);
        self.persist(&state).await?;
        let discarded = self.history.push(state);
        tracing::debug!(
            "Pushed state: index {} of {} ({} redo entries dropped)",
            self.history.index(),
            self.history.len(),
            discarded
        );
        self.render();
        Ok(())
    }

    /// Working copy of the current snapshot.
    fn edit(&self) -> DungeonState {
        DungeonState::clone(self.history.current())
    }

    async fn persist(&self, state: &DungeonState) -> Result<()> {
        state
            .save_to_document(self.store.as_ref(), &self.document, &self.actor)
            .await
            .inspect_err(|e| {
                tracing::warn!("Failed to persist dungeon {}: {}", self.document, e);
            })
    }

    fn render(&self) {
        self.renderer.render(self.history.current());
    }
}

impl std::fmt::Debug for DungeonController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DungeonController")
            .field("document", &self.document)
            .field("actor", &self.actor)
            .field("history_index", &self.history.index())
            .field("history_len", &self.history.len())
            .finish()
    }
}
