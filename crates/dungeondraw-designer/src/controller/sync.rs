//! Loading from the backing document and following foreign writes to it.

use std::sync::Arc;

use dungeondraw_core::{DocumentChange, Result};

use super::DungeonController;
use crate::dungeon_state::DungeonState;

impl DungeonController {
    /// Replace the whole history with the stored snapshot.
    ///
    /// A missing or unreadable payload is not fatal: the history restarts
    /// from a start state. Store read failures are returned and leave the
    /// history untouched.
    pub async fn load_from_journal_entry(&mut self) -> Result<()> {
        let state =
            match DungeonState::load_from_document(self.store.as_ref(), &self.document).await {
                Ok(state) => state,
                Err(e) if e.is_corrupt_state() => {
                    tracing::warn!("Starting {} from scratch: {}", self.document, e);
                    DungeonState::start_state()
                }
                Err(e) => return Err(e),
            };
        self.history.reset(Arc::new(state));
        tracing::info!(
            "Loaded dungeon {} ({} polygons, {} doors)",
            self.document,
            self.history.current().region.polygons().len(),
            self.history.current().doors.len()
        );
        self.render();
        Ok(())
    }

    /// React to a store notification.
    ///
    /// Only changes to this controller's document written by some other actor
    /// are followed. The stored state is pushed as a new history entry, so a
    /// later undo steps back over the foreign edit. Returns whether an entry
    /// was pushed.
    pub async fn maybe_refresh(&mut self, change: &DocumentChange) -> Result<bool> {
        if change.document != self.document {
            tracing::trace!("Ignoring change to unrelated document {}", change.document);
            return Ok(false);
        }
        if change.changed_by == self.actor {
            tracing::trace!("Ignoring echo of own write to {}", self.document);
            return Ok(false);
        }
        tracing::debug!("{} changed by {}", self.document, change.changed_by);
        self.refresh_from_store().await
    }

    /// Pull the stored snapshot in as a new history entry.
    ///
    /// The entry is not written back, since it is already what the store
    /// holds. Nothing is pushed when the stored state equals the current one
    /// or cannot be read as a snapshot.
    pub async fn refresh_from_store(&mut self) -> Result<bool> {
        let state =
            match DungeonState::load_from_document(self.store.as_ref(), &self.document).await {
                Ok(state) => state,
                Err(e) if e.is_corrupt_state() => {
                    tracing::warn!("Not refreshing {}: {}", self.document, e);
                    return Ok(false);
                }
                Err(e) => return Err(e),
            };

        if state == **self.history.current() {
            tracing::trace!("Stored state of {} matches current", self.document);
            return Ok(false);
        }

        self.history.push(Arc::new(state));
        tracing::info!(
            "Refreshed {} from store: index {} of {}",
            self.document,
            self.history.index(),
            self.history.len()
        );
        self.render();
        Ok(true)
    }
}
