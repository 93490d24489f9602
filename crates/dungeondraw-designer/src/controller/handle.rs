//! Shareable, single-flight access to a controller.

use std::sync::Arc;

use dungeondraw_core::{DocumentChange, DocumentId, DocumentStore, Result};
use dungeondraw_settings::StyleConfig;
use tokio::sync::{broadcast::error::RecvError, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use super::DungeonController;
use crate::dungeon_state::DungeonState;
use crate::shapes::{Point, Rect};

/// Cloneable handle to one controller.
///
/// Every call holds the controller's async lock for its full duration,
/// including the persist step, so concurrent callers are queued and never
/// interleave inside a transition.
#[derive(Clone)]
pub struct DungeonHandle {
    inner: Arc<Mutex<DungeonController>>,
    store: Arc<dyn DocumentStore>,
    document: DocumentId,
}

impl DungeonHandle {
    pub fn new(controller: DungeonController) -> Self {
        let store = Arc::clone(controller.store());
        let document = controller.document().clone();
        Self {
            inner: Arc::new(Mutex::new(controller)),
            store,
            document,
        }
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    /// Exclusive access for several calls in a row.
    pub async fn lock(&self) -> MutexGuard<'_, DungeonController> {
        self.inner.lock().await
    }

    pub async fn state(&self) -> Arc<DungeonState> {
        Arc::clone(self.inner.lock().await.state())
    }

    /// `(index, len)` of the history.
    pub async fn position(&self) -> (usize, usize) {
        let controller = self.inner.lock().await;
        (controller.history_index(), controller.history_len())
    }

    pub async fn push_state(&self, state: DungeonState) -> Result<()> {
        self.inner.lock().await.push_state(state).await
    }

    pub async fn set_config(&self, config: StyleConfig) -> Result<()> {
        self.inner.lock().await.set_config(config).await
    }

    pub async fn add_door(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.inner.lock().await.add_door(x1, y1, x2, y2).await
    }

    pub async fn subtract_doors(&self, rect: Rect) -> Result<bool> {
        self.inner.lock().await.subtract_doors(rect).await
    }

    pub async fn add_rectangle(&self, rect: Rect) -> Result<bool> {
        self.inner.lock().await.add_rectangle(rect).await
    }

    pub async fn add_polygon(&self, points: &[Point]) -> Result<bool> {
        self.inner.lock().await.add_polygon(points).await
    }

    pub async fn subtract_rectangle(&self, rect: Rect) -> Result<bool> {
        self.inner.lock().await.subtract_rectangle(rect).await
    }

    pub async fn undo(&self) -> Result<bool> {
        self.inner.lock().await.undo().await
    }

    pub async fn redo(&self) -> Result<bool> {
        self.inner.lock().await.redo().await
    }

    pub async fn delete_all(&self) -> Result<()> {
        self.inner.lock().await.delete_all().await
    }

    pub async fn load_from_journal_entry(&self) -> Result<()> {
        self.inner.lock().await.load_from_journal_entry().await
    }

    pub async fn maybe_refresh(&self, change: &DocumentChange) -> Result<bool> {
        self.inner.lock().await.maybe_refresh(change).await
    }

    /// Follow store notifications in a background task.
    ///
    /// The subscription is taken before this returns, so no write made after
    /// the call is missed. If the listener falls behind the channel, it
    /// refreshes once unconditionally. The task ends when the store's
    /// channel closes or the returned handle is aborted.
    pub fn watch(&self) -> JoinHandle<()> {
        let mut changes = self.store.subscribe();
        let handle = self.clone();
        tokio::spawn(async move {
            loop {
                let outcome = match changes.recv().await {
                    Ok(change) => handle.maybe_refresh(&change).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Missed {} change notifications for {}, refreshing",
                            skipped,
                            handle.document
                        );
                        handle.inner.lock().await.refresh_from_store().await
                    }
                    Err(RecvError::Closed) => {
                        tracing::debug!("Change channel closed, stopping watch on {}", handle.document);
                        break;
                    }
                };
                if let Err(e) = outcome {
                    tracing::warn!("Refresh of {} failed: {}", handle.document, e);
                }
            }
        })
    }
}

impl std::fmt::Debug for DungeonHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DungeonHandle")
            .field("document", &self.document)
            .finish()
    }
}
