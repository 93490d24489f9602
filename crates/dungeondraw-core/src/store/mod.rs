//! # Document Store
//!
//! The external key-value document store a dungeon persists into.
//!
//! ## Overview
//!
//! A store maps [`DocumentId`]s to opaque string payloads and tells every
//! subscriber when any party writes a document:
//! - `get` / `set` may suspend on I/O
//! - every successful `set` publishes a [`DocumentChange`]
//! - subscribers receive changes through a tokio broadcast channel
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dungeondraw_core::store::{DocumentStore, MemoryDocumentStore};
//!
//! let store = MemoryDocumentStore::new();
//! let mut changes = store.subscribe();
//! store.set(&doc, payload, &actor).await?;
//! let change = changes.recv().await?;
//! ```

mod file;
mod memory;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::ids::{ActorId, DocumentId};

/// Channel capacity for change notifications.
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Notification that a document was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChange {
    /// The document that changed.
    pub document: DocumentId,
    /// Who wrote it.
    pub changed_by: ActorId,
}

impl DocumentChange {
    pub fn new(document: DocumentId, changed_by: ActorId) -> Self {
        Self {
            document,
            changed_by,
        }
    }
}

/// Key-value document store with change notifications.
///
/// Implementations must publish a [`DocumentChange`] after every successful
/// [`set`](DocumentStore::set), including writes that store an identical
/// payload.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document; `Ok(None)` when nothing is stored under `id`.
    async fn get(&self, id: &DocumentId) -> Result<Option<String>, StoreError>;

    /// Write a document on behalf of `actor`.
    async fn set(&self, id: &DocumentId, payload: String, actor: &ActorId)
        -> Result<(), StoreError>;

    /// Receive change notifications for every document in this store.
    fn subscribe(&self) -> broadcast::Receiver<DocumentChange>;
}

/// Publish a change, tolerating a channel with no receivers.
pub(crate) fn notify(sender: &broadcast::Sender<DocumentChange>, change: DocumentChange) {
    match sender.send(change) {
        Ok(count) => tracing::trace!("Document change delivered to {} receivers", count),
        Err(_) => tracing::trace!("Document change published with no receivers"),
    }
}
