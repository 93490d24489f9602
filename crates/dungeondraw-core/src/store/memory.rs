//! In-process document store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::{notify, DocumentChange, DocumentStore, CHANGE_CHANNEL_CAPACITY};
use crate::error::StoreError;
use crate::ids::{ActorId, DocumentId};

/// Document store kept in memory.
///
/// Cloning yields another handle onto the same documents and the same
/// notification channel, which is how tests simulate a second collaborator.
#[derive(Clone)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, String>>>,
    sender: broadcast::Sender<DocumentChange>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            sender,
        }
    }

    /// Current payload without going through the async interface
    pub fn peek(&self, id: &DocumentId) -> Option<String> {
        self.documents.read().get(id).cloned()
    }

    /// Store a payload directly, without publishing a change
    pub fn insert_raw(&self, id: DocumentId, payload: impl Into<String>) {
        self.documents.write().insert(id, payload.into());
    }

    /// Delete a document. Returns true if it existed.
    pub fn remove(&self, id: &DocumentId) -> bool {
        self.documents.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, id: &DocumentId) -> Result<Option<String>, StoreError> {
        Ok(self.documents.read().get(id).cloned())
    }

    async fn set(
        &self,
        id: &DocumentId,
        payload: String,
        actor: &ActorId,
    ) -> Result<(), StoreError> {
        self.documents.write().insert(id.clone(), payload);
        tracing::debug!("Document {} written by {}", id, actor);
        notify(&self.sender, DocumentChange::new(id.clone(), actor.clone()));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentChange> {
        self.sender.subscribe()
    }
}
