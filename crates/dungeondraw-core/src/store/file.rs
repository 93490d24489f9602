//! File-backed document store: one `<id>.json` file per document.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use super::{notify, DocumentChange, DocumentStore, CHANGE_CHANNEL_CAPACITY};
use crate::error::StoreError;
use crate::ids::{ActorId, DocumentId};

const EXTENSION: &str = "json";

/// Document store rooted at a directory.
///
/// Notifications only reach subscribers of this instance; writes made by
/// other processes are not observed.
pub struct FileDocumentStore {
    root: PathBuf,
    sender: broadcast::Sender<DocumentChange>,
}

impl FileDocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        tracing::info!("Opened document store at {}", root.display());
        Ok(Self { root, sender })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `id`.
    pub fn document_path(&self, id: &DocumentId) -> Result<PathBuf, StoreError> {
        let raw = id.as_str();
        let invalid = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.chars().any(|c| c == '/' || c == '\\' || c == '\0');
        if invalid {
            return Err(StoreError::InvalidDocumentId { id: raw.to_string() });
        }
        Ok(self.root.join(format!("{}.{}", raw, EXTENSION)))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get(&self, id: &DocumentId) -> Result<Option<String>, StoreError> {
        let path = self.document_path(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(
        &self,
        id: &DocumentId,
        payload: String,
        actor: &ActorId,
    ) -> Result<(), StoreError> {
        let path = self.document_path(id)?;
        // Write beside the target and rename so readers never see a partial file
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        tokio::fs::write(&tmp, payload.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        tracing::debug!("Document {} written to {} by {}", id, path.display(), actor);
        notify(&self.sender, DocumentChange::new(id.clone(), actor.clone()));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<DocumentChange> {
        self.sender.subscribe()
    }
}
