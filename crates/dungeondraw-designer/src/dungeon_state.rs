//! One complete dungeon snapshot and its load/save against the document store.

use chrono::Utc;
use dungeondraw_core::{ActorId, DocumentId, DocumentStore, Result, StateError};
use dungeondraw_settings::StyleConfig;

use crate::region::Region;
use crate::serialization::{
    decode_region, encode_region, validate_doors, DungeonPayload, PayloadMetadata,
    PAYLOAD_VERSION,
};
use crate::shapes::Door;

/// Snapshot of a dungeon: floor geometry, doors and style.
///
/// Treated as immutable once committed to a history; edits go through a
/// clone. `Clone` is a deep copy since every field is owned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DungeonState {
    pub region: Region,
    pub doors: Vec<Door>,
    pub config: StyleConfig,
}

impl DungeonState {
    /// Empty region, no doors, default style.
    pub fn start_state() -> Self {
        Self::default()
    }

    /// Start state carrying an existing style.
    pub fn with_config(config: StyleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn to_payload(&self, saved_by: Option<&ActorId>) -> DungeonPayload {
        DungeonPayload {
            version: PAYLOAD_VERSION,
            metadata: Some(PayloadMetadata {
                saved_at: Utc::now(),
                saved_by: saved_by.cloned(),
            }),
            geometry: encode_region(&self.region),
            doors: self.doors.clone(),
            config: self.config.clone(),
        }
    }

    pub fn from_payload(payload: DungeonPayload) -> std::result::Result<Self, StateError> {
        let region = decode_region(payload.geometry.as_deref())?;
        validate_doors(&payload.doors)?;
        Ok(Self {
            region,
            doors: payload.doors,
            config: payload.config,
        })
    }

    /// Serialize to the payload format.
    ///
    /// Refuses snapshots that would not load back: JSON has no NaN or
    /// infinity, so such values would be written as `null`.
    pub fn to_json(&self, saved_by: Option<&ActorId>) -> std::result::Result<String, StateError> {
        validate_doors(&self.doors)?;
        self.config
            .validate()
            .map_err(|e| StateError::Malformed {
                reason: e.to_string(),
            })?;
        self.to_payload(saved_by).to_json()
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, StateError> {
        Self::from_payload(DungeonPayload::from_json(content)?)
    }

    /// Serialize this snapshot into `document`.
    ///
    /// The store notifies every subscriber of the write, which is how other
    /// viewers of the same document learn about it.
    pub async fn save_to_document(
        &self,
        store: &dyn DocumentStore,
        document: &DocumentId,
        actor: &ActorId,
    ) -> Result<()> {
        let payload = self.to_json(Some(actor))?;
        store.set(document, payload, actor).await?;
        tracing::trace!(
            "Saved dungeon to {} ({} doors, area {:.1})",
            document,
            self.doors.len(),
            self.region.area()
        );
        Ok(())
    }

    /// Read a snapshot from `document`.
    ///
    /// Fails with `CorruptState` when nothing is stored or the payload does
    /// not parse, and with `StoreFailure` when the read itself fails.
    pub async fn load_from_document(
        store: &dyn DocumentStore,
        document: &DocumentId,
    ) -> Result<Self> {
        let content = store
            .get(document)
            .await?
            .ok_or_else(|| StateError::Missing {
                document: document.to_string(),
            })?;
        Ok(Self::from_json(&content)?)
    }
}
