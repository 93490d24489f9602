//! # Dungeon Draw Core
//!
//! Core types, traits, and utilities for Dungeon Draw.
//! Provides the error taxonomy, document and actor identities, and the
//! document store abstraction a dungeon persists into.

pub mod error;
pub mod ids;
pub mod store;

pub use error::{Error, Result, ShapeError, StateError, StoreError};
pub use ids::{ActorId, DocumentId};
pub use store::{DocumentChange, DocumentStore, FileDocumentStore, MemoryDocumentStore};
