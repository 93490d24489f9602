//! Error handling for Dungeon Draw
//!
//! Provides error types for every layer of the engine:
//! - Shape errors (malformed or degenerate geometric input)
//! - State errors (stored snapshot missing or unparsable)
//! - Store errors (the external document store failed)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape error type
///
/// Raised while turning user input (freehand point lists, rectangles)
/// into region geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Not enough distinct points to form a ring
    #[error("Polygon needs at least 3 distinct points, got {count}")]
    TooFewPoints {
        /// Number of distinct points supplied.
        count: usize,
    },

    /// A coordinate was NaN or infinite
    #[error("Shape contains a non-finite coordinate")]
    NonFinite,

    /// The ring encloses no area
    #[error("Shape has zero area")]
    ZeroArea,

    /// Two non-adjacent edges of the ring cross or touch
    #[error("Polygon edges {first_edge} and {second_edge} intersect")]
    SelfIntersecting {
        /// Index of the first offending edge.
        first_edge: usize,
        /// Index of the second offending edge.
        second_edge: usize,
    },

    /// Any other degenerate input
    #[error("Degenerate shape: {reason}")]
    Degenerate {
        /// Why the shape was rejected.
        reason: String,
    },
}

/// State error type
///
/// Raised when a stored snapshot cannot be turned back into a dungeon state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Nothing stored for the document
    #[error("No saved dungeon in document {document}")]
    Missing {
        /// The document that was read.
        document: String,
    },

    /// The payload did not parse or failed validation
    #[error("Malformed dungeon payload: {reason}")]
    Malformed {
        /// The reason the payload was rejected.
        reason: String,
    },

    /// The payload was written by a newer format
    #[error("Unsupported payload version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the payload.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },
}

/// Store error type
///
/// Represents failures of the external document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document id cannot be used by this store
    #[error("Invalid document id: {id:?}")]
    InvalidDocumentId {
        /// The rejected id.
        id: String,
    },

    /// Store could not be reached
    #[error("Document store unavailable: {reason}")]
    Unavailable {
        /// The reason the store is unavailable.
        reason: String,
    },

    /// Store refused the write
    #[error("Document store rejected the write: {reason}")]
    Rejected {
        /// The reason the write was refused.
        reason: String,
    },

    /// Underlying I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for Dungeon Draw
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or degenerate geometric input
    #[error("Invalid shape: {0}")]
    InvalidShape(#[from] ShapeError),

    /// Stored payload missing or unparsable
    #[error("Corrupt state: {0}")]
    CorruptState(#[from] StateError),

    /// Document store read or write failed
    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an invalid shape error
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, Error::InvalidShape(_))
    }

    /// Check if this is a corrupt state error
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Error::CorruptState(_))
    }

    /// Check if this is a store failure
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::StoreFailure(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
