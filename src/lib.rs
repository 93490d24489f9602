//! # Dungeon Draw
//!
//! Undo/redo-capable state engine for drawing dungeon floor plans.
//!
//! ## Architecture
//!
//! Dungeon Draw is organized as a workspace with multiple crates:
//!
//! 1. **dungeondraw-core** - Errors, identifiers, the document store and its notifications
//! 2. **dungeondraw-settings** - Style configuration and theme presets
//! 3. **dungeondraw-designer** - Regions, snapshots, history and the controller
//! 4. **dungeondraw** - Logging setup and a headless session driver
//!
//! ## Features
//!
//! - **Boolean floor edits**: add and cut rectangles, add freehand polygons
//! - **Doors**: add single doors, remove every door under a rectangle
//! - **History**: linear undo/redo with branch truncation
//! - **Persistence**: every transition is written to a document store
//! - **Collaboration**: foreign writes to the same document are pulled in

pub mod session;

pub use dungeondraw_designer as designer;

pub use dungeondraw_core::{
    ActorId, DocumentChange, DocumentId, DocumentStore, Error, FileDocumentStore,
    MemoryDocumentStore, Result,
};
pub use dungeondraw_designer::{
    Door, DungeonController, DungeonHandle, DungeonState, NullRenderer, Point, Rect, Region,
    Renderer,
};
pub use dungeondraw_settings::{theme, themes, StyleConfig, ThemePreset};
pub use session::{LogRenderer, SessionCommand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to the session
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
