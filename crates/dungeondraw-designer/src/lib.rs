//! # Dungeon Draw Designer
//!
//! The state engine behind the dungeon map tool: floor regions built from
//! boolean edits, doors, style, and an undo/redo history persisted to a
//! document store.
//!
//! ## Core Components
//!
//! - **Shapes**: points, rectangles, doors and line segments
//! - **Geometry**: primitive shapes to regions, planar predicates
//! - **Region**: polygon sets with union, difference and intersection tests
//! - **DungeonState**: one immutable snapshot and its persisted payload
//! - **Controller**: the history of snapshots and every legal transition
//!
//! ## Architecture
//!
//! ```text
//! DungeonHandle (single-flight, store watcher)
//!   └── DungeonController
//!         ├── History (Arc<DungeonState> snapshots + cursor)
//!         ├── DocumentStore (persist / load / notifications)
//!         └── Renderer (redraw after each transition)
//!
//! DungeonState
//!   ├── Region ── ops (csgrs boolean ops)
//!   ├── Vec<Door>
//!   └── StyleConfig
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dungeondraw_designer::{DungeonController, NullRenderer, Rect};
//!
//! let mut controller = DungeonController::new(document, store, Arc::new(NullRenderer));
//! controller.load_from_journal_entry().await?;
//! controller.add_rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)).await?;
//! controller.add_door(50.0, 0.0, 50.0, 10.0).await?;
//! controller.undo().await?;
//! ```

pub mod controller;
pub mod dungeon_state;
pub mod geometry;
pub mod ops;
pub mod region;
pub mod renderer;
pub mod serialization;
pub mod shapes;

pub use controller::{DungeonController, DungeonHandle, History};
pub use dungeon_state::DungeonState;
pub use geometry::{points_to_polygon, rect_to_polygon, two_points_to_line_string};
pub use region::{Region, RegionPolygon};
pub use renderer::{NullRenderer, RecordingRenderer, Renderer};
pub use serialization::{DungeonPayload, PayloadMetadata, PAYLOAD_VERSION};
pub use shapes::{Door, LineShape, Point, Rect};
