//! Dungeon Draw Settings Crate
//!
//! Handles the visual style of a dungeon, the named theme presets offered to
//! the configuration UI, and style file persistence.

pub mod style;
pub mod themes;

pub use style::{is_hex_color, StyleConfig, StyleOverrides};
pub use themes::{theme, themes, ThemePreset};
