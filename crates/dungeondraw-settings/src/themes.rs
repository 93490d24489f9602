//! Named theme presets
//!
//! Every preset is a set of [`StyleOverrides`] merged onto
//! [`StyleConfig::default`], so a resolved preset always carries every key.

use serde::Serialize;

use crate::style::{StyleConfig, StyleOverrides};

const CHECKERBOARD_TEXTURE: &str =
    "modules/dungeon-draw/assets/textures/sci_fi_texture_150_by_llexandro_d939vk9.png";
const METAL_TEXTURE: &str =
    "modules/dungeon-draw/assets/textures/sci_fi_texture_212_by_llexandro_dcuxgum.png";
const WOOD_TEXTURE: &str =
    "modules/dungeon-draw/assets/textures/Old_Wooden_Plank_Seamless_Texture_765.jpg";

/// A selectable theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemePreset {
    /// Registry key, e.g. `moldvayBlue`
    pub key: &'static str,
    /// Display name for the configuration UI
    pub name: &'static str,
    /// Keys this theme changes relative to the default style
    pub overrides: StyleOverrides,
}

impl ThemePreset {
    /// Full style for this theme
    pub fn config(&self) -> StyleConfig {
        StyleConfig::default().merged(&self.overrides)
    }
}

fn color(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// All presets, `default` first.
pub fn themes() -> Vec<ThemePreset> {
    vec![
        ThemePreset {
            key: "default",
            name: "Default",
            overrides: StyleOverrides::default(),
        },
        ThemePreset {
            key: "basicBlack",
            name: "Basic Black",
            overrides: StyleOverrides {
                door_color: color("#0D0D0D"),
                exterior_shadow_opacity: Some(0.0),
                interior_shadow_opacity: Some(0.0),
                floor_color: color("#FFFFFF"),
                scene_background_color: color("#0D0D0D"),
                scene_grid_opacity: Some(1.0),
                wall_color: color("#0D0D0D"),
                ..Default::default()
            },
        },
        ThemePreset {
            key: "checkerboard",
            name: "Checkerboard",
            overrides: StyleOverrides {
                door_fill_color: color("#C2BFB0"),
                door_fill_opacity: Some(1.0),
                floor_texture: Some(CHECKERBOARD_TEXTURE.to_string()),
                ..Default::default()
            },
        },
        ThemePreset {
            key: "metal",
            name: "Metal",
            overrides: StyleOverrides {
                door_fill_color: color("#C0C0C0"),
                door_fill_opacity: Some(1.0),
                floor_texture: Some(METAL_TEXTURE.to_string()),
                ..Default::default()
            },
        },
        ThemePreset {
            key: "moldvayBlue",
            name: "Moldvay Blue",
            overrides: StyleOverrides {
                door_color: color("#3A9FF2"),
                door_thickness: Some(35.0),
                exterior_shadow_opacity: Some(0.0),
                floor_color: color("#FFFFFF"),
                interior_shadow_opacity: Some(0.0),
                scene_background_color: color("#3A9FF2"),
                scene_grid_color: color("#3A9FF2"),
                scene_grid_opacity: Some(1.0),
                wall_color: color("#3A9FF2"),
                ..Default::default()
            },
        },
        ThemePreset {
            key: "wood",
            name: "Wood",
            overrides: StyleOverrides {
                door_color: color("#332211"),
                door_fill_color: color("#FFFFFF"),
                door_fill_opacity: Some(1.0),
                floor_texture: Some(WOOD_TEXTURE.to_string()),
                wall_color: color("#332211"),
                wall_thickness: Some(10.0),
                ..Default::default()
            },
        },
    ]
}

/// Look up a preset by registry key.
pub fn theme(key: &str) -> Option<ThemePreset> {
    themes().into_iter().find(|t| t.key == key)
}
