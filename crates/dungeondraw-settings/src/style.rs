//! Visual style configuration for a dungeon
//!
//! A [`StyleConfig`] holds every visual parameter the renderer reads:
//! - Walls (thickness, color)
//! - Doors (thickness, outline and fill)
//! - Floor (color, texture, tint)
//! - Interior and exterior shadows
//! - Scene background and grid
//!
//! It serializes as a flat camelCase key/value map. Keys missing from a
//! stored map fall back to the defaults and unknown keys are ignored, so
//! older and newer payloads both load.

use dungeondraw_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete style for one dungeon snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub door_thickness: f64,
    pub door_color: String,
    pub door_fill_color: String,
    pub door_fill_opacity: f64,
    pub exterior_shadow_color: String,
    pub exterior_shadow_thickness: f64,
    pub exterior_shadow_opacity: f64,
    pub floor_color: String,
    /// Resource path of a tiling floor texture; empty for a flat floor
    pub floor_texture: String,
    pub floor_texture_tint: String,
    pub interior_shadow_color: String,
    pub interior_shadow_thickness: f64,
    pub interior_shadow_opacity: f64,
    pub scene_background_color: String,
    pub scene_grid_color: String,
    pub scene_grid_opacity: f64,
    pub wall_color: String,
    pub wall_thickness: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            door_thickness: 25.0,
            door_color: "#000000".to_string(),
            door_fill_color: "#ffffff".to_string(),
            door_fill_opacity: 0.0,
            exterior_shadow_color: "#000000".to_string(),
            exterior_shadow_thickness: 20.0,
            exterior_shadow_opacity: 0.5,
            floor_color: "#F2EDDF".to_string(),
            floor_texture: String::new(),
            floor_texture_tint: String::new(),
            interior_shadow_color: "#000000".to_string(),
            interior_shadow_thickness: 8.0,
            interior_shadow_opacity: 0.5,
            scene_background_color: "#999999".to_string(),
            scene_grid_color: "#000000".to_string(),
            scene_grid_opacity: 0.2,
            wall_color: "#000000".to_string(),
            wall_thickness: 8.0,
        }
    }
}

/// Partial style: only the keys a theme or user changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_shadow_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_shadow_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exterior_shadow_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_texture_tint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_shadow_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_shadow_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_shadow_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_grid_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_grid_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
}

fn take<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl StyleConfig {
    /// Create new style with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this style with every key set in `overrides` replaced.
    pub fn merged(&self, overrides: &StyleOverrides) -> Self {
        let mut out = self.clone();
        take(&mut out.door_thickness, &overrides.door_thickness);
        take(&mut out.door_color, &overrides.door_color);
        take(&mut out.door_fill_color, &overrides.door_fill_color);
        take(&mut out.door_fill_opacity, &overrides.door_fill_opacity);
        take(&mut out.exterior_shadow_color, &overrides.exterior_shadow_color);
        take(
            &mut out.exterior_shadow_thickness,
            &overrides.exterior_shadow_thickness,
        );
        take(
            &mut out.exterior_shadow_opacity,
            &overrides.exterior_shadow_opacity,
        );
        take(&mut out.floor_color, &overrides.floor_color);
        take(&mut out.floor_texture, &overrides.floor_texture);
        take(&mut out.floor_texture_tint, &overrides.floor_texture_tint);
        take(&mut out.interior_shadow_color, &overrides.interior_shadow_color);
        take(
            &mut out.interior_shadow_thickness,
            &overrides.interior_shadow_thickness,
        );
        take(
            &mut out.interior_shadow_opacity,
            &overrides.interior_shadow_opacity,
        );
        take(
            &mut out.scene_background_color,
            &overrides.scene_background_color,
        );
        take(&mut out.scene_grid_color, &overrides.scene_grid_color);
        take(&mut out.scene_grid_opacity, &overrides.scene_grid_opacity);
        take(&mut out.wall_color, &overrides.wall_color);
        take(&mut out.wall_thickness, &overrides.wall_thickness);
        out
    }

    /// Load style from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read style file: {}", e)))?;

        let style: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON style: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML style: {}", e)))?
        } else {
            return Err(Error::other("Style file must be .json or .toml"));
        };

        style.validate()?;
        tracing::debug!("Loaded style from {}", path.display());
        Ok(style)
    }

    /// Save style to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize style: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize style: {}", e)))?
        } else {
            return Err(Error::other("Style file must be .json or .toml"));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write style file: {}", e)))?;

        Ok(())
    }

    /// Validate value ranges and color formats
    pub fn validate(&self) -> Result<()> {
        let thicknesses = [
            ("doorThickness", self.door_thickness),
            ("exteriorShadowThickness", self.exterior_shadow_thickness),
            ("interiorShadowThickness", self.interior_shadow_thickness),
            ("wallThickness", self.wall_thickness),
        ];
        for (key, value) in thicknesses {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::other(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        let opacities = [
            ("doorFillOpacity", self.door_fill_opacity),
            ("exteriorShadowOpacity", self.exterior_shadow_opacity),
            ("interiorShadowOpacity", self.interior_shadow_opacity),
            ("sceneGridOpacity", self.scene_grid_opacity),
        ];
        for (key, value) in opacities {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::other(format!(
                    "{} must be between 0 and 1, got {}",
                    key, value
                )));
            }
        }

        let colors = [
            ("doorColor", &self.door_color, false),
            ("doorFillColor", &self.door_fill_color, false),
            ("exteriorShadowColor", &self.exterior_shadow_color, false),
            ("floorColor", &self.floor_color, false),
            ("floorTextureTint", &self.floor_texture_tint, true),
            ("interiorShadowColor", &self.interior_shadow_color, false),
            ("sceneBackgroundColor", &self.scene_background_color, false),
            ("sceneGridColor", &self.scene_grid_color, false),
            ("wallColor", &self.wall_color, false),
        ];
        for (key, value, may_be_empty) in colors {
            if value.is_empty() && may_be_empty {
                continue;
            }
            if !is_hex_color(value) {
                return Err(Error::other(format!(
                    "{} must be a #RRGGBB color, got {:?}",
                    key, value
                )));
            }
        }

        Ok(())
    }
}

/// `#RRGGBB`, either case.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
