//! Shape, door and style edits.
//!
//! Methods returning `Result<bool>` report whether a new history entry was
//! committed; `false` means the edit changed nothing and history is as it was.

use std::sync::Arc;

use dungeondraw_core::{Result, ShapeError};
use dungeondraw_settings::StyleConfig;

use super::DungeonController;
use crate::dungeon_state::DungeonState;
use crate::geometry::{points_to_polygon, rect_to_polygon};
use crate::shapes::{Door, LineShape, Point, Rect};

impl DungeonController {
    /// Replace the style of the current snapshot.
    ///
    /// A config that fails [`StyleConfig::validate`] is rejected and history
    /// is left as it was.
    pub async fn set_config(&mut self, config: StyleConfig) -> Result<()> {
        config
            .validate()
            .inspect_err(|e| tracing::warn!("Rejected style config: {}", e))?;
        let mut state = self.edit();
        state.config = config;
        self.push_state(state).await
    }

    /// Append a door. Duplicates are allowed; non-finite coordinates are not.
    pub async fn add_door(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        if [x1, y1, x2, y2].iter().any(|v| !v.is_finite()) {
            tracing::warn!("Rejected door ({}, {}) - ({}, {})", x1, y1, x2, y2);
            return Err(ShapeError::NonFinite.into());
        }
        let mut state = self.edit();
        state.doors.push(Door::new(x1, y1, x2, y2));
        self.push_state(state).await
    }

    /// Remove every door whose segment touches `rect`.
    pub async fn subtract_doors(&mut self, rect: Rect) -> Result<bool> {
        let shape = rect_to_polygon(&rect);
        let current = self.history.current();
        let kept: Vec<Door> = current
            .doors
            .iter()
            .filter(|door| !shape.intersects_line(&LineShape::from(*door)))
            .copied()
            .collect();

        if kept.len() == current.doors.len() {
            tracing::trace!("No doors under {:?}", rect);
            return Ok(false);
        }

        let removed = current.doors.len() - kept.len();
        let mut state = self.edit();
        state.doors = kept;
        self.push_state(state).await?;
        tracing::debug!("Removed {} door(s)", removed);
        Ok(true)
    }

    /// Union a rectangle into the floor. Degenerate rectangles change nothing.
    pub async fn add_rectangle(&mut self, rect: Rect) -> Result<bool> {
        let shape = rect_to_polygon(&rect);
        if shape.is_empty() {
            return Ok(false);
        }
        let mut state = self.edit();
        state.region = state.region.union(&shape);
        self.push_state(state).await?;
        Ok(true)
    }

    /// Union a freehand polygon into the floor.
    ///
    /// A malformed ring is logged and dropped without touching history; only
    /// store failures are returned as errors.
    pub async fn add_polygon(&mut self, points: &[Point]) -> Result<bool> {
        let shape = match points_to_polygon(points) {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!("Ignoring invalid polygon with {} points: {}", points.len(), e);
                return Ok(false);
            }
        };
        let mut state = self.edit();
        state.region = state.region.union(&shape);
        self.push_state(state).await?;
        Ok(true)
    }

    /// Cut a rectangle out of the floor.
    ///
    /// Does nothing when the floor is empty or the rectangle misses it.
    pub async fn subtract_rectangle(&mut self, rect: Rect) -> Result<bool> {
        let shape = rect_to_polygon(&rect);
        let region = &self.history.current().region;
        if region.is_empty() || !region.intersects(&shape) {
            tracing::trace!("Cut {:?} misses the floor", rect);
            return Ok(false);
        }
        let mut state = self.edit();
        state.region = state.region.difference(&shape);
        self.push_state(state).await?;
        Ok(true)
    }

    /// Clear floor and doors, keeping the current style.
    ///
    /// History is reset to that single entry; nothing before it can be undone.
    pub async fn delete_all(&mut self) -> Result<()> {
        let config = self.history.current().config.clone();
        let state = Arc::new(DungeonState::with_config(config));
        self.persist(&state).await?;
        self.history.reset(state);
        tracing::info!("Cleared dungeon {}", self.document);
        self.render();
        Ok(())
    }
}
