//! Undo and redo.

use dungeondraw_core::Result;

use super::DungeonController;

impl DungeonController {
    /// Step back one entry and persist it.
    ///
    /// At the first entry this is a no-op returning `Ok(false)`: nothing is
    /// written and nothing is redrawn.
    pub async fn undo(&mut self) -> Result<bool> {
        let Some(target) = self.history.peek_back().cloned() else {
            tracing::trace!("Undo at start of history");
            return Ok(false);
        };
        self.persist(&target).await?;
        self.history.step_back();
        tracing::debug!(
            "Undo: index {} of {}",
            self.history.index(),
            self.history.len()
        );
        self.render();
        Ok(true)
    }

    /// Step forward one entry and persist it. No-op at the last entry.
    pub async fn redo(&mut self) -> Result<bool> {
        let Some(target) = self.history.peek_forward().cloned() else {
            tracing::trace!("Redo at end of history");
            return Ok(false);
        };
        self.persist(&target).await?;
        self.history.step_forward();
        tracing::debug!(
            "Redo: index {} of {}",
            self.history.index(),
            self.history.len()
        );
        self.render();
        Ok(true)
    }
}
