use serde::{Deserialize, Serialize};

use crate::config::Validate;

/// Board geometry. The grid is square, `grid_size` cells per side, each
/// cell `cell_px` pixels wide on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub grid_size: usize,
    pub cell_px: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_px: 20,
        }
    }
}

impl GameSettings {
    pub fn canvas_px(&self) -> usize {
        self.grid_size * self.cell_px
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < 10 || self.grid_size > 100 {
            return Err("grid_size must be between 10 and 100".to_string());
        }
        if self.cell_px < 4 || self.cell_px > 64 {
            return Err("cell_px must be between 4 and 64".to_string());
        }
        Ok(())
    }
}
