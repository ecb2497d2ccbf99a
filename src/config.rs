//! Terrain configuration shared by the core context and the Godot node.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError, MIN_GRID_DIMENSION};
use crate::texture_sync::MapPalette;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid cells along X.
    pub width: usize,
    /// Grid cells along Z.
    pub height: usize,
    pub palette: MapPalette,
    /// When set, per-regeneration mesh statistics are appended to this file.
    pub debug_log_path: Option<PathBuf>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            palette: MapPalette::default(),
            debug_log_path: None,
        }
    }
}

impl TerrainConfig {
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_GRID_DIMENSION || self.height < MIN_GRID_DIMENSION {
            return Err(TerrainError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
