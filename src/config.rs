use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::grid::Grid;

/// Largest frame edge, in pixels, we are willing to ask the window system for.
pub const MAX_FRAME_EDGE: u32 = 8192;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} needs room for a snake and a target")]
    GridTooSmall { width: u16, height: u16 },
    #[error("ticks_per_second must be non-zero")]
    ZeroTickRate,
    #[error("cell_size must be non-zero")]
    ZeroCellSize,
    #[error("frame {width}x{height} px exceeds the 8192 px limit")]
    FrameTooLarge { width: u32, height: u32 },
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup parameters. Read once; changing them mid-run is not supported.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub width: u16,
    pub height: u16,
    pub ticks_per_second: u32,
    /// Edge length of one grid cell on screen.
    pub cell_size: u32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            ticks_per_second: 5,
            cell_size: 16,
            seed: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let (width, height) = self.frame_size();
        if width > MAX_FRAME_EDGE || height > MAX_FRAME_EDGE {
            return Err(ConfigError::FrameTooLarge { width, height });
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.width, self.height)
    }

    /// Frame buffer size in pixels.
    pub fn frame_size(&self) -> (u32, u32) {
        (
            u32::from(self.width).saturating_mul(self.cell_size),
            u32::from(self.height).saturating_mul(self.cell_size),
        )
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
