//! Configuration for polygon profiles
//!
//! Describes the x/y domain, the dimensions of the lookup super-grid and
//! the error mode given to new bins.

use polyprof_stats::ErrorMode;
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// Default number of super-grid cells along each axis
pub const DEFAULT_CELLS: u32 = 25;

/// Largest accepted super-grid, in cells
pub const MAX_GRID_CELLS: u64 = 1 << 22;

/// Profile construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[serde(default)]
pub struct ProfileConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Super-grid cells along x
    pub cells_x: u32,
    /// Super-grid cells along y
    pub cells_y: u32,
    /// Error mode applied to every bin
    pub error_mode: ErrorMode,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
            cells_x: DEFAULT_CELLS,
            cells_y: DEFAULT_CELLS,
            error_mode: ErrorMode::default(),
        }
    }
}

impl ProfileConfig {
    /// Configuration for the given domain with the default grid
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            ..Self::default()
        }
    }

    /// Set the super-grid dimensions
    pub fn with_cells(mut self, cells_x: u32, cells_y: u32) -> Self {
        self.cells_x = cells_x;
        self.cells_y = cells_y;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Validate domain bounds and grid dimensions
    pub fn validate(&self) -> ProfileResult<()> {
        validate_range("x", self.x_min, self.x_max)?;
        validate_range("y", self.y_min, self.y_max)?;

        if self.cells_x == 0 || self.cells_y == 0 {
            return Err(ProfileError::InvalidConfig(format!(
                "grid must have at least one cell per axis, got {}x{}",
                self.cells_x, self.cells_y
            )));
        }

        let cells = u64::from(self.cells_x) * u64::from(self.cells_y);
        if cells > MAX_GRID_CELLS {
            return Err(ProfileError::InvalidConfig(format!(
                "grid of {}x{} cells exceeds the limit of {} cells",
                self.cells_x, self.cells_y, MAX_GRID_CELLS
            )));
        }

        Ok(())
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> ProfileResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> ProfileResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn validate_range(axis: &str, min: f64, max: f64) -> ProfileResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ProfileError::InvalidConfig(format!(
            "{axis} bounds must be finite, got [{min}, {max}]"
        )));
    }
    if min >= max {
        return Err(ProfileError::InvalidConfig(format!(
            "{axis}_min must be below {axis}_max, got [{min}, {max}]"
        )));
    }
    Ok(())
}
