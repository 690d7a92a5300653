//! Scan and layout limits.

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Limits shared by the scanner, the layout engine, and both views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiderConfig {
    /// Maximum scan depth below the root; the root itself is depth 0.
    pub max_depth: u32,
    /// Cap on non-folder entries kept per folder. Folders are never capped.
    pub max_files_per_folder: usize,
    /// Radius increment per depth level in the radial layout, in pixels.
    pub radius_step: f32,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_files_per_folder: 10,
            radius_step: 120.0,
        }
    }
}

impl SpiderConfig {
    /// Check the limits before any scan worker is spawned.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.max_depth < 1 {
            return Err(ScanError::InvalidConfig {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if self.max_files_per_folder < 1 {
            return Err(ScanError::InvalidConfig {
                message: "max_files_per_folder must be at least 1".to_string(),
            });
        }
        if !self.radius_step.is_finite() || self.radius_step <= 0.0 {
            return Err(ScanError::InvalidConfig {
                message: "radius_step must be a positive number".to_string(),
            });
        }
        Ok(())
    }
}
