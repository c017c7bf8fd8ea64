//! Editor configuration.

use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default maximum number of committed points per polyline.
pub const MAX_POINTS: usize = 10;

/// Smallest usable limit: the second click always commits a point, and the
/// closing click commits one more.
pub const MIN_MAX_POINTS: usize = 3;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_points must be at least 3, got {0}")]
    MaxPoints(usize),
    #[error("stroke width must be positive, got {0}")]
    StrokeWidth(f64),
}

/// Settings for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Committed points after which the polyline is finished automatically.
    pub max_points: usize,
    /// Style of the polyline while it is drawn.
    pub preview_style: ShapeStyle,
    /// Style frozen onto the polyline when it is finished.
    pub final_style: ShapeStyle,
    /// Maximum number of shapes on the drawing (unbounded when absent).
    pub surface_capacity: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_points: MAX_POINTS,
            preview_style: ShapeStyle::preview(),
            final_style: ShapeStyle::finished(),
            surface_capacity: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_points < MIN_MAX_POINTS {
            return Err(ConfigError::MaxPoints(self.max_points));
        }
        for style in [&self.preview_style, &self.final_style] {
            if style.stroke_width <= 0.0 || !style.stroke_width.is_finite() {
                return Err(ConfigError::StrokeWidth(style.stroke_width));
            }
        }
        Ok(())
    }
}
