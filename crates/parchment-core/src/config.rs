//! Board configuration.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "color": "#000000", "brush_size": 4, "history_limit": 200 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Default ink color.
pub const DEFAULT_COLOR: &str = "#2c3e50";
/// Default brush width.
pub const DEFAULT_BRUSH_SIZE: f64 = 2.0;
/// Default font size for text annotations.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;
/// Default font family for text annotations.
pub const DEFAULT_FONT_FAMILY: &str = "Virgil";
/// Default glyph size for emoji and stickers.
pub const DEFAULT_MARK_SIZE: f64 = 48.0;
/// Color stored on eraser strokes.
pub const DEFAULT_ERASER_COLOR: &str = "white";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Defaults applied to a new board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Initial ink color.
    pub color: String,
    pub brush_size: f64,
    pub font_size: f64,
    pub font_family: String,
    /// Glyph size for emoji and stickers.
    pub mark_size: f64,
    pub eraser_color: String,
    /// Maximum number of undo snapshots; `None` keeps the whole session.
    pub history_limit: Option<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            color: DEFAULT_COLOR.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            mark_size: DEFAULT_MARK_SIZE,
            eraser_color: DEFAULT_ERASER_COLOR.to_string(),
            history_limit: None,
        }
    }
}

impl BoardConfig {
    /// Parse a config from JSON. Out-of-range values fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded board config from {}", path.display());
        Ok(config)
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.canvas_width == 0 || self.canvas_height == 0 {
            log::warn!(
                "Ignoring canvas size {}x{}",
                self.canvas_width,
                self.canvas_height
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        for (value, default, name) in [
            (&mut self.brush_size, defaults.brush_size, "brush_size"),
            (&mut self.font_size, defaults.font_size, "font_size"),
            (&mut self.mark_size, defaults.mark_size, "mark_size"),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Ignoring {} = {}", name, value);
                *value = default;
            }
        }
        if self.history_limit == Some(0) {
            log::warn!("history_limit must be at least 1, keeping full history");
            self.history_limit = None;
        }
        self
    }
}
