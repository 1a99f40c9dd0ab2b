//! Canvas document: the portable JSON form of a board.
//!
//! ```json
//! { "lines": [{ "tool": "pen", "points": [0, 0, 10, 10], "color": "#2c3e50", "strokeWidth": 2 }],
//!   "shapes": [], "texts": [], "emojis": [], "stickers": [], "signatures": [],
//!   "width": 800, "height": 600 }
//! ```
//!
//! Loading is forgiving: a missing or malformed collection loads as empty,
//! malformed entries are skipped, and a dimension that is not a positive
//! number falls back to 800x600.
//! Only input that is not a JSON object at all is an error.

use crate::config::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::entities::{EmojiMark, Signature, StickerMark, Stroke, TextAnnotation};
use crate::store::CanvasSnapshot;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Document must be a JSON object")]
    NotAnObject,
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Serialized canvas contents plus the canvas pixel size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasDocument {
    pub lines: Vec<Stroke>,
    /// Reserved for geometric primitives; always written empty.
    pub shapes: Vec<Value>,
    pub texts: Vec<TextAnnotation>,
    pub emojis: Vec<EmojiMark>,
    pub stickers: Vec<StickerMark>,
    pub signatures: Vec<Signature>,
    /// Canvas size in pixels. Whole numbers are written without a fraction.
    #[serde(serialize_with = "write_dimension")]
    pub width: f64,
    #[serde(serialize_with = "write_dimension")]
    pub height: f64,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(
            f64::from(DEFAULT_CANVAS_WIDTH),
            f64::from(DEFAULT_CANVAS_HEIGHT),
        )
    }
}

impl CanvasDocument {
    /// Create an empty document of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_snapshot(&CanvasSnapshot::default(), width, height)
    }

    /// Build a document from a set of collections.
    pub fn from_snapshot(snapshot: &CanvasSnapshot, width: f64, height: f64) -> Self {
        Self {
            lines: snapshot.lines().to_vec(),
            shapes: Vec::new(),
            texts: snapshot.texts().to_vec(),
            emojis: snapshot.emojis().to_vec(),
            stickers: snapshot.stickers().to_vec(),
            signatures: snapshot.signatures().to_vec(),
            width,
            height,
        }
    }

    /// Split into the entity collections and the canvas size.
    pub fn into_snapshot(self) -> (CanvasSnapshot, f64, f64) {
        let snapshot = CanvasSnapshot {
            lines: self.lines,
            texts: self.texts,
            emojis: self.emojis,
            stickers: self.stickers,
            signatures: self.signatures,
        };
        (snapshot, self.width, self.height)
    }

    /// Check if the document holds no entities.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.texts.is_empty()
            && self.emojis.is_empty()
            && self.stickers.is_empty()
            && self.signatures.is_empty()
    }

    /// Serialize the document to compact JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Encode)
    }

    /// Serialize the document to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Encode)
    }

    /// Parse a document, recovering from missing or malformed fields.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        Self::from_value(&value)
    }

    /// Read a document out of an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let map = value.as_object().ok_or(DocumentError::NotAnObject)?;

        Ok(Self {
            lines: collection(map, "lines"),
            shapes: Vec::new(),
            texts: collection(map, "texts"),
            emojis: collection(map, "emojis"),
            stickers: collection(map, "stickers"),
            signatures: collection(map, "signatures"),
            width: dimension(map, "width", DEFAULT_CANVAS_WIDTH),
            height: dimension(map, "height", DEFAULT_CANVAS_HEIGHT),
        })
    }
}

/// Decode the array under `key`, skipping entries that do not parse.
fn collection<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Vec<T> {
    match map.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match T::deserialize(item) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    log::warn!("Skipping malformed {}[{}]: {}", key, index, e);
                    None
                }
            })
            .collect(),
        Some(_) => {
            log::warn!("Ignoring '{}': expected an array", key);
            Vec::new()
        }
    }
}

/// Read a positive pixel dimension, or fall back to `default`.
fn dimension(map: &Map<String, Value>, key: &str, default: u32) -> f64 {
    let Some(value) = map.get(key) else {
        return f64::from(default);
    };

    match value.as_f64().filter(|v| v.is_finite() && *v > 0.0) {
        Some(v) => v,
        None => {
            log::warn!("Ignoring {} = {}, using {}", key, value, default);
            f64::from(default)
        }
    }
}

fn write_dimension<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(value) {
        serializer.serialize_u64(*value as u64)
    } else {
        serializer.serialize_f64(*value)
    }
}
