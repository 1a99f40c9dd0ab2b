//! Single-click glyph marks: emoji and stickers.

use super::glyph_bounds;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An emoji stamped onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiMark {
    pub x: f64,
    pub y: f64,
    pub emoji: String,
    pub font_size: f64,
}

impl EmojiMark {
    pub fn new(position: Point, emoji: impl Into<String>, font_size: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            emoji: emoji.into(),
            font_size,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        glyph_bounds(self.position(), self.font_size)
    }
}

/// A catalog icon stamped onto the canvas, tinted with a fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMark {
    pub x: f64,
    pub y: f64,
    /// The glyph drawn for the sticker.
    pub sticker: String,
    /// Catalog name of the sticker.
    pub name: String,
    pub font_size: f64,
    pub fill: String,
}

impl StickerMark {
    pub fn new(
        position: Point,
        sticker: impl Into<String>,
        name: impl Into<String>,
        font_size: f64,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            x: position.x,
            y: position.y,
            sticker: sticker.into(),
            name: name.into(),
            font_size,
            fill: fill.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        glyph_bounds(self.position(), self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_wire_format() {
        let sticker = StickerMark::new(Point::new(1.0, 2.0), "★", "star", 48.0, "#2c3e50");
        let json = serde_json::to_value(&sticker).unwrap();
        assert_eq!(json["sticker"], "★");
        assert_eq!(json["name"], "star");
        assert_eq!(json["fontSize"], 48.0);
    }

    #[test]
    fn test_emoji_position() {
        let emoji = EmojiMark::new(Point::new(3.0, 4.0), "🎨", 48.0);
        assert_eq!(emoji.position(), Point::new(3.0, 4.0));
        assert!(emoji.bounds().contains(Point::new(10.0, 10.0)));
    }
}
