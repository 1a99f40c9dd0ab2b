//! Text annotations.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A line of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub fill: String,
}

impl TextAnnotation {
    pub fn new(
        position: Point,
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text: text.into(),
            font_size,
            font_family: font_family.into(),
            fill: fill.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Approximate bounds; real glyph metrics belong to the renderer.
    pub fn bounds(&self) -> Rect {
        let widest = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let line_count = self.text.lines().count().max(1);

        // Average advance is a bit over half the em size for most faces.
        let width = widest as f64 * self.font_size * 0.55;
        let height = line_count as f64 * self.font_size * 1.2;
        Rect::new(self.x, self.y, self.x + width, self.y + height)
    }
}
