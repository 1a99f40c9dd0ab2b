//! Generated handwritten signatures.

use super::Stroke;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A name rendered as a set of hand-drawn strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<Stroke>,
}

impl Signature {
    pub fn new(name: impl Into<String>, anchor: Point, lines: Vec<Stroke>) -> Self {
        Self {
            name: name.into(),
            x: anchor.x,
            y: anchor.y,
            lines,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Union of the stroke bounds, or a zero-size rect at the anchor.
    pub fn bounds(&self) -> Rect {
        self.lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(Stroke::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
            .unwrap_or_else(|| Rect::from_points(self.anchor(), self.anchor()))
    }
}
