//! Freehand strokes.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which brush produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    #[default]
    Pen,
    Eraser,
}

/// How a stroke is blended onto the layer beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositing {
    /// Paint over what is already there.
    SourceOver,
    /// Punch out what is already there.
    DestinationOut,
}

impl Compositing {
    /// Canvas 2D `globalCompositeOperation` name.
    pub fn css_name(&self) -> &'static str {
        match self {
            Compositing::SourceOver => "source-over",
            Compositing::DestinationOut => "destination-out",
        }
    }
}

/// A polyline drawn with the pen or eraser.
///
/// Points are stored flattened as `[x0, y0, x1, y1, ...]`, which is also the
/// layout used by the canvas document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub tool: StrokeTool,
    pub points: Vec<f64>,
    pub color: String,
    pub stroke_width: f64,
}

impl Stroke {
    /// Create an empty stroke.
    pub fn new(tool: StrokeTool, color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            tool,
            points: Vec::new(),
            color: color.into(),
            stroke_width,
        }
    }

    /// Create a stroke from a list of points.
    pub fn from_points(
        tool: StrokeTool,
        points: &[Point],
        color: impl Into<String>,
        stroke_width: f64,
    ) -> Self {
        let mut stroke = Self::new(tool, color, stroke_width);
        stroke.points.reserve(points.len() * 2);
        for point in points {
            stroke.add_point(*point);
        }
        stroke
    }

    /// Append a sampled point.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point.x);
        self.points.push(point.y);
    }

    /// Number of (x, y) pairs. A dangling odd coordinate is ignored.
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Iterate the stroke's points in drawing order.
    pub fn iter_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    pub fn compositing(&self) -> Compositing {
        match self.tool {
            StrokeTool::Pen => Compositing::SourceOver,
            StrokeTool::Eraser => Compositing::DestinationOut,
        }
    }

    /// Bounding box including half the stroke width on each side.
    pub fn bounds(&self) -> Rect {
        let mut points = self.iter_points();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };

        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let pad = self.stroke_width / 2.0;
        Rect::new(min_x, min_y, max_x, max_y).inflate(pad, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_points() {
        let mut stroke = Stroke::new(StrokeTool::Pen, "#000000", 2.0);
        assert!(stroke.is_empty());

        stroke.add_point(Point::new(0.0, 0.0));
        stroke.add_point(Point::new(10.0, 10.0));
        assert_eq!(stroke.point_count(), 2);
        assert_eq!(stroke.points, vec![0.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_bounds() {
        let stroke = Stroke::from_points(
            StrokeTool::Pen,
            &[
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            "#000000",
            4.0,
        );

        let bounds = stroke.bounds();
        assert!((bounds.x0 + 2.0).abs() < f64::EPSILON);
        assert!((bounds.y0 + 2.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 102.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 102.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_eraser_compositing() {
        let pen = Stroke::new(StrokeTool::Pen, "#000000", 2.0);
        let eraser = Stroke::new(StrokeTool::Eraser, "white", 2.0);
        assert_eq!(pen.compositing(), Compositing::SourceOver);
        assert_eq!(eraser.compositing().css_name(), "destination-out");
    }

    #[test]
    fn test_wire_format() {
        let stroke = Stroke::from_points(
            StrokeTool::Eraser,
            &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            "white",
            5.0,
        );
        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json["tool"], "eraser");
        assert_eq!(json["strokeWidth"], 5.0);
        assert_eq!(json["points"], serde_json::json!([1.0, 2.0, 3.0, 4.0]));
    }
}
