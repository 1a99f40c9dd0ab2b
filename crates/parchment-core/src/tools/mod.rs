//! Tool system: turns pointer and keyboard input into entities.

use crate::config::BoardConfig;
use crate::entities::{EmojiMark, Entity, Signature, StickerMark, Stroke, StrokeTool, TextAnnotation};
use crate::palette::CatalogSticker;
use crate::signature::SignatureGenerator;
use kurbo::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Text,
    Emoji,
    Sticker,
    Signature,
}

impl ToolKind {
    /// Stroke tag for tools that draw strokes.
    pub fn stroke_tool(&self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            ToolKind::Text | ToolKind::Emoji | ToolKind::Sticker | ToolKind::Signature => None,
        }
    }
}

/// The sticker currently armed for placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerChoice {
    pub icon: String,
    pub name: String,
}

impl From<&CatalogSticker> for StickerChoice {
    fn from(sticker: &CatalogSticker) -> Self {
        Self {
            icon: sticker.icon.to_string(),
            name: sticker.name.to_string(),
        }
    }
}

/// Active tool and brush settings applied to new entities.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub tool: ToolKind,
    pub color: String,
    pub brush_size: f64,
    pub font_size: f64,
    pub font_family: String,
    pub selected_emoji: Option<String>,
    pub selected_sticker: Option<StickerChoice>,
    /// Glyph size for emoji and stickers.
    pub mark_size: f64,
    pub eraser_color: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::from(&BoardConfig::default())
    }
}

impl From<&BoardConfig> for ToolConfig {
    fn from(config: &BoardConfig) -> Self {
        Self {
            tool: ToolKind::default(),
            color: config.color.clone(),
            brush_size: config.brush_size,
            font_size: config.font_size,
            font_family: config.font_family.clone(),
            selected_emoji: None,
            selected_sticker: None,
            mark_size: config.mark_size,
            eraser_color: config.eraser_color.clone(),
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A pen or eraser stroke is being drawn.
    Drawing { stroke: Stroke },
    /// The inline text box is open at `anchor`.
    TextEditing { anchor: Point, text: String },
    /// A signature was placed at `anchor` and the front end was asked for a name.
    AwaitingSignatureName { anchor: Point },
}

/// Result of feeding one input into the tool machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// A finished entity to append to the store.
    Commit(Entity),
    StrokeStarted,
    /// The in-progress stroke was too short and was dropped.
    StrokeDiscarded,
    TextEditingStarted { anchor: Point },
    SignatureNameRequested { anchor: Point },
    /// Pending text or signature input was abandoned.
    Cancelled,
}

/// Drives the tool state machine.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Check if a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// Check if input is pending from the user (text box or signature name).
    pub fn is_awaiting_input(&self) -> bool {
        matches!(
            self.state,
            ToolState::TextEditing { .. } | ToolState::AwaitingSignatureName { .. }
        )
    }

    /// The stroke being drawn, for live preview.
    pub fn preview_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            ToolState::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// Begin an interaction at `point` with the active tool.
    pub fn pointer_down(&mut self, point: Point, config: &ToolConfig) -> Option<ToolOutcome> {
        if !matches!(self.state, ToolState::Idle) {
            // Drawing: a second press mid-gesture is ignored.
            // Text editing or awaiting a name: the canvas is inert.
            return None;
        }

        match config.tool {
            ToolKind::Pen | ToolKind::Eraser => {
                let tool = config.tool.stroke_tool().unwrap_or_default();
                let color = match tool {
                    StrokeTool::Pen => config.color.clone(),
                    StrokeTool::Eraser => config.eraser_color.clone(),
                };
                let mut stroke = Stroke::new(tool, color, config.brush_size);
                stroke.add_point(point);
                self.state = ToolState::Drawing { stroke };
                Some(ToolOutcome::StrokeStarted)
            }
            ToolKind::Text => {
                self.state = ToolState::TextEditing {
                    anchor: point,
                    text: String::new(),
                };
                Some(ToolOutcome::TextEditingStarted { anchor: point })
            }
            ToolKind::Emoji => {
                let emoji = config.selected_emoji.as_ref()?;
                Some(ToolOutcome::Commit(Entity::Emoji(EmojiMark::new(
                    point,
                    emoji.clone(),
                    config.mark_size,
                ))))
            }
            ToolKind::Sticker => {
                let sticker = config.selected_sticker.as_ref()?;
                Some(ToolOutcome::Commit(Entity::Sticker(StickerMark::new(
                    point,
                    sticker.icon.clone(),
                    sticker.name.clone(),
                    config.mark_size,
                    config.color.clone(),
                ))))
            }
            ToolKind::Signature => {
                self.state = ToolState::AwaitingSignatureName { anchor: point };
                Some(ToolOutcome::SignatureNameRequested { anchor: point })
            }
        }
    }

    /// Extend the in-progress stroke. No-op in any other state.
    pub fn pointer_move(&mut self, point: Point) {
        if let ToolState::Drawing { stroke } = &mut self.state {
            stroke.add_point(point);
        }
    }

    /// Finish the in-progress stroke.
    pub fn pointer_up(&mut self) -> Option<ToolOutcome> {
        if !self.is_drawing() {
            return None;
        }
        let ToolState::Drawing { stroke } = std::mem::take(&mut self.state) else {
            return None;
        };

        if stroke.point_count() < 2 {
            log::debug!("Discarding stroke with {} point(s)", stroke.point_count());
            Some(ToolOutcome::StrokeDiscarded)
        } else {
            Some(ToolOutcome::Commit(Entity::Stroke(stroke)))
        }
    }

    /// Replace the pending text while the text box is open.
    pub fn update_text(&mut self, value: &str) {
        if let ToolState::TextEditing { text, .. } = &mut self.state {
            value.clone_into(text);
        }
    }

    /// Close the text box, committing its text unless it is blank.
    pub fn confirm_text(&mut self, config: &ToolConfig) -> Option<ToolOutcome> {
        if !matches!(self.state, ToolState::TextEditing { .. }) {
            return None;
        }
        let ToolState::TextEditing { anchor, text } = std::mem::take(&mut self.state) else {
            return None;
        };

        if text.trim().is_empty() {
            log::debug!("Ignoring empty text annotation");
            return Some(ToolOutcome::Cancelled);
        }
        Some(ToolOutcome::Commit(Entity::Text(TextAnnotation::new(
            anchor,
            text,
            config.font_family.clone(),
            config.font_size,
            config.color.clone(),
        ))))
    }

    /// Answer a pending signature request.
    ///
    /// A blank or missing name abandons the signature.
    pub fn submit_signature_name<R: Rng>(
        &mut self,
        name: Option<&str>,
        config: &ToolConfig,
        generator: &mut SignatureGenerator<R>,
    ) -> Option<ToolOutcome> {
        let ToolState::AwaitingSignatureName { anchor } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;

        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            log::debug!("Signature request dismissed without a name");
            return Some(ToolOutcome::Cancelled);
        };

        let lines = generator.generate(name, anchor, &config.color);
        Some(ToolOutcome::Commit(Entity::Signature(Signature::new(
            name, anchor, lines,
        ))))
    }

    /// Abandon whatever is in progress without committing anything.
    pub fn cancel(&mut self) -> Option<ToolOutcome> {
        match std::mem::take(&mut self.state) {
            ToolState::Idle => None,
            ToolState::Drawing { stroke } => {
                log::debug!("Aborting stroke with {} point(s)", stroke.point_count());
                Some(ToolOutcome::StrokeDiscarded)
            }
            ToolState::TextEditing { .. } | ToolState::AwaitingSignatureName { .. } => {
                Some(ToolOutcome::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::find_sticker;

    fn config(tool: ToolKind) -> ToolConfig {
        ToolConfig {
            tool,
            ..ToolConfig::default()
        }
    }

    #[test]
    fn test_pen_interaction() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Pen);

        assert!(!tm.is_drawing());
        assert_eq!(
            tm.pointer_down(Point::new(0.0, 0.0), &config),
            Some(ToolOutcome::StrokeStarted)
        );
        assert!(tm.is_drawing());

        tm.pointer_move(Point::new(5.0, 5.0));
        tm.pointer_move(Point::new(10.0, 5.0));
        assert_eq!(tm.preview_stroke().map(Stroke::point_count), Some(3));

        let Some(ToolOutcome::Commit(Entity::Stroke(stroke))) = tm.pointer_up() else {
            panic!("expected a committed stroke");
        };
        assert_eq!(stroke.points, vec![0.0, 0.0, 5.0, 5.0, 10.0, 5.0]);
        assert_eq!(stroke.color, config.color);
        assert_eq!(stroke.stroke_width, config.brush_size);
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_single_point_stroke_discarded() {
        let mut tm = ToolManager::new();
        tm.pointer_down(Point::new(3.0, 3.0), &config(ToolKind::Pen));
        assert_eq!(tm.pointer_up(), Some(ToolOutcome::StrokeDiscarded));
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_eraser_uses_eraser_color() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Eraser);
        tm.pointer_down(Point::new(0.0, 0.0), &config);
        tm.pointer_move(Point::new(1.0, 1.0));

        let Some(ToolOutcome::Commit(Entity::Stroke(stroke))) = tm.pointer_up() else {
            panic!("expected a committed stroke");
        };
        assert_eq!(stroke.tool, StrokeTool::Eraser);
        assert_eq!(stroke.color, "white");
    }

    #[test]
    fn test_move_and_up_while_idle_are_noops() {
        let mut tm = ToolManager::new();
        tm.pointer_move(Point::new(1.0, 1.0));
        assert_eq!(tm.pointer_up(), None);
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_text_editing() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Text);
        let anchor = Point::new(40.0, 50.0);

        assert_eq!(
            tm.pointer_down(anchor, &config),
            Some(ToolOutcome::TextEditingStarted { anchor })
        );
        // The canvas ignores clicks while the text box is open.
        assert_eq!(tm.pointer_down(Point::new(1.0, 1.0), &config), None);

        tm.update_text(" Hello ");
        let Some(ToolOutcome::Commit(Entity::Text(text))) = tm.confirm_text(&config) else {
            panic!("expected a committed text");
        };
        assert_eq!(text.text, " Hello ");
        assert_eq!(text.position(), anchor);
        assert_eq!(text.font_size, config.font_size);
        assert_eq!(text.font_family, config.font_family);
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_blank_text_not_committed() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Text);
        tm.pointer_down(Point::ZERO, &config);
        tm.update_text("   ");
        assert_eq!(tm.confirm_text(&config), Some(ToolOutcome::Cancelled));
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_cancel_text() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Text);
        tm.pointer_down(Point::ZERO, &config);
        tm.update_text("draft");
        assert_eq!(tm.cancel(), Some(ToolOutcome::Cancelled));
        assert_eq!(tm.confirm_text(&config), None);
    }

    #[test]
    fn test_emoji_requires_selection() {
        let mut tm = ToolManager::new();
        let mut config = config(ToolKind::Emoji);
        assert_eq!(tm.pointer_down(Point::ZERO, &config), None);

        config.selected_emoji = Some("🎉".to_string());
        let Some(ToolOutcome::Commit(Entity::Emoji(emoji))) =
            tm.pointer_down(Point::new(7.0, 8.0), &config)
        else {
            panic!("expected a committed emoji");
        };
        assert_eq!(emoji.emoji, "🎉");
        assert_eq!(emoji.font_size, 48.0);
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_sticker_uses_current_color() {
        let mut tm = ToolManager::new();
        let mut config = config(ToolKind::Sticker);
        config.color = "#c0392b".to_string();
        config.selected_sticker = find_sticker("star").map(StickerChoice::from);

        let Some(ToolOutcome::Commit(Entity::Sticker(sticker))) =
            tm.pointer_down(Point::new(1.0, 2.0), &config)
        else {
            panic!("expected a committed sticker");
        };
        assert_eq!(sticker.sticker, "★");
        assert_eq!(sticker.name, "star");
        assert_eq!(sticker.fill, "#c0392b");
    }

    #[test]
    fn test_signature_request() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Signature);
        let mut generator = SignatureGenerator::seeded(1);
        let anchor = Point::new(100.0, 200.0);

        assert_eq!(
            tm.pointer_down(anchor, &config),
            Some(ToolOutcome::SignatureNameRequested { anchor })
        );
        assert!(tm.is_awaiting_input());

        let Some(ToolOutcome::Commit(Entity::Signature(signature))) =
            tm.submit_signature_name(Some("  Ada "), &config, &mut generator)
        else {
            panic!("expected a committed signature");
        };
        assert_eq!(signature.name, "Ada");
        assert_eq!(signature.anchor(), anchor);
        assert_eq!(signature.lines.len(), 4);
    }

    #[test]
    fn test_signature_without_name() {
        let mut tm = ToolManager::new();
        let config = config(ToolKind::Signature);
        let mut generator = SignatureGenerator::seeded(1);

        tm.pointer_down(Point::ZERO, &config);
        assert_eq!(
            tm.submit_signature_name(Some("   "), &config, &mut generator),
            Some(ToolOutcome::Cancelled)
        );

        tm.pointer_down(Point::ZERO, &config);
        assert_eq!(
            tm.submit_signature_name(None, &config, &mut generator),
            Some(ToolOutcome::Cancelled)
        );
        assert_eq!(tm.state(), &ToolState::Idle);
    }

    #[test]
    fn test_cancel_aborts_stroke() {
        let mut tm = ToolManager::new();
        tm.pointer_down(Point::ZERO, &config(ToolKind::Pen));
        tm.pointer_move(Point::new(4.0, 4.0));

        assert_eq!(tm.cancel(), Some(ToolOutcome::StrokeDiscarded));
        assert_eq!(tm.pointer_up(), None);
    }
}
