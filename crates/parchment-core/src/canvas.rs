//! The board: entity store, history and tools for one drawing session.

use crate::config::BoardConfig;
use crate::document::{CanvasDocument, DocumentError};
use crate::entities::{EntityKind, Stroke};
use crate::history::History;
use crate::input::{KeyCommand, KeyEvent, PointerEvent};
use crate::signature::SignatureGenerator;
use crate::store::EntityStore;
use crate::tools::{StickerChoice, ToolConfig, ToolKind, ToolManager, ToolOutcome, ToolState};
use crate::upload::{RasterSnapshot, Submission};
use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What a board input did, for the front end to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardEvent {
    /// An entity was appended and a history snapshot taken.
    Committed(EntityKind),
    StrokeStarted,
    /// A stroke ended or was aborted without being committed.
    StrokeDiscarded,
    /// Show the inline text box at `anchor`.
    TextEditingStarted { anchor: Point },
    /// Ask the user for a signature name; answer with
    /// [`Board::submit_signature_name`].
    SignatureNameRequested { anchor: Point },
    /// Pending text or signature input was dropped.
    Cancelled,
}

/// A drawing session.
///
/// The board owns all canvas state. Entities only enter the store through its
/// input methods, and every commit is followed by a history snapshot.
#[derive(Debug, Clone)]
pub struct Board<R = StdRng> {
    store: EntityStore,
    history: History,
    tools: ToolManager,
    signatures: SignatureGenerator<R>,
    width: f64,
    height: f64,
}

impl Default for Board<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Board<StdRng> {
    /// Create a board with default settings.
    pub fn new() -> Self {
        Self::with_config(&BoardConfig::default())
    }

    /// Create a board from a configuration, with OS-seeded signatures.
    pub fn with_config(config: &BoardConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> Board<R> {
    /// Create a board whose signatures draw from `rng`.
    pub fn with_rng(config: &BoardConfig, rng: R) -> Self {
        Self {
            store: EntityStore::new(ToolConfig::from(config)),
            history: History::new(config.history_limit),
            tools: ToolManager::new(),
            signatures: SignatureGenerator::with_rng(rng),
            width: f64::from(config.canvas_width),
            height: f64::from(config.canvas_height),
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &ToolConfig {
        self.store.config()
    }

    pub fn tool_state(&self) -> &ToolState {
        self.tools.state()
    }

    /// The stroke under the pointer, for live preview.
    pub fn preview_stroke(&self) -> Option<&Stroke> {
        self.tools.preview_stroke()
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    // --- Tool configuration ---

    /// Switch tools. Anything in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if let Some(outcome) = self.tools.cancel() {
            log::debug!("Tool switch to {:?} dropped {:?}", tool, outcome);
        }
        self.store.config_mut().tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.store.config_mut().color = color.into();
    }

    pub fn set_brush_size(&mut self, size: f64) {
        if let Some(size) = positive(size, "brush size") {
            self.store.config_mut().brush_size = size;
        }
    }

    pub fn set_font_size(&mut self, size: f64) {
        if let Some(size) = positive(size, "font size") {
            self.store.config_mut().font_size = size;
        }
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.store.config_mut().font_family = family.into();
    }

    /// Arm an emoji and switch to the emoji tool.
    pub fn select_emoji(&mut self, emoji: impl Into<String>) {
        self.set_tool(ToolKind::Emoji);
        self.store.config_mut().selected_emoji = Some(emoji.into());
    }

    /// Arm a sticker and switch to the sticker tool.
    pub fn select_sticker(&mut self, sticker: impl Into<StickerChoice>) {
        self.set_tool(ToolKind::Sticker);
        self.store.config_mut().selected_sticker = Some(sticker.into());
    }

    // --- Input ---

    pub fn pointer_down(&mut self, point: Point) -> Option<BoardEvent> {
        let outcome = self.tools.pointer_down(point, self.store.config());
        self.apply(outcome)
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.tools.pointer_move(point);
    }

    pub fn pointer_up(&mut self) -> Option<BoardEvent> {
        let outcome = self.tools.pointer_up();
        self.apply(outcome)
    }

    /// Feed a mouse or touch event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<BoardEvent> {
        match event {
            PointerEvent::Down { position, source } => {
                if !source.is_primary() {
                    return None;
                }
                self.pointer_down(position)
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    /// Feed a keyboard event. Enter confirms text, Escape cancels pending input.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<BoardEvent> {
        match event.command()? {
            KeyCommand::Confirm => self.confirm_text(),
            KeyCommand::Cancel => self.cancel_input(),
        }
    }

    /// Replace the text in the open text box.
    pub fn update_text(&mut self, text: &str) {
        self.tools.update_text(text);
    }

    /// Close the text box, committing non-blank text.
    pub fn confirm_text(&mut self) -> Option<BoardEvent> {
        let outcome = self.tools.confirm_text(self.store.config());
        self.apply(outcome)
    }

    /// Close the text box or dismiss a signature request without committing.
    pub fn cancel_input(&mut self) -> Option<BoardEvent> {
        if !self.tools.is_awaiting_input() {
            return None;
        }
        let outcome = self.tools.cancel();
        self.apply(outcome)
    }

    /// Answer a [`BoardEvent::SignatureNameRequested`]. `None` means the user
    /// declined.
    pub fn submit_signature_name(&mut self, name: Option<&str>) -> Option<BoardEvent> {
        let outcome =
            self.tools
                .submit_signature_name(name, self.store.config(), &mut self.signatures);
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: Option<ToolOutcome>) -> Option<BoardEvent> {
        let event = match outcome? {
            ToolOutcome::Commit(entity) => {
                let kind = entity.kind();
                self.store.add(entity);
                self.history.snapshot(&self.store);
                log::debug!(
                    "Committed {:?}, history {} at step {:?}",
                    kind,
                    self.history.len(),
                    self.history.step()
                );
                BoardEvent::Committed(kind)
            }
            ToolOutcome::StrokeStarted => BoardEvent::StrokeStarted,
            ToolOutcome::StrokeDiscarded => BoardEvent::StrokeDiscarded,
            ToolOutcome::TextEditingStarted { anchor } => BoardEvent::TextEditingStarted { anchor },
            ToolOutcome::SignatureNameRequested { anchor } => {
                BoardEvent::SignatureNameRequested { anchor }
            }
            ToolOutcome::Cancelled => BoardEvent::Cancelled,
        };
        Some(event)
    }

    // --- History ---

    /// Undo the last commit.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.store)
    }

    /// Redo the last undone commit.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.store)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Remove every entity and forget all history. Tool settings are kept.
    pub fn clear_canvas(&mut self) {
        self.store.clear();
        self.history.clear();
        log::info!("Canvas cleared");
    }

    // --- Documents ---

    /// Export the canvas as a document.
    pub fn serialize(&self) -> CanvasDocument {
        CanvasDocument::from_snapshot(self.store.collections(), self.width, self.height)
    }

    /// Export the canvas as JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.serialize().to_json()
    }

    /// Replace the canvas with a JSON document.
    ///
    /// On error the board is left untouched.
    pub fn deserialize(&mut self, json: &str) -> Result<(), DocumentError> {
        let document = CanvasDocument::from_json(json).inspect_err(|e| {
            log::warn!("Failed to load canvas document: {}", e);
        })?;
        self.load_document(document);
        Ok(())
    }

    /// Replace the canvas with `document`. History restarts from the loaded state.
    pub fn load_document(&mut self, document: CanvasDocument) {
        self.tools.cancel();
        let (snapshot, width, height) = document.into_snapshot();
        log::info!(
            "Loaded document with {} entities ({}x{})",
            snapshot.entity_count(),
            width,
            height
        );
        self.store.restore(snapshot);
        self.history.reset(self.store.snapshot());
        self.width = width;
        self.height = height;
    }

    /// Whether the canvas has something worth submitting: at least one stroke.
    pub fn can_submit(&self) -> bool {
        !self.store.lines().is_empty()
    }

    /// Package the canvas and its rendered image for the upload collaborator.
    ///
    /// Returns `None` while the canvas has no strokes.
    pub fn prepare_submission(
        &self,
        raster: RasterSnapshot,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Option<Submission> {
        if !self.can_submit() {
            log::debug!("Nothing drawn yet, not preparing a submission");
            return None;
        }
        Some(Submission::new(self.serialize(), raster, title, description))
    }
}

fn positive(value: f64, what: &str) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        log::warn!("Ignoring {} {}", what, value);
        None
    }
}
