//! Parchment Core Library
//!
//! Platform-agnostic drawing engine for the Parchment sketch board: entities,
//! tools, undo history, procedural signatures and the canvas document format.
//! Rendering and networking live with the front end.

pub mod canvas;
pub mod config;
pub mod document;
pub mod entities;
pub mod history;
pub mod input;
pub mod palette;
pub mod signature;
pub mod storage;
pub mod store;
pub mod tools;
pub mod upload;

pub use canvas::{Board, BoardEvent};
pub use config::{BoardConfig, ConfigError};
pub use document::{CanvasDocument, DocumentError};
pub use entities::{
    Compositing, EmojiMark, Entity, EntityKind, EntityRef, Signature, StickerMark, Stroke, StrokeTool,
    TextAnnotation,
};
pub use history::History;
pub use input::{KeyCommand, KeyEvent, MouseButton, PointerEvent, PointerSource};
pub use signature::SignatureGenerator;
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use store::{CanvasSnapshot, EntityStore};
pub use tools::{StickerChoice, ToolConfig, ToolKind, ToolManager, ToolOutcome, ToolState};
pub use upload::{RasterSnapshot, Submission, UploadError, UploadReceipt, Uploader};
