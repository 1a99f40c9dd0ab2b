//! Drawable entities placed on the canvas.

mod mark;
mod signature;
mod stroke;
mod text;

pub use mark::{EmojiMark, StickerMark};
pub use signature::Signature;
pub use stroke::{Compositing, Stroke, StrokeTool};
pub use text::TextAnnotation;

use kurbo::{Point, Rect};

/// Closed set of entity categories held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Stroke,
    Text,
    Emoji,
    Sticker,
    Signature,
}

impl EntityKind {
    /// Key of the collection holding this kind in the canvas document.
    pub fn document_key(&self) -> &'static str {
        match self {
            EntityKind::Stroke => "lines",
            EntityKind::Text => "texts",
            EntityKind::Emoji => "emojis",
            EntityKind::Sticker => "stickers",
            EntityKind::Signature => "signatures",
        }
    }
}

/// A finished entity, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Stroke(Stroke),
    Text(TextAnnotation),
    Emoji(EmojiMark),
    Sticker(StickerMark),
    Signature(Signature),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Stroke(_) => EntityKind::Stroke,
            Entity::Text(_) => EntityKind::Text,
            Entity::Emoji(_) => EntityKind::Emoji,
            Entity::Sticker(_) => EntityKind::Sticker,
            Entity::Signature(_) => EntityKind::Signature,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Entity::Stroke(e) => e.bounds(),
            Entity::Text(e) => e.bounds(),
            Entity::Emoji(e) => e.bounds(),
            Entity::Sticker(e) => e.bounds(),
            Entity::Signature(e) => e.bounds(),
        }
    }
}

/// A borrowed entity, as yielded when walking the store in draw order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRef<'a> {
    Stroke(&'a Stroke),
    Text(&'a TextAnnotation),
    Emoji(&'a EmojiMark),
    Sticker(&'a StickerMark),
    Signature(&'a Signature),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Stroke(_) => EntityKind::Stroke,
            EntityRef::Text(_) => EntityKind::Text,
            EntityRef::Emoji(_) => EntityKind::Emoji,
            EntityRef::Sticker(_) => EntityKind::Sticker,
            EntityRef::Signature(_) => EntityKind::Signature,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Stroke(e) => e.bounds(),
            EntityRef::Text(e) => e.bounds(),
            EntityRef::Emoji(e) => e.bounds(),
            EntityRef::Sticker(e) => e.bounds(),
            EntityRef::Signature(e) => e.bounds(),
        }
    }

    pub fn cloned(&self) -> Entity {
        match *self {
            EntityRef::Stroke(e) => Entity::Stroke(e.clone()),
            EntityRef::Text(e) => Entity::Text(e.clone()),
            EntityRef::Emoji(e) => Entity::Emoji(e.clone()),
            EntityRef::Sticker(e) => Entity::Sticker(e.clone()),
            EntityRef::Signature(e) => Entity::Signature(e.clone()),
        }
    }
}

/// Bounds of a glyph drawn with its top-left corner at `position`.
pub(crate) fn glyph_bounds(position: Point, font_size: f64) -> Rect {
    Rect::new(
        position.x,
        position.y,
        position.x + font_size,
        position.y + font_size * 1.2,
    )
}
