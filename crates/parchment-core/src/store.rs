//! Entity store: the live entity collections plus the active tool configuration.

use crate::entities::{
    EmojiMark, Entity, EntityRef, Signature, StickerMark, Stroke, TextAnnotation,
};
use crate::tools::ToolConfig;
use kurbo::Rect;

/// The five entity collections at one point in time.
///
/// Snapshots own their data; changing the live store never reaches back into a
/// snapshot taken earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSnapshot {
    pub(crate) lines: Vec<Stroke>,
    pub(crate) texts: Vec<TextAnnotation>,
    pub(crate) emojis: Vec<EmojiMark>,
    pub(crate) stickers: Vec<StickerMark>,
    pub(crate) signatures: Vec<Signature>,
}

impl CanvasSnapshot {
    pub fn lines(&self) -> &[Stroke] {
        &self.lines
    }

    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    pub fn emojis(&self) -> &[EmojiMark] {
        &self.emojis
    }

    pub fn stickers(&self) -> &[StickerMark] {
        &self.stickers
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Total number of entities across all collections.
    pub fn entity_count(&self) -> usize {
        self.lines.len()
            + self.texts.len()
            + self.emojis.len()
            + self.stickers.len()
            + self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Every entity in paint order: strokes, texts, emoji, stickers, then
    /// signatures, each collection in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.lines
            .iter()
            .map(EntityRef::Stroke)
            .chain(self.texts.iter().map(EntityRef::Text))
            .chain(self.emojis.iter().map(EntityRef::Emoji))
            .chain(self.stickers.iter().map(EntityRef::Sticker))
            .chain(self.signatures.iter().map(EntityRef::Signature))
    }
}

/// Authoritative entity collections for a board.
///
/// Outside the crate the store is read-only; entities enter it through the
/// board so that every commit is followed by a history snapshot.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: CanvasSnapshot,
    config: ToolConfig,
}

impl EntityStore {
    pub(crate) fn new(config: ToolConfig) -> Self {
        Self {
            entities: CanvasSnapshot::default(),
            config,
        }
    }

    pub(crate) fn add_stroke(&mut self, stroke: Stroke) {
        self.entities.lines.push(stroke);
    }

    pub(crate) fn add_text(&mut self, text: TextAnnotation) {
        self.entities.texts.push(text);
    }

    pub(crate) fn add_emoji(&mut self, emoji: EmojiMark) {
        self.entities.emojis.push(emoji);
    }

    pub(crate) fn add_sticker(&mut self, sticker: StickerMark) {
        self.entities.stickers.push(sticker);
    }

    pub(crate) fn add_signature(&mut self, signature: Signature) {
        self.entities.signatures.push(signature);
    }

    /// Append an entity to the collection for its kind.
    pub(crate) fn add(&mut self, entity: Entity) {
        match entity {
            Entity::Stroke(e) => self.add_stroke(e),
            Entity::Text(e) => self.add_text(e),
            Entity::Emoji(e) => self.add_emoji(e),
            Entity::Sticker(e) => self.add_sticker(e),
            Entity::Signature(e) => self.add_signature(e),
        }
    }

    /// Empty every collection. Tool configuration is kept.
    pub(crate) fn clear(&mut self) {
        self.entities = CanvasSnapshot::default();
    }

    /// Copy the collections out.
    pub(crate) fn snapshot(&self) -> CanvasSnapshot {
        self.entities.clone()
    }

    /// Replace the collections wholesale.
    pub(crate) fn restore(&mut self, snapshot: CanvasSnapshot) {
        self.entities = snapshot;
    }

    pub(crate) fn config_mut(&mut self) -> &mut ToolConfig {
        &mut self.config
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Borrow the live collections.
    pub fn collections(&self) -> &CanvasSnapshot {
        &self.entities
    }

    /// Walk the live entities in draw order.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.entities.iter()
    }

    pub fn lines(&self) -> &[Stroke] {
        self.entities.lines()
    }

    pub fn texts(&self) -> &[TextAnnotation] {
        self.entities.texts()
    }

    pub fn emojis(&self) -> &[EmojiMark] {
        self.entities.emojis()
    }

    pub fn stickers(&self) -> &[StickerMark] {
        self.entities.stickers()
    }

    pub fn signatures(&self) -> &[Signature] {
        self.entities.signatures()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.entity_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bounding box of everything on the canvas.
    pub fn bounds(&self) -> Option<Rect> {
        self.entities()
            .map(|entity| entity.bounds())
            .reduce(|acc, bounds| acc.union(bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, StrokeTool};
    use kurbo::Point;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        Stroke::from_points(StrokeTool::Pen, &points, "#000000", 2.0)
    }

    #[test]
    fn test_store_creation() {
        let store = EntityStore::default();
        assert!(store.is_empty());
        assert!(store.bounds().is_none());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = EntityStore::default();
        store.add_stroke(stroke(&[(0.0, 0.0), (1.0, 1.0)]));
        store.add_stroke(stroke(&[(5.0, 5.0), (6.0, 6.0)]));
        store.add(Entity::Emoji(EmojiMark::new(Point::ZERO, "🔥", 48.0)));

        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.lines()[0].points[0], 0.0);
        assert_eq!(store.lines()[1].points[0], 5.0);
        assert_eq!(store.emojis().len(), 1);
        assert_eq!(store.entity_count(), 3);
    }

    #[test]
    fn test_store_accepts_empty_stroke() {
        let mut store = EntityStore::default();
        store.add_stroke(Stroke::new(StrokeTool::Pen, "#000000", 2.0));
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn test_clear_keeps_config() {
        let mut store = EntityStore::default();
        store.config_mut().color = "#ff0000".to_string();
        store.add_text(TextAnnotation::new(Point::ZERO, "hi", "Virgil", 24.0, "#ff0000"));
        store.add_sticker(StickerMark::new(Point::ZERO, "★", "star", 48.0, "#ff0000"));

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.config().color, "#ff0000");
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut store = EntityStore::default();
        store.add_stroke(stroke(&[(0.0, 0.0), (1.0, 1.0)]));
        let snapshot = store.snapshot();

        store.add_stroke(stroke(&[(2.0, 2.0), (3.0, 3.0)]));

        assert_eq!(snapshot.lines().len(), 1);
        assert_eq!(store.lines().len(), 2);

        store.restore(snapshot);
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn test_draw_order() {
        let mut store = EntityStore::default();
        store.add_signature(Signature::new("Ada", Point::ZERO, Vec::new()));
        store.add_emoji(EmojiMark::new(Point::ZERO, "⭐", 48.0));
        store.add_stroke(stroke(&[(0.0, 0.0), (1.0, 1.0)]));
        store.add_text(TextAnnotation::new(Point::ZERO, "hi", "Virgil", 24.0, "#000000"));

        let kinds: Vec<EntityKind> = store.entities().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Stroke,
                EntityKind::Text,
                EntityKind::Emoji,
                EntityKind::Signature
            ]
        );
        assert_eq!(
            store.entities().next().map(|e| e.cloned()),
            Some(Entity::Stroke(store.lines()[0].clone()))
        );
    }

    #[test]
    fn test_bounds() {
        let mut store = EntityStore::default();
        store.add_stroke(stroke(&[(0.0, 0.0), (10.0, 10.0)]));
        store.add_stroke(stroke(&[(50.0, 50.0), (60.0, 70.0)]));

        let bounds = store.bounds().unwrap();
        assert!((bounds.x0 + 1.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 71.0).abs() < f64::EPSILON);
    }
}
