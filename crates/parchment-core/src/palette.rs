//! Built-in emoji palette, sticker catalog and font list.

/// Emoji offered by the picker.
pub const EMOJIS: &[&str] = &[
    "😀", "😂", "😍", "🤔", "😎", "🤩",
    "😭", "😱", "🔥", "💯", "✨", "❤️",
    "👍", "👎", "👏", "🙌", "💪", "🎉",
    "🎨", "🖌️", "✏️", "📝", "💡", "⭐",
];

/// A sticker entry: the glyph drawn and the name it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSticker {
    pub icon: &'static str,
    pub name: &'static str,
}

const fn sticker(icon: &'static str, name: &'static str) -> CatalogSticker {
    CatalogSticker { icon, name }
}

/// Stickers offered by the picker, grouped as shapes, arrows and symbols.
pub const STICKERS: &[CatalogSticker] = &[
    sticker("■", "square"),
    sticker("●", "circle"),
    sticker("▲", "triangle"),
    sticker("♦", "diamond"),
    sticker("→", "arrow-right"),
    sticker("←", "arrow-left"),
    sticker("↑", "arrow-up"),
    sticker("↓", "arrow-down"),
    sticker("↗", "arrow-diagonal"),
    sticker("↻", "arrow-circle"),
    sticker("⇒", "double-arrow"),
    sticker("⇄", "bidirectional"),
    sticker("★", "star"),
    sticker("☆", "star-outline"),
    sticker("♥", "heart"),
    sticker("☀", "sun"),
    sticker("☁", "cloud"),
    sticker("☂", "umbrella"),
    sticker("✓", "checkmark"),
    sticker("✗", "cross"),
];

/// Font families offered for text annotations.
pub const FONT_FAMILIES: &[&str] = &["Virgil", "Arial", "Georgia", "Courier New", "Comic Sans MS"];

/// Look up a catalog sticker by name.
pub fn find_sticker(name: &str) -> Option<&'static CatalogSticker> {
    STICKERS.iter().find(|s| s.name == name)
}
