//! Static avatar catalog.

use serde::Serialize;

/// One avatar in the catalog: an emoji glyph and its display name.
///
/// The glyph is compared byte-for-byte, so variation selectors (as in "🕊️")
/// are part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AvatarToken {
    pub emoji: &'static str,
    pub name: &'static str,
}

const fn avatar(emoji: &'static str, name: &'static str) -> AvatarToken {
    AvatarToken { emoji, name }
}

/// The fixed, ordered catalog of animal avatars.
pub const CATALOG: &[AvatarToken] = &[
    avatar("🦇", "Fledermaus"),
    avatar("🦉", "Eule"),
    avatar("🦅", "Adler"),
    avatar("🦆", "Ente"),
    avatar("🦢", "Schwan"),
    avatar("🦜", "Papagei"),
    avatar("🦚", "Pfau"),
    avatar("🦩", "Flamingo"),
    avatar("🕊️", "Taube"),
    avatar("🦤", "Dodo"),
    avatar("🦝", "Waschbär"),
    avatar("🦨", "Stinktier"),
    avatar("🦡", "Dachs"),
    avatar("🦫", "Biber"),
    avatar("🦦", "Otter"),
    avatar("🦥", "Faultier"),
    avatar("🦘", "Känguru"),
    avatar("🦙", "Lama"),
    avatar("🦒", "Giraffe"),
    avatar("🦬", "Bison"),
    avatar("🦏", "Nashorn"),
    avatar("🦛", "Nilpferd"),
    avatar("🐆", "Leopard"),
    avatar("🐅", "Tiger"),
    avatar("🐊", "Krokodil"),
    avatar("🦈", "Hai"),
    avatar("🐋", "Wal"),
    avatar("🐬", "Delfin"),
    avatar("🦭", "Robbe"),
    avatar("🦎", "Eidechse"),
    avatar("🐢", "Schildkröte"),
    avatar("🦕", "Sauropode"),
    avatar("🦖", "T-Rex"),
    avatar("🦟", "Mücke"),
    avatar("🕷️", "Spinne"),
    avatar("🦂", "Skorpion"),
    avatar("🐙", "Oktopus"),
    avatar("🦑", "Kalmar"),
    avatar("🪼", "Qualle"),
];

/// Looks up a catalog entry by its glyph.
pub fn find(emoji: &str) -> Option<&'static AvatarToken> {
    CATALOG.iter().find(|t| t.emoji == emoji)
}

pub fn contains(emoji: &str) -> bool {
    find(emoji).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_unique_and_bounded() {
        let glyphs: HashSet<_> = CATALOG.iter().map(|t| t.emoji).collect();
        assert_eq!(glyphs.len(), CATALOG.len());
        assert!(CATALOG.len() <= 40);
    }

    #[test]
    fn test_find_respects_variation_selector() {
        assert_eq!(find("🕊️").map(|t| t.name), Some("Taube"));
        // bare dove without U+FE0F is a different token
        assert!(find("\u{1F54A}").is_none());
    }

    #[test]
    fn test_contains_rejects_foreign_tokens() {
        assert!(!contains("🦊"));
        assert!(contains("🦦"));
    }
}
