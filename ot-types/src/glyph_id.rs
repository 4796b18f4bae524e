//! Glyph identifiers.
//!
//! Although these are treated as plain `u16`s in the OpenType spec, we give them a distinct
//! type so a glyph id can never be silently mixed up with a codepoint or a class id.

use crate::raw::Scalar;

/// A 16-bit glyph identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u16);

impl GlyphId {
    /// The identifier reserved for "glyph not found".
    pub const NOTDEF: GlyphId = GlyphId(0);

    /// Construct a new `GlyphId`.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        GlyphId(raw)
    }

    /// The identifier as a `u16`.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for GlyphId {
    #[inline]
    fn from(raw: u16) -> Self {
        GlyphId(raw)
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gid{}", self.0)
    }
}

impl Scalar for GlyphId {
    const SIZE: usize = 2;

    #[inline]
    fn read(bytes: &[u8]) -> Option<Self> {
        u16::read(bytes).map(GlyphId)
    }
}
