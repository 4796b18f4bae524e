//! The `Font` interface the core consumes: immutable `GDEF`/`GSUB`/`GPOS` byte spans plus the
//! two callbacks the caller supplies for codepoint-to-glyph and glyph-to-advance lookup.

use ot_tables::{GdefTable, GlyphClass, LayoutTable};
use ot_types::GlyphId;

use crate::album::GlyphTraits;

/// Horizontal vs. vertical advance lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Horizontal,
    Vertical,
}

/// Everything the core needs from a font: the three layout tables it reads directly, and the
/// two glyph-level callbacks it cannot resolve itself (codepoint-to-glyph mapping and advance
/// widths live in the font's `cmap`/`hmtx`, which are out of this core's scope).
pub trait Font {
    fn gdef_bytes(&self) -> &[u8];
    fn gsub_bytes(&self) -> &[u8];
    fn gpos_bytes(&self) -> &[u8];

    fn glyph_for_codepoint(&self, codepoint: u32) -> GlyphId;
    fn advance_for_glyph(&self, layout: Layout, glyph: GlyphId) -> i32;

    fn gdef(&self) -> Option<GdefTable<'_>> {
        let bytes = self.gdef_bytes();
        if bytes.is_empty() {
            None
        } else {
            GdefTable::new(bytes)
        }
    }

    fn gsub(&self) -> Option<LayoutTable<'_>> {
        let bytes = self.gsub_bytes();
        if bytes.is_empty() {
            None
        } else {
            LayoutTable::new(bytes)
        }
    }

    fn gpos(&self) -> Option<LayoutTable<'_>> {
        let bytes = self.gpos_bytes();
        if bytes.is_empty() {
            None
        } else {
            LayoutTable::new(bytes)
        }
    }

    /// The basic trait (Base/Ligature/Mark) GDEF assigns `glyph`, or `GlyphTraits::BASE` if GDEF
    /// is absent or has no classification, matching the convention that an
    /// unclassified glyph defaults to acting as a base for iteration purposes.
    fn glyph_class_traits(&self, glyph: GlyphId) -> GlyphTraits {
        match self.gdef().and_then(|gdef| gdef.glyph_class(glyph)) {
            Some(GlyphClass::Base) => GlyphTraits::BASE,
            Some(GlyphClass::Ligature) => GlyphTraits::LIGATURE,
            Some(GlyphClass::Mark) => GlyphTraits::MARK,
            Some(GlyphClass::Component) => GlyphTraits::BASE,
            None => GlyphTraits::BASE,
        }
    }

    fn mark_attach_class(&self, glyph: GlyphId) -> u16 {
        self.gdef().map(|gdef| gdef.mark_attach_class(glyph)).unwrap_or(0)
    }
}

/// An in-memory `Font` built from owned byte buffers and plain callback closures, used by tests
/// and by embedders that already have the three tables resolved.
pub struct StaticFont<'a, C, A>
where
    C: Fn(u32) -> GlyphId,
    A: Fn(Layout, GlyphId) -> i32,
{
    pub gdef: &'a [u8],
    pub gsub: &'a [u8],
    pub gpos: &'a [u8],
    pub glyph_for_codepoint: C,
    pub advance_for_glyph: A,
}

impl<'a, C, A> Font for StaticFont<'a, C, A>
where
    C: Fn(u32) -> GlyphId,
    A: Fn(Layout, GlyphId) -> i32,
{
    fn gdef_bytes(&self) -> &[u8] {
        self.gdef
    }

    fn gsub_bytes(&self) -> &[u8] {
        self.gsub
    }

    fn gpos_bytes(&self) -> &[u8] {
        self.gpos
    }

    fn glyph_for_codepoint(&self, codepoint: u32) -> GlyphId {
        (self.glyph_for_codepoint)(codepoint)
    }

    fn advance_for_glyph(&self, layout: Layout, glyph: GlyphId) -> i32 {
        (self.advance_for_glyph)(layout, glyph)
    }
}
