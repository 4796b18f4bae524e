//! The mutable glyph stream a shaping request operates on: parallel per-glyph arrays plus the
//! bookkeeping (`version`, composite association storage) the [`crate::locator::Locator`] and
//! the GSUB/GPOS appliers depend on.

use ot_types::GlyphId;

bitflags::bitflags! {
    /// Per-glyph trait bits. At most one of `BASE`/`LIGATURE`/`MARK`, the glyph's *basic*
    /// trait — is ever set at a time; callers that need to change it go through
    /// [`Album::replace_basic_traits`] rather than setting bits directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GlyphTraits: u16 {
        const BASE         = 0x0001;
        const LIGATURE     = 0x0002;
        const MARK         = 0x0004;
        const COMPOSITE    = 0x0008;
        const PLACEHOLDER  = 0x0010;
        const SEQUENCE     = 0x0020;
        const ATTACHED     = 0x0040;
        const CURSIVE      = 0x0080;
        const RIGHT_TO_LEFT = 0x0100;
    }
}

impl GlyphTraits {
    /// The "basic" trait bits: a glyph carries at most one of these at a time.
    pub const BASIC: GlyphTraits = GlyphTraits::BASE
        .union(GlyphTraits::LIGATURE)
        .union(GlyphTraits::MARK);
}

/// Which codepoint(s) in the input text a glyph slot traces back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// A single input codepoint index.
    Single(u32),
    /// Multiple input codepoint indices, in logical-text order (a ligature's components).
    Composite(Vec<u32>),
}

impl Association {
    /// The first (or only) codepoint index this slot associates with.
    pub fn first(&self) -> u32 {
        match self {
            Association::Single(index) => *index,
            Association::Composite(indices) => indices.first().copied().unwrap_or(0),
        }
    }
}

/// One glyph slot's full mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub glyph: GlyphId,
    pub traits: GlyphTraits,
    pub feature_mask: u16,
    pub x: i32,
    pub y: i32,
    pub advance: i32,
    pub association: Association,
    /// Relative (signed, in slots) back-link to the glyph this one is cursively attached to.
    pub cursive_offset: Option<i32>,
    /// Relative (signed, in slots) back-link to the glyph this one is mark-attached to.
    pub attachment_offset: Option<i32>,
}

impl GlyphRecord {
    fn placeholder_for(association: Association) -> Self {
        GlyphRecord {
            glyph: GlyphId::NOTDEF,
            traits: GlyphTraits::PLACEHOLDER,
            feature_mask: 0,
            x: 0,
            y: 0,
            advance: 0,
            association,
            cursive_offset: None,
            attachment_offset: None,
        }
    }
}

/// The feature-mask bit or bits whose presence on a glyph makes it ineligible for a feature
/// unit, i.e. the complement of that unit's own bit within the 16-bit feature-mask space.
pub fn anti_feature_mask(feature_mask: u16) -> u16 {
    !feature_mask
}

/// The mutable glyph stream. Never shrinks: removal is represented by turning a slot into a
/// [`GlyphTraits::PLACEHOLDER`], never by deleting it, so association indices stay valid.
#[derive(Debug, Clone, Default)]
pub struct Album {
    records: Vec<GlyphRecord>,
    version: u64,
}

impl Album {
    pub fn new() -> Self {
        Album::default()
    }

    pub fn glyph_count(&self) -> usize {
        self.records.len()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Append a freshly-discovered glyph (text-processor step 1).
    pub fn push(&mut self, glyph: GlyphId, traits: GlyphTraits, text_index: u32) {
        self.records.push(GlyphRecord {
            glyph,
            traits,
            feature_mask: 0,
            x: 0,
            y: 0,
            advance: 0,
            association: Association::Single(text_index),
            cursive_offset: None,
            attachment_offset: None,
        });
        self.bump_version();
    }

    pub fn get(&self, index: usize) -> &GlyphRecord {
        &self.records[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut GlyphRecord {
        &mut self.records[index]
    }

    pub fn glyph(&self, index: usize) -> GlyphId {
        self.records[index].glyph
    }

    pub fn set_glyph(&mut self, index: usize, glyph: GlyphId) {
        self.records[index].glyph = glyph;
    }

    pub fn traits(&self, index: usize) -> GlyphTraits {
        self.records[index].traits
    }

    pub fn set_traits(&mut self, index: usize, traits: GlyphTraits) {
        self.records[index].traits = traits;
    }

    /// Swap the basic trait (Base/Ligature/Mark) for `index`, leaving the other trait bits
    /// untouched, and clear any stale non-basic context the previous substitution left behind.
    pub fn replace_basic_traits(&mut self, index: usize, basic: GlyphTraits) {
        let record = &mut self.records[index];
        record.traits = (record.traits - GlyphTraits::BASIC) | (basic & GlyphTraits::BASIC);
    }

    pub fn insert_traits(&mut self, index: usize, traits: GlyphTraits) {
        self.records[index].traits |= traits;
    }

    pub fn feature_mask(&self, index: usize) -> u16 {
        self.records[index].feature_mask
    }

    pub fn or_feature_mask(&mut self, index: usize, mask: u16) {
        self.records[index].feature_mask |= mask;
    }

    pub fn association(&self, index: usize) -> &Association {
        &self.records[index].association
    }

    pub fn set_single_association(&mut self, index: usize, text_index: u32) {
        self.records[index].association = Association::Single(text_index);
    }

    /// Transition `index` from a single to a composite association with `count` slots,
    /// returning the (initially zeroed) array for the caller to fill in logical-text order.
    pub fn make_composite_associations(&mut self, index: usize, count: usize) -> &mut [u32] {
        self.records[index].association = Association::Composite(vec![0; count]);
        match &mut self.records[index].association {
            Association::Composite(slots) => slots.as_mut_slice(),
            Association::Single(_) => unreachable!(),
        }
    }

    pub fn position(&self, index: usize) -> (i32, i32) {
        (self.records[index].x, self.records[index].y)
    }

    pub fn add_position(&mut self, index: usize, dx: i32, dy: i32) {
        self.records[index].x += dx;
        self.records[index].y += dy;
    }

    pub fn advance(&self, index: usize) -> i32 {
        self.records[index].advance
    }

    pub fn add_advance(&mut self, index: usize, delta: i32) {
        self.records[index].advance += delta;
    }

    pub fn set_advance(&mut self, index: usize, advance: i32) {
        self.records[index].advance = advance;
    }

    pub fn cursive_offset(&self, index: usize) -> Option<i32> {
        self.records[index].cursive_offset
    }

    pub fn set_cursive_offset(&mut self, index: usize, offset: i32) {
        self.records[index].cursive_offset = Some(offset);
        self.records[index].traits.insert(GlyphTraits::CURSIVE);
    }

    pub fn attachment_offset(&self, index: usize) -> Option<i32> {
        self.records[index].attachment_offset
    }

    pub fn set_attachment_offset(&mut self, index: usize, offset: i32) {
        self.records[index].attachment_offset = Some(offset);
        self.records[index].traits.insert(GlyphTraits::ATTACHED);
    }

    /// Insert `count` placeholder slots at `index`, each inheriting `association`'s first
    /// component as its own single-association (multiple-substitution expansion and ligature
    /// component fill-in both use this). Bumps `version`.
    pub fn reserve_glyphs(&mut self, index: usize, count: usize, association: u32) {
        let placeholders = (0..count)
            .map(|_| GlyphRecord::placeholder_for(Association::Single(association)));
        let tail = self.records.split_off(index);
        self.records.extend(placeholders);
        self.records.extend(tail);
        self.bump_version();
    }

    pub fn glyph_ids(&self) -> Vec<GlyphId> {
        self.records.iter().map(|r| r.glyph).collect()
    }

    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.records.iter().map(|r| (r.x, r.y)).collect()
    }

    pub fn advances(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.advance).collect()
    }

    /// Reverse the glyph order in place, for right-to-left output (text-processor step 6). Does
    /// not bump `version`: this runs after all lookup application, with no locator alive.
    pub fn reverse(&mut self) {
        self.records.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_glyphs_grows_and_shifts_tail() {
        let mut album = Album::new();
        album.push(GlyphId::new(1), GlyphTraits::BASE, 0);
        album.push(GlyphId::new(2), GlyphTraits::BASE, 1);
        let version_before = album.version();
        album.reserve_glyphs(1, 2, 0);
        assert_eq!(album.glyph_count(), 4);
        assert_eq!(album.glyph(0), GlyphId::new(1));
        assert_eq!(album.glyph(3), GlyphId::new(2));
        assert!(album.traits(1).contains(GlyphTraits::PLACEHOLDER));
        assert_ne!(album.version(), version_before);
    }

    #[test]
    fn replace_basic_traits_preserves_other_bits() {
        let mut album = Album::new();
        album.push(GlyphId::new(5), GlyphTraits::BASE, 0);
        album.insert_traits(0, GlyphTraits::ATTACHED);
        album.replace_basic_traits(0, GlyphTraits::LIGATURE);
        let traits = album.traits(0);
        assert!(traits.contains(GlyphTraits::LIGATURE));
        assert!(traits.contains(GlyphTraits::ATTACHED));
        assert!(!traits.contains(GlyphTraits::BASE));
    }

    #[test]
    fn composite_associations_replace_single() {
        let mut album = Album::new();
        album.push(GlyphId::new(1), GlyphTraits::BASE, 7);
        let slots = album.make_composite_associations(0, 3);
        slots.copy_from_slice(&[0, 1, 2]);
        match album.association(0) {
            Association::Composite(indices) => assert_eq!(indices, &[0, 1, 2]),
            Association::Single(_) => panic!("expected composite"),
        }
    }
}
