//! Ties a [`Font`] to its resolved `GSUB`/`GPOS` lookup lists and dispatches a lookup index to
//! the matching lookup-type applier. Both the text processor's top-level loop and the context
//! matcher's nested-lookup invocation go through this single entry point.

use ot_tables::{LookupListTable, LookupTable};
use ot_types::GlyphId;

use crate::album::Album;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::locator::Locator;
use crate::{gpos, gsub};

pub struct Engine<'f, F: Font> {
    pub font: &'f F,
    pub gsub_lookups: Option<LookupListTable<'f>>,
    pub gpos_lookups: Option<LookupListTable<'f>>,
}

impl<'f, F: Font> Engine<'f, F> {
    pub fn new(font: &'f F) -> Self {
        Engine {
            font,
            gsub_lookups: font.gsub().and_then(|t| t.lookup_list()),
            gpos_lookups: font.gpos().and_then(|t| t.lookup_list()),
        }
    }

    pub fn mark_attach_class_of(&self, album: &Album, index: usize) -> u16 {
        self.font.mark_attach_class(album.glyph(index))
    }

    fn gsub_lookup(&self, index: u16) -> Result<LookupTable<'f>> {
        self.gsub_lookups
            .and_then(|l| l.lookup(index))
            .ok_or(Error::UnknownLookupIndex(index))
    }

    fn gpos_lookup(&self, index: u16) -> Result<LookupTable<'f>> {
        self.gpos_lookups
            .and_then(|l| l.lookup(index))
            .ok_or(Error::UnknownLookupIndex(index))
    }

    /// Apply `lookup`'s flag word and mark-filtering set to `locator` before dispatch, so a
    /// recursively-invoked (context-nested) lookup sees the same filtering an outer,
    /// processor-driven invocation would.
    fn configure_locator(&self, locator: &mut Locator<'f>, lookup: &LookupTable<'f>) {
        locator.set_lookup_flag(lookup.lookup_flag());
        let coverage = lookup
            .mark_filtering_set()
            .and_then(|set| self.font.gdef().and_then(|g| g.mark_glyph_set_coverage(set)));
        locator.set_mark_filtering_set(coverage);
    }

    pub fn apply_gsub_lookup(
        &self,
        lookup_index: u16,
        album: &mut Album,
        locator: &mut Locator<'f>,
        index: usize,
    ) -> Result<bool> {
        let lookup = self.gsub_lookup(lookup_index)?;
        self.configure_locator(locator, &lookup);
        gsub::apply_lookup(self, lookup, album, locator, index)
    }

    pub fn apply_gpos_lookup(
        &self,
        lookup_index: u16,
        album: &mut Album,
        locator: &mut Locator<'f>,
        index: usize,
    ) -> Result<bool> {
        let lookup = self.gpos_lookup(lookup_index)?;
        self.configure_locator(locator, &lookup);
        gpos::apply_lookup(self, lookup, album, locator, index)
    }

    /// Re-derive and apply a glyph's basic trait from `GDEF.GlyphClassDef` after it was
    /// substituted (original's `_SFGetGlyphTraits`, see `DESIGN.md`).
    pub fn retag_basic_traits(&self, album: &mut Album, index: usize, glyph: GlyphId) {
        let basic = self.font.glyph_class_traits(glyph);
        album.replace_basic_traits(index, basic);
    }
}
