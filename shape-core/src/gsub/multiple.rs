//! GSUB lookup type 2: `MultipleSubst`.

use ot_tables::{MultipleSubstTable, View};

use crate::album::{Album, GlyphTraits};
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;

pub fn apply<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = MultipleSubstTable::new(subtable);
    let Some(sequence) = table.sequence_for(album.glyph(index)) else {
        return Ok(false);
    };
    let substitutes = sequence.substitutes();
    // The standard forbids zero-length emission; treat it as "did not apply" rather than
    // deleting the slot.
    if substitutes.is_empty() {
        return Ok(false);
    }
    let association = album.association(index).first();
    album.set_glyph(index, substitutes[0]);
    engine.retag_basic_traits(album, index, substitutes[0]);
    if substitutes.len() == 1 {
        return Ok(true);
    }
    let extra = substitutes.len() - 1;
    locator.reserve_glyphs(album, index + 1, extra, association);
    for (offset, glyph) in substitutes[1..].iter().enumerate() {
        let slot = index + 1 + offset;
        album.set_glyph(slot, *glyph);
        album.set_single_association(slot, association);
        let traits = (album.traits(slot) - GlyphTraits::PLACEHOLDER) | GlyphTraits::SEQUENCE;
        album.set_traits(slot, traits);
        engine.retag_basic_traits(album, slot, *glyph);
    }
    locator.jump_to(index + substitutes.len());
    Ok(true)
}
