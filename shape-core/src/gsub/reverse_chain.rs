//! GSUB lookup type 8: `ReverseChainSingleSubst`. Applied right-to-left across the album by the
//! caller (the text processor iterates this lookup type with `move_previous`); this function
//! only judges and substitutes a single slot.

use ot_tables::{CoverageTable, ReverseChainSingleSubstTable, View};

use crate::album::Album;
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;

fn assess_backward<'f, F: Font>(
    engine: &Engine<'f, F>,
    album: &Album,
    locator: &Locator<'f>,
    mut pos: usize,
    coverages: &[CoverageTable<'f>],
) -> bool {
    for coverage in coverages {
        let Some(prev) = locator.get_before(album, pos, |i| engine.mark_attach_class_of(album, i))
        else {
            return false;
        };
        if coverage.index_of(album.glyph(prev)).is_none() {
            return false;
        }
        pos = prev;
    }
    true
}

fn assess_forward<'f, F: Font>(
    engine: &Engine<'f, F>,
    album: &Album,
    locator: &Locator<'f>,
    mut pos: usize,
    coverages: &[CoverageTable<'f>],
) -> bool {
    for coverage in coverages {
        let Some(next) = locator.get_after(album, pos, |i| engine.mark_attach_class_of(album, i))
        else {
            return false;
        };
        if coverage.index_of(album.glyph(next)).is_none() {
            return false;
        }
        pos = next + 1;
    }
    true
}

pub fn apply<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    locator: &Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = ReverseChainSingleSubstTable::new(subtable);
    let Some(coverage) = table.coverage() else { return Ok(false) };
    let Some(coverage_index) = coverage.index_of(album.glyph(index)) else {
        return Ok(false);
    };
    if !assess_backward(engine, album, locator, index, &table.backtrack_coverages()) {
        return Ok(false);
    }
    if !assess_forward(engine, album, locator, index + 1, &table.lookahead_coverages()) {
        return Ok(false);
    }
    let substitutes = table.substitutes();
    let Some(&replacement) = substitutes.get(coverage_index as usize) else {
        return Ok(false);
    };
    album.set_glyph(index, replacement);
    engine.retag_basic_traits(album, index, replacement);
    Ok(true)
}
