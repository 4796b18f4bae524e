//! GSUB lookup type 4: `LigatureSubst`.

use ot_tables::{LigatureTable, View};

use crate::album::{Album, GlyphTraits};
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;

/// Walk forward from `index + 1` via `get_after` (not `move_next`: this must not disturb the
/// outer locator's own cursor), matching `candidate`'s components in order. Returns the
/// positions consumed, in component order, on a full match.
fn match_components<'f, F: Font>(
    engine: &Engine<'f, F>,
    album: &Album,
    locator: &Locator<'f>,
    index: usize,
    candidate: &LigatureTable<'f>,
) -> Option<Vec<usize>> {
    let components = candidate.components();
    let mut positions = Vec::with_capacity(components.len());
    let mut pos = index + 1;
    for component in components {
        let next = locator.get_after(album, pos, |i| engine.mark_attach_class_of(album, i))?;
        if album.glyph(next) != component {
            return None;
        }
        positions.push(next);
        pos = next + 1;
    }
    Some(positions)
}

pub fn apply<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = ot_tables::LigatureSubstTable::new(subtable);
    let Some(ligature_set) = table.ligature_set_for(album.glyph(index)) else {
        return Ok(false);
    };
    for candidate_index in 0..ligature_set.ligature_count() {
        let Some(candidate) = ligature_set.ligature(candidate_index) else { continue };
        let Some(ligature_glyph) = candidate.ligature_glyph() else { continue };
        let Some(positions) = match_components(engine, album, locator, index, &candidate) else {
            continue;
        };
        let first_association = album.association(index).first();
        let mut composite = Vec::with_capacity(positions.len() + 1);
        composite.push(first_association);
        for &slot in &positions {
            composite.push(album.association(slot).first());
        }
        album.set_glyph(index, ligature_glyph);
        let basic = engine.font.glyph_class_traits(ligature_glyph);
        album.replace_basic_traits(index, basic);
        album.insert_traits(index, GlyphTraits::COMPOSITE);
        album.make_composite_associations(index, composite.len()).copy_from_slice(&composite);
        for slot in positions {
            album.set_single_association(slot, first_association);
            album.set_traits(slot, GlyphTraits::PLACEHOLDER);
        }
        return Ok(true);
    }
    Ok(false)
}
