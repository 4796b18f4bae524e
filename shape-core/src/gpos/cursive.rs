//! GPOS lookup type 3: `CursivePos`. Connects the current glyph's entry anchor to the preceding
//! non-ignored glyph's exit anchor.

use ot_tables::{CursivePosTable, View};

use crate::album::Album;
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;

pub fn apply<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    locator: &Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = CursivePosTable::new(subtable);
    let Some((entry, _exit)) = table.anchors_for(album.glyph(index)) else { return Ok(false) };
    let Some(entry) = entry else { return Ok(false) };
    let Some(prev_index) =
        locator.get_before(album, index, |i| engine.mark_attach_class_of(album, i))
    else {
        return Ok(false);
    };
    let Some((_, prev_exit)) = table.anchors_for(album.glyph(prev_index)) else {
        return Ok(false);
    };
    let Some(prev_exit) = prev_exit else { return Ok(false) };
    let dx = prev_exit.x as i32 - entry.x as i32;
    let dy = prev_exit.y as i32 - entry.y as i32;
    album.add_position(index, dx, dy);
    album.set_cursive_offset(index, prev_index as i32 - index as i32);
    Ok(true)
}
