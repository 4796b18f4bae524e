//! GSUB lookup type 1: `SingleSubst`.

use ot_tables::{SingleSubstTable, View};

use crate::album::Album;
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;

pub fn apply<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    index: usize,
) -> Result<bool> {
    let table = SingleSubstTable::new(subtable);
    let Some(replacement) = table.substitute(album.glyph(index)) else {
        return Ok(false);
    };
    album.set_glyph(index, replacement);
    engine.retag_basic_traits(album, index, replacement);
    Ok(true)
}
