//! GPOS lookup type 2: `PairPos`.

use ot_tables::{PairPosTable, View};

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
    let Some(second_index) =
        locator.get_after(album, index + 1, |i| engine.mark_attach_class_of(album, i))
    else {
        return Ok(false);
    };
    let table = PairPosTable::new(subtable);
    let Some((first_value, second_value)) =
        table.values_for_pair(album.glyph(index), album.glyph(second_index))
    else {
        return Ok(false);
    };
    album.add_position(index, first_value.x_placement as i32, first_value.y_placement as i32);
    album.add_advance(index, first_value.x_advance as i32);
    album.add_position(second_index, second_value.x_placement as i32, second_value.y_placement as i32);
    album.add_advance(second_index, second_value.x_advance as i32);
    Ok(true)
}
