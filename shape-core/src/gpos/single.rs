//! GPOS lookup type 1: `SinglePos`.

use ot_tables::{SinglePosTable, View};

use crate::album::Album;
use crate::error::Result;

pub fn apply(subtable: View<'_>, album: &mut Album, index: usize) -> Result<bool> {
    let table = SinglePosTable::new(subtable);
    let Some(value) = table.value_for(album.glyph(index)) else { return Ok(false) };
    album.add_position(index, value.x_placement as i32, value.y_placement as i32);
    album.add_advance(index, value.x_advance as i32);
    Ok(true)
}
