//! GPOS lookup type 6: `MarkMarkPos`.

use ot_tables::{MarkMarkPosTable, View};

use crate::album::Album;
use crate::error::Result;
use crate::locator::Locator;

pub fn apply<'f>(
    subtable: View<'f>,
    album: &mut Album,
    locator: &Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = MarkMarkPosTable::new(subtable);
    let Some(mark1_coverage) = table.mark1_coverage() else { return Ok(false) };
    let Some(mark1_index) = mark1_coverage.index_of(album.glyph(index)) else { return Ok(false) };
    let Some(mark1_array) = table.mark1_array() else { return Ok(false) };
    let Some((class, mark1_anchor)) = mark1_array.mark_record(mark1_index) else {
        return Ok(false);
    };
    let Some(mark2_index) = locator.preceding_mark_index(album, index) else { return Ok(false) };
    let Some(mark2_coverage) = table.mark2_coverage() else { return Ok(false) };
    let Some(mark2_cov_index) = mark2_coverage.index_of(album.glyph(mark2_index)) else {
        return Ok(false);
    };
    let Some(mark2_anchor) = table.mark2_anchor(mark2_cov_index, class) else {
        return Ok(false);
    };
    let dx = mark2_anchor.x as i32 - mark1_anchor.x as i32;
    let dy = mark2_anchor.y as i32 - mark1_anchor.y as i32;
    album.add_position(index, dx, dy);
    album.set_attachment_offset(index, mark2_index as i32 - index as i32);
    Ok(true)
}
