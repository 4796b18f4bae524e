//! GPOS lookup type 4: `MarkBasePos`.

use ot_tables::{MarkBasePosTable, View};

use crate::album::Album;
use crate::error::Result;
use crate::locator::Locator;

pub fn apply<'f>(
    subtable: View<'f>,
    album: &mut Album,
    locator: &Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = MarkBasePosTable::new(subtable);
    let Some(mark_coverage) = table.mark_coverage() else { return Ok(false) };
    let Some(mark_index) = mark_coverage.index_of(album.glyph(index)) else { return Ok(false) };
    let Some(mark_array) = table.mark_array() else { return Ok(false) };
    let Some((class, mark_anchor)) = mark_array.mark_record(mark_index) else { return Ok(false) };
    let Some(base_index) = locator.preceding_base_index(album, index) else { return Ok(false) };
    let Some(base_coverage) = table.base_coverage() else { return Ok(false) };
    let Some(base_cov_index) = base_coverage.index_of(album.glyph(base_index)) else {
        return Ok(false);
    };
    let Some(base_anchor) = table.base_anchor(base_cov_index, class) else { return Ok(false) };
    let dx = base_anchor.x as i32 - mark_anchor.x as i32;
    let dy = base_anchor.y as i32 - mark_anchor.y as i32;
    album.add_position(index, dx, dy);
    album.set_attachment_offset(index, base_index as i32 - index as i32);
    Ok(true)
}
