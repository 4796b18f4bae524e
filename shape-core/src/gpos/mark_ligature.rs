//! GPOS lookup type 5: `MarkLigPos`.

use ot_tables::{MarkLigPosTable, View};

use crate::album::Album;
use crate::error::Result;
use crate::locator::Locator;

pub fn apply<'f>(
    subtable: View<'f>,
    album: &mut Album,
    locator: &Locator<'f>,
    index: usize,
) -> Result<bool> {
    let table = MarkLigPosTable::new(subtable);
    let Some(mark_coverage) = table.mark_coverage() else { return Ok(false) };
    let Some(mark_index) = mark_coverage.index_of(album.glyph(index)) else { return Ok(false) };
    let Some(mark_array) = table.mark_array() else { return Ok(false) };
    let Some((class, mark_anchor)) = mark_array.mark_record(mark_index) else { return Ok(false) };
    let Some((ligature_index, component_index)) =
        locator.preceding_ligature_index(album, index)
    else {
        return Ok(false);
    };
    let Some(ligature_coverage) = table.ligature_coverage() else { return Ok(false) };
    let Some(lig_cov_index) = ligature_coverage.index_of(album.glyph(ligature_index)) else {
        return Ok(false);
    };
    let Some(ligature_anchor) =
        table.ligature_anchor(lig_cov_index, component_index as u16, class)
    else {
        return Ok(false);
    };
    let dx = ligature_anchor.x as i32 - mark_anchor.x as i32;
    let dy = ligature_anchor.y as i32 - mark_anchor.y as i32;
    album.add_position(index, dx, dy);
    album.set_attachment_offset(index, ligature_index as i32 - index as i32);
    Ok(true)
}
