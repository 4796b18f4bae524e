//! GPOS lookup-type dispatch, mirroring `gsub::apply_lookup`'s "first successful subtable wins"
//! structure.

mod cursive;
mod mark_base;
mod mark_ligature;
mod mark_mark;
mod pair;
mod single;

use ot_tables::{LookupTable, View};

use crate::album::Album;
use crate::context;
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;
use crate::pattern::LookupKind;

pub fn apply_lookup<'f, F: Font>(
    engine: &Engine<'f, F>,
    lookup: LookupTable<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let Some(lookup_type) = lookup.lookup_type() else { return Ok(false) };
    for subtable_index in 0..lookup.subtable_count() {
        let Some(subtable) = lookup.subtable(subtable_index) else { continue };
        log::trace!("gpos lookup type {lookup_type} subtable {subtable_index} at slot {index}");
        if apply_subtable(engine, lookup_type, subtable, album, locator, index)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn apply_subtable<'f, F: Font>(
    engine: &Engine<'f, F>,
    lookup_type: u16,
    subtable: View<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    match lookup_type {
        1 => single::apply(subtable, album, index),
        2 => pair::apply(engine, subtable, album, locator, index),
        3 => cursive::apply(engine, subtable, album, locator, index),
        4 => mark_base::apply(subtable, album, locator, index),
        5 => mark_ligature::apply(subtable, album, locator, index),
        6 => mark_mark::apply(subtable, album, locator, index),
        7 => {
            let table = ot_tables::SequenceContextTable::new(subtable);
            context::apply_sequence_context(engine, LookupKind::Gpos, table, album, locator, index)
        }
        8 => {
            let table = ot_tables::ChainedSequenceContextTable::new(subtable);
            context::apply_chained_sequence_context(
                engine,
                LookupKind::Gpos,
                table,
                album,
                locator,
                index,
            )
        }
        9 => apply_extension(engine, subtable, album, locator, index),
        other => {
            log::warn!("gpos: unsupported lookup type {other}");
            Ok(false)
        }
    }
}

/// `ExtensionPosFormat1`: same shape as GSUB's extension wrapper, different inner type space.
fn apply_extension<'f, F: Font>(
    engine: &Engine<'f, F>,
    subtable: View<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let Some(inner_type) = subtable.read_at::<u16>(2) else { return Ok(false) };
    let Some(offset) = subtable.read_at::<u32>(4) else { return Ok(false) };
    let Some(inner) = subtable.subview(offset as usize) else { return Ok(false) };
    apply_subtable(engine, inner_type, inner, album, locator, index)
}
