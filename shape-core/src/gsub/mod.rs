//! GSUB lookup-type dispatch: given a resolved [`LookupTable`], try each of its subtables in
//! order and stop at the first one that applies (§4.9: "a single successful subtable
//! application terminates further subtables for that slot").

mod ligature;
mod multiple;
mod reverse_chain;
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
        log::trace!("gsub lookup type {lookup_type} subtable {subtable_index} at slot {index}");
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
        1 => single::apply(engine, subtable, album, index),
        2 => multiple::apply(engine, subtable, album, locator, index),
        3 => {
            // Alternate substitution: no caller-visible alternate-selection hook exists at this
            // layer, so the reference behavior (apply nothing) is preserved. See DESIGN.md.
            Ok(false)
        }
        4 => ligature::apply(engine, subtable, album, locator, index),
        5 => {
            let table = ot_tables::SequenceContextTable::new(subtable);
            context::apply_sequence_context(engine, LookupKind::Gsub, table, album, locator, index)
        }
        6 => {
            let table = ot_tables::ChainedSequenceContextTable::new(subtable);
            context::apply_chained_sequence_context(
                engine,
                LookupKind::Gsub,
                table,
                album,
                locator,
                index,
            )
        }
        7 => apply_extension(engine, subtable, album, locator, index),
        8 => reverse_chain::apply(engine, subtable, album, locator, index),
        other => {
            log::warn!("gsub: unsupported lookup type {other}");
            Ok(false)
        }
    }
}

/// `ExtensionSubstFormat1`: format(u16)=1, extensionLookupType(u16), extensionOffset(u32) into
/// the subtable of the named inner type, redirecting the dispatcher.
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
