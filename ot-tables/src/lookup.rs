//! `Lookup` / `LookupList`: the OpenType unit of substitution or positioning logic, and the
//! top-level `GSUB`/`GPOS` header that gets you from a lookup index to its bytes.

use ot_types::Offset16;

use crate::view::View;

bitflags::bitflags! {
    /// The low byte of a lookup's flag word. The high byte is the `MarkAttachmentType` class
    /// filter, read separately via [`LookupFlag::mark_attachment_type`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LookupFlag: u16 {
        const RIGHT_TO_LEFT          = 0x0001;
        const IGNORE_BASE_GLYPHS     = 0x0002;
        const IGNORE_LIGATURES       = 0x0004;
        const IGNORE_MARKS           = 0x0008;
        const USE_MARK_FILTERING_SET = 0x0010;
    }
}

impl LookupFlag {
    /// The `MarkAttachmentType` class filter (upper byte of the flag word), or `0` for "no
    /// filter".
    pub fn mark_attachment_type(self) -> u8 {
        (self.bits() >> 8) as u8
    }
}

/// A single `Lookup` table: a type, a flag word, and one or more subtables.
#[derive(Debug, Clone, Copy)]
pub struct LookupTable<'a> {
    view: View<'a>,
}

impl<'a> LookupTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        LookupTable { view }
    }

    pub fn lookup_type(&self) -> Option<u16> {
        self.view.read_at(0)
    }

    pub fn lookup_flag(&self) -> LookupFlag {
        self.view
            .read_at::<u16>(2)
            .map(LookupFlag::from_bits_retain)
            .unwrap_or(LookupFlag::empty())
    }

    pub fn subtable_count(&self) -> u16 {
        self.view.read_at(4).unwrap_or(0)
    }

    pub fn subtable(&self, index: u16) -> Option<View<'a>> {
        let offset: Offset16 = self.view.read_at(6 + index as usize * 2)?;
        self.view.subview(offset.non_null()?)
    }

    /// The mark-filtering set index, present only when `USE_MARK_FILTERING_SET` is set; it
    /// follows the subtable offset array.
    pub fn mark_filtering_set(&self) -> Option<u16> {
        if !self.lookup_flag().contains(LookupFlag::USE_MARK_FILTERING_SET) {
            return None;
        }
        self.view.read_at(6 + self.subtable_count() as usize * 2)
    }
}

/// The `LookupList` table: an array of offsets to [`LookupTable`]s, indexed by lookup list
/// index.
#[derive(Debug, Clone, Copy)]
pub struct LookupListTable<'a> {
    view: View<'a>,
}

impl<'a> LookupListTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        LookupListTable { view }
    }

    pub fn lookup_count(&self) -> u16 {
        self.view.read_at(0).unwrap_or(0)
    }

    pub fn lookup(&self, index: u16) -> Option<LookupTable<'a>> {
        let offset: Offset16 = self.view.read_at(2 + index as usize * 2)?;
        self.view.subview(offset.non_null()?).map(LookupTable::new)
    }
}

/// The common header shared by `GSUB` and `GPOS`: version, plus offsets to `ScriptList`,
/// `FeatureList`, and `LookupList`. `ScriptList`/`FeatureList` resolution is the external
/// shaping-plan compiler's job; this core only ever needs `LookupList`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutTable<'a> {
    view: View<'a>,
}

impl<'a> LayoutTable<'a> {
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(LayoutTable { view: View::new(bytes) })
        }
    }

    pub fn lookup_list(&self) -> Option<LookupListTable<'a>> {
        let offset: Offset16 = self.view.read_at(8)?;
        self.view
            .subview(offset.non_null()?)
            .map(LookupListTable::new)
    }

    pub fn lookup(&self, index: u16) -> Option<LookupTable<'a>> {
        self.lookup_list()?.lookup(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_filtering_type_is_high_byte() {
        let flag = LookupFlag::from_bits_retain(0x0300 | LookupFlag::IGNORE_MARKS.bits());
        assert_eq!(flag.mark_attachment_type(), 3);
        assert!(flag.contains(LookupFlag::IGNORE_MARKS));
    }
}
