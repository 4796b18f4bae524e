//! Class definition tables: glyph id -> small integer class, defaulting to 0.

use ot_types::GlyphId;

use crate::coverage::binary_search;
use crate::view::View;

/// A `ClassDef` table (format 1: dense array keyed on `glyphId - startGlyph`; format 2: sorted
/// range records).
#[derive(Debug, Clone, Copy)]
pub struct ClassDefTable<'a> {
    view: View<'a>,
}

impl<'a> ClassDefTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        ClassDefTable { view }
    }

    /// The class of `glyph`, defaulting to `0` if the glyph is unlisted, the table is
    /// malformed, or its format is unrecognized.
    pub fn class_of(&self, glyph: GlyphId) -> u16 {
        self.try_class_of(glyph).unwrap_or(0)
    }

    fn try_class_of(&self, glyph: GlyphId) -> Option<u16> {
        let format: u16 = self.view.read_at(0)?;
        match format {
            1 => self.class_of_format1(glyph),
            2 => self.class_of_format2(glyph),
            other => {
                log::warn!("class def table: unsupported format {other}");
                None
            }
        }
    }

    fn class_of_format1(&self, glyph: GlyphId) -> Option<u16> {
        let start_glyph: GlyphId = self.view.read_at(2)?;
        let glyph_count: u16 = self.view.read_at(4)?;
        let index = glyph.to_u16().checked_sub(start_glyph.to_u16())?;
        if index >= glyph_count {
            return None;
        }
        self.view.read_at(6 + index as usize * 2)
    }

    fn range_count(&self) -> Option<u16> {
        self.view.read_at(2)
    }

    fn range_at(&self, index: u16) -> Option<(GlyphId, GlyphId, u16)> {
        let base = 4 + index as usize * 6;
        let start: GlyphId = self.view.read_at(base)?;
        let end: GlyphId = self.view.read_at(base + 2)?;
        let class: u16 = self.view.read_at(base + 4)?;
        Some((start, end, class))
    }

    fn class_of_format2(&self, glyph: GlyphId) -> Option<u16> {
        let count = self.range_count()?;
        let found = binary_search(count, |i| {
            self.range_at(i).map(|(start, end, _)| {
                if glyph < start {
                    std::cmp::Ordering::Greater
                } else if glyph > end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
        })?;
        self.range_at(found).map(|(_, _, class)| class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format1_is_dense() {
        // format=1, startGlyph=10, glyphCount=3, classValues=[1, 0, 2]
        let mut bytes = vec![0x00, 0x01];
        bytes.extend(10u16.to_be_bytes());
        bytes.extend(3u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        let table = ClassDefTable::new(View::new(&bytes));
        assert_eq!(table.class_of(GlyphId::new(10)), 1);
        assert_eq!(table.class_of(GlyphId::new(12)), 2);
        assert_eq!(table.class_of(GlyphId::new(9)), 0);
        assert_eq!(table.class_of(GlyphId::new(13)), 0);
    }

    #[test]
    fn format2_ranges_default_to_zero() {
        // format=2, rangeCount=1, range=(5, 8, class=7)
        let mut bytes = vec![0x00, 0x02, 0x00, 0x01];
        bytes.extend(5u16.to_be_bytes());
        bytes.extend(8u16.to_be_bytes());
        bytes.extend(7u16.to_be_bytes());
        let table = ClassDefTable::new(View::new(&bytes));
        assert_eq!(table.class_of(GlyphId::new(6)), 7);
        assert_eq!(table.class_of(GlyphId::new(100)), 0);
    }
}
