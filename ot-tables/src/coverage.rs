//! Coverage tables: glyph id -> covered index, or "not covered".

use ot_types::GlyphId;

use crate::view::View;

/// A `Coverage` table (format 1: sorted glyph list; format 2: sorted `(start, end, startIndex)`
/// ranges).
#[derive(Debug, Clone, Copy)]
pub struct CoverageTable<'a> {
    view: View<'a>,
}

impl<'a> CoverageTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        CoverageTable { view }
    }

    /// The covered index of `glyph`, or `None` if it is not covered (including when the table
    /// is malformed or of an unrecognized format, since a malformed subtable is simply "no match").
    pub fn index_of(&self, glyph: GlyphId) -> Option<u16> {
        let format: u16 = self.view.read_at(0)?;
        match format {
            1 => self.index_of_format1(glyph),
            2 => self.index_of_format2(glyph),
            other => {
                log::warn!("coverage table: unsupported format {other}");
                None
            }
        }
    }

    fn glyph_count(&self) -> Option<u16> {
        self.view.read_at(2)
    }

    fn glyph_at(&self, index: u16) -> Option<GlyphId> {
        self.view.read_at(4 + index as usize * 2)
    }

    fn index_of_format1(&self, glyph: GlyphId) -> Option<u16> {
        let count = self.glyph_count()?;
        binary_search(count, |i| self.glyph_at(i).map(|g| g.cmp(&glyph)))
    }

    fn range_count(&self) -> Option<u16> {
        self.view.read_at(2)
    }

    fn range_at(&self, index: u16) -> Option<(GlyphId, GlyphId, u16)> {
        let base = 4 + index as usize * 6;
        let start: GlyphId = self.view.read_at(base)?;
        let end: GlyphId = self.view.read_at(base + 2)?;
        let start_index: u16 = self.view.read_at(base + 4)?;
        Some((start, end, start_index))
    }

    fn index_of_format2(&self, glyph: GlyphId) -> Option<u16> {
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
        let (start, _, start_index) = self.range_at(found)?;
        Some(start_index + (glyph.to_u16() - start.to_u16()))
    }
}

/// Binary search over `0..count`, comparing via `at`. `at` returning `None` (a malformed entry)
/// aborts the search as "not found" rather than panicking.
pub(crate) fn binary_search<F>(count: u16, at: F) -> Option<u16>
where
    F: Fn(u16) -> Option<std::cmp::Ordering>,
{
    let mut lo = 0u32;
    let mut hi = count as u32;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match at(mid as u16)? {
            std::cmp::Ordering::Equal => return Some(mid as u16),
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_bytes(id: u16) -> [u8; 2] {
        id.to_be_bytes()
    }

    #[test]
    fn format1_finds_exact_glyph() {
        // format=1, glyphCount=3, glyphs=[5, 9, 20]
        let mut bytes = vec![0x00, 0x01, 0x00, 0x03];
        bytes.extend(glyph_bytes(5));
        bytes.extend(glyph_bytes(9));
        bytes.extend(glyph_bytes(20));
        let table = CoverageTable::new(View::new(&bytes));
        assert_eq!(table.index_of(GlyphId::new(5)), Some(0));
        assert_eq!(table.index_of(GlyphId::new(9)), Some(1));
        assert_eq!(table.index_of(GlyphId::new(20)), Some(2));
        assert_eq!(table.index_of(GlyphId::new(6)), None);
    }

    #[test]
    fn format2_resolves_within_range() {
        // format=2, rangeCount=1, range=(start=10, end=20, startCoverageIndex=100)
        let mut bytes = vec![0x00, 0x02, 0x00, 0x01];
        bytes.extend(glyph_bytes(10));
        bytes.extend(glyph_bytes(20));
        bytes.extend(100u16.to_be_bytes());
        let table = CoverageTable::new(View::new(&bytes));
        assert_eq!(table.index_of(GlyphId::new(10)), Some(100));
        assert_eq!(table.index_of(GlyphId::new(15)), Some(105));
        assert_eq!(table.index_of(GlyphId::new(20)), Some(110));
        assert_eq!(table.index_of(GlyphId::new(21)), None);
        assert_eq!(table.index_of(GlyphId::new(9)), None);
    }

    #[test]
    fn malformed_table_is_not_covered() {
        let table = CoverageTable::new(View::new(&[0x00]));
        assert_eq!(table.index_of(GlyphId::new(1)), None);
    }
}
