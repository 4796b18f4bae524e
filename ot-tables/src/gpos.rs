//! Raw field access for the GPOS lookup subtable families (lookup types 1, 2, 3, 4, 5, 6; types
//! 7/8/9 are shared-context or extension wrappers handled in `shape-core`/`context.rs`).

use ot_types::{GlyphId, Offset16};

use crate::anchor::AnchorTable;
use crate::class_def::ClassDefTable;
use crate::coverage::CoverageTable;
use crate::value_record::{ValueFormat, ValueRecord};
use crate::view::View;

fn read_value_format(view: &View<'_>, at: usize) -> ValueFormat {
    view.read_at::<u16>(at)
        .map(ValueFormat::from_bits_truncate)
        .unwrap_or(ValueFormat::empty())
}

/// Lookup type 1: `SinglePos`.
#[derive(Debug, Clone, Copy)]
pub struct SinglePosTable<'a> {
    view: View<'a>,
}

impl<'a> SinglePosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SinglePosTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn value_for(&self, glyph: GlyphId) -> Option<ValueRecord> {
        let format: u16 = self.view.read_at(0)?;
        let coverage_index = self.coverage()?.index_of(glyph)?;
        let value_format = read_value_format(&self.view, 4);
        match format {
            1 => {
                let mut cursor = self.view.cursor();
                cursor.advance(6);
                Some(ValueRecord::read(&mut cursor, value_format))
            }
            2 => {
                let value_count: u16 = self.view.read_at(6)?;
                if coverage_index >= value_count {
                    return None;
                }
                let record_len = value_format.record_byte_len();
                let mut cursor = self.view.cursor();
                cursor.advance(8 + coverage_index as usize * record_len);
                Some(ValueRecord::read(&mut cursor, value_format))
            }
            other => {
                log::warn!("single pos: unsupported format {other}");
                None
            }
        }
    }
}

/// Lookup type 2: `PairPos`, covering both format 1 (explicit glyph pairs) and format 2
/// (class-pair matrix).
#[derive(Debug, Clone, Copy)]
pub struct PairPosTable<'a> {
    view: View<'a>,
}

impl<'a> PairPosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        PairPosTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    fn value_formats(&self) -> (ValueFormat, ValueFormat) {
        (read_value_format(&self.view, 4), read_value_format(&self.view, 6))
    }

    /// Look up the pair adjustment for `first` followed immediately by `second`.
    pub fn values_for_pair(
        &self,
        first: GlyphId,
        second: GlyphId,
    ) -> Option<(ValueRecord, ValueRecord)> {
        let format: u16 = self.view.read_at(0)?;
        let (format1, format2) = self.value_formats();
        match format {
            1 => {
                let coverage_index = self.coverage()?.index_of(first)?;
                let pair_set_count: u16 = self.view.read_at(8)?;
                if coverage_index >= pair_set_count {
                    return None;
                }
                let offset: Offset16 = self.view.read_at(10 + coverage_index as usize * 2)?;
                let pair_set = self.view.subview(offset.non_null()?)?;
                self.scan_pair_set(pair_set, second, format1, format2)
            }
            2 => {
                self.coverage()?.index_of(first)?;
                let class_def1_offset: Offset16 = self.view.read_at(8)?;
                let class_def2_offset: Offset16 = self.view.read_at(10)?;
                let class_def1 =
                    ClassDefTable::new(self.view.subview(class_def1_offset.non_null()?)?);
                let class_def2 =
                    ClassDefTable::new(self.view.subview(class_def2_offset.non_null()?)?);
                let class1_count: u16 = self.view.read_at(12)?;
                let class2_count: u16 = self.view.read_at(14)?;
                let class1 = class_def1.class_of(first);
                let class2 = class_def2.class_of(second);
                if class1 >= class1_count || class2 >= class2_count {
                    return None;
                }
                let record_len = format1.record_byte_len() + format2.record_byte_len();
                let row_len = class2_count as usize * record_len;
                let offset =
                    16 + class1 as usize * row_len + class2 as usize * record_len;
                let mut cursor = self.view.cursor();
                cursor.advance(offset);
                let v1 = ValueRecord::read(&mut cursor, format1);
                let v2 = ValueRecord::read(&mut cursor, format2);
                Some((v1, v2))
            }
            other => {
                log::warn!("pair pos: unsupported format {other}");
                None
            }
        }
    }

    fn scan_pair_set(
        &self,
        pair_set: View<'a>,
        second: GlyphId,
        format1: ValueFormat,
        format2: ValueFormat,
    ) -> Option<(ValueRecord, ValueRecord)> {
        let pair_count: u16 = pair_set.read_at(0)?;
        let record_len = 2 + format1.record_byte_len() + format2.record_byte_len();
        for i in 0..pair_count {
            let at = 2 + i as usize * record_len;
            let second_glyph: GlyphId = pair_set.read_at(at)?;
            if second_glyph == second {
                let mut cursor = pair_set.cursor();
                cursor.advance(at + 2);
                let v1 = ValueRecord::read(&mut cursor, format1);
                let v2 = ValueRecord::read(&mut cursor, format2);
                return Some((v1, v2));
            }
        }
        None
    }
}

/// Lookup type 3: `CursivePos`.
#[derive(Debug, Clone, Copy)]
pub struct CursivePosTable<'a> {
    view: View<'a>,
}

impl<'a> CursivePosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        CursivePosTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    /// The (entry, exit) anchor pair for `glyph`, if covered. Either anchor may be absent.
    pub fn anchors_for(&self, glyph: GlyphId) -> Option<(Option<AnchorTable>, Option<AnchorTable>)> {
        let coverage_index = self.coverage()?.index_of(glyph)?;
        let entry_exit_count: u16 = self.view.read_at(4)?;
        if coverage_index >= entry_exit_count {
            return None;
        }
        let base = 6 + coverage_index as usize * 4;
        let entry_offset: Offset16 = self.view.read_at(base)?;
        let exit_offset: Offset16 = self.view.read_at(base + 2)?;
        let entry = entry_offset
            .non_null()
            .and_then(|o| self.view.subview(o))
            .and_then(AnchorTable::read);
        let exit = exit_offset
            .non_null()
            .and_then(|o| self.view.subview(o))
            .and_then(AnchorTable::read);
        Some((entry, exit))
    }
}

/// A `MarkArray`: per-mark-glyph attach class and anchor, indexed by coverage order.
#[derive(Debug, Clone, Copy)]
pub struct MarkArrayTable<'a> {
    view: View<'a>,
}

impl<'a> MarkArrayTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        MarkArrayTable { view }
    }

    pub fn mark_count(&self) -> u16 {
        self.view.read_at(0).unwrap_or(0)
    }

    /// The (mark class, anchor) pair at `index`.
    pub fn mark_record(&self, index: u16) -> Option<(u16, AnchorTable)> {
        let base = 2 + index as usize * 4;
        let class: u16 = self.view.read_at(base)?;
        let anchor_offset: Offset16 = self.view.read_at(base + 2)?;
        let anchor = AnchorTable::read(self.view.subview(anchor_offset.non_null()?)?)?;
        Some((class, anchor))
    }
}

/// Lookup type 4: `MarkBasePos`.
#[derive(Debug, Clone, Copy)]
pub struct MarkBasePosTable<'a> {
    view: View<'a>,
}

impl<'a> MarkBasePosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        MarkBasePosTable { view }
    }

    pub fn mark_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn base_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(4)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn class_count(&self) -> u16 {
        self.view.read_at(6).unwrap_or(0)
    }

    pub fn mark_array(&self) -> Option<MarkArrayTable<'a>> {
        let offset: Offset16 = self.view.read_at(8)?;
        self.view.subview(offset.non_null()?).map(MarkArrayTable::new)
    }

    /// The base anchor for `base_index` (coverage order) and `class`, if present.
    pub fn base_anchor(&self, base_index: u16, class: u16) -> Option<AnchorTable> {
        let offset: Offset16 = self.view.read_at(10)?;
        let base_array = self.view.subview(offset.non_null()?)?;
        let base_count: u16 = base_array.read_at(0)?;
        if base_index >= base_count || class >= self.class_count() {
            return None;
        }
        let class_count = self.class_count();
        let at = 2 + (base_index as usize * class_count as usize + class as usize) * 2;
        let anchor_offset: Offset16 = base_array.read_at(at)?;
        AnchorTable::read(base_array.subview(anchor_offset.non_null()?)?)
    }
}

/// Lookup type 5: `MarkLigPos`.
#[derive(Debug, Clone, Copy)]
pub struct MarkLigPosTable<'a> {
    view: View<'a>,
}

impl<'a> MarkLigPosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        MarkLigPosTable { view }
    }

    pub fn mark_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn ligature_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(4)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn class_count(&self) -> u16 {
        self.view.read_at(6).unwrap_or(0)
    }

    pub fn mark_array(&self) -> Option<MarkArrayTable<'a>> {
        let offset: Offset16 = self.view.read_at(8)?;
        self.view.subview(offset.non_null()?).map(MarkArrayTable::new)
    }

    /// The anchor for a given ligature (coverage order), its component index, and `class`.
    pub fn ligature_anchor(
        &self,
        ligature_index: u16,
        component_index: u16,
        class: u16,
    ) -> Option<AnchorTable> {
        let offset: Offset16 = self.view.read_at(10)?;
        let lig_array = self.view.subview(offset.non_null()?)?;
        let lig_count: u16 = lig_array.read_at(0)?;
        if ligature_index >= lig_count {
            return None;
        }
        let attach_offset: Offset16 = lig_array.read_at(2 + ligature_index as usize * 2)?;
        let attach = lig_array.subview(attach_offset.non_null()?)?;
        let component_count: u16 = attach.read_at(0)?;
        let class_count = self.class_count();
        if component_index >= component_count || class >= class_count {
            return None;
        }
        let at = 2
            + (component_index as usize * class_count as usize + class as usize) * 2;
        let anchor_offset: Offset16 = attach.read_at(at)?;
        AnchorTable::read(attach.subview(anchor_offset.non_null()?)?)
    }
}

/// Lookup type 6: `MarkMarkPos`.
#[derive(Debug, Clone, Copy)]
pub struct MarkMarkPosTable<'a> {
    view: View<'a>,
}

impl<'a> MarkMarkPosTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        MarkMarkPosTable { view }
    }

    pub fn mark1_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn mark2_coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(4)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn class_count(&self) -> u16 {
        self.view.read_at(6).unwrap_or(0)
    }

    pub fn mark1_array(&self) -> Option<MarkArrayTable<'a>> {
        let offset: Offset16 = self.view.read_at(8)?;
        self.view.subview(offset.non_null()?).map(MarkArrayTable::new)
    }

    /// The mark2 anchor for `mark2_index` (coverage order) and `class`.
    pub fn mark2_anchor(&self, mark2_index: u16, class: u16) -> Option<AnchorTable> {
        let offset: Offset16 = self.view.read_at(10)?;
        let mark2_array = self.view.subview(offset.non_null()?)?;
        let mark2_count: u16 = mark2_array.read_at(0)?;
        let class_count = self.class_count();
        if mark2_index >= mark2_count || class >= class_count {
            return None;
        }
        let at = 2 + (mark2_index as usize * class_count as usize + class as usize) * 2;
        let anchor_offset: Offset16 = mark2_array.read_at(at)?;
        AnchorTable::read(mark2_array.subview(anchor_offset.non_null()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pos_format1_shares_one_record() {
        // format=1, coverageOffset=8, valueFormat=X_ADVANCE, value=50
        let mut bytes = Vec::new();
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(8u16.to_be_bytes());
        bytes.extend(ValueFormat::X_ADVANCE.bits().to_be_bytes());
        bytes.extend(50i16.to_be_bytes());
        // coverage format1 at offset 8: glyphCount=1, glyphs=[4]
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(4u16.to_be_bytes());
        let table = SinglePosTable::new(View::new(&bytes));
        let value = table.value_for(GlyphId::new(4)).unwrap();
        assert_eq!(value.x_advance, 50);
    }

    #[test]
    fn pair_pos_format1_finds_second_glyph() {
        // format=1, coverageOffset=10, valueFormat1=X_ADVANCE, valueFormat2=0, pairSetCount=1
        let mut bytes = Vec::new();
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(10u16.to_be_bytes());
        bytes.extend(ValueFormat::X_ADVANCE.bits().to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(16u16.to_be_bytes()); // pairSetOffsets[0]
        // coverage format1 at offset 10: glyphCount=1, glyphs=[5]
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(5u16.to_be_bytes());
        // pair set at offset 16: pairValueCount=1, secondGlyph=7, value1.xAdvance=-20
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(7u16.to_be_bytes());
        bytes.extend((-20i16).to_be_bytes());
        let table = PairPosTable::new(View::new(&bytes));
        let (v1, _v2) = table
            .values_for_pair(GlyphId::new(5), GlyphId::new(7))
            .unwrap();
        assert_eq!(v1.x_advance, -20);
        assert!(table.values_for_pair(GlyphId::new(5), GlyphId::new(8)).is_none());
    }
}
