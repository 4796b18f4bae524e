//! Raw field access for the six GSUB lookup subtable families (lookup types 1, 2, 4, 5, 6, 8;
//! type 3 Alternate and type 7 Extension need no dedicated reader, see `shape-core`).

use ot_types::{GlyphId, Offset16};

use crate::coverage::CoverageTable;
use crate::view::{read_array, View};

/// Lookup type 1: `SingleSubst`.
#[derive(Debug, Clone, Copy)]
pub struct SingleSubstTable<'a> {
    view: View<'a>,
}

/// The two `SingleSubst` formats: a uniform glyph-id delta, or an explicit substitute array.
pub enum SingleSubst {
    Delta(i16),
    Substitutes,
}

impl<'a> SingleSubstTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SingleSubstTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    /// Apply this subtable to `glyph`, returning the substitute glyph id if covered.
    pub fn substitute(&self, glyph: GlyphId) -> Option<GlyphId> {
        let format: u16 = self.view.read_at(0)?;
        let coverage_index = self.coverage()?.index_of(glyph)?;
        match format {
            1 => {
                let delta: i16 = self.view.read_at(4)?;
                Some(GlyphId::new((glyph.to_u16() as i32 + delta as i32) as u16))
            }
            2 => {
                let glyph_count: u16 = self.view.read_at(4)?;
                if coverage_index >= glyph_count {
                    return None;
                }
                self.view.read_at(6 + coverage_index as usize * 2)
            }
            other => {
                log::warn!("single subst: unsupported format {other}");
                None
            }
        }
    }
}

/// Lookup type 2: `MultipleSubst`, format 1 only (the only format OpenType defines).
#[derive(Debug, Clone, Copy)]
pub struct MultipleSubstTable<'a> {
    view: View<'a>,
}

impl<'a> MultipleSubstTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        MultipleSubstTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    /// The `Sequence` table for `glyph`, if it is covered.
    pub fn sequence_for(&self, glyph: GlyphId) -> Option<SequenceTable<'a>> {
        let format: u16 = self.view.read_at(0)?;
        if format != 1 {
            log::warn!("multiple subst: unsupported format {format}");
            return None;
        }
        let coverage_index = self.coverage()?.index_of(glyph)?;
        let sequence_count: u16 = self.view.read_at(4)?;
        if coverage_index >= sequence_count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(6 + coverage_index as usize * 2)?;
        self.view.subview(offset.non_null()?).map(SequenceTable::new)
    }
}

/// The `Sequence` table a `MultipleSubst` coverage hit points at: the run of glyphs a single
/// input glyph expands into.
#[derive(Debug, Clone, Copy)]
pub struct SequenceTable<'a> {
    view: View<'a>,
}

impl<'a> SequenceTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SequenceTable { view }
    }

    pub fn substitutes(&self) -> Vec<GlyphId> {
        let count: u16 = self.view.read_at(0).unwrap_or(0);
        read_array(&self.view, 2, count as usize).unwrap_or_default()
    }
}

/// Lookup type 4: `LigatureSubst`, format 1 only.
#[derive(Debug, Clone, Copy)]
pub struct LigatureSubstTable<'a> {
    view: View<'a>,
}

impl<'a> LigatureSubstTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        LigatureSubstTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn ligature_set_for(&self, glyph: GlyphId) -> Option<LigatureSetTable<'a>> {
        let format: u16 = self.view.read_at(0)?;
        if format != 1 {
            log::warn!("ligature subst: unsupported format {format}");
            return None;
        }
        let coverage_index = self.coverage()?.index_of(glyph)?;
        let lig_set_count: u16 = self.view.read_at(4)?;
        if coverage_index >= lig_set_count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(6 + coverage_index as usize * 2)?;
        self.view
            .subview(offset.non_null()?)
            .map(LigatureSetTable::new)
    }
}

/// A `LigatureSet`: the candidate ligatures for one coverage glyph, in preference order.
#[derive(Debug, Clone, Copy)]
pub struct LigatureSetTable<'a> {
    view: View<'a>,
}

impl<'a> LigatureSetTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        LigatureSetTable { view }
    }

    pub fn ligature_count(&self) -> u16 {
        self.view.read_at(0).unwrap_or(0)
    }

    pub fn ligature(&self, index: u16) -> Option<LigatureTable<'a>> {
        let offset: Offset16 = self.view.read_at(2 + index as usize * 2)?;
        self.view.subview(offset.non_null()?).map(LigatureTable::new)
    }
}

/// A single `Ligature` candidate: the glyph it produces, and the components (after the first,
/// already-matched coverage glyph) it requires.
#[derive(Debug, Clone, Copy)]
pub struct LigatureTable<'a> {
    view: View<'a>,
}

impl<'a> LigatureTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        LigatureTable { view }
    }

    pub fn ligature_glyph(&self) -> Option<GlyphId> {
        self.view.read_at(0)
    }

    /// Total component count, *including* the first glyph matched via coverage.
    pub fn component_count(&self) -> u16 {
        self.view.read_at(2).unwrap_or(0)
    }

    /// The component glyphs *after* the first, i.e. `component_count() - 1` entries.
    pub fn components(&self) -> Vec<GlyphId> {
        let count = self.component_count().saturating_sub(1);
        read_array(&self.view, 4, count as usize).unwrap_or_default()
    }
}

/// Lookup type 8: `ReverseChainSingleSubst`, format 1 only.
#[derive(Debug, Clone, Copy)]
pub struct ReverseChainSingleSubstTable<'a> {
    view: View<'a>,
}

impl<'a> ReverseChainSingleSubstTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        ReverseChainSingleSubstTable { view }
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn backtrack_coverages(&self) -> Vec<CoverageTable<'a>> {
        let count: u16 = self.view.read_at(4).unwrap_or(0);
        self.coverage_array(6, count)
    }

    fn lookahead_offset_base(&self) -> usize {
        let backtrack_count: u16 = self.view.read_at(4).unwrap_or(0);
        6 + backtrack_count as usize * 2
    }

    pub fn lookahead_coverages(&self) -> Vec<CoverageTable<'a>> {
        let base = self.lookahead_offset_base();
        let count: u16 = self.view.read_at(base).unwrap_or(0);
        self.coverage_array(base + 2, count)
    }

    fn substitutes_offset_base(&self) -> usize {
        let base = self.lookahead_offset_base();
        let lookahead_count: u16 = self.view.read_at(base).unwrap_or(0);
        base + 2 + lookahead_count as usize * 2
    }

    pub fn substitutes(&self) -> Vec<GlyphId> {
        let base = self.substitutes_offset_base();
        let count: u16 = self.view.read_at(base).unwrap_or(0);
        read_array(&self.view, base + 2, count as usize).unwrap_or_default()
    }

    fn coverage_array(&self, offset: usize, count: u16) -> Vec<CoverageTable<'a>> {
        (0..count)
            .filter_map(|i| {
                let off: Offset16 = self.view.read_at(offset + i as usize * 2)?;
                self.view.subview(off.non_null()?).map(CoverageTable::new)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_subst_format1_applies_delta() {
        // format=1, coverageOffset=6, deltaGlyphID=99
        let mut bytes = vec![0x00, 0x01];
        bytes.extend(6u16.to_be_bytes());
        bytes.extend(99i16.to_be_bytes());
        // coverage format1 at offset 6: glyphCount=1, glyphs=[1]
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        let table = SingleSubstTable::new(View::new(&bytes));
        assert_eq!(table.substitute(GlyphId::new(1)), Some(GlyphId::new(100)));
        assert_eq!(table.substitute(GlyphId::new(2)), None);
    }

    #[test]
    fn ligature_reads_components_after_first() {
        // ligGlyph=100, compCount=3, components=[2,3]
        let mut bytes = Vec::new();
        bytes.extend(100u16.to_be_bytes());
        bytes.extend(3u16.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        bytes.extend(3u16.to_be_bytes());
        let lig = LigatureTable::new(View::new(&bytes));
        assert_eq!(lig.ligature_glyph(), Some(GlyphId::new(100)));
        assert_eq!(
            lig.components(),
            vec![GlyphId::new(2), GlyphId::new(3)]
        );
    }
}
