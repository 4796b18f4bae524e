//! `SequenceContext` and `ChainedSequenceContext`: the shared table shapes behind GSUB lookup
//! types 5/6 and GPOS lookup types 7/8. Both come in three formats (simple glyph sequences,
//! class sequences, and explicit coverage lists) and both carry the same `SequenceLookupRecord`
//! array describing which nested lookups to invoke at which input position.

use ot_types::{GlyphId, Offset16};

use crate::class_def::ClassDefTable;
use crate::coverage::CoverageTable;
use crate::view::{read_array, View};

/// One entry in a context rule's nested-lookup application list: apply `lookup_list_index` at
/// input position `sequence_index` (0-based, relative to the rule's first input glyph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceLookupRecord {
    pub sequence_index: u16,
    pub lookup_list_index: u16,
}

fn read_lookup_records(view: &View<'_>, offset: usize, count: u16) -> Vec<SequenceLookupRecord> {
    (0..count)
        .filter_map(|i| {
            let base = offset + i as usize * 4;
            let sequence_index: u16 = view.read_at(base)?;
            let lookup_list_index: u16 = view.read_at(base + 2)?;
            Some(SequenceLookupRecord { sequence_index, lookup_list_index })
        })
        .collect()
}

/// A single format-1/2 context rule: the input glyphs or classes after the first (already
/// matched via coverage/class), plus the lookups to invoke on a match.
#[derive(Debug, Clone, Copy)]
pub struct SequenceRuleTable<'a> {
    view: View<'a>,
}

impl<'a> SequenceRuleTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SequenceRuleTable { view }
    }

    /// Glyph ids (format 1) or class ids (format 2) for input positions `1..glyphCount`.
    pub fn input_sequence(&self) -> Vec<u16> {
        let glyph_count: u16 = self.view.read_at(0).unwrap_or(0);
        let count = glyph_count.saturating_sub(1);
        read_array(&self.view, 4, count as usize).unwrap_or_default()
    }

    pub fn lookup_records(&self) -> Vec<SequenceLookupRecord> {
        let glyph_count: u16 = self.view.read_at(0).unwrap_or(0);
        let seq_lookup_count: u16 = self.view.read_at(2).unwrap_or(0);
        let offset = 4 + glyph_count.saturating_sub(1) as usize * 2;
        read_lookup_records(&self.view, offset, seq_lookup_count)
    }
}

/// A `SequenceRuleSet` / `ClassSequenceRuleSet`: the ordered rule alternatives for one starting
/// glyph or class.
#[derive(Debug, Clone, Copy)]
pub struct SequenceRuleSetTable<'a> {
    view: View<'a>,
}

impl<'a> SequenceRuleSetTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SequenceRuleSetTable { view }
    }

    pub fn rule_count(&self) -> u16 {
        self.view.read_at(0).unwrap_or(0)
    }

    pub fn rule(&self, index: u16) -> Option<SequenceRuleTable<'a>> {
        let offset: Offset16 = self.view.read_at(2 + index as usize * 2)?;
        self.view.subview(offset.non_null()?).map(SequenceRuleTable::new)
    }
}

/// `SequenceContext`: GSUB lookup type 5 / GPOS lookup type 7.
#[derive(Debug, Clone, Copy)]
pub struct SequenceContextTable<'a> {
    view: View<'a>,
}

impl<'a> SequenceContextTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        SequenceContextTable { view }
    }

    pub fn format(&self) -> Option<u16> {
        self.view.read_at(0)
    }

    /// Format 1 only: the coverage table used to select a starting rule set.
    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    /// Format 1: rule set for a coverage index.
    pub fn rule_set(&self, coverage_index: u16) -> Option<SequenceRuleSetTable<'a>> {
        let count: u16 = self.view.read_at(4)?;
        if coverage_index >= count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(6 + coverage_index as usize * 2)?;
        self.view.subview(offset.non_null()?).map(SequenceRuleSetTable::new)
    }

    /// Format 2: the `ClassDef` used to classify input glyphs.
    pub fn class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: Offset16 = self.view.read_at(4)?;
        self.view.subview(offset.non_null()?).map(ClassDefTable::new)
    }

    /// Format 2: rule set for a glyph class.
    pub fn class_rule_set(&self, class: u16) -> Option<SequenceRuleSetTable<'a>> {
        let count: u16 = self.view.read_at(6)?;
        if class >= count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(8 + class as usize * 2)?;
        self.view.subview(offset.non_null()?).map(SequenceRuleSetTable::new)
    }

    /// Format 3: the per-position coverage tables and the trailing lookup records.
    pub fn coverage_array(&self) -> Option<(Vec<CoverageTable<'a>>, Vec<SequenceLookupRecord>)> {
        let glyph_count: u16 = self.view.read_at(2)?;
        let seq_lookup_count: u16 = self.view.read_at(4)?;
        let coverages = (0..glyph_count)
            .filter_map(|i| {
                let offset: Offset16 = self.view.read_at(6 + i as usize * 2)?;
                self.view.subview(offset.non_null()?).map(CoverageTable::new)
            })
            .collect();
        let lookup_offset = 6 + glyph_count as usize * 2;
        let records = read_lookup_records(&self.view, lookup_offset, seq_lookup_count);
        Some((coverages, records))
    }
}

/// A chained context rule: backtrack/input/lookahead glyph or class sequences plus lookup
/// records. Shared by `ChainedSequenceContext` formats 1 and 2 (glyph ids vs class ids).
#[derive(Debug, Clone, Copy)]
pub struct ChainedSequenceRuleTable<'a> {
    view: View<'a>,
}

impl<'a> ChainedSequenceRuleTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        ChainedSequenceRuleTable { view }
    }

    pub fn backtrack_sequence(&self) -> Vec<u16> {
        let count: u16 = self.view.read_at(0).unwrap_or(0);
        read_array(&self.view, 2, count as usize).unwrap_or_default()
    }

    fn input_offset(&self) -> usize {
        let backtrack_count: u16 = self.view.read_at(0).unwrap_or(0);
        2 + backtrack_count as usize * 2
    }

    /// Input positions `1..inputGlyphCount` (the first is matched via coverage/class already).
    pub fn input_sequence(&self) -> Vec<u16> {
        let offset = self.input_offset();
        let input_count: u16 = self.view.read_at(offset).unwrap_or(0);
        read_array(&self.view, offset + 2, input_count.saturating_sub(1) as usize)
            .unwrap_or_default()
    }

    fn lookahead_offset(&self) -> usize {
        let offset = self.input_offset();
        let input_count: u16 = self.view.read_at(offset).unwrap_or(0);
        offset + 2 + input_count.saturating_sub(1) as usize * 2
    }

    pub fn lookahead_sequence(&self) -> Vec<u16> {
        let offset = self.lookahead_offset();
        let count: u16 = self.view.read_at(offset).unwrap_or(0);
        read_array(&self.view, offset + 2, count as usize).unwrap_or_default()
    }

    pub fn lookup_records(&self) -> Vec<SequenceLookupRecord> {
        let offset = self.lookahead_offset();
        let lookahead_count: u16 = self.view.read_at(offset).unwrap_or(0);
        let records_offset = offset + 2 + lookahead_count as usize * 2;
        let seq_lookup_count: u16 = self.view.read_at(records_offset).unwrap_or(0);
        read_lookup_records(&self.view, records_offset + 2, seq_lookup_count)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChainedSequenceRuleSetTable<'a> {
    view: View<'a>,
}

impl<'a> ChainedSequenceRuleSetTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        ChainedSequenceRuleSetTable { view }
    }

    pub fn rule_count(&self) -> u16 {
        self.view.read_at(0).unwrap_or(0)
    }

    pub fn rule(&self, index: u16) -> Option<ChainedSequenceRuleTable<'a>> {
        let offset: Offset16 = self.view.read_at(2 + index as usize * 2)?;
        self.view
            .subview(offset.non_null()?)
            .map(ChainedSequenceRuleTable::new)
    }
}

/// `ChainedSequenceContext`: GSUB lookup type 6 / GPOS lookup type 8.
#[derive(Debug, Clone, Copy)]
pub struct ChainedSequenceContextTable<'a> {
    view: View<'a>,
}

impl<'a> ChainedSequenceContextTable<'a> {
    pub fn new(view: View<'a>) -> Self {
        ChainedSequenceContextTable { view }
    }

    pub fn format(&self) -> Option<u16> {
        self.view.read_at(0)
    }

    pub fn coverage(&self) -> Option<CoverageTable<'a>> {
        let offset: Offset16 = self.view.read_at(2)?;
        self.view.subview(offset.non_null()?).map(CoverageTable::new)
    }

    pub fn rule_set(&self, coverage_index: u16) -> Option<ChainedSequenceRuleSetTable<'a>> {
        let count: u16 = self.view.read_at(4)?;
        if coverage_index >= count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(6 + coverage_index as usize * 2)?;
        self.view
            .subview(offset.non_null()?)
            .map(ChainedSequenceRuleSetTable::new)
    }

    pub fn backtrack_class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: Offset16 = self.view.read_at(4)?;
        self.view.subview(offset.non_null()?).map(ClassDefTable::new)
    }

    pub fn input_class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: Offset16 = self.view.read_at(6)?;
        self.view.subview(offset.non_null()?).map(ClassDefTable::new)
    }

    pub fn lookahead_class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: Offset16 = self.view.read_at(8)?;
        self.view.subview(offset.non_null()?).map(ClassDefTable::new)
    }

    pub fn class_rule_set(&self, class: u16) -> Option<ChainedSequenceRuleSetTable<'a>> {
        let count: u16 = self.view.read_at(10)?;
        if class >= count {
            return None;
        }
        let offset: Offset16 = self.view.read_at(12 + class as usize * 2)?;
        self.view
            .subview(offset.non_null()?)
            .map(ChainedSequenceRuleSetTable::new)
    }

    /// Format 3: backtrack/input/lookahead coverage arrays plus trailing lookup records.
    #[allow(clippy::type_complexity)]
    pub fn coverage_arrays(
        &self,
    ) -> Option<(
        Vec<CoverageTable<'a>>,
        Vec<CoverageTable<'a>>,
        Vec<CoverageTable<'a>>,
        Vec<SequenceLookupRecord>,
    )> {
        let backtrack_count: u16 = self.view.read_at(2)?;
        let backtrack = self.read_coverage_run(4, backtrack_count)?;
        let input_offset = 4 + backtrack_count as usize * 2;
        let input_count: u16 = self.view.read_at(input_offset)?;
        let input = self.read_coverage_run(input_offset + 2, input_count)?;
        let lookahead_offset = input_offset + 2 + input_count as usize * 2;
        let lookahead_count: u16 = self.view.read_at(lookahead_offset)?;
        let lookahead = self.read_coverage_run(lookahead_offset + 2, lookahead_count)?;
        let records_offset = lookahead_offset + 2 + lookahead_count as usize * 2;
        let seq_lookup_count: u16 = self.view.read_at(records_offset)?;
        let records = read_lookup_records(&self.view, records_offset + 2, seq_lookup_count);
        Some((backtrack, input, lookahead, records))
    }

    fn read_coverage_run(&self, offset: usize, count: u16) -> Option<Vec<CoverageTable<'a>>> {
        (0..count)
            .map(|i| {
                let off: Offset16 = self.view.read_at(offset + i as usize * 2)?;
                self.view.subview(off.non_null()?).map(CoverageTable::new)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ot_types::GlyphId;

    #[test]
    fn sequence_rule_reads_input_and_lookups() {
        // glyphCount=3, seqLookupCount=1, inputSequence=[20, 30], lookupRecords=[(1, 5)]
        let mut bytes = Vec::new();
        bytes.extend(3u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(20u16.to_be_bytes());
        bytes.extend(30u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(5u16.to_be_bytes());
        let rule = SequenceRuleTable::new(View::new(&bytes));
        assert_eq!(rule.input_sequence(), vec![20, 30]);
        assert_eq!(
            rule.lookup_records(),
            vec![SequenceLookupRecord { sequence_index: 1, lookup_list_index: 5 }]
        );
    }

    #[test]
    fn chained_rule_reads_all_three_sequences() {
        // backtrackGlyphCount=1, backtrack=[1]; inputGlyphCount=2, input=[2]; lookaheadCount=1,
        // lookahead=[3]; seqLookupCount=1, lookupRecords=[(0, 9)]
        let mut bytes = Vec::new();
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(3u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(9u16.to_be_bytes());
        let rule = ChainedSequenceRuleTable::new(View::new(&bytes));
        assert_eq!(rule.backtrack_sequence(), vec![1]);
        assert_eq!(rule.input_sequence(), vec![2]);
        assert_eq!(rule.lookahead_sequence(), vec![3]);
        assert_eq!(
            rule.lookup_records(),
            vec![SequenceLookupRecord { sequence_index: 0, lookup_list_index: 9 }]
        );
    }

    #[test]
    fn format3_coverage_array_reads_three_runs() {
        // format=3, backtrackGlyphCount=0, inputGlyphCount=1 cov@14, lookaheadGlyphCount=0,
        // seqLookupCount=1 record=(0,2)
        let mut bytes = Vec::new();
        bytes.extend(3u16.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(14u16.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        bytes.extend(2u16.to_be_bytes());
        // coverage format1 at offset 14: glyphCount=1, glyphs=[42]
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(1u16.to_be_bytes());
        bytes.extend(42u16.to_be_bytes());
        let table = ChainedSequenceContextTable::new(View::new(&bytes));
        let (backtrack, input, lookahead, records) = table.coverage_arrays().unwrap();
        assert!(backtrack.is_empty());
        assert!(lookahead.is_empty());
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].index_of(GlyphId::new(42)), Some(0));
        assert_eq!(records, vec![SequenceLookupRecord { sequence_index: 0, lookup_list_index: 2 }]);
    }
}
