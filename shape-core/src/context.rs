//! Shared matcher for contextual and chained-contextual lookup families (GSUB types 5/6, GPOS
//! types 7/8): the same three rule-matching strategies regardless of which applier owns the
//! enclosing lookup, and the same "invoke nested lookups, then resync the outer locator" tail.

use ot_tables::{
    ChainedSequenceContextTable, ClassDefTable, CoverageTable, SequenceContextTable,
    SequenceLookupRecord,
};
use ot_types::GlyphId;

use crate::album::Album;
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;
use crate::pattern::LookupKind;

/// The glyph-assessment predicate a rule step is judged against (design note §9's
/// `AssessKind` sum type).
enum AssessKind<'a> {
    ByEquality(GlyphId),
    ByClass { class: u16, def: ClassDefTable<'a> },
    ByCoverage(CoverageTable<'a>),
}

impl<'a> AssessKind<'a> {
    fn matches(&self, glyph: GlyphId) -> bool {
        match self {
            AssessKind::ByEquality(expected) => *expected == glyph,
            AssessKind::ByClass { class, def } => def.class_of(glyph) == *class,
            AssessKind::ByCoverage(coverage) => coverage.index_of(glyph).is_some(),
        }
    }
}

fn match_forward<'f>(
    locator: &Locator<'f>,
    album: &Album,
    mark_attach_class_of: impl Fn(usize) -> u16 + Copy,
    mut pos: usize,
    kinds: &[AssessKind<'_>],
) -> Option<usize> {
    for kind in kinds {
        let next = locator.get_after(album, pos, mark_attach_class_of)?;
        if !kind.matches(album.glyph(next)) {
            return None;
        }
        pos = next + 1;
    }
    Some(pos)
}

fn match_backward<'f>(
    locator: &Locator<'f>,
    album: &Album,
    mark_attach_class_of: impl Fn(usize) -> u16 + Copy,
    mut pos: usize,
    kinds: &[AssessKind<'_>],
) -> Option<bool> {
    for kind in kinds {
        let prev = locator.get_before(album, pos, mark_attach_class_of)?;
        if !kind.matches(album.glyph(prev)) {
            return Some(false);
        }
        pos = prev;
    }
    Some(true)
}

/// After a successful rule match, walk its `SequenceLookupRecord`s: for each, build a
/// context-bounded locator over `[context_start, context_end)`, jump to the record's input
/// position, and recurse into the dispatcher for the named nested lookup. Afterward the outer
/// locator adopts the inner locator's final state (`take_state`, §4.6/§9) so later iteration
/// accounts for any glyph count change a nested substitution made.
fn apply_lookup_records<'f, F: Font>(
    engine: &Engine<'f, F>,
    kind: LookupKind,
    album: &mut Album,
    outer: &mut Locator<'f>,
    context_start: usize,
    context_end: usize,
    records: &[SequenceLookupRecord],
) -> Result<bool> {
    let mut end = context_end;
    for record in records {
        let mut inner = Locator::new(album, context_start, end);
        inner.jump_to(context_start);
        if !inner.move_next(album, |i| engine.mark_attach_class_of(album, i))? {
            continue;
        }
        if record.sequence_index > 0
            && !inner.skip(album, record.sequence_index as usize, |i| {
                engine.mark_attach_class_of(album, i)
            })?
        {
            continue;
        }
        let Some(target) = inner.index() else { continue };
        let before = album.glyph_count();
        let applied = match kind {
            LookupKind::Gsub => engine.apply_gsub_lookup(record.lookup_list_index, album, &mut inner, target)?,
            LookupKind::Gpos => engine.apply_gpos_lookup(record.lookup_list_index, album, &mut inner, target)?,
        };
        if applied {
            let after = album.glyph_count();
            end += after - before;
        }
        outer.take_state(&inner);
    }
    Ok(true)
}

/// GSUB type 5 / GPOS type 7: `SequenceContext`.
pub fn apply_sequence_context<'f, F: Font>(
    engine: &Engine<'f, F>,
    kind: LookupKind,
    table: SequenceContextTable<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let mark_class = |i: usize| engine.mark_attach_class_of(album, i);
    match table.format() {
        Some(1) => {
            let Some(coverage) = table.coverage() else { return Ok(false) };
            let Some(coverage_index) = coverage.index_of(album.glyph(index)) else {
                return Ok(false);
            };
            let Some(rule_set) = table.rule_set(coverage_index) else { return Ok(false) };
            for rule_index in 0..rule_set.rule_count() {
                let Some(rule) = rule_set.rule(rule_index) else { continue };
                let kinds: Vec<AssessKind> = rule
                    .input_sequence()
                    .into_iter()
                    .map(|g| AssessKind::ByEquality(GlyphId::new(g)))
                    .collect();
                if let Some(end) = match_forward(locator, album, mark_class, index + 1, &kinds) {
                    return apply_lookup_records(
                        engine,
                        kind,
                        album,
                        locator,
                        index,
                        end,
                        &rule.lookup_records(),
                    );
                }
            }
            Ok(false)
        }
        Some(2) => {
            let Some(coverage) = table.coverage() else { return Ok(false) };
            if coverage.index_of(album.glyph(index)).is_none() {
                return Ok(false);
            }
            let Some(class_def) = table.class_def() else { return Ok(false) };
            let class = class_def.class_of(album.glyph(index));
            let Some(rule_set) = table.class_rule_set(class) else { return Ok(false) };
            for rule_index in 0..rule_set.rule_count() {
                let Some(rule) = rule_set.rule(rule_index) else { continue };
                let kinds: Vec<AssessKind> = rule
                    .input_sequence()
                    .into_iter()
                    .map(|c| AssessKind::ByClass { class: c, def: class_def })
                    .collect();
                if let Some(end) = match_forward(locator, album, mark_class, index + 1, &kinds) {
                    return apply_lookup_records(
                        engine,
                        kind,
                        album,
                        locator,
                        index,
                        end,
                        &rule.lookup_records(),
                    );
                }
            }
            Ok(false)
        }
        Some(3) => {
            let Some((coverages, records)) = table.coverage_array() else { return Ok(false) };
            let Some(first) = coverages.first() else { return Ok(false) };
            if first.index_of(album.glyph(index)).is_none() {
                return Ok(false);
            }
            let kinds: Vec<AssessKind> =
                coverages[1..].iter().map(|c| AssessKind::ByCoverage(*c)).collect();
            match match_forward(locator, album, mark_class, index + 1, &kinds) {
                Some(end) => {
                    apply_lookup_records(engine, kind, album, locator, index, end, &records)
                }
                None => Ok(false),
            }
        }
        _ => Ok(false),
    }
}

/// GSUB type 6 / GPOS type 8: `ChainedSequenceContext`.
pub fn apply_chained_sequence_context<'f, F: Font>(
    engine: &Engine<'f, F>,
    kind: LookupKind,
    table: ChainedSequenceContextTable<'f>,
    album: &mut Album,
    locator: &mut Locator<'f>,
    index: usize,
) -> Result<bool> {
    let mark_class = |i: usize| engine.mark_attach_class_of(album, i);
    match table.format() {
        Some(1) => {
            let Some(coverage) = table.coverage() else { return Ok(false) };
            let Some(coverage_index) = coverage.index_of(album.glyph(index)) else {
                return Ok(false);
            };
            let Some(rule_set) = table.rule_set(coverage_index) else { return Ok(false) };
            for rule_index in 0..rule_set.rule_count() {
                let Some(rule) = rule_set.rule(rule_index) else { continue };
                let backtrack: Vec<AssessKind> = rule
                    .backtrack_sequence()
                    .into_iter()
                    .map(|g| AssessKind::ByEquality(GlyphId::new(g)))
                    .collect();
                let input: Vec<AssessKind> = rule
                    .input_sequence()
                    .into_iter()
                    .map(|g| AssessKind::ByEquality(GlyphId::new(g)))
                    .collect();
                let lookahead: Vec<AssessKind> = rule
                    .lookahead_sequence()
                    .into_iter()
                    .map(|g| AssessKind::ByEquality(GlyphId::new(g)))
                    .collect();
                if match_backward(locator, album, mark_class, index, &backtrack) != Some(true) {
                    continue;
                }
                let Some(end) = match_forward(locator, album, mark_class, index + 1, &input) else {
                    continue;
                };
                if match_forward(locator, album, mark_class, end, &lookahead).is_none() {
                    continue;
                }
                return apply_lookup_records(
                    engine,
                    kind,
                    album,
                    locator,
                    index,
                    end,
                    &rule.lookup_records(),
                );
            }
            Ok(false)
        }
        Some(2) => {
            let Some(coverage) = table.coverage() else { return Ok(false) };
            if coverage.index_of(album.glyph(index)).is_none() {
                return Ok(false);
            }
            let (Some(back_def), Some(input_def), Some(ahead_def)) = (
                table.backtrack_class_def(),
                table.input_class_def(),
                table.lookahead_class_def(),
            ) else {
                return Ok(false);
            };
            let class = input_def.class_of(album.glyph(index));
            let Some(rule_set) = table.class_rule_set(class) else { return Ok(false) };
            for rule_index in 0..rule_set.rule_count() {
                let Some(rule) = rule_set.rule(rule_index) else { continue };
                let backtrack: Vec<AssessKind> = rule
                    .backtrack_sequence()
                    .into_iter()
                    .map(|c| AssessKind::ByClass { class: c, def: back_def })
                    .collect();
                let input: Vec<AssessKind> = rule
                    .input_sequence()
                    .into_iter()
                    .map(|c| AssessKind::ByClass { class: c, def: input_def })
                    .collect();
                let lookahead: Vec<AssessKind> = rule
                    .lookahead_sequence()
                    .into_iter()
                    .map(|c| AssessKind::ByClass { class: c, def: ahead_def })
                    .collect();
                if match_backward(locator, album, mark_class, index, &backtrack) != Some(true) {
                    continue;
                }
                let Some(end) = match_forward(locator, album, mark_class, index + 1, &input) else {
                    continue;
                };
                if match_forward(locator, album, mark_class, end, &lookahead).is_none() {
                    continue;
                }
                return apply_lookup_records(
                    engine,
                    kind,
                    album,
                    locator,
                    index,
                    end,
                    &rule.lookup_records(),
                );
            }
            Ok(false)
        }
        Some(3) => {
            let Some((backtrack_cov, input_cov, lookahead_cov, records)) =
                table.coverage_arrays()
            else {
                return Ok(false);
            };
            let Some(first) = input_cov.first() else { return Ok(false) };
            if first.index_of(album.glyph(index)).is_none() {
                return Ok(false);
            }
            let backtrack: Vec<AssessKind> =
                backtrack_cov.iter().map(|c| AssessKind::ByCoverage(*c)).collect();
            let input: Vec<AssessKind> =
                input_cov[1..].iter().map(|c| AssessKind::ByCoverage(*c)).collect();
            let lookahead: Vec<AssessKind> =
                lookahead_cov.iter().map(|c| AssessKind::ByCoverage(*c)).collect();
            if match_backward(locator, album, mark_class, index, &backtrack) != Some(true) {
                return Ok(false);
            }
            let Some(end) = match_forward(locator, album, mark_class, index + 1, &input) else {
                return Ok(false);
            };
            if match_forward(locator, album, mark_class, end, &lookahead).is_none() {
                return Ok(false);
            }
            apply_lookup_records(engine, kind, album, locator, index, end, &records)
        }
        _ => Ok(false),
    }
}
