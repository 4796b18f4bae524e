//! End-to-end shaping scenarios driving [`TextProcessor::shape`] over hand-built GSUB/GPOS
//! byte tables, mirroring the worked examples a shaping-core's own test suite would carry.

mod common;

use common::{coverage_format1, multi_lookup_table, single_lookup_table, Buf};
use ot_types::{GlyphId, Tag};
use shape_core::{
    FeatureUnit, GlyphTraits, LookupKind, Pattern, ShapedGlyph, StaticFont, TextDirection,
    TextProcessor,
};

fn identity_font<'a>(gsub: &'a [u8], gpos: &'a [u8]) -> StaticFont<'a, impl Fn(u32) -> GlyphId, impl Fn(shape_core::Layout, GlyphId) -> i32> {
    StaticFont {
        gdef: &[],
        gsub,
        gpos,
        glyph_for_codepoint: |cp: u32| GlyphId::new(cp as u16),
        advance_for_glyph: |_layout, _glyph| 10,
    }
}

fn single_unit(kind: LookupKind, lookup_index: u16) -> Pattern {
    Pattern::new(
        Tag::new(b"DFLT"),
        Tag::new(b"dflt"),
        TextDirection::LeftToRight,
        vec![FeatureUnit {
            kind,
            covered_tags: vec![],
            required_traits: GlyphTraits::empty(),
            lookup_indexes: vec![lookup_index],
            feature_mask: 0x0001,
        }],
    )
}

fn glyphs(run: &shape_core::ShapedRun) -> Vec<u16> {
    run.glyphs.iter().map(|g: &ShapedGlyph| g.glyph.to_u16()).collect()
}

#[test]
fn single_subst_applies_delta_to_covered_glyph() {
    let _ = env_logger::builder().is_test(true).try_init();
    let gsub = single_lookup_table(1, 0, |buf| {
        let subtable_base = buf.len();
        buf.u16(1); // format
        let cov_pos = buf.reserve_offset();
        buf.i16(99); // delta
        buf.place_here(cov_pos, subtable_base);
        coverage_format1(buf, &[1]);
    });
    let font = identity_font(&gsub, &[]);
    let pattern = single_unit(LookupKind::Gsub, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1]).unwrap();
    assert_eq!(glyphs(&run), vec![100]);
    assert_eq!(run.glyphs[0].text_index, 0);
}

#[test]
fn single_subst_leaves_uncovered_glyph_unchanged() {
    let gsub = single_lookup_table(1, 0, |buf| {
        let subtable_base = buf.len();
        buf.u16(1);
        let cov_pos = buf.reserve_offset();
        buf.i16(99);
        buf.place_here(cov_pos, subtable_base);
        coverage_format1(buf, &[0]); // covers glyph 0, not 1
    });
    let font = identity_font(&gsub, &[]);
    let pattern = single_unit(LookupKind::Gsub, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1]).unwrap();
    assert_eq!(glyphs(&run), vec![1]);
}

#[test]
fn multiple_subst_expands_one_glyph_into_three() {
    let gsub = single_lookup_table(2, 0, |buf| {
        let subtable_base = buf.len();
        buf.u16(1); // format
        let cov_pos = buf.reserve_offset();
        buf.u16(1); // sequenceCount
        let seq_pos = buf.reserve_offset();
        buf.place_here(seq_pos, subtable_base);
        buf.u16(3); // glyphCount
        buf.u16(100);
        buf.u16(200);
        buf.u16(300);
        buf.place_here(cov_pos, subtable_base);
        coverage_format1(buf, &[1]);
    });
    let font = identity_font(&gsub, &[]);
    let pattern = single_unit(LookupKind::Gsub, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1]).unwrap();
    assert_eq!(glyphs(&run), vec![100, 200, 300]);
    assert!(run.glyphs.iter().all(|g| g.text_index == 0));
}

#[test]
fn ligature_merges_three_inputs_and_hides_placeholders() {
    let gsub = single_lookup_table(4, 0, |buf| {
        let subtable_base = buf.len();
        buf.u16(1); // format
        let cov_pos = buf.reserve_offset();
        buf.u16(1); // ligSetCount
        let ligset_pos = buf.reserve_offset();
        buf.place_here(ligset_pos, subtable_base);

        let ligset_base = buf.len();
        buf.u16(1); // ligatureCount
        let lig_pos = buf.reserve_offset();
        buf.place_here(lig_pos, ligset_base);

        buf.u16(100); // ligGlyph
        buf.u16(3); // componentCount (including the first, coverage-matched glyph)
        buf.u16(2); // component[0]
        buf.u16(3); // component[1]

        buf.place_here(cov_pos, subtable_base);
        coverage_format1(buf, &[1]);
    });
    let font = identity_font(&gsub, &[]);
    let pattern = single_unit(LookupKind::Gsub, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1, 2, 3]).unwrap();
    assert_eq!(glyphs(&run), vec![100]);
    assert_eq!(run.glyphs[0].text_index, 0);
}

#[test]
fn single_pos_adds_x_placement_to_covered_glyph() {
    let gpos = single_lookup_table(1, 0, |buf| {
        let subtable_base = buf.len();
        buf.u16(1); // format
        let cov_pos = buf.reserve_offset();
        buf.u16(0x0001); // valueFormat: X_PLACEMENT
        buf.i16(50); // xPlacement
        buf.place_here(cov_pos, subtable_base);
        coverage_format1(buf, &[1]);
    });
    let font = identity_font(&[], &gpos);
    let pattern = single_unit(LookupKind::Gpos, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1]).unwrap();
    assert_eq!(run.glyphs.len(), 1);
    assert_eq!(run.glyphs[0].x, 50);
    assert_eq!(run.glyphs[0].advance, 10);
}

/// A chained-context (format 3) lookup whose input position matches glyph `2`, with no
/// backtrack or lookahead, firing a nested single-substitution ({2 -> 3}) at that position.
#[test]
fn chained_context_format3_fires_nested_single_subst() {
    let gsub = multi_lookup_table(vec![
        (
            6,
            0,
            Box::new(|buf: &mut Buf| {
                let subtable_base = buf.len();
                buf.u16(3); // format
                buf.u16(0); // backtrackGlyphCount
                buf.u16(1); // inputGlyphCount
                let input_cov_pos = buf.reserve_offset();
                buf.u16(0); // lookaheadGlyphCount
                buf.u16(1); // seqLookupCount
                buf.u16(0); // sequenceIndex
                buf.u16(1); // lookupListIndex -> the single-subst lookup below
                buf.place_here(input_cov_pos, subtable_base);
                coverage_format1(buf, &[2]);
            }),
        ),
        (
            1,
            0,
            Box::new(|buf: &mut Buf| {
                let subtable_base = buf.len();
                buf.u16(1); // format
                let cov_pos = buf.reserve_offset();
                buf.i16(1); // delta
                buf.place_here(cov_pos, subtable_base);
                coverage_format1(buf, &[2]);
            }),
        ),
    ]);
    let font = identity_font(&gsub, &[]);
    let pattern = single_unit(LookupKind::Gsub, 0);

    let run = TextProcessor::shape(&font, &pattern, &[1, 2, 3]).unwrap();
    assert_eq!(glyphs(&run), vec![1, 3, 3]);
}
