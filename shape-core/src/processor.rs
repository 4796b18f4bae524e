//! The top-level shaping driver: discovers glyphs, tags feature masks, runs the GSUB and GPOS
//! phases in order, resolves attachment chains, and emits the final positioned glyph run.

use ot_types::GlyphId;

use crate::album::{Album, GlyphTraits};
use crate::engine::Engine;
use crate::error::Result;
use crate::font::Font;
use crate::locator::Locator;
use crate::pattern::{FeatureUnit, Pattern, TextDirection};

/// One glyph of the final, positioned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub glyph: GlyphId,
    pub x: i32,
    pub y: i32,
    pub advance: i32,
    pub text_index: u32,
}

/// The result of a single shaping request.
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
}

pub struct TextProcessor;

impl TextProcessor {
    /// Run the full pipeline (§4.7 steps 1-6) for one input codepoint run against `pattern`.
    pub fn shape<F: Font>(font: &F, pattern: &Pattern, codepoints: &[u32]) -> Result<ShapedRun> {
        let mut album = Album::new();
        Self::discover_glyphs(font, &mut album, codepoints);
        Self::tag_feature_masks(&mut album, &pattern.feature_units);

        let engine = Engine::new(font);
        Self::run_gsub_phase(&engine, &mut album, pattern)?;
        Self::run_gpos_phase(&engine, &mut album, pattern)?;

        resolve_attachments(&mut album);
        Self::fill_advances(font, &mut album);

        if pattern.text_direction == TextDirection::RightToLeft {
            album.reverse();
        }

        Ok(ShapedRun { glyphs: Self::materialize(&album) })
    }

    fn discover_glyphs<F: Font>(font: &F, album: &mut Album, codepoints: &[u32]) {
        for (index, &cp) in codepoints.iter().enumerate() {
            let glyph = font.glyph_for_codepoint(cp);
            let traits = font.glyph_class_traits(glyph);
            album.push(glyph, traits, index as u32);
        }
    }

    fn tag_feature_masks(album: &mut Album, units: &[FeatureUnit]) {
        for unit in units {
            for index in 0..album.glyph_count() {
                if unit.applies_to(album.traits(index)) {
                    album.or_feature_mask(index, unit.feature_mask);
                }
            }
        }
    }

    fn run_gsub_phase<F: Font>(
        engine: &Engine<'_, F>,
        album: &mut Album,
        pattern: &Pattern,
    ) -> Result<()> {
        for unit in pattern.gsub_units() {
            for &lookup_index in &unit.lookup_indexes {
                let Some(lookup_type) = engine
                    .gsub_lookups
                    .and_then(|l| l.lookup(lookup_index))
                    .and_then(|l| l.lookup_type())
                else {
                    continue;
                };
                let mut locator = Locator::new(album, 0, album.glyph_count());
                locator.set_feature_mask(unit.feature_mask);
                if lookup_type == 8 {
                    locator.jump_to(album.glyph_count());
                    while locator.move_previous(album, |i| engine.mark_attach_class_of(album, i))? {
                        let current = locator.index().expect("move_previous returned true");
                        engine.apply_gsub_lookup(lookup_index, album, &mut locator, current)?;
                    }
                } else {
                    while locator.move_next(album, |i| engine.mark_attach_class_of(album, i))? {
                        let current = locator.index().expect("move_next returned true");
                        engine.apply_gsub_lookup(lookup_index, album, &mut locator, current)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn run_gpos_phase<F: Font>(
        engine: &Engine<'_, F>,
        album: &mut Album,
        pattern: &Pattern,
    ) -> Result<()> {
        for unit in pattern.gpos_units() {
            for &lookup_index in &unit.lookup_indexes {
                let mut locator = Locator::new(album, 0, album.glyph_count());
                locator.set_feature_mask(unit.feature_mask);
                while locator.move_next(album, |i| engine.mark_attach_class_of(album, i))? {
                    let current = locator.index().expect("move_next returned true");
                    engine.apply_gpos_lookup(lookup_index, album, &mut locator, current)?;
                }
            }
        }
        Ok(())
    }

    fn fill_advances<F: Font>(font: &F, album: &mut Album) {
        for index in 0..album.glyph_count() {
            if album.traits(index).contains(GlyphTraits::PLACEHOLDER) {
                album.set_advance(index, 0);
                continue;
            }
            let advance = font.advance_for_glyph(crate::font::Layout::Horizontal, album.glyph(index));
            album.set_advance(index, advance);
        }
    }

    /// Drop `Placeholder` slots: the album keeps them to preserve association indices through
    /// ligature merges, but they render nothing and a caller has no use for them in the final
    /// positioned run.
    fn materialize(album: &Album) -> Vec<ShapedGlyph> {
        (0..album.glyph_count())
            .filter(|&index| !album.traits(index).contains(GlyphTraits::PLACEHOLDER))
            .map(|index| {
                let (x, y) = album.position(index);
                ShapedGlyph {
                    glyph: album.glyph(index),
                    x,
                    y,
                    advance: album.advance(index),
                    text_index: album.association(index).first(),
                }
            })
            .collect()
    }
}

/// Walk the album once, folding each attached glyph's position into the fully-resolved position
/// of whatever it's attached to (cursive exit/entry chains, mark-to-base/ligature/mark chains),
/// transitively. A cycle (malformed font) is broken by treating the glyph's own position as
/// already resolved.
fn resolve_attachments(album: &mut Album) {
    let count = album.glyph_count();
    let mut memo: Vec<Option<(i32, i32)>> = vec![None; count];
    let mut visiting = vec![false; count];
    let resolved: Vec<(i32, i32)> =
        (0..count).map(|i| resolve_one(album, i, &mut memo, &mut visiting)).collect();
    for (index, (x, y)) in resolved.into_iter().enumerate() {
        let (current_x, current_y) = album.position(index);
        album.add_position(index, x - current_x, y - current_y);
    }
}

fn resolve_one(
    album: &Album,
    index: usize,
    memo: &mut [Option<(i32, i32)>],
    visiting: &mut [bool],
) -> (i32, i32) {
    if let Some(position) = memo[index] {
        return position;
    }
    let own = album.position(index);
    if visiting[index] {
        return own;
    }
    let target_offset = album.cursive_offset(index).or(album.attachment_offset(index));
    let resolved = match target_offset {
        Some(offset) => {
            let target = (index as i64 + offset as i64) as usize;
            if target >= memo.len() {
                own
            } else {
                visiting[index] = true;
                let (tx, ty) = resolve_one(album, target, memo, visiting);
                visiting[index] = false;
                (own.0 + tx, own.1 + ty)
            }
        }
        None => own,
    };
    memo[index] = Some(resolved);
    resolved
}
