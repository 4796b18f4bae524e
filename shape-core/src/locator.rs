//! The filtering cursor over an [`Album`]: the only sanctioned way for an applier to walk the
//! glyph stream while respecting a lookup's flag word and mark-filtering set.

use ot_tables::{CoverageTable, LookupFlag};

use crate::album::{Album, GlyphTraits};
use crate::error::{Error, Result};

/// The Locator's position in its own small state machine (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorState {
    /// `index` invalid, `state_index == start_index`: nothing has been visited yet.
    Fresh,
    /// `index` valid: the cursor has accepted at least one slot.
    Moving,
    /// `index` invalid, `state_index == limit_index`: no slot remains in range.
    Exhausted,
}

/// A filtering cursor over an [`Album`]'s `[start_index, limit_index)` range.
///
/// Holds a non-owning `version` snapshot of the album it was built over; every mutating method
/// asserts that snapshot still matches the album's current version (§4.3, §9) before moving.
#[derive(Debug, Clone)]
pub struct Locator<'f> {
    start_index: usize,
    limit_index: usize,
    state_index: usize,
    index: Option<usize>,
    lookup_flag: LookupFlag,
    /// Feature-mask bits whose presence on a glyph makes it ineligible for this pass.
    anti_feature_mask: u16,
    mark_filtering_coverage: Option<CoverageTable<'f>>,
    version: u64,
}

impl<'f> Locator<'f> {
    /// A fresh locator over `[start, limit)` of `album`, with no flag filtering yet configured.
    pub fn new(album: &Album, start: usize, limit: usize) -> Self {
        Locator {
            start_index: start,
            limit_index: limit,
            state_index: start,
            index: None,
            lookup_flag: LookupFlag::empty(),
            anti_feature_mask: 0,
            mark_filtering_coverage: None,
            version: album.version(),
        }
    }

    pub fn set_lookup_flag(&mut self, flag: LookupFlag) {
        self.lookup_flag = flag;
    }

    pub fn set_feature_mask(&mut self, unit_mask: u16) {
        self.anti_feature_mask = crate::album::anti_feature_mask(unit_mask);
    }

    pub fn set_mark_filtering_set(&mut self, coverage: Option<CoverageTable<'f>>) {
        self.mark_filtering_coverage = coverage;
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn limit_index(&self) -> usize {
        self.limit_index
    }

    pub fn state(&self) -> LocatorState {
        if self.index.is_some() {
            LocatorState::Moving
        } else if self.state_index >= self.limit_index {
            LocatorState::Exhausted
        } else {
            LocatorState::Fresh
        }
    }

    fn check_version(&self, album: &Album) -> Result<()> {
        if self.version == album.version() {
            Ok(())
        } else {
            Err(Error::StaleLocatorState)
        }
    }

    /// Whether the glyph at `index` should be skipped per the current flag/mask configuration
    /// (§4.3 rule 1-2).
    fn is_ignored(&self, album: &Album, index: usize, mark_attach_class: u16) -> bool {
        let traits = album.traits(index);
        let mask = album.feature_mask(index);
        if self.anti_feature_mask & mask != 0 {
            return true;
        }
        let mut trait_ignore = GlyphTraits::PLACEHOLDER;
        if self.lookup_flag.contains(LookupFlag::IGNORE_BASE_GLYPHS) {
            trait_ignore |= GlyphTraits::BASE;
        }
        if self.lookup_flag.contains(LookupFlag::IGNORE_LIGATURES) {
            trait_ignore |= GlyphTraits::LIGATURE;
        }
        if self.lookup_flag.contains(LookupFlag::IGNORE_MARKS) {
            trait_ignore |= GlyphTraits::MARK;
        }
        if trait_ignore.intersects(traits) {
            return true;
        }
        if traits.contains(GlyphTraits::MARK) {
            if self.lookup_flag.contains(LookupFlag::USE_MARK_FILTERING_SET) {
                let glyph = album.glyph(index);
                let covered = self
                    .mark_filtering_coverage
                    .as_ref()
                    .and_then(|cov| cov.index_of(glyph))
                    .is_some();
                if !covered {
                    return true;
                }
            }
            let class_filter = self.lookup_flag.mark_attachment_type();
            if class_filter != 0 && class_filter as u16 != mark_attach_class {
                return true;
            }
        }
        false
    }

    /// Advance `state_index` until the first non-ignored slot in `[state_index, limit_index)`,
    /// consulting `mark_attach_class_of` to resolve a mark's attach class lazily (avoids a GDEF
    /// lookup for every non-mark glyph).
    pub fn move_next(
        &mut self,
        album: &Album,
        mark_attach_class_of: impl Fn(usize) -> u16,
    ) -> Result<bool> {
        self.check_version(album)?;
        let mut i = self.state_index;
        while i < self.limit_index {
            let class = if album.traits(i).contains(GlyphTraits::MARK) {
                mark_attach_class_of(i)
            } else {
                0
            };
            if !self.is_ignored(album, i, class) {
                self.index = Some(i);
                self.state_index = i + 1;
                return Ok(true);
            }
            i += 1;
        }
        self.state_index = self.limit_index;
        self.index = None;
        Ok(false)
    }

    /// Symmetric to [`Locator::move_next`], scanning `state_index` downward toward
    /// `start_index`. Callers iterating right-to-left (GSUB type 8) start by `jump_to`-ing the
    /// cursor to `limit_index`.
    pub fn move_previous(
        &mut self,
        album: &Album,
        mark_attach_class_of: impl Fn(usize) -> u16,
    ) -> Result<bool> {
        self.check_version(album)?;
        let mut i = self.state_index;
        while i > self.start_index {
            i -= 1;
            let class = if album.traits(i).contains(GlyphTraits::MARK) {
                mark_attach_class_of(i)
            } else {
                0
            };
            if !self.is_ignored(album, i, class) {
                self.index = Some(i);
                self.state_index = i;
                return Ok(true);
            }
        }
        self.state_index = self.start_index;
        self.index = None;
        Ok(false)
    }

    pub fn skip(&mut self, album: &Album, n: usize, mark_attach_class_of: impl Fn(usize) -> u16 + Copy) -> Result<bool> {
        let mut ok = true;
        for _ in 0..n {
            ok = self.move_next(album, mark_attach_class_of)?;
            if !ok {
                break;
            }
        }
        Ok(ok)
    }

    /// Reset `state_index` to `i` and clear the accepted `index`; legal to land exactly on
    /// `start_index` or `limit_index`.
    pub fn jump_to(&mut self, i: usize) {
        self.state_index = i;
        self.index = None;
    }

    /// Peek at the first non-ignored slot at or after `i`, without mutating cursor state.
    pub fn get_after(
        &self,
        album: &Album,
        i: usize,
        mark_attach_class_of: impl Fn(usize) -> u16,
    ) -> Option<usize> {
        let mut j = i;
        while j < self.limit_index {
            let class = if album.traits(j).contains(GlyphTraits::MARK) {
                mark_attach_class_of(j)
            } else {
                0
            };
            if !self.is_ignored(album, j, class) {
                return Some(j);
            }
            j += 1;
        }
        None
    }

    /// Peek at the first non-ignored slot strictly before `i`, without mutating cursor state.
    pub fn get_before(
        &self,
        album: &Album,
        i: usize,
        mark_attach_class_of: impl Fn(usize) -> u16,
    ) -> Option<usize> {
        let mut j = i;
        while j > self.start_index {
            j -= 1;
            let class = if album.traits(j).contains(GlyphTraits::MARK) {
                mark_attach_class_of(j)
            } else {
                0
            };
            if !self.is_ignored(album, j, class) {
                return Some(j);
            }
        }
        None
    }

    /// Delegate to the album, then extend `limit_index` in place: called after a subtable
    /// inserts placeholder slots so iteration continues to see them (or skip past them, per the
    /// caller's `jump_to`).
    pub fn reserve_glyphs(&mut self, album: &mut Album, index: usize, count: usize, association: u32) {
        album.reserve_glyphs(index, count, association);
        self.limit_index += count;
        self.version = album.version();
    }

    /// The preceding base glyph: widen the ignore set to {Placeholder, Mark, Sequence} and look
    /// backward from `index`.
    pub fn preceding_base_index(&self, album: &Album, index: usize) -> Option<usize> {
        let mut j = index;
        while j > self.start_index {
            j -= 1;
            let traits = album.traits(j);
            if traits.intersects(GlyphTraits::PLACEHOLDER | GlyphTraits::MARK | GlyphTraits::SEQUENCE) {
                continue;
            }
            return Some(j);
        }
        None
    }

    /// The preceding ligature glyph and the component index within it that `index` (a mark)
    /// should attach to: widen to {Placeholder, ignore-marks} looking backward, then count
    /// placeholders between the ligature and `index`.
    pub fn preceding_ligature_index(&self, album: &Album, index: usize) -> Option<(usize, usize)> {
        let mut j = index;
        let mut placeholders = 0usize;
        while j > self.start_index {
            j -= 1;
            let traits = album.traits(j);
            if traits.contains(GlyphTraits::PLACEHOLDER) {
                placeholders += 1;
                continue;
            }
            if traits.contains(GlyphTraits::MARK) {
                continue;
            }
            if traits.contains(GlyphTraits::LIGATURE) {
                return Some((j, placeholders));
            }
            return None;
        }
        None
    }

    /// The preceding mark glyph: no trait widening beyond the base ignore set. Landing on
    /// anything other than a Mark (a Placeholder, or a Base/Ligature) rejects the match rather
    /// than searching further back.
    pub fn preceding_mark_index(&self, album: &Album, index: usize) -> Option<usize> {
        let mut j = index;
        while j > self.start_index {
            j -= 1;
            let traits = album.traits(j);
            if traits.contains(GlyphTraits::PLACEHOLDER) {
                return None;
            }
            if traits.contains(GlyphTraits::MARK) {
                return Some(j);
            }
            return None;
        }
        None
    }

    /// Adopt a sibling (context-bounded) locator's `state_index` and `version`, re-synchronizing
    /// after a recursive context lookup invocation.
    pub fn take_state(&mut self, other: &Locator<'f>) {
        self.state_index = other.state_index;
        self.version = other.version;
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ot_types::GlyphId;

    fn push(album: &mut Album, glyph: u16, traits: GlyphTraits) {
        album.push(GlyphId::new(glyph), traits, 0);
    }

    #[test]
    fn move_next_skips_ignored_marks() {
        let mut album = Album::new();
        push(&mut album, 1, GlyphTraits::BASE);
        push(&mut album, 2, GlyphTraits::MARK);
        push(&mut album, 3, GlyphTraits::BASE);
        let mut locator = Locator::new(&album, 0, album.glyph_count());
        locator.set_lookup_flag(LookupFlag::IGNORE_MARKS);
        assert_eq!(locator.move_next(&album, |_| 0).unwrap(), true);
        assert_eq!(locator.index(), Some(0));
        assert_eq!(locator.move_next(&album, |_| 0).unwrap(), true);
        assert_eq!(locator.index(), Some(2));
        assert_eq!(locator.move_next(&album, |_| 0).unwrap(), false);
        assert_eq!(locator.index(), None);
        assert_eq!(locator.state(), LocatorState::Exhausted);
    }

    #[test]
    fn reserve_glyphs_extends_limit_and_bumps_version() {
        let mut album = Album::new();
        push(&mut album, 1, GlyphTraits::BASE);
        let mut locator = Locator::new(&album, 0, album.glyph_count());
        let version_before = locator.version;
        locator.reserve_glyphs(&mut album, 1, 2, 0);
        assert_eq!(locator.limit_index(), 3);
        assert_ne!(locator.version, version_before);
    }

    #[test]
    fn stale_version_is_rejected() {
        let mut album = Album::new();
        push(&mut album, 1, GlyphTraits::BASE);
        let mut locator = Locator::new(&album, 0, album.glyph_count());
        album.reserve_glyphs(1, 1, 0);
        assert!(matches!(locator.move_next(&album, |_| 0), Err(Error::StaleLocatorState)));
    }
}
