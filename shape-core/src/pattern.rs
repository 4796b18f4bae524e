//! The compiled shaping plan the text processor walks: an ordered list of feature units, split
//! into a GSUB prefix and a GPOS suffix, each naming the lookups it fires and the glyphs it's
//! allowed to touch.

use ot_types::Tag;

use crate::album::GlyphTraits;

/// Which applier a feature unit's lookup indexes are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Gsub,
    Gpos,
}

/// Horizontal left-to-right vs. right-to-left text direction, driving the final reordering
/// pass and the right-to-left iteration GSUB type 8 requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// One bundle of feature tags applied together: a required-trait gate, and the sorted lookup
/// indexes it fires, all against the same applier.
#[derive(Debug, Clone)]
pub struct FeatureUnit {
    pub kind: LookupKind,
    pub covered_tags: Vec<Tag>,
    pub required_traits: GlyphTraits,
    pub lookup_indexes: Vec<u16>,
    /// The feature-mask bit this unit claims; `Album::or_feature_mask` ORs it into every glyph
    /// satisfying `required_traits` during the text processor's tagging pass.
    pub feature_mask: u16,
}

impl FeatureUnit {
    /// Whether a glyph carrying `traits` is eligible for this unit.
    pub fn applies_to(&self, traits: GlyphTraits) -> bool {
        self.required_traits.is_empty() || traits.intersects(self.required_traits)
    }
}

/// A compiled, immutable shaping plan: built once per (script, language, font) and reused
/// across shaping requests.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub script_tag: Tag,
    pub language_tag: Tag,
    pub text_direction: TextDirection,
    pub feature_units: Vec<FeatureUnit>,
}

impl Pattern {
    pub fn new(
        script_tag: Tag,
        language_tag: Tag,
        text_direction: TextDirection,
        feature_units: Vec<FeatureUnit>,
    ) -> Self {
        Pattern { script_tag, language_tag, text_direction, feature_units }
    }

    pub fn gsub_units(&self) -> impl Iterator<Item = &FeatureUnit> {
        self.feature_units.iter().filter(|unit| unit.kind == LookupKind::Gsub)
    }

    pub fn gpos_units(&self) -> impl Iterator<Item = &FeatureUnit> {
        self.feature_units.iter().filter(|unit| unit.kind == LookupKind::Gpos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_unit_gates_on_required_traits() {
        let unit = FeatureUnit {
            kind: LookupKind::Gsub,
            covered_tags: vec![Tag::new(b"liga")],
            required_traits: GlyphTraits::BASE,
            lookup_indexes: vec![0],
            feature_mask: 0x0001,
        };
        assert!(unit.applies_to(GlyphTraits::BASE));
        assert!(!unit.applies_to(GlyphTraits::MARK));
    }

    #[test]
    fn empty_required_traits_applies_universally() {
        let unit = FeatureUnit {
            kind: LookupKind::Gpos,
            covered_tags: vec![],
            required_traits: GlyphTraits::empty(),
            lookup_indexes: vec![],
            feature_mask: 0,
        };
        assert!(unit.applies_to(GlyphTraits::MARK));
    }
}
