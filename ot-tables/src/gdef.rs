//! `GDEF`: shared glyph classification used by the Locator and by post-substitution trait
//! assignment.

use ot_types::GlyphId;

use crate::class_def::ClassDefTable;
use crate::coverage::CoverageTable;
use crate::view::View;

/// Glyph classes defined by `GDEF.GlyphClassDef`, matching the OpenType spec's fixed class ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    Base,
    Ligature,
    Mark,
    Component,
}

#[derive(Debug, Clone, Copy)]
pub struct GdefTable<'a> {
    view: View<'a>,
}

impl<'a> GdefTable<'a> {
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(GdefTable { view: View::new(bytes) })
        }
    }

    fn version(&self) -> Option<u32> {
        self.view.read_at(0)
    }

    /// The `GlyphClassDef` subtable, if present.
    pub fn glyph_class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: ot_types::Offset16 = self.view.read_at(4)?;
        let sub = self.view.subview(offset.non_null()?)?;
        Some(ClassDefTable::new(sub))
    }

    /// The glyph class GDEF assigns to `glyph`, or `None` if GDEF has no classification for it.
    pub fn glyph_class(&self, glyph: GlyphId) -> Option<GlyphClass> {
        let class_def = self.glyph_class_def()?;
        match class_def.class_of(glyph) {
            1 => Some(GlyphClass::Base),
            2 => Some(GlyphClass::Ligature),
            3 => Some(GlyphClass::Mark),
            4 => Some(GlyphClass::Component),
            _ => None,
        }
    }

    /// The `MarkAttachClassDef` subtable, if present.
    pub fn mark_attach_class_def(&self) -> Option<ClassDefTable<'a>> {
        let offset: ot_types::Offset16 = self.view.read_at(8)?;
        let sub = self.view.subview(offset.non_null()?)?;
        Some(ClassDefTable::new(sub))
    }

    /// The mark-attach class of `glyph` per `MarkAttachClassDef`, defaulting to `0`.
    pub fn mark_attach_class(&self, glyph: GlyphId) -> u16 {
        self.mark_attach_class_def()
            .map(|def| def.class_of(glyph))
            .unwrap_or(0)
    }

    /// `MarkGlyphSetsDef`, gated on `GDEF` version `0x00010002` exactly as the reference
    /// implementation gates it (earlier GDEF versions silently have no mark-filtering sets).
    pub fn mark_glyph_set_coverage(&self, mark_filtering_set: u16) -> Option<CoverageTable<'a>> {
        if self.version()? != 0x0001_0002 {
            return None;
        }
        let offset: ot_types::Offset16 = self.view.read_at(10)?;
        let sets = self.view.subview(offset.non_null()?)?;
        let format: u16 = sets.read_at(0)?;
        if format != 1 {
            log::warn!("mark glyph sets: unsupported format {format}");
            return None;
        }
        let mark_set_count: u16 = sets.read_at(2)?;
        if mark_filtering_set >= mark_set_count {
            return None;
        }
        let coverage_offset: ot_types::Offset32 =
            sets.read_at(4 + mark_filtering_set as usize * 4)?;
        let sub = sets.subview(coverage_offset.non_null()?)?;
        Some(CoverageTable::new(sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_glyph_class_def() {
        // GDEF header: version 1.0, glyphClassDefOffset=12, rest 0
        let mut bytes = vec![0x00, 0x01, 0x00, 0x00];
        bytes.extend(12u16.to_be_bytes()); // glyphClassDefOffset
        bytes.extend(0u16.to_be_bytes()); // attachListOffset
        bytes.extend(0u16.to_be_bytes()); // ligCaretListOffset
        bytes.extend(0u16.to_be_bytes()); // markAttachClassDefOffset
        // ClassDef format1 at offset 12: startGlyph=1, glyphCount=1, classValues=[2]
        bytes.extend(1u16.to_be_bytes()); // format
        bytes.extend(1u16.to_be_bytes()); // startGlyph
        bytes.extend(1u16.to_be_bytes()); // glyphCount
        bytes.extend(2u16.to_be_bytes()); // classValues[0]
        let gdef = GdefTable::new(&bytes).unwrap();
        assert_eq!(gdef.glyph_class(GlyphId::new(1)), Some(GlyphClass::Ligature));
    }
}
