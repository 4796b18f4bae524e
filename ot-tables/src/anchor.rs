//! `Anchor` tables: a single (x, y) attachment point on a glyph.

use crate::view::View;

/// An anchor point in font units. Formats 2 (contour-point hinted) and 3 (device-table hinted)
/// carry extra hinting data we don't evaluate; only the base x/y matters to shaping geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorTable {
    pub x: i16,
    pub y: i16,
}

impl AnchorTable {
    pub fn read(view: View<'_>) -> Option<Self> {
        let format: u16 = view.read_at(0)?;
        match format {
            1 | 2 | 3 => {
                let x: i16 = view.read_at(2)?;
                let y: i16 = view.read_at(4)?;
                Some(AnchorTable { x, y })
            }
            other => {
                log::warn!("anchor table: unsupported format {other}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_format1() {
        let mut bytes = vec![0x00, 0x01];
        bytes.extend(5i16.to_be_bytes());
        bytes.extend((-3i16).to_be_bytes());
        let anchor = AnchorTable::read(View::new(&bytes)).unwrap();
        assert_eq!(anchor, AnchorTable { x: 5, y: -3 });
    }
}
