//! Four-byte script/language/feature tags.

use std::fmt;

use crate::raw::Scalar;

/// A four-byte identifier used for scripts, languages, and features (e.g. `b"latn"`, `b"liga"`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag([u8; 4]);

/// A tag's bytes were not printable ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTag;

impl Tag {
    /// Construct a tag from four raw bytes, known at compile time.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }

    /// Construct a tag from a byte slice, failing if its length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidTag> {
        <[u8; 4]>::try_from(bytes)
            .map(Tag)
            .map_err(|_| InvalidTag)
    }

    /// The raw four bytes of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The default-language tag `dflt`, used when no explicit language is requested.
    pub const DEFAULT_LANGUAGE: Tag = Tag::new(b"dflt");
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            let ch = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '\u{FFFD}'
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl Scalar for Tag {
    const SIZE: usize = 4;

    #[inline]
    fn read(bytes: &[u8]) -> Option<Self> {
        bytes.get(..4).map(|raw| Tag(raw.try_into().unwrap()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let tag = Tag::new(b"liga");
        assert_eq!(tag.to_string(), "liga");
        assert_eq!(Tag::from_bytes(b"liga").unwrap(), tag);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(Tag::from_bytes(b"lig"), Err(InvalidTag));
    }
}
