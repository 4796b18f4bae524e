//! OpenType GSUB/GPOS text shaping core.
//!
//! Three layers: [`Album`] is the mutable glyph stream a shaping request operates on,
//! [`Locator`] is the filtering cursor the appliers walk it with, and [`Engine`] ties a
//! [`Font`]'s resolved lookup lists to the per-lookup-type appliers in [`gsub`] and [`gpos`].
//! [`processor::TextProcessor`] drives the whole pipeline from codepoints to positioned glyphs.

mod album;
mod context;
mod engine;
mod error;
mod font;
mod locator;
mod pattern;
mod processor;

pub mod gpos;
pub mod gsub;

pub use album::{Album, Association, GlyphRecord, GlyphTraits};
pub use engine::Engine;
pub use error::{Error, Result};
pub use font::{Font, Layout, StaticFont};
pub use locator::{Locator, LocatorState};
pub use pattern::{FeatureUnit, LookupKind, Pattern, TextDirection};
pub use processor::{ShapedGlyph, ShapedRun, TextProcessor};
