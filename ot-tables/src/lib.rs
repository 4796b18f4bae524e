//! Binary accessors for the OpenType layout tables used by shaping: `Coverage`, `ClassDef`,
//! `GDEF`, `ValueRecord`/`Anchor`, `Lookup`/`LookupList`, the GSUB and GPOS subtable families,
//! and the shared `SequenceContext`/`ChainedSequenceContext` tables.
//!
//! Every reader here is a thin, zero-copy wrapper over a [`view::View`]: fields are read lazily,
//! on demand, directly out of font bytes. A malformed or truncated table never panics; it reads
//! back as `None` (or a default, for the small number of accessors that have one) and the caller
//! treats that the same as "this subtable did not apply".

pub mod anchor;
pub mod class_def;
pub mod context;
pub mod coverage;
pub mod gdef;
pub mod gpos;
pub mod gsub;
pub mod lookup;
pub mod value_record;
pub mod view;

pub use anchor::AnchorTable;
pub use class_def::ClassDefTable;
pub use context::{
    ChainedSequenceContextTable, ChainedSequenceRuleSetTable, ChainedSequenceRuleTable,
    SequenceContextTable, SequenceLookupRecord, SequenceRuleSetTable, SequenceRuleTable,
};
pub use coverage::CoverageTable;
pub use gdef::{GdefTable, GlyphClass};
pub use gpos::{
    CursivePosTable, MarkArrayTable, MarkBasePosTable, MarkLigPosTable, MarkMarkPosTable,
    PairPosTable, SinglePosTable,
};
pub use gsub::{
    LigatureSetTable, LigatureSubstTable, LigatureTable, MultipleSubstTable,
    ReverseChainSingleSubstTable, SequenceTable, SingleSubstTable,
};
pub use lookup::{LayoutTable, LookupFlag, LookupListTable, LookupTable};
pub use value_record::{ValueFormat, ValueRecord};
pub use view::{Cursor, View};
