//! Fatal, caller-visible errors. Per-subtable "did not apply" is never one of these, it stays
//! a plain `bool`/`Option` at the call site; only programmer-contract violations and resource
//! exhaustion reach here.

/// Fatal conditions the core can raise. Malformed or unsupported subtables are never among
/// these; they are handled inline as "did not apply".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("album cannot grow past {limit} glyphs")]
    AlbumCapacityExceeded { limit: usize },

    #[error("locator used against an album mutated since its last state read")]
    StaleLocatorState,

    #[error("lookup index {0} has no corresponding entry in the lookup list")]
    UnknownLookupIndex(u16),

    #[error("feature unit requested {requested:?} lookups but the pattern was built for {built:?}")]
    FeatureKindMismatch {
        requested: crate::pattern::LookupKind,
        built: crate::pattern::LookupKind,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
