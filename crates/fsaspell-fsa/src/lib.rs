//! Minimal acyclic word automaton used as the backing index of spelling
//! dictionaries.
//!
//! # Architecture
//!
//! - [`format`] -- Binary header layout and validation
//! - [`arc`] -- Fixed-size arc records stored in the arc table
//! - [`builder`] -- Incremental construction from sorted input
//! - [`automaton`] -- Loading, membership and word enumeration
//! - [`config`] -- Explicit DFS stack used by approximate search
//! - [`search`] -- Bounded edit-distance lookup

pub mod arc;
pub mod automaton;
pub mod builder;
pub mod config;
pub mod format;
pub mod search;

pub use automaton::Fsa;
pub use builder::FsaBuilder;
pub use search::{Candidate, SearchOptions};

/// Error type for automaton construction, parsing and loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsaError {
    #[error("invalid magic number in automaton header")]
    InvalidMagic,
    #[error("unsupported automaton format version {0}")]
    UnsupportedVersion(u8),
    #[error("data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("arc table size {0} is not a multiple of the arc size")]
    MisalignedArcTable(usize),
    #[error("corrupt arc table: {0}")]
    Corrupt(String),
    #[error("input is not sorted: {current:?} does not follow {previous:?}")]
    Unsorted { previous: String, current: String },
    #[error("empty sequences cannot be added to an automaton")]
    EmptyInput,
    #[error("automaton too large: {0} arcs")]
    TooLarge(usize),
}

/// Safety limit on the number of arcs visited by a single approximate
/// search, so that a pathological query cannot stall a caller.
pub const MAX_VISITED_ARCS: usize = 2_000_000;
