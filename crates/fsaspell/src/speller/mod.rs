// Spell checking over one or more dictionaries.

pub mod dictionary;
pub mod multi;

pub use dictionary::DictionarySpeller;
pub use multi::MultiDictionarySpeller;

/// The capability handed to callers: misspelling checks and corrections.
///
/// Implementations are immutable after construction and may be shared
/// across threads.
pub trait Speller: Send + Sync {
    /// Whether `word` is unknown. Empty words are never misspelled.
    fn is_misspelled(&self, word: &str) -> bool;

    /// Corrections for `word`, best first. Never contains `word` itself.
    fn suggestions(&self, word: &str) -> Vec<String>;

    /// Whether lookups fold case.
    fn converts_case(&self) -> bool;
}

/// Error type for speller construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpellerError {
    #[error("a speller needs at least one dictionary")]
    EmptyDictionarySet,
    #[error("maximum edit distance must be positive")]
    InvalidEditDistance,
}
