//! Spelling dictionaries backed by minimal word automata.
//!
//! Word lists are merged into automaton dictionaries, dictionaries are
//! cached per source set, and spellers over several dictionaries produce
//! ranked, case-adjusted suggestions.
//!
//! # Architecture
//!
//! - [`metadata`] -- `.info` dictionary metadata
//! - [`wordlist`] -- Line-oriented word-list conventions
//! - [`builder`] -- Merging word lists into a [`Dictionary`]
//! - [`dictionary`] -- Loaded dictionaries and the binary file pair
//! - [`cache`] -- Time-bounded, single-flight resource cache
//! - [`speller`] -- Single- and multi-dictionary spellers
//! - [`suggestion`] -- Tiered suggestion pipeline and normalization
//! - [`locator`] -- Resolution of logical resource paths
//! - [`setup`] -- Assembling a language's speller from its resources
//! - [`registry`] -- Language codes to speller configurations
//!
//! ```
//! use std::sync::Arc;
//! use fsaspell::builder::build_from_words;
//! use fsaspell::metadata::DictionaryMetadata;
//! use fsaspell::speller::Speller;
//! use fsaspell::suggestion::{SpellerTiers, SuggestionConfig, SuggestionPipeline};
//!
//! let dict = build_from_words("en", ["house", "mouse"], DictionaryMetadata::default())
//!     .unwrap()
//!     .unwrap();
//! let tiers = SpellerTiers::new(&[Arc::new(dict)], 3).unwrap();
//! let pipeline = SuggestionPipeline::new(tiers, SuggestionConfig::default());
//! assert!(!pipeline.is_misspelled("House"));
//! assert_eq!(pipeline.suggestions("Hous"), vec!["House"]);
//! ```

pub mod builder;
pub mod cache;
pub mod dictionary;
pub mod locator;
pub mod metadata;
pub mod registry;
pub mod setup;
pub mod speller;
pub mod suggestion;
pub mod wordlist;

pub use builder::{DictionaryBuilder, WordSource};
pub use cache::{CacheKey, ResourceCache};
pub use dictionary::{Dictionary, DictionaryError};
pub use locator::{DirectoryLocator, ResourceLocator};
pub use metadata::{DictionaryMetadata, Encoding, MetadataError};
pub use registry::SpellerRegistry;
pub use setup::{DictionaryCaches, DictionaryConfig, SetupError, SpellerSetup};
pub use speller::{DictionarySpeller, MultiDictionarySpeller, Speller, SpellerError};
pub use suggestion::{CheckOutcome, SuggestionConfig, SuggestionPipeline};
pub use wordlist::{WordListError, WordListProcessor};
