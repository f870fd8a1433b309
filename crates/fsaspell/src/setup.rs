// Assembling a speller for one language from its configured resources.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::builder::{DictionaryBuilder, build_from_words};
use crate::cache::{CacheKey, Clock, DEFAULT_TTL, ResourceCache, SystemClock};
use crate::dictionary::{Dictionary, DictionaryError, info_path};
use crate::locator::ResourceLocator;
use crate::speller::SpellerError;
use crate::suggestion::{SpellerTiers, SuggestionConfig, SuggestionPipeline};
use crate::wordlist::{WordListError, WordListProcessor, WrongWordMap, WrongWordProcessor};

/// Error type for speller setup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SetupError {
    #[error("dictionary {0} not found")]
    MissingDictionary(String),
    #[error("no speller registered for language {0:?}")]
    UnsupportedLanguage(String),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    WordList(#[from] WordListError),
    #[error(transparent)]
    Speller(#[from] SpellerError),
}

/// Resources making up one language's speller. Paths are logical paths
/// resolved through a [`ResourceLocator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    pub language: String,
    /// Pre-built `.dict` file; its `.info` supplies the metadata for every
    /// other dictionary of the setup.
    pub binary_dictionary: String,
    /// Optional word lists merged into one extra dictionary. Lists that
    /// cannot be located are skipped.
    pub plain_text_lists: Vec<String>,
    /// Words accepted in addition to the dictionaries; never cached.
    pub user_words: Vec<String>,
    /// Optional wrong-word list injected as top suggestions.
    pub wrong_words: Option<String>,
    pub suggestions: SuggestionConfig,
}

type DictionaryCache = ResourceCache<CacheKey, Arc<Dictionary>, DictionaryError>;
type OptionalDictionaryCache = ResourceCache<CacheKey, Option<Arc<Dictionary>>, DictionaryError>;
type WrongWordCache = ResourceCache<CacheKey, Arc<WrongWordMap>, WordListError>;

/// Caches shared by every speller setup of a process.
pub struct DictionaryCaches {
    binary: DictionaryCache,
    plain_text: OptionalDictionaryCache,
    wrong_words: WrongWordCache,
}

impl Default for DictionaryCaches {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryCaches {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            binary: ResourceCache::with_clock("binary-dictionaries", DEFAULT_TTL, clock.clone()),
            plain_text: ResourceCache::with_clock("plain-text-dictionaries", DEFAULT_TTL, clock.clone()),
            wrong_words: ResourceCache::with_clock("wrong-words", DEFAULT_TTL, clock),
        }
    }

    /// Number of dictionary builds started so far, binary loads included.
    pub fn build_count(&self) -> usize {
        self.binary.build_count() + self.plain_text.build_count()
    }

    /// Load a binary dictionary and its `.info`.
    pub fn binary_dictionary(&self, path: &Path) -> Result<Arc<Dictionary>, DictionaryError> {
        let key = CacheKey::new([path], "binary", "binary-dictionary");
        self.binary
            .get_or_build(&key, || Dictionary::load(path).map(Arc::new))
    }

    /// Merge word lists into one dictionary using the metadata of `base`.
    /// `Ok(None)` when the lists hold no words.
    pub fn plain_text_dictionary(
        &self,
        paths: &[PathBuf],
        base_path: &Path,
        base: &Dictionary,
    ) -> Result<Option<Arc<Dictionary>>, DictionaryError> {
        let builder = DictionaryBuilder::new();
        let metadata = base.metadata();
        let key_paths = std::iter::once(info_path(base_path)).chain(paths.iter().cloned());
        let key = CacheKey::new(key_paths, metadata.encoding.name(), builder.processor().id());
        self.plain_text.get_or_build(&key, || {
            let name = format!("{} (plain text)", base.name());
            let dictionary = builder.build_files(&name, paths, metadata.clone())?;
            Ok(dictionary.map(Arc::new))
        })
    }

    pub fn wrong_words(
        &self,
        path: &Path,
        base: &Dictionary,
    ) -> Result<Arc<WrongWordMap>, WordListError> {
        let encoding = base.metadata().encoding;
        let key = CacheKey::new([path], encoding.name(), WrongWordProcessor.id());
        self.wrong_words.get_or_build(&key, || {
            let source_name = path.display().to_string();
            let file = File::open(path).map_err(|e| WordListError::Io {
                source_name: source_name.clone(),
                source: Arc::new(e),
            })?;
            WrongWordMap::load(BufReader::new(file), &source_name, encoding).map(Arc::new)
        })
    }
}

/// Builds spellers from [`DictionaryConfig`]s.
pub struct SpellerSetup<'a> {
    locator: &'a dyn ResourceLocator,
    caches: &'a DictionaryCaches,
}

impl<'a> SpellerSetup<'a> {
    pub fn new(locator: &'a dyn ResourceLocator, caches: &'a DictionaryCaches) -> Self {
        Self { locator, caches }
    }

    /// Build the suggestion pipeline described by `config`.
    pub fn load(
        config: &DictionaryConfig,
        locator: &'a dyn ResourceLocator,
        caches: &'a DictionaryCaches,
    ) -> Result<SuggestionPipeline, SetupError> {
        Self::new(locator, caches).pipeline(config)
    }

    /// The dictionaries of `config`, in lookup order: the binary dictionary,
    /// then the merged word lists, then the user words.
    pub fn dictionaries(&self, config: &DictionaryConfig) -> Result<Vec<Arc<Dictionary>>, SetupError> {
        let (base_path, base) = self.base(config)?;
        let mut dictionaries = vec![Arc::clone(&base)];

        let lists: Vec<PathBuf> = config
            .plain_text_lists
            .iter()
            .filter_map(|list| {
                let found = self.locator.locate(list);
                if found.is_none() {
                    debug!("{}: skipping missing word list {list}", config.language);
                }
                found
            })
            .collect();
        if !lists.is_empty() {
            match self.caches.plain_text_dictionary(&lists, &base_path, &base)? {
                Some(merged) => dictionaries.push(merged),
                None => warn!(
                    "{}: word lists {:?} contain no words",
                    config.language, config.plain_text_lists
                ),
            }
        }

        if !config.user_words.is_empty() {
            let name = format!("{} (user words)", config.language);
            if let Some(user) =
                build_from_words(&name, config.user_words.iter().cloned(), base.metadata().clone())?
            {
                dictionaries.push(Arc::new(user));
            }
        }
        Ok(dictionaries)
    }

    pub fn pipeline(&self, config: &DictionaryConfig) -> Result<SuggestionPipeline, SetupError> {
        let dictionaries = self.dictionaries(config)?;
        let tiers = SpellerTiers::new(&dictionaries, config.suggestions.tier_count)?;
        let mut pipeline = SuggestionPipeline::new(tiers, config.suggestions.clone());

        if let Some(list) = &config.wrong_words {
            match self.locator.locate(list) {
                Some(path) => {
                    let map = self.caches.wrong_words(&path, &dictionaries[0])?;
                    pipeline = pipeline.with_supplement(map);
                }
                None => debug!("{}: no wrong-word list at {list}", config.language),
            }
        }
        info!(
            "{}: speller ready with {} dictionaries",
            config.language,
            dictionaries.len()
        );
        Ok(pipeline)
    }

    fn base(&self, config: &DictionaryConfig) -> Result<(PathBuf, Arc<Dictionary>), SetupError> {
        let path = self
            .locator
            .locate(&config.binary_dictionary)
            .ok_or_else(|| SetupError::MissingDictionary(config.binary_dictionary.clone()))?;
        let dictionary = self.caches.binary_dictionary(&path)?;
        Ok((path, dictionary))
    }
}
