// Language code to speller configuration mapping.

use std::collections::BTreeMap;

use crate::locator::ResourceLocator;
use crate::setup::{DictionaryCaches, DictionaryConfig, SetupError, SpellerSetup};
use crate::suggestion::SuggestionPipeline;

/// Produces the configuration of one language's speller.
pub type ConfigFactory = fn() -> DictionaryConfig;

/// Explicit table of the languages a process supports.
///
/// Lookups try the full code first and then its language part, so a
/// registration for `de` also serves `de-AT` and `de_CH`.
#[derive(Debug, Clone, Default)]
pub struct SpellerRegistry {
    factories: BTreeMap<String, ConfigFactory>,
}

impl SpellerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `language`, replacing any previous one.
    pub fn register(&mut self, language: &str, factory: ConfigFactory) -> &mut Self {
        self.factories.insert(normalize(language), factory);
        self
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn config(&self, language: &str) -> Option<DictionaryConfig> {
        let code = normalize(language);
        let factory = self.factories.get(&code).or_else(|| {
            code.split_once('-')
                .and_then(|(base, _)| self.factories.get(base))
        })?;
        Some(factory())
    }

    /// Build the speller registered for `language`.
    pub fn speller(
        &self,
        language: &str,
        locator: &dyn ResourceLocator,
        caches: &DictionaryCaches,
    ) -> Result<SuggestionPipeline, SetupError> {
        let config = self
            .config(language)
            .ok_or_else(|| SetupError::UnsupportedLanguage(language.to_string()))?;
        SpellerSetup::load(&config, locator, caches)
    }
}

fn normalize(language: &str) -> String {
    language.trim().replace('_', "-").to_ascii_lowercase()
}
