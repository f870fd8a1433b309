// Speller over an ordered set of dictionaries.

use std::sync::Arc;

use super::{DictionarySpeller, Speller, SpellerError};
use crate::dictionary::Dictionary;

/// Several dictionaries answering as one.
///
/// A word is misspelled only if every dictionary considers it misspelled.
/// Suggestions are gathered in dictionary order.
#[derive(Debug, Clone)]
pub struct MultiDictionarySpeller {
    spellers: Vec<DictionarySpeller>,
    max_distance: usize,
}

impl MultiDictionarySpeller {
    pub fn new(dictionaries: &[Arc<Dictionary>], max_distance: usize) -> Result<Self, SpellerError> {
        if dictionaries.is_empty() {
            return Err(SpellerError::EmptyDictionarySet);
        }
        let spellers = dictionaries
            .iter()
            .map(|d| DictionarySpeller::new(Arc::clone(d), max_distance))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            spellers,
            max_distance,
        })
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    pub fn spellers(&self) -> &[DictionarySpeller] {
        &self.spellers
    }
}

impl Speller for MultiDictionarySpeller {
    fn is_misspelled(&self, word: &str) -> bool {
        self.spellers.iter().all(|s| s.is_misspelled(word))
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for speller in &self.spellers {
            for suggestion in speller.suggestions(word) {
                if suggestion != word && !out.contains(&suggestion) {
                    out.push(suggestion);
                }
            }
        }
        out
    }

    fn converts_case(&self) -> bool {
        self.spellers.iter().any(|s| s.converts_case())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from_words;
    use crate::metadata::DictionaryMetadata;

    fn dict(words: &[&str], converts_case: bool) -> Arc<Dictionary> {
        let mut metadata = DictionaryMetadata::default();
        metadata.converts_case = converts_case;
        Arc::new(
            build_from_words("t", words.iter().copied(), metadata)
                .unwrap()
                .unwrap(),
        )
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            MultiDictionarySpeller::new(&[], 1).unwrap_err(),
            SpellerError::EmptyDictionarySet
        );
        assert_eq!(
            MultiDictionarySpeller::new(&[dict(&["a"], true)], 0).unwrap_err(),
            SpellerError::InvalidEditDistance
        );
    }

    #[test]
    fn accepted_if_any_dictionary_accepts() {
        let speller =
            MultiDictionarySpeller::new(&[dict(&["apple"], true), dict(&["banana"], true)], 1)
                .unwrap();
        assert!(!speller.is_misspelled("apple"));
        assert!(!speller.is_misspelled("banana"));
        assert!(speller.is_misspelled("cherry"));
    }

    #[test]
    fn suggestions_in_dictionary_order_without_duplicates() {
        let first = dict(&["bake", "cake"], true);
        let second = dict(&["cake", "lake"], true);
        let speller = MultiDictionarySpeller::new(&[first, second], 1).unwrap();
        assert_eq!(speller.suggestions("dake"), vec!["bake", "cake", "lake"]);
        assert!(!speller.suggestions("cake").contains(&"cake".to_string()));
    }

    #[test]
    fn converts_case_if_any_dictionary_does() {
        let speller =
            MultiDictionarySpeller::new(&[dict(&["a"], false), dict(&["b"], true)], 1).unwrap();
        assert!(speller.converts_case());
        let speller = MultiDictionarySpeller::new(&[dict(&["a"], false)], 1).unwrap();
        assert!(!speller.converts_case());
    }
}
