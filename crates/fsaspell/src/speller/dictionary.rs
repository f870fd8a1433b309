// Speller over a single dictionary with a fixed edit-distance bound.

use std::sync::Arc;

use fsaspell_core::case::{CaseType, detect_case_str, is_camel_case, to_simple_lower, uppercase_first};
use fsaspell_core::character::{is_punctuation, is_whitespace};

use super::{Speller, SpellerError};
use crate::dictionary::Dictionary;

/// Speller over one [`Dictionary`].
///
/// The effective edit distance is the configured one, capped by the
/// dictionary's own `max-distance` metadata when present.
#[derive(Debug, Clone)]
pub struct DictionarySpeller {
    dictionary: Arc<Dictionary>,
    max_distance: usize,
}

impl DictionarySpeller {
    pub fn new(dictionary: Arc<Dictionary>, max_distance: usize) -> Result<Self, SpellerError> {
        if max_distance == 0 {
            return Err(SpellerError::InvalidEditDistance);
        }
        let max_distance = dictionary
            .metadata()
            .max_distance
            .map_or(max_distance, |cap| max_distance.min(cap));
        Ok(Self {
            dictionary,
            max_distance,
        })
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Whether the metadata says to leave this word alone.
    fn is_ignored(&self, word: &str) -> bool {
        let metadata = self.dictionary.metadata();
        if metadata.ignore_numbers && word.chars().any(char::is_numeric) {
            return true;
        }
        if metadata.ignore_punctuation && word.chars().all(is_punctuation) {
            return true;
        }
        if metadata.ignore_all_uppercase && detect_case_str(word) == CaseType::AllUpper {
            return true;
        }
        metadata.ignore_camel_case && is_camel_case(word)
    }

    /// Membership, including the case variants a case-converting
    /// dictionary accepts.
    fn is_known(&self, word: &str) -> bool {
        if self.dictionary.contains(word) {
            return true;
        }
        if !self.dictionary.converts_case() {
            return false;
        }
        match detect_case_str(word) {
            CaseType::FirstUpper => self.dictionary.contains(&to_simple_lower(word)),
            CaseType::AllUpper => {
                let lower = to_simple_lower(word);
                self.dictionary.contains(&lower) || self.dictionary.contains(&uppercase_first(&lower))
            }
            _ => false,
        }
    }

    /// Splits of `word` into two known words, as "left right".
    fn run_on_words(&self, word: &str) -> Vec<String> {
        word.char_indices()
            .skip(1)
            .map(|(i, _)| word.split_at(i))
            .filter(|(left, right)| self.is_known(left) && self.is_known(right))
            .map(|(left, right)| format!("{left} {right}"))
            .collect()
    }
}

impl Speller for DictionarySpeller {
    fn is_misspelled(&self, word: &str) -> bool {
        if word.chars().all(is_whitespace) {
            return false;
        }
        !(self.is_ignored(word) || self.is_known(word))
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        if word.chars().all(is_whitespace) {
            return Vec::new();
        }
        let mut ranked: Vec<(String, usize)> = self
            .dictionary
            .find_similar(word, self.max_distance)
            .into_iter()
            .map(|c| (c.word, c.distance))
            .collect();
        if self.dictionary.metadata().runon_words {
            ranked.extend(self.run_on_words(word).into_iter().map(|w| (w, 1)));
        }
        ranked.sort_by_key(|(_, distance)| *distance);

        let mut out: Vec<String> = Vec::with_capacity(ranked.len());
        for (candidate, _) in ranked {
            if candidate != word && !out.contains(&candidate) {
                out.push(candidate);
            }
        }
        out
    }

    fn converts_case(&self) -> bool {
        self.dictionary.converts_case()
    }
}
