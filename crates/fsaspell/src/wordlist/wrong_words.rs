// Wrong-word lists: `wrong1|wrong2=right1|right2`.

use std::io::BufRead;

use fsaspell_core::case::{lowercase_first, starts_with_uppercase, uppercase_first};
use hashbrown::HashMap;

use super::{Entry, WordListError, WordListProcessor, read_word_list};
use crate::metadata::Encoding;
use crate::suggestion::SuggestionSupplement;

/// One parsed line of a wrong-word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongWordLine {
    pub wrong: Vec<String>,
    pub right: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WrongWordProcessor;

impl WordListProcessor for WrongWordProcessor {
    type Item = WrongWordLine;

    fn id(&self) -> &'static str {
        "wrong-words"
    }

    fn process(&self, line: &str) -> Result<Option<WrongWordLine>, String> {
        let Some((wrong, right)) = line.split_once('=') else {
            return Err("expected wrong=right".to_string());
        };
        let split = |side: &str| -> Vec<String> {
            side.split('|')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        };
        let wrong = split(wrong);
        let right = split(right);
        if wrong.is_empty() || right.is_empty() {
            return Err("both sides of '=' need at least one word".to_string());
        }
        Ok(Some(WrongWordLine { wrong, right }))
    }
}

/// Map from a misspelling to its corrections, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrongWordMap {
    map: HashMap<String, Vec<String>>,
}

impl WrongWordMap {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry<WrongWordLine>>,
    {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for entry in entries {
            for wrong in entry.value.wrong {
                let corrections = map.entry(wrong).or_default();
                for right in &entry.value.right {
                    if !corrections.contains(right) {
                        corrections.push(right.clone());
                    }
                }
            }
        }
        Self { map }
    }

    pub fn load<R: BufRead>(
        reader: R,
        source_name: &str,
        encoding: Encoding,
    ) -> Result<Self, WordListError> {
        let entries = read_word_list(reader, source_name, encoding, &WrongWordProcessor)?;
        Ok(Self::from_entries(entries))
    }

    pub fn get(&self, wrong: &str) -> Option<&[String]> {
        self.map.get(wrong).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Corrections for `word`. A capitalized word falls back to the entry
    /// of its lowercase form, with the corrections capitalized.
    pub fn corrections(&self, word: &str) -> Vec<String> {
        if let Some(found) = self.map.get(word) {
            return found.clone();
        }
        if starts_with_uppercase(word) {
            if let Some(found) = self.map.get(&lowercase_first(word)) {
                return found.iter().map(|w| uppercase_first(w)).collect();
            }
        }
        Vec::new()
    }
}

impl SuggestionSupplement for WrongWordMap {
    fn top_suggestions(&self, word: &str, _found: &[String]) -> Vec<String> {
        self.corrections(word)
    }
}
