// Confusion sets: `word1|desc; word2|desc[; ...]; factor`.

use std::io::BufRead;

use super::{WordListError, WordListProcessor, read_word_list};
use crate::metadata::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionWord {
    pub word: String,
    pub description: Option<String>,
}

/// Words that are easily confused with each other, and the factor by which
/// one must be more probable than another before the swap is suggested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionSet {
    pub words: Vec<ConfusionWord>,
    pub factor: u64,
}

impl ConfusionSet {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.word == word)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfusionSetProcessor;

impl ConfusionSetProcessor {
    /// Read a whole confusion-set file.
    pub fn load<R: BufRead>(
        reader: R,
        source_name: &str,
        encoding: Encoding,
    ) -> Result<Vec<ConfusionSet>, WordListError> {
        let entries = read_word_list(reader, source_name, encoding, &Self)?;
        Ok(entries.into_iter().map(|e| e.value).collect())
    }
}

impl WordListProcessor for ConfusionSetProcessor {
    type Item = ConfusionSet;

    fn id(&self) -> &'static str {
        "confusion-sets"
    }

    fn process(&self, line: &str) -> Result<Option<ConfusionSet>, String> {
        let parts: Vec<&str> = line.split(';').map(str::trim).collect();
        let Some((factor, words)) = parts.split_last() else {
            return Err("empty confusion set".to_string());
        };
        if words.len() < 2 {
            return Err("expected at least two words and a factor".to_string());
        }
        let factor = match factor.parse::<u64>() {
            Ok(f) if f > 0 => f,
            _ => return Err(format!("invalid factor {factor:?}")),
        };

        let mut set: Vec<ConfusionWord> = Vec::with_capacity(words.len());
        for part in words {
            let (word, description) = match part.split_once('|') {
                Some((w, d)) => (w.trim(), Some(d.trim().to_string())),
                None => (*part, None),
            };
            if word.is_empty() {
                return Err("empty word in confusion set".to_string());
            }
            if set.iter().any(|w| w.word == word) {
                return Err(format!("duplicate word {word:?} in confusion set"));
            }
            set.push(ConfusionWord {
                word: word.to_string(),
                description: description.filter(|d| !d.is_empty()),
            });
        }
        Ok(Some(ConfusionSet { words: set, factor }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sets_with_descriptions() {
        let text = "their|possessive; there|place; 10\nto; too; two; 100\n";
        let sets = ConfusionSetProcessor::load(text.as_bytes(), "c.txt", Encoding::Utf8).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].factor, 10);
        assert_eq!(sets[0].words[0].word, "their");
        assert_eq!(sets[0].words[0].description.as_deref(), Some("possessive"));
        assert_eq!(sets[1].words.len(), 3);
        assert!(sets[1].contains("too"));
        assert_eq!(sets[1].words[2].description, None);
    }

    #[test]
    fn rejects_malformed_sets() {
        let p = ConfusionSetProcessor;
        assert!(p.process("alone; 10").is_err());
        assert!(p.process("a; b; zero").is_err());
        assert!(p.process("a; b; 0").is_err());
        assert!(p.process("a; a; 5").is_err());
        assert!(p.process("a; ; 5").is_err());
    }
}
