// Merging word lists into one automaton-backed dictionary.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fsaspell_fsa::FsaBuilder;
use hashbrown::HashSet;
use log::{debug, info};

use crate::dictionary::{Dictionary, DictionaryError};
use crate::metadata::DictionaryMetadata;
use crate::wordlist::{SpellingProcessor, WordListProcessor, read_word_list};

/// Where the words of a dictionary come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// A word-list file, decoded with the metadata's encoding.
    File(PathBuf),
    /// Word-list text already in memory.
    Text { name: String, text: String },
    /// Words used verbatim, without line processing.
    Words(Vec<String>),
}

impl WordSource {
    fn name(&self) -> String {
        match self {
            WordSource::File(path) => path.display().to_string(),
            WordSource::Text { name, .. } => name.clone(),
            WordSource::Words(_) => "<words>".to_string(),
        }
    }
}

/// Deduplicated words, in first-seen order until sorted for the build.
#[derive(Debug, Default)]
pub struct WordSet {
    words: Vec<String>,
    seen: HashSet<String>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word; empty words and repeats are ignored.
    pub fn insert(&mut self, word: String) -> bool {
        if word.is_empty() || self.seen.contains(&word) {
            return false;
        }
        self.seen.insert(word.clone());
        self.words.push(word);
        true
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    /// The words in byte order.
    pub fn into_sorted(self) -> Vec<String> {
        let mut words = self.words;
        words.sort_unstable();
        words
    }
}

/// Builds dictionaries from text sources using one line convention.
#[derive(Debug, Clone, Default)]
pub struct DictionaryBuilder<P = SpellingProcessor> {
    processor: P,
}

impl DictionaryBuilder<SpellingProcessor> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P> DictionaryBuilder<P>
where
    P: WordListProcessor,
    P::Item: IntoIterator<Item = String>,
{
    pub fn with_processor(processor: P) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Read every source into one word set.
    pub fn collect_words(
        &self,
        sources: &[WordSource],
        metadata: &DictionaryMetadata,
    ) -> Result<WordSet, DictionaryError> {
        let mut words = WordSet::new();
        for source in sources {
            let before = words.len();
            match source {
                WordSource::File(path) => {
                    let file = File::open(path).map_err(|e| DictionaryError::io(path, e))?;
                    let entries = read_word_list(
                        BufReader::new(file),
                        &source.name(),
                        metadata.encoding,
                        &self.processor,
                    )?;
                    entries
                        .into_iter()
                        .flat_map(|e| e.value)
                        .for_each(|w| {
                            words.insert(w);
                        });
                }
                WordSource::Text { name, text } => {
                    let entries = read_word_list(
                        text.as_bytes(),
                        name,
                        crate::metadata::Encoding::Utf8,
                        &self.processor,
                    )?;
                    entries
                        .into_iter()
                        .flat_map(|e| e.value)
                        .for_each(|w| {
                            words.insert(w);
                        });
                }
                WordSource::Words(list) => {
                    for word in list {
                        words.insert(word.trim().to_string());
                    }
                }
            }
            debug!(
                "{}: {} new words from {}",
                self.processor.id(),
                words.len() - before,
                source.name()
            );
        }
        Ok(words)
    }

    /// Merge `sources` into one dictionary carrying `metadata`.
    ///
    /// Returns `Ok(None)` when the sources hold no words at all.
    pub fn build(
        &self,
        name: &str,
        sources: &[WordSource],
        metadata: DictionaryMetadata,
    ) -> Result<Option<Dictionary>, DictionaryError> {
        let start = Instant::now();
        let words = self.collect_words(sources, &metadata)?;
        if words.is_empty() {
            debug!("{name}: no words in {} sources, no dictionary", sources.len());
            return Ok(None);
        }
        let dictionary = build_from_sorted(name, words.into_sorted(), metadata)?;
        info!(
            "{name}: built dictionary with {} arcs ({} bytes) in {:?}",
            dictionary.fsa().arc_count(),
            dictionary.fsa().byte_size(),
            start.elapsed()
        );
        Ok(Some(dictionary))
    }

    /// Build from word-list files.
    pub fn build_files<I, S>(
        &self,
        name: &str,
        paths: I,
        metadata: DictionaryMetadata,
    ) -> Result<Option<Dictionary>, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let sources: Vec<WordSource> = paths
            .into_iter()
            .map(|p| WordSource::File(p.as_ref().to_path_buf()))
            .collect();
        self.build(name, &sources, metadata)
    }
}

/// Build a dictionary from a plain list of words.
pub fn build_from_words<I, S>(
    name: &str,
    words: I,
    metadata: DictionaryMetadata,
) -> Result<Option<Dictionary>, DictionaryError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let words: Vec<String> = words.into_iter().map(Into::into).collect();
    DictionaryBuilder::new().build(name, &[WordSource::Words(words)], metadata)
}

/// Encode sorted words, serialize the automaton and load it back.
fn build_from_sorted(
    name: &str,
    words: Vec<String>,
    metadata: DictionaryMetadata,
) -> Result<Dictionary, DictionaryError> {
    let automaton_error = |source| DictionaryError::Automaton {
        name: name.to_string(),
        source,
    };
    let mut builder = FsaBuilder::new();
    for word in &words {
        builder.add(word).map_err(automaton_error)?;
    }
    let blob = builder.finish().map_err(automaton_error)?;
    let fsa = fsaspell_fsa::Fsa::from_bytes(&blob).map_err(automaton_error)?;
    Ok(Dictionary::new(name, fsa, metadata))
}
