// An automaton plus the metadata that says how to query it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fsaspell_fsa::automaton::Words;
use fsaspell_fsa::{Candidate, Fsa, FsaError, SearchOptions};
use log::{debug, warn};

use crate::metadata::{DictionaryMetadata, MetadataError};
use crate::wordlist::WordListError;

/// Error type for building and loading dictionaries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("invalid metadata in {name}: {source}")]
    Metadata {
        name: String,
        #[source]
        source: MetadataError,
    },
    #[error("invalid automaton in {name}: {source}")]
    Automaton {
        name: String,
        #[source]
        source: FsaError,
    },
    #[error(transparent)]
    WordList(#[from] WordListError),
}

impl DictionaryError {
    pub(crate) fn io(path: &Path, err: io::Error) -> Self {
        DictionaryError::Io {
            path: path.to_path_buf(),
            source: Arc::new(err),
        }
    }
}

/// Immutable, queryable dictionary.
#[derive(Debug)]
pub struct Dictionary {
    name: String,
    fsa: Fsa,
    metadata: DictionaryMetadata,
}

impl Dictionary {
    pub fn new(name: impl Into<String>, fsa: Fsa, metadata: DictionaryMetadata) -> Self {
        Self {
            name: name.into(),
            fsa,
            metadata,
        }
    }

    /// Load from an automaton blob and the text of its `.info` file.
    pub fn from_bytes(
        name: impl Into<String>,
        data: &[u8],
        info: &str,
    ) -> Result<Self, DictionaryError> {
        let name = name.into();
        let metadata =
            DictionaryMetadata::parse(info).map_err(|source| DictionaryError::Metadata {
                name: name.clone(),
                source,
            })?;
        let fsa = Fsa::from_bytes(data).map_err(|source| DictionaryError::Automaton {
            name: name.clone(),
            source,
        })?;
        Ok(Self::new(name, fsa, metadata))
    }

    /// Load `<name>.dict` together with the sibling `<name>.info`.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let info_path = info_path(path);
        let data = fs::read(path).map_err(|e| DictionaryError::io(path, e))?;
        let info = fs::read_to_string(&info_path).map_err(|e| DictionaryError::io(&info_path, e))?;
        debug!(
            "loading dictionary {} ({} bytes)",
            path.display(),
            data.len()
        );
        Self::from_bytes(path.display().to_string(), &data, &info)
    }

    /// Write the automaton to `path` and the metadata next to it.
    pub fn save(&self, path: &Path) -> Result<(), DictionaryError> {
        fs::write(path, self.fsa.to_bytes()).map_err(|e| DictionaryError::io(path, e))?;
        let info_path = info_path(path);
        fs::write(&info_path, self.metadata.to_info_string())
            .map_err(|e| DictionaryError::io(&info_path, e))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }

    pub fn fsa(&self) -> &Fsa {
        &self.fsa
    }

    pub fn converts_case(&self) -> bool {
        self.metadata.converts_case
    }

    pub fn contains(&self, word: &str) -> bool {
        self.fsa.contains(word)
    }

    pub fn words(&self) -> Words<'_> {
        self.fsa.words()
    }

    /// Words within `max_distance` edits, folding case when the dictionary
    /// converts case.
    pub fn find_similar(&self, word: &str, max_distance: usize) -> Vec<Candidate> {
        let options = SearchOptions::new(max_distance).ignore_case(self.converts_case());
        self.search(word, options)
    }

    fn search(&self, word: &str, options: SearchOptions) -> Vec<Candidate> {
        let mut config = self.fsa.new_config();
        let found = self.fsa.find_similar_with(&mut config, word, options);
        if config.truncated {
            warn!(
                "{}: search for {word:?} at distance {} stopped after {} arcs, {} candidates may be incomplete",
                self.name,
                options.max_distance,
                options.visit_limit,
                found.len()
            );
        }
        found
    }
}

/// Path of the metadata file belonging to a dictionary file.
pub fn info_path(dict_path: &Path) -> PathBuf {
    dict_path.with_extension("info")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsaspell_fsa::builder::build_sorted;

    const INFO: &str = "fsa.dict.separator=+\nfsa.dict.encoding=utf-8\n";

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.dict");
        let fsa = build_sorted(["apple", "pear"]).unwrap();
        let metadata = DictionaryMetadata::parse(INFO).unwrap();
        Dictionary::new("en", fsa, metadata.clone())
            .save(&path)
            .unwrap();
        assert!(dir.path().join("en.info").is_file());

        let loaded = Dictionary::load(&path).unwrap();
        assert!(loaded.contains("pear"));
        assert!(!loaded.contains("peach"));
        assert_eq!(loaded.metadata(), &metadata);
        assert_eq!(loaded.words().collect::<Vec<_>>(), vec!["apple", "pear"]);
    }

    #[test]
    fn missing_info_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.dict");
        fs::write(&path, build_sorted(["a"]).unwrap().to_bytes()).unwrap();
        let err = Dictionary::load(&path).unwrap_err();
        assert!(matches!(err, DictionaryError::Io { path, .. } if path.ends_with("x.info")));
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let err = Dictionary::from_bytes("bad", b"not an automaton at all", INFO).unwrap_err();
        assert!(matches!(err, DictionaryError::Automaton { .. }));
        let blob = build_sorted(["a"]).unwrap().to_bytes();
        let err = Dictionary::from_bytes("bad", &blob, "fsa.dict.encoding=utf-8").unwrap_err();
        assert!(matches!(err, DictionaryError::Metadata { .. }));
    }

    #[test]
    fn cyclic_blob_is_an_error() {
        use fsaspell_fsa::arc::Arc as FsaArc;
        use fsaspell_fsa::format::FsaHeader;

        // A single final arc whose target is the root itself.
        let arc = FsaArc::new('a', 0, true, true);
        let mut blob = FsaHeader::new(0).to_bytes().to_vec();
        for field in [arc.label, arc.target, arc.flags] {
            blob.extend_from_slice(&field.to_le_bytes());
        }
        let err = Dictionary::from_bytes("looped", &blob, INFO).unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::Automaton {
                source: FsaError::Corrupt(_),
                ..
            }
        ));
    }

    #[test]
    fn search_stops_at_visit_limit() {
        let words = ["baa", "bab", "bac", "bad", "bae"];
        let dict = Dictionary::new("d", build_sorted(words).unwrap(), DictionaryMetadata::default());
        let options = SearchOptions::new(1);
        assert_eq!(dict.search("baa", options).len(), 5);
        assert!(dict.search("baa", options.visit_limit(4)).len() < 5);
    }

    #[test]
    fn case_folding_follows_metadata() {
        let fsa = build_sorted(["Paris"]).unwrap();
        let mut metadata = DictionaryMetadata::default();
        let dict = Dictionary::new("d", fsa, metadata.clone());
        assert_eq!(dict.find_similar("paris", 1)[0].word, "Paris");

        metadata.converts_case = false;
        let dict = Dictionary::new("d", build_sorted(["Paris"]).unwrap(), metadata);
        assert_eq!(dict.find_similar("paris", 1)[0].distance, 1);
    }
}
