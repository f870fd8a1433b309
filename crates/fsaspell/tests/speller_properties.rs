// Properties that hold for any dictionary set.

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use fsaspell::builder::build_from_words;
use fsaspell::suggestion::SpellerTiers;
use fsaspell::{
    Dictionary, DictionaryBuilder, DictionaryCaches, DictionaryMetadata, MultiDictionarySpeller,
    Speller, SuggestionConfig, SuggestionPipeline, WordSource,
};

const FIRST: &[&str] = &["bake", "baker", "cake", "fake", "lake", "make", "maker"];
const SECOND: &[&str] = &["bike", "hike", "like", "make", "mike", "pike"];
const QUERIES: &[&str] = &[
    "bake", "bkae", "cak", "lke", "maker", "makers", "mke", "pikes", "hiker", "zzz", "b", "like",
];

fn dict(words: &[&str]) -> Arc<Dictionary> {
    Arc::new(
        build_from_words("t", words.iter().copied(), DictionaryMetadata::default())
            .unwrap()
            .unwrap(),
    )
}

#[test]
fn misspelled_only_if_every_dictionary_rejects() {
    let first = dict(FIRST);
    let second = dict(SECOND);
    let combined = MultiDictionarySpeller::new(&[first.clone(), second.clone()], 1).unwrap();
    let only_first = MultiDictionarySpeller::new(&[first], 1).unwrap();
    let only_second = MultiDictionarySpeller::new(&[second], 1).unwrap();

    for word in FIRST.iter().chain(SECOND).chain(QUERIES) {
        let expected = only_first.is_misspelled(word) && only_second.is_misspelled(word);
        assert_eq!(combined.is_misspelled(word), expected, "{word}");
    }
}

#[test]
fn suggestions_never_contain_the_query_or_duplicates() {
    let tiers = SpellerTiers::new(&[dict(FIRST), dict(SECOND)], 3).unwrap();
    let pipeline = SuggestionPipeline::new(tiers, SuggestionConfig::default());
    for query in QUERIES {
        let suggestions = pipeline.suggestions(query);
        assert!(!suggestions.iter().any(|s| s == query), "{query}: {suggestions:?}");
        let mut unique = suggestions.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), suggestions.len(), "{query}: {suggestions:?}");
        assert!(suggestions.len() <= 15);
    }
}

#[test]
fn dictionary_words_are_never_misspelled() {
    let tiers = SpellerTiers::new(&[dict(FIRST), dict(SECOND)], 2).unwrap();
    let pipeline = SuggestionPipeline::new(tiers, SuggestionConfig::default());
    for word in FIRST.iter().chain(SECOND) {
        assert!(!pipeline.is_misspelled(word), "{word}");
        assert!(pipeline.suggestions(word).is_empty());
    }
}

#[test]
fn source_order_does_not_change_results() {
    let sources = |order: &[usize]| -> Vec<WordSource> {
        let lists = [FIRST, SECOND];
        order
            .iter()
            .map(|&i| WordSource::Text {
                name: format!("list{i}"),
                text: lists[i].join("\n"),
            })
            .collect()
    };
    let build = |order: &[usize]| {
        let dict = DictionaryBuilder::new()
            .build("merged", &sources(order), DictionaryMetadata::default())
            .unwrap()
            .unwrap();
        let tiers = SpellerTiers::new(&[Arc::new(dict)], 3).unwrap();
        SuggestionPipeline::new(tiers, SuggestionConfig::default())
    };
    let forward = build(&[0, 1]);
    let backward = build(&[1, 0]);
    for query in QUERIES {
        assert_eq!(forward.check(query), backward.check(query), "{query}");
    }
}

#[test]
fn concurrent_loads_share_one_dictionary() {
    const THREADS: usize = 8;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.dict");
    dict(FIRST).save(&path).unwrap();

    let caches = DictionaryCaches::new();
    let barrier = Barrier::new(THREADS);
    let loaded: Vec<Arc<Dictionary>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    caches.binary_dictionary(&path).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(caches.build_count(), 1);
    assert!(loaded.iter().all(|d| Arc::ptr_eq(d, &loaded[0])));
}

#[test]
fn concurrent_failures_are_shared_and_not_cached() {
    const THREADS: usize = 4;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dict");
    fs::write(&path, b"garbage").unwrap();
    fs::write(
        dir.path().join("broken.info"),
        "fsa.dict.separator=+\nfsa.dict.encoding=utf-8\n",
    )
    .unwrap();

    let caches = DictionaryCaches::new();
    let barrier = Barrier::new(THREADS);
    let errors: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    caches.binary_dictionary(&path).unwrap_err().to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(errors.iter().all(|e| e == &errors[0]));

    dict(FIRST).save(&path).unwrap();
    assert!(caches.binary_dictionary(&path).is_ok());
}
