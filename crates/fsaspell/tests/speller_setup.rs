// End-to-end speller setup from files on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use fsaspell::builder::build_from_words;
use fsaspell::cache::{DEFAULT_TTL, ManualClock};
use fsaspell::{
    CheckOutcome, DictionaryCaches, DictionaryConfig, DictionaryMetadata, DirectoryLocator,
    SetupError, Speller, SpellerSetup,
};

fn write_fixture(root: &Path) {
    let dir = root.join("en");
    fs::create_dir_all(&dir).unwrap();

    let mut metadata = DictionaryMetadata::default();
    metadata.locale = Some("en_US".to_string());
    let base = build_from_words(
        "en",
        ["apple", "banana", "cherry", "house", "mouse", "Paris"],
        metadata,
    )
    .unwrap()
    .unwrap();
    base.save(&dir.join("en.dict")).unwrap();

    fs::write(dir.join("spelling.txt"), "# extra words\nkiwi\nmango # fruit\n").unwrap();
    fs::write(dir.join("more.txt"), "papaya\n").unwrap();
    fs::write(dir.join("wrong.txt"), "bananna|bannana=banana\n").unwrap();
}

fn config() -> DictionaryConfig {
    DictionaryConfig {
        language: "en".to_string(),
        binary_dictionary: "en/en.dict".to_string(),
        plain_text_lists: vec![
            "en/spelling.txt".to_string(),
            "en/missing.txt".to_string(),
            "en/more.txt".to_string(),
        ],
        user_words: vec!["Zaphod".to_string()],
        wrong_words: Some("en/wrong.txt".to_string()),
        ..Default::default()
    }
}

#[test]
fn every_source_contributes_words() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();
    let speller = SpellerSetup::load(&config(), &locator, &caches).unwrap();

    // Binary, plain-text and user-word dictionaries.
    for word in ["apple", "kiwi", "mango", "papaya", "Zaphod", "Paris"] {
        assert!(!speller.is_misspelled(word), "{word} should be accepted");
    }
    assert!(speller.is_misspelled("kiwii"));
    assert_eq!(
        speller.check("mous"),
        CheckOutcome::Misspelled {
            suggestions: vec!["mouse".to_string()],
            truncated: false,
        }
    );
}

#[test]
fn wrong_words_come_first() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();
    let speller = SpellerSetup::load(&config(), &locator, &caches).unwrap();

    let suggestions = speller.suggestions("bannana");
    assert_eq!(suggestions.first().map(String::as_str), Some("banana"));
    assert_eq!(suggestions.iter().filter(|s| *s == "banana").count(), 1);

    assert_eq!(speller.suggestions("Bananna").first().map(String::as_str), Some("Banana"));
}

#[test]
fn second_setup_reuses_cached_dictionaries() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();

    let setup = SpellerSetup::new(&locator, &caches);
    let first = setup.dictionaries(&config()).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(caches.build_count(), 2);

    let second = setup.dictionaries(&config()).unwrap();
    assert_eq!(caches.build_count(), 2);
    assert!(Arc::ptr_eq(&first[0], &second[0]));
    assert!(Arc::ptr_eq(&first[1], &second[1]));
    // User words are rebuilt every time.
    assert!(!Arc::ptr_eq(&first[2], &second[2]));
}

#[test]
fn expired_dictionaries_are_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let locator = DirectoryLocator::new([dir.path()]);
    let clock = Arc::new(ManualClock::new());
    let caches = DictionaryCaches::with_clock(clock.clone());
    let setup = SpellerSetup::new(&locator, &caches);

    let first = setup.dictionaries(&config()).unwrap();
    clock.advance(DEFAULT_TTL - Duration::from_secs(1));
    setup.dictionaries(&config()).unwrap();
    assert_eq!(caches.build_count(), 2);

    // New words on disk only show up once the entries expire.
    fs::write(dir.path().join("en/more.txt"), "papaya\nguava\n").unwrap();
    clock.advance(Duration::from_secs(1));
    let rebuilt = setup.dictionaries(&config()).unwrap();
    assert_eq!(caches.build_count(), 4);
    assert!(!Arc::ptr_eq(&first[1], &rebuilt[1]));
    assert!(rebuilt[1].contains("guava"));
}

#[test]
fn empty_word_lists_add_no_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("en/empty.txt"), "# nothing\n\n").unwrap();
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();

    let config = DictionaryConfig {
        language: "en".to_string(),
        binary_dictionary: "en/en.dict".to_string(),
        plain_text_lists: vec!["en/empty.txt".to_string()],
        ..Default::default()
    };
    let dictionaries = SpellerSetup::new(&locator, &caches)
        .dictionaries(&config)
        .unwrap();
    assert_eq!(dictionaries.len(), 1);
}

#[test]
fn failures_surface_and_are_retried() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("en/en.info"), "fsa.dict.encoding=utf-8\n").unwrap();
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();

    let err = SpellerSetup::load(&config(), &locator, &caches).unwrap_err();
    assert!(matches!(err, SetupError::Dictionary(_)));

    // Fixing the file makes the next attempt succeed.
    fs::write(
        dir.path().join("en/en.info"),
        "fsa.dict.separator=+\nfsa.dict.encoding=utf-8\n",
    )
    .unwrap();
    assert!(SpellerSetup::load(&config(), &locator, &caches).is_ok());
}

#[test]
fn missing_binary_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let locator = DirectoryLocator::new([dir.path()]);
    let caches = DictionaryCaches::new();
    let err = SpellerSetup::load(&config(), &locator, &caches).unwrap_err();
    assert!(matches!(err, SetupError::MissingDictionary(path) if path == "en/en.dict"));
}
