// Tiered suggestion pipeline.
//
// The same dictionaries are wrapped at growing edit distances. The distance-1
// tier decides whether a word is misspelled; wider tiers are only consulted
// when narrower ones find nothing and the word is long enough for a wider
// search to be meaningful.

use std::sync::Arc;

use fsaspell_core::case::starts_with_uppercase;
use fsaspell_core::character::is_whitespace;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{SuggestionSupplement, capitalize_suggestions, dedupe};
use crate::dictionary::Dictionary;
use crate::speller::{MultiDictionarySpeller, Speller, SpellerError};

/// Minimum and maximum number of tiers.
pub const MIN_TIERS: usize = 2;
pub const MAX_TIERS: usize = 3;

/// Tuning of the suggestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Cap on the number of suggestions returned; 0 disables the cap.
    pub max_suggestions: usize,
    /// Words shorter than this never escalate past distance 1.
    pub escalation_min_length: usize,
    /// Number of tiers, clamped to 2..=3.
    pub tier_count: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 15,
            escalation_min_length: 5,
            tier_count: MAX_TIERS,
        }
    }
}

/// Multi-dictionary spellers at distances 1, 2 and optionally 3.
#[derive(Debug, Clone)]
pub struct SpellerTiers {
    tiers: Vec<MultiDictionarySpeller>,
}

impl SpellerTiers {
    pub fn new(dictionaries: &[Arc<Dictionary>], tier_count: usize) -> Result<Self, SpellerError> {
        let tier_count = tier_count.clamp(MIN_TIERS, MAX_TIERS);
        let tiers = (1..=tier_count)
            .map(|distance| MultiDictionarySpeller::new(dictionaries, distance))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tiers })
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier(&self, index: usize) -> Option<&MultiDictionarySpeller> {
        self.tiers.get(index)
    }

    /// The distance-1 speller.
    pub fn primary(&self) -> &MultiDictionarySpeller {
        &self.tiers[0]
    }
}

/// Result of checking one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Blank input; nothing was looked up.
    Skipped,
    Correct,
    Misspelled {
        suggestions: Vec<String>,
        /// The list was cut at the configured maximum; callers may show a
        /// "too many suggestions" placeholder instead.
        truncated: bool,
    },
}

impl CheckOutcome {
    pub fn is_misspelled(&self) -> bool {
        matches!(self, CheckOutcome::Misspelled { .. })
    }
}

/// Misspelling checks with ranked, normalized suggestions.
pub struct SuggestionPipeline {
    tiers: SpellerTiers,
    config: SuggestionConfig,
    supplements: Vec<Arc<dyn SuggestionSupplement>>,
}

impl std::fmt::Debug for SuggestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionPipeline")
            .field("tiers", &self.tiers.len())
            .field("config", &self.config)
            .field("supplements", &self.supplements.len())
            .finish()
    }
}

impl SuggestionPipeline {
    pub fn new(tiers: SpellerTiers, config: SuggestionConfig) -> Self {
        Self {
            tiers,
            config,
            supplements: Vec::new(),
        }
    }

    /// Add a source of injected suggestions. Supplements contribute in the
    /// order they were added.
    pub fn with_supplement(mut self, supplement: Arc<dyn SuggestionSupplement>) -> Self {
        self.supplements.push(supplement);
        self
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    pub fn tiers(&self) -> &SpellerTiers {
        &self.tiers
    }

    /// Check `word` and collect suggestions if it is misspelled.
    pub fn check(&self, word: &str) -> CheckOutcome {
        if word.chars().all(is_whitespace) {
            return CheckOutcome::Skipped;
        }
        if !self.tiers.primary().is_misspelled(word) {
            return CheckOutcome::Correct;
        }

        let suggestions = self.collect(word);
        let max = self.config.max_suggestions;
        let truncated = max > 0 && suggestions.len() > max;
        let mut suggestions = suggestions;
        if truncated {
            suggestions.truncate(max);
        }
        debug!(
            "{word:?}: {} suggestions{}",
            suggestions.len(),
            if truncated { " (truncated)" } else { "" }
        );
        CheckOutcome::Misspelled {
            suggestions,
            truncated,
        }
    }

    /// Uncapped, normalized suggestion list.
    fn collect(&self, word: &str) -> Vec<String> {
        let long_enough = word.chars().count() >= self.config.escalation_min_length;
        let mut found = Vec::new();
        for (i, tier) in self.tiers.tiers.iter().enumerate() {
            if i > 0 && !long_enough {
                break;
            }
            found = tier.suggestions(word);
            if !found.is_empty() {
                break;
            }
        }

        let mut all: Vec<String> = Vec::new();
        for supplement in &self.supplements {
            all.extend(supplement.top_suggestions(word, &found));
        }
        let mut additional: Vec<String> = Vec::new();
        for supplement in &self.supplements {
            additional.extend(supplement.additional_suggestions(word, &found));
        }
        all.extend(found);
        all.extend(additional);

        let mut all = dedupe(all);
        if self.tiers.primary().converts_case() && starts_with_uppercase(word) {
            all = capitalize_suggestions(word, all);
        }
        all.retain(|s| s != word);
        all
    }
}

impl Speller for SuggestionPipeline {
    fn is_misspelled(&self, word: &str) -> bool {
        self.check(word).is_misspelled()
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        match self.check(word) {
            CheckOutcome::Misspelled { suggestions, .. } => suggestions,
            _ => Vec::new(),
        }
    }

    fn converts_case(&self) -> bool {
        self.tiers.primary().converts_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from_words;
    use crate::metadata::DictionaryMetadata;

    fn pipeline(words: &[&str], config: SuggestionConfig) -> SuggestionPipeline {
        let dict = build_from_words("t", words.iter().copied(), DictionaryMetadata::default())
            .unwrap()
            .unwrap();
        let tiers = SpellerTiers::new(&[Arc::new(dict)], config.tier_count).unwrap();
        SuggestionPipeline::new(tiers, config)
    }

    struct Fixed {
        top: Vec<String>,
        additional: Vec<String>,
    }

    impl SuggestionSupplement for Fixed {
        fn top_suggestions(&self, _word: &str, _found: &[String]) -> Vec<String> {
            self.top.clone()
        }

        fn additional_suggestions(&self, _word: &str, _found: &[String]) -> Vec<String> {
            self.additional.clone()
        }
    }

    fn suggestions(outcome: CheckOutcome) -> Vec<String> {
        match outcome {
            CheckOutcome::Misspelled { suggestions, .. } => suggestions,
            other => panic!("expected a misspelling, got {other:?}"),
        }
    }

    #[test]
    fn tier_count_is_clamped() {
        let p = pipeline(&["a"], SuggestionConfig { tier_count: 7, ..Default::default() });
        assert_eq!(p.tiers().len(), 3);
        let p = pipeline(&["a"], SuggestionConfig { tier_count: 0, ..Default::default() });
        assert_eq!(p.tiers().len(), 2);
    }

    #[test]
    fn known_and_blank_words() {
        let p = pipeline(&["house"], SuggestionConfig::default());
        assert_eq!(p.check("house"), CheckOutcome::Correct);
        assert_eq!(p.check("   "), CheckOutcome::Skipped);
        assert_eq!(p.check(""), CheckOutcome::Skipped);
    }

    #[test]
    fn escalates_for_long_words_only() {
        let p = pipeline(&["elephant", "cat"], SuggestionConfig::default());
        assert_eq!(suggestions(p.check("elefant")), vec!["elephant"]);
        assert_eq!(suggestions(p.check("elefent")), vec!["elephant"]);
        // Short words stay at distance 1.
        assert!(suggestions(p.check("dgo")).is_empty());
    }

    #[test]
    fn first_tier_hit_stops_escalation() {
        // "houses" is two edits away and never reached.
        let p = pipeline(&["house", "houses"], SuggestionConfig::default());
        assert_eq!(suggestions(p.check("housse")), vec!["house"]);
    }

    #[test]
    fn injected_suggestions_are_placed_and_deduped() {
        let p = pipeline(&["bogus", "bonus"], SuggestionConfig::default()).with_supplement(
            Arc::new(Fixed {
                top: vec!["bogus".to_string(), "first".to_string()],
                additional: vec!["last".to_string(), "bonus".to_string()],
            }),
        );
        assert_eq!(
            suggestions(p.check("bogos")),
            vec!["bogus", "first", "last", "bonus"]
        );
    }

    #[test]
    fn capitalized_queries_get_capitalized_suggestions() {
        let p = pipeline(&["house"], SuggestionConfig::default());
        assert_eq!(suggestions(p.check("Hous")), vec!["House"]);
    }

    #[test]
    fn case_variants_collapse_for_capitalized_queries() {
        let p = pipeline(&["M\u{00FC}ller", "m\u{00FC}ller"], SuggestionConfig::default());
        assert_eq!(suggestions(p.check("M\u{00FC}lle")), vec!["M\u{00FC}ller"]);
    }

    #[test]
    fn suggestion_capitalizing_to_the_query_stays_lowercase() {
        let mut exact = DictionaryMetadata::default();
        exact.converts_case = false;
        let names = build_from_words("names", ["m\u{00FC}ller"], exact)
            .unwrap()
            .unwrap();
        let common = build_from_words("common", ["house"], DictionaryMetadata::default())
            .unwrap()
            .unwrap();
        let tiers = SpellerTiers::new(&[Arc::new(names), Arc::new(common)], 3).unwrap();
        let p = SuggestionPipeline::new(tiers, SuggestionConfig::default());

        assert_eq!(suggestions(p.check("M\u{00FC}ller")), vec!["m\u{00FC}ller"]);
        assert_eq!(suggestions(p.check("M\u{00FC}lle")), vec!["M\u{00FC}ller"]);
    }

    #[test]
    fn cap_reports_truncation() {
        let config = SuggestionConfig {
            max_suggestions: 2,
            ..Default::default()
        };
        let p = pipeline(&["bat", "cat", "hat", "mat"], config);
        match p.check("zat") {
            CheckOutcome::Misspelled {
                suggestions,
                truncated,
            } => {
                assert_eq!(suggestions, vec!["bat", "cat"]);
                assert!(truncated);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn config_from_json() {
        let config: SuggestionConfig = serde_json::from_str(r#"{"max_suggestions": 3}"#).unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert_eq!(config.escalation_min_length, 5);
        assert_eq!(config.tier_count, 3);
    }
}
