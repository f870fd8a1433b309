// Suggestion post-processing: injected suggestions, deduplication and case
// normalization, plus the tiered pipeline tying them together.

pub mod pipeline;

use fsaspell_core::case::{is_mixed_case, uppercase_first};

pub use pipeline::{CheckOutcome, SpellerTiers, SuggestionConfig, SuggestionPipeline};

/// Source of suggestions beyond what the dictionaries find, such as a
/// wrong-word map or a rule-specific list.
pub trait SuggestionSupplement: Send + Sync {
    /// Suggestions placed before the dictionary ones.
    fn top_suggestions(&self, _word: &str, _found: &[String]) -> Vec<String> {
        Vec::new()
    }

    /// Suggestions placed after the dictionary ones.
    fn additional_suggestions(&self, _word: &str, _found: &[String]) -> Vec<String> {
        Vec::new()
    }
}

/// Remove exact duplicates, keeping first occurrences.
pub fn dedupe(suggestions: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(suggestions.len());
    for s in suggestions {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// Capitalize suggestions for a capitalized query.
///
/// Each suggestion is replaced by its uppercase-first form, unless that form
/// is the query itself or the suggestion has mixed case. When the
/// capitalized form already occurs in the list, only the earlier of the two
/// positions survives.
pub fn capitalize_suggestions(word: &str, suggestions: Vec<String>) -> Vec<String> {
    let mut out = suggestions;
    let mut i = 0;
    while i < out.len() {
        let mut capitalized = uppercase_first(&out[i]);
        if capitalized == word || is_mixed_case(&out[i]) {
            capitalized = out[i].clone();
        }
        match out.iter().position(|s| *s == capitalized) {
            Some(pos) if pos < i => {
                out.remove(i);
                continue;
            }
            Some(pos) if pos > i => {
                out.remove(pos);
            }
            _ => {}
        }
        out[i] = capitalized;
        i += 1;
    }
    out
}
