// Compound lists: hyphenated compounds with an optional trailing marker
// that restricts which corrected forms get suggested.

use std::io::BufRead;

use fsaspell_core::case::{CaseType, detect_case_str, lowercase_first, starts_with_uppercase};
use hashbrown::HashSet;

use super::{Entry, WordListError, WordListProcessor, read_word_list};
use crate::metadata::Encoding;

/// Maximum number of terms in a compound.
pub const MAX_TERMS: usize = 5;

/// Trailing marker of a compound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundMarker {
    /// `+`: suggest the merged form (no dash) as well.
    NoDash,
    /// `*`: suggest only the dashed form.
    OnlyDash,
    /// `?`: suggest the merged form, and lowercase the merged parts.
    NoDashLowercase,
    /// `$`: like `?`, without recording the compound as a no-dash one.
    OnlyNoDashLowercase,
}

impl CompoundMarker {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(CompoundMarker::NoDash),
            '*' => Some(CompoundMarker::OnlyDash),
            '?' => Some(CompoundMarker::NoDashLowercase),
            '$' => Some(CompoundMarker::OnlyNoDashLowercase),
            _ => None,
        }
    }
}

/// One compound, with hyphens replaced by spaces and the marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundLine {
    pub phrase: String,
    pub marker: Option<CompoundMarker>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundProcessor;

impl WordListProcessor for CompoundProcessor {
    type Item = CompoundLine;

    fn id(&self) -> &'static str {
        "compounds"
    }

    fn process(&self, line: &str) -> Result<Option<CompoundLine>, String> {
        let (body, marker) = match line.chars().last().and_then(CompoundMarker::from_char) {
            Some(marker) => (&line[..line.len() - 1], Some(marker)),
            None => (line, None),
        };
        let normalized = body.replace('-', " ");
        let terms: Vec<&str> = normalized.split_whitespace().collect();
        if terms.len() < 2 {
            return Err("not a compound".to_string());
        }
        if terms.len() > MAX_TERMS {
            return Err(format!(
                "too many compound parts ({}), at most {MAX_TERMS} allowed",
                terms.len()
            ));
        }
        Ok(Some(CompoundLine {
            phrase: terms.join(" "),
            marker,
        }))
    }
}

/// Compounds loaded from one or more lists.
///
/// `incorrect` holds every compound in its space-separated form, the way it
/// shows up in running text when written wrongly.
#[derive(Debug, Clone, Default)]
pub struct CompoundData {
    incorrect: HashSet<String>,
    no_dash: HashSet<String>,
    only_dash: HashSet<String>,
    no_dash_lowercase: HashSet<String>,
    seen: HashSet<String>,
}

impl CompoundData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a compound list and add its entries.
    pub fn load<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
        encoding: Encoding,
    ) -> Result<(), WordListError> {
        let entries = read_word_list(reader, source_name, encoding, &CompoundProcessor)?;
        self.extend(entries, source_name)
    }

    /// Add processed entries. A compound that was already seen, in any
    /// casing, is rejected.
    pub fn extend<I>(&mut self, entries: I, source_name: &str) -> Result<(), WordListError>
    where
        I: IntoIterator<Item = Entry<CompoundLine>>,
    {
        for Entry { line, value } in entries {
            if !self.seen.insert(value.phrase.to_lowercase()) {
                return Err(WordListError::Malformed {
                    source_name: source_name.to_string(),
                    line,
                    content: value.phrase,
                    reason: "duplicate compound".to_string(),
                });
            }
            let phrase = value.phrase;
            match value.marker {
                Some(CompoundMarker::NoDash) => {
                    self.no_dash.insert(phrase.clone());
                }
                Some(CompoundMarker::OnlyDash) => {
                    self.only_dash.insert(phrase.clone());
                }
                Some(CompoundMarker::NoDashLowercase) => {
                    self.no_dash.insert(phrase.clone());
                    self.no_dash_lowercase.insert(phrase.clone());
                }
                Some(CompoundMarker::OnlyNoDashLowercase) => {
                    self.no_dash_lowercase.insert(phrase.clone());
                }
                None => {}
            }
            self.incorrect.insert(phrase);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.incorrect.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incorrect.is_empty()
    }

    pub fn is_incorrect(&self, phrase: &str) -> bool {
        self.lookup_key(phrase).is_some()
    }

    pub fn is_no_dash(&self, phrase: &str) -> bool {
        self.no_dash.contains(phrase)
    }

    pub fn is_only_dash(&self, phrase: &str) -> bool {
        self.only_dash.contains(phrase)
    }

    pub fn is_no_dash_lowercase(&self, phrase: &str) -> bool {
        self.no_dash_lowercase.contains(phrase)
    }

    /// The stored form matching `phrase`, trying the lowercase-first form
    /// for capitalized phrases.
    fn lookup_key(&self, phrase: &str) -> Option<String> {
        if self.incorrect.contains(phrase) {
            return Some(phrase.to_string());
        }
        if starts_with_uppercase(phrase) {
            let lower = lowercase_first(phrase);
            if self.incorrect.contains(&lower) {
                return Some(lower);
            }
        }
        None
    }

    /// Corrected forms for a space-separated compound, dashed form first.
    /// Empty when the phrase is not a listed compound.
    pub fn suggestions(&self, phrase: &str) -> Vec<String> {
        let Some(key) = self.lookup_key(phrase) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(2);
        if !self.no_dash.contains(&key) {
            out.push(phrase.replace(' ', "-"));
        }
        if !self.only_dash.contains(&key) && detect_case_str(phrase) != CaseType::AllUpper {
            out.push(merge(phrase, self.no_dash_lowercase.contains(&key)));
        }
        out
    }
}

/// Join the parts of a compound, optionally lowercasing every part after
/// the first.
fn merge(phrase: &str, lowercase_tail: bool) -> String {
    let mut out = String::with_capacity(phrase.len());
    for (i, part) in phrase.split(' ').enumerate() {
        if i > 0 && lowercase_tail {
            out.push_str(&lowercase_first(part));
        } else {
            out.push_str(part);
        }
    }
    out
}
