// Case type detection and conversion

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Classification of character casing within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No letters found in the word (only digits, punctuation, etc.).
    NoLetters,
    /// All letters are lowercase: "house".
    AllLower,
    /// First letter is uppercase, rest are lowercase: "House".
    FirstUpper,
    /// Mixed case that does not fit other patterns: "hoUse", "McDonald".
    Complex,
    /// All letters are uppercase: "HOUSE".
    AllUpper,
}

/// Detect the case pattern of a character slice.
///
/// Non-letter characters (digits, punctuation) are ignored when
/// determining the case pattern.
pub fn detect_case(word: &[char]) -> CaseType {
    if word.is_empty() {
        return CaseType::NoLetters;
    }

    let mut first_uc = false;
    let mut rest_lc = true;
    let mut all_uc = true;
    let mut no_letters = true;

    if is_upper(word[0]) {
        first_uc = true;
        no_letters = false;
    }
    if is_lower(word[0]) {
        all_uc = false;
        no_letters = false;
    }

    for &c in &word[1..] {
        if is_upper(c) {
            no_letters = false;
            rest_lc = false;
        }
        if is_lower(c) {
            all_uc = false;
            no_letters = false;
        }
    }

    if no_letters {
        return CaseType::NoLetters;
    }
    if all_uc {
        return CaseType::AllUpper;
    }
    if !rest_lc {
        return CaseType::Complex;
    }
    if first_uc {
        CaseType::FirstUpper
    } else {
        CaseType::AllLower
    }
}

/// Detect the case pattern of a string.
pub fn detect_case_str(word: &str) -> CaseType {
    let chars: Vec<char> = word.chars().collect();
    detect_case(&chars)
}

/// Lowercase every character with the simple one-to-one mapping.
///
/// Unlike `str::to_lowercase` this never changes the character count, so
/// positions computed on the folded form stay valid for the original.
pub fn to_simple_lower(word: &str) -> String {
    word.chars().map(simple_lower).collect()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn uppercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_upper(first));
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

/// Lowercase the first character, leaving the rest untouched.
pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_lower(first));
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

/// Returns `true` if the first character is an uppercase letter.
pub fn starts_with_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(is_upper)
}

/// Returns `true` for words whose casing is neither all lower, all upper nor
/// capitalized ("iPhone", "McDonald").
pub fn is_mixed_case(word: &str) -> bool {
    detect_case_str(word) == CaseType::Complex
}

/// Returns `true` for capitalized camel-case words such as "McDonald":
/// uppercase first letter, lowercase second letter and at least one more
/// uppercase letter later on.
pub fn is_camel_case(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 || !is_upper(chars[0]) || !is_lower(chars[1]) {
        return false;
    }
    chars[2..].iter().any(|&c| is_upper(c))
}
