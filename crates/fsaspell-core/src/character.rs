// Character classification and simple case mapping

/// Check whether a character is punctuation.
///
/// Covers ASCII punctuation plus the typographic dashes, quotes and the
/// soft hyphen that commonly show up inside tokens.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00AD}' // SOFT HYPHEN
                | '\u{00AB}' // LEFT-POINTING DOUBLE ANGLE QUOTATION MARK
                | '\u{00BB}' // RIGHT-POINTING DOUBLE ANGLE QUOTATION MARK
                | '\u{2010}' // HYPHEN
                | '\u{2011}' // NON-BREAKING HYPHEN
                | '\u{2013}' // EN DASH
                | '\u{2014}' // EM DASH
                | '\u{2018}' // LEFT SINGLE QUOTATION MARK
                | '\u{2019}' // RIGHT SINGLE QUOTATION MARK
                | '\u{201C}' // LEFT DOUBLE QUOTATION MARK
                | '\u{201D}' // RIGHT DOUBLE QUOTATION MARK
                | '\u{2026}' // HORIZONTAL ELLIPSIS
        )
}

// ---------------------------------------------------------------------------
// Simple case conversion
//
// The standard library's to_lowercase / to_uppercase produce iterators
// because some characters map to multiple characters. For the "simple"
// one-to-one mapping only the first character is taken.
// ---------------------------------------------------------------------------

/// Convert a character to its simple lowercase equivalent.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c != simple_lower(c) || c == '\u{018F}' // LATIN CAPITAL LETTER SCHWA
}

/// Check whether a character is a lowercase letter.
pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

/// Check whether a character is a whitespace character.
///
/// Includes the no-break and zero-width-ish separators that word lists
/// copied from documents tend to contain.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{180E}' || c == '\u{200B}' || c == '\u{FEFF}'
}

/// Compare two characters for equality, ignoring case.
#[inline]
pub fn char_equals_ignore_case(a: char, b: char) -> bool {
    a == b || simple_lower(a) == simple_lower(b)
}
