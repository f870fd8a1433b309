// Line-oriented word-list reading and the per-convention line processors.

pub mod compound;
pub mod confusion;
pub mod spelling;
pub mod wrong_words;

use std::io::{self, BufRead};
use std::sync::Arc;

use crate::metadata::Encoding;

pub use compound::{CompoundData, CompoundLine, CompoundMarker, CompoundProcessor, MAX_TERMS};
pub use confusion::{ConfusionSet, ConfusionSetProcessor, ConfusionWord};
pub use spelling::SpellingProcessor;
pub use wrong_words::{WrongWordLine, WrongWordMap, WrongWordProcessor};

/// Error type for word-list reading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WordListError {
    #[error("{source_name}:{line}: {reason}: {content:?}")]
    Malformed {
        source_name: String,
        /// 0-based line number.
        line: usize,
        content: String,
        reason: String,
    },
    #[error("failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: Arc<io::Error>,
    },
}

/// Turns one cleaned line of a word list into a value.
///
/// Implementations are stateless: the same line always gives the same
/// result, independent of the lines around it. Checks that span lines
/// (duplicates, ordering) belong to whoever collects the results.
pub trait WordListProcessor: Send + Sync {
    type Item;

    /// Identity of the convention, used in cache keys.
    fn id(&self) -> &'static str;

    /// Process a line that has already been stripped of comments and
    /// surrounding whitespace. `Ok(None)` skips the line; `Err` carries the
    /// reason the line is malformed.
    fn process(&self, line: &str) -> Result<Option<Self::Item>, String>;

    /// Whether lines must appear in ascending order.
    fn requires_sorted_input(&self) -> bool {
        false
    }
}

/// Adapter turning a plain function into a [`WordListProcessor`].
pub struct FnProcessor<F> {
    id: &'static str,
    f: F,
}

impl<F> FnProcessor<F> {
    pub fn new(id: &'static str, f: F) -> Self {
        Self { id, f }
    }
}

impl<T, F> WordListProcessor for FnProcessor<F>
where
    F: Fn(&str) -> Result<Option<T>, String> + Send + Sync,
{
    type Item = T;

    fn id(&self) -> &'static str {
        self.id
    }

    fn process(&self, line: &str) -> Result<Option<T>, String> {
        (self.f)(line)
    }
}

/// A processed line together with its 0-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    pub line: usize,
    pub value: T,
}

/// Strip a trailing `#` comment and surrounding whitespace. Returns `None`
/// when nothing is left.
pub fn clean_line(raw: &str) -> Option<&str> {
    let content = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let content = content.trim();
    (!content.is_empty()).then_some(content)
}

/// Stream `reader` through `processor`.
///
/// `source_name` only appears in errors.
pub fn read_word_list<R, P>(
    mut reader: R,
    source_name: &str,
    encoding: Encoding,
    processor: &P,
) -> Result<Vec<Entry<P::Item>>, WordListError>
where
    R: BufRead,
    P: WordListProcessor + ?Sized,
{
    let mut entries = Vec::new();
    let mut raw = Vec::new();
    let mut previous: Option<String> = None;
    let mut line = 0;

    loop {
        raw.clear();
        let read = reader
            .read_until(b'\n', &mut raw)
            .map_err(|e| WordListError::Io {
                source_name: source_name.to_string(),
                source: Arc::new(e),
            })?;
        if read == 0 {
            break;
        }
        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let malformed = |content: String, reason: &str| WordListError::Malformed {
            source_name: source_name.to_string(),
            line,
            content,
            reason: reason.to_string(),
        };

        let Some(text) = encoding.decode(bytes) else {
            return Err(malformed(
                String::from_utf8_lossy(bytes).into_owned(),
                "invalid UTF-8",
            ));
        };
        // A BOM may only lead the first line.
        let text = if line == 0 {
            text.strip_prefix('\u{FEFF}').unwrap_or(&text)
        } else {
            &text
        };

        if let Some(content) = clean_line(text) {
            if processor.requires_sorted_input() {
                if previous.as_deref().is_some_and(|p| p > content) {
                    return Err(malformed(content.to_string(), "entries are not sorted"));
                }
                previous = Some(content.to_string());
            }
            match processor.process(content) {
                Ok(Some(value)) => entries.push(Entry { line, value }),
                Ok(None) => {}
                Err(reason) => return Err(malformed(content.to_string(), &reason)),
            }
        }
        line += 1;
    }
    Ok(entries)
}

/// [`read_word_list`] over an in-memory UTF-8 string.
pub fn read_word_list_str<P>(
    text: &str,
    source_name: &str,
    processor: &P,
) -> Result<Vec<Entry<P::Item>>, WordListError>
where
    P: WordListProcessor + ?Sized,
{
    read_word_list(text.as_bytes(), source_name, Encoding::Utf8, processor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper() -> FnProcessor<impl Fn(&str) -> Result<Option<String>, String>> {
        FnProcessor::new("upper", |line: &str| {
            if line == "skip" {
                Ok(None)
            } else if line.contains('!') {
                Err("bang".to_string())
            } else {
                Ok(Some(line.to_uppercase()))
            }
        })
    }

    #[test]
    fn clean_line_strips_comments() {
        assert_eq!(clean_line("  word  "), Some("word"));
        assert_eq!(clean_line("word # note"), Some("word"));
        assert_eq!(clean_line("# only a comment"), None);
        assert_eq!(clean_line("   "), None);
    }

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let text = "# header\nalpha\n\n  beta # trailing\nskip\r\ngamma";
        let entries = read_word_list_str(text, "t.txt", &upper()).unwrap();
        let got: Vec<(usize, &str)> = entries
            .iter()
            .map(|e| (e.line, e.value.as_str()))
            .collect();
        assert_eq!(got, vec![(1, "ALPHA"), (3, "BETA"), (5, "GAMMA")]);
    }

    #[test]
    fn malformed_line_reports_position() {
        let err = read_word_list_str("ok\nbad!\n", "list.txt", &upper()).unwrap_err();
        match err {
            WordListError::Malformed {
                source_name,
                line,
                content,
                reason,
            } => {
                assert_eq!(source_name, "list.txt");
                assert_eq!(line, 1);
                assert_eq!(content, "bad!");
                assert_eq!(reason, "bang");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn latin1_sources_decode() {
        let bytes: &[u8] = b"m\xFCller\n";
        let entries = read_word_list(bytes, "l1", Encoding::Latin1, &upper()).unwrap();
        assert_eq!(entries[0].value, "M\u{00DC}LLER");

        let err = read_word_list(bytes, "u8", Encoding::Utf8, &upper()).unwrap_err();
        assert!(matches!(err, WordListError::Malformed { line: 0, .. }));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let entries = read_word_list_str("\u{FEFF}word\n", "bom", &upper()).unwrap();
        assert_eq!(entries[0].value, "WORD");
    }

    #[test]
    fn sorted_input_is_enforced_when_required() {
        let processor = SpellingProcessor::new().require_sorted(true);
        assert!(read_word_list_str("a\nb\nb\nc\n", "s", &processor).is_ok());
        let err = read_word_list_str("a\nc\nb\n", "s", &processor).unwrap_err();
        assert!(matches!(err, WordListError::Malformed { line: 2, .. }));
    }
}
