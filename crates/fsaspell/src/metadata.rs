// Dictionary metadata stored next to a binary dictionary as `<name>.info`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

pub const KEY_SEPARATOR: &str = "fsa.dict.separator";
pub const KEY_ENCODING: &str = "fsa.dict.encoding";
pub const KEY_CONVERT_CASE: &str = "fsa.dict.speller.convert-case";
pub const KEY_IGNORE_NUMBERS: &str = "fsa.dict.speller.ignore-numbers";
pub const KEY_IGNORE_ALL_UPPERCASE: &str = "fsa.dict.speller.ignore-all-uppercase";
pub const KEY_IGNORE_CAMEL_CASE: &str = "fsa.dict.speller.ignore-camel-case";
pub const KEY_IGNORE_PUNCTUATION: &str = "fsa.dict.speller.ignore-punctuation";
pub const KEY_RUNON_WORDS: &str = "fsa.dict.speller.runon-words";
pub const KEY_MAX_DISTANCE: &str = "fsa.dict.speller.max-distance";
pub const KEY_LOCALE: &str = "fsa.dict.speller.locale";

/// Error type for `.info` parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("required metadata key {0} is missing")]
    MissingKey(&'static str),
    #[error("invalid value {value:?} for metadata key {key}")]
    InvalidValue { key: String, value: String },
    #[error("line {line}: expected key=value, got {content:?}")]
    Malformed { line: usize, content: String },
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
}

/// Character encoding of text sources belonging to a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn parse(name: &str) -> Result<Self, MetadataError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(MetadataError::UnsupportedEncoding(name.to_string())),
        }
    }

    /// Canonical name, as written to `.info` files and cache keys.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "iso-8859-1",
        }
    }

    /// Decode one line of raw bytes. Returns `None` for invalid UTF-8;
    /// every byte sequence is valid Latin-1.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
            Encoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Parsed `.info` contents.
///
/// Only `fsa.dict.separator` and `fsa.dict.encoding` are required; the
/// speller switches default to enabled. Keys this crate does not know about
/// are kept so that [`DictionaryMetadata::to_info_string`] loses nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMetadata {
    pub separator: char,
    pub encoding: Encoding,
    pub converts_case: bool,
    pub ignore_numbers: bool,
    pub ignore_all_uppercase: bool,
    pub ignore_camel_case: bool,
    pub ignore_punctuation: bool,
    pub runon_words: bool,
    /// Upper bound on the edit distance used against this dictionary.
    pub max_distance: Option<usize>,
    pub locale: Option<String>,
    extra: BTreeMap<String, String>,
}

impl Default for DictionaryMetadata {
    fn default() -> Self {
        Self::new(Encoding::Utf8)
    }
}

impl DictionaryMetadata {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            separator: '+',
            encoding,
            converts_case: true,
            ignore_numbers: true,
            ignore_all_uppercase: true,
            ignore_camel_case: true,
            ignore_punctuation: true,
            runon_words: true,
            max_distance: None,
            locale: None,
            extra: BTreeMap::new(),
        }
    }

    /// Parse properties-style `key=value` text. `#` and `!` start comment
    /// lines.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let mut properties = BTreeMap::new();
        for (line, raw) in text.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(MetadataError::Malformed {
                    line,
                    content: raw.to_string(),
                });
            };
            properties.insert(key.trim().to_string(), value.trim().to_string());
        }

        let separator = take_required(&mut properties, KEY_SEPARATOR)?;
        let mut separator_chars = separator.chars();
        let separator = match (separator_chars.next(), separator_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(MetadataError::InvalidValue {
                    key: KEY_SEPARATOR.to_string(),
                    value: separator,
                });
            }
        };
        let encoding = Encoding::parse(&take_required(&mut properties, KEY_ENCODING)?)?;

        let mut metadata = Self::new(encoding);
        metadata.separator = separator;
        take_bool(&mut properties, KEY_CONVERT_CASE, &mut metadata.converts_case)?;
        take_bool(&mut properties, KEY_IGNORE_NUMBERS, &mut metadata.ignore_numbers)?;
        take_bool(
            &mut properties,
            KEY_IGNORE_ALL_UPPERCASE,
            &mut metadata.ignore_all_uppercase,
        )?;
        take_bool(
            &mut properties,
            KEY_IGNORE_CAMEL_CASE,
            &mut metadata.ignore_camel_case,
        )?;
        take_bool(
            &mut properties,
            KEY_IGNORE_PUNCTUATION,
            &mut metadata.ignore_punctuation,
        )?;
        take_bool(&mut properties, KEY_RUNON_WORDS, &mut metadata.runon_words)?;

        if let Some(value) = properties.remove(KEY_MAX_DISTANCE) {
            match value.parse::<usize>() {
                Ok(distance) if distance > 0 => metadata.max_distance = Some(distance),
                _ => {
                    return Err(MetadataError::InvalidValue {
                        key: KEY_MAX_DISTANCE.to_string(),
                        value,
                    });
                }
            }
        }
        metadata.locale = properties.remove(KEY_LOCALE).filter(|l| !l.is_empty());
        metadata.extra = properties;
        Ok(metadata)
    }

    /// Value of a key this crate does not interpret.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Serialize back to `.info` text.
    pub fn to_info_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{KEY_SEPARATOR}={}", self.separator);
        let _ = writeln!(out, "{KEY_ENCODING}={}", self.encoding.name());
        let flags = [
            (KEY_CONVERT_CASE, self.converts_case),
            (KEY_IGNORE_NUMBERS, self.ignore_numbers),
            (KEY_IGNORE_ALL_UPPERCASE, self.ignore_all_uppercase),
            (KEY_IGNORE_CAMEL_CASE, self.ignore_camel_case),
            (KEY_IGNORE_PUNCTUATION, self.ignore_punctuation),
            (KEY_RUNON_WORDS, self.runon_words),
        ];
        for (key, value) in flags {
            let _ = writeln!(out, "{key}={value}");
        }
        if let Some(distance) = self.max_distance {
            let _ = writeln!(out, "{KEY_MAX_DISTANCE}={distance}");
        }
        if let Some(locale) = &self.locale {
            let _ = writeln!(out, "{KEY_LOCALE}={locale}");
        }
        for (key, value) in &self.extra {
            let _ = writeln!(out, "{key}={value}");
        }
        out
    }
}

fn take_required(
    properties: &mut BTreeMap<String, String>,
    key: &'static str,
) -> Result<String, MetadataError> {
    properties
        .remove(key)
        .filter(|v| !v.is_empty())
        .ok_or(MetadataError::MissingKey(key))
}

fn take_bool(
    properties: &mut BTreeMap<String, String>,
    key: &'static str,
    target: &mut bool,
) -> Result<(), MetadataError> {
    let Some(value) = properties.remove(key) else {
        return Ok(());
    };
    *target = match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        _ => {
            return Err(MetadataError::InvalidValue {
                key: key.to_string(),
                value,
            });
        }
    };
    Ok(())
}
