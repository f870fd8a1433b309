// Plain spelling lists: one entry per line.

use super::WordListProcessor;

/// Processor for spelling lists.
///
/// A line normally holds a single word. Lines with several
/// whitespace-separated tokens (multi-word entries) contribute every token,
/// since the dictionary only ever sees single words.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpellingProcessor {
    sorted: bool,
}

impl SpellingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demand lines in ascending byte order.
    pub fn require_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

impl WordListProcessor for SpellingProcessor {
    type Item = Vec<String>;

    fn id(&self) -> &'static str {
        "spelling"
    }

    fn process(&self, line: &str) -> Result<Option<Vec<String>>, String> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        Ok((!tokens.is_empty()).then_some(tokens))
    }

    fn requires_sorted_input(&self) -> bool {
        self.sorted
    }
}
