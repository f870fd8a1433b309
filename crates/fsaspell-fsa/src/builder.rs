// Incremental construction of a minimal acyclic automaton from sorted input.
//
// Words must arrive in strictly increasing order. The builder keeps the path
// of states spelled by the previous word; when a new word diverges from it,
// the states below the divergence point can no longer change and are either
// merged with an equivalent registered state or registered themselves.

use hashbrown::HashMap;

use crate::FsaError;
use crate::arc::{ARC_SIZE, Arc, NO_ARCS};
use crate::automaton::Fsa;
use crate::format::{FsaHeader, HEADER_SIZE};

/// State under construction. Two states with equal finality and equal
/// outgoing arcs (label and target) are interchangeable, which is what the
/// register keys on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct BuildState {
    is_final: bool,
    arcs: Vec<(char, usize)>,
}

const ROOT: usize = 0;

/// Builder for [`Fsa`] instances.
///
/// ```
/// use fsaspell_fsa::FsaBuilder;
///
/// let mut builder = FsaBuilder::new();
/// for word in ["bake", "cake", "fake"] {
///     builder.add(word).unwrap();
/// }
/// let fsa = builder.build().unwrap();
/// assert!(fsa.contains("cake"));
/// assert!(!fsa.contains("ake"));
/// ```
pub struct FsaBuilder {
    states: Vec<BuildState>,
    register: HashMap<BuildState, usize>,
    /// `path[i]` is the state reached after the first `i` characters of the
    /// previously added word; `path[0]` is the root.
    path: Vec<usize>,
    previous: Vec<char>,
    word_count: usize,
}

impl Default for FsaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FsaBuilder {
    pub fn new() -> Self {
        Self {
            states: vec![BuildState::default()],
            register: HashMap::new(),
            path: vec![ROOT],
            previous: Vec::new(),
            word_count: 0,
        }
    }

    /// Number of words added so far.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Add the next word. Words must be strictly increasing in code point
    /// order, which for UTF-8 is the same as byte order.
    pub fn add(&mut self, word: &str) -> Result<(), FsaError> {
        if word.is_empty() {
            return Err(FsaError::EmptyInput);
        }
        let chars: Vec<char> = word.chars().collect();
        if self.word_count > 0 && self.previous.as_slice() >= chars.as_slice() {
            return Err(FsaError::Unsorted {
                previous: self.previous.iter().collect(),
                current: word.to_string(),
            });
        }

        let prefix_len = self
            .previous
            .iter()
            .zip(chars.iter())
            .take_while(|(a, b)| a == b)
            .count();

        self.replace_or_register(prefix_len);

        let mut state = self.path[prefix_len];
        for &c in &chars[prefix_len..] {
            let next = self.states.len();
            self.states.push(BuildState::default());
            self.states[state].arcs.push((c, next));
            self.path.push(next);
            state = next;
        }
        self.states[state].is_final = true;

        self.previous = chars;
        self.word_count += 1;
        Ok(())
    }

    /// Minimize the states on the current path deeper than `keep` characters,
    /// deepest first, so every state is compared only after its children
    /// are final.
    fn replace_or_register(&mut self, keep: usize) {
        while self.path.len() > keep + 1 {
            let Some(child) = self.path.pop() else {
                break;
            };
            let parent = self.path[self.path.len() - 1];

            if let Some(&existing) = self.register.get(&self.states[child]) {
                if let Some(last) = self.states[parent].arcs.last_mut() {
                    last.1 = existing;
                }
                // Newest state is unreferenced now; reclaim it.
                if child + 1 == self.states.len() {
                    self.states.pop();
                }
            } else {
                self.register.insert(self.states[child].clone(), child);
            }
        }
    }

    /// Finish construction and serialize the automaton into its binary form.
    pub fn finish(mut self) -> Result<Vec<u8>, FsaError> {
        self.replace_or_register(0);
        self.register.clear();

        // Assign arc-table offsets in depth-first discovery order. Only
        // states with outgoing arcs occupy space in the table.
        let mut offsets = vec![NO_ARCS; self.states.len()];
        let mut order: Vec<usize> = Vec::new();
        let mut total: usize = 0;

        if !self.states[ROOT].arcs.is_empty() {
            offsets[ROOT] = 0;
            total = self.states[ROOT].arcs.len();
            order.push(ROOT);
            let mut stack = vec![ROOT];
            while let Some(state) = stack.pop() {
                for &(_, target) in &self.states[state].arcs {
                    let target_arcs = self.states[target].arcs.len();
                    if target_arcs > 0 && offsets[target] == NO_ARCS {
                        if total + target_arcs >= NO_ARCS as usize {
                            return Err(FsaError::TooLarge(total + target_arcs));
                        }
                        offsets[target] = total as u32;
                        total += target_arcs;
                        order.push(target);
                        stack.push(target);
                    }
                }
            }
        }

        let mut arcs: Vec<Arc> = Vec::with_capacity(total);
        for &state in &order {
            let state_arcs = &self.states[state].arcs;
            for (i, &(label, target)) in state_arcs.iter().enumerate() {
                arcs.push(Arc::new(
                    label,
                    offsets[target],
                    self.states[target].is_final,
                    i + 1 == state_arcs.len(),
                ));
            }
        }

        let root = if order.is_empty() { NO_ARCS } else { 0 };
        let mut data = Vec::with_capacity(HEADER_SIZE + arcs.len() * ARC_SIZE);
        data.extend_from_slice(&FsaHeader::new(root).to_bytes());
        data.extend_from_slice(bytemuck::cast_slice(&arcs));
        Ok(data)
    }

    /// Finish construction and load the result.
    pub fn build(self) -> Result<Fsa, FsaError> {
        let data = self.finish()?;
        Fsa::from_bytes(&data)
    }
}

/// Build an automaton from words that are already sorted and deduplicated.
pub fn build_sorted<I, S>(words: I) -> Result<Fsa, FsaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = FsaBuilder::new();
    for word in words {
        builder.add(word.as_ref())?;
    }
    builder.build()
}
