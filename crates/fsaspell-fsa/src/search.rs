// Bounded edit-distance search over the automaton.
//
// A depth-first walk computes one Levenshtein row per path depth. A branch
// is abandoned as soon as every cell of its row exceeds the distance bound,
// since no extension of the path can come back under it.

use fsaspell_core::character::char_equals_ignore_case;

use crate::MAX_VISITED_ARCS;
use crate::arc::NO_ARCS;
use crate::automaton::Fsa;
use crate::config::SearchConfig;

/// Parameters of an approximate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of insertions, deletions and substitutions.
    pub max_distance: usize,
    /// Compare labels with simple case folding.
    pub ignore_case: bool,
    /// Stop after visiting this many arcs.
    pub visit_limit: usize,
}

impl SearchOptions {
    pub fn new(max_distance: usize) -> Self {
        Self {
            max_distance,
            ignore_case: false,
            visit_limit: MAX_VISITED_ARCS,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn visit_limit(mut self, visit_limit: usize) -> Self {
        self.visit_limit = visit_limit;
        self
    }
}

/// An accepted word within the distance bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub distance: usize,
}

impl Fsa {
    /// Find all accepted words within `options.max_distance` edits of
    /// `query`, ordered by distance and then lexically.
    pub fn find_similar(&self, query: &str, options: SearchOptions) -> Vec<Candidate> {
        let mut config = self.new_config();
        self.find_similar_with(&mut config, query, options)
    }

    /// Like [`Fsa::find_similar`], reusing the buffers of `config`.
    ///
    /// `config.truncated` tells whether the visit limit cut the search short.
    pub fn find_similar_with(
        &self,
        config: &mut SearchConfig,
        query: &str,
        options: SearchOptions,
    ) -> Vec<Candidate> {
        let query: Vec<char> = query.chars().collect();
        let n = query.len();
        let max = options.max_distance;
        let mut candidates = Vec::new();

        config.reset(n);
        if self.root() == NO_ARCS {
            return candidates;
        }
        config.arc_stack.push(Some(self.root()));

        while let Some(top) = config.arc_stack.last_mut() {
            let Some(index) = *top else {
                config.arc_stack.pop();
                continue;
            };
            let arc = self.arc(index);
            *top = if arc.is_last() { None } else { Some(index + 1) };

            config.visited += 1;
            if config.visited > options.visit_limit {
                config.truncated = true;
                break;
            }

            let depth = config.arc_stack.len();
            let label = arc.label_char();
            config.prefix.truncate(depth - 1);
            config.prefix.push(label);
            config.ensure_depth(depth);

            let (prev, cur) = config.row_pair(depth);
            cur[0] = depth;
            let mut row_min = cur[0];
            for j in 1..=n {
                let same = if options.ignore_case {
                    char_equals_ignore_case(query[j - 1], label)
                } else {
                    query[j - 1] == label
                };
                let substitution = prev[j - 1] + usize::from(!same);
                let value = (prev[j] + 1).min(cur[j - 1] + 1).min(substitution);
                cur[j] = value;
                row_min = row_min.min(value);
            }
            let distance = cur[n];

            if arc.is_final() && distance <= max {
                candidates.push(Candidate {
                    word: config.prefix.iter().collect(),
                    distance,
                });
            }
            if arc.has_target() && row_min <= max {
                config.arc_stack.push(Some(arc.target));
            }
        }

        // Candidates were found in lexical order; a stable sort keeps that
        // order within each distance.
        candidates.sort_by_key(|c| c.distance);
        candidates
    }
}
