// Automaton loading, membership and enumeration.

use crate::FsaError;
use crate::arc::{ARC_SIZE, Arc, NO_ARCS};
use crate::config::SearchConfig;
use crate::format::{self, FsaHeader, HEADER_SIZE};

/// A loaded, immutable word automaton.
///
/// Built with [`crate::FsaBuilder`] or loaded from a blob with
/// [`Fsa::from_bytes`]. All query methods take `&self`, so a single instance
/// can be shared across threads.
pub struct Fsa {
    arcs: Vec<Arc>,
    root: u32,
}

impl std::fmt::Debug for Fsa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsa")
            .field("arc_count", &self.arcs.len())
            .field("root", &self.root)
            .finish()
    }
}

impl Fsa {
    /// Load an automaton from its binary form.
    ///
    /// The arc table is copied into an owned `Vec<Arc>` because the source
    /// slice may not be 4-byte aligned. Every arc is validated so traversal
    /// never has to bounds-check targets again.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsaError> {
        let header = format::parse_header(data)?;
        let remaining = &data[HEADER_SIZE..];
        if remaining.len() % ARC_SIZE != 0 {
            return Err(FsaError::MisalignedArcTable(remaining.len()));
        }

        let arc_count = remaining.len() / ARC_SIZE;
        let mut arcs = vec![
            Arc {
                label: 0,
                target: 0,
                flags: 0
            };
            arc_count
        ];
        let dst_bytes = bytemuck::cast_slice_mut::<Arc, u8>(&mut arcs);
        dst_bytes.copy_from_slice(remaining);

        validate(&arcs, header.root)?;

        Ok(Self {
            arcs,
            root: header.root,
        })
    }

    /// Serialize into the binary form accepted by [`Fsa::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEADER_SIZE + self.arcs.len() * ARC_SIZE);
        data.extend_from_slice(&FsaHeader::new(self.root).to_bytes());
        data.extend_from_slice(bytemuck::cast_slice(&self.arcs));
        data
    }

    /// Number of arcs in the arc table.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Size of the serialized form in bytes.
    pub fn byte_size(&self) -> usize {
        HEADER_SIZE + self.arcs.len() * ARC_SIZE
    }

    /// Whether the automaton accepts no words.
    pub fn is_empty(&self) -> bool {
        self.root == NO_ARCS
    }

    pub(crate) fn root(&self) -> u32 {
        self.root
    }

    pub(crate) fn arc(&self, index: u32) -> Arc {
        self.arcs[index as usize]
    }

    /// Find the arc labelled `label` among the arcs of the state starting at
    /// `state`. Arcs are sorted by label, so the scan stops early.
    fn find_arc(&self, state: u32, label: char) -> Option<Arc> {
        let label = label as u32;
        let mut index = state as usize;
        loop {
            let arc = self.arcs[index];
            if arc.label == label {
                return Some(arc);
            }
            if arc.label > label || arc.is_last() {
                return None;
            }
            index += 1;
        }
    }

    /// Check whether `word` is accepted.
    pub fn contains(&self, word: &str) -> bool {
        let mut state = self.root;
        let mut accepted = false;
        for c in word.chars() {
            if state == NO_ARCS {
                return false;
            }
            match self.find_arc(state, c) {
                Some(arc) => {
                    accepted = arc.is_final();
                    state = arc.target;
                }
                None => return false,
            }
        }
        accepted
    }

    /// Iterate over all accepted words in lexical order.
    pub fn words(&self) -> Words<'_> {
        let stack = if self.root == NO_ARCS {
            Vec::new()
        } else {
            vec![Some(self.root)]
        };
        Words {
            fsa: self,
            stack,
            prefix: Vec::new(),
        }
    }

    /// Create a fresh traversal configuration for approximate search.
    pub fn new_config(&self) -> SearchConfig {
        SearchConfig::new()
    }
}

/// Check structural consistency of an arc table.
fn validate(arcs: &[Arc], root: u32) -> Result<(), FsaError> {
    if root == NO_ARCS {
        if !arcs.is_empty() {
            return Err(FsaError::Corrupt(
                "arcs present in an automaton without a root".to_string(),
            ));
        }
        return Ok(());
    }
    if root as usize >= arcs.len() {
        return Err(FsaError::Corrupt(format!(
            "root offset {root} outside of {} arcs",
            arcs.len()
        )));
    }
    for (i, arc) in arcs.iter().enumerate() {
        if char::from_u32(arc.label).is_none() {
            return Err(FsaError::Corrupt(format!(
                "arc {i} has invalid label {:#x}",
                arc.label
            )));
        }
        if arc.target != NO_ARCS && arc.target as usize >= arcs.len() {
            return Err(FsaError::Corrupt(format!(
                "arc {i} points to {} outside of {} arcs",
                arc.target,
                arcs.len()
            )));
        }
        if !arc.has_target() && !arc.is_final() {
            return Err(FsaError::Corrupt(format!(
                "arc {i} leads to a dead non-final state"
            )));
        }
    }
    if arcs.last().is_some_and(|arc| !arc.is_last()) {
        return Err(FsaError::Corrupt(
            "last arc of the table does not close its state".to_string(),
        ));
    }
    check_reachable_states(arcs, root)
}

const UNSEEN: u8 = 0;
const ACTIVE: u8 = 1;
const DONE: u8 = 2;

/// Walk every state reachable from `root`. Each state must list its arcs in
/// strictly increasing label order, and no path may lead back to a state
/// still on the walk.
///
/// Requires the table to end with a `LAST` arc, so every state's run of
/// arcs stays in bounds.
fn check_reachable_states(arcs: &[Arc], root: u32) -> Result<(), FsaError> {
    let mut marks = vec![UNSEEN; arcs.len()];
    marks[root as usize] = ACTIVE;
    // (first arc of the state, next arc to visit)
    let mut stack: Vec<(usize, Option<usize>)> = vec![(root as usize, Some(root as usize))];

    while let Some(top) = stack.last_mut() {
        let (state, cursor) = *top;
        let Some(index) = cursor else {
            marks[state] = DONE;
            stack.pop();
            continue;
        };
        let arc = arcs[index];
        top.1 = if arc.is_last() { None } else { Some(index + 1) };

        if !arc.is_last() && arcs[index + 1].label <= arc.label {
            return Err(FsaError::Corrupt(format!(
                "arcs of state {state} are not in increasing label order at arc {}",
                index + 1
            )));
        }
        if !arc.has_target() {
            continue;
        }
        let target = arc.target as usize;
        match marks[target] {
            UNSEEN => {
                marks[target] = ACTIVE;
                stack.push((target, Some(target)));
            }
            ACTIVE => {
                return Err(FsaError::Corrupt(format!(
                    "cycle: arc {index} leads back to state {target}"
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Iterator over accepted words, produced by [`Fsa::words`].
///
/// Each stack entry holds the next arc to visit at that depth, or `None`
/// once the state's arcs are exhausted.
pub struct Words<'a> {
    fsa: &'a Fsa,
    stack: Vec<Option<u32>>,
    prefix: Vec<char>,
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let top = self.stack.last_mut()?;
            let Some(index) = *top else {
                self.stack.pop();
                continue;
            };
            let arc = self.fsa.arc(index);
            *top = if arc.is_last() { None } else { Some(index + 1) };

            let depth = self.stack.len();
            self.prefix.truncate(depth - 1);
            self.prefix.push(arc.label_char());

            if arc.has_target() {
                self.stack.push(Some(arc.target));
            }
            if arc.is_final() {
                return Some(self.prefix.iter().collect());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::{FLAG_FINAL, FLAG_LAST};
    use crate::builder::build_sorted;

    #[test]
    fn words_come_back_in_order() {
        let input = ["a", "ab", "abc", "b", "ba", "z\u{00FC}rich"];
        let fsa = build_sorted(input).unwrap();
        let words: Vec<String> = fsa.words().collect();
        assert_eq!(words, input);
    }

    #[test]
    fn round_trip_through_bytes() {
        let fsa = build_sorted(["apple", "apply", "banana"]).unwrap();
        let bytes = fsa.to_bytes();
        assert_eq!(bytes.len(), fsa.byte_size());
        let loaded = Fsa::from_bytes(&bytes).unwrap();
        assert!(loaded.contains("apply"));
        assert!(!loaded.contains("appl"));
        assert_eq!(loaded.words().count(), 3);
    }

    #[test]
    fn empty_word_is_never_accepted() {
        let fsa = build_sorted(["a"]).unwrap();
        assert!(!fsa.contains(""));
    }

    #[test]
    fn reject_misaligned_table() {
        let mut bytes = build_sorted(["a"]).unwrap().to_bytes();
        bytes.push(0);
        assert_eq!(
            Fsa::from_bytes(&bytes).unwrap_err(),
            FsaError::MisalignedArcTable(13)
        );
    }

    fn blob(root: u32, arcs: &[Arc]) -> Vec<u8> {
        let mut data = FsaHeader::new(root).to_bytes().to_vec();
        data.extend_from_slice(bytemuck::cast_slice(arcs));
        data
    }

    #[test]
    fn reject_target_out_of_range() {
        let arcs = [Arc {
            label: 'a' as u32,
            target: 5,
            flags: FLAG_FINAL | FLAG_LAST,
        }];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }

    #[test]
    fn reject_dead_non_final_arc() {
        let arcs = [Arc {
            label: 'a' as u32,
            target: NO_ARCS,
            flags: FLAG_LAST,
        }];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }

    #[test]
    fn reject_invalid_label() {
        let arcs = [Arc {
            label: 0xD800,
            target: NO_ARCS,
            flags: FLAG_FINAL | FLAG_LAST,
        }];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }

    #[test]
    fn reject_unterminated_state() {
        let arcs = [Arc {
            label: 'a' as u32,
            target: NO_ARCS,
            flags: FLAG_FINAL,
        }];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }

    #[test]
    fn reject_arc_back_to_root() {
        let arcs = [Arc::new('a', 0, true, true)];
        let err = Fsa::from_bytes(&blob(0, &arcs)).unwrap_err();
        assert!(matches!(&err, FsaError::Corrupt(msg) if msg.starts_with("cycle")));
    }

    #[test]
    fn reject_cycle_below_root() {
        // root -a-> 1 -b-> 2 -c-> 1
        let arcs = [
            Arc::new('a', 1, false, true),
            Arc::new('b', 2, true, true),
            Arc::new('c', 1, true, true),
        ];
        let err = Fsa::from_bytes(&blob(0, &arcs)).unwrap_err();
        assert!(matches!(&err, FsaError::Corrupt(msg) if msg.starts_with("cycle")));
    }

    #[test]
    fn shared_suffix_state_is_not_a_cycle() {
        // "ac" and "bc" both lead through the state at arc 2.
        let arcs = [
            Arc::new('a', 2, false, false),
            Arc::new('b', 2, false, true),
            Arc::new('c', NO_ARCS, true, true),
        ];
        let fsa = Fsa::from_bytes(&blob(0, &arcs)).unwrap();
        assert_eq!(fsa.words().collect::<Vec<_>>(), ["ac", "bc"]);
    }

    #[test]
    fn reject_unordered_labels() {
        let arcs = [
            Arc::new('b', NO_ARCS, true, false),
            Arc::new('a', NO_ARCS, true, true),
        ];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));

        let duplicated = [
            Arc::new('a', NO_ARCS, true, false),
            Arc::new('a', NO_ARCS, true, true),
        ];
        assert!(matches!(
            Fsa::from_bytes(&blob(0, &duplicated)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }

    #[test]
    fn built_automata_pass_validation() {
        let fsa = build_sorted(["car", "card", "care", "cart", "scar", "scare"]).unwrap();
        let loaded = Fsa::from_bytes(&fsa.to_bytes()).unwrap();
        assert_eq!(loaded.words().count(), 6);
    }

    #[test]
    fn reject_root_out_of_range() {
        let arcs = [Arc {
            label: 'a' as u32,
            target: NO_ARCS,
            flags: FLAG_FINAL | FLAG_LAST,
        }];
        assert!(matches!(
            Fsa::from_bytes(&blob(3, &arcs)).unwrap_err(),
            FsaError::Corrupt(_)
        ));
    }
}
