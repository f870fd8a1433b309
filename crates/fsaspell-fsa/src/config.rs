// Traversal configuration for approximate search: explicit DFS stack plus
// one edit-distance row per depth.

/// Reusable search state.
///
/// The rows are stored flattened: row `d` (the distances after consuming
/// `d` automaton labels) occupies `rows[d * width..(d + 1) * width]`, where
/// `width` is the query length plus one. Row `d` is only ever derived from
/// row `d - 1`, so backtracking is just popping the arc stack.
#[derive(Debug, Default)]
pub struct SearchConfig {
    /// Next arc to visit at each depth; `None` once a state is exhausted.
    pub arc_stack: Vec<Option<u32>>,
    /// Labels of the current path.
    pub prefix: Vec<char>,
    /// Flattened distance rows.
    pub rows: Vec<usize>,
    /// Row width (query length + 1).
    pub width: usize,
    /// Arcs visited during the current search.
    pub visited: usize,
    /// Set when the search stopped at its visit limit, so the candidates
    /// found are incomplete.
    pub truncated: bool,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a query of `query_len` characters: clear the stacks and
    /// seed row 0 with `0..=query_len`.
    pub fn reset(&mut self, query_len: usize) {
        self.arc_stack.clear();
        self.prefix.clear();
        self.visited = 0;
        self.truncated = false;
        self.width = query_len + 1;
        self.rows.clear();
        self.rows.extend(0..self.width);
    }

    /// Make sure storage for row `depth` exists.
    #[inline]
    pub fn ensure_depth(&mut self, depth: usize) {
        let needed = (depth + 1) * self.width;
        if self.rows.len() < needed {
            self.rows.resize(needed, 0);
        }
    }

    /// Split the rows into the (read-only) row `depth - 1` and the (mutable)
    /// row `depth`.
    #[inline]
    pub fn row_pair(&mut self, depth: usize) -> (&[usize], &mut [usize]) {
        let width = self.width;
        let (head, tail) = self.rows.split_at_mut(depth * width);
        (&head[(depth - 1) * width..], &mut tail[..width])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_seeds_first_row() {
        let mut config = SearchConfig::new();
        config.arc_stack.push(Some(3));
        config.prefix.push('x');
        config.truncated = true;
        config.reset(4);
        assert!(!config.truncated);
        assert!(config.arc_stack.is_empty());
        assert!(config.prefix.is_empty());
        assert_eq!(config.width, 5);
        assert_eq!(config.rows, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn ensure_depth_grows_rows() {
        let mut config = SearchConfig::new();
        config.reset(2);
        config.ensure_depth(3);
        assert_eq!(config.rows.len(), 12);
        // Never shrinks.
        config.ensure_depth(1);
        assert_eq!(config.rows.len(), 12);
    }

    #[test]
    fn row_pair_addresses_adjacent_rows() {
        let mut config = SearchConfig::new();
        config.reset(2);
        config.ensure_depth(1);
        let (prev, cur) = config.row_pair(1);
        assert_eq!(prev, &[0, 1, 2]);
        cur.copy_from_slice(&[1, 1, 2]);
        assert_eq!(&config.rows[3..6], &[1, 1, 2]);
    }
}
