//! History structure used for repetition detection.

/// History tracks hashes of previously visited positions to detect repeated positions.
/// It is stateful, in that functions assume the next interaction comes from the next
/// move in a game or search path.
///
/// It contains the hashes of all previously visited positions,
/// and the indices past which no earlier position can ever occur again.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct History {
    hash_history: Vec<u64>,    // All visited position hashes in order.
    unrepeatables: Vec<usize>, // Stack of previous heads.
    head: usize,               // First index which may still be repeated.
}

impl History {
    /// Create a new empty History.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the hash of a position that is being moved away from.
    /// If the move leaving it is irreversible, no position up to and including it can reoccur.
    pub fn push(&mut self, hash: u64, is_irreversible: bool) {
        self.hash_history.push(hash);

        if is_irreversible {
            self.unrepeatables.push(self.head);
            self.head = self.hash_history.len();
        }
    }

    /// Pops the most recent position, restoring the previous head if it was pushed irreversibly.
    pub fn pop(&mut self) {
        debug_assert!(!self.hash_history.is_empty());
        if self.head > 0 && self.head == self.hash_history.len() {
            self.head = self.unrepeatables.pop().unwrap_or(0);
        }
        self.hash_history.pop();
    }

    /// Returns true if the position occurs at least once in the repeatable part of history.
    pub fn contains(&self, hash: u64) -> bool {
        self.contains_n(hash, 1)
    }

    /// Returns true if the position occurs in repeatable history at least `count` times.
    pub fn contains_n(&self, hash: u64, count: usize) -> bool {
        self.hash_history[self.head..]
            .iter()
            .rev()
            .filter(|old_hash| **old_hash == hash)
            .nth(count.saturating_sub(1))
            .is_some()
    }

    /// Number of positions in history.
    pub fn len(&self) -> usize {
        self.hash_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hash_history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_contains_nothing() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(!history.contains(0));
    }

    #[test]
    fn irreversible_move_hides_earlier_positions() {
        let mut history = History::new();
        history.push(1, false);
        history.push(2, false);
        assert!(history.contains(1));

        history.push(3, true);
        assert!(!history.contains(1));
        assert!(!history.contains(3));

        history.push(4, false);
        assert!(history.contains(4));

        history.pop();
        history.pop();
        assert_eq!(history.len(), 2);
        assert!(history.contains(1));
        assert!(history.contains(2));
    }

    #[test]
    fn contains_n_counts_occurrences() {
        let mut history = History::new();
        history.push(7, false);
        history.push(8, false);
        history.push(7, false);
        assert!(history.contains_n(7, 2));
        assert!(!history.contains_n(7, 3));
        assert!(!history.contains_n(8, 2));
    }
}
