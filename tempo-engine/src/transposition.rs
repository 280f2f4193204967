//! Transposition Table.

use std::mem;

use chess::ChessMove;

use crate::coretypes::{Cp, PlyKind};
use crate::error::{self, Error};

/// What a stored score says about the true value of its position.
/// See [Node Types](https://www.chessprogramming.org/Node_Types).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Bound {
    Lower, // A beta cutoff occurred, the true score is at least `score`.
    Upper, // No move raised alpha, the true score is at most `score`.
    Exact, // Every move was searched and one raised alpha.
}

/// Entry contains information about a previously searched position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Entry {
    pub hash: u64,                   // Full hash value for a position.
    pub key_move: Option<ChessMove>, // Best move or refutation move, if any move raised alpha.
    pub depth: PlyKind,              // Remaining depth the position was searched with.
    pub score: Cp,                   // Score relative to the node, see `Cp::to_node_relative`.
    pub bound: Bound,                // How `score` relates to the true score.
}

impl Entry {
    /// Returns new Entry from provided information.
    pub const fn new(
        hash: u64,
        key_move: Option<ChessMove>,
        depth: PlyKind,
        score: Cp,
        bound: Bound,
    ) -> Self {
        Self {
            hash,
            key_move,
            depth,
            score,
            bound,
        }
    }
}

type Slot = Option<Entry>;

/// Converts a size in Megabytes to a capacity.
fn mb_to_capacity(mb: usize) -> usize {
    (mb * 1_000_000) / mem::size_of::<Slot>()
}

/// Largest power of two that is not greater than `n`, or 0.
fn floor_power_of_two(n: usize) -> usize {
    match n {
        0 => 0,
        n => 1 << (usize::BITS - 1 - n.leading_zeros()),
    }
}

/// A Transposition Table (tt) with a fixed size, memoizing previously searched
/// chess positions. The table is allocated once and never grows.
///
/// Example:
/// ```rust
/// # use tempo_engine::transposition::{Bound, Entry, TranspositionTable};
/// # use tempo_engine::coretypes::Cp;
/// let mut tt = TranspositionTable::with_capacity(1024);
/// let entry = Entry::new(0xDEAD_BEEF, None, 3, Cp(25), Bound::Exact);
///
/// tt.store(entry);
/// assert_eq!(tt.probe(0xDEAD_BEEF), Some(entry));
/// ```
/// There are some notable differences in behavior between TranspositionTable
/// and std::collections::{HashMap, HashSet}.
/// TT only cares about the hash value. It does not check for equivalence of positions,
/// so distinct positions with identical hashes are indistinguishable.
/// Index collisions are detected by comparing the full hash, and the newest entry
/// always replaces whatever occupied its slot.
pub struct TranspositionTable {
    mask: usize,
    transpositions: Box<[Slot]>,
}

impl TranspositionTable {
    const DEFAULT_CAPACITY: usize = 1 << 16;

    /// Returns a new TranspositionTable with a default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Returns a new TranspositionTable with capacity rounded down to a power of two, at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = floor_power_of_two(capacity).max(1);
        log::debug!("allocating transposition table with {capacity} entries");

        Self {
            mask: capacity - 1,
            transpositions: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// Returns a new TranspositionTable with capacity calculated to fit in given Megabytes.
    pub fn with_mb(mb: usize) -> error::Result<Self> {
        match mb_to_capacity(mb) {
            0 => Err(Error::ZeroTableSize),
            capacity => Ok(Self::with_capacity(capacity)),
        }
    }

    /// Returns the capacity of the TranspositionTable.
    pub fn capacity(&self) -> usize {
        debug_assert_eq!(self.mask + 1, self.transpositions.len());
        self.transpositions.len()
    }

    /// Removes all items from TranspositionTable.
    pub fn clear(&mut self) {
        self.transpositions.fill(None);
        log::debug!("transposition table cleared");
    }

    /// Drops original table and allocates a new table of size `new_mb`.
    /// Entries in the original table are not preserved.
    /// Returns the table's new capacity.
    pub fn set_mb(&mut self, new_mb: usize) -> error::Result<usize> {
        *self = Self::with_mb(new_mb)?;
        Ok(self.capacity())
    }

    /// Convert a full hash to an index for this TranspositionTable.
    pub fn hash_to_index(&self, hash: u64) -> usize {
        (hash & self.mask as u64) as usize
    }

    /// Returns whatever occupies the slot `hash` indexes into, which may belong to another position.
    pub fn slot(&self, hash: u64) -> Option<&Entry> {
        self.transpositions[self.hash_to_index(hash)].as_ref()
    }

    /// Returns a copy of the Entry for `hash`, or None if its slot is empty or holds another position.
    pub fn probe(&self, hash: u64) -> Option<Entry> {
        self.slot(hash).filter(|entry| entry.hash == hash).copied()
    }

    /// Returns true if TranspositionTable contains a given hash.
    pub fn contains(&self, hash: u64) -> bool {
        self.probe(hash).is_some()
    }

    /// Inserts an item into the TranspositionTable without increasing capacity.
    /// It unconditionally replaces any item that already exists at the hash index.
    pub fn store(&mut self, entry: Entry) {
        let index = self.hash_to_index(entry.hash);
        self.transpositions[index] = Some(entry);
    }

    /// Number of occupied slots per thousand, sampled from the first thousand slots.
    pub fn hashfull(&self) -> usize {
        let sample = &self.transpositions[..self.capacity().min(1000)];
        let occupied = sample.iter().filter(|slot| slot.is_some()).count();
        occupied * 1000 / sample.len()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
