use std::collections::HashMap;

/// How a stored score relates to the true value of its position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// the search finished inside its window, the score is the true value
    Exact,
    /// the search failed high, the true value is at least the score
    LowerBound,
    /// the search failed low, the true value is at most the score
    UpperBound,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: u64,
    pub score: i32,
    pub depth: u32,
    pub bound: Bound,
}

#[derive(Clone, Debug)]
enum Storage {
    // one slot per key modulo the capacity, newer entries replace older ones
    Slots(Vec<Option<Entry>>),
    Unbounded(HashMap<u64, Entry>),
}

/// Cache of search results keyed by Zobrist hash
///
/// Entries carry the depth they were searched to and the kind of bound their
/// score represents, and are only reused by searches they are valid for.
#[derive(Clone, Debug)]
pub struct TranspositionTable {
    storage: Storage,
}

impl TranspositionTable {
    /// Creates a table holding at most `capacity` entries, or an unbounded
    /// one if `capacity` is 0
    pub fn new(capacity: usize) -> Self {
        let storage = if capacity == 0 {
            Storage::Unbounded(HashMap::new())
        } else {
            Storage::Slots(vec![None; capacity])
        };
        Self { storage }
    }

    pub fn set(&mut self, key: u64, depth: u32, score: i32, bound: Bound) {
        let entry = Entry {
            key,
            score,
            depth,
            bound,
        };
        match &mut self.storage {
            Storage::Slots(slots) => {
                let len = slots.len();
                slots[key as usize % len] = Some(entry);
            }
            Storage::Unbounded(map) => {
                map.insert(key, entry);
            }
        }
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        match &self.storage {
            Storage::Slots(slots) => {
                slots[key as usize % slots.len()].filter(|entry| entry.key == key)
            }
            Storage::Unbounded(map) => map.get(&key).copied(),
        }
    }

    /// Looks up `key` for a search of `depth` remaining plies in the window
    /// (`alpha`, `beta`)
    ///
    /// Entries searched shallower than `depth` are ignored. A usable lower bound
    /// raises `alpha` and a usable upper bound lowers `beta`. Returns the stored
    /// score when it settles the node on its own: an exact entry, or a bound
    /// that closes the window.
    pub fn probe(&self, key: u64, depth: u32, alpha: &mut i32, beta: &mut i32) -> Option<i32> {
        let entry = self.get(key).filter(|entry| entry.depth >= depth)?;
        match entry.bound {
            Bound::Exact => return Some(entry.score),
            Bound::LowerBound => *alpha = (*alpha).max(entry.score),
            Bound::UpperBound => *beta = (*beta).min(entry.score),
        }
        if *alpha >= *beta {
            Some(entry.score)
        } else {
            None
        }
    }

    /// The number of entries currently stored
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Slots(slots) => slots.iter().filter(|slot| slot.is_some()).count(),
            Storage::Unbounded(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The maximum number of entries, `None` if unbounded
    pub fn capacity(&self) -> Option<usize> {
        match &self.storage {
            Storage::Slots(slots) => Some(slots.len()),
            Storage::Unbounded(_) => None,
        }
    }

    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Slots(slots) => slots.iter_mut().for_each(|slot| *slot = None),
            Storage::Unbounded(map) => map.clear(),
        }
    }
}
