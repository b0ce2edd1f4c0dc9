//! Sparse set with per-member counts
//!
//! The classic Briggs/Torczon sparse set: a `dense` list of members in
//! insertion order plus a `sparse` array mapping every possible id to its
//! slot in `dense`. Membership is `sparse[id] < len && dense[sparse[id]] == id`,
//! so the `sparse` array never needs clearing and `clear` is O(1). Counts
//! live alongside `dense`, so enumeration touches only the members.

/// Counts occurrences of ids drawn from `0..capacity`.
#[derive(Debug, Clone)]
pub struct SparseCounter {
    sparse: Vec<u32>,
    dense: Vec<u32>,
    counts: Vec<u32>,
}

impl SparseCounter {
    /// Create a counter able to hold every id in `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: vec![0; capacity],
            dense: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// Largest id + 1 this counter accepts
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Number of distinct ids seen since the last clear
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether nothing has been added since the last clear
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    fn slot(&self, id: u32) -> Option<usize> {
        let slot = self.sparse[id as usize] as usize;
        (slot < self.dense.len() && self.dense[slot] == id).then_some(slot)
    }

    /// Whether `id` has been added since the last clear
    pub fn contains(&self, id: u32) -> bool {
        self.slot(id).is_some()
    }

    /// Add `count` occurrences of `id`.
    ///
    /// # Panics
    /// Panics if `id >= capacity`.
    #[inline]
    pub fn add(&mut self, id: u32, count: u32) {
        match self.slot(id) {
            Some(slot) => self.counts[slot] = self.counts[slot].saturating_add(count),
            None => {
                self.sparse[id as usize] = self.dense.len() as u32;
                self.dense.push(id);
                self.counts.push(count);
            }
        }
    }

    /// Occurrences of `id` since the last clear
    pub fn count(&self, id: u32) -> u32 {
        self.slot(id).map_or(0, |slot| self.counts[slot])
    }

    /// Forget all members, keeping the allocations.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.counts.clear();
    }

    /// Members and their counts in first-touch order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u32, u32)> + '_ {
        self.dense.iter().copied().zip(self.counts.iter().copied())
    }
}
