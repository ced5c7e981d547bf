//! Identity index: node id to node slot, by universal hashing into fixed buckets.

use rand::Rng;

use crate::graph::NodeId;

/// One member of the universal family `h(x) = ((a·x + b) mod p) mod m`.
///
/// Coefficients are drawn once per graph instance; `a ∈ [1, p)`, `b ∈ [0, p)`.
#[derive(Debug, Clone)]
pub(crate) struct UniversalHash {
    a: u64,
    b: u64,
    prime: u64,
    buckets: usize,
}

impl UniversalHash {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, prime: u64, buckets: usize) -> Self {
        debug_assert!(prime >= 2 && buckets >= 1);
        Self {
            a: rng.gen_range(1..prime),
            b: rng.gen_range(0..prime),
            prime,
            buckets,
        }
    }

    /// Bucket for `id`. Negative ids are reduced with a Euclidean modulo so
    /// every id lands in `[0, buckets)`.
    #[inline]
    pub fn bucket(&self, id: NodeId) -> usize {
        let mixed = (self.a as i128 * id as i128 + self.b as i128).rem_euclid(self.prime as i128);
        (mixed as u64 % self.buckets as u64) as usize
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }
}

/// Binds a live node id to its slot in the graph's node array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexEntry {
    pub id: NodeId,
    pub slot: usize,
}

/// Fixed-capacity chained hash table from node id to node slot.
///
/// Sized once at construction; never resized. Expected O(1) per operation
/// while the number of live ids stays within the construction-time estimate.
#[derive(Debug, Clone)]
pub(crate) struct IdentityIndex {
    buckets: Vec<Vec<IndexEntry>>,
    hash: UniversalHash,
    len: usize,
}

impl IdentityIndex {
    pub fn new(hash: UniversalHash) -> Self {
        Self {
            buckets: vec![Vec::new(); hash.buckets()],
            hash,
            len: 0,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<usize> {
        self.buckets[self.hash.bucket(id)]
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.slot)
    }

    /// Insert a binding. Returns false (and changes nothing) if `id` is already present.
    pub fn insert(&mut self, id: NodeId, slot: usize) -> bool {
        let chain = &mut self.buckets[self.hash.bucket(id)];
        if chain.iter().any(|e| e.id == id) {
            return false;
        }
        chain.push(IndexEntry { id, slot });
        self.len += 1;
        true
    }

    /// Remove the binding for `id`, returning its slot.
    pub fn remove(&mut self, id: NodeId) -> Option<usize> {
        let chain = &mut self.buckets[self.hash.bucket(id)];
        let pos = chain.iter().position(|e| e.id == id)?;
        let entry = chain.swap_remove(pos);
        self.len -= 1;
        Some(entry.slot)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Longest collision chain.
    pub fn max_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.buckets.iter().flatten()
    }

    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.buckets.len() * size_of::<Vec<IndexEntry>>()
            + self
                .buckets
                .iter()
                .map(|b| b.capacity() * size_of::<IndexEntry>())
                .sum::<usize>()
    }
}
