//! Indexed binary max-heap over neighborhood weights.

use crate::graph::{NeighborhoodWeight, NodeId};

/// One heap element: a node's current neighborhood weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeapEntry {
    pub key: NeighborhoodWeight,
    pub id: NodeId,
    /// Node-array slot; the handle used to look the entry's position up.
    pub slot: usize,
}

/// Array-backed binary max-heap with position tracking.
///
/// `positions[slot]` always holds the array index of the entry for `slot`, or
/// `DETACHED` once the entry has been deleted. Every swap rewrites both
/// moved entries' positions, so a position read through [`MaxHeap::position_of`]
/// stays valid across arbitrary prior mutations.
///
/// Ties in key are not broken by any secondary order.
#[derive(Debug, Clone)]
pub(crate) struct MaxHeap {
    entries: Vec<HeapEntry>,
    positions: Vec<usize>,
}

impl MaxHeap {
    const DETACHED: usize = usize::MAX;

    /// Bottom-up heapify in O(n). Slots must be distinct.
    pub fn build(entries: Vec<HeapEntry>) -> Self {
        let slots = entries.iter().map(|e| e.slot + 1).max().unwrap_or(0);
        let mut positions = vec![Self::DETACHED; slots];
        for (i, e) in entries.iter().enumerate() {
            positions[e.slot] = i;
        }
        let mut heap = Self { entries, positions };
        for i in (0..heap.entries.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek_max(&self) -> Option<&HeapEntry> {
        self.entries.first()
    }

    pub fn get(&self, position: usize) -> Option<&HeapEntry> {
        self.entries.get(position)
    }

    /// Current array position of the entry for `slot`.
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        match self.positions.get(slot) {
            Some(&p) if p != Self::DETACHED => Some(p),
            _ => None,
        }
    }

    /// `key += delta` at `position`, then restore order upward.
    pub fn increase_key(&mut self, position: usize, delta: NeighborhoodWeight) {
        debug_assert!(delta >= 0, "increase_key with negative delta {}", delta);
        self.entries[position].key += delta;
        self.sift_up(position);
    }

    /// `key -= delta` at `position`, then restore order downward.
    pub fn decrease_key(&mut self, position: usize, delta: NeighborhoodWeight) {
        debug_assert!(delta >= 0, "decrease_key with negative delta {}", delta);
        self.entries[position].key -= delta;
        self.sift_down(position);
    }

    /// `key += delta` for a delta of either sign. Negative node weights make
    /// an edge insertion lower a key, so the sift direction follows the sign.
    pub fn adjust_key(&mut self, position: usize, delta: NeighborhoodWeight) {
        if delta >= 0 {
            self.increase_key(position, delta);
        } else {
            self.decrease_key(position, -delta);
        }
    }

    /// Remove the entry at `position` and return it.
    pub fn delete_at(&mut self, position: usize) -> HeapEntry {
        let last = self.entries.len() - 1;
        if position != last {
            self.swap(position, last);
        }
        let removed = self.entries.swap_remove(last);
        self.positions[removed.slot] = Self::DETACHED;

        if position < self.entries.len() {
            if position > 0 && self.key(position) > self.key(Self::parent(position)) {
                self.sift_up(position);
            } else {
                self.sift_down(position);
            }
        }
        removed
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &HeapEntry> {
        self.entries.iter()
    }

    /// Check heap order and position bookkeeping. Returns the first violation.
    pub fn audit(&self) -> Result<(), String> {
        for (i, e) in self.entries.iter().enumerate() {
            if self.position_of(e.slot) != Some(i) {
                return Err(format!(
                    "heap entry for node {} sits at {} but is recorded at {:?}",
                    e.id,
                    i,
                    self.position_of(e.slot)
                ));
            }
            if i > 0 && e.key > self.key(Self::parent(i)) {
                return Err(format!(
                    "heap order violated at {}: key {} above parent key {}",
                    i,
                    e.key,
                    self.key(Self::parent(i))
                ));
            }
        }
        let tracked = self.positions.iter().filter(|&&p| p != Self::DETACHED).count();
        if tracked != self.entries.len() {
            return Err(format!(
                "{} tracked positions for {} heap entries",
                tracked,
                self.entries.len()
            ));
        }
        Ok(())
    }

    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.entries.capacity() * size_of::<HeapEntry>() + self.positions.len() * size_of::<usize>()
    }

    #[inline]
    fn key(&self, position: usize) -> NeighborhoodWeight {
        self.entries[position].key
    }

    #[inline]
    fn parent(position: usize) -> usize {
        (position - 1) / 2
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.entries.swap(i, j);
        self.positions[self.entries[i].slot] = i;
        self.positions[self.entries[j].slot] = j;
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = Self::parent(position);
            if self.key(position) <= self.key(parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut largest = left;
            if right < len && self.key(right) > self.key(left) {
                largest = right;
            }
            if self.key(largest) <= self.key(position) {
                break;
            }
            self.swap(position, largest);
            position = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn entries(keys: &[NeighborhoodWeight]) -> Vec<HeapEntry> {
        keys.iter()
            .enumerate()
            .map(|(slot, &key)| HeapEntry {
                key,
                id: slot as NodeId * 10,
                slot,
            })
            .collect()
    }

    #[test]
    fn test_build_puts_max_at_root() {
        let heap = MaxHeap::build(entries(&[3, 9, 1, 7, 9, 2, 8]));
        assert_eq!(heap.peek_max().unwrap().key, 9);
        assert_eq!(heap.len(), 7);
        heap.audit().unwrap();
    }

    #[test]
    fn test_build_heapifies_root() {
        // Root is the smallest element: bottom-up build must still sift index 0.
        let heap = MaxHeap::build(entries(&[1, 5, 4]));
        assert_eq!(heap.peek_max().unwrap().key, 5);
        heap.audit().unwrap();
    }

    #[test]
    fn test_build_empty() {
        let heap = MaxHeap::build(Vec::new());
        assert!(heap.is_empty());
        assert!(heap.peek_max().is_none());
        assert_eq!(heap.position_of(0), None);
        heap.audit().unwrap();
    }

    #[test]
    fn test_increase_key_moves_up() {
        let mut heap = MaxHeap::build(entries(&[10, 5, 4, 3, 2]));
        let pos = heap.position_of(4).unwrap();
        heap.increase_key(pos, 20);
        assert_eq!(heap.peek_max().unwrap().slot, 4);
        assert_eq!(heap.peek_max().unwrap().key, 22);
        assert_eq!(heap.position_of(4), Some(0));
        heap.audit().unwrap();
    }

    #[test]
    fn test_decrease_key_moves_down() {
        let mut heap = MaxHeap::build(entries(&[10, 5, 4, 3, 2]));
        let root_slot = heap.peek_max().unwrap().slot;
        heap.decrease_key(0, 9);
        assert_eq!(heap.peek_max().unwrap().key, 5);
        assert_ne!(heap.position_of(root_slot), Some(0));
        heap.audit().unwrap();
    }

    #[test]
    fn test_delete_last_position() {
        let mut heap = MaxHeap::build(entries(&[10, 5, 4]));
        let last = heap.len() - 1;
        let removed = heap.delete_at(last);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.position_of(removed.slot), None);
        heap.audit().unwrap();
    }

    #[test]
    fn test_delete_only_entry() {
        let mut heap = MaxHeap::build(entries(&[42]));
        let removed = heap.delete_at(0);
        assert_eq!(removed.key, 42);
        assert!(heap.is_empty());
        heap.audit().unwrap();
    }

    #[test]
    fn test_delete_root() {
        let mut heap = MaxHeap::build(entries(&[10, 9, 8, 1, 2, 3]));
        let removed = heap.delete_at(0);
        assert_eq!(removed.key, 10);
        assert_eq!(heap.peek_max().unwrap().key, 9);
        heap.audit().unwrap();
    }

    #[test]
    fn test_delete_moved_entry_sifts_up() {
        // Layout after build: [100, 50, 90, 10, 20, 80, 85]. Deleting the 10
        // (a leaf under 50) pulls 85 into its place, which must rise above 50.
        let mut heap = MaxHeap::build(entries(&[100, 50, 90, 10, 20, 80, 85]));
        let pos = heap.position_of(3).unwrap();
        heap.delete_at(pos);
        heap.audit().unwrap();
        let keys: Vec<NeighborhoodWeight> = heap.iter().map(|e| e.key).collect();
        assert!(keys.contains(&85));
        assert!(!keys.contains(&10));
    }

    #[test]
    fn test_positions_track_random_operations() {
        let mut rng = StdRng::seed_from_u64(99);
        let keys: Vec<NeighborhoodWeight> = (0..200).map(|_| rng.gen_range(0..1000)).collect();
        let mut heap = MaxHeap::build(entries(&keys));
        let mut live: Vec<usize> = (0..200).collect();

        for _ in 0..2000 {
            let pick = live[rng.gen_range(0..live.len())];
            let pos = heap.position_of(pick).unwrap();
            assert_eq!(heap.get(pos).unwrap().slot, pick);
            match rng.gen_range(0..3) {
                0 => heap.increase_key(pos, rng.gen_range(0..500)),
                1 => heap.decrease_key(pos, rng.gen_range(0..500)),
                _ if live.len() > 1 => {
                    heap.delete_at(pos);
                    live.retain(|&s| s != pick);
                    assert_eq!(heap.position_of(pick), None);
                }
                _ => {}
            }
            heap.audit().unwrap();
            let max = heap.iter().map(|e| e.key).max().unwrap();
            assert_eq!(heap.peek_max().unwrap().key, max);
        }
        assert_eq!(heap.len(), live.len());
    }
}
