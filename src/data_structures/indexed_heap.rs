use std::fmt::Debug;
use num_traits::Float;
use ordered_float::OrderedFloat;

use crate::graph::VertexKey;
use crate::{Error, Result};

/// Stable identifier of an entry inside an [`IndexedMinHeap`]. Entries keep
/// their id for the lifetime of the heap, whatever their heap position.
pub type EntryId = usize;

/// Frontier record of a shortest-path run
#[derive(Debug, Clone)]
pub struct HeapEntry<W> {
    /// Distance estimate; only the heap may change it, to keep heap order
    estimate: W,
    /// Vertex this entry estimates
    pub vertex: VertexKey,
    /// Vertices on the best known path, source first
    pub path: Vec<VertexKey>,
    /// 1-based position in the heap array, 0 once extracted
    position: usize,
}

impl<W> HeapEntry<W>
where
    W: Float + Debug,
{
    pub fn new(vertex: VertexKey, estimate: W, path: Vec<VertexKey>) -> Self {
        HeapEntry {
            estimate,
            vertex,
            path,
            position: 0,
        }
    }

    /// Entry with an infinite estimate and an empty path
    pub fn unreached(vertex: VertexKey) -> Self {
        Self::new(vertex, W::infinity(), Vec::new())
    }

    pub fn estimate(&self) -> W {
        self.estimate
    }

    /// Current heap position, `None` once the entry has been extracted
    pub fn position(&self) -> Option<usize> {
        (self.position > 0).then_some(self.position)
    }
}

/// Binary min-heap with position handles for O(log n) decrease-key
///
/// The heap owns its entries and orders their ids in a 1-indexed array
/// (slot 0 unused). Each entry records its own array position, so
/// `decrease_key` never searches.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<W> {
    entries: Vec<HeapEntry<W>>,
    heap: Vec<EntryId>,
}

impl<W> Default for IndexedMinHeap<W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> IndexedMinHeap<W>
where
    W: Float + Debug,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        IndexedMinHeap {
            entries: Vec::new(),
            heap: vec![0],
        }
    }

    /// Builds a heap over `entries` in linear time. Entry ids are the indices
    /// of `entries`.
    pub fn build(entries: Vec<HeapEntry<W>>) -> Self {
        let mut heap = Vec::with_capacity(entries.len() + 1);
        heap.push(0);
        heap.extend(0..entries.len());

        let mut result = IndexedMinHeap { entries, heap };
        for (id, entry) in result.entries.iter_mut().enumerate() {
            entry.position = id + 1;
        }
        for position in (1..=result.len() / 2).rev() {
            result.sift_down(position);
        }
        result
    }

    /// Returns the number of entries still in the heap
    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry with the smallest estimate, without removing it
    pub fn peek(&self) -> Option<&HeapEntry<W>> {
        self.heap.get(1).map(|&id| &self.entries[id])
    }

    /// Removes the entry with the smallest estimate and returns its id
    pub fn extract_min(&mut self) -> Result<EntryId> {
        if self.is_empty() {
            return Err(Error::HeapUnderflow);
        }

        let min = self.heap[1];
        if let Some(last) = self.heap.pop() {
            if !self.is_empty() {
                self.heap[1] = last;
                self.entries[last].position = 1;
                self.sift_down(1);
            }
        }
        self.entries[min].position = 0;
        Ok(min)
    }

    /// Adds a new entry and returns its id
    pub fn insert(&mut self, mut entry: HeapEntry<W>) -> EntryId {
        let id = self.entries.len();
        entry.position = self.heap.len();
        self.entries.push(entry);
        self.heap.push(id);
        self.sift_up(self.len());
        id
    }

    /// Lowers the estimate of the entry at `position` to `new_value`.
    ///
    /// Returns false, leaving the heap untouched, when `new_value` is greater
    /// than the current estimate or `position` is not occupied.
    pub fn decrease_key(&mut self, position: usize, new_value: W) -> bool {
        if position == 0 || position > self.len() {
            return false;
        }
        let id = self.heap[position];
        if OrderedFloat(new_value) > OrderedFloat(self.entries[id].estimate) {
            return false;
        }

        self.entries[id].estimate = new_value;
        self.sift_up(position);
        true
    }

    pub fn entry(&self, id: EntryId) -> &HeapEntry<W> {
        &self.entries[id]
    }

    /// Mutable access to an entry's vertex and path. The estimate stays
    /// private; use [`decrease_key`](Self::decrease_key) to change it.
    pub fn entry_mut(&mut self, id: EntryId) -> &mut HeapEntry<W> {
        &mut self.entries[id]
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries[id].position()
    }

    /// Consumes the heap, returning every entry in id order
    pub fn into_entries(self) -> Vec<HeapEntry<W>> {
        self.entries
    }

    fn key(&self, position: usize) -> OrderedFloat<W> {
        OrderedFloat(self.entries[self.heap[position]].estimate)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.entries[self.heap[a]].position = a;
        self.entries[self.heap[b]].position = b;
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 1 && self.key(position / 2) > self.key(position) {
            self.swap(position, position / 2);
            position /= 2;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.len();
        loop {
            let left = 2 * position;
            if left > len {
                break;
            }
            let right = left + 1;
            let smallest = if right <= len && self.key(right) < self.key(left) {
                right
            } else {
                left
            };
            if self.key(position) <= self.key(smallest) {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(estimates: &[f64]) -> Vec<HeapEntry<f64>> {
        estimates
            .iter()
            .enumerate()
            .map(|(i, &e)| HeapEntry::new(i + 1, e, vec![i + 1]))
            .collect()
    }

    fn drain(heap: &mut IndexedMinHeap<f64>) -> Vec<f64> {
        let mut out = Vec::new();
        while !heap.is_empty() {
            let id = heap.extract_min().unwrap();
            out.push(heap.entry(id).estimate());
        }
        out
    }

    #[test]
    fn test_build_orders_entries() {
        let mut heap = IndexedMinHeap::build(entries(&[5.0, 3.0, 8.0, 1.0, 9.0, 2.0]));
        assert_eq!(heap.len(), 6);
        assert_eq!(heap.peek().unwrap().vertex, 4);
        assert_eq!(drain(&mut heap), vec![1.0, 2.0, 3.0, 5.0, 8.0, 9.0]);
    }

    #[test]
    fn test_positions_track_entries() {
        let heap = IndexedMinHeap::build(entries(&[4.0, 2.0, 6.0, 1.0]));
        for id in 0..4 {
            let position = heap.position(id).unwrap();
            assert_eq!(heap.heap[position], id);
        }
    }

    #[test]
    fn test_extract_min_invalidates_handle() {
        let mut heap = IndexedMinHeap::build(entries(&[4.0, 2.0]));
        let id = heap.extract_min().unwrap();
        assert_eq!(id, 1);
        assert_eq!(heap.position(id), None);
        assert_eq!(heap.entry(id).position(), None);
    }

    #[test]
    fn test_extract_min_on_empty_heap_underflows() {
        let mut heap: IndexedMinHeap<f64> = IndexedMinHeap::new();
        assert!(heap.peek().is_none());
        assert!(matches!(heap.extract_min(), Err(Error::HeapUnderflow)));

        heap.insert(HeapEntry::new(1, 0.0, vec![1]));
        heap.extract_min().unwrap();
        assert!(matches!(heap.extract_min(), Err(Error::HeapUnderflow)));
    }

    #[test]
    fn test_decrease_key_moves_entry_up() {
        let mut heap = IndexedMinHeap::build(entries(&[1.0, 5.0, 7.0, 9.0]));
        let position = heap.position(3).unwrap();
        assert!(heap.decrease_key(position, 0.5));
        assert_eq!(heap.peek().unwrap().vertex, 4);
        assert_eq!(heap.entry(3).estimate(), 0.5);
    }

    #[test]
    fn test_decrease_key_rejects_increase() {
        let mut heap = IndexedMinHeap::build(entries(&[1.0, 5.0, 7.0]));
        let position = heap.position(1).unwrap();
        assert!(!heap.decrease_key(position, 6.0));
        assert_eq!(heap.entry(1).estimate(), 5.0);
        assert_eq!(heap.position(1), Some(position));

        // equal values are accepted
        assert!(heap.decrease_key(position, 5.0));
        assert!(!heap.decrease_key(0, 0.0));
        assert!(!heap.decrease_key(42, 0.0));
    }

    #[test]
    fn test_insert_sifts_up() {
        let mut heap = IndexedMinHeap::build(entries(&[3.0, 4.0]));
        let id = heap.insert(HeapEntry::new(9, 1.0, Vec::new()));
        assert_eq!(id, 2);
        assert_eq!(heap.peek().unwrap().vertex, 9);
        assert_eq!(drain(&mut heap), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_infinite_estimates_sort_last() {
        let mut heap = IndexedMinHeap::build(vec![
            HeapEntry::unreached(1),
            HeapEntry::new(2, 0.0, vec![2]),
            HeapEntry::unreached(3),
        ]);
        assert_eq!(heap.peek().unwrap().vertex, 2);
        assert_eq!(drain(&mut heap), vec![0.0, f64::INFINITY, f64::INFINITY]);
    }
}
