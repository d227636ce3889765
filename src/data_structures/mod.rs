pub mod indexed_heap;

pub use indexed_heap::{EntryId, HeapEntry, IndexedMinHeap};
