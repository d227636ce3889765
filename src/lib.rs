//! parapaths - shortest paths over weighted directed multigraphs
//!
//! The crate provides an adjacency-list graph store with dense 1-based vertex
//! keys, an indexable binary min-heap with O(log n) decrease-key, and three
//! shortest-path algorithms built on top of them:
//!
//! - Dijkstra's single-source algorithm for non-negative weights
//! - Bellman-Ford's single-source algorithm with negative-cycle detection
//! - Johnson's all-pairs algorithm, which reweights the graph through
//!   Bellman-Ford and then fans Dijkstra out over a rayon worker pool

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    all_pairs, bellman_ford::BellmanFord, dijkstra::Dijkstra, johnson::Johnson, single_source,
    single_source_safe, AllPairsShortestPaths, ShortestPathAlgorithm, ShortestPaths,
};
pub use config::{DefaultBudget, FixedThreads, SizeIntervalPolicy, ThreadBudget, ThreadCount};
/// Re-export main types for convenient use
pub use graph::{DirectedGraph, EdgeRef, Graph, MutableGraph, PayloadGraph, Vertex, VertexKey};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("vertex #{0} does not exist")]
    NoSuchVertex(VertexKey),

    #[error("no edge from vertex #{0} to vertex #{1}")]
    NoSuchEdge(VertexKey, VertexKey),

    #[error("negative-weight cycle reachable from the source")]
    NegativeCycle,

    #[error("extract_min called on an empty heap")]
    HeapUnderflow,

    #[error("edge weight must be finite, got {0}")]
    InvalidWeight(f64),

    #[error("could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
