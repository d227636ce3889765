use std::fmt::Debug;
use std::ops::Range;
use num_traits::Float;

use crate::Result;

/// Dense 1-based vertex key. Key 0 is reserved and never refers to a vertex.
pub type VertexKey = usize;

/// Value view of a single directed edge
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRef<W> {
    pub origin: VertexKey,
    pub successor: VertexKey,
    pub weight: W,
}

/// Trait representing a weighted directed multigraph
///
/// Every key-taking method fails with [`crate::Error::NoSuchVertex`] when the
/// key is outside `1..=vertex_count()`.
pub trait Graph<W>: Debug
where
    W: Float + Debug,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns true if the key refers to a vertex of the graph
    fn has_vertex(&self, vertex: VertexKey) -> bool {
        vertex >= 1 && vertex <= self.vertex_count()
    }

    /// Returns the outgoing edges of a vertex as `(successor, weight)` pairs,
    /// most recently added first
    fn outgoing_edges(
        &self,
        vertex: VertexKey,
    ) -> Result<Box<dyn Iterator<Item = (VertexKey, W)> + '_>>;

    /// Returns every edge, vertices in key order and each adjacency list in
    /// the same order as `outgoing_edges`
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<W>> + '_>;

    /// First edge from `from` to `to` in traversal order
    fn find_edge(&self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>>;

    fn in_degree(&self, vertex: VertexKey) -> Result<usize>;

    fn out_degree(&self, vertex: VertexKey) -> Result<usize>;
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Debug,
{
    /// Appends `count` fresh vertices and returns their keys
    fn add_vertices(&mut self, count: usize) -> Range<VertexKey>;

    /// Adds a directed edge between existing vertices with the given weight
    fn add_edge(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<()>;

    /// Removes the first edge from `from` to `to`, returning it if one existed
    fn remove_edge(&mut self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>>;

    /// Removes the vertex only if it has no incident edges.
    ///
    /// The degree check is O(1) and no edge is scanned, but every vertex with
    /// a higher key is re-keyed, so the removal itself costs O(V).
    fn remove_vertex_if_isolated(&mut self, vertex: VertexKey) -> Result<bool>;

    /// Removes a vertex together with every edge entering or leaving it
    fn remove_vertex(&mut self, vertex: VertexKey) -> Result<()>;

    /// Updates the weight of the first edge from `from` to `to`
    fn update_edge_weight(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<bool>;

    /// Rewrites every edge weight in place, visiting edges in `edges()` order
    fn map_weights<F>(&mut self, f: F)
    where
        F: FnMut(EdgeRef<W>) -> W;
}
