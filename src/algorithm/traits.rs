use std::fmt::Debug;
use num_traits::Float;
use crate::graph::{Graph, VertexKey};
use crate::Result;

/// Result of a single-source shortest path algorithm execution
///
/// Both vectors are indexed by vertex key; index 0 is unused. Unreachable
/// vertices keep an infinite distance and an empty path.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPaths<W> {
    source: VertexKey,
    pub(crate) distances: Vec<W>,
    pub(crate) paths: Vec<Vec<VertexKey>>,
}

impl<W> ShortestPaths<W>
where
    W: Float + Debug,
{
    /// Every vertex unreached except `source`, at distance 0 with path `[source]`
    pub(crate) fn from_source(source: VertexKey, vertex_count: usize) -> Self {
        let mut distances = vec![W::infinity(); vertex_count + 1];
        let mut paths = vec![Vec::new(); vertex_count + 1];
        distances[source] = W::zero();
        paths[source].push(source);
        ShortestPaths {
            source,
            distances,
            paths,
        }
    }

    /// Source vertex of the run
    pub fn source(&self) -> VertexKey {
        self.source
    }

    /// Number of vertices covered by the result
    pub fn vertex_count(&self) -> usize {
        self.distances.len() - 1
    }

    /// Raw distance vector, indexed by key, infinity for unreachable vertices
    pub fn distances(&self) -> &[W] {
        &self.distances
    }

    /// Distance from the source, `None` when `target` is unreachable or unknown
    pub fn distance(&self, target: VertexKey) -> Option<W> {
        if target == 0 {
            return None;
        }
        self.distances
            .get(target)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    /// Vertices of the shortest path from the source to `target`, both included
    pub fn path(&self, target: VertexKey) -> Option<&[VertexKey]> {
        self.distance(target)?;
        self.paths.get(target).map(Vec::as_slice)
    }

    pub fn is_reachable(&self, target: VertexKey) -> bool {
        self.distance(target).is_some()
    }
}

/// Result of an all-pairs run: one [`ShortestPaths`] row per source vertex
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllPairsShortestPaths<W> {
    rows: Vec<ShortestPaths<W>>,
}

impl<W> AllPairsShortestPaths<W>
where
    W: Float + Debug,
{
    /// `rows[u - 1]` must hold the run from source `u`
    pub(crate) fn new(rows: Vec<ShortestPaths<W>>) -> Self {
        AllPairsShortestPaths { rows }
    }

    pub fn vertex_count(&self) -> usize {
        self.rows.len()
    }

    /// Shortest paths from `source` to every vertex
    pub fn row(&self, source: VertexKey) -> Option<&ShortestPaths<W>> {
        source.checked_sub(1).and_then(|index| self.rows.get(index))
    }

    pub fn distance(&self, source: VertexKey, target: VertexKey) -> Option<W> {
        self.row(source)?.distance(target)
    }

    pub fn path(&self, source: VertexKey, target: VertexKey) -> Option<&[VertexKey]> {
        self.row(source)?.path(target)
    }

    /// Rows in source-key order
    pub fn rows(&self) -> impl Iterator<Item = &ShortestPaths<W>> {
        self.rows.iter()
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Debug,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: VertexKey) -> Result<ShortestPaths<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
