pub mod bellman_ford;
pub mod dijkstra;
pub mod johnson;
pub mod traits;

pub use traits::{AllPairsShortestPaths, ShortestPathAlgorithm, ShortestPaths};

use std::fmt::Debug;
use num_traits::Float;

use crate::graph::{Graph, MutableGraph, VertexKey};
use crate::Result;

/// Dijkstra from `source`; weights must be non-negative
pub fn single_source<W, G>(graph: &G, source: VertexKey) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
    G: Graph<W>,
{
    dijkstra::Dijkstra::new().compute_shortest_paths(graph, source)
}

/// Bellman-Ford from `source`; fails with `NegativeCycle` if one is reachable
pub fn single_source_safe<W, G>(graph: &G, source: VertexKey) -> Result<ShortestPaths<W>>
where
    W: Float + Debug,
    G: Graph<W>,
{
    bellman_ford::BellmanFord::new().compute_shortest_paths(graph, source)
}

/// Johnson's all-pairs shortest paths with the default thread budget
pub fn all_pairs<W, G>(graph: &mut G) -> Result<AllPairsShortestPaths<W>>
where
    W: Float + Debug + Send + Sync,
    G: MutableGraph<W> + Sync,
{
    johnson::Johnson::new().compute(graph)
}
