use std::fmt::Debug;
use num_traits::Float;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPaths};
use crate::data_structures::{HeapEntry, IndexedMinHeap};
use crate::graph::{Graph, VertexKey};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm over an indexable min-heap
///
/// Weights are assumed non-negative and are not checked. Once a vertex has
/// been extracted it is never relaxed again, so negative edges give
/// unspecified (but finite and panic-free) results.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Debug,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: VertexKey) -> Result<ShortestPaths<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::NoSuchVertex(source));
        }
        let n = graph.vertex_count();

        // entry id = key - 1
        let entries = (1..=n)
            .map(|v| {
                if v == source {
                    HeapEntry::new(v, W::zero(), vec![v])
                } else {
                    HeapEntry::unreached(v)
                }
            })
            .collect();
        let mut queue = IndexedMinHeap::build(entries);

        while !queue.is_empty() {
            let u = queue.extract_min()?;
            let (u_key, u_estimate) = {
                let entry = queue.entry(u);
                (entry.vertex, entry.estimate())
            };

            for (v_key, weight) in graph.outgoing_edges(u_key)? {
                let v = v_key - 1;
                let candidate = u_estimate + weight;
                if candidate >= queue.entry(v).estimate() {
                    continue;
                }
                let Some(position) = queue.position(v) else {
                    continue;
                };
                if queue.decrease_key(position, candidate) {
                    let mut path = queue.entry(u).path.clone();
                    path.push(v_key);
                    queue.entry_mut(v).path = path;
                }
            }
        }

        let mut result = ShortestPaths::from_source(source, n);
        for entry in queue.into_entries() {
            result.distances[entry.vertex] = entry.estimate();
            result.paths[entry.vertex] = entry.path;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, MutableGraph};

    #[test]
    fn test_unreachable_vertices_stay_infinite() {
        let mut graph = DirectedGraph::with_vertices(3);
        graph.add_edge(1, 2, 2.5).unwrap();

        let result = Dijkstra::new().compute_shortest_paths(&graph, 1).unwrap();
        assert_eq!(result.distance(2), Some(2.5));
        assert_eq!(result.distance(3), None);
        assert_eq!(result.distances()[3], f64::INFINITY);
        assert!(result.path(3).is_none());
        assert_eq!(result.path(1).unwrap(), &[1]);
    }

    #[test]
    fn test_invalid_source() {
        let graph: DirectedGraph<f64> = DirectedGraph::with_vertices(2);
        let result = Dijkstra::new().compute_shortest_paths(&graph, 3);
        assert!(matches!(result, Err(Error::NoSuchVertex(3))));
        let result = Dijkstra::new().compute_shortest_paths(&graph, 0);
        assert!(matches!(result, Err(Error::NoSuchVertex(0))));
    }

    #[test]
    fn test_parallel_edges_take_cheapest() {
        let mut graph = DirectedGraph::with_vertices(2);
        graph.add_edge(1, 2, 4.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(1, 2, 3.0).unwrap();

        let result = Dijkstra::new().compute_shortest_paths(&graph, 1).unwrap();
        assert_eq!(result.distance(2), Some(1.0));
        assert_eq!(result.path(2).unwrap(), &[1, 2]);
    }

    #[test]
    fn test_self_loops_and_zero_weights() {
        let mut graph = DirectedGraph::with_vertices(3);
        graph.add_edge(1, 1, 0.0).unwrap();
        graph.add_edge(1, 2, 0.0).unwrap();
        graph.add_edge(2, 3, 0.0).unwrap();

        let result = Dijkstra::new().compute_shortest_paths(&graph, 1).unwrap();
        assert_eq!(result.distance(3), Some(0.0));
        assert_eq!(result.path(3).unwrap(), &[1, 2, 3]);
    }
}
