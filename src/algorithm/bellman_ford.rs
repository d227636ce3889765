use std::fmt::Debug;
use log::{debug, trace};
use num_traits::Float;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPaths};
use crate::graph::{Graph, VertexKey};
use crate::{Error, Result};

/// Bellman-Ford single-source shortest paths, tolerant of negative weights
///
/// Relaxes every edge for at most `V - 1` rounds, stopping early once a round
/// changes nothing. If the rounds run out, one more pass over the edges
/// decides whether a negative cycle is reachable from the source.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellmanFord;

impl BellmanFord {
    /// Creates a new Bellman-Ford algorithm instance
    pub fn new() -> Self {
        BellmanFord
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for BellmanFord
where
    W: Float + Debug,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn compute_shortest_paths(&self, graph: &G, source: VertexKey) -> Result<ShortestPaths<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::NoSuchVertex(source));
        }
        let n = graph.vertex_count();
        let mut result = ShortestPaths::from_source(source, n);

        for round in 1..n {
            let mut settled = true;

            for edge in graph.edges() {
                let candidate = result.distances[edge.origin] + edge.weight;
                if candidate < result.distances[edge.successor] {
                    result.distances[edge.successor] = candidate;
                    let mut path = result.paths[edge.origin].clone();
                    path.push(edge.successor);
                    result.paths[edge.successor] = path;
                    settled = false;
                }
            }

            if settled {
                trace!("Bellman-Ford from #{} settled after {} rounds", source, round);
                return Ok(result);
            }
        }

        let relaxable = graph.edges().any(|edge| {
            result.distances[edge.origin] + edge.weight < result.distances[edge.successor]
        });
        if relaxable {
            debug!("negative-weight cycle reachable from vertex #{}", source);
            return Err(Error::NegativeCycle);
        }

        Ok(result)
    }
}
