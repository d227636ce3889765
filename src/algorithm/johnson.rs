use std::fmt::Debug;
use std::sync::Arc;
use log::{debug, info, warn};
use num_traits::Float;
use rayon::prelude::*;

use crate::algorithm::bellman_ford::BellmanFord;
use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{AllPairsShortestPaths, ShortestPathAlgorithm, ShortestPaths};
use crate::config::{available_cores, DefaultBudget, FixedThreads, ThreadBudget};
use crate::graph::MutableGraph;
use crate::{Error, Result};

/// Name reported to the thread-budget policy
pub const ALGORITHM_NAME: &str = "johnson";

/// Johnson's all-pairs shortest path algorithm
///
/// 1. A virtual vertex with zero-weight edges to every vertex is added and
///    Bellman-Ford computes the potential `h[v]` of each vertex from it.
/// 2. The virtual vertex is removed and every edge is reweighted to
///    `w + h[u] - h[v]`, which is non-negative.
/// 3. Dijkstra runs from every vertex on a rayon pool sized by the
///    [`ThreadBudget`], and distances are shifted back by `h[v] - h[u]`.
/// 4. Once every run has joined, the original weights are written back from
///    a snapshot, so the graph is bit-for-bit what the caller passed in.
#[derive(Debug, Clone)]
pub struct Johnson {
    budget: Arc<dyn ThreadBudget>,
}

impl Default for Johnson {
    fn default() -> Self {
        Self::new()
    }
}

impl Johnson {
    /// Create a new instance that uses every available core
    pub fn new() -> Self {
        Johnson {
            budget: Arc::new(DefaultBudget),
        }
    }

    /// Set the policy consulted for the worker count
    pub fn with_budget<B>(mut self, budget: B) -> Self
    where
        B: ThreadBudget + 'static,
    {
        self.budget = Arc::new(budget);
        self
    }

    /// Use exactly `threads` workers
    pub fn with_threads(self, threads: usize) -> Self {
        self.with_budget(FixedThreads(threads))
    }

    /// Worker count for a graph of `vertex_count` vertices
    pub fn worker_count(&self, vertex_count: usize) -> usize {
        match self.budget.recommend(ALGORITHM_NAME, vertex_count) {
            Some(threads) if threads > 0 => threads,
            Some(_) => {
                warn!("thread budget recommended 0 workers, using all cores");
                available_cores()
            }
            None => {
                debug!("no thread budget configured, using all cores");
                available_cores()
            }
        }
    }

    /// Computes shortest paths between every pair of vertices.
    ///
    /// The graph is mutated while the call runs and restored before it
    /// returns, on success and on failure alike. Fails with
    /// [`Error::NegativeCycle`] when the graph contains a negative cycle.
    pub fn compute<W, G>(&self, graph: &mut G) -> Result<AllPairsShortestPaths<W>>
    where
        W: Float + Debug + Send + Sync,
        G: MutableGraph<W> + Sync,
    {
        let n = graph.vertex_count();
        if n == 0 {
            return Ok(AllPairsShortestPaths::new(Vec::new()));
        }
        let workers = self.worker_count(n);
        info!(
            "Johnson on {} vertices, {} edges, {} workers",
            n,
            graph.edge_count(),
            workers
        );

        let potentials: Vec<W> = Self::potentials(graph)?;

        let original: Vec<W> = graph.edges().map(|edge| edge.weight).collect();
        graph.map_weights(|edge| {
            edge.weight + potentials[edge.origin] - potentials[edge.successor]
        });
        debug!("reweighted {} edges", original.len());

        let outcome = Self::fan_out(&*graph, &potentials, workers);

        let mut saved = original.into_iter();
        graph.map_weights(|edge| saved.next().unwrap_or(edge.weight));
        debug!("restored original weights");

        outcome
    }

    /// Bellman-Ford distances from a temporary virtual source, indexed by key.
    /// The virtual vertex is gone again when this returns.
    fn potentials<W, G>(graph: &mut G) -> Result<Vec<W>>
    where
        W: Float + Debug,
        G: MutableGraph<W>,
    {
        let n = graph.vertex_count();
        let source = graph.add_vertices(1).start;

        let linked = (1..=n).try_for_each(|v| graph.add_edge(source, v, W::zero()));
        let search: Result<ShortestPaths<W>> =
            linked.and_then(|()| BellmanFord::new().compute_shortest_paths(&*graph, source));

        // newest first, so each removal pops the tail of the adjacency list
        for v in (1..=n).rev() {
            graph.remove_edge(source, v)?;
        }
        if !graph.remove_vertex_if_isolated(source)? {
            graph.remove_vertex(source)?;
        }

        match search {
            Ok(result) => Ok(result.distances()[..=n].to_vec()),
            Err(Error::NegativeCycle) => {
                warn!("negative-weight cycle detected, aborting all-pairs run");
                Err(Error::NegativeCycle)
            }
            Err(err) => Err(err),
        }
    }

    /// One Dijkstra run per source on the reweighted graph. The graph is only
    /// borrowed shared here, so no task can mutate it.
    fn fan_out<W, G>(graph: &G, potentials: &[W], workers: usize) -> Result<AllPairsShortestPaths<W>>
    where
        W: Float + Debug + Send + Sync,
        G: MutableGraph<W> + Sync,
    {
        let n = graph.vertex_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.min(n))
            .build()?;

        let rows = pool.install(|| {
            (1..=n)
                .into_par_iter()
                .map(|source| -> Result<ShortestPaths<W>> {
                    let mut row = Dijkstra::new().compute_shortest_paths(graph, source)?;
                    Self::shift_back(&mut row, potentials);
                    Ok(row)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(AllPairsShortestPaths::new(rows))
    }

    /// `d(u, v) = d'(u, v) - h[u] + h[v]` for every reachable `v`
    fn shift_back<W>(row: &mut ShortestPaths<W>, potentials: &[W])
    where
        W: Float + Debug,
    {
        let h_source = potentials[row.source()];
        for (v, distance) in row.distances.iter_mut().enumerate().skip(1) {
            if distance.is_finite() {
                *distance = *distance - h_source + potentials[v];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, Graph};

    #[test]
    fn test_empty_graph() {
        let mut graph: DirectedGraph<f64> = DirectedGraph::new();
        let result = Johnson::new().compute(&mut graph).unwrap();
        assert_eq!(result.vertex_count(), 0);
    }

    #[test]
    fn test_virtual_vertex_is_removed() {
        let mut graph = DirectedGraph::with_vertices(3);
        graph.add_edge(1, 2, -1.0).unwrap();
        graph.add_edge(2, 3, 2.0).unwrap();

        let result = Johnson::new().with_threads(2).compute(&mut graph).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.in_degree(1).unwrap(), 0);
        assert_eq!(result.distance(1, 3), Some(1.0));
        assert_eq!(result.distance(3, 1), None);
        assert_eq!(result.distance(2, 2), Some(0.0));
    }

    #[test]
    fn test_potentials_remove_every_virtual_edge() {
        let mut graph = DirectedGraph::with_vertices(200);
        for v in 1..200 {
            graph.add_edge(v, v + 1, -0.5).unwrap();
        }
        let degrees: Vec<usize> = (1..=200).map(|v| graph.in_degree(v).unwrap()).collect();

        let potentials = Johnson::potentials(&mut graph).unwrap();
        assert_eq!(potentials.len(), 201);
        assert_eq!(potentials[200], -99.5);
        assert_eq!(graph.vertex_count(), 200);
        assert_eq!(graph.edge_count(), 199);
        let after: Vec<usize> = (1..=200).map(|v| graph.in_degree(v).unwrap()).collect();
        assert_eq!(degrees, after);
    }

    #[test]
    fn test_negative_cycle_leaves_graph_intact() {
        let mut graph = DirectedGraph::with_vertices(2);
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(2, 1, -2.0).unwrap();

        let result = Johnson::new().compute(&mut graph);
        assert!(matches!(result, Err(Error::NegativeCycle)));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.find_edge(2, 1).unwrap().unwrap().weight, -2.0);
    }

    #[test]
    fn test_zero_recommendation_falls_back_to_cores() {
        let johnson = Johnson::new().with_threads(0);
        assert_eq!(johnson.worker_count(10), available_cores());
        assert_eq!(Johnson::new().with_threads(3).worker_count(10), 3);
    }
}
