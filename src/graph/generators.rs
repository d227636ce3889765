use crate::graph::{DirectedGraph, MutableGraph};
use crate::Result;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::ops::Range;

/// Generates a random directed multigraph with `n` vertices and `m` edges.
/// Weights are drawn uniformly from `weights`; self-loops are skipped.
pub fn generate_random(n: usize, m: usize, weights: Range<f64>, seed: u64) -> DirectedGraph<f64> {
    let mut graph = DirectedGraph::with_vertices(n);
    if n < 2 {
        return graph;
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut added = 0;
    while added < m {
        let u = rng.gen_range(1..=n);
        let v = rng.gen_range(1..=n);
        if u != v {
            let weight = rng.gen_range(weights.clone());
            // keys come from 1..=n, so this cannot fail
            if graph.add_edge(u, v, weight).is_ok() {
                added += 1;
            }
        }
    }

    graph
}

/// Generates a random graph that has negative edges but no negative cycle.
///
/// Each vertex gets a random potential `p`, each edge a non-negative base cost
/// `c`, and the stored weight is `c + p[v] - p[u]`. Any cycle then weighs the
/// sum of its base costs.
pub fn generate_with_potentials(n: usize, m: usize, seed: u64) -> DirectedGraph<f64> {
    let mut graph = DirectedGraph::with_vertices(n);
    if n < 2 {
        return graph;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let potentials: Vec<f64> = (0..=n).map(|_| rng.gen_range(-20.0..20.0)).collect();

    let mut added = 0;
    while added < m {
        let u = rng.gen_range(1..=n);
        let v = rng.gen_range(1..=n);
        if u != v {
            let cost: f64 = rng.gen_range(0.0..10.0);
            let weight = cost + potentials[v] - potentials[u];
            if graph.add_edge(u, v, weight).is_ok() {
                added += 1;
            }
        }
    }

    graph
}

/// Generates a `width` x `height` grid with edges in both directions between
/// horizontal and vertical neighbours. Vertex `(x, y)` has key `y * width + x + 1`.
///
/// Fails with [`crate::Error::InvalidWeight`] when `weight` is not finite.
pub fn generate_grid(width: usize, height: usize, weight: f64) -> Result<DirectedGraph<f64>> {
    let mut graph = DirectedGraph::with_vertices(width * height);
    let key = |x: usize, y: usize| y * width + x + 1;

    for y in 0..height {
        for x in 0..width {
            let current = key(x, y);
            let mut neighbours = Vec::with_capacity(2);
            if x + 1 < width {
                neighbours.push(key(x + 1, y));
            }
            if y + 1 < height {
                neighbours.push(key(x, y + 1));
            }
            for neighbour in neighbours {
                graph.add_edge(current, neighbour, weight)?;
                graph.add_edge(neighbour, current, weight)?;
            }
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_random_graph_is_reproducible() {
        let a = generate_random(20, 60, 1.0..5.0, 7);
        let b = generate_random(20, 60, 1.0..5.0, 7);
        assert_eq!(a.edge_count(), 60);
        assert!(a.edges().eq(b.edges()));
        assert!(a.edges().all(|e| e.origin != e.successor));
    }

    #[test]
    fn test_grid_edge_count() {
        let grid = generate_grid(3, 2, 1.0).unwrap();
        assert_eq!(grid.vertex_count(), 6);
        // 2 horizontal pairs in each of 2 rows, 3 vertical pairs, both directions
        assert_eq!(grid.edge_count(), 2 * (2 * 2 + 3));
    }

    #[test]
    fn test_grid_rejects_non_finite_weight() {
        assert!(matches!(
            generate_grid(2, 2, f64::NAN),
            Err(crate::Error::InvalidWeight(_))
        ));
        assert_eq!(generate_grid(1, 1, f64::INFINITY).unwrap().edge_count(), 0);
    }
}
