use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::Range;
use num_traits::Float;

use crate::graph::directed::DirectedGraph;
use crate::graph::traits::{EdgeRef, Graph, MutableGraph, VertexKey};
use crate::{Error, Result};

/// A [`DirectedGraph`] that carries caller-owned objects on its vertices and
/// edges
///
/// Vertex payloads follow their vertex when keys shift after a removal. Edge
/// payloads are attached to the ordered pair `(from, to)`, so parallel edges
/// share one slot; removing any `from -> to` edge drops it, as does removing
/// either endpoint.
#[derive(Debug, Clone)]
pub struct PayloadGraph<V, E, W> {
    graph: DirectedGraph<W>,
    vertex_payloads: Vec<Option<V>>,
    edge_payloads: HashMap<(VertexKey, VertexKey), E>,
}

impl<V, E, W> Default for PayloadGraph<V, E, W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, W> PayloadGraph<V, E, W>
where
    W: Float + Debug,
{
    pub fn new() -> Self {
        Self::with_vertices(0)
    }

    /// Creates a graph with vertices `1..=count`, no edges and no payloads
    pub fn with_vertices(count: usize) -> Self {
        let mut vertex_payloads = Vec::with_capacity(count);
        vertex_payloads.resize_with(count, || None);
        PayloadGraph {
            graph: DirectedGraph::with_vertices(count),
            vertex_payloads,
            edge_payloads: HashMap::new(),
        }
    }

    /// Builds a graph from 0-based adjacency lists of `(target, payload)` pairs.
    ///
    /// Each edge gets the weight `weight_of` reads from its payload, and the
    /// payload is attached to it. When a list repeats a target the last
    /// payload wins.
    pub fn from_adjacencies<F>(lists: Vec<Vec<(usize, E)>>, weight_of: F) -> Result<Self>
    where
        F: Fn(&E) -> W,
    {
        let mut graph = Self::with_vertices(lists.len());
        for (index, list) in lists.into_iter().enumerate() {
            let from = index + 1;
            for (target, payload) in list {
                let to = target + 1;
                graph.graph.add_edge(from, to, weight_of(&payload))?;
                graph.edge_payloads.insert((from, to), payload);
            }
        }
        Ok(graph)
    }

    /// The underlying graph, without payloads
    pub fn graph(&self) -> &DirectedGraph<W> {
        &self.graph
    }

    /// Attaches `payload` to a vertex and returns the one it replaces
    pub fn set_vertex_payload(&mut self, vertex: VertexKey, payload: V) -> Result<Option<V>> {
        let index = self.index_of(vertex)?;
        Ok(self.vertex_payloads[index].replace(payload))
    }

    pub fn vertex_payload(&self, vertex: VertexKey) -> Option<&V> {
        let index = vertex.checked_sub(1)?;
        self.vertex_payloads.get(index)?.as_ref()
    }

    pub fn vertex_payload_mut(&mut self, vertex: VertexKey) -> Option<&mut V> {
        let index = vertex.checked_sub(1)?;
        self.vertex_payloads.get_mut(index)?.as_mut()
    }

    /// Attaches `payload` to the `from -> to` edges and returns the one it
    /// replaces. Fails with [`Error::NoSuchEdge`] when no such edge exists.
    pub fn set_edge_payload(
        &mut self,
        from: VertexKey,
        to: VertexKey,
        payload: E,
    ) -> Result<Option<E>> {
        if self.graph.find_edge(from, to)?.is_none() {
            return Err(Error::NoSuchEdge(from, to));
        }
        Ok(self.edge_payloads.insert((from, to), payload))
    }

    pub fn edge_payload(&self, from: VertexKey, to: VertexKey) -> Option<&E> {
        self.edge_payloads.get(&(from, to))
    }

    pub fn edge_payload_mut(&mut self, from: VertexKey, to: VertexKey) -> Option<&mut E> {
        self.edge_payloads.get_mut(&(from, to))
    }

    /// Splits the graph from its payloads. Vertex payloads are indexed by
    /// `key - 1`.
    pub fn into_parts(
        self,
    ) -> (
        DirectedGraph<W>,
        Vec<Option<V>>,
        HashMap<(VertexKey, VertexKey), E>,
    ) {
        (self.graph, self.vertex_payloads, self.edge_payloads)
    }

    fn index_of(&self, vertex: VertexKey) -> Result<usize> {
        if !self.graph.has_vertex(vertex) {
            return Err(Error::NoSuchVertex(vertex));
        }
        Ok(vertex - 1)
    }

    /// Forgets a removed vertex and moves every payload keyed above it down
    /// by one, matching the graph's key shift
    fn forget_vertex(&mut self, vertex: VertexKey) {
        self.vertex_payloads.remove(vertex - 1);
        let shift = |key: VertexKey| if key > vertex { key - 1 } else { key };
        self.edge_payloads = std::mem::take(&mut self.edge_payloads)
            .into_iter()
            .filter(|&((from, to), _)| from != vertex && to != vertex)
            .map(|((from, to), payload)| ((shift(from), shift(to)), payload))
            .collect();
    }
}

impl<V, E, W> Graph<W> for PayloadGraph<V, E, W>
where
    V: Debug,
    E: Debug,
    W: Float + Debug,
{
    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn outgoing_edges(
        &self,
        vertex: VertexKey,
    ) -> Result<Box<dyn Iterator<Item = (VertexKey, W)> + '_>> {
        self.graph.outgoing_edges(vertex)
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<W>> + '_> {
        self.graph.edges()
    }

    fn find_edge(&self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>> {
        self.graph.find_edge(from, to)
    }

    fn in_degree(&self, vertex: VertexKey) -> Result<usize> {
        self.graph.in_degree(vertex)
    }

    fn out_degree(&self, vertex: VertexKey) -> Result<usize> {
        self.graph.out_degree(vertex)
    }
}

impl<V, E, W> MutableGraph<W> for PayloadGraph<V, E, W>
where
    V: Debug,
    E: Debug,
    W: Float + Debug,
{
    fn add_vertices(&mut self, count: usize) -> Range<VertexKey> {
        let keys = self.graph.add_vertices(count);
        self.vertex_payloads.resize_with(keys.end - 1, || None);
        keys
    }

    fn add_edge(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<()> {
        self.graph.add_edge(from, to, weight)
    }

    fn remove_edge(&mut self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>> {
        let removed = self.graph.remove_edge(from, to)?;
        if removed.is_some() {
            self.edge_payloads.remove(&(from, to));
        }
        Ok(removed)
    }

    fn remove_vertex_if_isolated(&mut self, vertex: VertexKey) -> Result<bool> {
        let removed = self.graph.remove_vertex_if_isolated(vertex)?;
        if removed {
            self.forget_vertex(vertex);
        }
        Ok(removed)
    }

    fn remove_vertex(&mut self, vertex: VertexKey) -> Result<()> {
        self.graph.remove_vertex(vertex)?;
        self.forget_vertex(vertex);
        Ok(())
    }

    fn update_edge_weight(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<bool> {
        self.graph.update_edge_weight(from, to, weight)
    }

    fn map_weights<F>(&mut self, f: F)
    where
        F: FnMut(EdgeRef<W>) -> W,
    {
        self.graph.map_weights(f)
    }
}
