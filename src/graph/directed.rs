use crate::graph::traits::{EdgeRef, Graph, MutableGraph, VertexKey};
use crate::{Error, Result};
use num_traits::Float;
use std::fmt::Debug;
use std::ops::Range;

/// Index of a vertex record in the graph's arena. Unlike keys, slots never
/// move, so edges can hold them across vertex removals.
type SlotId = usize;

#[derive(Debug, Clone)]
struct Edge<W> {
    origin: SlotId,
    successor: SlotId,
    weight: W,
}

/// A vertex of a [`DirectedGraph`]
///
/// Degree counters are maintained by the graph; the vertex only exposes them.
#[derive(Debug, Clone)]
pub struct Vertex<W> {
    key: VertexKey,
    in_degree: usize,
    out_degree: usize,
    /// Outgoing edges in insertion order; traversal walks them backwards
    adjacencies: Vec<Edge<W>>,
}

impl<W> Vertex<W> {
    fn new(key: VertexKey) -> Self {
        Vertex {
            key,
            in_degree: 0,
            out_degree: 0,
            adjacencies: Vec::new(),
        }
    }

    pub fn key(&self) -> VertexKey {
        self.key
    }

    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// True when no edge enters or leaves the vertex
    pub fn is_isolated(&self) -> bool {
        self.in_degree == 0 && self.out_degree == 0
    }
}

/// A directed multigraph stored as adjacency lists
///
/// Vertices live in an arena of slots; `keys[k - 1]` is the slot of the vertex
/// with key `k`. Removing a vertex shifts the keys above it down by one and
/// recycles its slot, but never rewrites an edge.
///
/// With the `serde` feature the graph is (de)serialized as key-ordered
/// adjacency lists of `(successor, weight)` pairs. Deserializing rebuilds the
/// arena through `add_edge`, so out-of-range keys and non-finite weights are
/// rejected.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W> {
    slots: Vec<Vertex<W>>,
    keys: Vec<SlotId>,
    free_slots: Vec<SlotId>,
    edge_count: usize,
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DirectedGraph<W>
where
    W: Float + Debug,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            slots: Vec::new(),
            keys: Vec::new(),
            free_slots: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a graph with vertices `1..=count` and no edges
    pub fn with_vertices(count: usize) -> Self {
        let mut graph = DirectedGraph {
            slots: Vec::with_capacity(count),
            keys: Vec::with_capacity(count),
            free_slots: Vec::new(),
            edge_count: 0,
        };
        graph.add_vertices(count);
        graph
    }

    /// Builds a graph from 0-based adjacency lists of `(target, weight)` pairs.
    ///
    /// List `i` describes the edges leaving vertex `i + 1`; targets are shifted
    /// to 1-based keys the same way.
    pub fn from_adjacencies(lists: &[Vec<(usize, W)>]) -> Result<Self> {
        let mut graph = DirectedGraph::with_vertices(lists.len());
        for (index, list) in lists.iter().enumerate() {
            for &(target, weight) in list {
                graph.add_edge(index + 1, target + 1, weight)?;
            }
        }
        Ok(graph)
    }

    /// Looks up a vertex by key
    pub fn get_vertex(&self, key: VertexKey) -> Result<&Vertex<W>> {
        let slot = self.slot_of(key)?;
        Ok(&self.slots[slot])
    }

    fn slot_of(&self, key: VertexKey) -> Result<SlotId> {
        if key == 0 || key > self.keys.len() {
            return Err(Error::NoSuchVertex(key));
        }
        Ok(self.keys[key - 1])
    }

    fn edge_ref(&self, edge: &Edge<W>) -> EdgeRef<W> {
        EdgeRef {
            origin: self.slots[edge.origin].key,
            successor: self.slots[edge.successor].key,
            weight: edge.weight,
        }
    }

    /// Position of the first edge `from -> to` in traversal (LIFO) order
    fn position_of(&self, from: SlotId, to: SlotId) -> Option<usize> {
        self.slots[from]
            .adjacencies
            .iter()
            .rposition(|edge| edge.successor == to)
    }

    fn check_weight(weight: W) -> Result<()> {
        if weight.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidWeight(weight.to_f64().unwrap_or(f64::NAN)))
        }
    }

    /// Drops the key of an edge-free vertex and recycles its slot. Every key
    /// above it shifts down by one, which costs O(V).
    fn detach(&mut self, key: VertexKey, slot: SlotId) {
        self.keys.remove(key - 1);
        for (index, &shifted) in self.keys.iter().enumerate().skip(key - 1) {
            self.slots[shifted].key = index + 1;
        }
        self.slots[slot] = Vertex::new(0);
        self.free_slots.push(slot);
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Debug,
{
    fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(
        &self,
        vertex: VertexKey,
    ) -> Result<Box<dyn Iterator<Item = (VertexKey, W)> + '_>> {
        let slot = self.slot_of(vertex)?;
        Ok(Box::new(
            self.slots[slot]
                .adjacencies
                .iter()
                .rev()
                .map(move |edge| (self.slots[edge.successor].key, edge.weight)),
        ))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef<W>> + '_> {
        Box::new(self.keys.iter().flat_map(move |&slot| {
            self.slots[slot]
                .adjacencies
                .iter()
                .rev()
                .map(move |edge| self.edge_ref(edge))
        }))
    }

    fn find_edge(&self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        Ok(self
            .position_of(from_slot, to_slot)
            .map(|index| self.edge_ref(&self.slots[from_slot].adjacencies[index])))
    }

    fn in_degree(&self, vertex: VertexKey) -> Result<usize> {
        Ok(self.get_vertex(vertex)?.in_degree)
    }

    fn out_degree(&self, vertex: VertexKey) -> Result<usize> {
        Ok(self.get_vertex(vertex)?.out_degree)
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Debug,
{
    fn add_vertices(&mut self, count: usize) -> Range<VertexKey> {
        let first = self.keys.len() + 1;
        for key in first..first + count {
            let slot = match self.free_slots.pop() {
                Some(slot) => {
                    self.slots[slot] = Vertex::new(key);
                    slot
                }
                None => {
                    self.slots.push(Vertex::new(key));
                    self.slots.len() - 1
                }
            };
            self.keys.push(slot);
        }
        first..first + count
    }

    fn add_edge(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<()> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        Self::check_weight(weight)?;

        self.slots[from_slot].adjacencies.push(Edge {
            origin: from_slot,
            successor: to_slot,
            weight,
        });
        self.slots[from_slot].out_degree += 1;
        self.slots[to_slot].in_degree += 1;
        self.edge_count += 1;
        Ok(())
    }

    fn remove_edge(&mut self, from: VertexKey, to: VertexKey) -> Result<Option<EdgeRef<W>>> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        let Some(index) = self.position_of(from_slot, to_slot) else {
            return Ok(None);
        };

        let edge = self.slots[from_slot].adjacencies.remove(index);
        self.slots[from_slot].out_degree -= 1;
        self.slots[to_slot].in_degree -= 1;
        self.edge_count -= 1;
        Ok(Some(EdgeRef {
            origin: from,
            successor: to,
            weight: edge.weight,
        }))
    }

    fn remove_vertex_if_isolated(&mut self, vertex: VertexKey) -> Result<bool> {
        let slot = self.slot_of(vertex)?;
        if !self.slots[slot].is_isolated() {
            return Ok(false);
        }
        self.detach(vertex, slot);
        Ok(true)
    }

    fn remove_vertex(&mut self, vertex: VertexKey) -> Result<()> {
        let slot = self.slot_of(vertex)?;

        // Outgoing arcs first, so self-loops are gone before the scan
        let outgoing = std::mem::take(&mut self.slots[slot].adjacencies);
        for edge in &outgoing {
            self.slots[edge.successor].in_degree -= 1;
        }
        self.slots[slot].out_degree = 0;
        self.edge_count -= outgoing.len();

        for &other in &self.keys {
            let adjacencies = &mut self.slots[other].adjacencies;
            let before = adjacencies.len();
            adjacencies.retain(|edge| edge.successor != slot);
            let removed = before - adjacencies.len();
            self.slots[other].out_degree -= removed;
            self.edge_count -= removed;
        }
        self.slots[slot].in_degree = 0;

        self.detach(vertex, slot);
        Ok(())
    }

    fn update_edge_weight(&mut self, from: VertexKey, to: VertexKey, weight: W) -> Result<bool> {
        let from_slot = self.slot_of(from)?;
        let to_slot = self.slot_of(to)?;
        Self::check_weight(weight)?;

        match self.position_of(from_slot, to_slot) {
            Some(index) => {
                self.slots[from_slot].adjacencies[index].weight = weight;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn map_weights<F>(&mut self, mut f: F)
    where
        F: FnMut(EdgeRef<W>) -> W,
    {
        for index in 0..self.keys.len() {
            let slot = self.keys[index];
            let mut adjacencies = std::mem::take(&mut self.slots[slot].adjacencies);
            for edge in adjacencies.iter_mut().rev() {
                edge.weight = f(EdgeRef {
                    origin: index + 1,
                    successor: self.slots[edge.successor].key,
                    weight: edge.weight,
                });
            }
            self.slots[slot].adjacencies = adjacencies;
        }
    }
}

/// Serialized form of a [`DirectedGraph`]: list `k - 1` holds the edges
/// leaving vertex `k` in insertion order, targets as 1-based keys
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GraphRepr<W> {
    adjacencies: Vec<Vec<(VertexKey, W)>>,
}

#[cfg(feature = "serde")]
impl<W> GraphRepr<W>
where
    W: Float + Debug,
{
    fn capture(graph: &DirectedGraph<W>) -> Self {
        let adjacencies = graph
            .keys
            .iter()
            .map(|&slot| {
                graph.slots[slot]
                    .adjacencies
                    .iter()
                    .map(|edge| (graph.slots[edge.successor].key, edge.weight))
                    .collect()
            })
            .collect();
        GraphRepr { adjacencies }
    }

    fn rebuild(self) -> Result<DirectedGraph<W>> {
        let mut graph = DirectedGraph::with_vertices(self.adjacencies.len());
        for (index, list) in self.adjacencies.into_iter().enumerate() {
            for (target, weight) in list {
                graph.add_edge(index + 1, target, weight)?;
            }
        }
        Ok(graph)
    }
}

#[cfg(feature = "serde")]
impl<W> serde::Serialize for DirectedGraph<W>
where
    W: Float + Debug + serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&GraphRepr::capture(self), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, W> serde::Deserialize<'de> for DirectedGraph<W>
where
    W: Float + Debug + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr: GraphRepr<W> = serde::Deserialize::deserialize(deserializer)?;
        repr.rebuild().map_err(serde::de::Error::custom)
    }
}
