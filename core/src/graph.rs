use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::options::{EdgeOptions, VertexOptions};

/// A vertex, identified by its caller-chosen label.
///
/// Neighbors are held as labels into the owning graph's vertex store, never
/// as references. Two vertices are equal iff their labels are equal.
#[derive(Debug, Clone)]
pub struct Vertex<L> {
    label: L,
    weight: f64,
    in_degree: usize,
    neighbors: Vec<L>,
}

impl<L: Eq> Vertex<L> {
    pub fn new(label: L, options: VertexOptions) -> Self {
        Self {
            label,
            weight: options.weight,
            in_degree: 0,
            neighbors: Vec::new(),
        }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Only reachable on owned copies; vertices inside a graph are handed
    /// out by shared reference.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    pub fn out_degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn degree(&self) -> usize {
        self.in_degree + self.out_degree()
    }

    /// Neighbor labels in edge-insertion order.
    pub fn neighbor_labels(&self) -> &[L] {
        &self.neighbors
    }

    pub fn has_neighbor(&self, vertex: &Vertex<L>) -> bool {
        self.neighbors.iter().any(|n| *n == vertex.label)
    }
}

impl<L: PartialEq> PartialEq for Vertex<L> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl<L: Eq> Eq for Vertex<L> {}

impl<L: Hash> Hash for Vertex<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

/// A weighted edge between two vertex labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<L> {
    source: L,
    destination: L,
    weight: f64,
}

impl<L> Edge<L> {
    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn destination(&self) -> &L {
        &self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// In-memory graph: vertex store keyed by label + two-level edge index.
///
/// Although the API speaks of `from`/`to`, every accepted edge is stored in
/// both directions (`edges[a][b]` and `edges[b][a]`), and both endpoints
/// list each other as neighbors. The graph is structurally undirected.
#[derive(Debug, Clone)]
pub struct Graph<L> {
    vertices: HashMap<L, Vertex<L>>,
    edges: HashMap<L, HashMap<L, Edge<L>>>,
}

impl<L: Eq + Hash + Clone> Graph<L> {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Pre-allocate for a known number of vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertex_count),
            edges: HashMap::with_capacity(vertex_count),
        }
    }

    fn insert_vertex(&mut self, vertex: Vertex<L>) -> Option<&Vertex<L>> {
        match self.vertices.entry(vertex.label.clone()) {
            Entry::Occupied(_) => {
                trace!("vertex label already present, insert skipped");
                None
            }
            Entry::Vacant(slot) => Some(&*slot.insert(vertex)),
        }
    }

    /// Endpoint auto-insert for `add_edge`. An existing vertex keeps its
    /// weight and is not reported as a rejected insert.
    fn ensure_vertex(&mut self, label: &L, weight: f64) {
        if !self.vertices.contains_key(label) {
            let vertex = Vertex::new(label.clone(), VertexOptions::new().with_weight(weight));
            self.vertices.insert(label.clone(), vertex);
        }
    }

    /// Create a vertex for `label` unless one already exists.
    ///
    /// Returns a snapshot of the new vertex taken at insertion time, or
    /// `None` if the label was taken (the graph is left untouched).
    pub fn add_vertex_by_label(&mut self, label: L, options: VertexOptions) -> Option<Vertex<L>> {
        self.insert_vertex(Vertex::new(label, options)).cloned()
    }

    /// Insert a caller-built vertex under the same duplicate rule as
    /// [`add_vertex_by_label`](Self::add_vertex_by_label). Only the label
    /// and weight are taken over; adjacency is owned by this graph.
    pub fn add_vertex(&mut self, vertex: Option<Vertex<L>>) {
        if let Some(vertex) = vertex {
            let options = VertexOptions::new().with_weight(vertex.weight);
            self.insert_vertex(Vertex::new(vertex.label, options));
        }
    }

    pub fn get_vertex_by_label(&self, label: &L) -> Option<&Vertex<L>> {
        self.vertices.get(label)
    }

    /// All vertices, in no particular order.
    pub fn get_all_vertices(&self) -> Vec<&Vertex<L>> {
        self.vertices.values().collect()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<L>> {
        self.vertices.values()
    }

    pub fn contains_vertex(&self, vertex: Option<&Vertex<L>>) -> bool {
        vertex.is_some_and(|v| self.vertices.contains_key(&v.label))
    }

    /// Deep copies of the neighbors of the stored vertex named `label`.
    /// Changing a returned copy never touches the graph.
    pub fn neighbors(&self, label: &L) -> Vec<Vertex<L>> {
        self.neighbor_labels(label)
            .iter()
            .filter_map(|n| self.vertices.get(n))
            .cloned()
            .collect()
    }

    /// Linear scan of `label`'s neighbor list for `neighbor`.
    pub fn neighbor_by_label(&self, label: &L, neighbor: &L) -> Option<&Vertex<L>> {
        self.neighbor_labels(label)
            .iter()
            .find(|n| *n == neighbor)
            .and_then(|n| self.vertices.get(n))
    }

    pub(crate) fn neighbor_labels(&self, label: &L) -> &[L] {
        self.vertices
            .get(label)
            .map(|v| v.neighbors.as_slice())
            .unwrap_or(&[])
    }

    fn edge_slot(&self, from: &L, to: &L) -> Option<&Edge<L>> {
        self.edges.get(from).and_then(|dest| dest.get(to))
    }

    pub(crate) fn edge_weight(&self, from: &L, to: &L) -> Option<f64> {
        self.edge_slot(from, to).map(|e| e.weight)
    }

    fn insert_edge(&mut self, source: L, destination: L, weight: f64) -> &Edge<L> {
        let edge = Edge {
            source: source.clone(),
            destination: destination.clone(),
            weight,
        };
        match self.edges.entry(source).or_default().entry(destination) {
            Entry::Occupied(mut slot) => {
                slot.insert(edge);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(edge),
        }
    }

    /// Connect `from` and `to`, creating either endpoint if it is missing.
    ///
    /// Both directions are recorded: each endpoint gains the other as a
    /// neighbor, each in-degree goes up by one, and the edge index receives
    /// `from → to` and `to → from`. Returns the `from → to` edge.
    ///
    /// Fails with [`GraphError::NilVertices`] if either endpoint is `None`,
    /// and with [`GraphError::EdgeAlreadyExists`] if `from → to` is already
    /// present. Neither failure mutates the graph.
    pub fn add_edge(
        &mut self,
        from: Option<&Vertex<L>>,
        to: Option<&Vertex<L>>,
        options: EdgeOptions,
    ) -> Result<&Edge<L>> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(GraphError::NilVertices);
        };

        // Prevent edge multiplicity. An existing slot implies both endpoints
        // exist, so nothing below has run yet.
        if self.edge_slot(&from.label, &to.label).is_some() {
            trace!("edge already present, insert rejected");
            return Err(GraphError::EdgeAlreadyExists);
        }

        let from_label = from.label.clone();
        let to_label = to.label.clone();

        self.ensure_vertex(&from_label, from.weight);
        self.ensure_vertex(&to_label, to.weight);

        if let Some(v) = self.vertices.get_mut(&from_label) {
            v.neighbors.push(to_label.clone());
            v.in_degree += 1;
        }
        if let Some(v) = self.vertices.get_mut(&to_label) {
            v.neighbors.push(from_label.clone());
            v.in_degree += 1;
        }

        self.insert_edge(to_label.clone(), from_label.clone(), options.weight);
        Ok(self.insert_edge(from_label, to_label, options.weight))
    }

    fn both_present<'a>(
        &self,
        from: Option<&'a Vertex<L>>,
        to: Option<&'a Vertex<L>>,
    ) -> Option<(&'a L, &'a L)> {
        let (from, to) = (from?, to?);
        if self.vertices.contains_key(&from.label) && self.vertices.contains_key(&to.label) {
            Some((&from.label, &to.label))
        } else {
            None
        }
    }

    /// The `from → to` edge only. `None` if either endpoint is `None` or
    /// not in the graph, or if no such edge exists.
    pub fn get_edge(&self, from: Option<&Vertex<L>>, to: Option<&Vertex<L>>) -> Option<&Edge<L>> {
        let (from, to) = self.both_present(from, to)?;
        self.edge_slot(from, to)
    }

    /// The `from → to` edge followed by the `to → from` edge, whichever exist.
    ///
    /// `None` if either endpoint is `None` or not in the graph; an empty
    /// vector if both exist but are not connected.
    pub fn get_all_edges(
        &self,
        from: Option<&Vertex<L>>,
        to: Option<&Vertex<L>>,
    ) -> Option<Vec<&Edge<L>>> {
        let (from, to) = self.both_present(from, to)?;
        let edges = self
            .edge_slot(from, to)
            .into_iter()
            .chain(self.edge_slot(to, from))
            .collect();
        Some(edges)
    }

    pub fn contains_edge(&self, from: Option<&Vertex<L>>, to: Option<&Vertex<L>>) -> bool {
        self.get_edge(from, to).is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed slots in the edge index (two per accepted edge,
    /// one for a self-loop).
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|dest| dest.len()).sum()
    }
}

impl<L: Eq + Hash + Clone> Default for Graph<L> {
    fn default() -> Self {
        Self::new()
    }
}
