//! graphkit-core: generic in-memory graph engine.
//!
//! Vertices are keyed by any `Eq + Hash + Clone` label and joined by
//! weighted edges. On top of the graph sit BFS/DFS iterators, two Dijkstra
//! variants (linear scan and binary heap) and a closeness-centrality
//! ranking that fans the per-vertex shortest-path runs out over rayon.
//!
//! Every edge is stored in both directions, so the graph behaves as
//! undirected even though the API names its endpoints `from` and `to`.

mod centrality;
mod error;
mod graph;
mod options;
mod queue;
mod shortest_path;
mod traversal;

pub use centrality::{dijkstra_centrality, VertexPath};
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, Vertex};
pub use options::{
    CentralityOptions, DijkstraOptions, DijkstraVariant, EdgeOptions, Execution, VertexOptions,
};
pub use queue::{PrioritizedVertex, VertexPriorityQueue};
pub use shortest_path::{dijkstra, dijkstra_paths, ShortestPaths};
pub use traversal::{BreadthFirstIterator, DepthFirstIterator, GraphIterator};
