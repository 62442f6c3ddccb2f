use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::graph::Graph;
use crate::options::{DijkstraOptions, DijkstraVariant};
use crate::queue::{PrioritizedVertex, VertexPriorityQueue};

/// Working state for one vertex during a single Dijkstra run.
#[derive(Debug, Clone)]
struct DijkstraVertex<P> {
    distance: f64,
    visited: bool,
    previous: Option<P>,
}

impl<P> DijkstraVertex<P> {
    fn unreached() -> Self {
        Self {
            distance: f64::INFINITY,
            visited: false,
            previous: None,
        }
    }
}

type WorkSet<'g, L> = HashMap<&'g L, DijkstraVertex<&'g L>>;

/// Single-source result: a distance for every vertex in the graph plus the
/// predecessor of each vertex on one shortest path.
///
/// Vertices unreachable from the start keep a distance of `f64::INFINITY`
/// and have no predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPaths<L> {
    start: L,
    distances: HashMap<L, f64>,
    predecessors: HashMap<L, L>,
}

impl<L: Eq + Hash + Clone> ShortestPaths<L> {
    pub fn start(&self) -> &L {
        &self.start
    }

    pub fn distances(&self) -> &HashMap<L, f64> {
        &self.distances
    }

    pub fn into_distances(self) -> HashMap<L, f64> {
        self.distances
    }

    pub fn distance(&self, label: &L) -> Option<f64> {
        self.distances.get(label).copied()
    }

    pub fn predecessor(&self, label: &L) -> Option<&L> {
        self.predecessors.get(label)
    }

    /// Labels on one shortest path from the start to `target`, both ends
    /// included. `None` if `target` is unknown or unreachable.
    pub fn path_to(&self, target: &L) -> Option<Vec<L>> {
        if !self.distance(target)?.is_finite() {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while *current != self.start {
            let parent = self.predecessors.get(current)?;
            path.push(parent.clone());
            // Negative weights can knot the predecessor chain.
            if path.len() > self.distances.len() {
                return None;
            }
            current = parent;
        }

        path.reverse();
        Some(path)
    }
}

/// Shortest distances from `start` to every vertex in `graph`.
///
/// Returns an empty map if `start` is not in the graph. Unreachable
/// vertices map to `f64::INFINITY`.
pub fn dijkstra<L: Eq + Hash + Clone>(
    graph: &Graph<L>,
    start: &L,
    options: DijkstraOptions,
) -> HashMap<L, f64> {
    dijkstra_paths(graph, start, options)
        .map(ShortestPaths::into_distances)
        .unwrap_or_default()
}

/// Like [`dijkstra`], but keeps the predecessor of every reached vertex so
/// paths can be rebuilt. `None` if `start` is not in the graph.
pub fn dijkstra_paths<L: Eq + Hash + Clone>(
    graph: &Graph<L>,
    start: &L,
    options: DijkstraOptions,
) -> Option<ShortestPaths<L>> {
    let Some(start_vertex) = graph.get_vertex_by_label(start) else {
        debug!("dijkstra start vertex not in graph");
        return None;
    };
    let start = start_vertex.label();

    trace!(
        vertices = graph.vertex_count(),
        variant = ?options.variant,
        "running dijkstra"
    );

    let work = match options.variant {
        DijkstraVariant::Simple => simple_dijkstra(graph, start),
        DijkstraVariant::Standard => standard_dijkstra(graph, start),
    };

    let mut distances = HashMap::with_capacity(work.len());
    let mut predecessors = HashMap::new();
    for (label, state) in work {
        distances.insert(label.clone(), state.distance);
        if let Some(previous) = state.previous {
            predecessors.insert(label.clone(), previous.clone());
        }
    }

    Some(ShortestPaths {
        start: start.clone(),
        distances,
        predecessors,
    })
}

fn init_work<'g, L: Eq + Hash + Clone>(graph: &'g Graph<L>, start: &'g L) -> WorkSet<'g, L> {
    let mut work: WorkSet<'g, L> = graph
        .vertices()
        .map(|v| (v.label(), DijkstraVertex::unreached()))
        .collect();
    if let Some(origin) = work.get_mut(start) {
        origin.distance = 0.0;
    }
    work
}

/// O(V²): each round linearly scans for the closest unvisited vertex.
///
/// Ties go to whichever vertex the scan meets first, and the scan follows
/// hash-map order, so equal-distance picks may differ between runs.
fn simple_dijkstra<'g, L: Eq + Hash + Clone>(graph: &'g Graph<L>, start: &'g L) -> WorkSet<'g, L> {
    let labels: Vec<&L> = graph.vertices().map(|v| v.label()).collect();
    let mut work = init_work(graph, start);

    for _ in 0..labels.len() {
        let mut closest: Option<&L> = None;
        for &label in &labels {
            let candidate = &work[label];
            if candidate.visited {
                continue;
            }
            if closest.map_or(true, |c| candidate.distance < work[c].distance) {
                closest = Some(label);
            }
        }
        let Some(u) = closest else { break };

        let du = match work.get_mut(u) {
            Some(state) => {
                state.visited = true;
                state.distance
            }
            None => continue,
        };

        for n in graph.neighbor_labels(u) {
            let Some(weight) = graph.edge_weight(u, n) else {
                continue;
            };
            let alt = du + weight;
            if let Some(state) = work.get_mut(n) {
                if alt < state.distance {
                    state.distance = alt;
                    state.previous = Some(u);
                }
            }
        }
    }

    work
}

/// O(E log V): binary heap with lazy deletion. Improvements push a new
/// heap entry instead of decreasing the old one; entries for vertices
/// that are already finalized are dropped when popped.
fn standard_dijkstra<'g, L: Eq + Hash + Clone>(graph: &'g Graph<L>, start: &'g L) -> WorkSet<'g, L> {
    let mut work = init_work(graph, start);
    let mut pq = VertexPriorityQueue::with_capacity(work.len());
    pq.push(PrioritizedVertex::new(start, 0.0));

    while let Some(entry) = pq.pop() {
        let u = entry.into_label();
        let du = match work.get_mut(u) {
            Some(state) if !state.visited => {
                state.visited = true;
                state.distance
            }
            _ => continue,
        };

        for n in graph.neighbor_labels(u) {
            let Some(weight) = graph.edge_weight(u, n) else {
                continue;
            };
            let Some(state) = work.get_mut(n) else {
                continue;
            };
            if state.visited {
                continue;
            }
            let candidate = du + weight;
            if candidate < state.distance {
                state.distance = candidate;
                state.previous = Some(u);
                pq.push(PrioritizedVertex::new(n, candidate));
            }
        }
    }

    work
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use crate::options::{EdgeOptions, VertexOptions};

    fn connect<L: Eq + Hash + Clone>(g: &mut Graph<L>, from: L, to: L, weight: f64) {
        let from = Vertex::new(from, VertexOptions::default());
        let to = Vertex::new(to, VertexOptions::default());
        g.add_edge(Some(&from), Some(&to), EdgeOptions::new().with_weight(weight))
            .unwrap();
    }

    /// A-B(4), A-C(3), B-C(1), B-D(2), C-D(4)
    fn make_square() -> Graph<&'static str> {
        let mut g = Graph::new();
        connect(&mut g, "A", "B", 4.0);
        connect(&mut g, "A", "C", 3.0);
        connect(&mut g, "B", "C", 1.0);
        connect(&mut g, "B", "D", 2.0);
        connect(&mut g, "C", "D", 4.0);
        g
    }

    fn both_variants() -> [DijkstraOptions; 2] {
        [DijkstraOptions::new(), DijkstraOptions::standard()]
    }

    #[test]
    fn test_square_distances() {
        let g = make_square();
        for opts in both_variants() {
            let dist = dijkstra(&g, &"A", opts);
            assert_eq!(dist.len(), 4);
            assert_eq!(dist[&"A"], 0.0);
            assert_eq!(dist[&"B"], 4.0);
            assert_eq!(dist[&"C"], 3.0);
            assert_eq!(dist[&"D"], 6.0);
        }
    }

    #[test]
    fn test_integer_labels() {
        let mut g = Graph::new();
        connect(&mut g, 1, 2, 4.0);
        connect(&mut g, 1, 3, 3.0);
        connect(&mut g, 2, 3, 1.0);
        connect(&mut g, 2, 4, 2.0);
        connect(&mut g, 3, 4, 4.0);
        for opts in both_variants() {
            let dist = dijkstra(&g, &1, opts);
            assert_eq!(dist[&4], 6.0);
        }
    }

    #[test]
    fn test_start_not_in_graph() {
        let g = make_square();
        for opts in both_variants() {
            assert!(dijkstra(&g, &"X", opts).is_empty());
            assert!(dijkstra_paths(&g, &"X", opts).is_none());
        }
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<u64> = Graph::new();
        assert!(dijkstra(&g, &0, DijkstraOptions::standard()).is_empty());
    }

    #[test]
    fn test_unreachable_vertex_is_infinite() {
        let mut g = make_square();
        g.add_vertex_by_label("Z", VertexOptions::default());
        for opts in both_variants() {
            let dist = dijkstra(&g, &"A", opts);
            assert_eq!(dist.len(), 5);
            assert_eq!(dist[&"Z"], f64::INFINITY);
            assert_eq!(dist[&"D"], 6.0);
        }
    }

    #[test]
    fn test_isolated_start() {
        let mut g = make_square();
        g.add_vertex_by_label("Z", VertexOptions::default());
        for opts in both_variants() {
            let dist = dijkstra(&g, &"Z", opts);
            assert_eq!(dist[&"Z"], 0.0);
            assert!(dist
                .iter()
                .filter(|(label, _)| **label != "Z")
                .all(|(_, d)| d.is_infinite()));
        }
    }

    #[test]
    fn test_default_weight_is_zero() {
        let mut g = Graph::new();
        let a = g.add_vertex_by_label(0u64, VertexOptions::default());
        let b = g.add_vertex_by_label(1u64, VertexOptions::default());
        g.add_edge(a.as_ref(), b.as_ref(), EdgeOptions::default()).unwrap();
        for opts in both_variants() {
            assert_eq!(dijkstra(&g, &0, opts)[&1], 0.0);
        }
    }

    #[test]
    fn test_path_reconstruction() {
        let g = make_square();
        for opts in both_variants() {
            let paths = dijkstra_paths(&g, &"A", opts).unwrap();
            assert_eq!(*paths.start(), "A");
            assert_eq!(paths.path_to(&"D"), Some(vec!["A", "B", "D"]));
            assert_eq!(paths.path_to(&"C"), Some(vec!["A", "C"]));
            assert_eq!(paths.path_to(&"A"), Some(vec!["A"]));
            assert_eq!(paths.predecessor(&"D"), Some(&"B"));
            assert!(paths.predecessor(&"A").is_none());
        }
    }

    #[test]
    fn test_path_to_unreachable() {
        let mut g = make_square();
        g.add_vertex_by_label("Z", VertexOptions::default());
        let paths = dijkstra_paths(&g, &"A", DijkstraOptions::standard()).unwrap();
        assert!(paths.path_to(&"Z").is_none());
        assert!(paths.path_to(&"nowhere").is_none());
    }

    #[test]
    fn test_prefers_cheaper_longer_route() {
        // Direct hop costs 10; the three-hop detour costs 3.
        let mut g = Graph::new();
        connect(&mut g, 0u64, 3, 10.0);
        connect(&mut g, 0, 1, 1.0);
        connect(&mut g, 1, 2, 1.0);
        connect(&mut g, 2, 3, 1.0);
        for opts in both_variants() {
            let paths = dijkstra_paths(&g, &0, opts).unwrap();
            assert_eq!(paths.distance(&3), Some(3.0));
            assert_eq!(paths.path_to(&3), Some(vec![0, 1, 2, 3]));
        }
    }
}
