use std::hash::Hash;
use std::sync::mpsc;

use tracing::debug;

use crate::graph::Graph;
use crate::options::{CentralityOptions, DijkstraOptions, Execution};
use crate::shortest_path::dijkstra;

/// A vertex and its mean shortest-path distance to every vertex in the
/// graph (itself included).
#[derive(Debug, Clone, PartialEq)]
pub struct VertexPath<L> {
    label: L,
    average_distance: f64,
}

impl<L> VertexPath<L> {
    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn average_distance(&self) -> f64 {
        self.average_distance
    }
}

/// Closeness ranking: run Dijkstra from every vertex and average the
/// resulting distances, most central (lowest average) first.
///
/// The average includes the zero self-distance and any `f64::INFINITY`
/// entries, so a vertex that cannot reach the whole graph averages to
/// infinity and sorts last. Equal averages come out in no fixed order.
///
/// Labels must be `Send + Sync` under either [`Execution`] strategy, since
/// the strategy is chosen at run time.
pub fn dijkstra_centrality<L>(graph: &Graph<L>, options: CentralityOptions) -> Vec<VertexPath<L>>
where
    L: Eq + Hash + Clone + Send + Sync,
{
    debug!(
        vertices = graph.vertex_count(),
        execution = ?options.execution,
        variant = ?options.dijkstra.variant,
        "computing dijkstra centrality"
    );

    let mut paths: Vec<VertexPath<L>> = match options.execution {
        Execution::Sequential => graph
            .vertices()
            .map(|v| average_distance(graph, v.label(), options.dijkstra))
            .collect(),
        Execution::Concurrent => fan_out(graph, options.dijkstra),
    };

    paths.sort_by(|a, b| a.average_distance.total_cmp(&b.average_distance));
    paths
}

fn average_distance<L: Eq + Hash + Clone>(
    graph: &Graph<L>,
    label: &L,
    options: DijkstraOptions,
) -> VertexPath<L> {
    let distances = dijkstra(graph, label, options);
    let total: f64 = distances.values().sum();
    VertexPath {
        label: label.clone(),
        average_distance: total / distances.len() as f64,
    }
}

/// One rayon task per vertex. Tasks only read the graph; each sends its
/// result down a channel, and leaving the scope waits for all of them.
fn fan_out<L>(graph: &Graph<L>, options: DijkstraOptions) -> Vec<VertexPath<L>>
where
    L: Eq + Hash + Clone + Send + Sync,
{
    let (tx, rx) = mpsc::channel();

    rayon::scope(move |s| {
        for vertex in graph.vertices() {
            let tx = tx.clone();
            s.spawn(move |_| {
                // rx lives past the scope, so the send cannot fail.
                let _ = tx.send(average_distance(graph, vertex.label(), options));
            });
        }
    });

    rx.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use crate::options::{EdgeOptions, VertexOptions};

    const EPS: f64 = 1e-9;

    fn connect<L: Eq + Hash + Clone>(g: &mut Graph<L>, from: L, to: L, weight: f64) {
        let from = Vertex::new(from, VertexOptions::default());
        let to = Vertex::new(to, VertexOptions::default());
        g.add_edge(Some(&from), Some(&to), EdgeOptions::new().with_weight(weight))
            .unwrap();
    }

    /// Seven-vertex weighted graph. B and E tie for most central at 15/7,
    /// A follows at 16/7, C is the outlier at 30/7.
    fn make_town() -> Graph<&'static str> {
        let mut g = Graph::new();
        for (from, to, w) in [
            ("A", "B", 1.0),
            ("A", "E", 5.0),
            ("A", "J", 2.0),
            ("B", "C", 3.0),
            ("B", "E", 1.0),
            ("E", "C", 4.0),
            ("E", "J", 3.0),
            ("E", "Q", 3.0),
            ("E", "K", 2.0),
            ("J", "Q", 1.0),
            ("Q", "K", 2.0),
        ] {
            connect(&mut g, from, to, w);
        }
        g
    }

    fn all_options() -> Vec<CentralityOptions> {
        let mut out = Vec::new();
        for dijkstra in [DijkstraOptions::new(), DijkstraOptions::standard()] {
            for execution in [Execution::Sequential, Execution::Concurrent] {
                out.push(
                    CentralityOptions::new()
                        .with_dijkstra(dijkstra)
                        .with_execution(execution),
                );
            }
        }
        out
    }

    #[test]
    fn test_town_ranking() {
        let g = make_town();
        for opts in all_options() {
            let paths = dijkstra_centrality(&g, opts);
            assert_eq!(paths.len(), 7);

            let mut leaders = vec![*paths[0].label(), *paths[1].label()];
            leaders.sort();
            assert_eq!(leaders, vec!["B", "E"]);
            assert!((paths[0].average_distance() - 15.0 / 7.0).abs() < EPS);
            assert!((paths[1].average_distance() - 15.0 / 7.0).abs() < EPS);

            assert_eq!(*paths[2].label(), "A");
            assert!((paths[2].average_distance() - 16.0 / 7.0).abs() < EPS);

            assert_eq!(*paths[6].label(), "C");
            assert!((paths[6].average_distance() - 30.0 / 7.0).abs() < EPS);
        }
    }

    #[test]
    fn test_sorted_ascending() {
        let g = make_town();
        let paths = dijkstra_centrality(&g, CentralityOptions::default());
        for w in paths.windows(2) {
            assert!(w[0].average_distance() <= w[1].average_distance());
        }
    }

    #[test]
    fn test_sequential_matches_concurrent() {
        let g = make_town();
        let dijkstra = DijkstraOptions::standard();
        let seq = dijkstra_centrality(
            &g,
            CentralityOptions::new()
                .with_dijkstra(dijkstra)
                .with_execution(Execution::Sequential),
        );
        let par = dijkstra_centrality(&g, CentralityOptions::new().with_dijkstra(dijkstra));
        let seq_avgs: Vec<f64> = seq.iter().map(|p| p.average_distance()).collect();
        let par_avgs: Vec<f64> = par.iter().map(|p| p.average_distance()).collect();
        assert_eq!(seq_avgs, par_avgs);
    }

    #[test]
    fn test_disconnected_vertex_makes_every_average_infinite() {
        let mut g = make_town();
        g.add_vertex_by_label("Z", VertexOptions::default());
        for opts in all_options() {
            let paths = dijkstra_centrality(&g, opts);
            assert_eq!(paths.len(), 8);
            // Every vertex now has an unreachable entry.
            assert!(paths.iter().all(|p| p.average_distance().is_infinite()));
        }
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<u64> = Graph::new();
        assert!(dijkstra_centrality(&g, CentralityOptions::default()).is_empty());
    }

    #[test]
    fn test_single_vertex() {
        let mut g = Graph::new();
        g.add_vertex_by_label(1u64, VertexOptions::default());
        let paths = dijkstra_centrality(&g, CentralityOptions::default());
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].average_distance(), 0.0);
    }

    #[test]
    fn test_star_center_first() {
        let mut g = Graph::new();
        for leaf in 1..=5u64 {
            connect(&mut g, 0, leaf, 1.0);
        }
        let paths = dijkstra_centrality(&g, CentralityOptions::default());
        assert_eq!(*paths[0].label(), 0);
        assert!((paths[0].average_distance() - 5.0 / 6.0).abs() < EPS);
        assert!((paths[1].average_distance() - 9.0 / 6.0).abs() < EPS);
    }
}
