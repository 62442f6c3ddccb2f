use std::collections::VecDeque;
use std::env;
use std::time::Instant;

use graphkit_core::{
    dijkstra, dijkstra_centrality, BreadthFirstIterator, CentralityOptions, DepthFirstIterator,
    DijkstraOptions, EdgeOptions, Graph, Vertex, VertexOptions,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// All-pairs centrality is O(V) shortest-path runs; skip it above this size.
const CENTRALITY_LIMIT: u64 = 2_000;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graphkit-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 2000 (centrality is skipped above {})", CENTRALITY_LIMIT);
        println!("Logging: GRAPHKIT_LOG=<filter>, GRAPHKIT_LOG_FORMAT=json|compact");
        return;
    }

    if node_count < 2 {
        eprintln!("node_count must be at least 2");
        return;
    }

    println!("graphkit-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Graph<u64>),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRAPHKIT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("graphkit_core=info,graphkit_bench=info,warn"));

    let format = env::var("GRAPHKIT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    info!(
        generator = name,
        vertices = graph.vertex_count(),
        edge_slots = graph.edge_count(),
        "graph generated"
    );
    println!(
        "Generated in {:.2}s: {} nodes, {} edge slots",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
    );

    // Full traversals from node 0 (typically a hub or root)
    println!();
    println!("{:>12} {:>12} {:>10}", "traversal", "visited", "time");
    println!("{:->12} {:->12} {:->10}", "", "", "");

    let t = Instant::now();
    match BreadthFirstIterator::new(&graph, &0) {
        Ok(bfs) => println!("{:>12} {:>12} {:>8.1}ms", "bfs", bfs.count(), ms(t)),
        Err(e) => warn!(error = %e, "bfs skipped"),
    }

    let t = Instant::now();
    match DepthFirstIterator::new(&graph, &0) {
        Ok(dfs) => println!("{:>12} {:>12} {:>8.1}ms", "dfs", dfs.count(), ms(t)),
        Err(e) => warn!(error = %e, "dfs skipped"),
    }

    // Single-source shortest paths from node 0, both variants
    println!();
    println!("{:>12} {:>12} {:>12} {:>10}", "dijkstra", "reached", "farthest", "time");
    println!("{:->12} {:->12} {:->12} {:->10}", "", "", "", "");

    for (label, opts) in [
        ("simple", DijkstraOptions::new()),
        ("standard", DijkstraOptions::standard()),
    ] {
        let t = Instant::now();
        let dist = dijkstra(&graph, &0, opts);
        let elapsed = ms(t);
        let reached = dist.values().filter(|d| d.is_finite()).count();
        let farthest = dist
            .values()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0f64, f64::max);
        println!(
            "{:>12} {:>12} {:>12.1} {:>8.1}ms",
            label, reached, farthest, elapsed
        );
    }

    // Closeness ranking over every vertex
    println!();
    if node_count > CENTRALITY_LIMIT {
        println!("Centrality: skipped (node_count > {})", CENTRALITY_LIMIT);
    } else {
        let t = Instant::now();
        let ranked = dijkstra_centrality(
            &graph,
            CentralityOptions::new().with_dijkstra(DijkstraOptions::standard()),
        );
        let elapsed = ms(t);
        match ranked.first() {
            Some(top) => println!(
                "Centrality: most central node {} (avg {:.2}) in {:.1}ms",
                top.label(),
                top.average_distance(),
                elapsed
            ),
            None => println!("Centrality: empty graph ({:.1}ms)", elapsed),
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Edge weight in 1..=10.
    fn weight(&mut self) -> f64 {
        (self.next(10) + 1) as f64
    }
}

fn add_node(graph: &mut Graph<u64>, id: u64) {
    graph.add_vertex_by_label(id, VertexOptions::default());
}

/// Connect two nodes; repeats of an existing pair are dropped.
fn link(graph: &mut Graph<u64>, from: u64, to: u64, weight: f64) -> bool {
    let from = Vertex::new(from, VertexOptions::default());
    let to = Vertex::new(to, VertexOptions::default());
    graph
        .add_edge(Some(&from), Some(&to), EdgeOptions::new().with_weight(weight))
        .is_ok()
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns `branching_factor` children. Produces deep paths (log depth)
/// with exponential width.
fn gen_lsystem(node_count: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64; // each node gets 3 children
    add_node(&mut graph, 0);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                link(&mut graph, parent, child, rng.weight());
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge and connecting
/// to one of its endpoints. Nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: u64) -> Graph<u64> {
    let edges_per_node = 10u64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(12345);

    // Edge list for O(1) preferential attachment sampling
    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut graph, i, j, rng.weight());
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    // Grow: each new node attaches to `edges_per_node` existing nodes
    for new_node in seed..node_count {
        add_node(&mut graph, new_node);

        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            // Pick a random endpoint from the edge list, proportional to degree
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_node && link(&mut graph, new_node, target, rng.weight()) {
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Start with each node connected to K nearest neighbors on a ring,
/// then rewire each edge with probability p. Produces high clustering
/// with short path lengths.
fn gen_small_world(node_count: u64) -> Graph<u64> {
    let k = 10u64; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        add_node(&mut graph, i);
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let weight = rng.weight();

            // Rewire with probability p
            let target = if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            if target != i {
                link(&mut graph, i, target, weight);
            }
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges.
///
/// We target ~10 edges per node on average. Baseline topology with no structure.
fn gen_random(node_count: u64) -> Graph<u64> {
    let target_edges = node_count * 10;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        add_node(&mut graph, i);
    }

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            link(&mut graph, from, to, rng.weight());
        }
    }

    graph
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for "find path through bottleneck." Each clique has n/2 nodes
/// densely connected; they're joined by a chain of ~10 bridge nodes.
fn gen_barbell(node_count: u64) -> Graph<u64> {
    let bridge_len = 10u64.min(node_count / 2);
    let clique_size = ((node_count - bridge_len) / 2).max(1);
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(99999);

    // Clique A: nodes 0..clique_size, each connected to ~20 random others in the clique
    for i in 0..clique_size {
        add_node(&mut graph, i);
    }
    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size - 1) {
            let target = rng.next(clique_size);
            if target != i {
                link(&mut graph, i, target, rng.weight());
            }
        }
    }

    // Bridge: chain from last node of A to first node of B, unit weights
    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { clique_size - 1 } else { id - 1 };
        link(&mut graph, prev, id, 1.0);
    }

    // Clique B: nodes after bridge
    let b_start = bridge_start + bridge_len;
    for i in 0..clique_size {
        add_node(&mut graph, b_start + i);
    }
    if b_start > 0 {
        link(&mut graph, b_start - 1, b_start, 1.0);
    }

    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size - 1) {
            let target = rng.next(clique_size);
            if target != i {
                link(&mut graph, b_start + i, b_start + target, rng.weight());
            }
        }
    }

    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Simplified: each new node attaches to a random recent "surface" node, with
/// occasional long-range jumps. Produces tree-like topology with winding paths.
fn gen_dla(node_count: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(77777);

    add_node(&mut graph, 0);

    // VecDeque for O(1) pop_front when evicting oldest surface nodes.
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_node in 1..node_count {
        // Attach to a random surface node (primary edge)
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(&mut graph, new_node, attach_to, rng.weight());

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                link(&mut graph, new_node, other, rng.weight());
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
