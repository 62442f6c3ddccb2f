//! Construction-time settings for vertices, edges and the path engines.
//!
//! Every struct defaults to the zero value of each field (weight `0.0`,
//! simple Dijkstra, concurrent centrality). Builders consume and return
//! `self`, so a later call wins over an earlier one on the same field.

/// Settings applied when a vertex is created.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexOptions {
    pub weight: f64,
}

impl VertexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Settings applied when an edge is created. The weight is shared by
/// both directions of the edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeOptions {
    pub weight: f64,
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Which Dijkstra implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DijkstraVariant {
    /// Linear scan for the closest unvisited vertex. O(V²).
    #[default]
    Simple,
    /// Binary min-heap with lazy deletion of stale entries. O(E log V).
    Standard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DijkstraOptions {
    pub variant: DijkstraVariant,
}

impl DijkstraOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for the heap-based variant.
    pub fn standard() -> Self {
        Self::default().with_variant(DijkstraVariant::Standard)
    }

    pub fn with_variant(mut self, variant: DijkstraVariant) -> Self {
        self.variant = variant;
        self
    }
}

/// How centrality schedules its per-vertex shortest-path runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    /// One rayon task per vertex, joined before ranking.
    #[default]
    Concurrent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CentralityOptions {
    pub dijkstra: DijkstraOptions,
    pub execution: Execution,
}

impl CentralityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dijkstra(mut self, dijkstra: DijkstraOptions) -> Self {
        self.dijkstra = dijkstra;
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(VertexOptions::default().weight, 0.0);
        assert_eq!(EdgeOptions::default().weight, 0.0);
        assert_eq!(DijkstraOptions::default().variant, DijkstraVariant::Simple);
        assert_eq!(CentralityOptions::default().execution, Execution::Concurrent);
    }

    #[test]
    fn test_later_builder_call_wins() {
        let opts = EdgeOptions::new().with_weight(3.0).with_weight(7.5);
        assert_eq!(opts.weight, 7.5);

        let opts = DijkstraOptions::standard().with_variant(DijkstraVariant::Simple);
        assert_eq!(opts.variant, DijkstraVariant::Simple);
    }

    #[test]
    fn test_centrality_options_builder() {
        let opts = CentralityOptions::new()
            .with_execution(Execution::Sequential)
            .with_dijkstra(DijkstraOptions::standard());
        assert_eq!(opts.execution, Execution::Sequential);
        assert_eq!(opts.dijkstra.variant, DijkstraVariant::Standard);
    }
}
