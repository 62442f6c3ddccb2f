use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Vertex};

/// Stepwise traversal over a graph's vertices.
///
/// Implementors are also plain [`Iterator`]s yielding `&Vertex`, so
/// `next()` returns `None` once the frontier is exhausted.
pub trait GraphIterator<'g, L: 'g>: Iterator<Item = &'g Vertex<L>> {
    /// True while the frontier still holds unvisited entries.
    fn has_next(&self) -> bool;

    /// Restore the just-constructed state: frontier and visited set hold
    /// only the start vertex.
    fn reset(&mut self);

    /// Drive the traversal to exhaustion, calling `visit` on each vertex in
    /// order. The first error stops the walk and is returned unchanged;
    /// vertices already visited stay visited.
    fn iterate<E, F>(&mut self, mut visit: F) -> std::result::Result<(), E>
    where
        Self: Sized,
        F: FnMut(&'g Vertex<L>) -> std::result::Result<(), E>,
    {
        while let Some(vertex) = self.next() {
            visit(vertex)?;
        }
        Ok(())
    }
}

/// State common to both traversal orders. Labels borrow the graph's own
/// keys; "visited" means scheduled, not yet emitted.
#[derive(Debug)]
struct TraversalState<'g, L> {
    graph: &'g Graph<L>,
    start: &'g L,
    visited: HashSet<&'g L>,
}

impl<'g, L: Eq + Hash + Clone> TraversalState<'g, L> {
    fn new(graph: &'g Graph<L>, start: &L) -> Result<Self> {
        let start = graph
            .get_vertex_by_label(start)
            .ok_or(GraphError::VertexDoesNotExist)?
            .label();
        Ok(Self {
            graph,
            start,
            visited: HashSet::from([start]),
        })
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.visited.insert(self.start);
    }

    /// Look up `label` and schedule its not-yet-seen neighbors through
    /// `schedule`, marking them visited as they go.
    fn expand(
        &mut self,
        label: &'g L,
        mut schedule: impl FnMut(&'g L),
    ) -> Option<&'g Vertex<L>> {
        let current = self.graph.get_vertex_by_label(label)?;
        for neighbor in current.neighbor_labels() {
            if self.visited.insert(neighbor) {
                schedule(neighbor);
            }
        }
        Some(current)
    }
}

/// Breadth-first traversal with a FIFO frontier.
#[derive(Debug)]
pub struct BreadthFirstIterator<'g, L> {
    state: TraversalState<'g, L>,
    queue: VecDeque<&'g L>,
}

impl<'g, L: Eq + Hash + Clone> BreadthFirstIterator<'g, L> {
    /// Fails with [`GraphError::VertexDoesNotExist`] if `start` is not in
    /// the graph.
    pub fn new(graph: &'g Graph<L>, start: &L) -> Result<Self> {
        let state = TraversalState::new(graph, start)?;
        let queue = VecDeque::from([state.start]);
        Ok(Self { state, queue })
    }
}

impl<'g, L: Eq + Hash + Clone> Iterator for BreadthFirstIterator<'g, L> {
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let label = self.queue.pop_front()?;
        let queue = &mut self.queue;
        self.state.expand(label, |n| queue.push_back(n))
    }
}

impl<'g, L: Eq + Hash + Clone> GraphIterator<'g, L> for BreadthFirstIterator<'g, L> {
    fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    fn reset(&mut self) {
        self.state.reset();
        self.queue.clear();
        self.queue.push_back(self.state.start);
    }
}

/// Depth-first traversal with a LIFO frontier.
///
/// Neighbors are pushed in insertion order, so a vertex's most recently
/// added neighbor is explored first.
#[derive(Debug)]
pub struct DepthFirstIterator<'g, L> {
    state: TraversalState<'g, L>,
    stack: Vec<&'g L>,
}

impl<'g, L: Eq + Hash + Clone> DepthFirstIterator<'g, L> {
    /// Fails with [`GraphError::VertexDoesNotExist`] if `start` is not in
    /// the graph.
    pub fn new(graph: &'g Graph<L>, start: &L) -> Result<Self> {
        let state = TraversalState::new(graph, start)?;
        let stack = vec![state.start];
        Ok(Self { state, stack })
    }
}

impl<'g, L: Eq + Hash + Clone> Iterator for DepthFirstIterator<'g, L> {
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let label = self.stack.pop()?;
        let stack = &mut self.stack;
        self.state.expand(label, |n| stack.push(n))
    }
}

impl<'g, L: Eq + Hash + Clone> GraphIterator<'g, L> for DepthFirstIterator<'g, L> {
    fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    fn reset(&mut self) {
        self.state.reset();
        self.stack.clear();
        self.stack.push(self.state.start);
    }
}
