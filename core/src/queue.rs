//! Indexed binary min-heap of vertex labels keyed by `f64` priority.
//!
//! Every entry records its current slot in the heap so a decrease-key can
//! be added later. Dijkstra does not need one: it pushes a fresh entry on
//! every improvement and skips stale ones when they surface.

/// A queued vertex label together with its priority.
#[derive(Debug, Clone)]
pub struct PrioritizedVertex<L> {
    label: L,
    priority: f64,
    index: Option<usize>,
}

impl<L> PrioritizedVertex<L> {
    pub fn new(label: L, priority: f64) -> Self {
        Self {
            label,
            priority,
            index: None,
        }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn into_label(self) -> L {
        self.label
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Slot in the heap while queued, `None` before push and after pop.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Min-heap ordered by ascending priority. Ties come out in no fixed order.
#[derive(Debug, Clone)]
pub struct VertexPriorityQueue<L> {
    heap: Vec<PrioritizedVertex<L>>,
}

impl<L> VertexPriorityQueue<L> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// O(log n).
    pub fn push(&mut self, mut item: PrioritizedVertex<L>) {
        let slot = self.heap.len();
        item.index = Some(slot);
        self.heap.push(item);
        self.sift_up(slot);
    }

    /// Remove the minimum-priority entry. O(log n).
    pub fn pop(&mut self) -> Option<PrioritizedVertex<L>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let mut item = self.heap.pop()?;
        item.index = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// The minimum-priority entry without removing it.
    pub fn peek(&self) -> Option<&PrioritizedVertex<L>> {
        self.heap.first()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i].priority < self.heap[j].priority
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.heap[i].index = Some(i);
        self.heap[j].index = Some(j);
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(child, parent) {
                break;
            }
            self.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * parent + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let smallest = if right < n && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smallest, parent) {
                break;
            }
            self.swap(parent, smallest);
            parent = smallest;
        }
    }
}

impl<L> Default for VertexPriorityQueue<L> {
    fn default() -> Self {
        Self::new()
    }
}
