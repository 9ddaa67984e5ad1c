use std::collections::VecDeque;

use crate::foundation::core::Point;

/// Bounded FIFO of traced tip positions. Pushing past capacity evicts the oldest point.
#[derive(Clone, Debug)]
pub struct TracedPath {
    points: VecDeque<Point>,
    capacity: usize,
}

impl TracedPath {
    /// A capacity of zero is bumped to one so the current tip is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest one when full.
    pub fn push(&mut self, p: Point) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    /// Remove every point; the capacity is kept.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of points held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no point is held.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest point.
    pub fn last(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/trace.rs"]
mod tests;
