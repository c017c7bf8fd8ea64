//! Vertex list of a polyline under construction.
//!
//! The last vertex is provisional: it follows the pointer and is never part of
//! the finished shape. Every vertex before it is committed.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ordered vertices of the shape being drawn, with a trailing provisional point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSequence {
    points: Vec<Point>,
}

impl PointSequence {
    /// Start a sequence at `at`: one committed point plus a coincident provisional one.
    pub fn start(at: Point) -> Self {
        Self {
            points: vec![at, at],
        }
    }

    /// Number of committed points (the provisional point is not counted).
    pub fn committed_len(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Committed points, in order.
    pub fn committed(&self) -> &[Point] {
        let end = self.committed_len();
        &self.points[..end]
    }

    /// The trailing provisional point.
    pub fn provisional(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// All points including the provisional one.
    pub fn all(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Commit the current provisional point and append `at` as the new provisional one.
    pub fn push(&mut self, at: Point) {
        self.points.push(at);
    }

    /// Overwrite the provisional point.
    pub fn set_provisional(&mut self, at: Point) {
        if let Some(last) = self.points.last_mut() {
            *last = at;
        }
    }

    /// Drop the last committed point, keeping the provisional one.
    ///
    /// Returns the removed point. The first committed point is never removed.
    pub fn remove_last_committed(&mut self) -> Option<Point> {
        if self.committed_len() < 2 {
            return None;
        }
        let index = self.points.len() - 2;
        Some(self.points.remove(index))
    }

    /// Consume the sequence, keeping only the committed points.
    pub fn into_committed(mut self) -> Vec<Point> {
        self.points.pop();
        self.points
    }
}
