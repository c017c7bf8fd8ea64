//! Drawing surface holding finished shapes.

use crate::shapes::{Polyline, ShapeId, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a surface can refuse a shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("Shape {0} is already on the surface")]
    Duplicate(ShapeId),
    #[error("Surface is full ({0} shapes)")]
    Full(usize),
    #[error("Shape {0} has no points")]
    Empty(ShapeId),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Target of shape commands.
///
/// `add` and `remove` must tolerate being called alternately for the same
/// shape any number of times.
pub trait DrawingSurface {
    /// Attach a shape. Fails without side effects if the shape is refused.
    fn add(&mut self, shape: Polyline) -> SurfaceResult<()>;

    /// Detach a shape. Removing an absent shape is not an error.
    fn remove(&mut self, id: ShapeId) -> SurfaceResult<Option<Polyline>>;

    /// Check whether a shape is attached.
    fn contains(&self, id: ShapeId) -> bool;
}

/// In-memory drawing of finished polylines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    /// Unique drawing identifier.
    pub id: String,
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Polyline>,
    /// Draw order of shapes (back to front).
    z_order: Vec<ShapeId>,
    /// Maximum number of shapes accepted, if any.
    #[serde(default)]
    capacity: Option<usize>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    /// Create a new empty, unbounded drawing.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            capacity: None,
        }
    }

    /// Create a drawing that refuses shapes beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Polyline> {
        self.shapes.get(&id)
    }

    /// Get shapes in draw order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Polyline> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// IDs in draw order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(|s| s.bounds())
            .reduce(|a, b| a.union(b))
    }

    /// Find shapes at a point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| {
                self.shapes
                    .get(*id)
                    .is_some_and(|s| s.hit_test(point, tolerance))
            })
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the drawing to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a drawing from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl DrawingSurface for Drawing {
    fn add(&mut self, shape: Polyline) -> SurfaceResult<()> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return Err(SurfaceError::Duplicate(id));
        }
        if shape.is_empty() {
            return Err(SurfaceError::Empty(id));
        }
        if let Some(cap) = self.capacity {
            if self.shapes.len() >= cap {
                return Err(SurfaceError::Full(cap));
            }
        }
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        Ok(())
    }

    fn remove(&mut self, id: ShapeId) -> SurfaceResult<Option<Polyline>> {
        self.z_order.retain(|&shape_id| shape_id != id);
        Ok(self.shapes.remove(&id))
    }

    fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }
}
