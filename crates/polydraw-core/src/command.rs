//! Reversible edits applied to a drawing surface.

use crate::shapes::{Polyline, ShapeId, ShapeTrait};
use crate::surface::{DrawingSurface, SurfaceResult};
use std::fmt;

/// A reversible unit of work.
///
/// `execute` followed by `undo` must leave the surface exactly as it was, and
/// `undo` followed by `execute` must restore the executed state.
pub trait Command: fmt::Debug {
    /// Apply the edit to the surface.
    fn execute(&self, surface: &mut dyn DrawingSurface) -> SurfaceResult<()>;

    /// Revert the edit.
    fn undo(&self, surface: &mut dyn DrawingSurface) -> SurfaceResult<()>;

    /// Short human-readable label for logs and menus.
    fn description(&self) -> String;
}

/// Puts a finished shape on the surface.
///
/// The same shape (same ID) is attached and detached on every redo/undo.
#[derive(Debug, Clone)]
pub struct AddShape {
    shape: Polyline,
}

impl AddShape {
    pub fn new(shape: Polyline) -> Self {
        Self { shape }
    }

    /// The shape this command attaches.
    pub fn shape(&self) -> &Polyline {
        &self.shape
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape.id()
    }
}

impl Command for AddShape {
    fn execute(&self, surface: &mut dyn DrawingSurface) -> SurfaceResult<()> {
        surface.add(self.shape.clone())
    }

    fn undo(&self, surface: &mut dyn DrawingSurface) -> SurfaceResult<()> {
        surface.remove(self.shape.id()).map(|_| ())
    }

    fn description(&self) -> String {
        format!("Add polyline ({} points)", self.shape.len())
    }
}
