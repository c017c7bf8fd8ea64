//! Command-based undo/redo history.

use crate::command::Command;
use crate::surface::{DrawingSurface, SurfaceResult};

/// Snapshot of history availability, polled by UI layers to enable or
/// disable their undo/redo triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

/// Two stacks of executed and undone commands.
///
/// A command lives in exactly one stack once it has been executed.
#[derive(Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
}

impl UndoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a new command and record it.
    ///
    /// On success the redo history is discarded. On failure neither stack
    /// changes and the command is dropped.
    pub fn execute(
        &mut self,
        command: Box<dyn Command>,
        surface: &mut dyn DrawingSurface,
    ) -> SurfaceResult<()> {
        if let Err(e) = command.execute(surface) {
            log::warn!("Cannot execute '{}': {}", command.description(), e);
            return Err(e);
        }
        log::info!("Executed '{}'", command.description());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent command.
    /// Returns `Ok(false)` if there was nothing to undo.
    pub fn undo(&mut self, surface: &mut dyn DrawingSurface) -> SurfaceResult<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.undo(surface) {
            log::warn!("Cannot undo '{}': {}", command.description(), e);
            self.undo_stack.push(command);
            return Err(e);
        }
        log::info!("Undid '{}'", command.description());
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Redo the most recently undone command.
    /// Returns `Ok(false)` if there was nothing to redo.
    pub fn redo(&mut self, surface: &mut dyn DrawingSurface) -> SurfaceResult<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.execute(surface) {
            log::warn!("Cannot redo '{}': {}", command.description(), e);
            self.redo_stack.push(command);
            return Err(e);
        }
        log::info!("Redid '{}'", command.description());
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the command the next undo would revert.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Label of the command the next redo would reapply.
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.undo_depth(),
            redo_depth: self.redo_depth(),
        }
    }

    /// Forget all history. The surface is left as is.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AddShape;
    use crate::shapes::{Polyline, ShapeId, ShapeStyle, ShapeTrait};
    use crate::surface::{Drawing, SurfaceError};
    use kurbo::Point;

    fn add_shape() -> (Box<dyn Command>, ShapeId) {
        let shape = Polyline::new(
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            ShapeStyle::finished(),
        );
        let id = shape.id();
        (Box::new(AddShape::new(shape)), id)
    }

    /// Command whose execution always fails.
    #[derive(Debug)]
    struct Refused;

    impl Command for Refused {
        fn execute(&self, _surface: &mut dyn DrawingSurface) -> SurfaceResult<()> {
            Err(SurfaceError::Full(0))
        }

        fn undo(&self, _surface: &mut dyn DrawingSurface) -> SurfaceResult<()> {
            Ok(())
        }

        fn description(&self) -> String {
            "Refused".to_string()
        }
    }

    #[test]
    fn test_execute_pushes_undo() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (cmd, id) = add_shape();

        history.execute(cmd, &mut drawing).unwrap();

        assert!(drawing.contains(id));
        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (cmd, id) = add_shape();
        history.execute(cmd, &mut drawing).unwrap();
        let after_execute = drawing.ids().to_vec();

        assert_eq!(history.undo(&mut drawing), Ok(true));
        assert!(!drawing.contains(id));
        assert_eq!(
            history.state(),
            HistoryState {
                can_undo: false,
                can_redo: true,
                undo_depth: 0,
                redo_depth: 1,
            }
        );

        assert_eq!(history.redo(&mut drawing), Ok(true));
        assert_eq!(drawing.ids(), after_execute.as_slice());
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_execute_clears_redo() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (first, first_id) = add_shape();
        let (second, _) = add_shape();

        history.execute(first, &mut drawing).unwrap();
        history.undo(&mut drawing).unwrap();
        assert!(history.can_redo());

        history.execute(second, &mut drawing).unwrap();
        assert!(!history.can_redo());

        // Redo is now a no-op
        assert_eq!(history.redo(&mut drawing), Ok(false));
        assert!(!drawing.contains(first_id));
        assert_eq!(drawing.len(), 1);
    }

    #[test]
    fn test_failed_execute_leaves_stacks() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (cmd, _) = add_shape();
        history.execute(cmd, &mut drawing).unwrap();
        history.undo(&mut drawing).unwrap();
        let before = history.state();

        let result = history.execute(Box::new(Refused), &mut drawing);

        assert_eq!(result, Err(SurfaceError::Full(0)));
        assert_eq!(history.state(), before);
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_failed_redo_keeps_command() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::with_capacity(1);
        let (cmd, _) = add_shape();
        history.execute(cmd, &mut drawing).unwrap();
        history.undo(&mut drawing).unwrap();

        // Fill the surface behind the history's back so the redo is refused
        let (other, _) = add_shape();
        other.execute(&mut drawing).unwrap();

        assert_eq!(history.redo(&mut drawing), Err(SurfaceError::Full(1)));
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();

        assert!(!history.can_undo());
        assert_eq!(history.undo(&mut drawing), Ok(false));
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut drawing), Ok(false));
        assert_eq!(history.state(), HistoryState::default());
    }

    #[test]
    fn test_lifo_order() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (first, first_id) = add_shape();
        let (second, second_id) = add_shape();
        history.execute(first, &mut drawing).unwrap();
        history.execute(second, &mut drawing).unwrap();

        history.undo(&mut drawing).unwrap();
        assert!(drawing.contains(first_id));
        assert!(!drawing.contains(second_id));

        history.undo(&mut drawing).unwrap();
        history.redo(&mut drawing).unwrap();
        assert!(drawing.contains(first_id));
        assert!(!drawing.contains(second_id));
    }

    #[test]
    fn test_descriptions_and_clear() {
        let mut history = UndoManager::new();
        let mut drawing = Drawing::new();
        let (cmd, _) = add_shape();
        history.execute(cmd, &mut drawing).unwrap();

        assert_eq!(history.undo_description().as_deref(), Some("Add polyline (2 points)"));
        assert_eq!(history.redo_description(), None);

        history.clear();
        assert_eq!(history.state(), HistoryState::default());
        assert_eq!(drawing.len(), 1);
    }
}
