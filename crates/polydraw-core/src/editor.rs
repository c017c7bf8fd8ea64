//! Editing session: the state machine, its history, and the drawing it edits.

use crate::config::EditorConfig;
use crate::history::{HistoryState, UndoManager};
use crate::input::{Event, InputState, MouseButton, PointerEvent};
use crate::machine::{ActionContext, PolylineMachine, State, Step};
use crate::shapes::Polyline;
use crate::surface::{Drawing, DrawingSurface, SurfaceResult};
use kurbo::Point;

/// A single editing session.
///
/// Owns the polyline under construction (through the state machine), the
/// undo/redo history, and the surface. Finished shapes only reach the surface
/// through history commands.
#[derive(Debug)]
pub struct Editor<S: DrawingSurface = Drawing> {
    surface: S,
    history: UndoManager,
    machine: PolylineMachine,
    input: InputState,
}

impl Default for Editor<Drawing> {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor<Drawing> {
    /// Create an editor with default settings and an empty drawing.
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// Create an editor with an empty drawing sized by `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        let drawing = match config.surface_capacity {
            Some(cap) => Drawing::with_capacity(cap),
            None => Drawing::new(),
        };
        Self::with_surface(drawing, config)
    }
}

impl<S: DrawingSurface> Editor<S> {
    /// Create an editor drawing onto an existing surface.
    pub fn with_surface(surface: S, config: &EditorConfig) -> Self {
        Self {
            surface,
            history: UndoManager::new(),
            machine: PolylineMachine::new(config),
            input: InputState::new(),
        }
    }

    /// Feed a raw pointer event.
    ///
    /// A button press away from the last known pointer position is preceded by
    /// a move to that position, so the click lands on the provisional point.
    pub fn pointer_event(&mut self, event: PointerEvent) -> Option<Step> {
        if let PointerEvent::Down { position, .. } = event {
            if position != self.input.pointer_position {
                self.pointer_event(PointerEvent::Move { position });
            }
        }
        let event = self.input.handle_pointer_event(event)?;
        self.send(event)
    }

    /// Feed a key press by name (`"Escape"`, `"Enter"`, `"Backspace"`).
    /// Unknown keys are ignored.
    pub fn key_pressed(&mut self, key: &str) -> Option<Step> {
        let event = Event::from_key(key)?;
        self.send(event)
    }

    /// Move the pointer to `position`.
    pub fn move_to(&mut self, position: Point) -> Option<Step> {
        self.pointer_event(PointerEvent::Move { position })
    }

    /// Left-click at `position`.
    pub fn click(&mut self, position: Point) -> Option<Step> {
        self.pointer_event(PointerEvent::Down {
            position,
            button: MouseButton::Left,
        })
    }

    /// Dispatch an abstract event at the current pointer position.
    pub fn send(&mut self, event: Event) -> Option<Step> {
        let mut cx = ActionContext {
            pointer: self.input.pointer_position,
            history: &mut self.history,
            surface: &mut self.surface,
        };
        self.machine.handle(event, &mut cx)
    }

    /// Undo the last finished polyline. Returns `Ok(false)` if there was nothing to undo.
    pub fn undo(&mut self) -> SurfaceResult<bool> {
        self.history.undo(&mut self.surface)
    }

    /// Redo the last undone polyline. Returns `Ok(false)` if there was nothing to redo.
    pub fn redo(&mut self) -> SurfaceResult<bool> {
        self.history.redo(&mut self.surface)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    pub fn state(&self) -> State {
        self.machine.state()
    }

    pub fn machine(&self) -> &PolylineMachine {
        &self.machine
    }

    /// The polyline being drawn, for the temporary layer.
    pub fn preview(&self) -> Option<Polyline> {
        self.machine.preview()
    }

    pub fn pointer_position(&self) -> Point {
        self.input.pointer_position
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume the editor, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
