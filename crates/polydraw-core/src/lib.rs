//! Polydraw Core Library
//!
//! Platform-agnostic polyline construction: an interaction state machine that
//! turns pointer and keyboard events into polyline edits, and a command-based
//! undo/redo history that is the only path for finished shapes to reach the
//! drawing surface.

pub mod command;
pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod machine;
pub mod points;
pub mod shapes;
pub mod surface;

pub use command::{AddShape, Command};
pub use config::{ConfigError, EditorConfig, MAX_POINTS, MIN_MAX_POINTS};
pub use editor::Editor;
pub use history::{HistoryState, UndoManager};
pub use input::{Event, InputState, MouseButton, PointerEvent};
pub use machine::{PolylineMachine, State, Step};
pub use points::PointSequence;
pub use shapes::{Polyline, ShapeId, ShapeStyle, ShapeTrait};
pub use surface::{Drawing, DrawingSurface, SurfaceError, SurfaceResult};
