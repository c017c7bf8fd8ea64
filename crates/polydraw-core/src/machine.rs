//! Polyline construction state machine.
//!
//! Transitions are listed in [`TRANSITIONS`] and interpreted by
//! [`PolylineMachine::handle`]. Rows are tried in order; the first row whose
//! state and event match and whose guard passes is taken. Events with no
//! matching row are ignored.

use crate::command::AddShape;
use crate::config::EditorConfig;
use crate::history::UndoManager;
use crate::input::Event;
use crate::points::PointSequence;
use crate::shapes::{Polyline, ShapeId, ShapeStyle, ShapeTrait};
use crate::surface::{DrawingSurface, SurfaceError};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Construction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum State {
    /// No polyline under construction.
    #[default]
    Idle,
    /// One committed point plus the provisional point.
    OnePoint,
    /// Two or more committed points plus the provisional point.
    ManyPoints,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Idle => "idle",
            State::OnePoint => "onePoint",
            State::ManyPoints => "manyPoints",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    /// Another click keeps the committed count under the limit.
    CanAddPoint,
    /// Removing a point still leaves at least two committed points.
    MoreThanTwoPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CreateLine,
    AddPoint,
    SetLastPoint,
    Abandon,
    SaveLine,
    RemoveLastPoint,
}

#[derive(Debug)]
struct Transition {
    from: State,
    event: Event,
    guard: Option<Guard>,
    actions: &'static [Action],
    target: State,
}

const fn row(
    from: State,
    event: Event,
    guard: Option<Guard>,
    actions: &'static [Action],
    target: State,
) -> Transition {
    Transition {
        from,
        event,
        guard,
        actions,
        target,
    }
}

use Action::*;
use State::*;

const TRANSITIONS: &[Transition] = &[
    row(Idle, Event::Click, None, &[CreateLine], OnePoint),
    row(OnePoint, Event::Click, None, &[AddPoint], ManyPoints),
    row(OnePoint, Event::Move, None, &[SetLastPoint], OnePoint),
    row(OnePoint, Event::Escape, None, &[Abandon], Idle),
    row(ManyPoints, Event::Click, Some(Guard::CanAddPoint), &[AddPoint], ManyPoints),
    row(ManyPoints, Event::Click, None, &[AddPoint, SaveLine], Idle),
    row(ManyPoints, Event::Move, None, &[SetLastPoint], ManyPoints),
    row(ManyPoints, Event::Escape, None, &[Abandon], Idle),
    row(ManyPoints, Event::Enter, None, &[SaveLine], Idle),
    row(ManyPoints, Event::Backspace, Some(Guard::MoreThanTwoPoints), &[RemoveLastPoint], ManyPoints),
    row(ManyPoints, Event::Backspace, None, &[RemoveLastPoint], OnePoint),
];

/// What the machine needs from the editing session while running actions.
pub struct ActionContext<'a> {
    /// Pointer position at the time the event is handled.
    pub pointer: Point,
    /// History that receives finished polylines.
    pub history: &'a mut UndoManager,
    /// Surface the history's commands operate on.
    pub surface: &'a mut dyn DrawingSurface,
}

/// Outcome of a handled event.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub event: Event,
    pub from: State,
    pub to: State,
    /// Polyline finished and recorded in history during this step.
    pub committed: Option<ShapeId>,
    /// Surface refusal raised while finishing the polyline.
    pub rejected: Option<SurfaceError>,
}

/// Drives construction of a single polyline at a time.
#[derive(Debug, Clone)]
pub struct PolylineMachine {
    state: State,
    /// Polyline under construction; present in every state except `Idle`.
    line: Option<PointSequence>,
    max_points: usize,
    preview_style: ShapeStyle,
    final_style: ShapeStyle,
}

impl Default for PolylineMachine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl PolylineMachine {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: State::Idle,
            line: None,
            max_points: config.max_points,
            preview_style: config.preview_style.clone(),
            final_style: config.final_style.clone(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Points of the polyline under construction.
    pub fn points(&self) -> Option<&PointSequence> {
        self.line.as_ref()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// The polyline under construction, provisional point included, in the preview style.
    pub fn preview(&self) -> Option<Polyline> {
        self.line
            .as_ref()
            .map(|line| Polyline::new(line.all().to_vec(), self.preview_style.clone()))
    }

    /// Check whether `event` would be handled in the current state.
    pub fn accepts(&self, event: Event) -> bool {
        self.find(event).is_some()
    }

    /// Process one event to completion.
    ///
    /// Returns `None` when the event is not recognized in the current state;
    /// nothing changes in that case.
    pub fn handle(&mut self, event: Event, cx: &mut ActionContext<'_>) -> Option<Step> {
        let Some(transition) = self.find(event) else {
            log::trace!("polyline: {} ignored in {}", event, self.state);
            return None;
        };

        let mut step = Step {
            event,
            from: self.state,
            to: transition.target,
            committed: None,
            rejected: None,
        };
        for action in transition.actions {
            self.run(*action, cx, &mut step);
        }
        self.state = transition.target;
        if self.state == State::Idle {
            self.line = None;
        }

        log::debug!("polyline: {} --{}--> {}", step.from, event, step.to);
        Some(step)
    }

    fn find(&self, event: Event) -> Option<&'static Transition> {
        TRANSITIONS.iter().find(|t| {
            t.from == self.state
                && t.event == event
                && t.guard.is_none_or(|guard| self.check(guard))
        })
    }

    fn check(&self, guard: Guard) -> bool {
        let committed = self.line.as_ref().map_or(0, PointSequence::committed_len);
        match guard {
            Guard::CanAddPoint => committed + 1 < self.max_points,
            Guard::MoreThanTwoPoints => committed > 2,
        }
    }

    fn run(&mut self, action: Action, cx: &mut ActionContext<'_>, step: &mut Step) {
        match action {
            Action::CreateLine => {
                self.line = Some(PointSequence::start(cx.pointer));
            }
            Action::AddPoint => {
                if let Some(line) = self.line.as_mut() {
                    line.push(cx.pointer);
                }
            }
            Action::SetLastPoint => {
                if let Some(line) = self.line.as_mut() {
                    line.set_provisional(cx.pointer);
                }
            }
            Action::RemoveLastPoint => {
                if let Some(line) = self.line.as_mut() {
                    line.remove_last_committed();
                }
            }
            Action::Abandon => {
                self.line = None;
            }
            Action::SaveLine => {
                let Some(line) = self.line.take() else {
                    return;
                };
                let shape = Polyline::new(line.into_committed(), self.final_style.clone());
                let id = shape.id();
                match cx.history.execute(Box::new(AddShape::new(shape)), cx.surface) {
                    Ok(()) => step.committed = Some(id),
                    Err(e) => {
                        log::warn!("polyline discarded: {}", e);
                        step.rejected = Some(e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Drawing;

    struct Harness {
        machine: PolylineMachine,
        history: UndoManager,
        drawing: Drawing,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(EditorConfig::default())
        }

        fn with_config(config: EditorConfig) -> Self {
            Self {
                machine: PolylineMachine::new(&config),
                history: UndoManager::new(),
                drawing: Drawing::new(),
            }
        }

        fn send(&mut self, event: Event, x: f64, y: f64) -> Option<Step> {
            let mut cx = ActionContext {
                pointer: Point::new(x, y),
                history: &mut self.history,
                surface: &mut self.drawing,
            };
            self.machine.handle(event, &mut cx)
        }

        /// Move the pointer to (x, y) and click there.
        fn tap(&mut self, x: f64, y: f64) -> Option<Step> {
            self.send(Event::Move, x, y);
            self.send(Event::Click, x, y)
        }

        fn committed(&self) -> Vec<Point> {
            self.machine
                .points()
                .map(|p| p.committed().to_vec())
                .unwrap_or_default()
        }
    }

    #[test]
    fn test_starts_idle() {
        let machine = PolylineMachine::default();
        assert_eq!(machine.state(), State::Idle);
        assert!(machine.points().is_none());
        assert!(machine.preview().is_none());
        assert_eq!(machine.max_points(), 10);
    }

    #[test]
    fn test_first_click_creates_line() {
        let mut h = Harness::new();
        let step = h.send(Event::Click, 1.0, 2.0).unwrap();

        assert_eq!(step.from, State::Idle);
        assert_eq!(step.to, State::OnePoint);
        let points = h.machine.points().unwrap();
        assert_eq!(points.all(), &[Point::new(1.0, 2.0), Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_move_overwrites_provisional() {
        let mut h = Harness::new();
        h.send(Event::Click, 0.0, 0.0);
        h.send(Event::Move, 3.0, 3.0);
        h.send(Event::Move, 5.0, 5.0);

        assert_eq!(h.machine.state(), State::OnePoint);
        assert_eq!(h.committed(), vec![Point::ZERO]);
        assert_eq!(
            h.machine.points().unwrap().provisional(),
            Some(Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_ignored_events_change_nothing() {
        let mut h = Harness::new();
        assert!(h.send(Event::Move, 1.0, 1.0).is_none());
        assert!(h.send(Event::Enter, 1.0, 1.0).is_none());
        assert!(h.send(Event::Backspace, 1.0, 1.0).is_none());
        assert!(h.send(Event::Escape, 1.0, 1.0).is_none());
        assert_eq!(h.machine.state(), State::Idle);

        h.send(Event::Click, 0.0, 0.0);
        let before = h.machine.points().cloned();
        assert!(h.send(Event::Enter, 9.0, 9.0).is_none());
        assert!(h.send(Event::Backspace, 9.0, 9.0).is_none());
        assert_eq!(h.machine.state(), State::OnePoint);
        assert_eq!(h.machine.points().cloned(), before);
        assert!(h.drawing.is_empty());
    }

    #[test]
    fn test_each_click_commits_one_point() {
        let mut h = Harness::new();
        for clicks in 1..=9 {
            h.tap(clicks as f64, 0.0);
            let points = h.machine.points().unwrap();
            // Every click commits a vertex and leaves exactly one provisional point
            assert_eq!(points.committed_len(), clicks);
            assert_eq!(points.all().len(), clicks + 1);
            // Segments committed so far
            assert_eq!(points.committed_len() - 1, clicks - 1);
        }
        assert_eq!(h.machine.state(), State::ManyPoints);
    }

    #[test]
    fn test_escape_abandons_without_history() {
        let mut h = Harness::new();
        h.tap(0.0, 0.0);
        h.tap(5.0, 5.0);
        let step = h.send(Event::Escape, 0.0, 0.0).unwrap();

        assert_eq!(step.to, State::Idle);
        assert!(step.committed.is_none());
        assert!(h.machine.points().is_none());
        assert!(h.drawing.is_empty());
        assert!(!h.history.can_undo());

        h.tap(0.0, 0.0);
        assert_eq!(h.send(Event::Escape, 0.0, 0.0).unwrap().to, State::Idle);
        assert!(!h.history.can_undo());
    }

    #[test]
    fn test_enter_finalizes_committed_points() {
        let mut h = Harness::new();
        h.tap(0.0, 0.0);
        h.tap(5.0, 5.0);
        h.send(Event::Move, 8.0, 1.0);
        let step = h.send(Event::Enter, 8.0, 1.0).unwrap();

        assert_eq!(step.to, State::Idle);
        let id = step.committed.unwrap();
        let shape = h.drawing.get(id).unwrap();
        assert_eq!(shape.points(), &[Point::ZERO, Point::new(5.0, 5.0)]);
        assert_eq!(shape.style, ShapeStyle::finished());
        assert_eq!(h.history.undo_depth(), 1);
        assert!(h.machine.points().is_none());
    }

    #[test]
    fn test_backspace_boundary_returns_to_one_point() {
        let mut h = Harness::new();
        h.tap(0.0, 0.0);
        h.tap(1.0, 0.0);
        h.send(Event::Move, 7.0, 7.0);
        assert_eq!(h.committed().len(), 2);

        let step = h.send(Event::Backspace, 7.0, 7.0).unwrap();
        assert_eq!(step.to, State::OnePoint);
        assert_eq!(h.committed(), vec![Point::ZERO]);
        assert_eq!(
            h.machine.points().unwrap().provisional(),
            Some(Point::new(7.0, 7.0))
        );
    }

    #[test]
    fn test_backspace_above_boundary_stays() {
        let mut h = Harness::new();
        h.tap(0.0, 0.0);
        h.tap(1.0, 0.0);
        h.tap(2.0, 0.0);
        assert_eq!(h.committed().len(), 3);

        let step = h.send(Event::Backspace, 2.0, 0.0).unwrap();
        assert_eq!(step.to, State::ManyPoints);
        assert_eq!(h.committed(), vec![Point::ZERO, Point::new(1.0, 0.0)]);

        let step = h.send(Event::Backspace, 2.0, 0.0).unwrap();
        assert_eq!(step.to, State::OnePoint);
        assert_eq!(h.committed(), vec![Point::ZERO]);
    }

    #[test]
    fn test_last_click_adds_and_finalizes() {
        let mut h = Harness::new();
        for i in 0..9 {
            let step = h.tap(i as f64, 0.0).unwrap();
            assert!(step.committed.is_none());
        }
        assert_eq!(h.machine.state(), State::ManyPoints);
        assert_eq!(h.committed().len(), 9);

        let step = h.tap(9.0, 0.0).unwrap();
        assert_eq!(step.event, Event::Click);
        assert_eq!(step.from, State::ManyPoints);
        assert_eq!(step.to, State::Idle);

        let shape = h.drawing.get(step.committed.unwrap()).unwrap();
        assert_eq!(shape.len(), 10);
        assert_eq!(shape.points()[9], Point::new(9.0, 0.0));
        assert!(h.machine.points().is_none());
        assert_eq!(h.history.undo_depth(), 1);
    }

    #[test]
    fn test_custom_max_points() {
        let config = EditorConfig {
            max_points: 3,
            ..EditorConfig::default()
        };
        let mut h = Harness::with_config(config);
        h.tap(0.0, 0.0);
        h.tap(1.0, 0.0);
        assert_eq!(h.machine.state(), State::ManyPoints);

        let step = h.tap(2.0, 0.0).unwrap();
        assert_eq!(step.to, State::Idle);
        assert_eq!(h.drawing.get(step.committed.unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn test_rejected_save_returns_to_idle() {
        let mut h = Harness::new();
        h.drawing = Drawing::with_capacity(0);
        h.tap(0.0, 0.0);
        h.tap(5.0, 5.0);

        let step = h.send(Event::Enter, 5.0, 5.0).unwrap();
        assert_eq!(step.to, State::Idle);
        assert!(step.committed.is_none());
        assert_eq!(step.rejected, Some(SurfaceError::Full(0)));
        assert!(!h.history.can_undo());
        assert!(h.machine.points().is_none());
    }

    #[test]
    fn test_preview_includes_provisional() {
        let mut h = Harness::new();
        h.tap(0.0, 0.0);
        h.send(Event::Move, 4.0, 4.0);

        let preview = h.machine.preview().unwrap();
        assert_eq!(preview.points(), &[Point::ZERO, Point::new(4.0, 4.0)]);
        assert_eq!(preview.style, ShapeStyle::preview());
    }

    #[test]
    fn test_accepts() {
        let mut h = Harness::new();
        assert!(h.machine.accepts(Event::Click));
        assert!(!h.machine.accepts(Event::Enter));
        h.tap(0.0, 0.0);
        h.tap(1.0, 1.0);
        assert!(h.machine.accepts(Event::Enter));
        assert!(h.machine.accepts(Event::Backspace));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::ManyPoints.to_string(), "manyPoints");
    }
}
