//! Event scripts: a line-oriented recording of user input replayed against an editor.
//!
//! `key` accepts the editor keys (`Escape`, `Enter`, `Backspace`) and the
//! history chords from the shortcut registry (`Ctrl+Z`, `Ctrl+Shift+Z`, `Ctrl+Y`).
//!
//! ```text
//! # draw a triangle
//! click 0 0
//! move 50 0
//! click 50 0
//! click 25 40
//! enter
//! undo
//! ```

use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use kurbo::Point;
use polydraw_core::{DrawingSurface, Editor, Event};
use thiserror::Error;

/// One line of a script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Click(Point),
    Move(Point),
    /// Key press by name, e.g. `Escape`.
    Key(String),
    Undo,
    Redo,
}

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

fn syntax(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Syntax {
        line,
        message: message.into(),
    }
}

fn parse_point(line: usize, args: &[&str]) -> Result<Point, ScriptError> {
    let [x, y] = args else {
        return Err(syntax(line, format!("expected 2 coordinates, got {}", args.len())));
    };
    let coord = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| syntax(line, format!("invalid coordinate '{}'", s)))
    };
    Ok(Point::new(coord(*x)?, coord(*y)?))
}

/// Parse a script into commands paired with their 1-based line numbers.
pub fn parse(source: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let mut words = text.split_whitespace();
        let Some(verb) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        let command = match verb.to_ascii_lowercase().as_str() {
            "click" => ScriptCommand::Click(parse_point(line, &args)?),
            "move" => ScriptCommand::Move(parse_point(line, &args)?),
            "key" => match args.as_slice() {
                [name] => match ShortcutRegistry::lookup(name).map(|s| s.action) {
                    Some(ShortcutAction::Undo) => ScriptCommand::Undo,
                    Some(ShortcutAction::Redo) => ScriptCommand::Redo,
                    _ => ScriptCommand::Key((*name).to_string()),
                },
                _ => return Err(syntax(line, "expected a single key name")),
            },
            "escape" => ScriptCommand::Key("Escape".to_string()),
            "enter" => ScriptCommand::Key("Enter".to_string()),
            "backspace" => ScriptCommand::Key("Backspace".to_string()),
            "undo" => ScriptCommand::Undo,
            "redo" => ScriptCommand::Redo,
            other => return Err(syntax(line, format!("unknown command '{}'", other))),
        };
        if matches!(command, ScriptCommand::Undo | ScriptCommand::Redo) && !args.is_empty() {
            return Err(syntax(line, format!("'{}' takes no arguments", verb)));
        }
        commands.push((line, command));
    }
    Ok(commands)
}

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events that caused a transition.
    pub handled: usize,
    /// Events the state machine ignored in its current state.
    pub ignored: usize,
    /// Polylines finished and recorded.
    pub committed: usize,
    /// Polylines the surface refused.
    pub rejected: usize,
    pub undone: usize,
    pub redone: usize,
}

/// Feed every command to the editor in order.
pub fn replay<S: DrawingSurface>(
    editor: &mut Editor<S>,
    commands: &[(usize, ScriptCommand)],
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (line, command) in commands {
        let step = match command {
            ScriptCommand::Click(p) => editor.click(*p),
            ScriptCommand::Move(p) => editor.move_to(*p),
            ScriptCommand::Key(name) => {
                if Event::from_key(name).is_none() {
                    log::warn!("line {}: unknown key '{}'", line, name);
                }
                editor.key_pressed(name)
            }
            ScriptCommand::Undo => {
                match editor.undo() {
                    Ok(true) => summary.undone += 1,
                    Ok(false) => log::debug!("line {}: nothing to undo", line),
                    Err(e) => log::warn!("line {}: undo failed: {}", line, e),
                }
                continue;
            }
            ScriptCommand::Redo => {
                match editor.redo() {
                    Ok(true) => summary.redone += 1,
                    Ok(false) => log::debug!("line {}: nothing to redo", line),
                    Err(e) => log::warn!("line {}: redo failed: {}", line, e),
                }
                continue;
            }
        };

        let Some(step) = step else {
            summary.ignored += 1;
            continue;
        };
        summary.handled += 1;
        if let Some(id) = step.committed {
            log::info!("line {}: polyline {} finished", line, id);
            summary.committed += 1;
        }
        if let Some(e) = step.rejected {
            log::warn!("line {}: polyline rejected: {}", line, e);
            summary.rejected += 1;
        }
    }
    summary
}
