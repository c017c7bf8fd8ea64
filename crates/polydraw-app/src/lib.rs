//! Polydraw Application
//!
//! Command-line shell around the polydraw editor: replays recorded input
//! scripts and reports the resulting drawing and history.

mod app;
mod script;
mod shortcuts;

pub use app::{AppConfig, AppError, Report, load_config, run, run_source};
pub use script::{ReplaySummary, ScriptCommand, ScriptError, parse, replay};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
