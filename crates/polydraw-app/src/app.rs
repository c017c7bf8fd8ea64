//! Application run: load settings, replay a script, report the result.

use crate::script::{self, ReplaySummary, ScriptError};
use polydraw_core::{ConfigError, Drawing, Editor, EditorConfig, HistoryState};
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("Failed to serialize drawing: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where to read input from.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Script file; stdin when absent.
    pub script: Option<PathBuf>,
    /// JSON editor configuration; defaults when absent.
    pub config: Option<PathBuf>,
}

/// Result of a run.
#[derive(Debug)]
pub struct Report {
    pub summary: ReplaySummary,
    pub history: HistoryState,
    pub drawing: Drawing,
}

impl Report {
    /// Pretty JSON of the final drawing.
    pub fn drawing_json(&self) -> Result<String, AppError> {
        Ok(self.drawing.to_json()?)
    }
}

/// Load the editor configuration named by `config`, or the defaults.
pub fn load_config(config: &AppConfig) -> Result<EditorConfig, AppError> {
    match &config.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            Ok(EditorConfig::load(path)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn read_script(config: &AppConfig) -> Result<String, ScriptError> {
    match &config.script {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Replay `source` against a fresh editor.
pub fn run_source(source: &str, editor_config: &EditorConfig) -> Result<Report, AppError> {
    let commands = script::parse(source)?;
    let mut editor = Editor::with_config(editor_config);
    let summary = script::replay(&mut editor, &commands);
    log::info!(
        "Replayed {} commands: {} finished, {} rejected, {} ignored",
        commands.len(),
        summary.committed,
        summary.rejected,
        summary.ignored
    );
    if let Some(preview) = editor.preview() {
        log::info!("Unfinished polyline with {} points discarded", preview.len());
    }
    let history = editor.history_state();
    Ok(Report {
        summary,
        history,
        drawing: editor.into_surface(),
    })
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<Report, AppError> {
    let editor_config = load_config(config)?;
    let source = read_script(config)?;
    run_source(&source, &editor_config)
}
