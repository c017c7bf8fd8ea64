//! Main application entry point.

use clap::Parser;
use polydraw_app::{AppConfig, ShortcutRegistry};
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a polyline input script and print the resulting drawing.
#[derive(Debug, Parser)]
#[command(name = "polydraw", version, about)]
struct Cli {
    /// Script file to replay (reads stdin when omitted).
    script: Option<PathBuf>,

    /// JSON editor configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every state transition.
    #[arg(short, long)]
    verbose: bool,

    /// List keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.shortcuts {
        ShortcutRegistry::print_all();
        return ExitCode::SUCCESS;
    }

    log::info!("Starting polydraw");
    let config = AppConfig {
        script: cli.script,
        config: cli.config,
    };

    let result = polydraw_app::run(&config).and_then(|report| {
        let json = report.drawing_json()?;
        println!("{}", json);
        println!(
            "history: can_undo={} can_redo={} undo_depth={} redo_depth={}",
            report.history.can_undo,
            report.history.can_redo,
            report.history.undo_depth,
            report.history.redo_depth
        );
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
