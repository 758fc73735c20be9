//! Main application entry point.

use clap::Parser;
use labelmark_app::{AppConfig, AppError, AppResult, Script, Session};
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a recorded annotation session and write it out as SVG.
#[derive(Debug, Parser)]
#[command(name = "labelmark", author, version, about, long_about = None)]
struct Args {
    /// Script of recorded actions (JSON)
    script: PathBuf,
    /// Config file; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output SVG file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn run(args: Args) -> AppResult<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let script = Script::load(&args.script)?;

    let mut session = Session::new(config);
    session.run(&script)?;
    let svg = session.render_svg()?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, svg)
                .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting LabelMark");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("labelmark: {e}");
            ExitCode::FAILURE
        }
    }
}
