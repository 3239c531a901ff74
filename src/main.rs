// Entry point for the N-dimensional Minesweeper launcher
// Loads preferences, sets up logging, runs the setup screen and hands the result to the engine pipeline

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};

// Module declarations
mod nds_color;  // Terminal palette matching
mod nds_config; // Launcher preferences (TOML)
mod nds_dims;   // Axis extent editor
mod nds_engine; // Engine contract and bundled minefield engine
mod nds_error;  // Error types
mod nds_form;   // Launcher form state and launch assembly
mod nds_lang;   // Multi-language string resources
mod nds_mines;  // Mirrored mine count
mod nds_ui;     // Terminal UI rendering and event handling

use nds_config::{load_or_create_config, log_path, Config};
use nds_engine::MinefieldEngine;
use nds_lang::Lang;
use nds_ui::run as run_ui;

/// Route log records to a file.
/// stderr shares the tty the launcher draws on, so records are dropped when no file can be opened.
fn init_logging(cfg: &Config) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&cfg.log_level);
    builder.parse_default_env();
    let path = log_path(cfg);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let target: Box<dyn Write + Send> = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Box::new(file),
        Err(e) => {
            eprintln!("cannot open log file {}: {}", path.display(), e);
            Box::new(io::sink())
        }
    };
    builder.target(env_logger::Target::Pipe(target));
    if let Err(e) = builder.try_init() {
        eprintln!("logger already initialized: {}", e);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut cfg = load_or_create_config();
    init_logging(&cfg);

    let mut lang = Lang::new(&cfg.language);
    let engine = MinefieldEngine::new();

    let launched = run_ui(&mut cfg, &mut lang, &engine)?;

    // The launched configuration goes to stdout for whatever runs the game
    if let Some(game) = launched {
        log::info!("{} mines placed, launched at {}", game.mines.len(), game.launched_at);
        print!("{}", toml::to_string(&game.config)?);
    }
    Ok(())
}
