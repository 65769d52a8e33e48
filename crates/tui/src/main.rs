//! calc - terminal keypad calculator
//!
//! Usage:
//!   calc                          # Start with a throwaway session
//!   calc --show-history           # Open with the history pane visible
//!   calc --session-file calc.json # Keep history in a fixed file
//!   calc --log-file calc.log      # Write tracing output to a file
//!
//! Keys:
//!   0-9 + - * / .    # Input
//!   Enter or =       # Evaluate
//!   Backspace        # Delete last character
//!   c / Delete       # Clear input / clear everything
//!   h                # Toggle history
//!   q, Esc, Ctrl+C   # Quit

use calc_tui::config::AppConfig;
use clap::Parser as ClapParser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "calc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal keypad calculator", long_about = None)]
struct Args {
    /// Session file holding history (a temp file removed at exit if not specified)
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show the history pane on startup
    #[arg(long)]
    show_history: bool,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = start(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn start(args: Args) -> Result<(), String> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(path) = args.session_file {
        config = config.session_file(path);
    }
    if args.show_history {
        config = config.show_history(true);
    }

    calc_tui::run(config)
}

/// Log to a file; stderr would corrupt the alternate screen
fn init_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create log file '{}': {}", path.display(), e))?;

    let mut filter = EnvFilter::from_default_env();
    for directive in ["calc_core=info", "calc_tui=info"] {
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| format!("Invalid log directive '{}': {}", directive, e))?,
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
