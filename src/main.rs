// sievetty: Step-by-Step Sieve of Eratosthenes in the Terminal

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use sievetty::config::{
    SieveConfig, DEFAULT_LIMIT, DEFAULT_SPEED, MAX_LIMIT, MAX_SPEED, MIN_LIMIT, MIN_SPEED,
};
use sievetty::ui::App;

/// Animate the Sieve of Eratosthenes one step at a time.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Upper bound N of the sieve.
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "N",
        default_value_t = DEFAULT_LIMIT as u64,
        value_parser = clap::value_parser!(u64).range(MIN_LIMIT as u64..=MAX_LIMIT as u64)
    )]
    limit: u64,
    /// Auto-play speed level; higher is faster.
    #[arg(
        short = 's',
        long = "speed",
        value_name = "LEVEL",
        default_value_t = DEFAULT_SPEED,
        value_parser = clap::value_parser!(u8).range(MIN_SPEED as i64..=MAX_SPEED as i64)
    )]
    speed: u8,
    /// Write a text dump of every frame into this directory.
    #[arg(long = "record", value_name = "DIR")]
    record: Option<PathBuf>,
    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Install a file-backed tracing subscriber; the TUI owns stdout
fn init_logging(path: &Path) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("invalid log file path: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sievetty=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(guard)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let _log_guard = match &args.log_file {
        Some(path) => Some(init_logging(path)?),
        None => None,
    };

    let config = SieveConfig::new(args.limit as usize, args.speed, args.record);
    tracing::info!(
        limit = config.limit,
        speed = config.speed,
        recording = config.record_dir.is_some(),
        "starting visualizer"
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(&config);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        tracing::error!(error = %err, "event loop failed");
    }

    Ok(())
}
