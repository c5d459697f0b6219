use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use connect_x::config::AppConfig;
use connect_x::storage::{JsonGameRepository, SavedGame};
use connect_x::ui::App;

/// Play connect-N in the terminal.
#[derive(Parser)]
#[command(name = "connect-x", about = "Connect-N on rectangular or cylindrical boards")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Resume the saved game with this id
    #[arg(long)]
    load: Option<String>,

    /// Print saved games and exit
    #[arg(long)]
    list: bool,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let repository = JsonGameRepository::new(&config.storage.save_dir).with_context(|| {
        format!("opening save directory {}", config.storage.save_dir.display())
    })?;

    if cli.list {
        let games = repository.list().context("listing saved games")?;
        print_saved_games(&games);
        return Ok(());
    }

    let app = match &cli.load {
        Some(id) => {
            let saved = repository
                .load(id)
                .with_context(|| format!("loading saved game {id}"))?
                .with_context(|| format!("no saved game with id {id}"))?;
            App::resume(config, repository, saved)
                .with_context(|| format!("restoring saved game {id}"))?
        }
        None => App::new(config, repository).context("starting a new game")?,
    };

    run_tui(app).context("running terminal UI")
}

/// Logs go to a file so they never draw over the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn print_saved_games(games: &[SavedGame]) {
    if games.is_empty() {
        println!("No saved games.");
        return;
    }
    for saved in games {
        let snap = &saved.snapshot;
        let status = if !snap.is_over {
            format!("{} to move", snap.current_player_name)
        } else if let Some(winner) = &snap.winner_name {
            format!("{winner} won")
        } else {
            "draw".to_string()
        };
        println!(
            "{}  {} vs {}  {}x{} {} connect {}  {}",
            saved.id,
            snap.player1.name,
            snap.player2.name,
            snap.board_height,
            snap.board_width,
            snap.board_shape,
            snap.winning_length,
            status
        );
    }
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
