use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::ai::{build_agent, OpponentKind};
use connect_four::config::AppConfig;
use connect_four::game::{GameState, Player};
use connect_four::session::TextSession;
use connect_four::ui::App;

/// Play Connect Four against the computer.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Opponent to play against
    #[arg(long, value_enum)]
    opponent: Option<OpponentKind>,

    /// Side you play: x (moves first by default) or o
    #[arg(long, value_parser = parse_player)]
    human: Option<Player>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Plain text prompt on stdin/stdout instead of the terminal UI
    #[arg(long)]
    plain: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_player(s: &str) -> Result<Player, String> {
    let mut chars = s.chars();
    match (chars.next().and_then(Player::from_symbol), chars.next()) {
        (Some(player), None) => Ok(player),
        _ => Err(format!("expected 'x' or 'o', got '{s}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(opponent) = cli.opponent {
        config.game.opponent = opponent;
    }
    if let Some(human) = cli.human {
        config.game.human = human;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;

    // stderr output would scribble over the TUI's alternate screen
    connect_four::logging::init(&config.logging, cli.plain).context("initialising logging")?;

    let state = GameState::new(config.board.width, config.board.height, config.game.first)
        .context("creating board")?;
    let agent = build_agent(config.game.opponent, config.game.seed);

    if cli.plain {
        let stdin = io::stdin();
        let mut session =
            TextSession::new(state, config.game.human, agent, stdin.lock(), io::stdout());
        session.run().context("text session")?;
        return Ok(());
    }

    run_tui(App::new(state, config.game.human, agent)).context("terminal UI")?;
    Ok(())
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
