//! Flagboard - feature flag console
//!
//! Terminal UI and listing command for browsing a feature flag catalog.

mod app;
mod cli;
mod keybindings;
mod mode;
mod views;
mod widgets;

use std::io;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use flagboard_core::{BoardConfig, FlagBoard, FlagCatalog};

use app::App;
use cli::{render_list, Cli, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging; stderr only, errors unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = BoardConfig::resolve(cli.config.as_deref())?;
    config.validate()?;
    let catalog = match &cli.catalog {
        Some(path) => FlagCatalog::load(path)?,
        None => config.load_catalog()?,
    };
    let bar_width = config.view.rollout_bar_width;
    tracing::debug!("Catalog has {} flags", catalog.len());

    match cli.command {
        Some(Command::List(args)) => {
            let query = args.to_query(config.initial_query())?;
            let board = FlagBoard::with_query(catalog, query);
            println!("{}", render_list(&board, bar_width, args.json)?);
            Ok(())
        }
        Some(Command::Tui) | None => {
            let board = FlagBoard::with_query(catalog, config.initial_query());
            run_tui(App::new(board, bar_width))
        }
    }
}

fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}
