mod app;
mod config;
mod domain;
mod models;
mod services;
mod store;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::AppState;
use crate::config::{Cli, Config};
use crate::store::ProjectStore;

const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init(&cli)?;
    init_tracing(&config)?;
    info!(actor = %config.actor, steps = ?config.steps, "starting status panel");

    let store = if config.fixtures {
        ProjectStore::with_fixtures(config.steps.clone())
    } else {
        ProjectStore::new(config.steps.clone())
    };

    let mut app_state = AppState::new(&config, store);
    if let Some(project_id) = cli.project {
        app_state.open_detail(project_id);
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        tracing::error!(error = %err, "status panel stopped");
        println!("Error: {}", err);
    }

    info!("status panel closed");

    Ok(())
}

// The alternate screen owns stdout, so logs go to a file.
fn init_tracing(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| app_state.render(f))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                if app_state.handle_key(key.code) {
                    break;
                }
            }
        }

        app_state.tick();
    }

    Ok(())
}
