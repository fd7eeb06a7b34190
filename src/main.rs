mod action;
mod app;
mod browser;
mod config;
mod dataset;
mod error;
mod event;
mod search;
mod selection;
mod tui;
mod types;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::{App, Screen};
use crate::config::Config;
use crate::event::Event;
use crate::search::GitHubSearch;
use crate::tui::EventHandler;

#[derive(Debug, Parser)]
#[command(name = "starboard", version, about)]
struct Cli {
    /// JSON file with the issues shown on the triage screen
    #[arg(long, value_name = "PATH")]
    issues: Option<PathBuf>,

    /// Only list repositories with more stars than this
    #[arg(long, value_name = "N")]
    min_stars: Option<u64>,

    /// Screen shown at startup
    #[arg(long, value_enum, default_value_t = Screen::Explore)]
    screen: Screen,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    // Load the dataset before touching the terminal so errors print normally
    let records = match cli.issues.as_ref().or(config.triage.issues.as_ref()) {
        Some(path) => dataset::load(path)?,
        None => dataset::bundled()?,
    };
    let min_stars = cli.min_stars.unwrap_or(config.search.min_stars);
    let source = GitHubSearch::new(config.search.endpoint.clone())?;
    info!(records = records.len(), min_stars, "starting");

    tui::install_panic_hook();

    let result = run(Arc::new(source), records, min_stars, cli.screen).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(
    source: Arc<GitHubSearch>,
    records: Vec<types::Record>,
    min_stars: u64,
    screen: Screen,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut app = App::new(source, records, min_stars, screen, action_tx.clone());

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
