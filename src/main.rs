//! skyview - Current weather and a 5-day forecast in your terminal
//!
//! A terminal UI application that looks up a city (or a coordinate pair) on
//! OpenWeatherMap and shows current conditions alongside a daily forecast.

use std::io;
use std::panic;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use skyview::app::App;
use skyview::cli::{Cli, RunMode, StartupConfig};
use skyview::config::{self, Config};
use skyview::data::demo::demo_report;
use skyview::data::{LocationQuery, WeatherReport};
use skyview::display::render_text;
use skyview::logging;
use skyview::query::{LookupSource, QueryDispatcher};
use skyview::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Runs a single lookup and prints the result
async fn run_once(
    query: &LocationQuery,
    startup: &StartupConfig,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report: WeatherReport = if startup.demo {
        demo_report(&query.label(), Utc::now())
    } else {
        config.weather_client()?.lookup(query).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

/// Main event loop: dispatch queries, apply results, draw, handle keys
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &mut QueryDispatcher,
) -> io::Result<()> {
    loop {
        if let Some((generation, query)) = app.take_pending() {
            dispatcher.dispatch(generation, query);
        }
        while let Some(message) = dispatcher.try_recv() {
            app.apply(message);
        }

        terminal.draw(|f| ui::render(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn run_interactive(
    query: LocationQuery,
    startup: &StartupConfig,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = if startup.demo {
        LookupSource::Demo
    } else {
        LookupSource::Live(config.weather_client()?)
    };
    let mut dispatcher = QueryDispatcher::new(source);

    // Coordinates given on the command line double as the home location
    let home = match startup.query {
        Some(LocationQuery::Coordinates(coordinates)) => Some(coordinates),
        _ => config.home,
    };
    let mut app = App::new(home);
    app.submit(query);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut dispatcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!("Exiting");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let startup = StartupConfig::from_cli(&cli)?;

    match startup.mode {
        RunMode::Once { .. } => logging::init_stderr(startup.verbose)?,
        RunMode::Interactive => {
            // Without a data directory the TUI runs unlogged
            if let Some(dir) = config::log_dir() {
                let _ = logging::init_file(&dir, startup.verbose);
            }
        }
    }

    let config = Config::load(cli.config.as_deref())?.with_api_key(cli.api_key.clone());
    tracing::debug!(?config, "Configuration loaded");

    let query = startup.initial_query(&config);
    match startup.mode {
        RunMode::Once { json } => run_once(&query, &startup, &config, json).await,
        RunMode::Interactive => run_interactive(query, &startup, &config).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
