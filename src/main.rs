//! triptally - a terminal trip-budget tracker.
//!
//! Expenses grouped by category, a per-trip budget, a day-by-day itinerary
//! and route segments, with currency conversion backed by a one-hour rate
//! cache. Works fully offline on cached data.

mod app;
mod config;
mod models;
mod rates;
mod store;
mod summary;
mod ui;
mod utils;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::stream::{self, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use config::Config;
use models::TripState;
use rates::{CachedRates, RateCache, RateClient};
use store::TripStore;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name in the data directory
const LOG_FILE: &str = "triptally.log";

/// Concurrent fetches for `--rates` with several base currencies
const MAX_CONCURRENT_RATE_FETCHES: usize = 4;

/// Initialize the tracing subscriber for logging.
///
/// The TUI owns the terminal, so logs go to a file in the data directory.
/// Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing(data_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--export" => {
                let path = args
                    .get(2)
                    .ok_or_else(|| anyhow!("--export requires a file path"))?;
                return export_trip(Path::new(path));
            }
            "--import" => {
                let path = args
                    .get(2)
                    .ok_or_else(|| anyhow!("--import requires a file path"))?;
                return import_trip(Path::new(path));
            }
            "--rates" => {
                return dump_rates(args[2..].to_vec()).await;
            }
            flag => {
                return Err(anyhow!(
                    "Unknown option {}. Supported: --export <path>, --import <path>, --rates [BASE...]",
                    flag
                ));
            }
        }
    }

    // Write a default config on first run so the file is discoverable
    if let Ok(false) = Config::exists() {
        let _ = Config::default().save();
    }

    // Initialize logging
    let config = Config::load().unwrap_or_default();
    let data_dir = config.data_dir().unwrap_or_else(|_| PathBuf::from("."));
    std::fs::create_dir_all(&data_dir)?;
    let _guard = init_tracing(&data_dir);
    info!("triptally starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and bring display amounts in line with the cached rates
    let mut app = App::new()?;
    app.refresh_display_amounts();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("triptally shutting down");
    Ok(())
}

/// Write the current trip to the given path as JSON
fn export_trip(path: &Path) -> Result<()> {
    let config = Config::load()?;
    let store = TripStore::new(config.data_dir()?)?;
    let trip = store
        .load()?
        .unwrap_or_else(|| TripState::new(&config.base_currency));

    store.export(&trip, path)?;
    eprintln!(
        "Exported trip ({} expenses, {} days) to {}",
        trip.expenses.len(),
        trip.days.len(),
        path.display()
    );
    Ok(())
}

/// Replace the current trip with the JSON document at the given path
fn import_trip(path: &Path) -> Result<()> {
    let config = Config::load()?;
    let store = TripStore::new(config.data_dir()?)?;

    let trip = store.import(path)?;
    eprintln!(
        "Imported trip: {} expenses, {} days, {} segments, base {}",
        trip.expenses.len(),
        trip.days.len(),
        trip.segments.len(),
        trip.base_currency
    );
    Ok(())
}

/// Print rate tables as JSON to stdout, one entry per base currency.
/// With no bases given, the configured base currency is used.
async fn dump_rates(bases: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let cache = RateCache::new(config.cache_dir()?)?;
    let client = RateClient::new()?;

    let bases = if bases.is_empty() {
        vec![config.base_currency.clone()]
    } else {
        bases
    };

    let results: Vec<(String, Result<CachedRates>)> = stream::iter(bases)
        .map(|base| {
            let client = client.clone();
            let cache = cache.clone();
            async move {
                let result = client.rates_for(&cache, &base).await;
                (base, result)
            }
        })
        .buffer_unordered(MAX_CONCURRENT_RATE_FETCHES)
        .collect()
        .await;

    let mut output = serde_json::Map::new();
    let mut failures = 0;
    for (base, result) in results {
        match result {
            Ok(cached) => {
                output.insert(
                    cached.base.clone(),
                    serde_json::json!({
                        "fetchedAt": cached.fetched_at,
                        "rates": cached.rates,
                    }),
                );
            }
            Err(e) => {
                failures += 1;
                eprintln!("Failed to fetch rates for {}: {}", base, e);
            }
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(output))?
    );

    if failures > 0 {
        return Err(anyhow!("{} rate fetches failed", failures));
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background rate fetches
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
