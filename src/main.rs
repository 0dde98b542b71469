//! Binary entry point for the pulse dashboard.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulse::api::{snapshot_fetcher, DashboardClient, DEFAULT_BASE_URL};
use pulse::app::{App, FetcherFactory};
use pulse::demo::demo_fetcher;
use pulse::refresh::AutoRefresh;
use pulse::state::HeaderContext;
use pulse::terminal::{enter_tui_mode, install_panic_hook, leave_tui_mode};
use pulse::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default refresh interval: 5 minutes, matching the backend's cadence.
const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Command-line options.
struct Options {
    endpoint: String,
    interval: Duration,
    demo: bool,
}

fn parse_options() -> Options {
    let args: Vec<String> = std::env::args().collect();

    let value_of = |flag: &str| -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let endpoint = value_of("--endpoint")
        .or_else(|| std::env::var("PULSE_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let interval_secs = value_of("--interval")
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    Options {
        endpoint,
        interval: Duration::from_secs(interval_secs),
        demo: args.iter().any(|a| a == "--demo"),
    }
}

/// Send tracing output to a log file so the TUI stays clean.
fn init_logging() {
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("pulse.log")
    else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --version before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("pulse {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    init_logging();

    let options = parse_options();
    let context = HeaderContext::new();
    let initial_token = context.time_filter.clone();

    let factory: FetcherFactory = if options.demo {
        info!("starting in demo mode");
        Box::new(demo_fetcher)
    } else {
        let client = Arc::new(DashboardClient::with_base_url(options.endpoint.clone()));
        match client.health_check().await {
            Ok(true) => info!(endpoint = %options.endpoint, "backend healthy"),
            Ok(false) => warn!(endpoint = %options.endpoint, "backend health check failed"),
            Err(e) => warn!(endpoint = %options.endpoint, error = %e, "backend unreachable"),
        }
        Box::new(move |token| snapshot_fetcher(Arc::clone(&client), token))
    };

    let engine = AutoRefresh::new(factory(initial_token.clone()), options.interval, vec![initial_token]);
    let mut app = App::new(engine, factory);
    app.context = context;

    // TUI session: set up, run, always restore
    install_panic_hook();
    let mut stdout = io::stdout();
    enter_tui_mode(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    leave_tui_mode(&mut io::stdout());
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        // Re-derive the frame from the engine's latest state; new categories
        // default to collapsed before anything is drawn
        let state = app.refresh_state();
        if let Some(snapshot) = &state.data {
            app.sync_with_snapshot(snapshot);
        }

        terminal.draw(|f| ui::render(f, app, &state))?;
        app.needs_redraw = false;

        // Redraw at a steady cadence so background refreshes show up even
        // without keyboard activity
        let tick = tokio::time::sleep(Duration::from_millis(250));

        tokio::select! {
            _ = tick => {}

            event_result = event_stream.next() => {
                if let Some(Ok(event)) = event_result {
                    match event {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            let snapshot = state.data.clone().unwrap_or_default();
                            app.handle_key(key, &snapshot);
                        }
                        Event::Resize(_, _) => app.mark_dirty(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
