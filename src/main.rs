//! Signflow TUI - terminal sign-in and sign-up screens
//!
//! A Ratatui-based client that validates credentials locally and emits
//! them to an identity service.

mod app;
mod config;
mod identity;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use identity::ConsoleIdentityService;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// File name inside [`TuiConfig::log_dir`]
const LOG_FILE: &str = "signflow-tui.log";

/// Route logs to a file; the terminal belongs to the TUI
///
/// Without a home directory there is nowhere to write, so logging stays off.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = TuiConfig::log_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signflow_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Flushes buffered log lines when dropped
    let log_guard = init_logging()?;

    let config = TuiConfig::load()?;
    let identity = match config.simulated_latency() {
        Some(latency) => ConsoleIdentityService::new(latency),
        None => ConsoleIdentityService::default(),
    };
    let mut app = App::new(config, Arc::new(identity))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "exiting after error");
        drop(log_guard);
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    // Faster polling while a submission is in flight so its outcome shows promptly
    const IDLE_POLL: Duration = Duration::from_millis(100);
    const BUSY_POLL: Duration = Duration::from_millis(16);

    loop {
        // Apply handler outcomes before drawing
        app.poll_submissions();

        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll_duration = if app.form().status().is_submitting() {
            BUSY_POLL
        } else {
            IDLE_POLL
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                app.handle_key(key)?;
            }
        }

        // Let spawned submissions make progress
        tokio::task::yield_now().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
