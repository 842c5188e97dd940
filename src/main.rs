//! Naraddon consult - terminal intake for consultation requests
//!
//! A Ratatui-based TUI that walks a visitor through the three-step
//! consultation form and submits it to the Naraddon intake endpoint.

mod app;
mod config;
mod intake;
mod platform;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::ConsultConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConsultConfig::load()
        .context("failed to read config file")?
        .with_env()?
        .resolve()?;

    init_logging(config.log_file.as_deref())?;
    tracing::info!(endpoint = %config.endpoint, "starting consultation intake");

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Unmount the form before tearing the terminal down
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to `log_file`. Without one, logging stays off unless `RUST_LOG` asks
/// for it, since stderr shares the terminal with the UI.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_directive = if log_file.is_some() {
        "naraddon_consult=info"
    } else {
        "off"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.terminal_size = Some((term_size.height, term_size.width));

        // Apply submission results and the auto-reset timer
        app.poll_form();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while the countdown animates (~30fps)
        let poll_duration = if app.is_counting_down() {
            Duration::from_millis(33)
        } else {
            Duration::from_millis(100)
        };

        // crossterm polling blocks this thread; let spawned tasks run first
        tokio::task::yield_now().await;

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse)?;
                }
                Event::Resize(_width, _height) => {
                    // Layout is recomputed on the next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
