//! Deedwright - fill in legal documents from the terminal
//!
//! A Ratatui-based wizard that collects document details step by step and
//! turns them into a PDF through the document generation API.

mod api;
mod app;
mod config;
mod document;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::{AppConfig, ConfigOverrides};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use document::DocumentKind;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(
    name = "deedwright",
    about = "Fill in legal documents step by step and generate PDFs",
    version
)]
struct Cli {
    /// Base URL of the document generation API
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds to wait for a generated PDF
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory saved PDFs are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Open a document form directly (e.g. nda, land-sale-deed)
    #[arg(long)]
    document: Option<DocumentKind>,

    /// Save the effective configuration and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base_url: self.api_url.clone(),
            request_timeout_secs: self.timeout,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "deedwright=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    let log_file = AppConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::load()?
        .with_env()
        .with_overrides(cli.overrides());

    if cli.write_config {
        match config.save()? {
            Some(path) => println!("Wrote {}", path.display()),
            None => eprintln!("No configuration directory available"),
        }
        return Ok(());
    }

    let mut app = App::new(config)?;
    if let Some(kind) = cli.document {
        app.open_document(kind);
    }

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
        tracing::error!("Exited with error: {err:?}");
        eprintln!("Error: {err:?}");
        // exit skips destructors; release any open preview first
        drop(app);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.quit();
                    return Ok(());
                }
                app.handle_key(key)?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let the submission task make progress between frames
        tokio::task::yield_now().await;
    }
}
