//! Quizdesk - a terminal admin console for the quiz and try-out platform.
//!
//! Administrators sign in, then manage subjects, chapters, chapter quizzes,
//! try-out packages, students and info banners from the keyboard.

mod app;
mod form;
mod ui;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quizdesk_core::routes::{History, LOGIN_PATH};
use quizdesk_core::{Config, SessionProvider};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE: &str = "quizdesk.log";

const USAGE: &str = "\
Usage: quizdesk [OPTION]

Without options, starts the admin console.

Options:
  --login     Sign in from the terminal and store the session
  --logout    Forget the stored session
  --whoami    Print the signed-in account as JSON
  --help      Show this message";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so events go to a file in the data
/// directory. Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing() -> Result<WorkerGuard> {
    let log_dir = Config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}

/// Exit status for a wrong command-line option.
const USAGE_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let command = std::env::args().nth(1);
    if matches!(command.as_deref(), Some("--help") | Some("-h")) {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    // Initialize logging; keep the guard so buffered lines are flushed on exit
    let _log_guard = init_tracing()?;
    info!("quizdesk starting");

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    let tokens = config.token_store()?;
    let history = Arc::new(History::new(LOGIN_PATH));
    let session = Arc::new(SessionProvider::new(
        &Config::api_base_url()?,
        tokens,
        history.clone(),
    )?);

    match command.as_deref() {
        None => {}
        Some("--login") => return login_from_terminal(&session, config).await,
        Some("--logout") => {
            session.logout();
            println!("Logged out.");
            return Ok(ExitCode::SUCCESS);
        }
        Some("--whoami") => return print_identity(&session).await,
        Some(other) => {
            warn!(option = other, "Unknown command-line option");
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            return Ok(ExitCode::from(USAGE_EXIT_CODE));
        }
    }

    // Resolve the stored token, if any, in the background
    let _watcher = session.spawn_identity_watcher();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, session, history);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("quizdesk shutting down");
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(error = %e, "Console stopped on an error");
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `--login`: prompt for credentials and store the session token.
async fn login_from_terminal(session: &SessionProvider, mut config: Config) -> Result<ExitCode> {
    let default_email = std::env::var("QUIZDESK_EMAIL")
        .ok()
        .or_else(|| config.last_email.clone());

    match &default_email {
        Some(email) => print!("Email [{}]: ", email),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let email = match input.trim() {
        "" => default_email.context("Email is required")?,
        typed => typed.to_string(),
    };

    let password = match std::env::var("QUIZDESK_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => rpassword::prompt_password("Password: ")?,
    };

    match session.login(&email, &password).await {
        Ok(user) => {
            config.last_email = Some(user.email.clone());
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to save config");
            }
            println!("Logged in as {} <{}>", user.display_name(), user.email);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(error = %e, "Terminal login failed");
            eprintln!("Login failed: {}", e.message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `--whoami`: resolve the stored token against the backend.
async fn print_identity(session: &SessionProvider) -> Result<ExitCode> {
    if !session.is_authenticated() {
        eprintln!("Not logged in. Run `quizdesk --login` first.");
        return Ok(ExitCode::FAILURE);
    }

    match session.resolve_identity().await {
        Some(user) => {
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("The stored session was rejected. Run `quizdesk --login` again.");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Guard the current location before drawing it
        app.sync_route();

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

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
