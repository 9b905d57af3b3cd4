//! tutodash: terminal dashboard for tutorial records over a REST backend.
//!
//! Base URL comes from `TUTODASH_API_BASE_URL` (`.env` supported), default
//! `/api`. Logs go to stderr via `RUST_LOG` so the alternate screen stays
//! clean.

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tutodash_core::{ApiConfig, Dashboard, HttpTutorialApi, TutorialApi};
use tutodash_tui::{app::App, ui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    let config = ApiConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "starting tutodash");
    let api: Arc<dyn TutorialApi> = Arc::new(HttpTutorialApi::new(&config));
    let mut app = App::new(Dashboard::new(api));
    rt.block_on(app.dashboard.load());

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let result = run(&mut terminal, &rt, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    rt: &tokio::runtime::Runtime,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(rt, key);
                }
            }
        }
    }
    Ok(())
}
