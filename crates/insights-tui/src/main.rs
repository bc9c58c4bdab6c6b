mod app;
mod handler;
mod tui;
mod ui;

use std::fs::{self, File};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use insights_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use tui::{EventHandler, Tui};

/// Send logs to `insights.log` next to the config; the terminal belongs to the UI.
fn init_logging() -> Result<()> {
    let Ok(dir) = Config::config_dir() else {
        return Ok(());
    };
    if fs::create_dir_all(&dir).is_err() {
        return Ok(());
    }
    let Ok(file) = File::options().create(true).append(true).open(dir.join("insights.log")) else {
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = Config::load_or_default();
    info!(
        recent_limit = config.recent_limit,
        preview_chars = config.preview_chars,
        weekly_window_days = config.weekly_window_days,
        tick_rate_ms = config.tick_rate_ms,
        "starting customer insights"
    );

    let mut app = App::new(&config);
    app.refresh_dashboard();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(Duration::from_millis(config.tick_rate_ms.max(50)));

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    app.log_session();
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
