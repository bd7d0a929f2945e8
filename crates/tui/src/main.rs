mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    tracing::info!(log_file = %config.log_file, "fintrack_tui starting");

    let mut app = app::App::new(config)?;
    app.run().await?;

    tracing::info!("fintrack_tui stopped");
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fintrack_tui={level},engine={level},assistant={level}",
            level = config.level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
