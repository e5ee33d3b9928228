// Main entry point - Dependency injection and the UI loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::ops::ControlFlow;
use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing_subscriber::EnvFilter;

use crate::application::ingestion_service::IngestionService;
use crate::application::polling_service::PollingService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::sheet_source::SheetSource;
use crate::presentation::commands::parse_command;
use crate::presentation::console::render;
use crate::presentation::dashboard_state::{DashboardState, Theme};
use crate::presentation::handlers::{handle_command, handle_tick};

// Single UI task; fetches are spawned onto the same thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the dashboard frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create source (infrastructure layer)
    let source = Arc::new(SheetSource::new(
        app_config.source.url.clone(),
        app_config.source.request_timeout(),
    )?);
    tracing::info!(
        "Polling {} every {}s",
        source.url(),
        app_config.source.refresh_interval_secs
    );

    // Create services (application layer)
    let ingestion = IngestionService::new(source, app_config.ingestion.required_channels.clone());
    let (mut polling, mut completions) =
        PollingService::new(ingestion, app_config.source.refresh_interval());

    // Create local UI state (presentation layer)
    let mut dashboard = DashboardState::new(Theme::from_dark_mode(app_config.display.dark_mode));

    let mut ticks = polling.ticks();
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let mut stdin_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(_) = ticks.next() => {
                if let Some(frame) = handle_tick(&mut polling, &mut dashboard) {
                    println!("{}", frame);
                }
            }
            Some(completion) = completions.recv() => {
                polling.apply(completion);
                dashboard.update(polling.snapshot());
                println!("{}", render(&dashboard));
            }
            line = lines.next(), if stdin_open => match line {
                Some(Ok(line)) => match parse_command(&line) {
                    Ok(Some(command)) => match handle_command(command, &mut polling, &mut dashboard) {
                        ControlFlow::Continue(output) => println!("{}", output),
                        ControlFlow::Break(()) => break,
                    },
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                },
                Some(Err(e)) => {
                    tracing::warn!("Stopped reading commands: {}", e);
                    stdin_open = false;
                }
                None => {
                    tracing::debug!("stdin closed; polling continues");
                    stdin_open = false;
                }
            },
            _ = &mut shutdown => break,
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
