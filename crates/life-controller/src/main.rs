//! Terminal controller for the Game of Life engine.

mod command;
mod controller;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use command::Command;
use controller::{Controller, Flow};
use life_core::AppConfig;
use life_world::Simulation;
use render::{Renderer, TerminalRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = load_config()?;

    // Initialize telemetry
    telemetry::init_telemetry(&config.telemetry)?;

    info!(
        rows = config.grid.rows,
        columns = config.grid.columns,
        interval_ms = config.controller.interval_ms,
        "Starting life controller"
    );

    let simulation = Simulation::new(&config.grid, &config.simulation)?;
    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer);
    let mut controller = Controller::new(simulation, renderer.clone(), config.controller.clone());

    controller.show();
    renderer.message("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let outcome = match line.parse::<Command>() {
                    Ok(command) => controller.handle(command).await,
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) if e.is_recoverable() => {
                        warn!(error = %e, input = %line, "Command rejected");
                        renderer.message(&e.to_string());
                    }
                    Err(e) => {
                        error!(error = %e, "Command failed");
                        renderer.message(&e.to_string());
                    }
                }
            }
            _ = &mut shutdown => break,
        }
    }

    controller.stop().await;
    info!(generation = controller.generation(), "Shutting down life controller");

    Ok(())
}

/// Config path: first CLI argument, then `LIFE_CONFIG`, otherwise built-in defaults
fn load_config() -> Result<AppConfig> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("LIFE_CONFIG").map(PathBuf::from));

    match path {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
