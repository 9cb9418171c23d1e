//! hud — a live cluster HUD for the terminal.
//!
//! Run with:  `RUST_LOG=info hud [path/to/hud.toml]`

mod http;
mod terminal;

use anyhow::{Context, Result};
use hud_core::{Metric, RenderTargets};
use hud_engine::{lifecycle, Engine};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("hud v{} starting", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(hud_config::default_path);
    let config = hud_config::load(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    let source = http::HttpSource::new(&config.source)?;
    let (handle, lifecycle) = lifecycle();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received; stopping");
                handle.terminate();
            }
            Err(e) => {
                tracing::warn!("Cannot listen for Ctrl-C: {e}");
                // Keep the handle alive; dropping it would stop polling.
                std::future::pending::<()>().await;
            }
        }
    });

    let targets = Metric::ALL
        .into_iter()
        .fold(RenderTargets::new(), |targets, metric| {
            targets.bind(metric, terminal::TerminalSparkline::new(48))
        });

    let state = Engine::new(source, lifecycle, &config.engine).run(targets).await;
    tracing::info!(cycles = state.cycles(), "hud exiting");
    Ok(())
}
