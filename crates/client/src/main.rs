//! Live battle client binary.
//!
//! Composition root that assembles:
//! 1. Configuration from the environment (and an optional `.env` file)
//! 2. File logging
//! 3. The battle runtime via [`runtime::RuntimeBuilder`]
//! 4. A line-oriented terminal front end that walks the screen graph
//!
//! ```bash
//! BATTLE_SEED=42 RUST_LOG=debug cargo run -p battle-client
//! ```

mod app;
mod command;
mod config;
mod logging;
mod navigation;
mod render;

use anyhow::Result;
use runtime::Runtime;

use crate::app::App;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!(target: "client::app", seed = ?config.runtime.seed, "starting battle client");

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .build()
        .await?;

    App::new(runtime.handle()).run().await?;

    runtime.shutdown().await?;
    tracing::info!(target: "client::app", "client shutdown complete");
    Ok(())
}
