//! Prints the resolved device identity of this machine as JSON.
//!
//! Usage: `apptools [config.toml]`

use std::path::PathBuf;

use anyhow::Context;
use apptools::bootstrap::{config::load_config, tracing::init_tracing_subscriber, wiring};
use apptools::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(PathBuf::from(path))?,
        None => AppConfig::default(),
    };
    init_tracing_subscriber(&config)?;

    let device_info = wiring::build_default_device_info(&config)?;
    let identity = device_info
        .get()
        .await
        .context("Failed to resolve device identity")?;

    println!("{}", serde_json::to_string_pretty(identity)?);
    Ok(())
}
