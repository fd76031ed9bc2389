//! Bootstrap: configuration, tracing, and adapter wiring.
//!
//! Call order for hosts:
//! 1. `config::load_config` (or `AppConfig::default()`)
//! 2. `tracing::init_tracing_subscriber`
//! 3. `wiring::build_device_info` with the platform's identity source

pub mod config;
pub mod tracing;
pub mod wiring;
