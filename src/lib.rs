//! Stock Data Tools
//!
//! Read-only batch utilities over the DuckDB stock store: A-share universe
//! export, table schema verification against field catalogs, table
//! overview, and a runner for the project's test scripts.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod harness;
pub mod services;

use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. Log lines go to
/// stderr so stdout only carries the reports.
pub fn init_tracing(config: &Config) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
