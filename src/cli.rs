//! Shared entry point for the binaries in `src/bin`

use crate::config::Config;
use crate::error::AppError;
use std::process::ExitCode;

/// Load configuration, set up logging and run `tool`
///
/// Any error is logged with its cause chain and turned into exit code 1.
pub fn run_tool(name: &str, tool: impl FnOnce(&Config) -> anyhow::Result<ExitCode>) -> ExitCode {
    let config = Config::load();
    crate::init_tracing(config.as_ref().unwrap_or(&Config::default()));

    let outcome = config.map_err(anyhow::Error::from).and_then(|config| {
        tracing::debug!("{} using store {}", name, config.database.path.display());
        tool(&config)
    });

    match outcome {
        Ok(code) => code,
        Err(e) => {
            let code = e.downcast_ref::<AppError>().map_or("INTERNAL_ERROR", AppError::code);
            tracing::error!(code, "{} failed: {:#}", name, e);
            ExitCode::FAILURE
        }
    }
}
