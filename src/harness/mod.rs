//! Test script harness
//!
//! Runs each configured script as its own process, one after another, and
//! tallies the results. Script output goes straight to the inherited
//! stdout/stderr; the harness's own banners and notices go to the writer
//! passed to [`TestHarness::run_with`]. A missing or unlaunchable script
//! counts as a failure and the batch carries on.

use crate::config::HarnessConfig;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{error, info, warn};

/// Outcome of a single script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScriptStatus {
    Passed,
    /// Non-zero exit; `None` when the process was killed by a signal
    Failed { exit_code: Option<i32> },
    Missing,
    LaunchError(String),
}

impl ScriptStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ScriptStatus::Passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptOutcome {
    pub script: PathBuf,
    pub status: ScriptStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HarnessSummary {
    pub outcomes: Vec<ScriptOutcome>,
}

impl HarnessSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Process exit code for the whole batch
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

pub struct TestHarness {
    working_dir: PathBuf,
    interpreter: Option<String>,
    scripts: Vec<PathBuf>,
}

impl TestHarness {
    pub fn new(working_dir: impl Into<PathBuf>, interpreter: Option<String>, scripts: Vec<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            interpreter,
            scripts,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(
            config.working_dir.clone(),
            config.interpreter.clone(),
            config.scripts.clone(),
        )
    }

    /// Run every script in order, reporting progress on stdout
    pub fn run(&self) -> HarnessSummary {
        self.run_with(&mut std::io::stdout().lock())
    }

    /// Run every script in order, reporting progress to `out`
    pub fn run_with(&self, out: &mut impl Write) -> HarnessSummary {
        info!("Running {} test scripts in {}", self.scripts.len(), self.working_dir.display());

        let outcomes = self
            .scripts
            .iter()
            .map(|script| ScriptOutcome {
                script: script.clone(),
                status: self.run_script(script, &mut *out),
            })
            .collect();

        HarnessSummary { outcomes }
    }

    fn run_script(&self, script: &Path, out: &mut impl Write) -> ScriptStatus {
        let resolved = self.working_dir.join(script);
        if !resolved.is_file() {
            warn!("Test script not found: {}", script.display());
            let _ = writeln!(out, "Test script not found: {}", script.display());
            return ScriptStatus::Missing;
        }

        // Progress output is best effort; a closed stdout must not fail the batch.
        let _ = writeln!(out, "\n{}", "=".repeat(60));
        let _ = writeln!(out, "Running test: {}", script.display());
        let _ = writeln!(out, "{}", "=".repeat(60));
        // Flush so the banner lands before the child's own output.
        let _ = out.flush();

        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(script);
                cmd
            }
            None => Command::new(resolved.canonicalize().unwrap_or(resolved)),
        };

        match command.current_dir(&self.working_dir).status() {
            Ok(status) if status.success() => {
                info!("{} passed", script.display());
                ScriptStatus::Passed
            }
            Ok(status) => {
                warn!("{} failed with exit code {:?}", script.display(), status.code());
                ScriptStatus::Failed {
                    exit_code: status.code(),
                }
            }
            Err(e) => {
                error!("Failed to launch {}: {}", script.display(), e);
                ScriptStatus::LaunchError(e.to_string())
            }
        }
    }
}

impl fmt::Display for HarnessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Test summary")?;
        writeln!(f, "{}", "=".repeat(60))?;

        for outcome in &self.outcomes {
            let status = match &outcome.status {
                ScriptStatus::Passed => "passed".to_string(),
                ScriptStatus::Failed { exit_code: Some(code) } => format!("failed (exit code {})", code),
                ScriptStatus::Failed { exit_code: None } => "failed (terminated by signal)".to_string(),
                ScriptStatus::Missing => "failed (file not found)".to_string(),
                ScriptStatus::LaunchError(e) => format!("failed (launch error: {})", e),
            };
            writeln!(f, "{}: {}", outcome.script.display(), status)?;
        }

        writeln!(f, "\nTotal: {}/{} tests passed", self.passed(), self.total())?;
        if self.all_passed() {
            writeln!(f, "All tests passed")
        } else {
            writeln!(f, "Some tests failed")
        }
    }
}
