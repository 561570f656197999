//! # GitHub Actions Step Sink
//!
//! Workflow-command implementation of the step sink. Outputs are appended
//! to the file named by `GITHUB_OUTPUT` in the heredoc form the runner
//! toolkit writes; failures surface as `::error::` workflow commands plus
//! a latched flag the binary turns into its exit code.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Context, Result};
use tracing::warn;
use uuid::Uuid;

use super::StepSink;

/// Step sink backed by GitHub Actions workflow commands.
#[derive(Debug, Default)]
pub struct ActionsStep {
    output_path: Option<PathBuf>,
    failed: AtomicBool,
}

impl ActionsStep {
    /// Create a sink writing outputs to the file named by `GITHUB_OUTPUT`,
    /// falling back to the legacy `set-output` command when unset.
    pub fn from_env() -> Self {
        Self {
            output_path: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            failed: AtomicBool::new(false),
        }
    }

    /// Create a sink writing outputs to an explicit file.
    pub fn with_output_path(path: PathBuf) -> Self {
        Self {
            output_path: Some(path),
            failed: AtomicBool::new(false),
        }
    }

    fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
        // Heredoc form with a random delimiter, as the runner toolkit
        // writes it. A plain name=value record would break on multi-line
        // values.
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        if value.contains(&delimiter) || name.contains(&delimiter) {
            bail!("Output '{name}' collides with the generated heredoc delimiter");
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file {}", path.display()))?;
        writeln!(file, "{name}<<{delimiter}")?;
        writeln!(file, "{value}")?;
        writeln!(file, "{delimiter}")?;
        Ok(())
    }
}

/// Escape data for a `::command::` line per the workflow-command rules.
fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn validate_output_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['=', '\r', '\n']) {
        bail!("Invalid output name '{name}'");
    }
    Ok(())
}

impl StepSink for ActionsStep {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn set_failed(&self, message: &str) {
        println!("::error::{}", escape_command_data(message));
        self.failed.store(true, Ordering::SeqCst);
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        validate_output_name(name)?;
        match &self.output_path {
            Some(path) => Self::append_output(path, name, value),
            None => {
                // Legacy fallback for runners predating GITHUB_OUTPUT
                warn!("GITHUB_OUTPUT is not set, falling back to the deprecated set-output command");
                println!("::set-output name={name}::{}", escape_command_data(value));
                Ok(())
            }
        }
    }

    fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}
