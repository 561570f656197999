//! # Workflow Step Reporting
//!
//! Sink for step log lines, the failure signal, and named output
//! variables. Mirrors the runner toolkit's `info` / `setFailed` /
//! `setOutput` surface: failing the step is a latched state, not an
//! unwind, so the resolver can report a dead end and still return
//! normally.

mod actions;

pub use actions::ActionsStep;

use anyhow::Result;

/// Reporting surface of the enclosing workflow step.
pub trait StepSink: Send + Sync {
    /// Write an informational line to the step log.
    fn info(&self, message: &str);

    /// Mark the step failed with `message`. Returns normally; the failed
    /// state is queried via [`StepSink::failed`] when the process decides
    /// its exit code.
    fn set_failed(&self, message: &str);

    /// Publish a named output for downstream steps.
    ///
    /// # Errors
    /// Returns an error when the output channel cannot be written or the
    /// name is not a valid output name.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Whether [`StepSink::set_failed`] has been called this invocation.
    fn failed(&self) -> bool;
}
