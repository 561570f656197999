//! # Artifact Resolution
//!
//! Core resolution flow: list artifacts in the requested scope, select the
//! bundle artifact, and obtain a short-lived download URL for it.
//!
//! The flow is linear with two expected dead ends:
//! `Listing -> Selecting -> Resolving-URL`, exiting early when no artifact
//! matches or the platform answers without a usable URL. Both dead ends
//! are reported through the step sink and returned as [`Outcome::Failed`];
//! only transport failures from the provider propagate as errors.

use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, field, info_span, Instrument};

use crate::config::RepoContext;
use crate::constants::{BUNDLE_ARTIFACT_NAME, DOWNLOAD_URL_OUTPUT};
use crate::provider::{ArchiveFormat, Artifact, ArtifactProvider};
use crate::step::StepSink;

/// Listing scope, resolved once at entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Artifacts produced by one workflow run
    Run(u64),
    /// Artifacts across the whole repository
    Repository,
}

impl ListingScope {
    /// Build a scope from the optional run identifier input.
    ///
    /// An absent or empty value means the whole repository. Anything else
    /// must be a numeric run id; that is checked here, before any API
    /// call is made.
    ///
    /// # Errors
    /// Returns an error for a non-empty, non-numeric value.
    pub fn from_run_input(run_id: Option<&str>) -> Result<Self> {
        match run_id.map(str::trim) {
            None | Some("") => Ok(Self::Repository),
            Some(value) => value
                .parse::<u64>()
                .map(Self::Run)
                .with_context(|| format!("Invalid run id '{value}'. Expected a numeric workflow run id")),
        }
    }
}

/// Expected dead ends of a resolution attempt.
///
/// Transport failures are not part of this taxonomy; they propagate to
/// the caller untranslated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// No artifact with the bundle name exists in the searched scope
    #[error("No artifacts with name bundle-artifacts found")]
    NoMatchingArtifact,
    /// The platform answered the download request without a usable URL
    #[error("Could not get download URL for artifact {artifact_id}. Output: {payload}")]
    DownloadUrlUnavailable { artifact_id: u64, payload: String },
}

/// Result of one resolution attempt. Exactly one is produced per
/// invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A non-empty download URL was obtained and emitted as the
    /// `downloadUrl` output
    Resolved { download_url: String },
    /// Resolution stopped on an expected condition; no output was emitted
    Failed(ResolutionFailure),
}

/// Select the artifact to resolve from a listing.
///
/// The platform returns artifacts most-recent-first, so keeping listing
/// order and taking the first match selects the newest bundle. The policy
/// lives here, in one place, rather than as an inline index.
pub fn select_bundle_artifact(artifacts: &[Artifact]) -> Option<&Artifact> {
    artifacts
        .iter()
        .find(|artifact| artifact.name == BUNDLE_ARTIFACT_NAME)
}

/// Resolve the bundle artifact in `scope` to a short-lived download URL.
///
/// On success the URL is published through `step` as the `downloadUrl`
/// output. The two expected dead ends mark the step failed through
/// `step` and return normally; see [`ResolutionFailure`].
///
/// # Errors
/// Returns an error only for provider transport failures or when the
/// output channel itself cannot be written.
pub async fn resolve(
    provider: &dyn ArtifactProvider,
    repo: &RepoContext,
    step: &dyn StepSink,
    scope: ListingScope,
) -> Result<Outcome> {
    let span = info_span!(
        "artifact.resolve",
        repository = %repo,
        scope = ?scope,
        artifact.id = field::Empty,
        operation.duration_ms = field::Empty,
        operation.success = field::Empty,
    );
    let span_clone = span.clone();
    let start = Instant::now();

    async move {
        let listing = match scope {
            ListingScope::Run(run_id) => provider.list_run_artifacts(repo, run_id).await?,
            ListingScope::Repository => provider.list_repo_artifacts(repo).await?,
        };

        debug!("Listing returned {} artifacts", listing.artifacts.len());

        let Some(artifact) = select_bundle_artifact(&listing.artifacts) else {
            let failure = ResolutionFailure::NoMatchingArtifact;
            step.set_failed(&failure.to_string());
            span_clone.record("operation.success", false);
            return Ok(Outcome::Failed(failure));
        };

        span_clone.record("artifact.id", artifact.id);
        step.info(&format!(
            "Getting downloadUrl for artifact ID {}...",
            artifact.id
        ));

        // The generated URL expires after one minute; it is handed to the
        // next workflow step immediately and never cached.
        let descriptor = provider
            .artifact_download_url(repo, artifact.id, ArchiveFormat::Zip)
            .await?;

        let Some(download_url) = descriptor.url().map(str::to_string) else {
            let payload = serde_json::to_string(&descriptor)
                .context("Failed to serialize download response for diagnostics")?;
            let failure = ResolutionFailure::DownloadUrlUnavailable {
                artifact_id: artifact.id,
                payload,
            };
            step.set_failed(&failure.to_string());
            span_clone.record("operation.success", false);
            return Ok(Outcome::Failed(failure));
        };

        step.info(&format!(
            "Successfully got downloadUrl. It expires after 1 minute: {download_url}"
        ));
        step.set_output(DOWNLOAD_URL_OUTPUT, &download_url)?;

        span_clone.record("operation.duration_ms", start.elapsed().as_millis() as u64);
        span_clone.record("operation.success", true);
        Ok(Outcome::Resolved { download_url })
    }
    .instrument(span)
    .await
}
