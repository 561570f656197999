//! # Artifact Providers
//!
//! Capability abstraction over the source-hosting platform's artifact API.
//!
//! The resolver only ever talks to the [`ArtifactProvider`] trait, which
//! covers the three operations it needs:
//! - List artifacts produced by one workflow run
//! - List artifacts across the whole repository
//! - Generate a short-lived download URL for one artifact
//!
//! The production implementation is a native REST client for GitHub
//! Actions; tests substitute an in-process double.

mod github;

pub use github::responses::{Artifact, ArtifactList, DownloadDescriptor};
pub use github::GitHubActionsRest;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::config::RepoContext;

/// Archive format requested when generating a download URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
}

impl ArchiveFormat {
    /// Path segment used by the download endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
        }
    }
}

/// Platform capability consumed by the resolver.
///
/// All three operations are read-only; errors are transport or platform
/// failures and propagate untranslated.
#[async_trait]
pub trait ArtifactProvider: Send + Sync {
    /// List artifacts produced by a single workflow run.
    async fn list_run_artifacts(&self, repo: &RepoContext, run_id: u64) -> Result<ArtifactList>;

    /// List artifacts across the whole repository.
    async fn list_repo_artifacts(&self, repo: &RepoContext) -> Result<ArtifactList>;

    /// Generate a short-lived download URL for one artifact.
    async fn artifact_download_url(
        &self,
        repo: &RepoContext,
        artifact_id: u64,
        format: ArchiveFormat,
    ) -> Result<DownloadDescriptor>;
}

/// Create the GitHub Actions artifact provider.
///
/// # Arguments
/// - `api_base_url`: REST API base URL (`https://api.github.com` or a
///   GitHub Enterprise Server equivalent)
/// - `token`: optional API token for private repositories
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_github_provider(
    api_base_url: &str,
    token: Option<String>,
) -> Result<Box<dyn ArtifactProvider>> {
    info!("Using GitHub Actions REST client (native implementation)");
    Ok(Box::new(GitHubActionsRest::new(api_base_url, token)?))
}
