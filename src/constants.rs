//! # Constants
//!
//! Shared constants for the resolver binary and library.

/// Artifact name produced by the bundle build workflow.
pub const BUNDLE_ARTIFACT_NAME: &str = "bundle-artifacts";

/// Name of the workflow output carrying the resolved URL.
pub const DOWNLOAD_URL_OUTPUT: &str = "downloadUrl";

/// Default REST API base URL, overridable via `GITHUB_API_URL` for
/// GitHub Enterprise Server installs.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// REST API version this client is pinned to.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// User-Agent sent with every request. The platform rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("bundle-artifact-resolver/", env!("CARGO_PKG_VERSION"));
