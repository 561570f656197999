//! # Response Types
//!
//! GitHub Actions artifact REST API response structures.
//!
//! These structs represent the JSON payloads returned by the artifact
//! endpoints. They are designed to match the API schema as documented at:
//! https://docs.github.com/en/rest/actions/artifacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One artifact entry from a listing response.
///
/// Only the fields the resolver reads or logs are modeled; everything
/// else in the payload is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Opaque numeric identifier assigned by the platform
    pub id: u64,
    /// Artifact name chosen by the uploading workflow
    pub name: String,
    /// Archive size as reported by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,
    /// Whether the retention window has already elapsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Listing envelope shared by the run-scoped and repository-scoped calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// Result of a download-URL request.
///
/// The platform normally answers with a redirect whose `Location` header
/// carries the URL. Mock servers and proxies answer with a JSON body
/// instead; any fields beyond `url` are kept verbatim so a failed
/// resolution can report the full payload it actually received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DownloadDescriptor {
    /// The download URL, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
