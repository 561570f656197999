//! # Resolver Integration Tests
//!
//! Drive the resolution flow end to end against in-process doubles of the
//! platform provider and the step sink.
//!
//! These tests verify:
//! - Scope dispatch (run-scoped vs repository-wide listing)
//! - Name filtering and first-match selection
//! - Both expected dead ends and their exact step messages
//! - Output emission on success
//! - Transport error propagation

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use bundle_artifact_resolver::config::RepoContext;
use bundle_artifact_resolver::provider::{
    ArchiveFormat, Artifact, ArtifactList, ArtifactProvider, DownloadDescriptor,
};
use bundle_artifact_resolver::resolver::{resolve, ListingScope, Outcome, ResolutionFailure};
use bundle_artifact_resolver::step::StepSink;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListingCall {
    Run(u64),
    Repository,
}

/// Provider double serving canned responses and recording every call.
#[derive(Default)]
struct FakeProvider {
    artifacts: Vec<Artifact>,
    download: DownloadDescriptor,
    listing_calls: Mutex<Vec<ListingCall>>,
    download_calls: Mutex<Vec<(u64, ArchiveFormat)>>,
}

impl FakeProvider {
    fn with_artifacts(artifacts: Vec<Artifact>) -> Self {
        Self {
            artifacts,
            ..Self::default()
        }
    }

    fn with_download(mut self, download: DownloadDescriptor) -> Self {
        self.download = download;
        self
    }

    fn listing_calls(&self) -> Vec<ListingCall> {
        self.listing_calls.lock().unwrap().clone()
    }

    fn download_calls(&self) -> Vec<(u64, ArchiveFormat)> {
        self.download_calls.lock().unwrap().clone()
    }

    fn listing(&self) -> ArtifactList {
        ArtifactList {
            total_count: Some(self.artifacts.len() as u64),
            artifacts: self.artifacts.clone(),
        }
    }
}

#[async_trait]
impl ArtifactProvider for FakeProvider {
    async fn list_run_artifacts(&self, _repo: &RepoContext, run_id: u64) -> Result<ArtifactList> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(ListingCall::Run(run_id));
        Ok(self.listing())
    }

    async fn list_repo_artifacts(&self, _repo: &RepoContext) -> Result<ArtifactList> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(ListingCall::Repository);
        Ok(self.listing())
    }

    async fn artifact_download_url(
        &self,
        _repo: &RepoContext,
        artifact_id: u64,
        format: ArchiveFormat,
    ) -> Result<DownloadDescriptor> {
        self.download_calls
            .lock()
            .unwrap()
            .push((artifact_id, format));
        Ok(self.download.clone())
    }
}

/// Provider double whose listing call fails at the transport level.
struct BrokenProvider;

#[async_trait]
impl ArtifactProvider for BrokenProvider {
    async fn list_run_artifacts(&self, _repo: &RepoContext, _run_id: u64) -> Result<ArtifactList> {
        Err(anyhow!("connection reset by peer"))
    }

    async fn list_repo_artifacts(&self, _repo: &RepoContext) -> Result<ArtifactList> {
        Err(anyhow!("connection reset by peer"))
    }

    async fn artifact_download_url(
        &self,
        _repo: &RepoContext,
        _artifact_id: u64,
        _format: ArchiveFormat,
    ) -> Result<DownloadDescriptor> {
        Err(anyhow!("connection reset by peer"))
    }
}

/// Step sink double recording everything it is handed.
#[derive(Default)]
struct RecordingStep {
    infos: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
    outputs: Mutex<Vec<(String, String)>>,
}

impl RecordingStep {
    fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    fn outputs(&self) -> Vec<(String, String)> {
        self.outputs.lock().unwrap().clone()
    }
}

impl StepSink for RecordingStep {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn set_failed(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.outputs
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn failed(&self) -> bool {
        !self.failures.lock().unwrap().is_empty()
    }
}

fn artifact(id: u64, name: &str) -> Artifact {
    Artifact {
        id,
        name: name.to_string(),
        size_in_bytes: None,
        expired: None,
        created_at: None,
        expires_at: None,
    }
}

fn descriptor(url: &str) -> DownloadDescriptor {
    DownloadDescriptor {
        url: Some(url.to_string()),
        ..DownloadDescriptor::default()
    }
}

fn repo() -> RepoContext {
    RepoContext::parse("octo-org/widgets").unwrap()
}

#[tokio::test]
async fn resolves_bundle_among_other_artifacts() {
    let provider =
        FakeProvider::with_artifacts(vec![artifact(1, "logs"), artifact(2, "bundle-artifacts")])
            .with_download(descriptor("https://example/dl"));
    let step = RecordingStep::default();

    let outcome = resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Resolved {
            download_url: "https://example/dl".to_string()
        }
    );
    assert_eq!(
        step.outputs(),
        vec![("downloadUrl".to_string(), "https://example/dl".to_string())]
    );
    assert!(step.failures().is_empty());
    assert!(!step.failed());
    assert_eq!(provider.download_calls(), vec![(2, ArchiveFormat::Zip)]);
}

#[tokio::test]
async fn logs_selected_artifact_and_expiry_warning() {
    let provider = FakeProvider::with_artifacts(vec![artifact(2, "bundle-artifacts")])
        .with_download(descriptor("https://example/dl"));
    let step = RecordingStep::default();

    resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    let infos = step.infos();
    assert_eq!(infos[0], "Getting downloadUrl for artifact ID 2...");
    assert_eq!(
        infos[1],
        "Successfully got downloadUrl. It expires after 1 minute: https://example/dl"
    );
}

#[tokio::test]
async fn empty_listing_reports_the_exact_failure_message() {
    let provider = FakeProvider::with_artifacts(vec![]);
    let step = RecordingStep::default();

    let outcome = resolve(&provider, &repo(), &step, ListingScope::Run(99))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Failed(ResolutionFailure::NoMatchingArtifact)
    );
    assert_eq!(
        step.failures(),
        vec!["No artifacts with name bundle-artifacts found".to_string()]
    );
    assert!(step.outputs().is_empty());
    assert!(provider.download_calls().is_empty());
}

#[tokio::test]
async fn listing_without_the_bundle_name_is_a_not_found() {
    let provider =
        FakeProvider::with_artifacts(vec![artifact(1, "logs"), artifact(2, "coverage")]);
    let step = RecordingStep::default();

    let outcome = resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Failed(ResolutionFailure::NoMatchingArtifact)
    );
    assert!(step.outputs().is_empty());
}

#[tokio::test]
async fn first_match_in_listing_order_wins() {
    let provider = FakeProvider::with_artifacts(vec![
        artifact(1, "logs"),
        artifact(10, "bundle-artifacts"),
        artifact(11, "bundle-artifacts"),
    ])
    .with_download(descriptor("https://example/dl"));
    let step = RecordingStep::default();

    resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    assert_eq!(provider.download_calls(), vec![(10, ArchiveFormat::Zip)]);
}

#[tokio::test]
async fn run_scope_dispatches_the_run_scoped_listing() {
    let provider = FakeProvider::with_artifacts(vec![artifact(2, "bundle-artifacts")])
        .with_download(descriptor("https://example/dl"));
    let step = RecordingStep::default();

    resolve(&provider, &repo(), &step, ListingScope::Run(8_675_309))
        .await
        .unwrap();

    assert_eq!(provider.listing_calls(), vec![ListingCall::Run(8_675_309)]);
}

#[tokio::test]
async fn repository_scope_dispatches_the_repository_listing() {
    let provider = FakeProvider::with_artifacts(vec![artifact(2, "bundle-artifacts")])
        .with_download(descriptor("https://example/dl"));
    let step = RecordingStep::default();

    resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    assert_eq!(provider.listing_calls(), vec![ListingCall::Repository]);
}

#[tokio::test]
async fn download_response_without_url_reports_id_and_payload() {
    let provider = FakeProvider::with_artifacts(vec![artifact(5, "bundle-artifacts")]);
    let step = RecordingStep::default();

    let outcome = resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Failed(ResolutionFailure::DownloadUrlUnavailable {
            artifact_id: 5,
            payload: "{}".to_string()
        })
    );
    assert_eq!(
        step.failures(),
        vec!["Could not get download URL for artifact 5. Output: {}".to_string()]
    );
    assert!(step.outputs().is_empty());
}

#[tokio::test]
async fn download_response_with_empty_url_is_a_dead_end() {
    let provider = FakeProvider::with_artifacts(vec![artifact(5, "bundle-artifacts")])
        .with_download(descriptor(""));
    let step = RecordingStep::default();

    let outcome = resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    match outcome {
        Outcome::Failed(ResolutionFailure::DownloadUrlUnavailable { artifact_id, .. }) => {
            assert_eq!(artifact_id, 5);
        }
        other => panic!("expected DownloadUrlUnavailable, got {other:?}"),
    }
    assert!(step.outputs().is_empty());
}

#[tokio::test]
async fn diagnostic_payload_carries_the_extra_response_fields() {
    let download: DownloadDescriptor =
        serde_json::from_value(serde_json::json!({"status": 410, "message": "Gone"})).unwrap();
    let provider =
        FakeProvider::with_artifacts(vec![artifact(5, "bundle-artifacts")]).with_download(download);
    let step = RecordingStep::default();

    resolve(&provider, &repo(), &step, ListingScope::Repository)
        .await
        .unwrap();

    let failures = step.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("artifact 5"));
    assert!(failures[0].contains("410"));
    assert!(failures[0].contains("Gone"));
}

#[tokio::test]
async fn transport_errors_propagate_without_touching_the_step() {
    let step = RecordingStep::default();

    let result = resolve(&BrokenProvider, &repo(), &step, ListingScope::Repository).await;

    assert!(result.is_err());
    assert!(step.failures().is_empty());
    assert!(step.outputs().is_empty());
    assert!(!step.failed());
}
