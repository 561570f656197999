//! # Bundle Artifact Resolver Binary
//!
//! CLI entrypoint for the resolver step.
//!
//! Every flag has an environment fallback, so inside a workflow the step
//! needs no arguments at all:
//!
//! ```bash
//! # Inside a workflow (GITHUB_REPOSITORY, GITHUB_TOKEN, GITHUB_OUTPUT set
//! # by the runner; INPUT_RUN_ID by the step's `with:` block)
//! bundle-artifact-resolver
//!
//! # Local run against a specific workflow run
//! bundle-artifact-resolver --repository octo-org/widgets --run-id 8675309
//! ```
//!
//! Exit code 0 means the `downloadUrl` output was published; 1 means the
//! step was marked failed (no matching artifact, or no usable URL).

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use bundle_artifact_resolver::config::ResolverConfig;
use bundle_artifact_resolver::constants::DEFAULT_API_BASE_URL;
use bundle_artifact_resolver::provider::create_github_provider;
use bundle_artifact_resolver::resolver::{resolve, ListingScope};
use bundle_artifact_resolver::runtime::initialization::initialize;
use bundle_artifact_resolver::step::{ActionsStep, StepSink};

/// Resolve the bundle-artifacts build artifact to a short-lived download URL
#[derive(Parser)]
#[command(name = "bundle-artifact-resolver")]
#[command(about = "Resolve the bundle-artifacts build artifact to a short-lived download URL", long_about = None)]
struct Cli {
    /// Repository in <owner>/<repo> form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Workflow run to search; searches the whole repository when omitted
    #[arg(long, env = "INPUT_RUN_ID")]
    run_id: Option<String>,

    /// API token; unauthenticated requests work for public repositories
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    initialize();

    let cli = Cli::parse();
    let config = ResolverConfig::new(
        &cli.repository,
        cli.run_id,
        cli.github_token,
        cli.api_url,
    )?;
    let scope = ListingScope::from_run_input(config.run_id.as_deref())?;

    let provider = create_github_provider(&config.api_base_url, config.token.clone())?;
    let step = ActionsStep::from_env();

    resolve(provider.as_ref(), &config.repo, &step, scope).await?;

    // A reported dead end fails the step without unwinding; transport
    // errors took the `?` path above instead.
    Ok(if step.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
