//! # Initialization
//!
//! Runtime setup for the resolver binary: local `.env` support, tracing
//! subscriber, and the build-info banner.

use tracing::info;

/// Initialize the process runtime.
///
/// Step log lines go to stdout through the step sink; tracing carries the
/// operational diagnostics and is filtered via `RUST_LOG`.
pub fn initialize() {
    // Local runs can keep GITHUB_* variables in a .env file; on a real
    // runner the file is absent and this is a no-op.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bundle_artifact_resolver=info".into()),
        )
        .init();

    info!("Starting bundle artifact resolver");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );
}
