//! # Bundle Artifact Resolver
//!
//! A workflow automation step that resolves the `bundle-artifacts` build
//! artifact to a short-lived download URL.
//!
//! ## Overview
//!
//! The resolver runs as a single step inside a CI workflow and:
//!
//! 1. **Lists artifacts** - Scoped to a given workflow run, or across the
//!    whole repository when no run id is supplied
//! 2. **Selects the bundle** - Keeps only artifacts named `bundle-artifacts`
//!    and takes the first match in listing order
//! 3. **Generates a download URL** - Asks the platform for a zip archive
//!    download URL, which expires after one minute
//! 4. **Publishes the result** - Emits the URL as the `downloadUrl` step
//!    output, or marks the step failed without aborting the process
//!
//! The platform client ([`provider::ArtifactProvider`]) and the step
//! reporting surface ([`step::StepSink`]) are injected traits, so the whole
//! flow can be driven by in-process doubles in tests.
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for workflow wiring and local runs.

pub mod config;
pub mod constants;
pub mod provider;
pub mod resolver;
pub mod runtime;
pub mod step;

pub use config::{RepoContext, ResolverConfig};
pub use resolver::{resolve, ListingScope, Outcome, ResolutionFailure};
