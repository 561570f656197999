//! # Resolver Configuration
//!
//! Invocation inputs for the resolver step. On a real runner everything
//! arrives through environment variables (`GITHUB_REPOSITORY`,
//! `GITHUB_TOKEN`, `INPUT_RUN_ID`, ...); the CLI flags in `main.rs` expose
//! the same values for local runs.

use std::fmt;

use anyhow::{bail, Result};

/// Owner and repository the resolver operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
}

impl RepoContext {
    /// Parse the `<owner>/<repo>` form used by `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    /// Returns an error when either component is empty or the value does
    /// not contain exactly one separator.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => bail!("Invalid repository '{value}'. Expected format: <owner>/<repo>"),
        }
    }
}

impl fmt::Display for RepoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Fully parsed invocation configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Repository to search
    pub repo: RepoContext,
    /// Raw run identifier input; empty means "whole repository"
    pub run_id: Option<String>,
    /// API token; unauthenticated requests work for public repositories
    pub token: Option<String>,
    /// REST API base URL
    pub api_base_url: String,
}

impl ResolverConfig {
    /// Assemble a configuration from raw inputs.
    ///
    /// Empty-string inputs are normalized to `None` here so the rest of
    /// the code only deals with genuinely present values. Workflow `with:`
    /// blocks pass unset inputs as empty strings rather than omitting the
    /// variable.
    ///
    /// # Errors
    /// Returns an error when the repository value is malformed.
    pub fn new(
        repository: &str,
        run_id: Option<String>,
        token: Option<String>,
        api_base_url: String,
    ) -> Result<Self> {
        Ok(Self {
            repo: RepoContext::parse(repository)?,
            run_id: run_id.filter(|value| !value.trim().is_empty()),
            token: token.filter(|value| !value.is_empty()),
            api_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let repo = RepoContext::parse("octo-org/widgets").unwrap();
        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.repo, "widgets");
        assert_eq!(repo.to_string(), "octo-org/widgets");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(RepoContext::parse("widgets").is_err());
    }

    #[test]
    fn rejects_empty_components() {
        assert!(RepoContext::parse("/widgets").is_err());
        assert!(RepoContext::parse("octo-org/").is_err());
        assert!(RepoContext::parse("/").is_err());
    }

    #[test]
    fn rejects_extra_separators() {
        assert!(RepoContext::parse("octo-org/widgets/extra").is_err());
    }

    #[test]
    fn normalizes_empty_inputs() {
        let config = ResolverConfig::new(
            "octo-org/widgets",
            Some("   ".to_string()),
            Some(String::new()),
            "https://api.github.com".to_string(),
        )
        .unwrap();
        assert!(config.run_id.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn keeps_present_inputs() {
        let config = ResolverConfig::new(
            "octo-org/widgets",
            Some("8675309".to_string()),
            Some("ghs_token".to_string()),
            "https://api.github.com".to_string(),
        )
        .unwrap();
        assert_eq!(config.run_id.as_deref(), Some("8675309"));
        assert_eq!(config.token.as_deref(), Some("ghs_token"));
    }
}
