//! GitHub provisioning: token validation and repository creation.
//!
//! This module wraps Octocrab to validate the configured OAuth token and to
//! create one repository per course group. Errors are mapped into the crate's
//! typed variants so callers can branch without inspecting Octocrab
//! internals.

pub mod gateway;
pub mod token;

pub use gateway::OctocrabGitHubGateway;
pub use token::AccessToken;

use async_trait::async_trait;

use crate::error::SetupError;

/// Default API base for the public GitHub service.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// A repository created for a course group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRepository {
    /// Repository name as confirmed by the server.
    pub name: String,
    /// HTTPS clone URL, referenced by the build job configuration.
    pub clone_url: String,
}

/// Gateway for provisioning operations on GitHub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubGateway: Send + Sync {
    /// Validates the configured token by resolving the authenticated account
    /// login.
    async fn authenticated_login(&self) -> Result<String, SetupError>;

    /// Creates a private repository under the authenticated account.
    async fn create_repository(&self, name: &str) -> Result<CreatedRepository, SetupError>;
}
