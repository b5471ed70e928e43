//! Build-server client: basic-auth requests, job creation, and credential
//! lookup.
//!
//! This module talks to the remote build server over its two fixed resource
//! paths: `POST /createItem?name={job}` with an XML job configuration, and
//! `GET /credential-store/domain/{domain}/api/xml` for stored credential
//! identifiers. The trait-based gateway keeps the orchestrator mockable while
//! [`JenkinsServer`] issues the real HTTP requests.

pub mod credentials;
pub mod job;
mod server;
mod xml;

pub use credentials::{CredentialDomain, Credentials, Password};
pub use job::{JobConfigParams, JobDescriptor, JobName, render_job_config};
pub use server::JenkinsServer;

use async_trait::async_trait;

use crate::error::SetupError;

/// Gateway for provisioning operations on the build server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JenkinsGateway: Send + Sync {
    /// Submits an XML job configuration under the descriptor's job name.
    async fn create_job(&self, job: &JobDescriptor) -> Result<(), SetupError>;

    /// Fetches the stored credential identifier for a credential domain.
    async fn credential_id(&self, domain: &CredentialDomain) -> Result<String, SetupError>;
}
