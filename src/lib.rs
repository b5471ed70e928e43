//! Courseforge library crate for provisioning course infrastructure.
//!
//! The library derives group names from a prefix and count, creates one
//! GitHub repository per group through Octocrab, and creates one build job
//! per group on a Jenkins-style build server via its XML REST surface,
//! surfacing typed errors the orchestration layer can branch on.

pub mod config;
pub mod error;
pub mod github;
pub mod groups;
pub mod jenkins;
pub mod report;
pub mod setup;

pub use config::CourseforgeConfig;
pub use error::SetupError;
pub use github::{AccessToken, CreatedRepository, GitHubGateway, OctocrabGitHubGateway};
pub use groups::{GroupCount, GroupName, GroupNamePrefix};
pub use jenkins::{
    CredentialDomain, Credentials, JenkinsGateway, JenkinsServer, JobDescriptor, JobName, Password,
};
pub use report::{NoopProgressSink, ProgressSink, SetupEvent, SetupTarget, StderrJsonlProgressSink};
pub use setup::{SetupPlan, SetupReport, SetupRunner, UnitOutcome};
