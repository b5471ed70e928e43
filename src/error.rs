//! Error types surfaced by the provisioning core.
//!
//! The original tooling logged every failure at severe level and handed
//! callers a null result. Here every failure is a typed variant so the
//! orchestration layer can branch on what went wrong.

use thiserror::Error;

/// Errors surfaced while validating input or provisioning remote systems.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A URL could not be constructed or parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The GitHub OAuth token was missing.
    #[error("GitHub access token is required")]
    MissingToken,

    /// The Jenkins username or password was missing.
    #[error("Jenkins username and password are required")]
    MissingJenkinsCredentials,

    /// A job name was empty or contained characters that are not URL-safe.
    #[error("job name is not URL-safe: {name:?}")]
    InvalidJobName {
        /// The rejected name.
        name: String,
    },

    /// A group name prefix was empty or contained unsafe characters.
    #[error("group name prefix is not URL-safe: {prefix:?}")]
    InvalidNamePrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The group count was zero.
    #[error("group count must be a positive number, got {value}")]
    InvalidGroupCount {
        /// The rejected count.
        value: u32,
    },

    /// A credential domain name was empty or contained unsafe characters.
    #[error("credential domain is not URL-safe: {domain:?}")]
    InvalidCredentialDomain {
        /// The rejected domain name.
        domain: String,
    },

    /// Networking failed while talking to a remote server.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The remote build server answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status code of the response.
        status: u16,
        /// Response body returned with the failure.
        body: String,
    },

    /// The remote server rejected the supplied credentials.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Server message returned with the 401/403 response.
        message: String,
    },

    /// An XML response could not be parsed.
    #[error("XML parse error: {message}")]
    Parse {
        /// Detail from the underlying XML reader.
        message: String,
    },

    /// The credential store response contained no credential entry.
    #[error("no credential found in domain {domain:?}")]
    MissingCredentialId {
        /// The credential domain that was queried.
        domain: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub describing the failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
