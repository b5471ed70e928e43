//! Octocrab implementation of the GitHub gateway.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

use super::token::AccessToken;
use super::{CreatedRepository, GitHubGateway};

/// Octocrab-backed gateway.
pub struct OctocrabGitHubGateway {
    client: Octocrab,
}

impl OctocrabGitHubGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidUrl`] when the base URI cannot be parsed
    /// or [`SetupError::Api`] when Octocrab fails to construct a client.
    pub fn for_token(token: &AccessToken, api_base: &str) -> Result<Self, SetupError> {
        let base_uri: Uri = api_base
            .parse::<Uri>()
            .map_err(|error| SetupError::InvalidUrl(error.to_string()))?;

        let client = Octocrab::builder()
            .personal_token(token.as_ref())
            .base_uri(base_uri)
            .map_err(|error| SetupError::Api {
                message: format!("build client failed: {error}"),
            })?
            .build()
            .map_err(|error| map_octocrab_error("build client", &error))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl GitHubGateway for OctocrabGitHubGateway {
    async fn authenticated_login(&self) -> Result<String, SetupError> {
        self.client
            .current()
            .user()
            .await
            .map(|user| user.login)
            .map_err(|error| map_octocrab_error("token validation", &error))
    }

    async fn create_repository(&self, name: &str) -> Result<CreatedRepository, SetupError> {
        let payload = CreateRepositoryRequest {
            name,
            private: true,
            auto_init: true,
        };
        let repository: ApiRepository = self
            .client
            .post("/user/repos", Some(&payload))
            .await
            .map_err(|error| map_octocrab_error("create repository", &error))?;

        repository.into_created()
    }
}

#[derive(Debug, Serialize)]
struct CreateRepositoryRequest<'a> {
    name: &'a str,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    clone_url: Option<String>,
}

impl ApiRepository {
    fn into_created(self) -> Result<CreatedRepository, SetupError> {
        let Self { name, clone_url } = self;
        let clone_url = clone_url.ok_or_else(|| SetupError::Api {
            message: format!("repository {name:?} was created without a clone URL"),
        })?;
        Ok(CreatedRepository { name, clone_url })
    }
}

/// Maps an Octocrab failure onto the crate's error taxonomy.
///
/// The two calls this gateway makes can fail in three interesting ways: the
/// token is rejected (401/403), the repository request is refused as
/// unprocessable (422, typically a name collision under the account), or the
/// transport gives out. Everything else is an opaque API failure.
fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> SetupError {
    match error {
        octocrab::Error::GitHub { source, .. } => match source.status_code {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SetupError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            },
            StatusCode::UNPROCESSABLE_ENTITY => SetupError::Api {
                message: format!("{operation} was rejected: {message}", message = source.message),
            },
            status => SetupError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    message = source.message
                ),
            },
        },
        octocrab::Error::Http { .. }
        | octocrab::Error::Hyper { .. }
        | octocrab::Error::Service { .. } => SetupError::Network {
            message: format!("{operation} failed: {error}"),
        },
        _ => SetupError::Api {
            message: format!("{operation} failed: {error}"),
        },
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
