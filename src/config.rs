//! Application configuration loaded from CLI, environment, and files.
//!
//! This replaces the original singleton managers: all form inputs live in a
//! single struct constructed once at startup and passed to the components
//! that need them.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.courseforge.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `COURSEFORGE_*`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments**
//!
//! # Configuration File
//!
//! ```toml
//! name_prefix = "swp2016"
//! group_count = 12
//! jenkins_url = "https://ci.example.org/jenkins"
//! jenkins_username = "course-admin"
//! credential_domain = "GitHub"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SetupError;
use crate::groups::{GroupCount, GroupNamePrefix};
use crate::jenkins::{CredentialDomain, Credentials};

/// Credential domain queried when none is configured; matches the domain
/// name the original deployment stored its repository credential under.
const DEFAULT_CREDENTIAL_DOMAIN: &str = "GitHub";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `COURSEFORGE_NAME_PREFIX` or `--name-prefix`: Group name prefix
/// - `COURSEFORGE_GROUP_COUNT` or `--group-count`: Number of groups
/// - `COURSEFORGE_JENKINS_URL` or `--jenkins-url`: Build server base URL
/// - `COURSEFORGE_JENKINS_USERNAME` or `--jenkins-username`: Build server user
/// - `COURSEFORGE_JENKINS_PASSWORD` or `--jenkins-password`: Build server password
/// - `COURSEFORGE_GITHUB_TOKEN`, `GITHUB_TOKEN`, or `--github-token`: OAuth token
/// - `COURSEFORGE_CREDENTIAL_DOMAIN` or `--credential-domain`: Credential domain
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "COURSEFORGE",
    discovery(
        dotfile_name = ".courseforge.toml",
        config_file_name = "courseforge.toml",
        app_name = "courseforge"
    )
)]
pub struct CourseforgeConfig {
    /// Prefix shared by all group, repository, and job names.
    ///
    /// Can be provided via:
    /// - CLI: `--name-prefix <PREFIX>` or `-p <PREFIX>`
    /// - Environment: `COURSEFORGE_NAME_PREFIX`
    /// - Config file: `name_prefix = "..."`
    #[ortho_config(cli_short = 'p')]
    pub name_prefix: Option<String>,

    /// Number of groups to provision.
    ///
    /// Can be provided via:
    /// - CLI: `--group-count <N>` or `-c <N>`
    /// - Environment: `COURSEFORGE_GROUP_COUNT`
    /// - Config file: `group_count = 12`
    #[ortho_config(cli_short = 'c')]
    pub group_count: Option<u32>,

    /// Base URL of the build server, including any context path.
    ///
    /// Can be provided via:
    /// - CLI: `--jenkins-url <URL>` or `-j <URL>`
    /// - Environment: `COURSEFORGE_JENKINS_URL`
    /// - Config file: `jenkins_url = "..."`
    #[ortho_config(cli_short = 'j')]
    pub jenkins_url: Option<String>,

    /// Username for the build server.
    ///
    /// Can be provided via:
    /// - CLI: `--jenkins-username <USER>`
    /// - Environment: `COURSEFORGE_JENKINS_USERNAME`
    /// - Config file: `jenkins_username = "..."`
    #[ortho_config()]
    pub jenkins_username: Option<String>,

    /// Password for the build server.
    ///
    /// Can be provided via:
    /// - CLI: `--jenkins-password <PASSWORD>`
    /// - Environment: `COURSEFORGE_JENKINS_PASSWORD`
    /// - Config file: `jenkins_password = "..."`
    #[ortho_config()]
    pub jenkins_password: Option<String>,

    /// OAuth token for the GitHub API.
    ///
    /// Can be provided via:
    /// - CLI: `--github-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `COURSEFORGE_GITHUB_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `github_token = "..."`
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// Credential domain holding the repository-access credential on the
    /// build server. Defaults to `GitHub`.
    ///
    /// Can be provided via:
    /// - CLI: `--credential-domain <DOMAIN>`
    /// - Environment: `COURSEFORGE_CREDENTIAL_DOMAIN`
    /// - Config file: `credential_domain = "..."`
    #[ortho_config()]
    pub credential_domain: Option<String>,
}

impl CourseforgeConfig {
    /// Returns the validated group name prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Configuration`] when no prefix is configured and
    /// [`SetupError::InvalidNamePrefix`] when it is not URL-safe.
    pub fn require_name_prefix(&self) -> Result<GroupNamePrefix, SetupError> {
        let prefix = self
            .name_prefix
            .as_deref()
            .ok_or_else(|| SetupError::Configuration {
                message: "group name prefix is required (use --name-prefix or -p)".to_owned(),
            })?;
        GroupNamePrefix::new(prefix)
    }

    /// Returns the validated group count.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Configuration`] when no count is configured and
    /// [`SetupError::InvalidGroupCount`] when it is zero.
    pub fn require_group_count(&self) -> Result<GroupCount, SetupError> {
        let count = self.group_count.ok_or_else(|| SetupError::Configuration {
            message: "group count is required (use --group-count or -c)".to_owned(),
        })?;
        GroupCount::new(count)
    }

    /// Returns the parsed build-server base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Configuration`] when no URL is configured and
    /// [`SetupError::InvalidUrl`] when it does not parse.
    pub fn require_jenkins_url(&self) -> Result<Url, SetupError> {
        let raw = self
            .jenkins_url
            .as_deref()
            .ok_or_else(|| SetupError::Configuration {
                message: "build server URL is required (use --jenkins-url or -j)".to_owned(),
            })?;
        Url::parse(raw).map_err(|error| SetupError::InvalidUrl(error.to_string()))
    }

    /// Returns the build-server credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingJenkinsCredentials`] when either value is
    /// missing or blank.
    pub fn jenkins_credentials(&self) -> Result<Credentials, SetupError> {
        match (&self.jenkins_username, &self.jenkins_password) {
            (Some(username), Some(password)) => Credentials::new(username, password),
            _ => Err(SetupError::MissingJenkinsCredentials),
        }
    }

    /// Resolves the GitHub token from configuration or the legacy
    /// `GITHUB_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_github_token(&self) -> Result<String, SetupError> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(SetupError::MissingToken)
    }

    /// Returns the configured credential domain, defaulting to `GitHub`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidCredentialDomain`] when the configured
    /// name is not URL-safe.
    pub fn credential_domain(&self) -> Result<CredentialDomain, SetupError> {
        CredentialDomain::new(
            self.credential_domain
                .as_deref()
                .unwrap_or(DEFAULT_CREDENTIAL_DOMAIN),
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::SetupError;

    use super::CourseforgeConfig;

    #[test]
    fn validated_fields_resolve_when_present() {
        let config = CourseforgeConfig {
            name_prefix: Some("swp2016".to_owned()),
            group_count: Some(12),
            jenkins_url: Some("https://ci.example.test/jenkins".to_owned()),
            ..Default::default()
        };

        let prefix = config.require_name_prefix().expect("prefix should resolve");
        assert_eq!(prefix.as_str(), "swp2016");

        let count = config.require_group_count().expect("count should resolve");
        assert_eq!(count.get(), 12);

        let url = config.require_jenkins_url().expect("URL should resolve");
        assert_eq!(url.as_str(), "https://ci.example.test/jenkins");
    }

    #[rstest]
    #[case::prefix(|config: &CourseforgeConfig| config.require_name_prefix().err())]
    #[case::count(|config: &CourseforgeConfig| config.require_group_count().err())]
    #[case::url(|config: &CourseforgeConfig| config.require_jenkins_url().err())]
    fn missing_required_fields_are_configuration_errors(
        #[case] resolve: fn(&CourseforgeConfig) -> Option<SetupError>,
    ) {
        let config = CourseforgeConfig::default();
        let error = resolve(&config).expect("missing value should error");
        assert!(
            matches!(error, SetupError::Configuration { .. }),
            "expected Configuration error, got {error:?}"
        );
    }

    #[test]
    fn zero_group_count_is_rejected() {
        let config = CourseforgeConfig {
            group_count: Some(0),
            ..Default::default()
        };
        let error = config
            .require_group_count()
            .expect_err("zero count should be rejected");
        assert_eq!(error, SetupError::InvalidGroupCount { value: 0 });
    }

    #[test]
    fn partial_jenkins_credentials_are_rejected() {
        let config = CourseforgeConfig {
            jenkins_username: Some("course-admin".to_owned()),
            ..Default::default()
        };
        let error = config
            .jenkins_credentials()
            .expect_err("password-less credentials should be rejected");
        assert_eq!(error, SetupError::MissingJenkinsCredentials);
    }

    #[test]
    fn github_token_falls_back_to_legacy_environment_variable() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
        let config = CourseforgeConfig::default();
        assert_eq!(
            config.resolve_github_token().ok().as_deref(),
            Some("legacy-token")
        );
    }

    #[test]
    fn missing_github_token_is_an_error() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = CourseforgeConfig::default();
        let error = config
            .resolve_github_token()
            .expect_err("missing token should error");
        assert_eq!(error, SetupError::MissingToken);
    }

    #[test]
    fn credential_domain_defaults_to_github() {
        let config = CourseforgeConfig::default();
        let domain = config.credential_domain().expect("default should be valid");
        assert_eq!(domain.as_str(), "GitHub");
    }
}
