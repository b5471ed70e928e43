//! Job naming, descriptors, and `config.xml` rendering.

use minijinja::{Environment, context};

use crate::error::SetupError;

/// Freestyle job configuration checked out from a Git repository.
///
/// The build server clones the repository with a stored credential, so the
/// template only needs the clone URL and the credential identifier.
const JOB_CONFIG_TEMPLATE: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<project>
  <description>{{ description }}</description>
  <keepDependencies>false</keepDependencies>
  <scm class="hudson.plugins.git.GitSCM">
    <configVersion>2</configVersion>
    <userRemoteConfigs>
      <hudson.plugins.git.UserRemoteConfig>
        <url>{{ repository_url }}</url>
        <credentialsId>{{ credentials_id }}</credentialsId>
      </hudson.plugins.git.UserRemoteConfig>
    </userRemoteConfigs>
    <branches>
      <hudson.plugins.git.BranchSpec>
        <name>*/main</name>
      </hudson.plugins.git.BranchSpec>
    </branches>
  </scm>
  <canRoam>true</canRoam>
  <disabled>false</disabled>
  <triggers/>
  <builders/>
  <publishers/>
  <buildWrappers/>
</project>
"#;

/// Returns whether a value is safe to splice into a URL path unescaped.
///
/// Job, group, and domain names are concatenated directly into request URLs,
/// so anything outside `[A-Za-z0-9._-]` is rejected up front.
pub(crate) fn is_url_safe_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.'))
}

/// Validated name of a buildable unit on the remote build server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobName(String);

impl JobName {
    /// Validates a job name for unescaped use in the creation URL.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidJobName`] when the name is empty or
    /// contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(name: impl AsRef<str>) -> Result<Self, SetupError> {
        let name = name.as_ref();
        if !is_url_safe_name(name) {
            return Err(SetupError::InvalidJobName {
                name: name.to_owned(),
            });
        }
        Ok(Self(name.to_owned()))
    }

    /// Borrows the job name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A job name paired with the XML configuration to create it from.
///
/// Descriptors are transient: built once per creation request and not
/// retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    name: JobName,
    config_xml: String,
}

impl JobDescriptor {
    /// Pairs a validated job name with its XML configuration document.
    #[must_use]
    pub const fn new(name: JobName, config_xml: String) -> Self {
        Self { name, config_xml }
    }

    /// The job name.
    #[must_use]
    pub const fn name(&self) -> &JobName {
        &self.name
    }

    /// The XML configuration document.
    #[must_use]
    pub fn config_xml(&self) -> &str {
        self.config_xml.as_str()
    }
}

/// Values substituted into the job configuration template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfigParams<'a> {
    /// Clone URL of the repository the job builds.
    pub repository_url: &'a str,
    /// Identifier of the stored credential used for the checkout.
    pub credentials_id: &'a str,
    /// Human-readable job description.
    pub description: &'a str,
}

/// Renders a freestyle job `config.xml` for a Git-backed build.
///
/// # Errors
///
/// Returns [`SetupError::Configuration`] when template rendering fails.
pub fn render_job_config(params: &JobConfigParams<'_>) -> Result<String, SetupError> {
    let environment = Environment::new();
    let template = environment
        .template_from_str(JOB_CONFIG_TEMPLATE)
        .map_err(|error| SetupError::Configuration {
            message: format!("job config template is invalid: {error}"),
        })?;

    template
        .render(context! {
            repository_url => params.repository_url,
            credentials_id => params.credentials_id,
            description => params.description,
        })
        .map_err(|error| SetupError::Configuration {
            message: format!("job config rendering failed: {error}"),
        })
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
