//! Provisioning orchestration: groups, repositories, and build jobs.
//!
//! One run walks the three targets in sequence, mirroring the original
//! form-submit flow: derive the group names, create one repository per group,
//! then create one build job per group wired to that repository via the
//! stored credential. Failures of individual units are collected into the
//! report; failures that invalidate a whole phase abort the run.

use crate::error::SetupError;
use crate::github::GitHubGateway;
use crate::groups::{GroupCount, GroupName, GroupNamePrefix, plan_group_names};
use crate::jenkins::{
    CredentialDomain, JenkinsGateway, JobConfigParams, JobDescriptor, JobName, render_job_config,
};
use crate::report::{ProgressSink, SetupEvent, SetupTarget};

/// Validated inputs for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPlan {
    name_prefix: GroupNamePrefix,
    group_count: GroupCount,
    credential_domain: CredentialDomain,
}

impl SetupPlan {
    /// Assembles a plan from validated inputs.
    #[must_use]
    pub const fn new(
        name_prefix: GroupNamePrefix,
        group_count: GroupCount,
        credential_domain: CredentialDomain,
    ) -> Self {
        Self {
            name_prefix,
            group_count,
            credential_domain,
        }
    }

    /// The ordered group names this plan provisions.
    #[must_use]
    pub fn group_names(&self) -> Vec<GroupName> {
        plan_group_names(&self.name_prefix, self.group_count)
    }

    /// The credential domain holding the repository-access credential.
    #[must_use]
    pub const fn credential_domain(&self) -> &CredentialDomain {
        &self.credential_domain
    }
}

/// Outcome of provisioning a single unit (one repository or one job).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    /// Name of the provisioned unit.
    pub name: String,
    /// Failure message, or `None` when the unit was provisioned.
    pub error: Option<String>,
}

impl UnitOutcome {
    fn ok(name: &GroupName) -> Self {
        Self {
            name: name.as_str().to_owned(),
            error: None,
        }
    }

    fn failed(name: &GroupName, error: &SetupError) -> Self {
        Self {
            name: name.as_str().to_owned(),
            error: Some(error.to_string()),
        }
    }

    /// Whether the unit was provisioned successfully.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    /// GitHub account the repositories were created under.
    pub login: String,
    /// The derived group names.
    pub groups: Vec<GroupName>,
    /// Per-group repository outcomes.
    pub repositories: Vec<UnitOutcome>,
    /// Per-group build job outcomes.
    pub build_jobs: Vec<UnitOutcome>,
}

impl SetupReport {
    /// Whether any unit failed to provision.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories
            .iter()
            .chain(self.build_jobs.iter())
            .any(|outcome| !outcome.succeeded())
    }
}

/// Drives one provisioning run over the two gateways.
pub struct SetupRunner<'a> {
    github: &'a dyn GitHubGateway,
    jenkins: &'a dyn JenkinsGateway,
    sink: &'a dyn ProgressSink,
}

impl<'a> SetupRunner<'a> {
    /// Wires the runner to its gateways and progress sink.
    #[must_use]
    pub const fn new(
        github: &'a dyn GitHubGateway,
        jenkins: &'a dyn JenkinsGateway,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            github,
            jenkins,
            sink,
        }
    }

    /// Runs the plan: groups, then repositories, then build jobs.
    ///
    /// Per-unit failures are recorded in the report and do not stop the
    /// remaining units. A rejected token or a failed credential lookup aborts
    /// the run, since nothing after it can succeed.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`SetupError`] when token validation or the
    /// credential lookup fails.
    pub async fn run(&self, plan: &SetupPlan) -> Result<SetupReport, SetupError> {
        self.sink.record(SetupEvent::Started {
            target: SetupTarget::Groups,
        });
        let groups = plan.group_names();
        self.sink.record(SetupEvent::Succeeded {
            target: SetupTarget::Groups,
        });

        let (login, repositories, created) = self.provision_repositories(&groups).await?;
        let build_jobs = self.provision_build_jobs(plan, &created).await?;

        Ok(SetupReport {
            login,
            groups,
            repositories,
            build_jobs,
        })
    }

    async fn provision_repositories(
        &self,
        groups: &[GroupName],
    ) -> Result<(String, Vec<UnitOutcome>, Vec<(GroupName, String)>), SetupError> {
        self.sink.record(SetupEvent::Started {
            target: SetupTarget::Repositories,
        });

        let login = match self.github.authenticated_login().await {
            Ok(login) => login,
            Err(error) => {
                self.record_phase_failure(SetupTarget::Repositories, &error);
                return Err(error);
            }
        };
        tracing::info!(login, "authenticated against GitHub");

        let mut outcomes = Vec::with_capacity(groups.len());
        let mut created = Vec::with_capacity(groups.len());
        for group in groups {
            match self.github.create_repository(group.as_str()).await {
                Ok(repository) => {
                    created.push((group.clone(), repository.clone_url));
                    outcomes.push(UnitOutcome::ok(group));
                }
                Err(error) => outcomes.push(UnitOutcome::failed(group, &error)),
            }
        }
        self.record_target_outcome(SetupTarget::Repositories, &outcomes);

        Ok((login, outcomes, created))
    }

    async fn provision_build_jobs(
        &self,
        plan: &SetupPlan,
        created: &[(GroupName, String)],
    ) -> Result<Vec<UnitOutcome>, SetupError> {
        self.sink.record(SetupEvent::Started {
            target: SetupTarget::BuildJobs,
        });

        let credential_id = match self.jenkins.credential_id(plan.credential_domain()).await {
            Ok(credential_id) => credential_id,
            Err(error) => {
                self.record_phase_failure(SetupTarget::BuildJobs, &error);
                return Err(error);
            }
        };

        let mut outcomes = Vec::with_capacity(created.len());
        for (group, clone_url) in created {
            let outcome = match self.create_group_job(group, clone_url, &credential_id).await {
                Ok(()) => UnitOutcome::ok(group),
                Err(error) => UnitOutcome::failed(group, &error),
            };
            outcomes.push(outcome);
        }
        self.record_target_outcome(SetupTarget::BuildJobs, &outcomes);

        Ok(outcomes)
    }

    async fn create_group_job(
        &self,
        group: &GroupName,
        clone_url: &str,
        credential_id: &str,
    ) -> Result<(), SetupError> {
        let name = JobName::new(group.as_str())?;
        let description = format!("Build job for group {}", group.as_str());
        let config_xml = render_job_config(&JobConfigParams {
            repository_url: clone_url,
            credentials_id: credential_id,
            description: description.as_str(),
        })?;

        self.jenkins
            .create_job(&JobDescriptor::new(name, config_xml))
            .await
    }

    fn record_phase_failure(&self, target: SetupTarget, error: &SetupError) {
        self.sink.record(SetupEvent::Failed {
            target,
            message: error.to_string(),
        });
    }

    fn record_target_outcome(&self, target: SetupTarget, outcomes: &[UnitOutcome]) {
        let failed = outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .count();
        if failed == 0 {
            self.sink.record(SetupEvent::Succeeded { target });
        } else {
            self.sink.record(SetupEvent::Failed {
                target,
                message: format!("{failed} of {} units failed", outcomes.len()),
            });
        }
    }
}
