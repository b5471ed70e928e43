//! Courseforge CLI entrypoint for course infrastructure provisioning.

use std::io::{self, Write};
use std::process::ExitCode;

use courseforge::github::GITHUB_API_BASE;
use courseforge::{
    AccessToken, CourseforgeConfig, JenkinsServer, OctocrabGitHubGateway, SetupError, SetupPlan,
    SetupReport, SetupRunner, StderrJsonlProgressSink, UnitOutcome,
};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(report) if report.has_failures() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<SetupReport, SetupError> {
    let config = load_config()?;

    let plan = SetupPlan::new(
        config.require_name_prefix()?,
        config.require_group_count()?,
        config.credential_domain()?,
    );

    let token = AccessToken::new(config.resolve_github_token()?)?;
    let github = OctocrabGitHubGateway::for_token(&token, GITHUB_API_BASE)?;
    let jenkins = JenkinsServer::new(config.require_jenkins_url()?, config.jenkins_credentials()?)?;
    let sink = StderrJsonlProgressSink;

    let runner = SetupRunner::new(&github, &jenkins, &sink);
    let report = runner.run(&plan).await?;

    write_summary(&report)?;
    Ok(report)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SetupError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CourseforgeConfig, SetupError> {
    CourseforgeConfig::load().map_err(|error| SetupError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(report: &SetupReport) -> Result<(), SetupError> {
    let mut stdout = io::stdout().lock();
    let message = format!(
        "Provisioned {} groups as {}\nRepositories: {}\nBuild jobs: {}",
        report.groups.len(),
        report.login,
        summarise_units(&report.repositories),
        summarise_units(&report.build_jobs),
    );

    writeln!(stdout, "{message}").map_err(|error| SetupError::Io {
        message: error.to_string(),
    })
}

fn summarise_units(outcomes: &[UnitOutcome]) -> String {
    let succeeded = outcomes
        .iter()
        .filter(|outcome| outcome.succeeded())
        .count();
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| !outcome.succeeded())
        .map(|outcome| outcome.name.as_str())
        .collect();

    if failed.is_empty() {
        format!("{succeeded} of {} created", outcomes.len())
    } else {
        format!(
            "{succeeded} of {} created (failed: {})",
            outcomes.len(),
            failed.join(", ")
        )
    }
}
