//! Preflight checks for the assistant binary and the AWS CLI.
use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    lib::{errors::LaunchError, version::CliVersion},
    settings::Settings,
};

use super::{
    prompt::{confirm, Prompter},
    runner::{CommandRunner, CommandSpec},
};

const AWS_CLI_BANNER_PREFIX: &str = "aws-cli/";

/// Result of a passing preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    pub assistant_path: PathBuf,
    pub aws_cli_path: PathBuf,
    pub aws_cli_version: CliVersion,
}

/// Run every preflight check in order.
pub async fn run_preflight<R, P>(
    settings: &Settings,
    runner: &R,
    prompter: &mut P,
) -> Result<Preflight, LaunchError>
where
    R: CommandRunner,
    P: Prompter,
{
    let assistant_path = ensure_assistant(settings, runner, prompter).await?;
    let aws_cli_path = runner
        .locate(&settings.aws.cli)
        .ok_or_else(|| LaunchError::MissingDependency {
            program: settings.aws.cli.clone(),
        })?;
    let aws_cli_version = check_aws_cli_version(settings, runner).await?;

    Ok(Preflight {
        assistant_path,
        aws_cli_path,
        aws_cli_version,
    })
}

/// Locate the assistant, offering to run the installer when it is missing.
pub async fn ensure_assistant<R, P>(
    settings: &Settings,
    runner: &R,
    prompter: &mut P,
) -> Result<PathBuf, LaunchError>
where
    R: CommandRunner,
    P: Prompter,
{
    let binary = &settings.assistant.binary;
    if let Some(path) = runner.locate(binary) {
        return Ok(path);
    }

    prompter.notify(&format!("`{binary}` was not found on PATH."));
    let question = format!(
        "Install it now with `{}`?",
        settings.assistant.install_command
    );
    if !confirm(prompter, &question)? {
        return Err(LaunchError::InstallDeclined {
            program: binary.clone(),
        });
    }

    let installer = CommandSpec::new("sh").args(["-c", settings.assistant.install_command.as_str()]);
    let exit_code = runner.interactive(&installer, &[]).await?;
    info!(
        target: "bedrock_launch::preflight",
        program = %binary,
        exit_code = ?exit_code,
        "Installer finished"
    );

    match (exit_code, runner.locate(binary)) {
        (Some(0), Some(path)) => Ok(path),
        (exit_code, _) => Err(LaunchError::InstallFailed {
            program: binary.clone(),
            exit_code,
        }),
    }
}

/// Compare the AWS CLI version banner against the configured minimum.
pub async fn check_aws_cli_version<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
) -> Result<CliVersion, LaunchError> {
    let output = runner
        .capture(&CommandSpec::new(&settings.aws.cli).arg("--version"))
        .await?;

    let version = parse_version_banner(&output.stdout)
        .or_else(|| parse_version_banner(&output.stderr))
        .ok_or_else(|| LaunchError::UnreadableVersion {
            program: settings.aws.cli.clone(),
            output: format!("{}{}", output.stdout, output.stderr).trim().to_string(),
        })?;

    let minimum = &settings.aws.min_cli_version;
    if !version.satisfies(minimum) {
        warn!(
            target: "bedrock_launch::preflight",
            found = %version,
            required = %minimum,
            "AWS CLI is too old"
        );
        return Err(LaunchError::CliTooOld {
            found: version.to_string(),
            required: minimum.to_string(),
        });
    }

    Ok(version)
}

/// Extract the version from `aws-cli/2.15.30 Python/3.11.6 ...`.
pub fn parse_version_banner(output: &str) -> Option<CliVersion> {
    output
        .split_whitespace()
        .find_map(|token| token.strip_prefix(AWS_CLI_BANNER_PREFIX))
        .and_then(CliVersion::parse)
}
