use std::{io, path::PathBuf, process::ExitCode};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// An explicitly requested settings file does not exist.
    #[error("Settings file {path} does not exist")]
    MissingFile { path: PathBuf },
    /// Field failed validation.
    #[error("Settings file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Fatal conditions that stop the launch before the assistant starts.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("`{program}` was not found on PATH")]
    MissingDependency { program: String },
    #[error("Installation of `{program}` was declined")]
    InstallDeclined { program: String },
    #[error("Installer for `{program}` did not make it available (exit={exit_code:?})")]
    InstallFailed {
        program: String,
        exit_code: Option<i32>,
    },
    #[error("AWS CLI {found} is older than the required {required}")]
    CliTooOld { found: String, required: String },
    #[error("Could not read a version from `{program} --version` output: {output}")]
    UnreadableVersion { program: String, output: String },
    #[error("Model name `{name}` does not match opusplan, opus or sonnet")]
    InvalidModelName { name: String },
    #[error("`{flag}` value `{value}` is not one of {allowed}")]
    InvalidTokenLimit {
        flag: &'static str,
        value: String,
        allowed: String,
    },
    #[error("AWS profile `{profile}` was not found in {searched}")]
    UnknownProfile { profile: String, searched: String },
    #[error("Listing Bedrock inference profiles failed: {message}")]
    ModelLookupFailed { message: String },
    #[error("No Bedrock inference profile matches the `{family}` model family")]
    ModelNotFound { family: String },
    #[error("Failed to run `{program}`: {source}")]
    Command {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read input: {source}")]
    Prompt {
        #[source]
        source: io::Error,
    },
    #[error("Failed to launch `{program}`: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to render launch plan: {source}")]
    Render {
        #[source]
        source: serde_json::Error,
    },
    #[error("Launch configuration is missing `{field}`")]
    Incomplete { field: &'static str },
    #[error("{message}")]
    Usage { message: String },
    #[error(transparent)]
    Settings(#[from] ConfigError),
}

/// User-facing metadata attached to a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
}

impl ErrorDescriptor {
    pub const fn new(code: &'static str, remediation: &'static str) -> Self {
        Self { code, remediation }
    }
}

pub const MISSING_DEPENDENCY_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "missing_dependency",
    "Install the missing tool and make sure it is on PATH, e.g. https://docs.aws.amazon.com/cli/latest/userguide/getting-started-install.html for the AWS CLI.",
);
pub const INSTALL_DECLINED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "install_declined",
    "Install claude manually or re-run and accept the installer.",
);
pub const INSTALL_FAILED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "install_failed",
    "Check the installer output above, then open a new shell so PATH picks up the binary.",
);
pub const CLI_TOO_OLD_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "cli_too_old",
    "Upgrade the AWS CLI to a newer v2 release.",
);
pub const UNREADABLE_VERSION_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "unreadable_version",
    "Make sure `aws --version` prints an `aws-cli/<version>` banner.",
);
pub const INVALID_MODEL_NAME_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "invalid_model_name",
    "Pass --model-name with one of: opusplan, opus, sonnet.",
);
pub const INVALID_TOKEN_LIMIT_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "invalid_token_limit",
    "Pick one of the listed values or omit the flag to choose interactively.",
);
pub const UNKNOWN_PROFILE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "unknown_profile",
    "Configure the profile first, see https://docs.aws.amazon.com/cli/latest/userguide/cli-configure-files.html",
);
pub const MODEL_LOOKUP_FAILED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "model_lookup_failed",
    "Check that the profile can call bedrock:ListInferenceProfiles in the configured region.",
);
pub const MODEL_NOT_FOUND_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "model_not_found",
    "Request model access for the family in the Bedrock console or pick another mode.",
);
pub const COMMAND_FAILED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "command_failed",
    "Check that the command is executable and retry.",
);
pub const PROMPT_FAILED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "prompt_failed",
    "Run from an interactive terminal or pass --defaults.",
);
pub const EXEC_FAILED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "exec_failed",
    "Check that the assistant binary is executable.",
);
pub const INTERNAL_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "internal_error",
    "Re-run with RUST_LOG=debug and report the log output.",
);
pub const USAGE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "usage",
    "Usage: bedrock-launch [--profile NAME] [--defaults] [--model-name NAME] [--max-output-tokens N] [--max-thinking-tokens N] [ARGS...]",
);
pub const SETTINGS_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "invalid_settings",
    "Fix the settings file or unset BEDROCK_LAUNCH_CONFIG.",
);

impl LaunchError {
    /// Map the error to its user-facing descriptor.
    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            LaunchError::MissingDependency { .. } => &MISSING_DEPENDENCY_ERROR,
            LaunchError::InstallDeclined { .. } => &INSTALL_DECLINED_ERROR,
            LaunchError::InstallFailed { .. } => &INSTALL_FAILED_ERROR,
            LaunchError::CliTooOld { .. } => &CLI_TOO_OLD_ERROR,
            LaunchError::UnreadableVersion { .. } => &UNREADABLE_VERSION_ERROR,
            LaunchError::InvalidModelName { .. } => &INVALID_MODEL_NAME_ERROR,
            LaunchError::InvalidTokenLimit { .. } => &INVALID_TOKEN_LIMIT_ERROR,
            LaunchError::UnknownProfile { .. } => &UNKNOWN_PROFILE_ERROR,
            LaunchError::ModelLookupFailed { .. } => &MODEL_LOOKUP_FAILED_ERROR,
            LaunchError::ModelNotFound { .. } => &MODEL_NOT_FOUND_ERROR,
            LaunchError::Command { .. } => &COMMAND_FAILED_ERROR,
            LaunchError::Prompt { .. } => &PROMPT_FAILED_ERROR,
            LaunchError::Exec { .. } => &EXEC_FAILED_ERROR,
            LaunchError::Render { .. } | LaunchError::Incomplete { .. } => &INTERNAL_ERROR,
            LaunchError::Usage { .. } => &USAGE_ERROR,
            LaunchError::Settings(_) => &SETTINGS_ERROR,
        }
    }
}

/// Bundles a fatal error message with an exit code and optional remediation.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    remediation: Option<&'static str>,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_launch(error: LaunchError) -> Self {
        let descriptor = error.descriptor();
        Self {
            message: format!("error[{}]: {error}", descriptor.code),
            remediation: Some(descriptor.remediation),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn from_error(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            remediation: None,
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        if let Some(remediation) = self.remediation {
            eprintln!("  hint: {remediation}");
        }
        self.exit_code
    }
}
