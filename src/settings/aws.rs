use std::path::Path;

use serde::Deserialize;

use crate::lib::{errors::ConfigError, version::CliVersion};

pub const DEFAULT_AWS_CLI: &str = "aws";
pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_MIN_CLI_VERSION: &str = "2.13.0";
pub const DEFAULT_PROFILES: [&str; 2] = ["bedrock-dev", "bedrock-prod"];

/// AWS CLI and credential settings.
#[derive(Debug, Clone)]
pub struct AwsSection {
    pub cli: String,
    pub region: String,
    pub min_cli_version: CliVersion,
    pub profiles: [String; 2],
}

impl Default for AwsSection {
    fn default() -> Self {
        Self {
            cli: DEFAULT_AWS_CLI.to_string(),
            region: DEFAULT_REGION.to_string(),
            min_cli_version: default_min_cli_version(),
            profiles: DEFAULT_PROFILES.map(String::from),
        }
    }
}

impl AwsSection {
    /// Profile used when none is given and no menu is shown.
    pub fn default_profile(&self) -> &str {
        &self.profiles[0]
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAwsSection {
    pub cli: Option<String>,
    pub region: Option<String>,
    pub min_cli_version: Option<String>,
    pub profiles: Option<Vec<String>>,
}

pub fn parse_aws_section(raw: Option<RawAwsSection>, path: &Path) -> Result<AwsSection, ConfigError> {
    let aws_raw = raw.unwrap_or_default();
    let defaults = AwsSection::default();

    let cli = non_empty(aws_raw.cli, path, "aws.cli")?.unwrap_or(defaults.cli);
    let region = non_empty(aws_raw.region, path, "aws.region")?.unwrap_or(defaults.region);

    let min_cli_version = match aws_raw.min_cli_version {
        Some(raw_version) => {
            CliVersion::parse(&raw_version).ok_or_else(|| ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "aws.min_cli_version",
                message: format!("`{raw_version}` is not a version"),
            })?
        }
        None => defaults.min_cli_version,
    };

    let profiles = match aws_raw.profiles {
        Some(profiles) => validate_profiles(profiles, path)?,
        None => defaults.profiles,
    };

    Ok(AwsSection {
        cli,
        region,
        min_cli_version,
        profiles,
    })
}

fn validate_profiles(profiles: Vec<String>, path: &Path) -> Result<[String; 2], ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "aws.profiles",
        message: message.to_string(),
    };

    let trimmed: Vec<String> = profiles.iter().map(|p| p.trim().to_string()).collect();
    if trimmed.iter().any(String::is_empty) {
        return Err(invalid("profile names must not be empty"));
    }
    let [first, second]: [String; 2] = trimmed
        .try_into()
        .map_err(|_| invalid("exactly two profile names are required"))?;
    if first == second {
        return Err(invalid("profile names must be distinct"));
    }
    Ok([first, second])
}

pub(super) fn non_empty(
    value: Option<String>,
    path: &Path,
    field: &'static str,
) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "must not be empty".into(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn default_min_cli_version() -> CliVersion {
    CliVersion::parse(DEFAULT_MIN_CLI_VERSION).expect("default minimum version is valid")
}
