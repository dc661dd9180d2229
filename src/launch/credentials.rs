//! Profile validation against the AWS shared credentials and config files.
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::lib::errors::LaunchError;

pub const CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";
pub const CONFIG_FILE_ENV: &str = "AWS_CONFIG_FILE";

/// Locations of the two AWS files that may declare a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFiles {
    pub credentials: PathBuf,
    pub config: PathBuf,
}

impl CredentialFiles {
    /// Honour the AWS CLI environment overrides, otherwise use `~/.aws`.
    pub fn discover() -> Self {
        let aws_dir = dirs::home_dir().unwrap_or_default().join(".aws");
        Self {
            credentials: env_path(CREDENTIALS_FILE_ENV)
                .unwrap_or_else(|| aws_dir.join("credentials")),
            config: env_path(CONFIG_FILE_ENV).unwrap_or_else(|| aws_dir.join("config")),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `[name]` in the credentials file.
pub fn has_credentials_header(contents: &str, profile: &str) -> bool {
    section_headers(contents).any(|header| header == profile)
}

/// `[profile name]` in the config file, or `[default]` for the default profile.
pub fn has_config_header(contents: &str, profile: &str) -> bool {
    section_headers(contents).any(|header| {
        let mut words = header.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("profile"), Some(name), None) => name == profile,
            (Some("default"), None, None) => profile == "default",
            _ => false,
        }
    })
}

fn section_headers(contents: &str) -> impl Iterator<Item = &str> {
    contents.lines().filter_map(|line| {
        line.trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
    })
}

/// Fail unless `profile` is declared in at least one of the files.
pub fn validate_profile(profile: &str, files: &CredentialFiles) -> Result<(), LaunchError> {
    let in_credentials = read_optional(&files.credentials)
        .is_some_and(|contents| has_credentials_header(&contents, profile));
    let in_config =
        read_optional(&files.config).is_some_and(|contents| has_config_header(&contents, profile));

    debug!(
        target: "bedrock_launch::credentials",
        profile,
        in_credentials,
        in_config,
        "Checked profile headers"
    );

    if in_credentials || in_config {
        return Ok(());
    }

    Err(LaunchError::UnknownProfile {
        profile: profile.to_string(),
        searched: format!(
            "{} or {}",
            files.credentials.display(),
            files.config.display()
        ),
    })
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(
                target: "bedrock_launch::credentials",
                path = %path.display(),
                reason = %err,
                "Failed to read AWS file"
            );
            None
        }
    }
}
