//! Load and validate the optional launcher settings file.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod assistant;
pub mod aws;
pub mod models;
pub mod telemetry;

pub use assistant::{
    parse_assistant_section, AssistantSection, RawAssistantSection, DEFAULT_ASSISTANT_BINARY,
    DEFAULT_INSTALL_COMMAND,
};
pub use aws::{
    parse_aws_section, AwsSection, RawAwsSection, DEFAULT_AWS_CLI, DEFAULT_MIN_CLI_VERSION,
    DEFAULT_PROFILES, DEFAULT_REGION,
};
pub use models::{
    parse_models_section, ModelsSection, RawModelsSection, DEFAULT_FAST_FALLBACK_ID,
    DEFAULT_FAST_FAMILY, DEFAULT_VENDOR_MARKER,
};

pub const CONFIG_ENV_KEY: &str = "BEDROCK_LAUNCH_CONFIG";
const CONFIG_DIR_NAME: &str = "bedrock-launch";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level settings container.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub aws: AwsSection,
    pub assistant: AssistantSection,
    pub models: ModelsSection,
    /// File the settings were read from, if any.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    aws: Option<RawAwsSection>,
    assistant: Option<RawAssistantSection>,
    models: Option<RawModelsSection>,
}

impl Settings {
    /// Prefer `BEDROCK_LAUNCH_CONFIG` if set; otherwise read the per-user file when present.
    pub fn load_from_env_or_default() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => {
                let path = PathBuf::from(value);
                telemetry::log_env_source(&path, true);
                if !path.is_file() {
                    return Err(ConfigError::MissingFile { path });
                }
                Self::load_from_path(path)
            }
            _ => match default_settings_path() {
                Some(path) if path.is_file() => {
                    telemetry::log_env_source(&path, false);
                    Self::load_from_path(path)
                }
                _ => {
                    telemetry::log_builtin_defaults();
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load settings from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "bedrock_launch::settings",
            path = %path.display(),
            "Starting settings load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "bedrock_launch::settings",
                path = %path.display(),
                reason = %error,
                "Failed to read settings file"
            );
            error
        })?;

        let raw: RawSettings = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "bedrock_launch::settings",
                path = %path.display(),
                reason = %error,
                "Failed to parse settings file"
            );
            error
        })?;

        let settings = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "bedrock_launch::settings",
                path = %path.display(),
                reason = %err,
                "Failed to validate settings file"
            );
            err
        })?;

        telemetry::log_loaded(&settings);
        Ok(settings)
    }

    fn from_raw(raw: RawSettings, path: PathBuf) -> Result<Self, ConfigError> {
        let aws = parse_aws_section(raw.aws, &path)?;
        let assistant = parse_assistant_section(raw.assistant, &path)?;
        let models = parse_models_section(raw.models, &path)?;

        Ok(Self {
            aws,
            assistant,
            models,
            source_path: Some(path),
        })
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
