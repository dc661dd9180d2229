use tracing::{debug, info};

use super::{Settings, CONFIG_ENV_KEY};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "bedrock_launch::settings",
            path = %path.display(),
            "Loading settings using BEDROCK_LAUNCH_CONFIG environment variable"
        );
    } else {
        debug!(
            target: "bedrock_launch::settings",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            "BEDROCK_LAUNCH_CONFIG not set; using per-user settings file"
        );
    }
}

pub fn log_builtin_defaults() {
    debug!(
        target: "bedrock_launch::settings",
        env = CONFIG_ENV_KEY,
        "No settings file found; using built-in defaults"
    );
}

pub fn log_loaded(settings: &Settings) {
    info!(
        target: "bedrock_launch::settings",
        path = ?settings.source_path,
        aws_cli = %settings.aws.cli,
        region = %settings.aws.region,
        min_cli_version = %settings.aws.min_cli_version,
        profiles = ?settings.aws.profiles,
        assistant = %settings.assistant.binary,
        fast_family = %settings.models.fast_family,
        "Settings file loaded successfully"
    );
}
