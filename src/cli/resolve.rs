//! Turn parsed flags into the first [`LaunchConfig`] stage.
use std::env;

use tracing::debug;

use crate::{
    launch::config::{
        parse_token_limit, LaunchConfig, ModelMode, DEFAULT_OUTPUT_TOKENS,
        DEFAULT_THINKING_TOKENS, OUTPUT_TOKEN_CHOICES, THINKING_TOKEN_CHOICES,
    },
    lib::errors::LaunchError,
};

use super::args::{LauncherArgs, MAX_OUTPUT_TOKENS_FLAG, MAX_THINKING_TOKENS_FLAG};

pub const DEFAULTS_ENV_KEY: &str = "BEDROCK_LAUNCH_DEFAULTS";

/// True for `1`, `true`, `yes`, `on` in any case.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Read a boolean toggle from the environment.
pub fn env_toggle(key: &str) -> bool {
    env::var(key).map(|value| is_truthy(&value)).unwrap_or(false)
}

/// Match a model name against `opusplan`, `opus`, `sonnet` in that order.
pub fn derive_mode(name: &str) -> Result<ModelMode, LaunchError> {
    let lowered = name.to_lowercase();
    ModelMode::ALL
        .into_iter()
        .find(|mode| lowered.contains(mode.as_str()))
        .ok_or_else(|| LaunchError::InvalidModelName {
            name: name.to_string(),
        })
}

/// Apply the defaults shortcut or the explicit flags.
///
/// `defaults_from_env` is the state of the `BEDROCK_LAUNCH_DEFAULTS` toggle.
pub fn resolve_request(
    args: LauncherArgs,
    defaults_from_env: bool,
) -> Result<LaunchConfig, LaunchError> {
    let use_defaults = args.defaults || defaults_from_env;
    let mut config = LaunchConfig::new(args.passthrough).with_defaults(use_defaults);
    if let Some(profile) = args.profile {
        config = config.with_profile(profile);
    }

    if use_defaults {
        debug!(
            target: "bedrock_launch::cli",
            from_flag = args.defaults,
            from_env = defaults_from_env,
            "Defaults requested; skipping prompts"
        );
        return Ok(config
            .with_mode(ModelMode::OpusPlan)
            .with_max_output_tokens(DEFAULT_OUTPUT_TOKENS)
            .with_max_thinking_tokens(DEFAULT_THINKING_TOKENS));
    }

    if let Some(name) = args.model_name.as_deref() {
        config = config.with_mode(derive_mode(name)?);
    }
    if let Some(raw) = args.max_output_tokens.as_deref() {
        config = config.with_max_output_tokens(parse_token_limit(
            MAX_OUTPUT_TOKENS_FLAG,
            raw,
            &OUTPUT_TOKEN_CHOICES,
        )?);
    }
    if let Some(raw) = args.max_thinking_tokens.as_deref() {
        config = config.with_max_thinking_tokens(parse_token_limit(
            MAX_THINKING_TOKENS_FLAG,
            raw,
            &THINKING_TOKEN_CHOICES,
        )?);
    }

    Ok(config)
}
