//! Launch plan assembly and process replacement.
use std::{collections::BTreeMap, path::PathBuf, process::Command};

use serde::Serialize;

use crate::lib::errors::LaunchError;

use super::config::{LaunchConfig, PrimaryFamily};

pub const USE_BEDROCK_ENV: &str = "CLAUDE_CODE_USE_BEDROCK";
pub const AWS_PROFILE_ENV: &str = "AWS_PROFILE";
pub const AWS_REGION_ENV: &str = "AWS_REGION";
pub const MODEL_ENV: &str = "ANTHROPIC_MODEL";
pub const OPUS_MODEL_ENV: &str = "ANTHROPIC_DEFAULT_OPUS_MODEL";
pub const SONNET_MODEL_ENV: &str = "ANTHROPIC_DEFAULT_SONNET_MODEL";
pub const FAST_MODEL_ENV: &str = "ANTHROPIC_DEFAULT_HAIKU_MODEL";
pub const MAX_OUTPUT_TOKENS_ENV: &str = "CLAUDE_CODE_MAX_OUTPUT_TOKENS";
pub const MAX_THINKING_TOKENS_ENV: &str = "MAX_THINKING_TOKENS";

/// Fully resolved command, ready to replace the current process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

/// Environment variables for the resolved mode.
pub fn build_environment(config: &LaunchConfig) -> Result<BTreeMap<String, String>, LaunchError> {
    let profile = config.require_profile()?;
    let mode = config.require_mode()?;
    let (output, thinking) = config.require_token_limits()?;
    let models = config.require_models()?;

    let mut env = BTreeMap::new();
    env.insert(USE_BEDROCK_ENV.to_string(), "1".to_string());
    env.insert(AWS_PROFILE_ENV.to_string(), profile.to_string());
    env.insert(AWS_REGION_ENV.to_string(), config.region().to_string());
    env.insert(MODEL_ENV.to_string(), mode.as_str().to_string());

    for family in mode.primary_families() {
        let id = models.primary(*family).ok_or(LaunchError::Incomplete {
            field: "models.primary",
        })?;
        let key = match family {
            PrimaryFamily::Opus => OPUS_MODEL_ENV,
            PrimaryFamily::Sonnet => SONNET_MODEL_ENV,
        };
        env.insert(key.to_string(), id.to_string());
    }
    env.insert(FAST_MODEL_ENV.to_string(), models.fast.clone());

    env.insert(MAX_OUTPUT_TOKENS_ENV.to_string(), output.to_string());
    env.insert(MAX_THINKING_TOKENS_ENV.to_string(), thinking.to_string());
    Ok(env)
}

pub fn build_plan(config: &LaunchConfig, program: PathBuf) -> Result<LaunchPlan, LaunchError> {
    Ok(LaunchPlan {
        program,
        args: config.passthrough().to_vec(),
        env: build_environment(config)?,
    })
}

/// Seam for the terminal step. Implementations never return on success.
pub trait ProcessReplacer {
    fn replace(&self, plan: &LaunchPlan) -> LaunchError;
}

/// Replaces the current process image with the plan's program.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecReplacer;

impl ProcessReplacer for ExecReplacer {
    #[cfg(unix)]
    fn replace(&self, plan: &LaunchPlan) -> LaunchError {
        use std::os::unix::process::CommandExt;

        let source = Command::new(&plan.program)
            .args(&plan.args)
            .envs(&plan.env)
            .exec();
        LaunchError::Exec {
            program: plan.program.display().to_string(),
            source,
        }
    }

    #[cfg(not(unix))]
    fn replace(&self, plan: &LaunchPlan) -> LaunchError {
        match Command::new(&plan.program)
            .args(&plan.args)
            .envs(&plan.env)
            .status()
        {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(source) => LaunchError::Exec {
                program: plan.program.display().to_string(),
                source,
            },
        }
    }
}
