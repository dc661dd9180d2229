//! Launch pipeline: preflight, configuration, profile and session checks,
//! model resolution, and the final process replacement.
pub mod config;
pub mod credentials;
pub mod exec;
pub mod menu;
pub mod models;
pub mod preflight;
pub mod prompt;
pub mod runner;
pub mod session;

use crate::{
    cli::{resolve_request, LauncherArgs},
    lib::{
        errors::LaunchError,
        telemetry::{emit_launch, LaunchTelemetry, StageSpan},
    },
    settings::Settings,
};

pub use config::{LaunchConfig, ModelMode, PrimaryFamily, ResolvedModels};
pub use credentials::{validate_profile, CredentialFiles};
pub use exec::{build_plan, ExecReplacer, LaunchPlan, ProcessReplacer};
pub use prompt::{Prompter, StdioPrompter};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};

pub const DRY_RUN_ENV_KEY: &str = "BEDROCK_LAUNCH_DRY_RUN";

/// Environment toggles read once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub defaults_from_env: bool,
    /// Print the plan as JSON instead of replacing the process.
    pub dry_run: bool,
}

/// Collaborators shared by every stage.
pub struct Launcher<'a, R, X> {
    pub settings: &'a Settings,
    pub files: &'a CredentialFiles,
    pub runner: &'a R,
    pub replacer: &'a X,
}

impl<'a, R, X> Launcher<'a, R, X>
where
    R: CommandRunner,
    X: ProcessReplacer,
{
    /// Run every stage and return the plan without launching it.
    pub async fn prepare<P: Prompter>(
        &self,
        args: LauncherArgs,
        options: RunOptions,
        prompter: &mut P,
    ) -> Result<LaunchPlan, LaunchError> {
        let span = StageSpan::start("resolve_defaults");
        let result = resolve_request(args, options.defaults_from_env);
        span.finish_with(&result);
        let config = result?.with_region(self.settings.aws.region.clone());

        let span = StageSpan::start("preflight");
        let result = preflight::run_preflight(self.settings, self.runner, prompter).await;
        span.finish_with(&result);
        let preflight = result?;

        let span = StageSpan::start("configure");
        let result = menu::configure(config, self.settings, prompter);
        span.finish_with(&result);
        let config = result?;
        let profile = config.require_profile()?.to_string();

        let span = StageSpan::start("validate_profile");
        let result = validate_profile(&profile, self.files);
        span.finish_with(&result);
        result?;

        let span = StageSpan::start("session");
        let result =
            session::ensure_session(self.settings, self.runner, &profile, config.region()).await;
        span.finish_with(&result);
        result?;

        let span = StageSpan::start("resolve_models");
        let result = models::resolve_models(
            self.settings,
            self.runner,
            prompter,
            &profile,
            config.region(),
            config.require_mode()?,
        )
        .await;
        span.finish_with(&result);
        let config = config.with_models(result?);

        let plan = build_plan(&config, preflight.assistant_path)?;
        let (max_output_tokens, max_thinking_tokens) = config.require_token_limits()?;
        emit_launch(&LaunchTelemetry {
            profile: &profile,
            region: config.region(),
            mode: config.require_mode()?.as_str(),
            max_output_tokens,
            max_thinking_tokens,
            program: &plan.program.display().to_string(),
            passthrough: &plan.args,
        });
        Ok(plan)
    }

    /// Prepare, then either print the plan (dry run) or replace the process.
    ///
    /// Outside dry runs this only returns when the replacement failed.
    pub async fn run<P: Prompter>(
        &self,
        args: LauncherArgs,
        options: RunOptions,
        prompter: &mut P,
    ) -> Result<(), LaunchError> {
        let plan = self.prepare(args, options, prompter).await?;
        if options.dry_run {
            let rendered = serde_json::to_string_pretty(&plan)
                .map_err(|source| LaunchError::Render { source })?;
            println!("{rendered}");
            return Ok(());
        }
        Err(self.replacer.replace(&plan))
    }
}
