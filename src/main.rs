//! Entry point for Bedrock Launch.
use std::process::ExitCode;

use bedrock_launch::{
    cli::{env_toggle, LauncherArgs, DEFAULTS_ENV_KEY},
    launch::{
        CredentialFiles, ExecReplacer, Launcher, RunOptions, StdioPrompter, SystemCommandRunner,
        DRY_RUN_ENV_KEY,
    },
    lib::{errors::RuntimeExit, telemetry},
    settings::Settings,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LauncherArgs::from_env().map_err(RuntimeExit::from_launch)?;
    let settings = Settings::load_from_env_or_default()
        .map_err(|err| RuntimeExit::from_launch(err.into()))?;
    let files = CredentialFiles::discover();
    let options = RunOptions {
        defaults_from_env: env_toggle(DEFAULTS_ENV_KEY),
        dry_run: env_toggle(DRY_RUN_ENV_KEY),
    };

    let launcher = Launcher {
        settings: &settings,
        files: &files,
        runner: &SystemCommandRunner,
        replacer: &ExecReplacer,
    };
    let mut prompter = StdioPrompter;
    launcher
        .run(args, options, &mut prompter)
        .await
        .map_err(RuntimeExit::from_launch)
}
