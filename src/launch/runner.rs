use std::{path::PathBuf, process::Stdio};

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    process::Command,
};

use crate::lib::errors::LaunchError;

/// External command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program followed by its arguments, for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Abstraction for running external tools during the launch.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Resolve `program` on the executable search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion with captured stdout and stderr.
    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput, LaunchError>;

    /// Run attached to the terminal. Stderr lines containing any of
    /// `suppressed` are dropped. Returns the exit code.
    async fn interactive(
        &self,
        spec: &CommandSpec,
        suppressed: &[&str],
    ) -> Result<Option<i32>, LaunchError>;
}

/// Runner that operates against the real environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    async fn capture(&self, spec: &CommandSpec) -> Result<CommandOutput, LaunchError> {
        tracing::debug!(
            target: "bedrock_launch::runner",
            command = %spec.display(),
            "Running command"
        );
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| LaunchError::Command {
                program: spec.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn interactive(
        &self,
        spec: &CommandSpec,
        suppressed: &[&str],
    ) -> Result<Option<i32>, LaunchError> {
        tracing::debug!(
            target: "bedrock_launch::runner",
            command = %spec.display(),
            "Running interactive command"
        );
        let command_error = |source: std::io::Error| LaunchError::Command {
            program: spec.program.clone(),
            source,
        };

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(command_error)?;

        if let Some(stderr) = child.stderr.take() {
            let mut lines = BufReader::new(stderr).lines();
            let mut sink = tokio::io::stderr();
            while let Some(line) = lines.next_line().await.map_err(command_error)? {
                if is_suppressed(&line, suppressed) {
                    continue;
                }
                sink.write_all(line.as_bytes())
                    .await
                    .map_err(command_error)?;
                sink.write_all(b"\n").await.map_err(command_error)?;
            }
            sink.flush().await.map_err(command_error)?;
        }

        let status = child.wait().await.map_err(command_error)?;
        Ok(status.code())
    }
}

/// True when `line` contains any suppressed pattern.
pub fn is_suppressed(line: &str, suppressed: &[&str]) -> bool {
    suppressed.iter().any(|pattern| line.contains(pattern))
}
