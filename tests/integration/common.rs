use std::{
    fs,
    io::Write,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Result};
use serde_json::json;
use tempfile::{tempdir, TempDir};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_bedrock-launch");
pub const OPUS_ID: &str = "us.anthropic.claude-opus-4-1-20250805-v1:0";
pub const SONNET_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";
pub const HAIKU_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

const FAKE_AWS: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_AWS_LOG"
case "$1" in
  --version) echo "aws-cli/${FAKE_AWS_VERSION:-2.15.30} Python/3.11.6 Linux/6.1.0 exe/x86_64" ;;
  sts) exit "${FAKE_STS_EXIT:-0}" ;;
  sso)
    echo "/opt/aws/urllib3/__init__.py:35: NotOpenSSLWarning: urllib3 v2 only supports OpenSSL 1.1.1+" >&2
    echo "Successfully logged into Start URL" >&2
    ;;
  bedrock) cat "$FAKE_LISTING" ;;
  *) exit 2 ;;
esac
"#;

const FAKE_CLAUDE: &str = r#"#!/bin/sh
echo "ARGS=$*"
echo "ANTHROPIC_MODEL=$ANTHROPIC_MODEL"
echo "AWS_PROFILE=$AWS_PROFILE"
echo "CLAUDE_CODE_USE_BEDROCK=$CLAUDE_CODE_USE_BEDROCK"
echo "ANTHROPIC_DEFAULT_OPUS_MODEL=$ANTHROPIC_DEFAULT_OPUS_MODEL"
echo "MAX_THINKING_TOKENS=$MAX_THINKING_TOKENS"
"#;

const AWS_CONFIG: &str = "[profile bedrock-dev]\nsso_session = corp\n\n[profile bedrock-prod]\nsso_session = corp\n";

/// Temporary HOME with fake `aws` and `claude` executables on PATH.
pub struct FakeWorld {
    temp: TempDir,
}

impl FakeWorld {
    pub fn new() -> Result<Self> {
        let temp = tempdir().context("failed to create temp dir")?;
        let world = Self { temp };
        fs::create_dir_all(world.bin_dir()).context("failed to create bin dir")?;
        fs::create_dir_all(world.home().join(".aws")).context("failed to create .aws")?;
        write_executable(&world.bin_dir().join("aws"), FAKE_AWS)?;
        write_executable(&world.bin_dir().join("claude"), FAKE_CLAUDE)?;
        fs::write(world.home().join(".aws/config"), AWS_CONFIG).context("failed to write config")?;
        world.set_listing(&[HAIKU_ID, SONNET_ID, OPUS_ID])?;
        Ok(world)
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    fn listing_path(&self) -> PathBuf {
        self.temp.path().join("listing.json")
    }

    fn aws_log_path(&self) -> PathBuf {
        self.temp.path().join("aws.log")
    }

    pub fn set_listing(&self, ids: &[&str]) -> Result<()> {
        let summaries: Vec<_> = ids
            .iter()
            .map(|id| json!({ "inferenceProfileId": id, "type": "SYSTEM_DEFINED" }))
            .collect();
        let listing = json!({ "inferenceProfileSummaries": summaries });
        fs::write(self.listing_path(), listing.to_string()).context("failed to write listing")
    }

    pub fn remove_program(&self, name: &str) -> Result<()> {
        fs::remove_file(self.bin_dir().join(name))
            .with_context(|| format!("failed to remove fake {name}"))
    }

    /// Subcommands the fake AWS CLI received, one per line.
    pub fn aws_calls(&self) -> Vec<String> {
        fs::read_to_string(self.aws_log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(BINARY_PATH);
        command
            .env_clear()
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin_dir().display()))
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("AWS_CONFIG_FILE", self.home().join(".aws/config"))
            .env("AWS_SHARED_CREDENTIALS_FILE", self.home().join(".aws/credentials"))
            .env("FAKE_AWS_LOG", self.aws_log_path())
            .env("FAKE_LISTING", self.listing_path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Run with `stdin` fed to the process.
    pub fn run(&self, mut command: Command, stdin: &str) -> Result<Output> {
        command.stdin(Stdio::piped());
        let mut child = command.spawn().context("failed to spawn launcher")?;
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(stdin.as_bytes())
                .context("failed to write stdin")?;
        }
        child.wait_with_output().context("failed to wait for launcher")
    }
}

fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to chmod {}", path.display()))
}

/// The pretty-printed plan, skipping any menu output before it.
pub fn plan_of(output: &Output) -> Result<serde_json::Value> {
    let stdout = stdout_of(output);
    let start = stdout
        .find("{\n")
        .with_context(|| format!("no plan in stdout: {stdout}"))?;
    serde_json::from_str(&stdout[start..]).context("plan is not valid JSON")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
