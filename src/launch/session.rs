//! Session check with an SSO login fallback.
use tracing::{info, warn};

use crate::{lib::errors::LaunchError, settings::Settings};

use super::runner::{CommandRunner, CommandSpec};

/// Stderr noise printed by the AWS CLI's bundled urllib3 on older OpenSSL builds.
pub const BENIGN_WARNING_PATTERNS: [&str; 3] = ["NotOpenSSLWarning", "urllib3", "warnings.warn("];

/// Outcome of the session stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The caller identity resolved; nothing else ran.
    Active,
    /// The identity check failed and the login flow was run once.
    LoginAttempted { exit_code: Option<i32> },
}

/// Check for a live session and run `aws sso login` once if there is none.
///
/// The login outcome is not re-verified.
pub async fn ensure_session<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    profile: &str,
    region: &str,
) -> Result<SessionStatus, LaunchError> {
    let identity = CommandSpec::new(&settings.aws.cli).args([
        "sts",
        "get-caller-identity",
        "--profile",
        profile,
        "--region",
        region,
        "--output",
        "json",
    ]);
    let output = runner.capture(&identity).await?;
    if output.success() {
        info!(
            target: "bedrock_launch::session",
            profile,
            "Existing session is valid"
        );
        return Ok(SessionStatus::Active);
    }

    warn!(
        target: "bedrock_launch::session",
        profile,
        exit_code = ?output.exit_code,
        "No valid session; starting SSO login"
    );
    let login = CommandSpec::new(&settings.aws.cli).args(["sso", "login", "--profile", profile]);
    let exit_code = runner
        .interactive(&login, &BENIGN_WARNING_PATTERNS)
        .await?;
    if exit_code != Some(0) {
        warn!(
            target: "bedrock_launch::session",
            profile,
            exit_code = ?exit_code,
            "SSO login exited unsuccessfully; continuing"
        );
    }

    Ok(SessionStatus::LoginAttempted { exit_code })
}
