//! Launcher argument splitting and typed parsing.
//!
//! Only the launcher's own flags are interpreted. Everything else is kept, in
//! order, for the assistant.
use std::env;

use clap::Parser;

use crate::lib::errors::LaunchError;

pub const PROFILE_FLAG: &str = "--profile";
pub const DEFAULTS_FLAG: &str = "--defaults";
pub const MODEL_NAME_FLAG: &str = "--model-name";
pub const MAX_OUTPUT_TOKENS_FLAG: &str = "--max-output-tokens";
pub const MAX_THINKING_TOKENS_FLAG: &str = "--max-thinking-tokens";

const VALUE_FLAGS: [&str; 4] = [
    PROFILE_FLAG,
    MODEL_NAME_FLAG,
    MAX_OUTPUT_TOKENS_FLAG,
    MAX_THINKING_TOKENS_FLAG,
];

/// Argv partitioned into launcher tokens and assistant tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitArgs {
    pub recognised: Vec<String>,
    pub passthrough: Vec<String>,
}

/// Walk argv once; a recognised value flag consumes the following token.
pub fn split_args<I, S>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut split = SplitArgs::default();
    let mut tokens = args.into_iter().map(Into::into);

    while let Some(token) = tokens.next() {
        if token == DEFAULTS_FLAG {
            split.recognised.push(token);
        } else if VALUE_FLAGS.contains(&token.as_str()) {
            split.recognised.push(token);
            if let Some(value) = tokens.next() {
                split.recognised.push(value);
            }
        } else {
            split.passthrough.push(token);
        }
    }

    split
}

/// Launcher flags. Values stay untyped here and are validated by later stages.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "bedrock-launch",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct LauncherArgs {
    /// AWS profile to use (skips the profile menu).
    #[arg(long, allow_hyphen_values = true)]
    pub profile: Option<String>,
    /// Skip every prompt and use opusplan, 4096 output and 1024 thinking tokens.
    #[arg(long, default_value_t = false)]
    pub defaults: bool,
    /// Model mode hint matched against opusplan, opus, sonnet.
    #[arg(long = "model-name", allow_hyphen_values = true)]
    pub model_name: Option<String>,
    /// Output token ceiling.
    #[arg(long = "max-output-tokens", allow_hyphen_values = true)]
    pub max_output_tokens: Option<String>,
    /// Thinking token ceiling.
    #[arg(long = "max-thinking-tokens", allow_hyphen_values = true)]
    pub max_thinking_tokens: Option<String>,
    /// Arguments forwarded to the assistant.
    #[arg(skip)]
    pub passthrough: Vec<String>,
}

impl LauncherArgs {
    /// Parse the current process arguments.
    pub fn from_env() -> Result<Self, LaunchError> {
        Self::parse_tokens(env::args().skip(1))
    }

    /// Parse an argv slice without the binary name.
    pub fn parse_tokens<I, S>(args: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let split = split_args(args);
        let mut parsed =
            Self::try_parse_from(&split.recognised).map_err(|err| LaunchError::Usage {
                message: err.to_string().trim().to_string(),
            })?;
        parsed.passthrough = split.passthrough;
        Ok(parsed)
    }
}
