//! Staged launch configuration.
//!
//! Every pipeline stage consumes a [`LaunchConfig`] and hands back an updated
//! copy; nothing is mutated in place.
use std::fmt;

use crate::lib::errors::LaunchError;

pub const OUTPUT_TOKEN_CHOICES: [u32; 4] = [4096, 8192, 16384, 32000];
pub const THINKING_TOKEN_CHOICES: [u32; 4] = [1024, 4096, 8192, 16384];
pub const DEFAULT_OUTPUT_TOKENS: u32 = 4096;
pub const DEFAULT_THINKING_TOKENS: u32 = 1024;

/// Which primary model family (or pair) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMode {
    Opus,
    Sonnet,
    /// Opus for planning, Sonnet for execution.
    OpusPlan,
}

impl ModelMode {
    pub const ALL: [ModelMode; 3] = [ModelMode::OpusPlan, ModelMode::Opus, ModelMode::Sonnet];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ModelMode::Opus => "opus",
            ModelMode::Sonnet => "sonnet",
            ModelMode::OpusPlan => "opusplan",
        }
    }

    /// Primary families whose inference profiles must resolve for this mode.
    pub const fn primary_families(&self) -> &'static [PrimaryFamily] {
        match self {
            ModelMode::Opus => &[PrimaryFamily::Opus],
            ModelMode::Sonnet => &[PrimaryFamily::Sonnet],
            ModelMode::OpusPlan => &[PrimaryFamily::Opus, PrimaryFamily::Sonnet],
        }
    }
}

impl fmt::Display for ModelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary model tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimaryFamily {
    Opus,
    Sonnet,
}

impl PrimaryFamily {
    /// Substring matched against inference profile ids.
    pub const fn search_token(&self) -> &'static str {
        match self {
            PrimaryFamily::Opus => "opus",
            PrimaryFamily::Sonnet => "sonnet",
        }
    }
}

/// Inference profile ids resolved for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModels {
    pub opus: Option<String>,
    pub sonnet: Option<String>,
    pub fast: String,
    /// True when `fast` is the configured fallback rather than a lookup result.
    pub fast_is_fallback: bool,
}

impl ResolvedModels {
    pub fn primary(&self, family: PrimaryFamily) -> Option<&str> {
        match family {
            PrimaryFamily::Opus => self.opus.as_deref(),
            PrimaryFamily::Sonnet => self.sonnet.as_deref(),
        }
    }
}

/// Configuration for one invocation, filled in stage by stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchConfig {
    profile: Option<String>,
    region: String,
    use_defaults: bool,
    mode: Option<ModelMode>,
    max_output_tokens: Option<u32>,
    max_thinking_tokens: Option<u32>,
    passthrough: Vec<String>,
    models: Option<ResolvedModels>,
}

impl LaunchConfig {
    pub fn new(passthrough: Vec<String>) -> Self {
        Self {
            passthrough,
            ..Self::default()
        }
    }

    pub fn with_profile(self, profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..self
        }
    }

    pub fn with_region(self, region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..self
        }
    }

    pub fn with_defaults(self, use_defaults: bool) -> Self {
        Self {
            use_defaults,
            ..self
        }
    }

    pub fn with_mode(self, mode: ModelMode) -> Self {
        Self {
            mode: Some(mode),
            ..self
        }
    }

    pub fn with_max_output_tokens(self, tokens: u32) -> Self {
        Self {
            max_output_tokens: Some(tokens),
            ..self
        }
    }

    pub fn with_max_thinking_tokens(self, tokens: u32) -> Self {
        Self {
            max_thinking_tokens: Some(tokens),
            ..self
        }
    }

    pub fn with_models(self, models: ResolvedModels) -> Self {
        Self {
            models: Some(models),
            ..self
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn use_defaults(&self) -> bool {
        self.use_defaults
    }

    pub fn mode(&self) -> Option<ModelMode> {
        self.mode
    }

    pub fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens
    }

    pub fn max_thinking_tokens(&self) -> Option<u32> {
        self.max_thinking_tokens
    }

    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    pub fn models(&self) -> Option<&ResolvedModels> {
        self.models.as_ref()
    }

    pub fn require_profile(&self) -> Result<&str, LaunchError> {
        self.profile()
            .ok_or(LaunchError::Incomplete { field: "profile" })
    }

    pub fn require_mode(&self) -> Result<ModelMode, LaunchError> {
        self.mode.ok_or(LaunchError::Incomplete { field: "mode" })
    }

    /// Both token limits, once resolved.
    pub fn require_token_limits(&self) -> Result<(u32, u32), LaunchError> {
        let output = self.max_output_tokens.ok_or(LaunchError::Incomplete {
            field: "max_output_tokens",
        })?;
        let thinking = self.max_thinking_tokens.ok_or(LaunchError::Incomplete {
            field: "max_thinking_tokens",
        })?;
        Ok((output, thinking))
    }

    pub fn require_models(&self) -> Result<&ResolvedModels, LaunchError> {
        self.models()
            .ok_or(LaunchError::Incomplete { field: "models" })
    }
}

/// Parse a token limit given on the command line; it must be one of `allowed`.
pub fn parse_token_limit(
    flag: &'static str,
    raw: &str,
    allowed: &[u32],
) -> Result<u32, LaunchError> {
    let invalid = || LaunchError::InvalidTokenLimit {
        flag,
        value: raw.to_string(),
        allowed: allowed
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    };

    let value = raw.trim().parse::<u32>().map_err(|_| invalid())?;
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Thinking must stay strictly below output; otherwise fall back to the default.
///
/// Returns the thinking limit to use and whether it was corrected.
pub fn enforce_thinking_below_output(output: u32, thinking: u32) -> (u32, bool) {
    if thinking < output {
        (thinking, false)
    } else {
        (DEFAULT_THINKING_TOKENS, true)
    }
}
