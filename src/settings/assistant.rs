use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

use super::aws::non_empty;

pub const DEFAULT_ASSISTANT_BINARY: &str = "claude";
pub const DEFAULT_INSTALL_COMMAND: &str = "curl -fsSL https://claude.ai/install.sh | bash";

/// Assistant binary and installer settings.
#[derive(Debug, Clone)]
pub struct AssistantSection {
    pub binary: String,
    /// Shell command run through `sh -c` when the binary is missing.
    pub install_command: String,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            binary: DEFAULT_ASSISTANT_BINARY.to_string(),
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAssistantSection {
    pub binary: Option<String>,
    pub install_command: Option<String>,
}

pub fn parse_assistant_section(
    raw: Option<RawAssistantSection>,
    path: &Path,
) -> Result<AssistantSection, ConfigError> {
    let assistant_raw = raw.unwrap_or_default();
    let defaults = AssistantSection::default();

    Ok(AssistantSection {
        binary: non_empty(assistant_raw.binary, path, "assistant.binary")?
            .unwrap_or(defaults.binary),
        install_command: non_empty(
            assistant_raw.install_command,
            path,
            "assistant.install_command",
        )?
        .unwrap_or(defaults.install_command),
    })
}
