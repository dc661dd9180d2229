//! Interactive configurator: profile, mode and token limit menus.
use std::fmt::Write as _;

use tracing::debug;

use crate::{lib::errors::LaunchError, settings::Settings};

use super::{
    config::{
        enforce_thinking_below_output, LaunchConfig, ModelMode, DEFAULT_THINKING_TOKENS,
    },
    prompt::Prompter,
};

const OPUS_COST_WARNING: &str =
    "Warning: Opus for every request costs noticeably more than opusplan or sonnet.";
const OUTPUT_LATENCY_WARNING: &str =
    "Warning: large output limits increase response latency.";
const OUTPUT_TIMEOUT_WARNING: &str =
    "Warning: 32000 output tokens may hit request timeouts and raises cost per response.";
const THINKING_LATENCY_WARNING: &str =
    "Warning: a larger thinking budget slows down every response.";
const THINKING_COST_WARNING: &str =
    "Warning: 16384 thinking tokens adds significant latency and cost per request.";

/// One selectable entry.
#[derive(Debug, Clone)]
pub struct MenuOption<T> {
    pub label: String,
    pub value: T,
    pub warning: Option<&'static str>,
}

impl<T> MenuOption<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            warning: None,
        }
    }

    pub fn warn(mut self, warning: &'static str) -> Self {
        self.warning = Some(warning);
        self
    }
}

/// Numbered menu with one default entry.
#[derive(Debug, Clone)]
pub struct Menu<T> {
    pub title: &'static str,
    pub options: Vec<MenuOption<T>>,
    pub default_index: usize,
}

impl<T: Clone> Menu<T> {
    /// Render the numbered option list followed by the input prompt.
    pub fn render(&self) -> String {
        let mut text = format!("\n{}:\n", self.title);
        for (index, option) in self.options.iter().enumerate() {
            let marker = if index == self.default_index {
                " (default)"
            } else {
                ""
            };
            let _ = writeln!(text, "  {}) {}{}", index + 1, option.label, marker);
        }
        let _ = write!(
            text,
            "Select [1-{}] (default {}): ",
            self.options.len(),
            self.default_index + 1
        );
        text
    }

    /// Blank or unmatched input picks the default.
    pub fn pick(&self, input: &str) -> &MenuOption<T> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|choice| choice.checked_sub(1))
            .and_then(|index| self.options.get(index))
            .unwrap_or(&self.options[self.default_index])
    }

    /// Ask, confirm the choice and print its warning.
    pub fn select<P: Prompter>(&self, prompter: &mut P) -> Result<T, LaunchError> {
        let answer = prompter.ask(&self.render())?;
        let option = self.pick(&answer);
        prompter.notify(&format!("Selected {}: {}", self.title.to_lowercase(), option.label));
        if let Some(warning) = option.warning {
            prompter.notify(warning);
        }
        debug!(
            target: "bedrock_launch::menu",
            menu = self.title,
            input = %answer,
            selected = %option.label,
            "Menu resolved"
        );
        Ok(option.value.clone())
    }
}

pub fn profile_menu(settings: &Settings) -> Menu<String> {
    Menu {
        title: "AWS profile",
        options: settings
            .aws
            .profiles
            .iter()
            .map(|profile| MenuOption::new(profile.clone(), profile.clone()))
            .collect(),
        default_index: 0,
    }
}

pub fn mode_menu() -> Menu<ModelMode> {
    Menu {
        title: "Model mode",
        options: vec![
            MenuOption::new("opusplan (Opus plans, Sonnet executes)", ModelMode::OpusPlan),
            MenuOption::new("opus (Opus for everything)", ModelMode::Opus).warn(OPUS_COST_WARNING),
            MenuOption::new("sonnet (Sonnet for everything)", ModelMode::Sonnet),
        ],
        default_index: 0,
    }
}

pub fn output_tokens_menu() -> Menu<u32> {
    Menu {
        title: "Max output tokens",
        options: vec![
            MenuOption::new("4096", 4096),
            MenuOption::new("8192", 8192),
            MenuOption::new("16384", 16384).warn(OUTPUT_LATENCY_WARNING),
            MenuOption::new("32000", 32000).warn(OUTPUT_TIMEOUT_WARNING),
        ],
        default_index: 0,
    }
}

pub fn thinking_tokens_menu() -> Menu<u32> {
    Menu {
        title: "Max thinking tokens",
        options: vec![
            MenuOption::new("1024", 1024),
            MenuOption::new("4096", 4096),
            MenuOption::new("8192", 8192).warn(THINKING_LATENCY_WARNING),
            MenuOption::new("16384", 16384).warn(THINKING_COST_WARNING),
        ],
        default_index: 0,
    }
}

/// Fill every unset field, prompting unless defaults were requested.
pub fn configure<P: Prompter>(
    config: LaunchConfig,
    settings: &Settings,
    prompter: &mut P,
) -> Result<LaunchConfig, LaunchError> {
    let mut config = config;

    if config.profile().is_none() {
        let profile = if config.use_defaults() {
            settings.aws.default_profile().to_string()
        } else {
            profile_menu(settings).select(prompter)?
        };
        config = config.with_profile(profile);
    }

    if config.use_defaults() {
        return Ok(config);
    }

    if config.mode().is_none() {
        config = config.with_mode(mode_menu().select(prompter)?);
    }
    if config.max_output_tokens().is_none() {
        config = config.with_max_output_tokens(output_tokens_menu().select(prompter)?);
    }
    if config.max_thinking_tokens().is_none() {
        config = config.with_max_thinking_tokens(thinking_tokens_menu().select(prompter)?);
    }

    let (output, thinking) = config.require_token_limits()?;
    let (thinking, corrected) = enforce_thinking_below_output(output, thinking);
    if corrected {
        prompter.notify(&format!(
            "Note: thinking tokens must be below max output tokens ({output}); using {DEFAULT_THINKING_TOKENS} instead."
        ));
        config = config.with_max_thinking_tokens(thinking);
    }

    Ok(config)
}
