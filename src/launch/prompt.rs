use std::io::{self, BufRead, Write};

use crate::lib::errors::LaunchError;

/// Line-oriented user interaction.
pub trait Prompter {
    /// Show `prompt` and read one line of input without the trailing newline.
    /// End of input reads as an empty line.
    fn ask(&mut self, prompt: &str) -> Result<String, LaunchError>;

    /// Show a message that needs no answer.
    fn notify(&mut self, message: &str);
}

/// Prompter backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, LaunchError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(prompt.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|source| LaunchError::Prompt { source })?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| LaunchError::Prompt { source })?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Ask a yes/no question; only `y` or `yes` count as yes.
pub fn confirm<P: Prompter>(prompter: &mut P, question: &str) -> Result<bool, LaunchError> {
    let answer = prompter.ask(&format!("{question} [y/N]: "))?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
