//! Interactive prompts backed by dialoguer.

use anyhow::Result;
use chrono::NaiveTime;
use dialoguer::{Confirm, Input, Select};
use drivebook_core::ports::ConfirmPrompt;
use drivebook_core::{DriveBookError, DriveBookResult};

/// Asks on the terminal; defaults to "no".
pub struct TerminalConfirm;

impl ConfirmPrompt for TerminalConfirm {
    fn confirm(&self, message: &str) -> DriveBookResult<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| DriveBookError::Io(std::io::Error::other(e.to_string())))
    }
}

/// Free-text input, pre-filled with `default` when given.
pub fn text(prompt: &str, default: Option<&str>) -> Result<String> {
    let input = Input::<String>::new().with_prompt(prompt);
    let input = match default {
        Some(value) => input.default(value.to_string()),
        None => input,
    };
    Ok(input.interact_text()?)
}

/// Pick one of `times`, starting on `current` if it is among them.
pub fn select_time(prompt: &str, times: &[NaiveTime], current: Option<NaiveTime>) -> Result<NaiveTime> {
    let labels: Vec<String> = times.iter().map(|t| t.format("%H:%M").to_string()).collect();
    let default = current
        .and_then(|c| times.iter().position(|t| *t == c))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .max_length(12)
        .interact()?;

    Ok(times[index])
}
