//! Acceptance prompts.

use anyhow::{Context, Result};
use dialoguer::Confirm;

pub fn confirm_prompt(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation input")
}

/// Run `action` only if `confirm` says yes. Returns whether it ran.
pub fn confirm_and_run_with<C, A>(prompt: &str, confirm: C, action: A) -> Result<bool>
where
    C: FnOnce(&str) -> Result<bool>,
    A: FnOnce() -> Result<()>,
{
    if confirm(prompt)? {
        action()?;
        Ok(true)
    } else {
        Ok(false)
    }
}
