//! Console UI for wizard sessions.

use std::io::IsTerminal;

pub mod confirm;
pub mod console;
pub mod style;

pub use console::ConsolePresenter;

pub fn ensure_interactive_terminal() -> anyhow::Result<()> {
    if std::io::stdin().is_terminal() {
        return Ok(());
    }

    anyhow::bail!(
        "No TTY detected. Accepting the conditions needs an interactive terminal.\n\
         Run directly in a terminal, or pass --yes to accept them non-interactively."
    );
}
