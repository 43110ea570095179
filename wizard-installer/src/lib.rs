//! 🧙 `wizard` binary: runs installation wizards from TOML manifests on the console.

pub mod ui;

use anyhow::Context;
use clap::Parser;
use wizard_core::cli::{Cli, Command};
use wizard_core::Manifest;
use wizard_workflow::Pacing;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    wizard_core::logging::init_with(cli.log_file.clone());

    let manifest = Manifest::from_path(cli.command.manifest())?;
    let lang = cli.command.lang().unwrap_or_else(|| manifest.resolve_lang());
    log::info!("📄 Loaded manifest '{}' ({})", manifest.title, lang);

    match &cli.command {
        Command::Plan { .. } => {
            let runner = manifest.installer(lang)?.build();
            let json = runner
                .definition()
                .view()
                .to_json()
                .context("Failed to serialize wizard view")?;
            println!("{json}");
        }
        Command::Run { no_pacing, yes, .. } => {
            let mut installer = manifest.installer(lang)?;
            if *no_pacing {
                installer.set_pacing(Pacing::Disabled);
            }
            let mut presenter = if *yes {
                ui::ConsolePresenter::auto_accept()
            } else {
                ui::ensure_interactive_terminal()?;
                ui::ConsolePresenter::interactive()
            };
            installer.open(&mut presenter, &manifest.window_title())?;
            log::info!("🎉 Wizard '{}' completed", manifest.title);
        }
    }
    Ok(())
}
