//! CLI argument parsing for the `wizard` binary.

use crate::locale::Lang;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "wizard")]
#[command(about = "🧙 Run an installation wizard described by a TOML manifest")]
#[command(long_about = "🧙 Run an installation wizard described by a TOML manifest\n\n\
    The wizard shows the manifest's conditions, asks for acceptance, then runs\n\
    each step in order and stops at the first failure.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write logs here instead of <temp>/wizard/wizard.log
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// ▶️ Show conditions and run every step
    Run {
        /// Install manifest (TOML)
        manifest: PathBuf,

        /// Language tag (en, fr, vi); defaults to the manifest, then the locale
        #[arg(long)]
        lang: Option<String>,

        /// Run steps back to back without the readability delay
        #[arg(long)]
        no_pacing: bool,

        /// Accept the conditions without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// 📋 Print the wizard as JSON without running anything
    Plan {
        /// Install manifest (TOML)
        manifest: PathBuf,

        /// Language tag (en, fr, vi)
        #[arg(long)]
        lang: Option<String>,
    },
}

impl Command {
    pub fn manifest(&self) -> &PathBuf {
        match self {
            Command::Run { manifest, .. } | Command::Plan { manifest, .. } => manifest,
        }
    }

    /// The `--lang` override, if given.
    pub fn lang(&self) -> Option<Lang> {
        match self {
            Command::Run { lang, .. } | Command::Plan { lang, .. } => {
                lang.as_deref().map(Lang::from_tag)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "wizard",
            "run",
            "setup.toml",
            "--lang",
            "vi",
            "--no-pacing",
            "-y",
        ])
        .unwrap();
        match &cli.command {
            Command::Run { no_pacing, yes, .. } => {
                assert!(*no_pacing);
                assert!(*yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.command.manifest(), &PathBuf::from("setup.toml"));
        assert_eq!(cli.command.lang(), Some(Lang::Vi));
    }

    #[test]
    fn plan_takes_global_log_file() {
        let cli =
            Cli::try_parse_from(["wizard", "plan", "setup.toml", "--log-file", "/tmp/w.log"])
                .unwrap();
        assert!(matches!(cli.command, Command::Plan { .. }));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/w.log")));
        assert_eq!(cli.command.lang(), None);
    }

    #[test]
    fn manifest_is_required() {
        assert!(Cli::try_parse_from(["wizard", "run"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
