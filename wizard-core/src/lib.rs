//! Wizard core library.
//!
//! `wizard-core` sits between the engine in `wizard-workflow` and the `wizard`
//! binary: localized strings, the [`Installer`] facade with ready-made steps,
//! TOML manifests, CLI arguments and logging setup.

pub mod cli;
pub mod installer;
pub mod locale;
pub mod logging;
pub mod manifest;
pub mod markup;

pub use installer::Installer;
pub use locale::Lang;
pub use manifest::{Manifest, StepEntry};

#[cfg(test)]
pub mod test_env;
