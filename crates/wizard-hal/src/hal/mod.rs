//! HAL trait definitions and implementations.
//!
//! This module defines the traits for host interactions and provides both a
//! real (SystemHal) and a fake (FakeHal) implementation of them.

pub mod fake_hal;
pub mod process_ops;
pub mod registry_ops;
pub mod system_hal;

pub use fake_hal::{FakeHal, Operation};
pub use process_ops::ProcessOps;
pub use registry_ops::RegistryOps;
pub use system_hal::SystemHal;

use crate::HalResult;
use serde::Deserialize;
use std::path::Path;

/// How a URL scheme is bound to a handler.
///
/// Linux hosts take a ready-made desktop entry; Windows hosts take a shell
/// command stored under the scheme's `shell\open\command` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeHandler {
    DesktopEntry {
        content: Vec<u8>,
    },
    ShellCommand {
        friendly_name: String,
        command: String,
    },
}

/// Values written to the per-user uninstall record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UninstallOptions {
    pub display_name: String,
    pub display_version: String,
    pub publisher: String,
    /// Command run by the OS to uninstall the program.
    pub uninstall_string: String,
    pub url_info_about: String,
    /// Usually the main executable, which already carries an icon.
    pub display_icon: String,
    /// Name of the key under `...\CurrentVersion\Uninstall`.
    pub key_name: String,
}

/// OS integration operations, one implementation per host family.
///
/// Filesystem primitives are shared by every host and live in `fs_ops`.
pub trait PlatformOps: Send + Sync {
    fn register_scheme(&self, scheme: &str, handler: &SchemeHandler) -> HalResult<()>;

    fn unregister_scheme(&self, scheme: &str) -> HalResult<()>;

    fn create_uninstall_entry(&self, opts: &UninstallOptions) -> HalResult<()>;

    fn delete_uninstall_entry(&self, key_name: &str) -> HalResult<()>;

    /// Start creating a shortcut at `dst` pointing to `src`.
    ///
    /// Returning `Ok` only means the work was started.
    fn create_shortcut(&self, src: &Path, dst: &Path) -> HalResult<()>;

    /// Start a detached helper that removes `path` a few seconds from now,
    /// after the wizard process is gone.
    fn schedule_deferred_removal(&self, path: &Path) -> HalResult<()>;
}
