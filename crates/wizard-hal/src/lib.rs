//! Wizard Hardware Abstraction Layer (HAL).
//!
//! Everything that touches the host (filesystem, external processes, the
//! Windows registry, desktop entries) goes through this crate so the wizard
//! engine can be exercised without mutating the real machine.

pub mod fs_ops;
pub mod hal;
pub mod platform;

pub use fs_ops::{copy_files, recreate_dir, remove_dir};
pub use hal::{
    FakeHal, Operation, PlatformOps, ProcessOps, RegistryOps, SchemeHandler, SystemHal,
    UninstallOptions,
};
pub use platform::{native_platform, LinuxPlatform, WindowsPlatform};
pub use wizard_error::{HalError, HalResult};
