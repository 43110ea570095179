//! Host-family adapters implementing [`PlatformOps`](crate::PlatformOps).

pub mod linux;
pub mod windows;

pub use linux::LinuxPlatform;
pub use windows::WindowsPlatform;

use crate::PlatformOps;
use std::time::Duration;

/// Delay before a deferred removal helper deletes its target.
pub const DEFERRED_REMOVAL_DELAY: Duration = Duration::from_secs(5);

/// Adapter for the host this binary was built for.
#[cfg(windows)]
pub fn native_platform() -> Box<dyn PlatformOps> {
    Box::new(WindowsPlatform::new())
}

/// Adapter for the host this binary was built for.
#[cfg(not(windows))]
pub fn native_platform() -> Box<dyn PlatformOps> {
    Box::new(LinuxPlatform::new())
}
