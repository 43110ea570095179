//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so we can
//! test the platform adapters without spawning real processes.

use crate::HalResult;
use std::time::Duration;

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Run `program` to completion and fail on a non-zero exit.
    fn command_status(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<()>;

    /// Start `program` without waiting for it.
    ///
    /// With `hidden` set, no console window is shown on hosts that would open one.
    fn spawn_detached(&self, program: &str, args: &[&str], hidden: bool) -> HalResult<()>;
}
