//! HAL implementation backed by the real host.

use super::{ProcessOps, RegistryOps};
use crate::{HalError, HalResult};
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Real HAL implementation: spawns processes and, on Windows, edits the registry.
#[derive(Debug, Clone, Default)]
pub struct SystemHal;

impl SystemHal {
    pub fn new() -> Self {
        Self
    }
}

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn output_with_timeout(program: &str, cmd: &mut Command, timeout: Duration) -> HalResult<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout.take() {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr.take() {
            let _ = err.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout).map_err(HalError::Io)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

impl ProcessOps for SystemHal {
    fn command_status(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<()> {
        log::debug!("Running {} {:?}", program, args);
        let mut cmd = Command::new(program);
        cmd.args(args);
        let output = output_with_timeout(program, &mut cmd, timeout)?;
        if !output.status.success() {
            return Err(output_failed(program, &output));
        }
        Ok(())
    }

    fn spawn_detached(&self, program: &str, args: &[&str], hidden: bool) -> HalResult<()> {
        log::debug!("Starting {} (hidden={})", program, hidden);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            if hidden {
                cmd.creation_flags(CREATE_NO_WINDOW);
            }
        }
        #[cfg(not(windows))]
        let _ = hidden;
        // The child is intentionally not waited on.
        let _child = cmd.spawn().map_err(|e| map_command_err(program, e))?;
        Ok(())
    }
}

#[cfg(windows)]
fn registry_err(key: &str, source: std::io::Error) -> HalError {
    if source.kind() == std::io::ErrorKind::NotFound {
        return HalError::NotFound(key.to_string());
    }
    HalError::Registry {
        key: key.to_string(),
        source,
    }
}

#[cfg(windows)]
impl RegistryOps for SystemHal {
    fn create_key(&self, path: &str) -> HalResult<()> {
        use winreg::enums::HKEY_CURRENT_USER;
        use winreg::RegKey;

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        hkcu.create_subkey(path)
            .map_err(|e| registry_err(path, e))?;
        Ok(())
    }

    fn set_string_value(&self, path: &str, name: &str, value: &str) -> HalResult<()> {
        use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};
        use winreg::RegKey;

        let key = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(path, KEY_SET_VALUE)
            .map_err(|e| registry_err(path, e))?;
        key.set_value(name, &value.to_string())
            .map_err(|e| registry_err(path, e))
    }

    fn delete_key(&self, path: &str) -> HalResult<()> {
        use winreg::enums::HKEY_CURRENT_USER;
        use winreg::RegKey;

        RegKey::predef(HKEY_CURRENT_USER)
            .delete_subkey(path)
            .map_err(|e| registry_err(path, e))
    }
}

#[cfg(not(windows))]
impl RegistryOps for SystemHal {
    fn create_key(&self, _path: &str) -> HalResult<()> {
        Err(HalError::Unsupported("registry"))
    }

    fn set_string_value(&self, _path: &str, _name: &str, _value: &str) -> HalResult<()> {
        Err(HalError::Unsupported("registry"))
    }

    fn delete_key(&self, _path: &str) -> HalResult<()> {
        Err(HalError::Unsupported("registry"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn missing_program_maps_to_command_not_found() {
        let hal = SystemHal::new();
        let err = hal
            .command_status("wizard-definitely-missing-bin", &[], Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));
    }

    #[test]
    fn non_zero_exit_maps_to_command_failed() {
        let hal = SystemHal::new();
        let err = hal
            .command_status("sh", &["-c", "echo boom >&2; exit 3"], Duration::from_secs(5))
            .unwrap_err();
        match err {
            HalError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slow_command_times_out() {
        let hal = SystemHal::new();
        let err = hal
            .command_status("sleep", &["5"], Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, HalError::CommandTimeout { .. }));
    }

    #[test]
    fn registry_is_unsupported_off_windows() {
        let hal = SystemHal::new();
        assert!(matches!(
            hal.create_key(r"SOFTWARE\Classes\x"),
            Err(HalError::Unsupported(_))
        ));
    }
}
