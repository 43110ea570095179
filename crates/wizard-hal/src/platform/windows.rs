//! Windows hosts: per-user registry entries and PowerShell helpers.
//!
//! The adapter is generic over the registry and process backends so the key
//! layout and deletion order can be verified with [`FakeHal`](crate::FakeHal)
//! on any host.

use super::DEFERRED_REMOVAL_DELAY;
use crate::hal::registry_ops::{join_key, CLASSES_KEY, UNINSTALL_KEY};
use crate::hal::{ProcessOps, RegistryOps, SystemHal};
use crate::{HalError, HalResult, PlatformOps, SchemeHandler, UninstallOptions};
use std::path::{Path, PathBuf};

const SHELL_COMMAND_PATH: [&str; 3] = ["shell", "open", "command"];

#[derive(Debug, Clone)]
pub struct WindowsPlatform<H = SystemHal> {
    hal: H,
    powershell: PathBuf,
}

impl WindowsPlatform<SystemHal> {
    pub fn new() -> Self {
        Self::with_hal(SystemHal::new())
    }
}

impl Default for WindowsPlatform<SystemHal> {
    fn default() -> Self {
        Self::new()
    }
}

/// `%SystemRoot%\System32\WindowsPowerShell\v1.0\powershell.exe`, or a bare
/// `powershell.exe` looked up on PATH when the variable is missing.
pub fn default_powershell_path() -> PathBuf {
    match std::env::var_os("SystemRoot").or_else(|| std::env::var_os("windir")) {
        Some(root) => PathBuf::from(root)
            .join("System32")
            .join("WindowsPowerShell")
            .join("v1.0")
            .join("powershell.exe"),
        None => PathBuf::from("powershell.exe"),
    }
}

/// Quote a value as a single-quoted PowerShell literal.
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn shortcut_script(src: &Path, dst: &Path) -> String {
    format!(
        "$WScriptShell = New-Object -ComObject WScript.Shell; \
         $Shortcut = $WScriptShell.CreateShortcut({dst}); \
         $Shortcut.TargetPath = {src}; \
         $Shortcut.Save();",
        src = ps_quote(&src.to_string_lossy()),
        dst = ps_quote(&dst.to_string_lossy()),
    )
}

fn deferred_removal_script(path: &Path) -> String {
    format!(
        "Start-Sleep -s {}; Remove-Item -LiteralPath {} -Recurse -Force",
        DEFERRED_REMOVAL_DELAY.as_secs(),
        ps_quote(&path.to_string_lossy()),
    )
}

impl<H: ProcessOps + RegistryOps> WindowsPlatform<H> {
    pub fn with_hal(hal: H) -> Self {
        Self {
            hal,
            powershell: default_powershell_path(),
        }
    }

    pub fn with_powershell(mut self, path: impl Into<PathBuf>) -> Self {
        self.powershell = path.into();
        self
    }

    fn start_hidden_powershell(&self, script: &str) -> HalResult<()> {
        let program = self.powershell.to_string_lossy();
        self.hal.spawn_detached(
            program.as_ref(),
            &["-NoProfile", "-NonInteractive", "-Command", script],
            true,
        )
    }

    fn set_values(&self, key: &str, values: &[(&str, &str)]) -> HalResult<()> {
        for (name, value) in values {
            self.hal.set_string_value(key, name, value)?;
        }
        Ok(())
    }

    /// Delete `base\seg0\..\segN`, then each ancestor up to `base\seg0`.
    ///
    /// Keys that are already gone are skipped; any other failure stops the chain.
    fn delete_key_chain(&self, base: &str, segments: &[&str]) -> HalResult<()> {
        let mut remaining = segments.len();
        while remaining > 0 {
            let key = join_key(base, &segments[..remaining].join("\\"));
            match self.hal.delete_key(&key) {
                Ok(()) => log::debug!("Deleted registry key {}", key),
                Err(err) if err.is_not_found() => {
                    log::debug!("Registry key {} already absent", key)
                }
                Err(err) => {
                    log::error!("Failed to delete registry key {}: {}", key, err);
                    return Err(err);
                }
            }
            remaining -= 1;
        }
        Ok(())
    }
}

impl<H: ProcessOps + RegistryOps + Send + Sync> PlatformOps for WindowsPlatform<H> {
    fn register_scheme(&self, scheme: &str, handler: &SchemeHandler) -> HalResult<()> {
        let SchemeHandler::ShellCommand {
            friendly_name,
            command,
        } = handler
        else {
            return Err(HalError::Unsupported(
                "desktop entry scheme handlers (use a shell command)",
            ));
        };

        let scheme_key = join_key(CLASSES_KEY, scheme);
        self.hal.create_key(&scheme_key)?;
        let type_name = format!("{friendly_name} Protocol");
        self.set_values(
            &scheme_key,
            &[("URL Protocol", ""), ("FriendlyTypeName", type_name.as_str())],
        )?;

        let open_key = join_key(&scheme_key, r"shell\open");
        self.hal.create_key(&open_key)?;
        self.hal
            .set_string_value(&open_key, "FriendlyAppName", friendly_name)?;

        let command_key = join_key(&open_key, "command");
        self.hal.create_key(&command_key)?;
        self.hal.set_string_value(&command_key, "", command)?;

        log::info!("Registered URL scheme {} -> {}", scheme, command);
        Ok(())
    }

    fn unregister_scheme(&self, scheme: &str) -> HalResult<()> {
        let mut segments = vec![scheme];
        segments.extend(SHELL_COMMAND_PATH);
        self.delete_key_chain(CLASSES_KEY, &segments)?;
        log::info!("Unregistered URL scheme {}", scheme);
        Ok(())
    }

    fn create_uninstall_entry(&self, opts: &UninstallOptions) -> HalResult<()> {
        if opts.key_name.is_empty() {
            return Err(HalError::Other(
                "uninstall entry requires a key name".to_string(),
            ));
        }
        let key = join_key(UNINSTALL_KEY, &opts.key_name);
        self.hal.create_key(&key)?;
        self.set_values(
            &key,
            &[
                ("NoModify", "1"),
                ("NoRepair", "1"),
                ("UninstallString", opts.uninstall_string.as_str()),
                ("DisplayName", opts.display_name.as_str()),
                ("DisplayIcon", opts.display_icon.as_str()),
                ("Publisher", opts.publisher.as_str()),
                ("URLInfoAbout", opts.url_info_about.as_str()),
                ("DisplayVersion", opts.display_version.as_str()),
            ],
        )?;
        log::info!("Created uninstall entry {}", key);
        Ok(())
    }

    fn delete_uninstall_entry(&self, key_name: &str) -> HalResult<()> {
        self.delete_key_chain(UNINSTALL_KEY, &[key_name])?;
        log::info!("Deleted uninstall entry {}", key_name);
        Ok(())
    }

    fn create_shortcut(&self, src: &Path, dst: &Path) -> HalResult<()> {
        self.start_hidden_powershell(&shortcut_script(src, dst))?;
        log::info!(
            "Started shortcut creation {} -> {}",
            dst.display(),
            src.display()
        );
        Ok(())
    }

    fn schedule_deferred_removal(&self, path: &Path) -> HalResult<()> {
        self.start_hidden_powershell(&deferred_removal_script(path))?;
        log::info!("Scheduled removal of {}", path.display());
        Ok(())
    }
}
