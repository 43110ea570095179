//! Freedesktop hosts: desktop entries and `xdg-mime` scheme binding.

use super::DEFERRED_REMOVAL_DELAY;
use crate::hal::{ProcessOps, SystemHal};
use crate::{HalError, HalResult, PlatformOps, SchemeHandler, UninstallOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APPLICATIONS_DIR: &str = ".local/share/applications";
const DESKTOP_EXT: &str = "desktop";
const XDG_MIME: &str = "xdg-mime";
const SCHEME_HANDLER_MIME: &str = "x-scheme-handler";
const XDG_MIME_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default)]
pub struct LinuxPlatform<P = SystemHal> {
    process: P,
    applications_dir: Option<PathBuf>,
}

impl LinuxPlatform<SystemHal> {
    pub fn new() -> Self {
        Self::with_process(SystemHal::new())
    }
}

impl<P: ProcessOps> LinuxPlatform<P> {
    pub fn with_process(process: P) -> Self {
        Self {
            process,
            applications_dir: None,
        }
    }

    /// Use `dir` instead of `~/.local/share/applications`.
    pub fn with_applications_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.applications_dir = Some(dir.into());
        self
    }

    pub fn applications_dir(&self) -> HalResult<PathBuf> {
        if let Some(dir) = &self.applications_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().ok_or(HalError::HomeDirUnavailable)?;
        Ok(home.join(APPLICATIONS_DIR))
    }

    fn desktop_file_name(scheme: &str) -> String {
        format!("{scheme}.{DESKTOP_EXT}")
    }
}

impl<P: ProcessOps + Send + Sync> PlatformOps for LinuxPlatform<P> {
    fn register_scheme(&self, scheme: &str, handler: &SchemeHandler) -> HalResult<()> {
        let SchemeHandler::DesktopEntry { content } = handler else {
            return Err(HalError::Unsupported(
                "shell command scheme handlers (use a desktop entry)",
            ));
        };

        let dir = self.applications_dir()?;
        fs::create_dir_all(&dir)?;
        let file_name = Self::desktop_file_name(scheme);
        let path = dir.join(&file_name);
        fs::write(&path, content)?;
        log::info!("Wrote desktop entry {}", path.display());

        let mime = format!("{SCHEME_HANDLER_MIME}/{scheme}");
        self.process.command_status(
            XDG_MIME,
            &["default", file_name.as_str(), mime.as_str()],
            XDG_MIME_TIMEOUT,
        )?;
        log::info!("Bound {} to {}", mime, file_name);
        Ok(())
    }

    fn unregister_scheme(&self, scheme: &str) -> HalResult<()> {
        let path = self.applications_dir()?.join(Self::desktop_file_name(scheme));
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed desktop entry {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("Desktop entry {} already absent", path.display());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn create_uninstall_entry(&self, _opts: &UninstallOptions) -> HalResult<()> {
        Err(HalError::Unsupported("uninstall entries"))
    }

    fn delete_uninstall_entry(&self, _key_name: &str) -> HalResult<()> {
        Err(HalError::Unsupported("uninstall entries"))
    }

    #[cfg(unix)]
    fn create_shortcut(&self, src: &Path, dst: &Path) -> HalResult<()> {
        if fs::symlink_metadata(dst).is_ok() {
            fs::remove_file(dst)?;
        }
        std::os::unix::fs::symlink(src, dst)?;
        log::info!("Linked {} -> {}", dst.display(), src.display());
        Ok(())
    }

    #[cfg(not(unix))]
    fn create_shortcut(&self, _src: &Path, _dst: &Path) -> HalResult<()> {
        Err(HalError::Unsupported("symlink shortcuts"))
    }

    fn schedule_deferred_removal(&self, path: &Path) -> HalResult<()> {
        let script = format!(
            "sleep {}; rm -rf -- \"$1\"",
            DEFERRED_REMOVAL_DELAY.as_secs()
        );
        let target = path.to_string_lossy();
        self.process.spawn_detached(
            "sh",
            &["-c", script.as_str(), "sh", target.as_ref()],
            true,
        )?;
        log::info!("Scheduled removal of {}", path.display());
        Ok(())
    }
}
