//! TOML install manifests.
//!
//! ```toml
//! title = "My App"
//! lang = "fr"
//! pacing_ms = 500
//!
//! [[condition]]
//! title = "EULA"
//! body_file = "eula.html"
//!
//! [[step]]
//! kind = "recreate_dir"
//! path = "/opt/myapp"
//!
//! [[step]]
//! kind = "copy_files"
//! dir = "/opt/myapp"
//! files = { "myapp" = "build/myapp" }
//! ```
//!
//! Source files (condition bodies, copied files, desktop entries) are resolved
//! against the manifest's directory and read when the installer is built.
//! Target paths are used as written.

use crate::installer::Installer;
use crate::locale::Lang;
use crate::markup::to_plain_text;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wizard_hal::{PlatformOps, SchemeHandler, UninstallOptions};
use wizard_workflow::Pacing;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub title: String,
    /// Defaults to `title` with markup stripped.
    #[serde(default)]
    pub window_title: Option<String>,
    /// Language tag; the process locale is used when absent.
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub must_read_all_conditions: Option<bool>,
    /// Delay before each step. `0` disables pacing.
    #[serde(default)]
    pub pacing_ms: Option<u64>,
    #[serde(default)]
    pub texts: TextOverrides,
    #[serde(default, rename = "condition")]
    pub conditions: Vec<ConditionEntry>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextOverrides {
    pub accept_button: Option<String>,
    pub fail: Option<String>,
    pub success: Option<String>,
    pub completed_steps: Option<String>,
    pub read_all_conditions_tooltip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionEntry {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub body_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepEntry {
    RecreateDir {
        path: PathBuf,
    },
    RemoveDir {
        path: PathBuf,
    },
    CopyFiles {
        dir: PathBuf,
        /// Installed file name -> source file.
        files: BTreeMap<String, PathBuf>,
    },
    /// Either form may be given; the one matching the host wins.
    RegisterScheme {
        scheme: String,
        #[serde(default)]
        desktop_entry: Option<PathBuf>,
        #[serde(default)]
        friendly_name: Option<String>,
        #[serde(default)]
        command: Option<String>,
    },
    UnregisterScheme {
        scheme: String,
    },
    CreateUninstallEntry(UninstallOptions),
    DeleteUninstallEntry {
        key_name: String,
    },
    CreateShortcut {
        src: PathBuf,
        dst: PathBuf,
    },
    RemoveAfterClose {
        path: PathBuf,
    },
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&raw, base_dir)
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Parse manifest text; relative source paths resolve against `base_dir`.
    pub fn parse(raw: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut manifest: Manifest = toml::from_str(raw)?;
        manifest.base_dir = base_dir.into();
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("title must not be empty");
        }
        for condition in &self.conditions {
            if condition.body.is_some() == condition.body_file.is_some() {
                bail!(
                    "condition '{}' needs exactly one of body or body_file",
                    condition.title
                );
            }
        }
        for (i, step) in self.steps.iter().enumerate() {
            if let StepEntry::RegisterScheme {
                scheme,
                desktop_entry,
                friendly_name,
                command,
            } = step
            {
                let has_shell = friendly_name.is_some() && command.is_some();
                if desktop_entry.is_none() && !has_shell {
                    bail!(
                        "step {} registers scheme '{}' without a desktop_entry or friendly_name + command",
                        i + 1,
                        scheme
                    );
                }
            }
        }
        Ok(())
    }

    /// Language from the manifest, or the process locale.
    pub fn resolve_lang(&self) -> Lang {
        self.lang
            .as_deref()
            .map(Lang::from_tag)
            .unwrap_or_else(Lang::detect)
    }

    pub fn window_title(&self) -> String {
        self.window_title
            .clone()
            .unwrap_or_else(|| to_plain_text(&self.title))
    }

    pub fn pacing(&self) -> Pacing {
        match self.pacing_ms {
            None => Pacing::default(),
            Some(0) => Pacing::Disabled,
            Some(ms) => Pacing::Fixed(Duration::from_millis(ms)),
        }
    }

    fn source(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn read_source(&self, path: &Path) -> Result<Vec<u8>> {
        let full = self.source(path);
        fs::read(&full).with_context(|| format!("failed to read {}", full.display()))
    }

    /// Installer for the current host.
    pub fn installer(&self, lang: Lang) -> Result<Installer> {
        self.installer_with(lang, Arc::from(wizard_hal::native_platform()), cfg!(windows))
    }

    /// Build an installer against `platform`. `prefer_shell` picks the
    /// command form of scheme handlers when both forms are present.
    pub fn installer_with(
        &self,
        lang: Lang,
        platform: Arc<dyn PlatformOps>,
        prefer_shell: bool,
    ) -> Result<Installer> {
        let mut installer = Installer::with_platform(self.title.clone(), lang, platform);

        if let (Some(width), Some(height)) = (self.width, self.height) {
            installer.set_dimensions(width, height);
        } else if self.width.is_some() || self.height.is_some() {
            log::warn!("Both width and height are needed to resize the window; ignoring");
        }
        if let Some(must_read) = self.must_read_all_conditions {
            installer.set_must_read_all_conditions(must_read);
        }
        installer.set_pacing(self.pacing());
        self.apply_texts(&mut installer);

        for condition in &self.conditions {
            let body = match (&condition.body, &condition.body_file) {
                (Some(body), _) => body.clone(),
                (None, Some(file)) => String::from_utf8(self.read_source(file)?)
                    .with_context(|| format!("condition '{}' is not UTF-8", condition.title))?,
                (None, None) => String::new(),
            };
            installer.add_condition(condition.title.clone(), body);
        }

        for step in &self.steps {
            self.add_step(&mut installer, step, prefer_shell)?;
        }
        log::debug!(
            "Manifest '{}' produced {} steps",
            self.title,
            installer.step_count()
        );
        Ok(installer)
    }

    fn apply_texts(&self, installer: &mut Installer) {
        let texts = &self.texts;
        if let Some(text) = &texts.accept_button {
            installer.set_accept_button_text(text.clone());
        }
        if let Some(text) = &texts.fail {
            installer.set_fail_text(text.clone());
        }
        if let Some(text) = &texts.success {
            installer.set_success_text(text.clone());
        }
        if let Some(text) = &texts.completed_steps {
            installer.set_completed_steps_text(text.clone());
        }
        if let Some(text) = &texts.read_all_conditions_tooltip {
            installer.set_read_all_conditions_tooltip(text.clone());
        }
    }

    fn add_step(&self, installer: &mut Installer, step: &StepEntry, prefer_shell: bool) -> Result<()> {
        match step {
            StepEntry::RecreateDir { path } => installer.add_step_recreate_dir(path),
            StepEntry::RemoveDir { path } => installer.add_step_remove_dir(path),
            StepEntry::CopyFiles { dir, files } => {
                let mut contents = BTreeMap::new();
                for (name, source) in files {
                    contents.insert(name.clone(), self.read_source(source)?);
                }
                installer.add_step_copy_files(dir, contents);
            }
            StepEntry::RegisterScheme {
                scheme,
                desktop_entry,
                friendly_name,
                command,
            } => {
                let shell = match (friendly_name, command) {
                    (Some(friendly_name), Some(command)) => Some(SchemeHandler::ShellCommand {
                        friendly_name: friendly_name.clone(),
                        command: command.clone(),
                    }),
                    _ => None,
                };
                let handler = match (shell, desktop_entry) {
                    (Some(shell), Some(_)) if prefer_shell => shell,
                    (_, Some(file)) => SchemeHandler::DesktopEntry {
                        content: self.read_source(file)?,
                    },
                    (Some(shell), None) => shell,
                    (None, None) => bail!("scheme '{}' has no handler", scheme),
                };
                installer.add_step_register_scheme(scheme.clone(), handler);
            }
            StepEntry::UnregisterScheme { scheme } => {
                installer.add_step_unregister_scheme(scheme.clone())
            }
            StepEntry::CreateUninstallEntry(opts) => {
                installer.add_step_create_uninstall_entry(opts.clone())
            }
            StepEntry::DeleteUninstallEntry { key_name } => {
                installer.add_step_delete_uninstall_entry(key_name.clone())
            }
            StepEntry::CreateShortcut { src, dst } => installer.add_step_create_shortcut(src, dst),
            StepEntry::RemoveAfterClose { path } => installer.add_step_remove_after_close(path),
        }
        Ok(())
    }
}
