//! Installer facade: a [`WizardBuilder`] plus ready-made, localized steps
//! backed by the host's [`PlatformOps`].

use crate::locale::Lang;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wizard_hal::{PlatformOps, SchemeHandler, UninstallOptions};
use wizard_workflow::{Pacing, Presenter, WizardBuilder, WizardResult, WizardRunner};

pub struct Installer {
    builder: WizardBuilder,
    platform: Arc<dyn PlatformOps>,
    lang: Lang,
}

impl Installer {
    /// Installer for the current host, with texts in `lang`.
    pub fn new(title: impl Into<String>, lang: Lang) -> Self {
        Self::with_platform(title, lang, Arc::from(wizard_hal::native_platform()))
    }

    pub fn with_platform(
        title: impl Into<String>,
        lang: Lang,
        platform: Arc<dyn PlatformOps>,
    ) -> Self {
        let mut builder = WizardBuilder::new(title);
        builder.set_texts(lang.default_texts());
        Self {
            builder,
            platform,
            lang,
        }
    }

    pub fn step_count(&self) -> usize {
        self.builder.step_count()
    }

    pub fn add_condition(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.builder.add_condition(title, body);
    }

    /// Add a step with a caller-supplied description and action.
    pub fn add_step(
        &mut self,
        description: impl Into<String>,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) {
        self.builder.add_step(description, action);
    }

    pub fn add_step_recreate_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let description = self.lang.recreate_dir(&display(&path));
        self.builder.add_step(description, move || {
            wizard_hal::recreate_dir(&path)
                .with_context(|| format!("failed to recreate {}", path.display()))
        });
    }

    pub fn add_step_remove_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let description = self.lang.remove_dir(&display(&path));
        self.builder.add_step(description, move || {
            wizard_hal::remove_dir(&path)
                .with_context(|| format!("failed to remove {}", path.display()))
        });
    }

    /// Write every `name -> content` pair into `dir`, which must exist.
    pub fn add_step_copy_files(&mut self, dir: impl Into<PathBuf>, files: BTreeMap<String, Vec<u8>>) {
        let dir = dir.into();
        let description = self.lang.copy_files(&display(&dir));
        self.builder.add_step(description, move || {
            wizard_hal::copy_files(&dir, &files)
                .with_context(|| format!("failed to copy files into {}", dir.display()))
        });
    }

    pub fn add_step_register_scheme(&mut self, scheme: impl Into<String>, handler: SchemeHandler) {
        let scheme = scheme.into();
        let description = self.lang.register_scheme(&scheme);
        let platform = Arc::clone(&self.platform);
        self.builder.add_step(description, move || {
            platform
                .register_scheme(&scheme, &handler)
                .with_context(|| format!("failed to register scheme {scheme}"))
        });
    }

    pub fn add_step_unregister_scheme(&mut self, scheme: impl Into<String>) {
        let scheme = scheme.into();
        let description = self.lang.unregister_scheme(&scheme);
        let platform = Arc::clone(&self.platform);
        self.builder.add_step(description, move || {
            platform
                .unregister_scheme(&scheme)
                .with_context(|| format!("failed to unregister scheme {scheme}"))
        });
    }

    pub fn add_step_create_uninstall_entry(&mut self, opts: UninstallOptions) {
        let description = self.lang.create_uninstall_entry();
        let platform = Arc::clone(&self.platform);
        self.builder.add_step(description, move || {
            platform
                .create_uninstall_entry(&opts)
                .with_context(|| format!("failed to create uninstall entry {}", opts.key_name))
        });
    }

    pub fn add_step_delete_uninstall_entry(&mut self, key_name: impl Into<String>) {
        let key_name = key_name.into();
        let description = self.lang.delete_uninstall_entry();
        let platform = Arc::clone(&self.platform);
        self.builder.add_step(description, move || {
            platform
                .delete_uninstall_entry(&key_name)
                .with_context(|| format!("failed to delete uninstall entry {key_name}"))
        });
    }

    pub fn add_step_create_shortcut(&mut self, src: impl Into<PathBuf>, dst: impl Into<PathBuf>) {
        let (src, dst) = (src.into(), dst.into());
        let description = self.lang.create_shortcut(&display(&src), &display(&dst));
        let platform = Arc::clone(&self.platform);
        self.builder.add_step(description, move || {
            platform
                .create_shortcut(&src, &dst)
                .with_context(|| format!("failed to create shortcut {}", dst.display()))
        });
    }

    /// Announce the removal as a step and schedule it when the session ends.
    ///
    /// The step itself does nothing; the removal helper starts from a
    /// finalize action, so it runs even if an earlier step failed.
    pub fn add_step_remove_after_close(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let description = self.lang.remove_after_close(&display(&path));
        self.builder.add_step(description, || Ok(()));

        let platform = Arc::clone(&self.platform);
        self.builder.add_finalizer(move || {
            platform
                .schedule_deferred_removal(&path)
                .with_context(|| format!("failed to schedule removal of {}", path.display()))
        });
    }

    /// Run `action` when the session ends. Earlier close actions are kept.
    pub fn set_on_close(&mut self, action: impl FnOnce() -> Result<()> + Send + 'static) {
        self.builder.add_finalizer(action);
    }

    pub fn set_accept_button_text(&mut self, text: impl Into<String>) {
        self.builder.texts_mut().accept_button = text.into();
    }

    pub fn set_fail_text(&mut self, text: impl Into<String>) {
        self.builder.texts_mut().fail = text.into();
    }

    pub fn set_success_text(&mut self, text: impl Into<String>) {
        self.builder.texts_mut().success = text.into();
    }

    pub fn set_completed_steps_text(&mut self, text: impl Into<String>) {
        self.builder.texts_mut().completed_steps = text.into();
    }

    pub fn set_read_all_conditions_tooltip(&mut self, text: impl Into<String>) {
        self.builder.texts_mut().read_all_conditions_tooltip = text.into();
    }

    pub fn set_must_read_all_conditions(&mut self, must_read: bool) {
        self.builder.set_must_read_all_conditions(must_read);
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.builder.set_dimensions(width, height);
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.builder.set_pacing(pacing);
    }

    pub fn build(self) -> WizardRunner {
        self.builder.build()
    }

    pub fn open(self, presenter: &mut dyn Presenter, window_title: &str) -> WizardResult<()> {
        self.build().open(presenter, window_title)
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
