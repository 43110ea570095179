//! User-facing strings for the supported languages.
//!
//! English is the fallback for any tag we do not know.

use std::env;
use std::fmt;
use wizard_workflow::Texts;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Fr,
    Vi,
}

impl Lang {
    /// Resolve a tag such as `fr`, `fr_FR.UTF-8` or `vi-VN`.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "fr" | "fra" | "fre" => Lang::Fr,
            "vi" | "vie" => Lang::Vi,
            _ => Lang::En,
        }
    }

    /// Language of the current process: the POSIX variables when set, then
    /// the OS user locale (the only source on Windows).
    pub fn detect() -> Self {
        Self::detect_with(|var| env::var(var).ok(), sys_locale::get_locale)
    }

    fn detect_with(
        env_value: impl Fn(&str) -> Option<String>,
        system_locale: impl FnOnce() -> Option<String>,
    ) -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| env_value(var))
            .find(|value| !value.is_empty())
            .or_else(system_locale)
            .map(|value| Self::from_tag(&value))
            .unwrap_or_default()
    }

    pub fn default_texts(self) -> Texts {
        Texts {
            accept_button: self.accept_button().to_string(),
            fail: self.fail().to_string(),
            success: self.success().to_string(),
            completed_steps: self.completed_steps().to_string(),
            read_all_conditions_tooltip: self.read_all_conditions_tooltip().to_string(),
        }
    }

    pub fn accept_button(self) -> &'static str {
        match self {
            Lang::Fr => "J'ai lu et j'accepte",
            Lang::Vi => "Tôi đã đọc và tôi chấp nhận",
            Lang::En => "I have read and I accept",
        }
    }

    pub fn fail(self) -> &'static str {
        match self {
            Lang::Fr => "Le processus a rencontré une erreur et n'a pu arriver à son terme.",
            Lang::Vi => "Quá trình gặp lỗi. Cửa sổ này sẽ tự đóng sau vài giây.",
            Lang::En => "Process encountered an error and could not complete.",
        }
    }

    pub fn success(self) -> &'static str {
        match self {
            Lang::Fr => {
                "<p>Le processus s'est déroulé correctement jusqu'à son terme.</p>\
                 <p><b>Vous pouvez fermer cette fenêtre.</b></p>\
                 <p>Si vous le souhaitez, vous pouvez voir l'historique des étapes achevées via le bouton ci-dessous.</p>"
            }
            Lang::Vi => {
                "<p>Quá trình diễn ra suôn sẻ để hoàn tất.</p>\
                 <p><b>Bạn có thể đóng cửa sổ này.</b></p>\
                 <p>Nếu muốn, bạn có thể xem lịch sử của các bước đã hoàn thành qua nút bên dưới.</p>"
            }
            Lang::En => {
                "<p>The process went smoothly to completion.</p>\
                 <p><b>You may close this window.</b></p>\
                 <p>If you want, you may see the history of the steps completed via the button below.</p>"
            }
        }
    }

    pub fn completed_steps(self) -> &'static str {
        match self {
            Lang::Fr => "Étapes réalisées",
            Lang::Vi => "Các bước đã hoàn thành",
            Lang::En => "Steps completed",
        }
    }

    pub fn read_all_conditions_tooltip(self) -> &'static str {
        match self {
            Lang::Fr => "Vous devez avoir fait défiler l'ensemble des conditions pour accepter",
            Lang::Vi => "Bạn phải cuộn qua tất cả các điều kiện để tiếp tục",
            Lang::En => "You must have scrolled through all of the conditions to continue",
        }
    }

    pub fn recreate_dir(self, path: &str) -> String {
        match self {
            Lang::Fr => format!("Le dossier {path} va être créé."),
            Lang::Vi => format!("Thư mục {path} đang được tạo."),
            Lang::En => format!("Directory {path} is being created."),
        }
    }

    pub fn remove_dir(self, path: &str) -> String {
        match self {
            Lang::Fr => format!("Suppression du dossier {path}."),
            Lang::Vi => format!("Xóa thư mục {path}."),
            Lang::En => format!("Deleting folder {path}."),
        }
    }

    pub fn copy_files(self, path: &str) -> String {
        match self {
            Lang::Fr => format!("Des fichiers nécessaires seront installés ici : {path}."),
            Lang::Vi => format!("Các tệp cần thiết sẽ được cài đặt tại đây : {path}."),
            Lang::En => format!("Required files will be installed here : {path}."),
        }
    }

    pub fn register_scheme(self, scheme: &str) -> String {
        match self {
            Lang::Fr => format!("Nous installons le schéma {scheme}."),
            Lang::Vi => format!("Cài đặt chương trình {scheme}."),
            Lang::En => format!("Installation of scheme {scheme}."),
        }
    }

    pub fn unregister_scheme(self, scheme: &str) -> String {
        match self {
            Lang::Fr => format!("Suppression du schéma {scheme}."),
            Lang::Vi => format!("Xóa lược đồ {scheme}."),
            Lang::En => format!("Deleting scheme {scheme}."),
        }
    }

    pub fn create_uninstall_entry(self) -> &'static str {
        match self {
            Lang::Fr => "Ajout d'une option de désinstallation.",
            Lang::Vi => "Thêm tùy chọn gỡ cài đặt.",
            Lang::En => "Adding uninstall option.",
        }
    }

    pub fn delete_uninstall_entry(self) -> &'static str {
        match self {
            Lang::Fr => "Suppression de l'option de désinstallation.",
            Lang::Vi => "Xóa tùy chọn gỡ cài đặt.",
            Lang::En => "Removing uninstall option.",
        }
    }

    pub fn create_shortcut(self, src: &str, dst: &str) -> String {
        match self {
            Lang::Fr => format!("Un raccourci de {src} sera créé ici : {dst}."),
            Lang::Vi => format!("Một lối tắt từ {src} sẽ được tạo ở đây: {dst}."),
            Lang::En => format!("A shortcut from {src} is going to be created here : {dst}."),
        }
    }

    pub fn remove_after_close(self, path: &str) -> String {
        match self {
            Lang::Fr => format!(
                "Le dossier : {path} sera supprimé quelques secondes après la fermeture de cette fenêtre."
            ),
            Lang::Vi => format!("Thư mục {path} sẽ bị xóa vài giây sau khi đóng cửa sổ này."),
            Lang::En => format!(
                "The folder : {path} will be deleted a few seconds after closing this window."
            ),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Fr => write!(f, "fr"),
            Lang::Vi => write!(f, "vi"),
        }
    }
}
