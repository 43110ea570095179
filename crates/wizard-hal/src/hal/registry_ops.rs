//! Registry access under the current user's hive.
//!
//! Paths are backslash separated and relative to `HKEY_CURRENT_USER`.

use crate::HalResult;

pub const CLASSES_KEY: &str = r"SOFTWARE\Classes";
pub const UNINSTALL_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Registry operations trait.
pub trait RegistryOps {
    /// Create `path` (and any missing ancestors) or open it if it exists.
    fn create_key(&self, path: &str) -> HalResult<()>;

    /// Set a string value on an existing key. An empty `name` targets the default value.
    fn set_string_value(&self, path: &str, name: &str, value: &str) -> HalResult<()>;

    /// Delete a single key. Keys that still have subkeys cannot be deleted.
    fn delete_key(&self, path: &str) -> HalResult<()>;
}

pub fn join_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!(r"{parent}\{child}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_key_uses_backslash() {
        assert_eq!(join_key(CLASSES_KEY, "myapp"), r"SOFTWARE\Classes\myapp");
        assert_eq!(join_key("", "myapp"), "myapp");
    }
}
