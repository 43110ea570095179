//! OS-agnostic filesystem primitives used by the directory and file steps.

use crate::{HalError, HalResult};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path};

/// Remove `path` recursively and create it again (with parents).
///
/// A failing removal returns before anything is created.
pub fn recreate_dir(path: &Path) -> HalResult<()> {
    remove_dir(path)?;
    fs::create_dir_all(path)?;
    log::debug!("Recreated {}", path.display());
    Ok(())
}

/// Remove `path` recursively. A missing path is not an error.
pub fn remove_dir(path: &Path) -> HalResult<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match res {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Write every entry of `files` to `dir/<name>`, overwriting existing files.
///
/// Names must stay inside `dir`: absolute names and `..` components are
/// rejected. Stops at the first failure; files written before it are left in
/// place.
pub fn copy_files(dir: &Path, files: &BTreeMap<String, Vec<u8>>) -> HalResult<()> {
    for (name, content) in files {
        let target = dir.join(checked_name(name)?);
        write_file(&target, content)?;
        log::debug!("Wrote {} ({} bytes)", target.display(), content.len());
    }
    Ok(())
}

fn checked_name(name: &str) -> HalResult<&Path> {
    let path = Path::new(name);
    let inside = !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if inside {
        Ok(path)
    } else {
        Err(HalError::Other(format!(
            "file name {name:?} escapes the target directory"
        )))
    }
}

/// Installed files get `0777 & umask` so copied binaries stay runnable.
#[cfg(unix)]
fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    const MODE: u32 = 0o777;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(MODE)
        .open(path)?;
    file.write_all(content)?;
    // `mode` only applies on creation; an overwritten file keeps its old bits.
    let current = file.metadata()?.permissions().mode() & 0o777;
    if current & 0o111 == 0 {
        file.set_permissions(fs::Permissions::from_mode(current | 0o111))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
}
