use env_logger::Target;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LOG_DIR: &str = "wizard";
const LOG_FILE: &str = "wizard.log";

/// Default log location: `<temp>/wizard/wizard.log`.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR).join(LOG_FILE)
}

/// Log to `path` (or the default location), falling back to stderr when the
/// file cannot be opened. `RUST_LOG` overrides the `info` default.
pub fn init_with(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(default_log_path);
    let target = open_target(&path).unwrap_or(Target::Stderr);

    // A second init (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(target)
        .try_init();
}

fn open_target(path: &Path) -> io::Result<Target> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Target::Pipe(Box::new(file)))
}
