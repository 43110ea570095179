use std::io;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type WizardResult<T> = Result<T, WizardError>;

/// Failures raised by the platform adapters.
///
/// These are returned as-is to the step that triggered them; the engine only
/// attaches the failing step index.
#[derive(Error, Debug)]
pub enum HalError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("Registry key not found: {0}")]
    NotFound(String),

    #[error("Registry error on {key}: {source}")]
    Registry {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Operation not supported on this platform: {0}")]
    Unsupported(&'static str),

    #[error("Unable to resolve the user home directory")]
    HomeDirUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl HalError {
    pub fn is_not_found(&self) -> bool {
        match self {
            HalError::NotFound(_) => true,
            HalError::Registry { source, .. } | HalError::Io(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Failures raised by the wizard engine.
#[derive(Error, Debug)]
pub enum WizardError {
    /// The presenter asked for a step that does not exist. This is a contract
    /// violation by the caller, never a user-facing condition.
    #[error("Step index {index} out of range (steps: {len})")]
    StepIndexOutOfRange { index: usize, len: usize },

    #[error("Step {index} failed: {source:#}")]
    StepFailed {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Installation incomplete: not all steps were completed")]
    Incomplete,

    #[error("Presentation failed: {0:#}")]
    Presentation(#[source] anyhow::Error),
}
