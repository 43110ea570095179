//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them and keeps
//! an in-memory registry, allowing the platform adapters to be tested on any
//! host without touching the real machine.

use super::{ProcessOps, RegistryOps};
use crate::{HalError, HalResult};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
        timeout_secs: u64,
    },
    Spawn {
        program: String,
        args: Vec<String>,
        hidden: bool,
    },
    CreateKey {
        path: String,
    },
    SetValue {
        path: String,
        name: String,
        value: String,
    },
    DeleteKey {
        path: String,
    },
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Registry keys (lowercased path) and their string values
    registry: BTreeMap<String, BTreeMap<String, String>>,
    /// Programs whose invocation should fail
    failing_programs: HashSet<String>,
    /// Registry keys whose deletion should fail
    failing_deletes: HashSet<String>,
}

/// Fake HAL implementation that records operations without executing them.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

fn key_id(path: &str) -> String {
    path.trim_matches('\\').to_ascii_lowercase()
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Paths passed to `delete_key`, in call order (including failed attempts).
    pub fn deleted_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::DeleteKey { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear all recorded operations. Registry content is kept.
    pub fn clear(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    /// Make every later invocation of `program` fail.
    pub fn fail_program(&self, program: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_programs
            .insert(program.to_string());
    }

    /// Make every later deletion of `path` fail with an access error.
    pub fn fail_delete(&self, path: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert(key_id(path));
    }

    pub fn has_key(&self, path: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .registry
            .contains_key(&key_id(path))
    }

    pub fn value(&self, path: &str, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .registry
            .get(&key_id(path))
            .and_then(|values| values.get(name).cloned())
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn check_program(&self, program: &str) -> HalResult<()> {
        if self
            .state
            .lock()
            .unwrap()
            .failing_programs
            .contains(program)
        {
            return Err(HalError::CommandFailed {
                program: program.to_string(),
                code: Some(1),
                stderr: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

impl ProcessOps for FakeHal {
    fn command_status(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<()> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout_secs: timeout.as_secs(),
        });
        self.check_program(program)
    }

    fn spawn_detached(&self, program: &str, args: &[&str], hidden: bool) -> HalResult<()> {
        self.record_operation(Operation::Spawn {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            hidden,
        });
        self.check_program(program)
    }
}

impl RegistryOps for FakeHal {
    fn create_key(&self, path: &str) -> HalResult<()> {
        self.record_operation(Operation::CreateKey {
            path: path.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        // Like the real registry, missing ancestors are created too.
        let mut current = String::new();
        for segment in key_id(path).split('\\') {
            if !current.is_empty() {
                current.push('\\');
            }
            current.push_str(segment);
            state.registry.entry(current.clone()).or_default();
        }
        Ok(())
    }

    fn set_string_value(&self, path: &str, name: &str, value: &str) -> HalResult<()> {
        self.record_operation(Operation::SetValue {
            path: path.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        let values = state
            .registry
            .get_mut(&key_id(path))
            .ok_or_else(|| HalError::NotFound(path.to_string()))?;
        values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_key(&self, path: &str) -> HalResult<()> {
        self.record_operation(Operation::DeleteKey {
            path: path.to_string(),
        });
        let id = key_id(path);
        let mut state = self.state.lock().unwrap();
        let denied = || HalError::Registry {
            key: path.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        if state.failing_deletes.contains(&id) {
            return Err(denied());
        }
        if !state.registry.contains_key(&id) {
            return Err(HalError::NotFound(path.to_string()));
        }
        let prefix = format!("{id}\\");
        if state.registry.keys().any(|k| k.starts_with(&prefix)) {
            return Err(denied());
        }
        state.registry.remove(&id);
        Ok(())
    }
}
