//! Common test utilities

#![allow(dead_code)]

use cliar::definition::CommandDef;
use cliar::runner::{Invocation, Outcome};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Invocations seen by recording handlers, in call order
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A command whose handler records its invocation
    pub fn command(&self, handler_name: &str) -> CommandDef {
        let calls = Arc::clone(&self.calls);
        CommandDef::new(handler_name, move |invocation| {
            calls.lock().unwrap().push(invocation);
            Ok(Outcome::Handled)
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded invocation
    pub fn last(&self) -> Invocation {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one invocation");
        calls.into_iter().next().unwrap()
    }
}

/// Create a temporary directory holding one file
pub fn create_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}
