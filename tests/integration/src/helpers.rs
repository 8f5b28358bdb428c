//! Test helper utilities for integration tests

use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Temporary directory holding a results file
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a workspace with `results.json` holding `content`
    pub fn with_results(content: &str) -> Self {
        let workspace = Self::new();
        workspace.write("results.json", content);
        workspace
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file inside the workspace
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a directory inside the workspace
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    /// Read a file inside the workspace
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
