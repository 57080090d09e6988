//! Mock implementations of the outbound ports for integration tests.

use async_trait::async_trait;
use depure::prelude::*;
use depure::resolution::domain::{OracleClassification, ProjectSnapshot};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scanner returning a fixed snapshot, as if the project contained
/// exactly the given import lines.
pub struct MockScanner {
    import_lines: Vec<String>,
}

impl MockScanner {
    pub fn new(import_lines: &[&str]) -> Self {
        Self {
            import_lines: import_lines.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProjectScanner for MockScanner {
    fn scan(&self, _project_path: &Path) -> Result<ProjectSnapshot> {
        Ok(ProjectSnapshot {
            import_lines: self.import_lines.clone(),
            file_tree: vec!["app.py".to_string(), "tests/test_app.py".to_string()],
            ..Default::default()
        })
    }
}

/// Oracle returning a fixed classification list. The call counter is
/// shared so callers can keep a handle after moving the mock into a
/// use case.
pub struct MockOracle {
    classifications: Vec<OracleClassification>,
    call_count: Arc<AtomicUsize>,
}

impl MockOracle {
    pub fn new(entries: &[(&str, bool)]) -> Self {
        Self {
            classifications: entries
                .iter()
                .filter_map(|(name, is_dev)| OracleClassification::from_raw(name, *is_dev, None))
                .collect(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.call_count.clone()
    }
}

#[async_trait]
impl NameOracle for MockOracle {
    async fn resolve(&self, _request: &OracleRequest) -> Result<Vec<OracleClassification>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.classifications.clone())
    }
}

/// In-memory registry with per-package versions and requirement lists.
pub struct MockRegistry {
    packages: HashMap<String, (String, Vec<String>)>,
    pub lookup_count: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            lookup_count: AtomicUsize::new(0),
        }
    }

    pub fn with_package(mut self, name: &str, version: &str, requirements: &[&str]) -> Self {
        self.packages.insert(
            name.to_string(),
            (
                version.to_string(),
                requirements.iter().map(|s| s.to_string()).collect(),
            ),
        );
        self
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn lookup(&self, name: &str) -> Option<PackageRecord> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);
        self.packages.get(name).map(|(version, requirements)| {
            PackageRecord::new(name.to_string(), version.clone())
                .with_requirements(requirements.clone())
        })
    }
}

/// Reporter collecting every message for assertions.
pub struct MockProgressReporter {
    pub messages: Mutex<Vec<String>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(needle))
    }
}

impl Default for MockProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
