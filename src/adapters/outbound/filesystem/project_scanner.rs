use crate::ports::outbound::ProjectScanner;
use crate::resolution::domain::ProjectSnapshot;
use crate::resolution::services::ImportExtractor;
use crate::shared::{ResolveError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directories that are never part of the project's own source.
const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".venv",
    "__pycache__",
    "node_modules",
    "venv",
];

/// FileSystemScanner adapter: walks a project directory, gathering
/// import lines, a file-tree listing, locally defined modules and
/// symbols, and a best-effort framework note.
///
/// Unreadable individual files are warned about and skipped; only a
/// completely unreadable project root is an error.
pub struct FileSystemScanner {
    extractor: ImportExtractor,
    exclude_patterns: Vec<String>,
}

impl FileSystemScanner {
    pub fn new(extra_excludes: Vec<String>) -> Self {
        let mut exclude_patterns: Vec<String> =
            DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
        exclude_patterns.extend(extra_excludes);
        Self {
            extractor: ImportExtractor::new(),
            exclude_patterns,
        }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| self.exclude_patterns.iter().any(|p| p == name))
            .unwrap_or(false)
    }

    /// Top-level packages (directories with `__init__.py`) and module
    /// file stems; these shadow any same-named PyPI package.
    fn local_modules(&self, root: &Path) -> HashSet<String> {
        let mut modules = HashSet::new();
        let Ok(entries) = fs::read_dir(root) else {
            return modules;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.is_dir() && path.join("__init__.py").exists() {
                modules.insert(name.to_string());
            } else if path.extension().is_some_and(|ext| ext == "py") {
                modules.insert(name.to_string());
            }
        }

        // A Django project directory shadows its own package name.
        if root.join("manage.py").exists() {
            if let Some(project_name) = root.file_name().and_then(|n| n.to_str()) {
                modules.insert(project_name.to_string());
            }
        }
        modules
    }

    fn detect_framework(&self, root: &Path) -> Option<String> {
        if root.join("manage.py").exists() {
            return Some("Django".to_string());
        }
        for entry_point in ["app.py", "main.py"] {
            let Ok(content) = fs::read_to_string(root.join(entry_point)) else {
                continue;
            };
            if content.contains("Flask(__name__)") {
                return Some("Flask".to_string());
            }
            if content.contains("FastAPI()") {
                return Some("FastAPI".to_string());
            }
        }
        None
    }
}

impl Default for FileSystemScanner {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProjectScanner for FileSystemScanner {
    fn scan(&self, project_path: &Path) -> Result<ProjectSnapshot> {
        if !project_path.is_dir() {
            return Err(ResolveError::InvalidProjectPath {
                path: project_path.to_path_buf(),
                reason: "Not a directory".to_string(),
            }
            .into());
        }

        let mut snapshot = ProjectSnapshot {
            local_modules: self.local_modules(project_path),
            framework_notes: self.detect_framework(project_path),
            ..Default::default()
        };

        let mut seen_imports = HashSet::new();
        let walker = WalkDir::new(project_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("⚠️  Warning: skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(project_path) {
                snapshot.file_tree.push(relative.display().to_string());
            }

            if entry.path().extension().is_none_or(|ext| ext != "py") {
                continue;
            }

            let content = match fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!(
                        "⚠️  Warning: could not read {}: {}",
                        entry.path().display(),
                        e
                    );
                    continue;
                }
            };

            for line in self.extractor.import_lines(&content) {
                if seen_imports.insert(line.clone()) {
                    snapshot.import_lines.push(line);
                }
            }
            for symbol in self.extractor.local_symbols(&content) {
                snapshot.local_symbols.insert(symbol);
            }
        }

        snapshot.file_tree.sort();
        Ok(snapshot)
    }
}
