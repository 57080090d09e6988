use crate::resolution::domain::ProjectSnapshot;
use crate::shared::Result;
use std::path::Path;

/// ProjectScanner port for observing a project's source tree.
///
/// Yields raw import lines, a file-tree listing, locally defined
/// module/symbol names and an optional framework note. Unreadable
/// individual files are skipped, never fatal; only a completely
/// unreadable project directory is an error.
pub trait ProjectScanner {
    fn scan(&self, project_path: &Path) -> Result<ProjectSnapshot>;
}
