use std::collections::HashSet;

/// What the source scanner observed in a project: raw import lines, a
/// file-tree listing for oracle context, locally defined modules and
/// symbols, and an optional framework note.
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    /// Raw top-level import statements, one per entry, deduplicated.
    pub import_lines: Vec<String>,
    /// Relative paths of project files, sorted, newline-joined when
    /// serialized for the oracle.
    pub file_tree: Vec<String>,
    /// Top-level packages (directories with `__init__.py`) and module
    /// file stems defined inside the project.
    pub local_modules: HashSet<String>,
    /// Class and function names defined inside the project.
    pub local_symbols: HashSet<String>,
    /// Detected framework context, e.g. "Django" with settings excerpt.
    pub framework_notes: Option<String>,
}

impl ProjectSnapshot {
    pub fn file_tree_text(&self) -> String {
        self.file_tree.join("\n")
    }

    /// True if the identifier resolves to something defined locally.
    pub fn is_local(&self, identifier: &str) -> bool {
        self.local_modules.contains(identifier) || self.local_symbols.contains(identifier)
    }
}
