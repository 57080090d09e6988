use crate::resolution::domain::{ImportCandidate, ProjectSnapshot};
use regex::Regex;
use std::collections::HashSet;

/// Standard-library modules excluded from candidate extraction.
///
/// A fixed, pragmatic set rather than an exhaustive stdlib index; the
/// oracle catches stragglers, and a false candidate simply fails
/// registry verification.
const STANDARD_LIBS: &[&str] = &[
    "abc",
    "argparse",
    "asyncio",
    "base64",
    "collections",
    "contextlib",
    "copy",
    "csv",
    "dataclasses",
    "datetime",
    "email",
    "enum",
    "functools",
    "hashlib",
    "http",
    "io",
    "itertools",
    "json",
    "logging",
    "math",
    "multiprocessing",
    "os",
    "pathlib",
    "pickle",
    "random",
    "re",
    "shutil",
    "socket",
    "ssl",
    "string",
    "struct",
    "subprocess",
    "sys",
    "tempfile",
    "threading",
    "time",
    "traceback",
    "types",
    "typing",
    "unittest",
    "urllib",
    "uuid",
    "warnings",
];

/// Returns true if the base module of a dotted path is part of the
/// Python standard library exclusion set.
pub fn is_standard_lib(module_name: &str) -> bool {
    let base = module_name.split('.').next().unwrap_or(module_name);
    STANDARD_LIBS.binary_search(&base).is_ok()
}

/// ImportExtractor turns raw Python source (or pre-extracted import
/// statement lines) into deduplicated lookup candidates.
///
/// This is deliberately a lexical heuristic over `import` / `from ...
/// import` forms, not a Python parser: malformed lines yield no
/// candidate, never an error, and no network access happens here.
pub struct ImportExtractor {
    import_re: Regex,
    symbol_re: Regex,
}

impl Default for ImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportExtractor {
    pub fn new() -> Self {
        Self {
            import_re: Regex::new(r"^(?:from\s+([\w.]+)\s+import|import\s+([\w., ]+))")
                .expect("import pattern must compile"),
            symbol_re: Regex::new(r"^\s*(?:class|def)\s+([A-Za-z_]\w*)")
                .expect("symbol pattern must compile"),
        }
    }

    /// Collects the raw top-level import statement lines from a source
    /// file, skipping blanks and comments.
    pub fn import_lines(&self, content: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if self.import_re.is_match(trimmed) && seen.insert(trimmed.to_string()) {
                lines.push(trimmed.to_string());
            }
        }
        lines
    }

    /// Collects class and function names defined in a source file.
    /// These are local symbols, never external packages.
    pub fn local_symbols(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter_map(|line| self.symbol_re.captures(line))
            .map(|captures| captures[1].to_string())
            .collect()
    }

    /// Extracts the first dotted-path segment of every module named by
    /// an import statement. Comma-separated multi-imports are split,
    /// `as` aliases stripped, relative (dot-prefixed) references
    /// dropped.
    pub fn base_identifiers(&self, import_lines: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut identifiers = Vec::new();

        for line in import_lines {
            let Some(captures) = self.import_re.captures(line.trim()) else {
                continue;
            };

            // `from X.Y import ...` yields X; `import A, B.C as d` yields A and B.
            let modules = captures
                .get(1)
                .or_else(|| captures.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");

            for module in modules.split(',') {
                let cleaned = module
                    .trim()
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .split(" as ")
                    .next()
                    .unwrap_or("");
                if cleaned.is_empty() || cleaned.starts_with('.') {
                    continue;
                }
                let base = cleaned.split('.').next().unwrap_or("").to_string();
                if !base.is_empty() && seen.insert(base.clone()) {
                    identifiers.push(base);
                }
            }
        }
        identifiers
    }

    /// The full extraction contract: raw import lines in, deduplicated
    /// normalized candidates out, with the standard library and
    /// locally defined modules/symbols excluded.
    pub fn extract(&self, snapshot: &ProjectSnapshot) -> Vec<ImportCandidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for identifier in self.base_identifiers(&snapshot.import_lines) {
            if is_standard_lib(&identifier) || snapshot.is_local(&identifier) {
                continue;
            }
            let candidate = ImportCandidate::new(identifier);
            if seen.insert(candidate.normalized_name().to_string()) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}
