use crate::resolution::domain::{normalize_name, ResolvedDependency};
use std::collections::HashMap;

/// Renders the output artifact: one dependency per line, sorted
/// alphabetically, `name==version` when a version is known and `name`
/// otherwise. The caller chooses which partition(s) to render.
pub fn render(dependencies: &[ResolvedDependency]) -> String {
    let mut lines: Vec<String> = dependencies
        .iter()
        .map(|dep| {
            let version = dep
                .pinned_version
                .as_deref()
                .or(dep.registry_version.as_deref());
            match version {
                Some(version) => format!("{}=={}", dep.name, version),
                None => dep.name.clone(),
            }
        })
        .collect();
    lines.sort();

    if lines.is_empty() {
        String::new()
    } else {
        lines.join("\n") + "\n"
    }
}

/// Leniently parses an existing requirements artifact for pinned
/// versions. Only `name==version` lines contribute; comments, bare
/// names, editable installs and range specifiers are ignored.
pub fn parse_pinned(content: &str) -> HashMap<String, String> {
    let mut pinned = HashMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((name, version)) = trimmed.split_once("==") else {
            continue;
        };
        let name = normalize_name(name);
        // Drop extras and trailing markers from the version side.
        let version = version
            .split(|c: char| c == ';' || c == ' ' || c == '#')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        if !name.is_empty() && !version.is_empty() {
            pinned.insert(name, version);
        }
    }
    pinned
}
