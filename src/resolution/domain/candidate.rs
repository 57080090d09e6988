/// Normalizes an identifier to the registry's canonical form:
/// lower-case with underscores replaced by hyphens.
///
/// The function is idempotent: normalizing an already-normalized
/// name returns the same string.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace('_', "-")
}

/// A top-level import identifier that survived extraction and is a
/// candidate for registry lookup.
///
/// Invariant: candidates never carry relative (dot-prefixed) module
/// references, standard-library names, or locally defined modules.
/// The extractor enforces this before construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportCandidate {
    raw_identifier: String,
    normalized_name: String,
}

impl ImportCandidate {
    pub fn new(raw_identifier: String) -> Self {
        let normalized_name = normalize_name(&raw_identifier);
        Self {
            raw_identifier,
            normalized_name,
        }
    }

    pub fn raw_identifier(&self) -> &str {
        &self.raw_identifier
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

impl std::fmt::Display for ImportCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized_name)
    }
}
