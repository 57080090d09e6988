use chrono::{DateTime, Utc};

/// Release metadata for a package as reported by the registry.
///
/// Immutable once fetched; when a cache entry expires the record is
/// superseded by a fresh fetch, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub canonical_name: String,
    pub latest_version: String,
    pub summary: Option<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    /// Bare requirement names declared by the latest release, already
    /// stripped of extras, environment markers and version specifiers.
    pub requirement_names: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl PackageRecord {
    pub fn new(canonical_name: String, latest_version: String) -> Self {
        Self {
            canonical_name,
            latest_version,
            summary: None,
            license: None,
            homepage: None,
            requirement_names: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_requirements(mut self, requirement_names: Vec<String>) -> Self {
        self.requirement_names = requirement_names;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }
}
