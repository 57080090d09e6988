use super::candidate::normalize_name;

/// A canonical-name / prod-dev classification pair produced by the
/// name-resolution oracle after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleClassification {
    pub name: String,
    pub is_dev: bool,
    pub description: String,
}

impl OracleClassification {
    /// Builds a classification from raw oracle output. Returns `None`
    /// when the name normalizes to an empty string; such entries are
    /// discarded, not errors.
    pub fn from_raw(name: &str, is_dev: bool, description: Option<&str>) -> Option<Self> {
        let name = normalize_name(name);
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            is_dev,
            description: description.unwrap_or_default().to_string(),
        })
    }
}
