use crate::resolution::domain::{
    DependencySet, OracleClassification, PackageRecord, ResolvedDependency,
};
use crate::resolution::services::version;
use std::collections::HashMap;

/// DependencyMerger combines oracle classifications, verified registry
/// records and previously pinned versions into the final dependency
/// records.
///
/// Candidates the registry could not confirm are dropped, not surfaced
/// as errors: an oracle suggestion without registry backing is treated
/// as a hallucination (precision over recall).
pub struct DependencyMerger;

impl DependencyMerger {
    /// Merges one classification list against the lookup results.
    ///
    /// `records` maps canonical name to the verified registry record;
    /// names missing from the map failed verification. `pinned` carries
    /// versions recorded in an existing requirements artifact, if any.
    pub fn merge(
        classifications: &[OracleClassification],
        records: &HashMap<String, PackageRecord>,
        pinned: &HashMap<String, String>,
    ) -> DependencySet {
        let mut resolved = Vec::new();

        for classification in classifications {
            let Some(record) = records.get(&classification.name) else {
                continue;
            };

            let pinned_version = pinned.get(&classification.name).cloned();
            let registry_version = Some(record.latest_version.clone());
            let update_available = pinned_version
                .as_deref()
                .map(|pin| version::is_newer(&record.latest_version, pin))
                .unwrap_or(false);

            let description = if classification.description.is_empty() {
                record.summary.clone().unwrap_or_default()
            } else {
                classification.description.clone()
            };

            resolved.push(ResolvedDependency {
                name: classification.name.clone(),
                is_dev: classification.is_dev,
                pinned_version,
                registry_version,
                update_available,
                is_valid: true,
                description,
            });
        }

        DependencySet::new(resolved)
    }
}
