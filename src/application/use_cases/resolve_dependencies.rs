use crate::application::dto::{ResolveOutcome, ResolveRequest, ResolveResponse};
use crate::ports::outbound::{
    NameOracle, OracleRequest, PackageRegistry, ProgressReporter, ProjectScanner,
};
use crate::resolution::domain::{
    ImportCandidate, OracleClassification, PackageRecord, ProjectSnapshot,
};
use crate::resolution::services::{DependencyMerger, ImportExtractor, TransitiveGraphBuilder};
use crate::shared::{CancellationToken, ResolveError, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;

/// ResolveDependenciesUseCase - Core use case for dependency resolution
///
/// This use case orchestrates the full resolution pipeline using
/// generic dependency injection for all infrastructure dependencies:
/// scan, extract, classify via the oracle, verify against the
/// registry, optionally expand the transitive graph, and merge.
///
/// # Type Parameters
/// * `S` - ProjectScanner implementation
/// * `O` - NameOracle implementation
/// * `R` - PackageRegistry implementation
/// * `P` - ProgressReporter implementation
pub struct ResolveDependenciesUseCase<S, O, R, P> {
    scanner: S,
    oracle: O,
    registry: R,
    progress_reporter: P,
    extractor: ImportExtractor,
}

impl<S, O, R, P> ResolveDependenciesUseCase<S, O, R, P>
where
    S: ProjectScanner,
    O: NameOracle,
    R: PackageRegistry,
    P: ProgressReporter,
{
    /// Creates a new ResolveDependenciesUseCase with injected
    /// dependencies
    pub fn new(scanner: S, oracle: O, registry: R, progress_reporter: P) -> Self {
        Self {
            scanner,
            oracle,
            registry,
            progress_reporter,
            extractor: ImportExtractor::new(),
        }
    }

    /// Executes the resolution pipeline.
    ///
    /// Registry misses silently drop the affected candidate; oracle
    /// failures abort the run. Cancellation is checked between stages
    /// and yields `ResolveOutcome::Cancelled`, never an error.
    pub async fn execute(
        &self,
        request: ResolveRequest,
        cancel: &CancellationToken,
    ) -> Result<ResolveOutcome> {
        // Step 1: Scan the project sources
        let (snapshot, candidates) = self.scan_and_extract(&request)?;
        if candidates.is_empty() {
            self.progress_reporter
                .report("✅ No external dependencies detected");
            return Ok(ResolveOutcome::NoExternalDependencies);
        }
        if cancel.is_cancelled() {
            return Ok(ResolveOutcome::Cancelled);
        }

        // Step 2: Classify candidates via the oracle
        let classifications = self
            .classify(&candidates, &snapshot.file_tree_text(), &snapshot.framework_notes)
            .await?;
        if cancel.is_cancelled() {
            return Ok(ResolveOutcome::Cancelled);
        }

        // Step 3: Verify each classified name against the registry
        let records = self
            .verify(&classifications, request.concurrency, cancel)
            .await;
        if cancel.is_cancelled() {
            return Ok(ResolveOutcome::Cancelled);
        }
        if records.is_empty() {
            return Err(ResolveError::NoVerifiedPackages.into());
        }

        // Step 4: Expand the transitive graph if requested
        let graph = if request.include_graph {
            self.progress_reporter
                .report("📖 Expanding transitive dependency graph...");
            let builder = TransitiveGraphBuilder::new(request.max_depth, request.concurrency);
            let direct_names: Vec<String> = records.keys().cloned().collect();
            let mut sorted_names = direct_names;
            sorted_names.sort();
            Some(builder.expand(&self.registry, &sorted_names, cancel).await)
        } else {
            None
        };
        if cancel.is_cancelled() {
            return Ok(ResolveOutcome::Cancelled);
        }

        // Step 5: Merge into the final dependency set
        let dependencies = DependencyMerger::merge(&classifications, &records, &request.pinned);

        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} package(s) ({} production, {} development)",
            dependencies.len(),
            dependencies.production().len(),
            dependencies.development().len()
        ));

        Ok(ResolveOutcome::Resolved(ResolveResponse {
            dependencies,
            graph,
            candidate_count: candidates.len(),
        }))
    }

    /// Scans the project once and extracts lookup candidates, keeping
    /// the snapshot around for oracle context.
    fn scan_and_extract(
        &self,
        request: &ResolveRequest,
    ) -> Result<(ProjectSnapshot, Vec<ImportCandidate>)> {
        self.progress_reporter.report(&format!(
            "📖 Scanning Python sources in: {}",
            request.project_path.display()
        ));

        let snapshot = self.scanner.scan(&request.project_path)?;
        let candidates = self.extractor.extract(&snapshot);

        self.progress_reporter.report(&format!(
            "✅ Found {} import candidate(s) across {} file(s)",
            candidates.len(),
            snapshot.file_tree.len()
        ));

        Ok((snapshot, candidates))
    }

    /// Sends all candidates to the oracle in one batched call.
    ///
    /// Classifications are deduplicated by canonical name; the first
    /// entry for a name wins.
    async fn classify(
        &self,
        candidates: &[ImportCandidate],
        file_tree: &str,
        framework_notes: &Option<String>,
    ) -> Result<Vec<OracleClassification>> {
        self.progress_reporter.report(&format!(
            "📖 Resolving {} candidate(s) to canonical package names...",
            candidates.len()
        ));

        let oracle_request = OracleRequest {
            candidates: candidates
                .iter()
                .map(|c| c.raw_identifier().to_string())
                .collect(),
            file_tree: if file_tree.is_empty() {
                None
            } else {
                Some(file_tree.to_string())
            },
            framework_notes: framework_notes.clone(),
        };

        let raw = self.oracle.resolve(&oracle_request).await?;

        let mut seen = std::collections::HashSet::new();
        let classifications: Vec<OracleClassification> = raw
            .into_iter()
            .filter(|c| seen.insert(c.name.clone()))
            .collect();

        self.progress_reporter.report(&format!(
            "✅ Oracle returned {} classification(s)",
            classifications.len()
        ));

        Ok(classifications)
    }

    /// Looks up every classified name in the registry with bounded
    /// concurrency. Misses are dropped; the map holds verified records
    /// only.
    async fn verify(
        &self,
        classifications: &[OracleClassification],
        concurrency: usize,
        cancel: &CancellationToken,
    ) -> HashMap<String, PackageRecord> {
        let total = classifications.len();
        self.progress_reporter
            .report(&format!("📖 Verifying {} package(s) against the registry...", total));

        let registry = &self.registry;
        let results: Vec<(String, Option<PackageRecord>)> =
            stream::iter(classifications.iter().map(|c| c.name.clone()))
                .map(|name| async move {
                    if cancel.is_cancelled() {
                        return (name, None);
                    }
                    let record = registry.lookup(&name).await;
                    (name, record)
                })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;

        let mut records = HashMap::new();
        for (index, (name, record)) in results.into_iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(&name));
            match record {
                Some(record) => {
                    records.insert(name, record);
                }
                None => {
                    if !cancel.is_cancelled() {
                        self.progress_reporter.report_error(&format!(
                            "⚠️  Could not verify '{}' on the registry; dropping it",
                            name
                        ));
                    }
                }
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockScanner {
        import_lines: Vec<String>,
        scan_count: AtomicUsize,
    }

    impl MockScanner {
        fn new(import_lines: &[&str]) -> Self {
            Self {
                import_lines: import_lines.iter().map(|s| s.to_string()).collect(),
                scan_count: AtomicUsize::new(0),
            }
        }
    }

    impl ProjectScanner for MockScanner {
        fn scan(&self, _project_path: &Path) -> Result<ProjectSnapshot> {
            self.scan_count.fetch_add(1, Ordering::SeqCst);
            Ok(ProjectSnapshot {
                import_lines: self.import_lines.clone(),
                file_tree: vec!["app.py".to_string()],
                ..Default::default()
            })
        }
    }

    struct MockOracle {
        classifications: Vec<OracleClassification>,
        fail: bool,
        call_count: AtomicUsize,
    }

    impl MockOracle {
        fn new(entries: &[(&str, bool)]) -> Self {
            Self {
                classifications: entries
                    .iter()
                    .filter_map(|(name, is_dev)| {
                        OracleClassification::from_raw(name, *is_dev, None)
                    })
                    .collect(),
                fail: false,
                call_count: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                classifications: Vec::new(),
                fail: true,
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NameOracle for MockOracle {
        async fn resolve(&self, _request: &OracleRequest) -> Result<Vec<OracleClassification>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ResolveError::OracleTransport {
                    details: "connection refused".to_string(),
                }
                .into());
            }
            Ok(self.classifications.clone())
        }
    }

    struct MockRegistry {
        known: Vec<(String, String)>,
        lookup_count: AtomicUsize,
    }

    impl MockRegistry {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(name, version)| (name.to_string(), version.to_string()))
                    .collect(),
                lookup_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PackageRegistry for MockRegistry {
        async fn lookup(&self, name: &str) -> Option<PackageRecord> {
            self.lookup_count.fetch_add(1, Ordering::SeqCst);
            self.known
                .iter()
                .find(|(known, _)| known == name)
                .map(|(known, version)| PackageRecord::new(known.clone(), version.clone()))
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn request() -> ResolveRequest {
        ResolveRequest::new(PathBuf::from("/tmp/project"))
    }

    #[tokio::test]
    async fn test_execute_resolves_prod_and_dev_dependencies() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["from bs4 import BeautifulSoup", "import pytest", "import os"]),
            MockOracle::new(&[("beautifulsoup4", false), ("pytest", true)]),
            MockRegistry::new(&[("beautifulsoup4", "4.12.3"), ("pytest", "8.3.0")]),
            SilentReporter,
        );

        let outcome = use_case
            .execute(request(), &CancellationToken::new())
            .await
            .unwrap();

        let response = outcome.response().expect("expected a resolved outcome");
        assert_eq!(response.dependencies.len(), 2);
        assert_eq!(response.dependencies.production()[0].name, "beautifulsoup4");
        assert_eq!(response.dependencies.development()[0].name, "pytest");
        // `os` is stdlib and never reaches the oracle or registry.
        assert_eq!(response.candidate_count, 2);
    }

    #[tokio::test]
    async fn test_execute_drops_unverifiable_oracle_suggestions() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests", "import made_up_pkg"]),
            MockOracle::new(&[("requests", false), ("made-up-pkg", false)]),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let outcome = use_case
            .execute(request(), &CancellationToken::new())
            .await
            .unwrap();

        let response = outcome.response().unwrap();
        assert_eq!(response.dependencies.len(), 1);
        assert!(response.dependencies.get("made-up-pkg").is_none());
    }

    #[tokio::test]
    async fn test_execute_no_external_dependencies_outcome() {
        let oracle = MockOracle::new(&[]);
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import os", "import sys"]),
            oracle,
            MockRegistry::new(&[]),
            SilentReporter,
        );

        let outcome = use_case
            .execute(request(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(outcome, ResolveOutcome::NoExternalDependencies));
        // The oracle must not be consulted for an empty candidate set.
        assert_eq!(use_case.oracle.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_execute_oracle_failure_is_fatal() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests"]),
            MockOracle::failing(),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let result = use_case.execute(request(), &CancellationToken::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_zero_verified_packages_is_an_error() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import made_up_pkg"]),
            MockOracle::new(&[("made-up-pkg", false)]),
            MockRegistry::new(&[]),
            SilentReporter,
        );

        let result = use_case.execute(request(), &CancellationToken::new()).await;
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<ResolveError>().is_some());
    }

    #[tokio::test]
    async fn test_execute_cancelled_before_oracle() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests"]),
            MockOracle::new(&[("requests", false)]),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = use_case.execute(request(), &cancel).await.unwrap();

        assert!(matches!(outcome, ResolveOutcome::Cancelled));
        assert_eq!(use_case.oracle.call_count.load(Ordering::SeqCst), 0);
        assert_eq!(use_case.registry.lookup_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_execute_graph_expansion_can_be_disabled() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests"]),
            MockOracle::new(&[("requests", false)]),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let outcome = use_case
            .execute(request().with_graph(false), &CancellationToken::new())
            .await
            .unwrap();

        assert!(outcome.response().unwrap().graph.is_none());
    }

    #[tokio::test]
    async fn test_execute_graph_contains_direct_dependencies_at_level_zero() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests"]),
            MockOracle::new(&[("requests", false)]),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let outcome = use_case
            .execute(request(), &CancellationToken::new())
            .await
            .unwrap();

        let response = outcome.response().unwrap();
        let graph = response.graph.as_ref().unwrap();
        assert!(graph.contains("requests"));
        assert_eq!(graph.nodes_at_level(0).len(), 1);
    }

    #[tokio::test]
    async fn test_execute_uses_pinned_versions_for_update_flags() {
        let use_case = ResolveDependenciesUseCase::new(
            MockScanner::new(&["import requests"]),
            MockOracle::new(&[("requests", false)]),
            MockRegistry::new(&[("requests", "2.32.3")]),
            SilentReporter,
        );

        let mut pinned = HashMap::new();
        pinned.insert("requests".to_string(), "2.30.0".to_string());

        let outcome = use_case
            .execute(request().with_pinned(pinned), &CancellationToken::new())
            .await
            .unwrap();

        let dep = outcome.response().unwrap().dependencies.get("requests").unwrap().clone();
        assert_eq!(dep.pinned_version.as_deref(), Some("2.30.0"));
        assert!(dep.update_available);
    }
}
