use crate::resolution::domain::PackageRecord;
use async_trait::async_trait;

/// PackageRegistry port for canonical-name release-metadata lookups.
///
/// The contract is deliberately infallible: any transport error,
/// non-2xx status or malformed body degrades to `None` ("confirmed not
/// found") inside the adapter. Callers never see registry failures.
///
/// Implementations must be `Send + Sync`; lookups are issued with
/// bounded concurrency by the graph builder and the use case.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Looks up release metadata for a canonical package name.
    /// The name is normalized (lower-case, underscore to hyphen)
    /// before the registry is consulted.
    async fn lookup(&self, name: &str) -> Option<PackageRecord>;
}
