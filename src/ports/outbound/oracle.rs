use crate::resolution::domain::OracleClassification;
use crate::shared::Result;
use async_trait::async_trait;

/// Batched request to the name-resolution oracle: every candidate of a
/// run in one call, with optional project context so the oracle can
/// distinguish local modules from external packages.
#[derive(Debug, Clone, Default)]
pub struct OracleRequest {
    pub candidates: Vec<String>,
    pub file_tree: Option<String>,
    pub framework_notes: Option<String>,
}

/// NameOracle port for canonical-name resolution and prod/dev
/// classification.
///
/// The oracle is an untrusted black box (an LLM in practice): the
/// adapter validates the response shape and normalizes entries, but a
/// missing or malformed top-level structure is a hard error - there is
/// no deterministic fallback for name canonicalization, so oracle
/// failures abort the whole run.
#[async_trait]
pub trait NameOracle: Send + Sync {
    /// Resolves all candidates in a single batched call.
    async fn resolve(&self, request: &OracleRequest) -> Result<Vec<OracleClassification>>;
}
