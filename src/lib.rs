//! depure - dependency resolution and verification engine for Python
//! projects
//!
//! This library scans Python sources for imports, resolves them to
//! canonical PyPI package names through an LLM oracle, verifies every
//! suggestion against the registry, and renders an honest
//! requirements artifact. It follows hexagonal architecture: the
//! resolution core never touches the network or the filesystem
//! directly.
//!
//! # Architecture
//!
//! - **Domain Layer** (`resolution`): Pure resolution logic and domain models
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities, error types and cancellation
//!
//! # Example
//!
//! ```no_run
//! use depure::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let scanner = FileSystemScanner::default();
//! let oracle = GeminiOracle::new("gemini-1.5-flash", "api-key")?;
//! let registry = CachingRegistry::new(PyPiRegistry::new()?);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ResolveDependenciesUseCase::new(scanner, oracle, registry, progress_reporter);
//!
//! // Execute
//! let request = ResolveRequest::new(PathBuf::from("."));
//! let outcome = use_case.execute(request, &CancellationToken::new()).await?;
//!
//! if let ResolveOutcome::Resolved(response) = outcome {
//!     println!("{} package(s) resolved", response.dependencies.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod resolution;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemScanner, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{CachingRegistry, GeminiOracle, PyPiRegistry};
    pub use crate::application::dto::{ResolveOutcome, ResolveRequest, ResolveResponse};
    pub use crate::application::use_cases::ResolveDependenciesUseCase;
    pub use crate::ports::outbound::{
        NameOracle, OracleRequest, OutputPresenter, PackageRegistry, ProgressReporter,
        ProjectScanner,
    };
    pub use crate::resolution::domain::{
        DependencyGraph, DependencySet, ImportCandidate, PackageRecord, ResolvedDependency,
    };
    pub use crate::resolution::services::{DependencyMerger, ImportExtractor, TransitiveGraphBuilder};
    pub use crate::shared::{CancellationToken, ExitCode, ResolveError, Result};
}
